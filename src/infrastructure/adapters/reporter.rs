//! 콘솔 리포터 포트 구현 어댑터.

use std::io::{self, IsTerminal};

use crossterm::style::Stylize;
use unicode_width::UnicodeWidthStr;

use crate::application::ports::Reporter;

const KEY_WIDTH: usize = 12;

/// 콘솔 전용 리포터 어댑터. stdout이 TTY일 때만 색을 입힌다.
pub struct ConsoleReporter {
    colored: bool,
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self {
            colored: io::stdout().is_terminal(),
        }
    }

    fn paint_status(&self, status: &str) -> String {
        if !self.colored {
            return status.to_string();
        }
        match status {
            "running" => status.yellow().to_string(),
            "done" => status.green().to_string(),
            "error" => status.red().to_string(),
            "stale" | "skipped" => status.dark_grey().to_string(),
            _ => status.to_string(),
        }
    }
}

impl Reporter for ConsoleReporter {
    fn section(&self, name: &str) {
        println!();
        println!("==================== {} ====================", name);
    }

    fn kv(&self, key: &str, value: &str) {
        println!("{}: {}", pad_display(key, KEY_WIDTH), value);
    }

    fn status(&self, scope: &str, message: &str) {
        println!("[{}] {}", pad_display(scope, KEY_WIDTH), message);
    }

    fn row(&self, id: u32, text: &str, pending: bool) {
        let marker = if pending { "…" } else { " " };
        let body = if text.is_empty() { "-" } else { text };
        println!("{id:>3}{marker} {body}");
    }

    fn row_status(&self, id: u32, status: &str, extra: Option<&str>) {
        let status = self.paint_status(status);
        match extra {
            Some(extra) => println!("[row {:>3}] {} {}", id, status, extra),
            None => println!("[row {:>3}] {}", id, status),
        }
    }

    fn notice(&self, message: &str) {
        if self.colored {
            eprintln!("{} {}", "notice:".yellow(), message);
        } else {
            eprintln!("notice: {message}");
        }
    }

    fn raw(&self, line: &str) {
        println!("{}", line);
    }
}

/// 한글처럼 폭이 2인 문자를 고려해 표시 폭 기준으로 채운다.
fn pad_display(text: &str, width: usize) -> String {
    let current = UnicodeWidthStr::width(text);
    if current >= width {
        return text.to_string();
    }
    format!("{text}{}", " ".repeat(width - current))
}
