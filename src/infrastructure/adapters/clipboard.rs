//! OSC 52 터미널 이스케이프로 클립보드에 쓰는 어댑터.

use std::io::{self, IsTerminal, Write};

use anyhow::{Context, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::application::ports::Clipboard;

pub struct Osc52Clipboard;

impl Clipboard for Osc52Clipboard {
    fn copy(&self, text: &str) -> Result<bool> {
        let mut out = io::stdout();
        if !out.is_terminal() {
            return Ok(false);
        }
        out.write_all(osc52_sequence(text).as_bytes())
            .and_then(|_| out.flush())
            .context("failed to write clipboard escape sequence")?;
        Ok(true)
    }
}

fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_base64_payload() {
        assert_eq!(osc52_sequence("hi"), "\x1b]52;c;aGk=\x07");
    }
}
