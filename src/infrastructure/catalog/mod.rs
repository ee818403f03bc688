//! 문구 은행/학사일정 데이터 로더.
//! 설정에 경로가 없으면 바이너리에 내장된 JSON을 사용한다.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use crate::domain::phrase::PhraseBank;
use crate::domain::schedule::ScheduleCatalog;

pub const BUILTIN_PHRASES: &str = include_str!("../../../data/phrases.json");
pub const BUILTIN_SCHEDULES: &str = include_str!("../../../data/schedules.json");

pub fn load_phrase_bank(path: Option<&str>) -> Result<PhraseBank> {
    let raw = read_or_builtin(path, BUILTIN_PHRASES)?;
    PhraseBank::from_json(&raw)
        .with_context(|| format!("failed to load phrase bank from {}", source_label(path)))
}

pub fn load_schedule(path: Option<&str>) -> Result<ScheduleCatalog> {
    let raw = read_or_builtin(path, BUILTIN_SCHEDULES)?;
    ScheduleCatalog::from_json(&raw)
        .with_context(|| format!("failed to load schedule from {}", source_label(path)))
}

fn read_or_builtin(path: Option<&str>, builtin: &str) -> Result<String> {
    let Some(path) = path else {
        return Ok(builtin.to_string());
    };
    debug!(path, "reading data table");
    fs::read_to_string(Path::new(path)).with_context(|| format!("failed to read {path}"))
}

fn source_label(path: Option<&str>) -> &str {
    path.unwrap_or("builtin data")
}
