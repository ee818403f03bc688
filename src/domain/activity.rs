//! 창체 활동 레코드와 직접 입력 파싱.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::error::DraftError;

static DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d{4}\.\d{2}\.\d{2}\.?").expect("valid activity date regex"));

/// 학사일정 카탈로그의 한 항목.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ScheduleEntry {
    pub date: String,
    pub name: String,
}

/// 문장 조합에 쓰이는 활동 정보.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityRecord {
    pub date: String,
    pub name: String,
}

impl ActivityRecord {
    /// 날짜가 비어 있으면 안내용 `EmptyDate`를 돌려준다.
    pub fn date_notice(&self) -> Option<DraftError> {
        self.date.is_empty().then_some(DraftError::EmptyDate)
    }

    /// 마침표로 끝나도록 정규화한 날짜. 빈 날짜는 `.`이 된다.
    pub fn normalized_date(&self) -> String {
        normalize_date(&self.date)
    }
}

impl From<ScheduleEntry> for ActivityRecord {
    fn from(entry: ScheduleEntry) -> Self {
        Self {
            date: entry.date,
            name: entry.name,
        }
    }
}

/// 활동 입력 출처. 카탈로그 항목은 검증 없이 그대로 쓴다.
#[derive(Debug, Clone)]
pub enum ActivitySource {
    Catalog(ScheduleEntry),
    Manual(String),
}

impl ActivitySource {
    pub fn resolve(&self) -> Result<ActivityRecord, DraftError> {
        match self {
            ActivitySource::Catalog(entry) => Ok(entry.clone().into()),
            ActivitySource::Manual(raw) => parse_activity(raw),
        }
    }
}

/// `2025.05.05. 체육대회` 형태의 자유 입력에서 날짜와 활동명을 분리한다.
/// 월/일 범위는 검사하지 않는다.
pub fn parse_activity(raw: &str) -> Result<ActivityRecord, DraftError> {
    let date = DATE_RE
        .find(raw)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default();

    let name = if date.is_empty() {
        raw.trim().to_string()
    } else {
        raw.replacen(&date, "", 1).trim().to_string()
    };

    if name.is_empty() {
        return Err(DraftError::EmptyName);
    }

    Ok(ActivityRecord { date, name })
}

/// 끝에 마침표가 정확히 하나 붙도록 맞춘다.
pub fn normalize_date(date: &str) -> String {
    if date.ends_with('.') {
        date.to_string()
    } else {
        format!("{date}.")
    }
}
