//! 학년-학기별 학사일정 카탈로그.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::domain::activity::ScheduleEntry;
use crate::domain::error::DraftError;

/// `"{grade}-{semester}"` 키로 정렬된 일정 목록을 보관한다.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct ScheduleCatalog {
    entries: BTreeMap<String, Vec<ScheduleEntry>>,
}

impl ScheduleCatalog {
    pub fn new(entries: BTreeMap<String, Vec<ScheduleEntry>>) -> Self {
        Self { entries }
    }

    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }

    pub fn key(grade: u8, semester: u8) -> String {
        format!("{grade}-{semester}")
    }

    /// 해당 학년/학기의 일정. 없으면 빈 목록.
    pub fn entries(&self, grade: u8, semester: u8) -> &[ScheduleEntry] {
        self.entries
            .get(&Self::key(grade, semester))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// 1부터 시작하는 번호로 일정을 고른다.
    pub fn pick(&self, grade: u8, semester: u8, number: usize) -> Result<ScheduleEntry, DraftError> {
        let list = self.entries(grade, semester);
        if list.is_empty() {
            return Err(DraftError::UnknownSchedule { grade, semester });
        }
        number
            .checked_sub(1)
            .and_then(|idx| list.get(idx))
            .cloned()
            .ok_or(DraftError::NoActivity)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}
