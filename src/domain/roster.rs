//! 학생별 초안 목록과 행 단위 AI 보강 상태 머신.
//!
//! 각 행은 `Idle`에서만 `Enriching`으로 넘어가고, `Enriching`은 결과와 무관하게
//! 항상 `Idle`로 돌아온다. 행 사이에는 공유 상태가 없다.

use crate::domain::error::DraftError;
use crate::domain::phrase::{PhraseBank, Section};

pub type StudentId = u32;

pub const DEFAULT_ROSTER_SIZE: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowState {
    Idle,
    Enriching,
}

#[derive(Debug, Clone)]
pub struct StudentDraft {
    pub id: StudentId,
    /// 세특 개별 주제
    pub topic: String,
    /// 선택 순서를 유지하는 태그 집합
    pub selections: Vec<String>,
    pub custom_note: Option<String>,
    pub text: String,
    state: RowState,
    revision: u64,
}

impl StudentDraft {
    fn new(id: StudentId) -> Self {
        Self {
            id,
            topic: String::new(),
            selections: Vec::new(),
            custom_note: None,
            text: String::new(),
            state: RowState::Idle,
            revision: 0,
        }
    }

    pub fn state(&self) -> RowState {
        self.state
    }

    pub fn is_pending(&self) -> bool {
        self.state == RowState::Enriching
    }

    fn replace_text(&mut self, text: String) {
        self.text = text;
        self.revision += 1;
    }
}

/// 보강 요청 시점의 행 스냅샷.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichTicket {
    pub id: StudentId,
    pub text: String,
    revision: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnrichOutcome {
    Applied,
    /// 요청 이후 사용자가 행을 고쳐 응답을 버렸다.
    Stale,
    Failed(String),
}

/// 일괄 생성 결과 요약.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchFill {
    pub written: usize,
    /// AI 보강 중이라 건드리지 않은 행
    pub skipped: Vec<StudentId>,
}

#[derive(Debug, Clone)]
pub struct Roster {
    section: Section,
    rows: Vec<StudentDraft>,
}

impl Roster {
    /// 1..=size 번호의 빈 행을 만든다.
    pub fn new(section: Section, size: usize) -> Self {
        Self {
            section,
            rows: (1..=size as StudentId).map(StudentDraft::new).collect(),
        }
    }

    pub fn section(&self) -> Section {
        self.section
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[StudentDraft] {
        &self.rows
    }

    pub fn row(&self, id: StudentId) -> Result<&StudentDraft, DraftError> {
        self.rows
            .iter()
            .find(|r| r.id == id)
            .ok_or(DraftError::UnknownRow(id))
    }

    fn row_mut(&mut self, id: StudentId) -> Result<&mut StudentDraft, DraftError> {
        self.rows
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(DraftError::UnknownRow(id))
    }

    /// 태그를 토글한다. 선택되면 `true`, 해제되면 `false`.
    pub fn toggle_tag(
        &mut self,
        id: StudentId,
        tag: &str,
        bank: &PhraseBank,
    ) -> Result<bool, DraftError> {
        if !bank.has_tag(self.section, tag) {
            return Err(DraftError::UnknownTag(tag.to_string()));
        }
        let row = self.row_mut(id)?;
        if let Some(pos) = row.selections.iter().position(|t| t == tag) {
            row.selections.remove(pos);
            Ok(false)
        } else {
            row.selections.push(tag.to_string());
            Ok(true)
        }
    }

    pub fn set_topic(&mut self, id: StudentId, topic: &str) -> Result<(), DraftError> {
        self.row_mut(id)?.topic = topic.trim().to_string();
        Ok(())
    }

    pub fn set_note(&mut self, id: StudentId, note: &str) -> Result<(), DraftError> {
        let note = note.trim();
        self.row_mut(id)?.custom_note = (!note.is_empty()).then(|| note.to_string());
        Ok(())
    }

    /// 사용자의 직접 수정. 진행 중인 보강과 무관하게 항상 허용된다.
    pub fn edit_text(&mut self, id: StudentId, text: &str) -> Result<(), DraftError> {
        self.row_mut(id)?.replace_text(text.to_string());
        Ok(())
    }

    /// 보강 중이 아닌 모든 행을 `compose` 결과로 채운다.
    pub fn fill_idle_rows(&mut self, mut compose: impl FnMut(&StudentDraft) -> String) -> BatchFill {
        let mut fill = BatchFill::default();
        for row in &mut self.rows {
            if row.is_pending() {
                fill.skipped.push(row.id);
                continue;
            }
            let text = compose(row);
            row.replace_text(text);
            fill.written += 1;
        }
        fill
    }

    /// `Idle -> Enriching`. 문구가 비어 있으면 아무 것도 하지 않고 `None`.
    pub fn begin_enrichment(&mut self, id: StudentId) -> Result<Option<EnrichTicket>, DraftError> {
        let row = self.row_mut(id)?;
        if row.is_pending() {
            return Err(DraftError::RowBusy(id));
        }
        if row.text.trim().is_empty() {
            return Ok(None);
        }
        row.state = RowState::Enriching;
        Ok(Some(EnrichTicket {
            id,
            text: row.text.clone(),
            revision: row.revision,
        }))
    }

    /// `Enriching -> Idle`. 성공 응답은 요청 이후 수정이 없을 때만 반영한다.
    pub fn finish_enrichment(
        &mut self,
        ticket: &EnrichTicket,
        result: Result<String, String>,
    ) -> EnrichOutcome {
        let Ok(row) = self.row_mut(ticket.id) else {
            return EnrichOutcome::Failed(format!("row {} disappeared", ticket.id));
        };
        row.state = RowState::Idle;

        match result {
            Ok(_) if row.revision != ticket.revision => EnrichOutcome::Stale,
            Ok(text) => {
                row.replace_text(text);
                EnrichOutcome::Applied
            }
            Err(message) => EnrichOutcome::Failed(message),
        }
    }

    /// 결과 없이 보강을 끝낸다(취소/패닉 정리용).
    pub fn abandon_enrichment(&mut self, id: StudentId) {
        if let Ok(row) = self.row_mut(id) {
            row.state = RowState::Idle;
        }
    }

    pub fn pending_ids(&self) -> Vec<StudentId> {
        self.rows
            .iter()
            .filter(|r| r.is_pending())
            .map(|r| r.id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::compose::tests::sample_bank;

    fn filled(section: Section, size: usize) -> Roster {
        let mut roster = Roster::new(section, size);
        roster.fill_idle_rows(|row| format!("초안 {}", row.id));
        roster
    }

    #[test]
    fn new_roster_numbers_rows_from_one() {
        let roster = Roster::new(Section::Changche, 30);
        assert_eq!(roster.len(), 30);
        assert_eq!(roster.rows()[0].id, 1);
        assert_eq!(roster.rows()[29].id, 30);
        assert!(roster.rows().iter().all(|r| r.state() == RowState::Idle));
        assert_eq!(roster.row(31).unwrap_err(), DraftError::UnknownRow(31));
    }

    #[test]
    fn toggle_tag_is_an_ordered_set() {
        let bank = sample_bank();
        let mut roster = Roster::new(Section::Seteuk, 3);
        assert!(roster.toggle_tag(1, "협업", &bank).unwrap());
        assert!(roster.toggle_tag(1, "탐구력", &bank).unwrap());
        assert_eq!(roster.row(1).unwrap().selections, vec!["협업", "탐구력"]);
        assert!(!roster.toggle_tag(1, "협업", &bank).unwrap());
        assert_eq!(roster.row(1).unwrap().selections, vec!["탐구력"]);
        assert!(roster.row(2).unwrap().selections.is_empty());
    }

    #[test]
    fn toggle_rejects_tags_of_other_sections() {
        let bank = sample_bank();
        let mut roster = Roster::new(Section::Seteuk, 1);
        assert_eq!(
            roster.toggle_tag(1, "성실", &bank),
            Err(DraftError::UnknownTag("성실".to_string()))
        );
    }

    #[test]
    fn empty_text_does_not_start_enrichment() {
        let mut roster = Roster::new(Section::Haengbal, 2);
        assert_eq!(roster.begin_enrichment(1), Ok(None));
        assert_eq!(roster.row(1).unwrap().state(), RowState::Idle);
    }

    #[test]
    fn only_idle_rows_can_start_enrichment() {
        let mut roster = filled(Section::Changche, 2);
        let ticket = roster.begin_enrichment(1).unwrap().unwrap();
        assert_eq!(ticket.text, "초안 1");
        assert!(roster.row(1).unwrap().is_pending());
        assert_eq!(roster.begin_enrichment(1), Err(DraftError::RowBusy(1)));
        // 다른 행은 독립적이다.
        assert!(roster.begin_enrichment(2).unwrap().is_some());
        assert_eq!(roster.pending_ids(), vec![1, 2]);
    }

    #[test]
    fn success_replaces_text_and_returns_to_idle() {
        let mut roster = filled(Section::Changche, 1);
        let ticket = roster.begin_enrichment(1).unwrap().unwrap();
        let outcome = roster.finish_enrichment(&ticket, Ok("보강된 문장".to_string()));
        assert_eq!(outcome, EnrichOutcome::Applied);
        let row = roster.row(1).unwrap();
        assert_eq!(row.text, "보강된 문장");
        assert_eq!(row.state(), RowState::Idle);
    }

    #[test]
    fn failure_keeps_text_and_clears_pending() {
        let mut roster = filled(Section::Changche, 3);
        let ticket = roster.begin_enrichment(2).unwrap().unwrap();
        let outcome = roster.finish_enrichment(&ticket, Err("quota".to_string()));
        assert_eq!(outcome, EnrichOutcome::Failed("quota".to_string()));
        assert_eq!(roster.len(), 3);
        let row = roster.row(2).unwrap();
        assert_eq!(row.text, "초안 2");
        assert!(!row.is_pending());
    }

    #[test]
    fn manual_edit_during_enrichment_discards_response() {
        let mut roster = filled(Section::Seteuk, 1);
        let ticket = roster.begin_enrichment(1).unwrap().unwrap();
        roster.edit_text(1, "직접 고친 문장").unwrap();
        let outcome = roster.finish_enrichment(&ticket, Ok("늦은 응답".to_string()));
        assert_eq!(outcome, EnrichOutcome::Stale);
        let row = roster.row(1).unwrap();
        assert_eq!(row.text, "직접 고친 문장");
        assert!(!row.is_pending());
    }

    #[test]
    fn batch_fill_skips_rows_in_flight() {
        let mut roster = filled(Section::Changche, 3);
        let _ticket = roster.begin_enrichment(2).unwrap().unwrap();
        let fill = roster.fill_idle_rows(|_| "새 초안".to_string());
        assert_eq!(fill.written, 2);
        assert_eq!(fill.skipped, vec![2]);
        assert_eq!(roster.row(2).unwrap().text, "초안 2");
        assert_eq!(roster.row(3).unwrap().text, "새 초안");
    }

    #[test]
    fn abandon_clears_pending() {
        let mut roster = filled(Section::Changche, 1);
        roster.begin_enrichment(1).unwrap();
        roster.abandon_enrichment(1);
        assert_eq!(roster.row(1).unwrap().state(), RowState::Idle);
    }

    #[test]
    fn blank_note_is_cleared() {
        let mut roster = Roster::new(Section::Haengbal, 1);
        roster.set_note(1, " 솔선수범 ").unwrap();
        assert_eq!(roster.row(1).unwrap().custom_note.as_deref(), Some("솔선수범"));
        roster.set_note(1, "  ").unwrap();
        assert_eq!(roster.row(1).unwrap().custom_note, None);
    }
}
