//! 문구 작성 도메인 오류 분류.
//!
//! 로컬 검증 오류는 상태를 바꾸지 않고 작업만 막는다.
//! 원격 오류는 행의 기존 문구를 보존한 채 보고된다.

use thiserror::Error;

use crate::domain::roster::StudentId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("활동 내용을 입력해주세요.")]
    EmptyName,
    /// 날짜는 선택 항목이라 안내용으로만 쓰인다.
    #[error("활동 날짜가 없어 날짜 없이 작성합니다.")]
    EmptyDate,
    #[error("활동을 선택해주세요.")]
    NoActivity,
    #[error("주제를 입력해주세요 (공통 주제 또는 개별 주제)")]
    NoTopic,
    #[error("역량을 하나 이상 선택해주세요")]
    NoCompetency,
    #[error("키워드를 선택하거나 특성을 입력하세요")]
    NoInput,
    #[error("이미지를 1장 이상 업로드해주세요.")]
    NoImages,
    #[error("알 수 없는 태그입니다: {0}")]
    UnknownTag(String),
    #[error("{0}번 학생이 없습니다.")]
    UnknownRow(StudentId),
    #[error("{0}번 학생은 AI 생성이 진행 중입니다.")]
    RowBusy(StudentId),
    #[error("{grade}학년 {semester}학기 학사일정이 없습니다.")]
    UnknownSchedule { grade: u8, semester: u8 },
    #[error("AI 생성 중 오류가 발생했습니다: {0}")]
    RemoteCallFailed(String),
    #[error("AI 기능을 사용할 수 없습니다: {0}")]
    EnricherUnavailable(String),
    #[error("문구 데이터가 올바르지 않습니다: {0}")]
    InvalidPhraseBank(String),
}
