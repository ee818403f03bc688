//! Domain layer
//! 문구 은행, 학사일정, 활동 파싱, 문장 조합, 학생별 초안 상태를 외부 의존성 없이 표현한다.

pub mod activity;
pub mod asset;
pub mod compose;
pub mod error;
pub mod phrase;
pub mod policy;
pub mod roster;
pub mod schedule;
