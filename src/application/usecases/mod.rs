//! 유스케이스 모음.

pub mod copy_text;
pub mod enrich_row;
pub mod generate_batch;
pub mod generate_row;
pub mod inspect_config;
pub mod polish_text;
pub mod synthesize_images;

#[cfg(test)]
pub(crate) mod testing;

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::domain::roster::Roster;

/// 행 상태는 단순 대입만 하므로 poison 이후에도 그대로 이어서 쓴다.
pub(crate) fn lock_roster(roster: &Mutex<Roster>) -> MutexGuard<'_, Roster> {
    roster.lock().unwrap_or_else(PoisonError::into_inner)
}
