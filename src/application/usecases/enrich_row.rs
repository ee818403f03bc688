//! 행 단위 AI 보강 유스케이스.

use std::collections::BTreeSet;
use std::sync::Mutex;
use std::time::Instant;

use anyhow::Result;
use futures::stream::{FuturesUnordered, StreamExt};
use tracing::{info, warn};

use crate::application::ports::{Enricher, Reporter};
use crate::application::usecases::lock_roster;
use crate::domain::error::DraftError;
use crate::domain::policy::PolishMode;
use crate::domain::roster::{EnrichOutcome, Roster, StudentId};

/// 원격 호출 동안 행을 `Enriching`으로 두고, 어떤 경로로 끝나든 `Idle`로 되돌린다.
pub struct EnrichRowUseCase<'a> {
    pub enricher: &'a dyn Enricher,
    pub reporter: &'a dyn Reporter,
}

impl<'a> EnrichRowUseCase<'a> {
    /// 문구가 비어 있으면 원격 호출 없이 `None`.
    pub async fn execute(
        &self,
        roster: &Mutex<Roster>,
        id: StudentId,
        mode: PolishMode,
    ) -> Result<Option<EnrichOutcome>> {
        let Some(ticket) = lock_roster(roster).begin_enrichment(id)? else {
            self.reporter
                .row_status(id, "skipped", Some("문구가 비어 있음"));
            return Ok(None);
        };
        let guard = PendingGuard::new(roster, id);

        self.reporter.row_status(id, "running", None);
        let started = Instant::now();
        let result = self
            .enricher
            .polish(&ticket.text, mode)
            .await
            .map_err(|err| format!("{err:#}"));
        let elapsed = format!("{:.1}s", started.elapsed().as_secs_f32());

        let outcome = lock_roster(roster).finish_enrichment(&ticket, result);
        guard.disarm();

        match &outcome {
            EnrichOutcome::Applied => {
                info!(id, mode = mode.code(), "row enriched");
                self.reporter.row_status(id, "done", Some(&elapsed));
            }
            EnrichOutcome::Stale => {
                info!(id, "row edited during enrichment; response discarded");
                self.reporter
                    .row_status(id, "stale", Some("수정된 문구를 유지합니다"));
            }
            EnrichOutcome::Failed(message) => {
                warn!(id, error = %message, "enrichment failed");
                self.reporter.row_status(id, "error", Some(&elapsed));
                self.reporter
                    .notice(&DraftError::RemoteCallFailed(message.clone()).to_string());
            }
        }
        Ok(Some(outcome))
    }

    /// 여러 행을 동시에 보강한다. 완료 순서는 보장하지 않는다.
    pub async fn execute_many(
        &self,
        roster: &Mutex<Roster>,
        ids: &[StudentId],
        mode: PolishMode,
    ) -> Vec<(StudentId, Result<Option<EnrichOutcome>>)> {
        let unique: BTreeSet<StudentId> = ids.iter().copied().collect();
        let mut in_flight: FuturesUnordered<_> = unique
            .into_iter()
            .map(|id| async move { (id, self.execute(roster, id, mode).await) })
            .collect();

        let mut results = Vec::new();
        while let Some(result) = in_flight.next().await {
            results.push(result);
        }
        results
    }
}

/// 취소/패닉으로 future가 중간에 버려져도 `pending`이 남지 않게 한다.
struct PendingGuard<'r> {
    roster: &'r Mutex<Roster>,
    id: StudentId,
    armed: bool,
}

impl<'r> PendingGuard<'r> {
    fn new(roster: &'r Mutex<Roster>, id: StudentId) -> Self {
        Self {
            roster,
            id,
            armed: true,
        }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            lock_roster(self.roster).abandon_enrichment(self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::usecases::testing::{RecordingReporter, ScriptedEnricher};
    use crate::domain::phrase::Section;
    use crate::domain::roster::RowState;

    fn roster_with(texts: &[(StudentId, &str)]) -> Mutex<Roster> {
        let mut roster = Roster::new(Section::Changche, 5);
        for (id, text) in texts {
            roster.edit_text(*id, text).unwrap();
        }
        Mutex::new(roster)
    }

    #[tokio::test]
    async fn empty_row_never_calls_remote() {
        let enricher = ScriptedEnricher::echo();
        let reporter = RecordingReporter::default();
        let use_case = EnrichRowUseCase {
            enricher: &enricher,
            reporter: &reporter,
        };
        let roster = roster_with(&[]);

        let outcome = use_case.execute(&roster, 1, PolishMode::Enrich).await.unwrap();
        assert_eq!(outcome, None);
        assert_eq!(enricher.calls(), 0);
        assert_eq!(lock_roster(&roster).row(1).unwrap().state(), RowState::Idle);
    }

    #[tokio::test]
    async fn success_replaces_text() {
        let enricher = ScriptedEnricher::echo();
        let reporter = RecordingReporter::default();
        let use_case = EnrichRowUseCase {
            enricher: &enricher,
            reporter: &reporter,
        };
        let roster = roster_with(&[(2, "성실함.")]);

        let outcome = use_case.execute(&roster, 2, PolishMode::Simplify).await.unwrap();
        assert_eq!(outcome, Some(EnrichOutcome::Applied));
        let guard = lock_roster(&roster);
        assert_eq!(guard.row(2).unwrap().text, "성실함. [simplify]");
        assert!(!guard.row(2).unwrap().is_pending());
    }

    #[tokio::test]
    async fn failure_keeps_text_and_clears_pending() {
        let enricher = ScriptedEnricher::failing("quota exceeded");
        let reporter = RecordingReporter::default();
        let use_case = EnrichRowUseCase {
            enricher: &enricher,
            reporter: &reporter,
        };
        let roster = roster_with(&[(3, "원래 문장")]);

        let outcome = use_case.execute(&roster, 3, PolishMode::Enrich).await.unwrap();
        assert!(matches!(outcome, Some(EnrichOutcome::Failed(_))));
        let guard = lock_roster(&roster);
        assert_eq!(guard.row(3).unwrap().text, "원래 문장");
        assert_eq!(guard.row(3).unwrap().state(), RowState::Idle);
        assert!(
            reporter
                .lines()
                .iter()
                .any(|line| line.starts_with("notice:") && line.contains("quota exceeded"))
        );
    }

    #[tokio::test]
    async fn edit_during_request_wins() {
        let (enricher, release) = ScriptedEnricher::gated();
        let reporter = RecordingReporter::default();
        let use_case = EnrichRowUseCase {
            enricher: &enricher,
            reporter: &reporter,
        };
        let roster = roster_with(&[(1, "초안")]);

        let (outcome, ()) = futures::join!(
            use_case.execute(&roster, 1, PolishMode::Enrich),
            async {
                lock_roster(&roster).edit_text(1, "직접 고친 문장").unwrap();
                release.send(()).unwrap();
            }
        );
        assert_eq!(outcome.unwrap(), Some(EnrichOutcome::Stale));
        let guard = lock_roster(&roster);
        assert_eq!(guard.row(1).unwrap().text, "직접 고친 문장");
        assert!(!guard.row(1).unwrap().is_pending());
    }

    #[tokio::test]
    async fn second_request_on_busy_row_is_rejected() {
        let (enricher, release) = ScriptedEnricher::gated();
        let reporter = RecordingReporter::default();
        let use_case = EnrichRowUseCase {
            enricher: &enricher,
            reporter: &reporter,
        };
        let roster = roster_with(&[(4, "초안")]);

        let (first, second) = futures::join!(
            use_case.execute(&roster, 4, PolishMode::Enrich),
            async {
                let second = use_case.execute(&roster, 4, PolishMode::Enrich).await;
                release.send(()).unwrap();
                second
            }
        );
        assert_eq!(first.unwrap(), Some(EnrichOutcome::Applied));
        let err = second.unwrap_err();
        assert_eq!(err.downcast_ref::<DraftError>(), Some(&DraftError::RowBusy(4)));
        assert_eq!(enricher.calls(), 1);
    }

    #[tokio::test]
    async fn dropped_request_releases_row() {
        let (enricher, _release) = ScriptedEnricher::gated();
        let reporter = RecordingReporter::default();
        let use_case = EnrichRowUseCase {
            enricher: &enricher,
            reporter: &reporter,
        };
        let roster = roster_with(&[(5, "초안")]);

        {
            let mut request = Box::pin(use_case.execute(&roster, 5, PolishMode::Enrich));
            assert!(futures::poll!(request.as_mut()).is_pending());
            assert!(lock_roster(&roster).row(5).unwrap().is_pending());
        }
        let guard = lock_roster(&roster);
        assert_eq!(guard.row(5).unwrap().state(), RowState::Idle);
        assert_eq!(guard.row(5).unwrap().text, "초안");
    }

    #[tokio::test]
    async fn many_rows_are_enriched_once_each() {
        let enricher = ScriptedEnricher::echo();
        let reporter = RecordingReporter::default();
        let use_case = EnrichRowUseCase {
            enricher: &enricher,
            reporter: &reporter,
        };
        let roster = roster_with(&[(1, "가"), (2, "나"), (3, "")]);

        let results = use_case
            .execute_many(&roster, &[2, 1, 2, 3], PolishMode::Enrich)
            .await;
        assert_eq!(results.len(), 3);
        assert_eq!(enricher.calls(), 2);
        let guard = lock_roster(&roster);
        assert_eq!(guard.row(1).unwrap().text, "가 [enrich]");
        assert_eq!(guard.row(2).unwrap().text, "나 [enrich]");
        assert!(guard.pending_ids().is_empty());
    }
}
