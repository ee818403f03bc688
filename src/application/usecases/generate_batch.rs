//! 창체 학급 전체 생성 유스케이스.

use std::sync::Mutex;

use anyhow::Result;
use tracing::{debug, info};

use crate::application::ports::Reporter;
use crate::application::usecases::lock_roster;
use crate::domain::activity::ActivitySource;
use crate::domain::compose::{RandomSource, SentenceComposer};
use crate::domain::error::DraftError;
use crate::domain::roster::{BatchFill, Roster};

/// 공통 활동 입력을 먼저 검증하고, 통과하면 모든 행을 독립적으로 채운다.
/// 입력이 잘못되면 어떤 행도 바뀌지 않는다.
pub struct GenerateBatchUseCase<'a> {
    pub composer: &'a SentenceComposer,
    pub reporter: &'a dyn Reporter,
}

impl<'a> GenerateBatchUseCase<'a> {
    pub fn execute(
        &self,
        roster: &Mutex<Roster>,
        source: Option<&ActivitySource>,
        rng: &mut dyn RandomSource,
    ) -> Result<BatchFill> {
        let activity = source.ok_or(DraftError::NoActivity)?.resolve()?;
        if let Some(notice) = activity.date_notice() {
            self.reporter.notice(&notice.to_string());
        }
        debug!(name = %activity.name, date = %activity.date, "activity resolved");

        let fill = lock_roster(roster)
            .fill_idle_rows(|_| self.composer.compose_activity(&activity, &mut *rng));

        info!(written = fill.written, skipped = fill.skipped.len(), "batch generated");
        self.reporter.status(
            "Generate",
            &format!("{}명 생성 완료 ({})", fill.written, activity.name),
        );
        if !fill.skipped.is_empty() {
            let ids: Vec<String> = fill.skipped.iter().map(u32::to_string).collect();
            self.reporter.status(
                "Generate",
                &format!("AI 생성 중이라 건너뜀: {}번", ids.join(", ")),
            );
        }
        Ok(fill)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::usecases::testing::{RecordingReporter, SilentReporter};
    use crate::domain::activity::ScheduleEntry;
    use crate::domain::compose::ThreadRandom;
    use crate::domain::compose::tests::sample_bank;
    use crate::domain::phrase::Section;

    #[test]
    fn whole_class_shares_activity_head() {
        let composer = SentenceComposer::new(sample_bank());
        let reporter = SilentReporter;
        let use_case = GenerateBatchUseCase {
            composer: &composer,
            reporter: &reporter,
        };
        let roster = Mutex::new(Roster::new(Section::Changche, 30));
        let source = ActivitySource::Manual("2025.05.05. 체육대회".to_string());

        let fill = use_case
            .execute(&roster, Some(&source), &mut ThreadRandom)
            .unwrap();
        assert_eq!(fill.written, 30);
        let guard = lock_roster(&roster);
        assert!(
            guard
                .rows()
                .iter()
                .all(|row| row.text.starts_with("체육대회(2025.05.05.) "))
        );
    }

    #[test]
    fn invalid_input_touches_no_row() {
        let composer = SentenceComposer::new(sample_bank());
        let reporter = SilentReporter;
        let use_case = GenerateBatchUseCase {
            composer: &composer,
            reporter: &reporter,
        };
        let mut roster = Roster::new(Section::Changche, 3);
        roster.edit_text(2, "기존 문장").unwrap();
        let roster = Mutex::new(roster);

        let err = use_case
            .execute(&roster, None, &mut ThreadRandom)
            .unwrap_err();
        assert_eq!(err.downcast_ref::<DraftError>(), Some(&DraftError::NoActivity));

        let only_date = ActivitySource::Manual("2025.05.09.".to_string());
        let err = use_case
            .execute(&roster, Some(&only_date), &mut ThreadRandom)
            .unwrap_err();
        assert_eq!(err.downcast_ref::<DraftError>(), Some(&DraftError::EmptyName));

        let guard = lock_roster(&roster);
        assert_eq!(guard.row(1).unwrap().text, "");
        assert_eq!(guard.row(2).unwrap().text, "기존 문장");
    }

    #[test]
    fn missing_date_is_noticed_but_generated() {
        let composer = SentenceComposer::new(sample_bank());
        let reporter = RecordingReporter::default();
        let use_case = GenerateBatchUseCase {
            composer: &composer,
            reporter: &reporter,
        };
        let roster = Mutex::new(Roster::new(Section::Changche, 2));
        let source = ActivitySource::Manual("학급 회의".to_string());

        use_case
            .execute(&roster, Some(&source), &mut ThreadRandom)
            .unwrap();
        assert!(
            reporter
                .lines()
                .contains(&format!("notice:{}", DraftError::EmptyDate))
        );
        assert!(lock_roster(&roster).row(1).unwrap().text.starts_with("학급 회의(.) "));
    }

    #[test]
    fn enriching_rows_are_skipped() {
        let composer = SentenceComposer::new(sample_bank());
        let reporter = SilentReporter;
        let use_case = GenerateBatchUseCase {
            composer: &composer,
            reporter: &reporter,
        };
        let mut roster = Roster::new(Section::Changche, 3);
        roster.edit_text(2, "보강 중").unwrap();
        roster.begin_enrichment(2).unwrap();
        let roster = Mutex::new(roster);
        let source = ActivitySource::Catalog(ScheduleEntry {
            date: "2025.03.04.".to_string(),
            name: "입학식".to_string(),
        });

        let fill = use_case
            .execute(&roster, Some(&source), &mut ThreadRandom)
            .unwrap();
        assert_eq!(fill.written, 2);
        assert_eq!(fill.skipped, vec![2]);
        assert_eq!(lock_roster(&roster).row(2).unwrap().text, "보강 중");
    }
}
