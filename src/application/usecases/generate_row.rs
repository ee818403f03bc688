//! 세특/행발 학생별 생성 유스케이스.

use std::sync::Mutex;

use anyhow::Result;
use tracing::debug;

use crate::application::ports::Reporter;
use crate::application::usecases::lock_roster;
use crate::domain::compose::{RandomSource, SentenceComposer, TopicInput};
use crate::domain::error::DraftError;
use crate::domain::phrase::Section;
use crate::domain::roster::{Roster, StudentDraft, StudentId};

/// 세특 공통 입력.
#[derive(Debug, Clone, Default)]
pub struct TopicSettings {
    pub common_topic: String,
    pub standard: String,
    pub include_standard: bool,
}

/// 행 단위로 검증하고 문장을 채운다. 한 행의 실패는 다른 행에 영향을 주지 않는다.
pub struct GenerateRowUseCase<'a> {
    pub composer: &'a SentenceComposer,
    pub reporter: &'a dyn Reporter,
}

/// 여러 행 생성 결과. 행별 결과와 보강 중이라 건너뛴 행을 구분한다.
#[derive(Debug, Default)]
pub struct RowFill {
    pub results: Vec<(StudentId, Result<(), DraftError>)>,
    pub skipped: Vec<StudentId>,
}

impl<'a> GenerateRowUseCase<'a> {
    /// AI 보강 중인 행은 `RowBusy`로 거절한다.
    pub fn execute(
        &self,
        roster: &Mutex<Roster>,
        id: StudentId,
        settings: &TopicSettings,
        rng: &mut dyn RandomSource,
    ) -> Result<String> {
        let mut guard = lock_roster(roster);
        let text = self.fill_row(&mut guard, id, settings, rng)?;
        debug!(id, section = guard.section().code(), "row generated");
        Ok(text)
    }

    /// 지정한 행들을 차례로 생성한다. 한 행이 실패해도 나머지는 계속한다.
    pub fn execute_rows(
        &self,
        roster: &Mutex<Roster>,
        ids: &[StudentId],
        settings: &TopicSettings,
        rng: &mut dyn RandomSource,
    ) -> Vec<(StudentId, Result<String, DraftError>)> {
        let mut guard = lock_roster(roster);
        ids.iter()
            .map(|&id| (id, self.fill_row(&mut guard, id, settings, &mut *rng)))
            .collect()
    }

    /// 보강 중이 아닌 모든 행을 시도하고 행별 결과를 돌려준다.
    pub fn execute_all(
        &self,
        roster: &Mutex<Roster>,
        settings: &TopicSettings,
        rng: &mut dyn RandomSource,
    ) -> RowFill {
        let mut guard = lock_roster(roster);
        let mut fill = RowFill::default();
        let rows: Vec<(StudentId, bool)> =
            guard.rows().iter().map(|r| (r.id, r.is_pending())).collect();

        for (id, pending) in rows {
            if pending {
                fill.skipped.push(id);
                continue;
            }
            let outcome = self.fill_row(&mut guard, id, settings, &mut *rng).map(|_| ());
            fill.results.push((id, outcome));
        }

        let ok = fill.results.iter().filter(|(_, r)| r.is_ok()).count();
        self.reporter.status(
            "Generate",
            &format!("{ok}/{}명 생성 완료", fill.results.len()),
        );
        if !fill.skipped.is_empty() {
            let ids: Vec<String> = fill.skipped.iter().map(u32::to_string).collect();
            self.reporter.status(
                "Generate",
                &format!("AI 생성 중이라 건너뜀: {}번", ids.join(", ")),
            );
        }
        fill
    }

    fn fill_row(
        &self,
        roster: &mut Roster,
        id: StudentId,
        settings: &TopicSettings,
        rng: &mut dyn RandomSource,
    ) -> Result<String, DraftError> {
        let row = roster.row(id)?;
        if row.is_pending() {
            return Err(DraftError::RowBusy(id));
        }
        let text = self.compose(roster.section(), row, settings, rng)?;
        roster.edit_text(id, &text)?;
        Ok(text)
    }

    fn compose(
        &self,
        section: Section,
        row: &StudentDraft,
        settings: &TopicSettings,
        rng: &mut dyn RandomSource,
    ) -> Result<String, DraftError> {
        match section {
            Section::Seteuk => {
                let input = TopicInput {
                    topic: &row.topic,
                    common_topic: &settings.common_topic,
                    competencies: &row.selections,
                    standard: Some(settings.standard.as_str()),
                    include_standard: settings.include_standard,
                };
                self.composer.compose_topic(&input, rng)
            }
            Section::Haengbal => {
                self.composer
                    .compose_behavior(&row.selections, row.custom_note.as_deref(), rng)
            }
            // 창체는 학급 공통 활동으로만 생성한다.
            Section::Changche => Err(DraftError::NoActivity),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::usecases::testing::SilentReporter;
    use crate::domain::compose::ThreadRandom;
    use crate::domain::compose::tests::sample_bank;
    use crate::domain::roster::EnrichOutcome;

    #[test]
    fn failing_rows_are_isolated() {
        let bank = sample_bank();
        let composer = SentenceComposer::new(bank.clone());
        let reporter = SilentReporter;
        let use_case = GenerateRowUseCase {
            composer: &composer,
            reporter: &reporter,
        };

        let mut roster = Roster::new(Section::Haengbal, 3);
        roster.toggle_tag(1, "성실", &bank).unwrap();
        roster.set_note(3, "청소 시간에 솔선수범").unwrap();
        roster.edit_text(2, "기존 문장").unwrap();
        let roster = Mutex::new(roster);

        let fill = use_case.execute_all(&roster, &TopicSettings::default(), &mut ThreadRandom);
        let results = fill.results;
        assert!(results[0].1.is_ok());
        assert_eq!(results[1].1, Err(DraftError::NoInput));
        assert!(results[2].1.is_ok());

        let guard = lock_roster(&roster);
        assert!(guard.row(1).unwrap().text.ends_with("앞으로의 성장이 기대됨."));
        assert_eq!(guard.row(2).unwrap().text, "기존 문장");
        assert!(guard.row(3).unwrap().text.contains("솔선수범하는 모습이 돋보임."));
    }

    #[test]
    fn seteuk_row_uses_common_topic() {
        let bank = sample_bank();
        let composer = SentenceComposer::new(bank.clone());
        let reporter = SilentReporter;
        let use_case = GenerateRowUseCase {
            composer: &composer,
            reporter: &reporter,
        };
        let mut roster = Roster::new(Section::Seteuk, 2);
        roster.toggle_tag(2, "협업", &bank).unwrap();
        let roster = Mutex::new(roster);
        let settings = TopicSettings {
            common_topic: "미적분의 실생활 활용".to_string(),
            ..TopicSettings::default()
        };

        let err = use_case
            .execute(&roster, 1, &settings, &mut ThreadRandom)
            .unwrap_err();
        assert_eq!(err.downcast_ref::<DraftError>(), Some(&DraftError::NoCompetency));

        let text = use_case
            .execute(&roster, 2, &settings, &mut ThreadRandom)
            .unwrap();
        assert_eq!(
            text,
            "'미적분의 실생활 활용'을(를) 주제로 학습하며 친구와 협력함. 교과 역량이 우수함."
        );
    }

    #[test]
    fn rows_mid_enrichment_are_left_alone() {
        let bank = sample_bank();
        let composer = SentenceComposer::new(bank.clone());
        let reporter = SilentReporter;
        let use_case = GenerateRowUseCase {
            composer: &composer,
            reporter: &reporter,
        };
        let mut roster = Roster::new(Section::Haengbal, 2);
        for id in 1..=2 {
            roster.toggle_tag(id, "성실", &bank).unwrap();
        }
        roster.edit_text(1, "보강 대기 문장").unwrap();
        let ticket = roster.begin_enrichment(1).unwrap().unwrap();
        let roster = Mutex::new(roster);

        let fill = use_case.execute_all(&roster, &TopicSettings::default(), &mut ThreadRandom);
        assert_eq!(fill.skipped, vec![1]);
        assert_eq!(fill.results.len(), 1);
        assert_eq!(fill.results[0].0, 2);

        let err = use_case
            .execute(&roster, 1, &TopicSettings::default(), &mut ThreadRandom)
            .unwrap_err();
        assert_eq!(err.downcast_ref::<DraftError>(), Some(&DraftError::RowBusy(1)));

        let mut guard = lock_roster(&roster);
        assert_eq!(guard.row(1).unwrap().text, "보강 대기 문장");
        let outcome = guard.finish_enrichment(&ticket, Ok("다듬은 문장".to_string()));
        assert_eq!(outcome, EnrichOutcome::Applied);
        assert_eq!(guard.row(1).unwrap().text, "다듬은 문장");
    }

    #[test]
    fn listed_rows_fail_independently() {
        let bank = sample_bank();
        let composer = SentenceComposer::new(bank.clone());
        let reporter = SilentReporter;
        let use_case = GenerateRowUseCase {
            composer: &composer,
            reporter: &reporter,
        };
        let mut roster = Roster::new(Section::Seteuk, 5);
        roster.toggle_tag(5, "탐구력", &bank).unwrap();
        let roster = Mutex::new(roster);
        let settings = TopicSettings {
            common_topic: "산화 환원 반응".to_string(),
            ..TopicSettings::default()
        };

        let results = use_case.execute_rows(&roster, &[2, 9, 5], &settings, &mut ThreadRandom);
        assert_eq!(results[0], (2, Err(DraftError::NoCompetency)));
        assert_eq!(results[1], (9, Err(DraftError::UnknownRow(9))));
        assert_eq!(results[2].0, 5);
        assert!(results[2].1.is_ok());
        assert!(!lock_roster(&roster).row(5).unwrap().text.is_empty());
    }
}
