//! 문구 은행에서 슬롯별 조각을 무작위로 골라 한 문장을 조합한다.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::activity::ActivityRecord;
use crate::domain::error::DraftError;
use crate::domain::phrase::PhraseBank;

pub const TOPIC_CLOSING: &str = "교과 역량이 우수함.";
pub const BEHAVIOR_CLOSING: &str = "앞으로의 성장이 기대됨.";

/// 목록에서 균등하게 하나를 고르는 난수원.
pub trait RandomSource {
    /// `0..len` 범위의 인덱스. `len`은 항상 1 이상이다.
    fn pick_index(&mut self, len: usize) -> usize;
}

/// 스레드 로컬 난수원(기본값).
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn pick_index(&mut self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// 시드 고정 난수원. 같은 시드면 같은 결과를 낸다.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn pick_index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}

/// 세특 문장 입력.
#[derive(Debug, Clone, Copy)]
pub struct TopicInput<'a> {
    /// 학생별 주제(비어 있으면 공통 주제 사용)
    pub topic: &'a str,
    pub common_topic: &'a str,
    pub competencies: &'a [String],
    pub standard: Option<&'a str>,
    pub include_standard: bool,
}

/// 주입된 문구 은행으로 문장을 만든다. 학생 간 상태를 공유하지 않는다.
#[derive(Debug, Clone)]
pub struct SentenceComposer {
    bank: Arc<PhraseBank>,
}

impl SentenceComposer {
    pub fn new(bank: Arc<PhraseBank>) -> Self {
        Self { bank }
    }

    pub fn bank(&self) -> &PhraseBank {
        &self.bank
    }

    /// `{name}({date.}) {intro} {action} {feeling} {ending}`
    pub fn compose_activity(&self, activity: &ActivityRecord, rng: &mut dyn RandomSource) -> String {
        let slots = self.bank.activity();
        let intro = choose(&slots.intros, rng);
        let action = choose(&slots.actions, rng);
        let feeling = choose(&slots.feelings, rng);
        let ending = choose(&slots.endings, rng);

        format!(
            "{}({}) {intro} {action} {feeling} {ending}",
            activity.name,
            activity.normalized_date()
        )
    }

    pub fn compose_topic(
        &self,
        input: &TopicInput<'_>,
        rng: &mut dyn RandomSource,
    ) -> Result<String, DraftError> {
        let topic = [input.topic.trim(), input.common_topic.trim()]
            .into_iter()
            .find(|t| !t.is_empty())
            .ok_or(DraftError::NoTopic)?;
        if input.competencies.is_empty() {
            return Err(DraftError::NoCompetency);
        }

        let mut parts = Vec::with_capacity(input.competencies.len() + 3);
        if input.include_standard
            && let Some(standard) = input.standard.map(str::trim).filter(|s| !s.is_empty())
        {
            parts.push(format!("성취기준 '{standard}'와 관련하여"));
        }
        parts.push(format!("'{topic}'을(를) 주제로 학습하며"));
        for comp in input.competencies {
            // 은행에 없는 태그는 건너뛴다.
            if let Some(phrases) = self.bank.competency_phrases(comp) {
                parts.push(choose(phrases, rng).to_string());
            }
        }
        parts.push(TOPIC_CLOSING.to_string());

        Ok(parts.join(" "))
    }

    pub fn compose_behavior(
        &self,
        keywords: &[String],
        note: Option<&str>,
        rng: &mut dyn RandomSource,
    ) -> Result<String, DraftError> {
        let note = note.map(str::trim).filter(|n| !n.is_empty());
        if keywords.is_empty() && note.is_none() {
            return Err(DraftError::NoInput);
        }

        let mut parts: Vec<String> = keywords
            .iter()
            .filter_map(|k| self.bank.keyword_phrases(k))
            .map(|phrases| choose(phrases, &mut *rng).to_string())
            .collect();
        if let Some(note) = note {
            parts.push(format!("{note}하는 모습이 돋보임."));
        }
        if !parts.is_empty() {
            parts.push(BEHAVIOR_CLOSING.to_string());
        }

        Ok(parts.join(" "))
    }
}

fn choose<'a>(table: &'a [String], rng: &mut dyn RandomSource) -> &'a str {
    &table[rng.pick_index(table.len())]
}
