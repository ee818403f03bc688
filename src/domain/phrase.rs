//! 문구 은행(슬롯/태그별 후보 문장)과 작성 영역 구분.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::error::DraftError;

/// 생기부 작성 영역.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    /// 창의적 체험활동
    Changche,
    /// 교과 세부능력 및 특기사항
    Seteuk,
    /// 행동특성 및 종합의견
    Haengbal,
}

impl Section {
    pub const ALL: [Section; 3] = [Section::Changche, Section::Seteuk, Section::Haengbal];

    /// 입력 문자열(코드/한글명)을 영역으로 변환한다.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "changche" | "cc" | "창체" => Some(Self::Changche),
            "seteuk" | "st" | "세특" => Some(Self::Seteuk),
            "haengbal" | "hb" | "행발" => Some(Self::Haengbal),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::Changche => "changche",
            Self::Seteuk => "seteuk",
            Self::Haengbal => "haengbal",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Changche => "창체",
            Self::Seteuk => "세특",
            Self::Haengbal => "행발",
        }
    }
}

/// 창체 문장의 네 슬롯.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ActivitySlots {
    pub intros: Vec<String>,
    pub actions: Vec<String>,
    pub feelings: Vec<String>,
    pub endings: Vec<String>,
}

/// 읽기 전용 문구 은행. 생성 시 모든 슬롯과 태그 목록이 비어 있지 않음을 보장한다.
#[derive(Debug, Clone, Serialize)]
pub struct PhraseBank {
    activity: ActivitySlots,
    competencies: BTreeMap<String, Vec<String>>,
    keywords: BTreeMap<String, Vec<String>>,
}

#[derive(Deserialize)]
struct RawPhraseBank {
    activity: ActivitySlots,
    #[serde(default)]
    competencies: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    keywords: BTreeMap<String, Vec<String>>,
}

impl PhraseBank {
    pub fn new(
        activity: ActivitySlots,
        competencies: BTreeMap<String, Vec<String>>,
        keywords: BTreeMap<String, Vec<String>>,
    ) -> Result<Self, DraftError> {
        let slots = [
            ("intros", &activity.intros),
            ("actions", &activity.actions),
            ("feelings", &activity.feelings),
            ("endings", &activity.endings),
        ];
        for (slot, table) in slots {
            if table.is_empty() {
                return Err(DraftError::InvalidPhraseBank(format!(
                    "activity.{slot} is empty"
                )));
            }
        }
        for (group, tags) in [("competencies", &competencies), ("keywords", &keywords)] {
            if let Some((tag, _)) = tags.iter().find(|(_, phrases)| phrases.is_empty()) {
                return Err(DraftError::InvalidPhraseBank(format!(
                    "{group}.{tag} has no phrases"
                )));
            }
        }

        Ok(Self {
            activity,
            competencies,
            keywords,
        })
    }

    /// JSON 문자열에서 문구 은행을 읽는다.
    pub fn from_json(raw: &str) -> Result<Self, DraftError> {
        let parsed: RawPhraseBank = serde_json::from_str(raw)
            .map_err(|err| DraftError::InvalidPhraseBank(err.to_string()))?;
        Self::new(parsed.activity, parsed.competencies, parsed.keywords)
    }

    pub fn activity(&self) -> &ActivitySlots {
        &self.activity
    }

    pub fn competency_phrases(&self, tag: &str) -> Option<&[String]> {
        self.competencies.get(tag).map(Vec::as_slice)
    }

    pub fn keyword_phrases(&self, tag: &str) -> Option<&[String]> {
        self.keywords.get(tag).map(Vec::as_slice)
    }

    pub fn competency_tags(&self) -> impl Iterator<Item = &str> {
        self.competencies.keys().map(String::as_str)
    }

    pub fn keyword_tags(&self) -> impl Iterator<Item = &str> {
        self.keywords.keys().map(String::as_str)
    }

    /// 해당 영역에서 선택 가능한 태그인지 확인한다.
    pub fn has_tag(&self, section: Section, tag: &str) -> bool {
        match section {
            Section::Changche => false,
            Section::Seteuk => self.competencies.contains_key(tag),
            Section::Haengbal => self.keywords.contains_key(tag),
        }
    }
}
