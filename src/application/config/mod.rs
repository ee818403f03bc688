//! 애플리케이션이 사용하는 설정 스키마(순수 데이터).
//!
//! 주의: 파일/환경변수 접근은 `infrastructure`에서만 수행한다.

use serde::{Deserialize, Serialize};

use crate::domain::policy::PolishMode;
use crate::domain::roster::DEFAULT_ROSTER_SIZE;

pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// 전역 기본값
    #[serde(default)]
    pub defaults: DefaultsConfig,
    /// 원격 생성 provider 설정
    #[serde(default)]
    pub providers: ProvidersConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct DefaultsConfig {
    /// 학급 인원(행 수)
    pub roster_size: Option<usize>,
    /// AI 윤문 기본 방식(enrich/simplify)
    pub polish_mode: Option<String>,
    /// 문구 은행 JSON 경로(미지정 시 내장 데이터)
    pub phrase_bank_path: Option<String>,
    /// 학사일정 JSON 경로(미지정 시 내장 데이터)
    pub schedule_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ProvidersConfig {
    pub gemini: Option<ProviderConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ProviderConfig {
    /// provider 활성화 여부(기본 true)
    pub enabled: Option<bool>,
    /// 모델 식별자
    pub model: Option<String>,
    /// API 베이스 URL
    pub api_base: Option<String>,
    /// 인증 키(직접값)
    pub api_key: Option<String>,
    /// 인증 키를 읽을 환경변수 이름
    pub api_key_env: Option<String>,
    /// 요청 타임아웃(초)
    pub timeout_secs: Option<u64>,
}

impl Config {
    pub fn roster_size(&self) -> usize {
        self.defaults
            .roster_size
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_ROSTER_SIZE)
    }

    pub fn polish_mode(&self) -> PolishMode {
        PolishMode::from_config(self.defaults.polish_mode.as_deref())
    }

    /// gemini 설정. 파일에 없으면 환경변수 기본값을 쓰는 설정을 돌려준다.
    pub fn gemini(&self) -> ProviderConfig {
        self.providers.gemini.clone().unwrap_or_else(|| ProviderConfig {
            api_key_env: Some(DEFAULT_GEMINI_API_KEY_ENV.to_string()),
            ..ProviderConfig::default()
        })
    }

    /// 후순위(나중 파일) 값으로 덮어쓰는 병합 규칙.
    pub fn merge_from(&mut self, other: Config) {
        self.defaults.merge_from(other.defaults);
        self.providers.merge_from(other.providers);
    }
}

impl DefaultsConfig {
    pub(crate) fn merge_from(&mut self, other: DefaultsConfig) {
        if other.roster_size.is_some() {
            self.roster_size = other.roster_size;
        }
        if other.polish_mode.is_some() {
            self.polish_mode = other.polish_mode;
        }
        if other.phrase_bank_path.is_some() {
            self.phrase_bank_path = other.phrase_bank_path;
        }
        if other.schedule_path.is_some() {
            self.schedule_path = other.schedule_path;
        }
    }
}

impl ProvidersConfig {
    pub(crate) fn merge_from(&mut self, other: ProvidersConfig) {
        match (self.gemini.as_mut(), other.gemini) {
            (Some(existing), Some(next)) => existing.merge_from(next),
            (None, Some(next)) => self.gemini = Some(next),
            _ => {}
        }
    }
}

impl ProviderConfig {
    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }

    pub fn model(&self) -> String {
        self.model
            .clone()
            .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string())
    }

    pub fn api_base(&self) -> String {
        self.api_base
            .clone()
            .unwrap_or_else(|| DEFAULT_GEMINI_API_BASE.to_string())
    }

    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)
    }

    pub(crate) fn merge_from(&mut self, other: ProviderConfig) {
        if other.enabled.is_some() {
            self.enabled = other.enabled;
        }
        if other.model.is_some() {
            self.model = other.model;
        }
        if other.api_base.is_some() {
            self.api_base = other.api_base;
        }
        if other.api_key.is_some() {
            self.api_key = other.api_key;
        }
        if other.api_key_env.is_some() {
            self.api_key_env = other.api_key_env;
        }
        if other.timeout_secs.is_some() {
            self.timeout_secs = other.timeout_secs;
        }
    }
}
