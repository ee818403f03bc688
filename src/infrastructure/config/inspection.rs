//! 적용 설정 진단(inspection) 뷰 모델.

use serde::Serialize;

use super::loader::LoadedConfig;
use super::resolve::resolve_provider_api_key;
use crate::application::config::{DefaultsConfig, ProviderConfig};

#[derive(Debug, Clone, Serialize)]
pub struct ConfigInspection {
    pub searched_paths: Vec<String>,
    pub loaded_paths: Vec<String>,
    pub defaults: DefaultsConfig,
    pub effective_defaults: EffectiveDefaults,
    pub gemini: ProviderInspection,
}

#[derive(Debug, Clone, Serialize)]
pub struct EffectiveDefaults {
    pub roster_size: usize,
    pub polish_mode: String,
    pub phrase_bank: String,
    pub schedule: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProviderInspection {
    pub enabled: bool,
    pub runnable: bool,
    pub model: String,
    pub api_base: String,
    pub timeout_secs: u64,
    pub api_key_source: Option<String>,
    pub api_key_resolved: bool,
}

impl ConfigInspection {
    pub fn from_loaded(loaded: LoadedConfig) -> Self {
        let config = &loaded.config;
        Self {
            searched_paths: loaded
                .searched_paths
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            loaded_paths: loaded
                .loaded_paths
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            defaults: config.defaults.clone(),
            effective_defaults: EffectiveDefaults {
                roster_size: config.roster_size(),
                polish_mode: config.polish_mode().code().to_string(),
                phrase_bank: data_source_label(config.defaults.phrase_bank_path.as_deref()),
                schedule: data_source_label(config.defaults.schedule_path.as_deref()),
            },
            gemini: ProviderInspection::from_config(&config.gemini()),
        }
    }
}

impl ProviderInspection {
    fn from_config(cfg: &ProviderConfig) -> Self {
        let enabled = cfg.is_enabled();
        let resolution = resolve_provider_api_key(cfg);
        let api_key_resolved = resolution.credential.is_some();

        Self {
            enabled,
            runnable: enabled && api_key_resolved,
            model: cfg.model(),
            api_base: cfg.api_base(),
            timeout_secs: cfg.timeout_secs(),
            api_key_source: resolution.source,
            api_key_resolved,
        }
    }
}

fn data_source_label(path: Option<&str>) -> String {
    match path {
        Some(path) => format!("file:{path}"),
        None => "builtin".to_string(),
    }
}
