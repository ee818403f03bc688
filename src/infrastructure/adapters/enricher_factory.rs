//! Enricher 팩토리 포트 구현 어댑터.

use std::sync::Arc;

use anyhow::Result;

use crate::application::config::Config;
use crate::application::ports::{Enricher, EnricherFactory};
use crate::infrastructure::providers::GeminiEnricher;

pub struct GeminiEnricherFactory;

impl EnricherFactory for GeminiEnricherFactory {
    fn build(&self, config: &Config) -> Result<Arc<dyn Enricher>> {
        let enricher = GeminiEnricher::from_config(&config.gemini())?;
        Ok(Arc::new(enricher))
    }
}
