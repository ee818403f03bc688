//! 정적 데이터 테이블 포트 구현 어댑터.

use std::sync::Arc;

use anyhow::Result;

use crate::application::config::Config;
use crate::application::ports::CatalogRepository;
use crate::domain::phrase::PhraseBank;
use crate::domain::schedule::ScheduleCatalog;
use crate::infrastructure::catalog;

pub struct DataCatalogRepository;

impl CatalogRepository for DataCatalogRepository {
    fn phrase_bank(&self, config: &Config) -> Result<Arc<PhraseBank>> {
        catalog::load_phrase_bank(config.defaults.phrase_bank_path.as_deref()).map(Arc::new)
    }

    fn schedule(&self, config: &Config) -> Result<Arc<ScheduleCatalog>> {
        catalog::load_schedule(config.defaults.schedule_path.as_deref()).map(Arc::new)
    }
}
