//! 애플리케이션 조립(composition root) 모듈.

use std::sync::Arc;

use anyhow::Result;

use crate::application::config::Config;
use crate::application::ports::{
    CatalogRepository, ConfigRepository, Enricher, EnricherFactory, Reporter,
};
use crate::application::usecases::copy_text::CopyTextUseCase;
use crate::application::usecases::enrich_row::EnrichRowUseCase;
use crate::application::usecases::generate_batch::GenerateBatchUseCase;
use crate::application::usecases::generate_row::GenerateRowUseCase;
use crate::application::usecases::inspect_config::InspectConfigUseCase;
use crate::application::usecases::polish_text::PolishTextUseCase;
use crate::application::usecases::synthesize_images::SynthesizeImagesUseCase;
use crate::domain::compose::{RandomSource, SeededRandom, SentenceComposer, ThreadRandom};
use crate::domain::schedule::ScheduleCatalog;
use crate::infrastructure::adapters::{
    ConsoleReporter, DataCatalogRepository, FileImageLoader, GeminiEnricherFactory,
    JsonConfigRepository, Osc52Clipboard,
};

/// 설정과 정적 데이터를 읽어 만든 실행 환경.
pub struct Workspace {
    pub config: Config,
    pub composer: SentenceComposer,
    pub schedule: Arc<ScheduleCatalog>,
}

/// 실행 시점 의존성을 한 곳에서 조립하는 컨테이너.
pub struct AppComposition {
    config_repo: JsonConfigRepository,
    catalog_repo: DataCatalogRepository,
    enricher_factory: GeminiEnricherFactory,
    image_loader: FileImageLoader,
    clipboard: Osc52Clipboard,
    reporter: ConsoleReporter,
}

impl Default for AppComposition {
    fn default() -> Self {
        Self::new()
    }
}

impl AppComposition {
    pub fn new() -> Self {
        Self {
            config_repo: JsonConfigRepository,
            catalog_repo: DataCatalogRepository,
            enricher_factory: GeminiEnricherFactory,
            image_loader: FileImageLoader,
            clipboard: Osc52Clipboard,
            reporter: ConsoleReporter::new(),
        }
    }

    pub fn reporter(&self) -> &dyn Reporter {
        &self.reporter
    }

    /// 설정을 병합하고 문구 은행/학사일정을 적재한다.
    pub fn load_workspace(&self) -> Result<Workspace> {
        let config = self.config_repo.load()?;
        let bank = self.catalog_repo.phrase_bank(&config)?;
        let schedule = self.catalog_repo.schedule(&config)?;
        Ok(Workspace {
            config,
            composer: SentenceComposer::new(bank),
            schedule,
        })
    }

    /// 원격 보강기를 만든다. key가 없거나 비활성화면 에러.
    pub fn enricher(&self, config: &Config) -> Result<Arc<dyn Enricher>> {
        self.enricher_factory.build(config)
    }

    /// 설정 점검 유스케이스를 생성한다.
    pub fn inspect_config_usecase(&self) -> InspectConfigUseCase<'_> {
        InspectConfigUseCase {
            config_repo: &self.config_repo,
        }
    }

    pub fn generate_batch_usecase<'a>(
        &'a self,
        composer: &'a SentenceComposer,
    ) -> GenerateBatchUseCase<'a> {
        GenerateBatchUseCase {
            composer,
            reporter: &self.reporter,
        }
    }

    pub fn generate_row_usecase<'a>(
        &'a self,
        composer: &'a SentenceComposer,
    ) -> GenerateRowUseCase<'a> {
        GenerateRowUseCase {
            composer,
            reporter: &self.reporter,
        }
    }

    pub fn enrich_row_usecase<'a>(&'a self, enricher: &'a dyn Enricher) -> EnrichRowUseCase<'a> {
        EnrichRowUseCase {
            enricher,
            reporter: &self.reporter,
        }
    }

    pub fn polish_text_usecase<'a>(&'a self, enricher: &'a dyn Enricher) -> PolishTextUseCase<'a> {
        PolishTextUseCase { enricher }
    }

    pub fn synthesize_images_usecase<'a>(
        &'a self,
        enricher: &'a dyn Enricher,
    ) -> SynthesizeImagesUseCase<'a> {
        SynthesizeImagesUseCase {
            image_loader: &self.image_loader,
            enricher,
            reporter: &self.reporter,
        }
    }

    pub fn copy_text_usecase(&self) -> CopyTextUseCase<'_> {
        CopyTextUseCase {
            clipboard: &self.clipboard,
            reporter: &self.reporter,
        }
    }
}

/// `--seed`가 있으면 재현 가능한 난수원을 쓴다.
pub fn random_source(seed: Option<u64>) -> Box<dyn RandomSource + Send> {
    match seed {
        Some(seed) => Box::new(SeededRandom::new(seed)),
        None => Box::new(ThreadRandom),
    }
}
