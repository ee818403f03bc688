//! 애플리케이션 계층이 의존하는 포트(추상 인터페이스) 모음.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use crate::application::config::Config;
use crate::domain::asset::UploadedAsset;
use crate::domain::phrase::PhraseBank;
use crate::domain::policy::PolishMode;
use crate::domain::schedule::ScheduleCatalog;

/// 설정 로딩/점검을 담당하는 저장소 포트.
pub trait ConfigRepository: Send + Sync {
    fn load(&self) -> Result<Config>;
    fn inspect_pretty_json(&self) -> Result<String>;
}

/// 문구 은행/학사일정 같은 정적 테이블을 읽는 포트.
pub trait CatalogRepository: Send + Sync {
    fn phrase_bank(&self, config: &Config) -> Result<Arc<PhraseBank>>;
    fn schedule(&self, config: &Config) -> Result<Arc<ScheduleCatalog>>;
}

/// 원격 생성 API 경계. 실패 시 부분 결과 없이 오류만 돌려준다.
#[async_trait]
pub trait Enricher: Send + Sync {
    fn name(&self) -> &'static str;
    async fn polish(&self, text: &str, mode: PolishMode) -> Result<String>;
    /// 이미지 순서는 제출 순서 그대로 전달된다.
    async fn synthesize_from_images(
        &self,
        images: &[UploadedAsset],
        instruction: &str,
    ) -> Result<String>;
}

/// 설정에 맞는 Enricher를 만드는 팩토리 포트.
pub trait EnricherFactory: Send + Sync {
    fn build(&self, config: &Config) -> Result<Arc<dyn Enricher>>;
}

/// 이미지 파일을 읽어 base64 자산으로 바꾸는 포트.
#[async_trait]
pub trait ImageLoader: Send + Sync {
    async fn load(&self, paths: &[PathBuf]) -> Result<Vec<UploadedAsset>>;
}

/// 클립보드 쓰기 포트. 실제로 복사했으면 `true`.
pub trait Clipboard: Send + Sync {
    fn copy(&self, text: &str) -> Result<bool>;
}

/// 콘솔 출력 추상화 포트.
pub trait Reporter: Send + Sync {
    fn section(&self, name: &str);
    fn kv(&self, key: &str, value: &str);
    fn status(&self, scope: &str, message: &str);
    fn row(&self, id: u32, text: &str, pending: bool);
    fn row_status(&self, id: u32, status: &str, extra: Option<&str>);
    fn notice(&self, message: &str);
    fn raw(&self, line: &str);
}
