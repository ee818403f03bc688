//! 증빙 이미지 기반 특기사항 생성 유스케이스.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;

use crate::application::ports::{Enricher, ImageLoader, Reporter};
use crate::domain::error::DraftError;

/// 업로드 순서를 유지한 채 이미지와 지시문을 원격 API로 보낸다.
pub struct SynthesizeImagesUseCase<'a> {
    pub image_loader: &'a dyn ImageLoader,
    pub enricher: &'a dyn Enricher,
    pub reporter: &'a dyn Reporter,
}

impl<'a> SynthesizeImagesUseCase<'a> {
    pub async fn execute(&self, paths: &[PathBuf], instruction: &str) -> Result<String> {
        // 원격 호출 전에 거절한다.
        if paths.is_empty() {
            return Err(DraftError::NoImages.into());
        }

        self.reporter.section("Images");
        let images = self.image_loader.load(paths).await?;
        if images.is_empty() {
            return Err(DraftError::NoImages.into());
        }
        for (idx, image) in images.iter().enumerate() {
            self.reporter.kv(
                &format!("사진 {}", idx + 1),
                &format!("{} ({}, id={})", image.file_name, image.mime_type, image.id),
            );
        }

        self.reporter
            .status(self.enricher.name(), "이미지 분석 및 생성 중...");
        let text = self
            .enricher
            .synthesize_from_images(&images, instruction)
            .await
            .map_err(|err| DraftError::RemoteCallFailed(format!("{err:#}")))
            .context("이미지 분석 중 오류가 발생했습니다. 잠시 후 다시 시도해주세요.")?;

        info!(images = images.len(), chars = text.chars().count(), "narrative synthesized");
        Ok(text)
    }
}
