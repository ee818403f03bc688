//! 이미지 파일 로더 포트 구현 어댑터.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use rand::Rng;
use rand::distributions::Alphanumeric;
use tracing::debug;

use crate::application::ports::ImageLoader;
use crate::domain::asset::{UploadedAsset, image_mime_type};

/// 파일을 통째로 읽어 base64로 인코딩한다. 입력 순서를 그대로 유지한다.
pub struct FileImageLoader;

#[async_trait]
impl ImageLoader for FileImageLoader {
    async fn load(&self, paths: &[PathBuf]) -> Result<Vec<UploadedAsset>> {
        let mut assets = Vec::with_capacity(paths.len());
        for path in paths {
            assets.push(load_one(path).await?);
        }
        Ok(assets)
    }
}

async fn load_one(path: &Path) -> Result<UploadedAsset> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());
    let Some(mime_type) = image_mime_type(&file_name) else {
        bail!("이미지 파일이 아닙니다: {}", path.display());
    };

    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read image {}", path.display()))?;
    debug!(file = %file_name, bytes = bytes.len(), "image loaded");

    Ok(UploadedAsset {
        id: short_id(),
        file_name,
        mime_type: mime_type.to_string(),
        base64: STANDARD.encode(&bytes),
    })
}

fn short_id() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(7)
        .map(char::from)
        .collect::<String>()
        .to_ascii_lowercase()
}
