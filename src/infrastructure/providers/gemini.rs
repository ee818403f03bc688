//! Google Gemini 원격 생성 어댑터.

use anyhow::{Result, bail};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};
use tracing::debug;
use url::Url;

use crate::application::config::ProviderConfig;
use crate::application::ports::Enricher;
use crate::domain::asset::UploadedAsset;
use crate::domain::error::DraftError;
use crate::domain::policy::{PolishMode, build_image_instruction, build_polish_prompt, image_label};
use crate::infrastructure::config::resolve_provider_api_key;

use super::api_runner::{build_api_client, collect_text, send_json};

pub struct GeminiEnricher {
    client: Client,
    base_url: String,
    model: String,
    credential: String,
}

impl GeminiEnricher {
    /// API key가 없거나 비활성화되어 있으면 사용할 수 없다는 오류를 돌려준다.
    pub fn from_config(provider: &ProviderConfig) -> Result<Self, DraftError> {
        if !provider.is_enabled() {
            return Err(DraftError::EnricherUnavailable(
                "providers.gemini.enabled = false".to_string(),
            ));
        }

        let resolution = resolve_provider_api_key(provider);
        let Some(credential) = resolution.credential else {
            let hint = resolution
                .source
                .unwrap_or_else(|| "providers.gemini.api_key / api_key_env".to_string());
            return Err(DraftError::EnricherUnavailable(format!(
                "Gemini API key가 설정되지 않았습니다 ({hint})"
            )));
        };

        Ok(Self {
            client: build_api_client(provider.timeout_secs()),
            base_url: provider.api_base(),
            model: provider.model(),
            credential,
        })
    }

    async fn generate(&self, parts: Vec<Value>) -> Result<String> {
        let endpoint = format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        );
        let payload = json!({
            "contents": [
                { "role": "user", "parts": parts }
            ]
        });

        // Gemini는 API key(query) 또는 OAuth(Bearer) 방식 모두 허용한다.
        let request = if self.credential.starts_with("AIza") {
            let mut url = Url::parse(&endpoint)?;
            url.query_pairs_mut().append_pair("key", &self.credential);
            self.client.post(url).json(&payload)
        } else {
            self.client
                .post(endpoint)
                .bearer_auth(&self.credential)
                .json(&payload)
        };
        let response = send_json(self.name(), "request Gemini API", request).await?;

        let content = extract_gemini_content(&response).trim().to_string();
        if content.is_empty() {
            bail!("Gemini: empty response content");
        }
        let total_tokens = response
            .pointer("/usageMetadata/totalTokenCount")
            .and_then(Value::as_u64);
        debug!(model = %self.model, total_tokens = ?total_tokens, "gemini response received");
        Ok(content)
    }
}

fn extract_gemini_content(response: &Value) -> String {
    if let Some(content) = response.pointer("/candidates/0/content") {
        return collect_text(content);
    }
    String::new()
}

/// 번호 라벨 + 이미지 쌍을 순서대로 나열하고 마지막에 지시문을 붙인다.
fn image_parts(images: &[UploadedAsset], instruction: &str) -> Vec<Value> {
    let mut parts = Vec::with_capacity(images.len() * 2 + 1);
    for (idx, image) in images.iter().enumerate() {
        parts.push(json!({ "text": image_label(idx + 1, image) }));
        parts.push(json!({
            "inline_data": {
                "mime_type": image.mime_type,
                "data": image.base64,
            }
        }));
    }
    parts.push(json!({ "text": build_image_instruction(instruction, images.len()) }));
    parts
}

#[async_trait]
impl Enricher for GeminiEnricher {
    fn name(&self) -> &'static str {
        "Gemini"
    }

    async fn polish(&self, text: &str, mode: PolishMode) -> Result<String> {
        let prompt = build_polish_prompt(text, mode);
        self.generate(vec![json!({ "text": prompt })]).await
    }

    async fn synthesize_from_images(
        &self,
        images: &[UploadedAsset],
        instruction: &str,
    ) -> Result<String> {
        if images.is_empty() {
            return Err(DraftError::NoImages.into());
        }
        self.generate(image_parts(images, instruction)).await
    }
}
