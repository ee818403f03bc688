//! 단일 문구 AI 윤문 유스케이스.

use anyhow::{Result, bail};

use crate::application::ports::Enricher;
use crate::domain::policy::PolishMode;

pub struct PolishTextUseCase<'a> {
    pub enricher: &'a dyn Enricher,
}

impl<'a> PolishTextUseCase<'a> {
    pub async fn execute(&self, text: &str, mode: PolishMode) -> Result<String> {
        if text.trim().is_empty() {
            bail!("윤문할 문구를 입력해주세요.");
        }
        self.enricher.polish(text, mode).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::usecases::testing::ScriptedEnricher;

    #[tokio::test]
    async fn blank_text_is_rejected_without_call() {
        let enricher = ScriptedEnricher::echo();
        let use_case = PolishTextUseCase { enricher: &enricher };

        assert!(use_case.execute("  ", PolishMode::Enrich).await.is_err());
        assert_eq!(enricher.calls(), 0);

        let text = use_case.execute("성실함.", PolishMode::Enrich).await.unwrap();
        assert_eq!(text, "성실함. [enrich]");
    }
}
