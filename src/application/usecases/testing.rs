//! 유스케이스 테스트용 가짜 포트.

use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{Result, bail};
use async_trait::async_trait;
use futures::channel::oneshot;

use crate::application::ports::{Clipboard, Enricher, ImageLoader, Reporter};
use crate::domain::asset::UploadedAsset;
use crate::domain::policy::PolishMode;

/// 출력하지 않는 리포터.
pub(crate) struct SilentReporter;

impl Reporter for SilentReporter {
    fn section(&self, _: &str) {}
    fn kv(&self, _: &str, _: &str) {}
    fn status(&self, _: &str, _: &str) {}
    fn row(&self, _: u32, _: &str, _: bool) {}
    fn row_status(&self, _: u32, _: &str, _: Option<&str>) {}
    fn notice(&self, _: &str) {}
    fn raw(&self, _: &str) {}
}

/// 알림/원문 출력만 기록한다.
#[derive(Default)]
pub(crate) struct RecordingReporter {
    pub lines: Mutex<Vec<String>>,
}

impl RecordingReporter {
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }

    fn push(&self, line: String) {
        self.lines.lock().unwrap().push(line);
    }
}

impl Reporter for RecordingReporter {
    fn section(&self, _: &str) {}
    fn kv(&self, _: &str, _: &str) {}
    fn status(&self, scope: &str, message: &str) {
        self.push(format!("status:{scope}:{message}"));
    }
    fn row(&self, _: u32, _: &str, _: bool) {}
    fn row_status(&self, id: u32, status: &str, _: Option<&str>) {
        self.push(format!("row:{id}:{status}"));
    }
    fn notice(&self, message: &str) {
        self.push(format!("notice:{message}"));
    }
    fn raw(&self, line: &str) {
        self.push(format!("raw:{line}"));
    }
}

/// 호출 횟수를 세고 정해진 방식으로 응답하는 보강기.
pub(crate) struct ScriptedEnricher {
    calls: AtomicUsize,
    failure: Option<String>,
    gate: Mutex<Option<oneshot::Receiver<()>>>,
}

impl ScriptedEnricher {
    /// 입력 끝에 모드 표시를 붙여 돌려준다.
    pub fn echo() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            failure: None,
            gate: Mutex::new(None),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::echo()
        }
    }

    /// 첫 호출은 송신 측이 신호를 보낼 때까지 응답하지 않는다.
    pub fn gated() -> (Self, oneshot::Sender<()>) {
        let (tx, rx) = oneshot::channel();
        let enricher = Self {
            gate: Mutex::new(Some(rx)),
            ..Self::echo()
        };
        (enricher, tx)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn wait_gate(&self) {
        let gate = self.gate.lock().unwrap().take();
        if let Some(rx) = gate {
            let _ = rx.await;
        }
    }
}

#[async_trait]
impl Enricher for ScriptedEnricher {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn polish(&self, text: &str, mode: PolishMode) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.wait_gate().await;
        if let Some(message) = &self.failure {
            bail!("{message}");
        }
        Ok(format!("{text} [{}]", mode.code()))
    }

    async fn synthesize_from_images(
        &self,
        images: &[UploadedAsset],
        instruction: &str,
    ) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = &self.failure {
            bail!("{message}");
        }
        let names: Vec<&str> = images.iter().map(|img| img.file_name.as_str()).collect();
        Ok(format!("{} / {instruction}", names.join(",")))
    }
}

/// 경로의 파일명만으로 자산을 만든다.
pub(crate) struct StubImageLoader;

#[async_trait]
impl ImageLoader for StubImageLoader {
    async fn load(&self, paths: &[PathBuf]) -> Result<Vec<UploadedAsset>> {
        Ok(paths
            .iter()
            .enumerate()
            .map(|(idx, path)| UploadedAsset {
                id: format!("img{idx}"),
                file_name: path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_default(),
                mime_type: "image/png".to_string(),
                base64: String::new(),
            })
            .collect())
    }
}

/// 터미널이 없는 환경처럼 동작하는 클립보드.
pub(crate) struct NoTtyClipboard;

impl Clipboard for NoTtyClipboard {
    fn copy(&self, _: &str) -> Result<bool> {
        Ok(false)
    }
}
