//! 결과 문구 클립보드 복사 유스케이스.

use anyhow::{Result, bail};

use crate::application::ports::{Clipboard, Reporter};

pub struct CopyTextUseCase<'a> {
    pub clipboard: &'a dyn Clipboard,
    pub reporter: &'a dyn Reporter,
}

impl<'a> CopyTextUseCase<'a> {
    pub fn execute(&self, text: &str) -> Result<()> {
        if text.is_empty() {
            bail!("복사할 문구가 없습니다.");
        }
        if self.clipboard.copy(text)? {
            self.reporter.status("Copy", "클립보드에 복사했습니다.");
        } else {
            self.reporter
                .status("Copy", "터미널이 아니어서 클립보드 대신 출력합니다.");
        }
        self.reporter.raw(text);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::usecases::testing::{NoTtyClipboard, RecordingReporter};

    #[test]
    fn falls_back_to_printing() {
        let reporter = RecordingReporter::default();
        let use_case = CopyTextUseCase {
            clipboard: &NoTtyClipboard,
            reporter: &reporter,
        };

        assert!(use_case.execute("").is_err());
        use_case.execute("성실함.").unwrap();
        assert!(reporter.lines().contains(&"raw:성실함.".to_string()));
    }
}
