//! 원격 생성 provider 모듈.
//! 현재는 Google Gemini API만 지원한다.

mod api_runner;
pub mod gemini;

pub use gemini::GeminiEnricher;
