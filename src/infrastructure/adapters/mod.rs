//! 애플리케이션 포트를 실제 인프라 구현체로 연결하는 어댑터 계층.

mod catalog_repository;
mod clipboard;
mod config_repository;
mod enricher_factory;
mod image_loader;
mod reporter;

pub use catalog_repository::DataCatalogRepository;
pub use clipboard::Osc52Clipboard;
pub use config_repository::JsonConfigRepository;
pub use enricher_factory::GeminiEnricherFactory;
pub use image_loader::FileImageLoader;
pub use reporter::ConsoleReporter;
