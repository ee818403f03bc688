//! CLI 인터페이스 모듈 묶음.
//! 인자 파싱/REPL/단발 실행/조립을 한 네임스페이스로 관리한다.

pub mod command;
pub mod composition;
pub mod oneshot;
pub mod repl;

pub use command::{Cli, CliAction};
pub use composition::AppComposition;
pub use oneshot::run_action;
pub use repl::run_repl;
