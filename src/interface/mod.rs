//! Interface layer
//! CLI 인자 파싱, 대화형 REPL, 의존성 조립을 담당한다.

pub mod cli;
