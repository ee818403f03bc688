//! `saenggibu` 바이너리 진입점.

use saenggibu::interface::cli::{AppComposition, Cli, run_action};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let (seed, action) = match Cli::parse_action() {
        Ok(parsed) => parsed,
        Err(msg) => {
            eprintln!("error: {msg}");
            std::process::exit(2);
        }
    };

    let composition = AppComposition::default();
    if let Err(err) = run_action(&composition, seed, action).await {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
