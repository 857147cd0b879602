//! bdcv - Bing dictionary command-line viewer
//!
//! Looks a word up in the Bing dictionary service, caches the compressed
//! response in `~/.bdcv`, and prints a formatted definition.

use std::io;
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use bdcv::app::{App, LookupError};
use bdcv::cache::CacheStore;
use bdcv::cli::{Cli, LookupOptions};
use bdcv::config::{Config, ConfigError};
use bdcv::data::DictionaryClient;

/// Top-level failure of a run
#[derive(Debug, thiserror::Error)]
enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Lookup(#[from] LookupError),
}

async fn run(cli: &Cli, word: &str) -> Result<(), RunError> {
    let config = Config::from_cli(cli)?;
    let cache = CacheStore::load(&config.cache_file).map_err(LookupError::from)?;
    let dictionary = DictionaryClient::with_endpoint(&config.endpoint, config.timeout)
        .map_err(LookupError::from)?;

    let mut app = App::new(cache, dictionary);
    app.lookup(word, &LookupOptions::from_cli(cli), &mut io::stdout())
        .await?;
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .with_writer(io::stderr)
        .init();

    let Some(word) = cli.query() else {
        eprintln!("{}", Cli::command().render_help());
        return ExitCode::FAILURE;
    };

    match run(&cli, word).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            debug!(word, error = %e, "lookup failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
