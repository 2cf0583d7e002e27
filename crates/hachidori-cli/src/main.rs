mod format;
mod menu;

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use hachidori_core::config::AppConfig;
use hachidori_core::{session, HachidoriError, Session};
use tracing_subscriber::EnvFilter;

/// Browse a Hummingbird anime library from the terminal.
#[derive(Parser)]
#[command(name = "hachidori", version, about)]
struct Cli {
    /// Whose library to download.
    username: String,

    /// Config file to use instead of the user config.
    #[arg(long, env = "HACHIDORI_CONFIG")]
    config: Option<PathBuf>,

    /// Catalog API root, e.g. https://hummingbird.me/api/v1.
    #[arg(long, env = "HACHIDORI_BASE_URL")]
    base_url: Option<String>,

    /// Detail requests dispatched per batch.
    #[arg(long, env = "HACHIDORI_BATCH_SIZE")]
    batch_size: Option<usize>,

    /// Per-request timeout in seconds.
    #[arg(long, value_name = "SECS", env = "HACHIDORI_TIMEOUT")]
    timeout: Option<u64>,
}

impl Cli {
    fn load_config(&self) -> Result<AppConfig, HachidoriError> {
        let mut config = match &self.config {
            Some(path) => AppConfig::load_from(path)?,
            None => AppConfig::load()?,
        };

        if let Some(base_url) = &self.base_url {
            config.api.base_url = base_url.clone();
        }
        if let Some(batch_size) = self.batch_size {
            config.api.batch_size = batch_size;
        }
        if let Some(timeout) = self.timeout {
            config.api.request_timeout_secs = timeout;
        }

        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("hachidori=info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match cli.load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    println!("Downloading {}'s library...", cli.username);
    println!("(This can take a while)");

    let store = match session::fetch_session(&config.api, &cli.username).await {
        Session::Populated(store) => store,
        Session::Failed(e) => {
            tracing::error!(error = %e, "Library session failed");
            println!("Failure! Couldn't download {}'s library", cli.username);
            return ExitCode::FAILURE;
        }
    };

    println!("Done! (loaded {} entries)", store.len());
    println!();

    let stdin = io::stdin();
    let stdout = io::stdout();
    if let Err(e) = menu::run(&store, &cli.username, &mut stdin.lock(), &mut stdout.lock()) {
        tracing::error!(error = %e, "Console I/O failed");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
