use storefront::bootstrap::{load_config, open_preferences};
use storefront::commands::Command;
use storefront::error::StorefrontAppError;
use storefront::logger::{DEFAULT_LOG_LEVEL, initialize as LoggerInitialize};
use storefront::terminal::TerminalNavigator;

use storefront_core::preferences::FilePreferenceStore;
use storefront_core::{DEFAULT_BASE_URL, Storefront};

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use log::{LevelFilter, error, info};
use url::Url;

#[derive(Debug, Parser)]
#[command(author, version, about = "Storefront session and cart client")]
struct Args {
    /// Directory holding storefront.json. Defaults to the platform config dir.
    #[arg(long, env = "STOREFRONT_CONFIG_DIR", value_hint = clap::ValueHint::DirPath)]
    config_dir: Option<PathBuf>,

    /// Directory for preferences and the log file. Defaults to the platform data dir.
    #[arg(long, env = "STOREFRONT_DATA_DIR", value_hint = clap::ValueHint::DirPath)]
    data_dir: Option<PathBuf>,

    /// Address the storefront is opened at, e.g. the login return address
    /// with `?code=...`. Defaults to the configured base address.
    #[arg(long, value_parser = Url::parse)]
    address: Option<Url>,

    /// More log output (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Print errors as JSON.
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => DEFAULT_LOG_LEVEL,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

async fn run(args: Args) -> Result<(), StorefrontAppError> {
    let config = load_config(args.config_dir.as_deref())?;
    let preferences = open_preferences(args.data_dir.as_deref())?;

    let address = match args.address {
        Some(address) => address,
        None => Url::parse(&config.endpoint.base_url)
            .or_else(|_| Url::parse(DEFAULT_BASE_URL))
            .map_err(|e| StorefrontAppError::storefront(format!("Invalid base address: {e}")))?,
    };

    let navigator = Arc::new(TerminalNavigator::new(address));
    let storefront = Storefront::new(&config, navigator, Arc::new(preferences))?;

    args.command.execute(&storefront).await
}

fn log_dir(args: &Args) -> PathBuf {
    args.data_dir
        .clone()
        .or_else(|| FilePreferenceStore::in_default_dir().ok().map(|store| store.dir().to_path_buf()))
        .unwrap_or_else(std::env::temp_dir)
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let json = args.json;

    let logger_ready = match LoggerInitialize(&log_dir(&args), args.log_level()) {
        Ok(()) => true,
        Err(e) => {
            eprintln!("{e}");
            false
        }
    };
    info!("Storefront starting");

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            if json {
                match serde_json::to_string(&e) {
                    Ok(body) => println!("{body}"),
                    Err(serialize_error) => eprintln!("{e} ({serialize_error})"),
                }
            } else if !logger_ready {
                eprintln!("{e}");
            }
            ExitCode::FAILURE
        }
    }
}
