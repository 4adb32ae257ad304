mod actions;
mod data;
mod dispatch;
mod error;
mod host;
mod locale;
mod matcher;
mod message;
mod paths;
mod picker;
pub mod theme;
mod tui;
mod update;
mod view;

use clap::Parser;
use color_eyre::Result;
use data::AppConfig;
use dispatch::{Environment, open_in_external_app};
use host::TerminalHost;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(version, about = "Open a file in the external app configured for its extension")]
struct Args {
    /// File to open; asks for one from the current directory when omitted
    #[arg(index = 1)]
    file: Option<PathBuf>,

    /// Allow picking several apps at once
    #[arg(short, long)]
    multiple: bool,

    /// Read rules from this file instead of the default location
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    init_tracing(args.verbose);

    // Rules are read fresh on every run
    let config = AppConfig::load(args.config.as_deref())?;

    let env = Environment::detect(std::env::current_dir()?);
    tracing::debug!(subsystem = ?env.subsystem, locale = ?env.locale, "starting");

    let mut host = TerminalHost::new(env.subsystem.clone(), env.cwd.clone());

    open_in_external_app(&mut host, &env, &config.rules, args.file, args.multiple).await?;

    Ok(())
}
