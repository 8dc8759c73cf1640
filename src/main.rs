use std::{
    fs::File,
    path::{Path, PathBuf},
    sync::Mutex,
};

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use solitary_dungeon::{GameConfig, Level, engine::game_loop::run};

/// Walk a hand-laid dungeon in the terminal.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// TOML file overriding the default level and timings.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write tracing output to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print the carved map as text and exit.
    #[arg(long)]
    dump: bool,

    /// Print the effective configuration as TOML and exit.
    #[arg(long)]
    print_config: bool,
}

fn init_tracing(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("creating log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "solitary_dungeon=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_tracing(path)?;
    }

    let config = match &cli.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => GameConfig::default(),
    };
    tracing::info!(config = ?cli.config, "starting");

    if cli.print_config {
        print!("{}", config.to_toml_string()?);
        return Ok(());
    }

    if cli.dump {
        let level = Level::from_config(&config.level)?;
        println!("{}", level.map());
        return Ok(());
    }

    run(&config)?;
    Ok(())
}
