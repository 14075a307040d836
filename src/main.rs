//! mahjong-tiles - arrange Mahjong tiles from the command line
//!
//! Reads a command script, replays it against the selection state machine
//! and optionally exports the result as `mahjong-selection.png`.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::AsyncReadExt;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use mahjong_tiles::input::{ScriptCommand, parse_script};
use mahjong_tiles::ui::ExportOutcome;
use mahjong_tiles::{AppConfig, AppController};

use crate::cli::{Cli, Commands, format_catalog, format_selection};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config =
        AppConfig::load_or_default(cli.config.as_deref()).context("loading configuration")?;
    let config = cli.apply_overrides(config);
    debug!(?config, "configuration resolved");

    match &cli.command {
        Commands::Catalog => {
            print!("{}", format_catalog());
            Ok(())
        }
        Commands::Run { script, export } => {
            let text = match script {
                Some(path) => tokio::fs::read_to_string(path)
                    .await
                    .with_context(|| format!("reading script {}", path.display()))?,
                None => {
                    let mut text = String::new();
                    tokio::io::stdin()
                        .read_to_string(&mut text)
                        .await
                        .context("reading script from stdin")?;
                    text
                }
            };
            run_script(config, &text, *export).await
        }
    }
}

async fn run_script(config: AppConfig, text: &str, export_at_end: bool) -> Result<()> {
    let commands = parse_script(text)?;
    let mut controller = AppController::new(config).context("initializing renderer")?;
    info!(commands = commands.len(), "replaying script");

    for command in &commands {
        for event in command.events() {
            controller.handle_event(event);
        }
        match command {
            ScriptCommand::Show => print!("{}", format_selection(controller.selection())),
            ScriptCommand::Export => report(controller.export_image_logged().await),
            ScriptCommand::Event(_) | ScriptCommand::Move { .. } => {}
        }
    }

    print!("{}", format_selection(controller.selection()));

    if export_at_end {
        report(controller.export_image_logged().await);
    }
    Ok(())
}

fn report(outcome: Option<ExportOutcome>) {
    match outcome {
        Some(ExportOutcome::Written(path)) => println!("exported {}", path.display()),
        Some(ExportOutcome::Skipped) => println!("nothing to export: no tiles selected"),
        None => {}
    }
}
