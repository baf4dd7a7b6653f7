//! SBC Installer - Main entry point
//!
//! Stands in for the host installer: resolves board options, then installs
//! the bootloader and boot files onto an already partitioned and mounted target.

use anyhow::{Context, Result};
use strum::IntoEnumIterator;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use sbc_installer::cli::{Cli, Commands};
use sbc_installer::{Board, InstallConfig, InstallRequest, executor, options, plan};

/// Initialize the logger with appropriate settings
fn init_logger(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    // RUST_LOG overrides the default level
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse_args();
    init_logger(cli.verbose);
    debug!("CLI arguments parsed");

    if let Err(e) = run(cli.command) {
        error!("{:#}", e);
        eprintln!("✗ {:#}", e);
        std::process::exit(1);
    }
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Boards => {
            for board in Board::iter() {
                let profile = board.profile();
                println!("{:<12} {}", profile.name, profile.device_tree_blob);
            }
        }
        Commands::Options { board } => {
            let options = options::resolve(board.profile());
            let json = serde_json::to_string_pretty(&options)
                .context("Failed to serialize options to JSON")?;
            println!("{}", json);
        }
        Commands::Plan { board, overlays } => {
            let profile = board.profile();
            let names = sbc_installer::parse_overlay_names(&overlays);
            let files = plan::plan(profile, &names);
            println!("{}", plan::summary(profile, &files));
        }
        Commands::Install {
            config,
            board,
            disk,
            artifacts,
            mount_prefix,
            overlays,
        } => {
            let (profile, request) = match config {
                Some(path) => {
                    info!("Loading configuration from: {:?}", path);
                    let config = InstallConfig::load_from_file(&path)?;
                    config.validate()?;
                    (config.profile()?, config.to_request())
                }
                None => {
                    // clap enforces these when --config is absent
                    let board = board.context("--board is required")?;
                    let request = InstallRequest::new(
                        disk.context("--disk is required")?,
                        artifacts.context("--artifacts is required")?,
                        mount_prefix.context("--mount-prefix is required")?,
                    )
                    .with_overlays(overlays.as_deref().unwrap_or_default());
                    (board.profile(), request)
                }
            };

            let report = executor::install(profile, &request)
                .with_context(|| format!("Install for {} failed", profile.name))?;

            println!(
                "✓ Installed {} ({} byte bootloader, {} boot files{})",
                report.board,
                report.bootloader_bytes,
                report.copied.len(),
                if report.env_updated { ", boot.env updated" } else { "" }
            );
        }
        Commands::Validate { config } => {
            info!("Validating configuration file: {:?}", config);
            let config = InstallConfig::load_from_file(&config)?;
            config.validate()?;
            println!("✓ Configuration file is valid for board {}", config.board);
        }
    }

    Ok(())
}
