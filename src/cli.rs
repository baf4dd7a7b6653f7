use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::board::Board;

/// SBC Installer - U-Boot and boot asset installer for Rockchip boards
#[derive(Parser)]
#[command(name = "sbc-installer")]
#[command(about = "Install U-Boot, device trees and overlays for single-board computers")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List supported boards
    Boards,
    /// Print partition and kernel options for a board as JSON
    Options {
        /// Board name (rockpi4, nanopi-r4s, rock4cplus)
        #[arg(short, long)]
        board: Board,
    },
    /// Print the boot files that would be copied
    Plan {
        /// Board name (rockpi4, nanopi-r4s, rock4cplus)
        #[arg(short, long)]
        board: Board,
        /// Whitespace-separated device-tree overlay names
        #[arg(short, long, default_value = "")]
        overlays: String,
    },
    /// Write the bootloader and copy boot files to a mounted target
    Install {
        /// Path to configuration file (replaces the other flags)
        #[arg(short, long, conflicts_with_all = ["board", "disk", "artifacts", "mount_prefix", "overlays"])]
        config: Option<PathBuf>,
        /// Board name (rockpi4, nanopi-r4s, rock4cplus)
        #[arg(short, long, required_unless_present = "config")]
        board: Option<Board>,
        /// Raw block device or disk image (e.g., /dev/mmcblk1)
        #[arg(short, long, required_unless_present = "config")]
        disk: Option<PathBuf>,
        /// Root directory of the build artifacts
        #[arg(short, long, required_unless_present = "config")]
        artifacts: Option<PathBuf>,
        /// Where the target boot partition is mounted
        #[arg(short, long, required_unless_present = "config")]
        mount_prefix: Option<PathBuf>,
        /// Whitespace-separated device-tree overlay names
        #[arg(short, long)]
        overlays: Option<String>,
    },
    /// Validate an install configuration file
    Validate {
        /// Path to configuration file to validate
        config: PathBuf,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        <Self as clap::Parser>::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_requires_command() {
        assert!(Cli::try_parse_from(["sbc-installer"]).is_err());
    }

    #[test]
    fn test_cli_options_command() {
        let cli = Cli::try_parse_from(["sbc-installer", "options", "--board", "nanopi-r4s"]).unwrap();
        match cli.command {
            Commands::Options { board } => assert_eq!(board, Board::NanoPiR4s),
            _ => panic!("Expected Options command"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_board() {
        let result = Cli::try_parse_from(["sbc-installer", "options", "--board", "rpi4"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_install_with_flags() {
        let cli = Cli::try_parse_from([
            "sbc-installer",
            "install",
            "--board",
            "rockpi4",
            "--disk",
            "/dev/mmcblk1",
            "--artifacts",
            "/usr/install",
            "--mount-prefix",
            "/mnt",
            "--overlays",
            "uart4 spi1",
        ])
        .unwrap();
        match cli.command {
            Commands::Install { config, board, disk, overlays, .. } => {
                assert!(config.is_none());
                assert_eq!(board, Some(Board::RockPi4));
                assert_eq!(disk, Some(PathBuf::from("/dev/mmcblk1")));
                assert_eq!(overlays.as_deref(), Some("uart4 spi1"));
            }
            _ => panic!("Expected Install command"),
        }
    }

    #[test]
    fn test_cli_install_with_config() {
        let cli = Cli::try_parse_from([
            "sbc-installer",
            "install",
            "--config",
            "/path/to/install.json",
        ])
        .unwrap();
        match cli.command {
            Commands::Install { config, board, .. } => {
                assert_eq!(config, Some(PathBuf::from("/path/to/install.json")));
                assert!(board.is_none());
            }
            _ => panic!("Expected Install command"),
        }
    }

    #[test]
    fn test_cli_install_missing_disk() {
        let result = Cli::try_parse_from([
            "sbc-installer",
            "install",
            "--board",
            "rockpi4",
            "--artifacts",
            "/usr/install",
            "--mount-prefix",
            "/mnt",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_install_config_conflicts_with_flags() {
        let result = Cli::try_parse_from([
            "sbc-installer",
            "install",
            "--config",
            "install.json",
            "--board",
            "rockpi4",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_plan_default_overlays() {
        let cli = Cli::try_parse_from(["sbc-installer", "-v", "plan", "-b", "rock4cplus"]).unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Plan { board, overlays } => {
                assert_eq!(board, Board::Rock4CPlus);
                assert!(overlays.is_empty());
            }
            _ => panic!("Expected Plan command"),
        }
    }
}
