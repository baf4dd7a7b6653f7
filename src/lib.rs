//! SBC Installer Library
//!
//! Board-specific bootloader installation for Rockchip single-board computers:
//! partition/kernel options before mounting, then a raw U-Boot write, an
//! optional overlay line in `boot.env`, and the boot file copies.

pub mod board;
pub mod cli;
pub mod config;
pub mod error;
pub mod executor;
pub mod options;
pub mod plan;
pub mod request;
pub mod step;

// Re-export main types for convenience
pub use board::{Board, BoardProfile, UnknownBoardError};
pub use config::InstallConfig;
pub use error::InstallError;
pub use executor::{InstallExecutor, InstallReport, RawDisk, install};
pub use options::{Options, resolve};
pub use plan::plan;
pub use request::{InstallRequest, parse_overlay_names};
pub use step::InstallStep;
