//! Error handling for the installer.
//!
//! Every install failure is fatal for the current attempt. Nothing is retried
//! or rolled back; the error carries the offending path and the underlying
//! I/O cause and goes back to the caller unchanged.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::step::InstallStep;

/// Failure of one step of the install pipeline.
#[derive(Error, Debug)]
pub enum InstallError {
    /// The target disk could not be opened read/write
    #[error("Failed to open {}: {source}", .path.display())]
    DeviceOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The bootloader binary is missing or unreadable
    #[error("Failed to read bootloader artifact {}: {source}", .path.display())]
    ArtifactRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// I/O error while writing the bootloader
    #[error("Failed to write bootloader to {} at offset {offset}: {source}", .path.display())]
    Write {
        path: PathBuf,
        offset: u64,
        #[source]
        source: io::Error,
    },

    /// The disk accepted fewer bytes than the bootloader holds
    #[error(
        "Short write to {} at offset {offset}: wrote {written} of {expected} bytes",
        .path.display()
    )]
    PartialWrite {
        path: PathBuf,
        offset: u64,
        written: usize,
        expected: usize,
    },

    /// Flushing the disk to stable storage failed
    #[error("Failed to sync {}: {source}", .path.display())]
    Sync {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The boot environment file could not be opened or appended to
    #[error("Failed to write env to {}: {source}", .path.display())]
    EnvWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A destination directory in the boot partition could not be created
    #[error("Failed to create directory {}: {source}", .path.display())]
    DirectoryCreate {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A boot file could not be copied
    #[error("Failed to copy {} to {}: {source}", .src.display(), .dst.display())]
    Copy {
        src: PathBuf,
        dst: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl InstallError {
    /// The pipeline step this error terminated.
    pub fn step(&self) -> InstallStep {
        match self {
            Self::DeviceOpen { .. } => InstallStep::OpenDisk,
            Self::ArtifactRead { .. } => InstallStep::LoadBootloader,
            Self::Write { .. } | Self::PartialWrite { .. } => InstallStep::WriteBootloader,
            Self::Sync { .. } => InstallStep::SyncDisk,
            Self::EnvWrite { .. } => InstallStep::WriteEnv,
            Self::DirectoryCreate { .. } | Self::Copy { .. } => InstallStep::CopyAssets,
        }
    }

    /// True if the bootloader may already be on disk when this error occurred.
    pub fn disk_modified(&self) -> bool {
        self.step() >= InstallStep::WriteBootloader
    }
}

/// Result type alias for install operations
pub type Result<T> = std::result::Result<T, InstallError>;
