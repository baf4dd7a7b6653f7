//! Install configuration files.
//!
//! Lets an install be described in a JSON file instead of CLI flags. Keys are
//! camelCase; `dtOverlays` is a whitespace-separated overlay list, the same
//! form the `--overlays` flag accepts.
//!
//! ```json
//! {
//!   "board": "rockpi4",
//!   "installDisk": "/dev/mmcblk1",
//!   "artifactsPath": "/usr/install",
//!   "mountPrefix": "/mnt",
//!   "dtOverlays": "rk3399-uart4 rk3399-spi1"
//! }
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::board::{BoardProfile, UnknownBoardError};
use crate::request::InstallRequest;

/// Installation configuration that can be saved/loaded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallConfig {
    pub board: String,
    pub install_disk: PathBuf,
    pub artifacts_path: PathBuf,
    pub mount_prefix: PathBuf,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub dt_overlays: String,
}

impl InstallConfig {
    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize configuration to JSON")?;

        fs::write(&path, json)
            .with_context(|| format!("Failed to write configuration to {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Load configuration from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read configuration from {:?}", path.as_ref()))?;

        let config: Self =
            serde_json::from_str(&content).context("Failed to parse configuration JSON")?;

        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.profile()?;

        if self.install_disk.as_os_str().is_empty() {
            anyhow::bail!("Install disk must be specified");
        }
        if self.artifacts_path.as_os_str().is_empty() {
            anyhow::bail!("Artifacts path must be specified");
        }
        if self.mount_prefix.as_os_str().is_empty() {
            anyhow::bail!("Mount prefix must be specified");
        }

        Ok(())
    }

    /// The profile of the configured board.
    pub fn profile(&self) -> std::result::Result<&'static BoardProfile, UnknownBoardError> {
        BoardProfile::lookup(&self.board)
    }

    /// Build the install request described by this configuration.
    pub fn to_request(&self) -> InstallRequest {
        InstallRequest::new(&self.install_disk, &self.artifacts_path, &self.mount_prefix)
            .with_overlays(&self.dt_overlays)
    }
}
