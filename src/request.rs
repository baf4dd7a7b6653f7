//! Per-invocation install request.

use std::path::{Path, PathBuf};

/// Location of the boot partition relative to the mount prefix.
pub const ESP_DIR: &str = "boot/EFI";

/// Environment file read by U-Boot, relative to the mount prefix.
pub const BOOT_ENV_FILE: &str = "boot/EFI/boot.env";

/// Everything `install` needs beyond the board profile.
///
/// Built once per installation attempt and dropped afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallRequest {
    /// Raw block device or disk image.
    pub install_disk: PathBuf,
    /// Root of the architecture-specific build artifacts.
    pub artifacts_path: PathBuf,
    /// Where the target boot partition is mounted.
    pub mount_prefix: PathBuf,
    /// Requested device-tree overlays, in order, duplicates kept.
    pub overlays: Vec<String>,
}

impl InstallRequest {
    pub fn new(
        install_disk: impl Into<PathBuf>,
        artifacts_path: impl Into<PathBuf>,
        mount_prefix: impl Into<PathBuf>,
    ) -> Self {
        Self {
            install_disk: install_disk.into(),
            artifacts_path: artifacts_path.into(),
            mount_prefix: mount_prefix.into(),
            overlays: Vec::new(),
        }
    }

    /// Set overlays from a whitespace-separated list such as `"uart4 spi1"`.
    pub fn with_overlays(mut self, overlays: &str) -> Self {
        self.overlays = parse_overlay_names(overlays);
        self
    }

    /// Boot partition root: `<mount>/boot/EFI`.
    pub fn esp_root(&self) -> PathBuf {
        self.mount_prefix.join(ESP_DIR)
    }

    /// `<mount>/boot/EFI/boot.env`.
    pub fn boot_env_path(&self) -> PathBuf {
        self.mount_prefix.join(BOOT_ENV_FILE)
    }

    /// Source root for boot assets: `<artifacts>/<arch>`.
    pub fn asset_root(&self, arch: &str) -> PathBuf {
        self.artifacts_path.join(arch)
    }

    pub fn install_disk(&self) -> &Path {
        &self.install_disk
    }
}

/// Split a whitespace-separated overlay list, preserving order and duplicates.
pub fn parse_overlay_names(raw: &str) -> Vec<String> {
    raw.split_whitespace().map(str::to_string).collect()
}

/// The line appended to `boot.env` for a set of overlays.
pub fn overlays_env_line<S: AsRef<str>>(overlays: &[S]) -> String {
    let names: Vec<&str> = overlays.iter().map(|s| s.as_ref()).collect();
    format!("overlays={}\n", names.join(" "))
}
