//! Partition and kernel options handed to the host before mounting.
//!
//! The host needs these to lay out the partition table and build the final
//! kernel command line. Overlay requests never influence them.

use serde::{Deserialize, Serialize};

use crate::board::BoardProfile;

/// Pre-mount configuration for one board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Options {
    pub name: String,
    pub kernel_args: Vec<String>,
    pub partition_offset_sectors: u64,
}

impl Options {
    /// Kernel arguments joined into a single command line.
    pub fn kernel_cmdline(&self) -> String {
        self.kernel_args.join(" ")
    }
}

/// Resolve the pre-mount options for a board. Never fails.
pub fn resolve(profile: &BoardProfile) -> Options {
    Options {
        name: profile.name.to_string(),
        kernel_args: profile.kernel_args.iter().map(|a| a.to_string()).collect(),
        partition_offset_sectors: profile.partition_offset_sectors,
    }
}
