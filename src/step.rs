//! Install pipeline steps.
//!
//! The executor is a strict linear pipeline. Steps only move forward, there
//! are no retries, and a failure in any step ends the attempt.
//!
//! ```text
//! OpenDisk
//!     ↓
//! LoadBootloader
//!     ↓
//! WriteBootloader
//!     ↓
//! SyncDisk          (must finish before the mounted filesystem is touched)
//!     ↓
//! WriteEnv          (no-op when no overlays are requested)
//!     ↓
//! PlanAssets
//!     ↓
//! CopyAssets
//!     ↓
//! Completed
//! ```

use std::fmt;

/// A step of the install pipeline, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum InstallStep {
    OpenDisk = 0,
    LoadBootloader = 1,
    WriteBootloader = 2,
    SyncDisk = 3,
    WriteEnv = 4,
    PlanAssets = 5,
    CopyAssets = 6,
    Completed = 7,
}

impl InstallStep {
    /// Numeric position of this step.
    #[inline]
    pub const fn order(self) -> u8 {
        self as u8
    }

    /// The step that follows, or None once completed.
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::OpenDisk => Some(Self::LoadBootloader),
            Self::LoadBootloader => Some(Self::WriteBootloader),
            Self::WriteBootloader => Some(Self::SyncDisk),
            Self::SyncDisk => Some(Self::WriteEnv),
            Self::WriteEnv => Some(Self::PlanAssets),
            Self::PlanAssets => Some(Self::CopyAssets),
            Self::CopyAssets => Some(Self::Completed),
            Self::Completed => None,
        }
    }

    /// True for steps that modify the raw disk.
    #[inline]
    pub const fn touches_disk(self) -> bool {
        matches!(self, Self::WriteBootloader | Self::SyncDisk)
    }

    /// True for steps that modify the mounted boot partition.
    #[inline]
    pub const fn touches_mount(self) -> bool {
        matches!(self, Self::WriteEnv | Self::CopyAssets)
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::OpenDisk => "Opening install disk",
            Self::LoadBootloader => "Loading bootloader",
            Self::WriteBootloader => "Writing bootloader",
            Self::SyncDisk => "Syncing disk",
            Self::WriteEnv => "Writing boot environment",
            Self::PlanAssets => "Planning boot files",
            Self::CopyAssets => "Copying boot files",
            Self::Completed => "Install complete",
        }
    }

    /// All steps in execution order.
    pub const fn all() -> &'static [Self] {
        &[
            Self::OpenDisk,
            Self::LoadBootloader,
            Self::WriteBootloader,
            Self::SyncDisk,
            Self::WriteEnv,
            Self::PlanAssets,
            Self::CopyAssets,
            Self::Completed,
        ]
    }
}

impl fmt::Display for InstallStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_walks_all_steps() {
        let mut step = InstallStep::OpenDisk;
        let mut visited = vec![step];
        while let Some(next) = step.next() {
            assert!(next > step);
            visited.push(next);
            step = next;
        }
        assert_eq!(visited, InstallStep::all());
    }

    #[test]
    fn test_order_matches_position() {
        for (i, step) in InstallStep::all().iter().enumerate() {
            assert_eq!(step.order() as usize, i);
        }
    }

    #[test]
    fn test_disk_steps_precede_mount_steps() {
        let last_disk = InstallStep::all().iter().filter(|s| s.touches_disk()).max();
        let first_mount = InstallStep::all().iter().filter(|s| s.touches_mount()).min();
        assert!(last_disk < first_mount);
    }

    #[test]
    fn test_display() {
        assert_eq!(InstallStep::SyncDisk.to_string(), "Syncing disk");
    }
}
