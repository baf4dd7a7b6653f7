//! Supported boards and their static installation profiles.
//!
//! Every board runs the same installation pipeline; the only differences are
//! the constants captured in a [`BoardProfile`]. Boards are a closed set
//! (`Board`) and each one maps to exactly one `'static` profile.
//!
//! # Supported Boards
//!
//! | Board        | SoC    | Device tree blob          |
//! |--------------|--------|---------------------------|
//! | `rockpi4`    | RK3399 | `rk3399-rock-pi-4b.dtb`   |
//! | `nanopi-r4s` | RK3399 | `rk3399-nanopi-r4s.dtb`   |
//! | `rock4cplus` | RK3399 | `rk3399-rock-4c-plus.dtb` |

use std::path::{Path, PathBuf};

use strum::{Display, EnumIter, EnumString, IntoEnumIterator};
use thiserror::Error;

/// Size of a disk sector as used for partition offsets.
pub const SECTOR_SIZE: u64 = 512;

/// Rockchip boot ROM looks for the idbloader at sector 64.
const ROCKCHIP_UBOOT_OFFSET: u64 = SECTOR_SIZE * 64;

/// First data partition starts at 10 MiB, past the raw U-Boot area.
const ROCKCHIP_PARTITION_OFFSET_SECTORS: u64 = 2048 * 10;

const ROCKCHIP_KERNEL_ARGS: &[&str] = &[
    "console=tty0",
    "console=ttyS2,1500000n8",
    "sysctl.kernel.kexec_load_disabled=1",
    "talos.dashboard.disabled=1",
];

/// Boot script copied next to the device tree on every board.
pub const BOOT_SCRIPT: &str = "boot.scr";

/// Directory under the device-tree directory holding compiled overlays.
pub const OVERLAY_SUBDIR: &str = "overlays";

/// Static installation profile for a single board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardProfile {
    /// Unique board identifier, also the U-Boot artifact directory name.
    pub name: &'static str,
    /// Architecture directory under the artifacts root.
    pub arch: &'static str,
    /// Bootloader family, used in `u-boot-<family>.bin`.
    pub family: &'static str,
    /// Kernel command-line tokens, in order.
    pub kernel_args: &'static [&'static str],
    /// Start of the installable partition, in 512-byte sectors.
    pub partition_offset_sectors: u64,
    /// Absolute byte offset of the bootloader on the raw disk.
    pub bootloader_write_offset_bytes: u64,
    /// Device-tree directory, relative to `<artifacts>/<arch>/`.
    pub device_tree_dir: &'static str,
    /// Board device-tree blob, relative to `<artifacts>/<arch>/`.
    pub device_tree_blob: &'static str,
    /// Files copied on every install, relative to `<artifacts>/<arch>/`.
    pub base_boot_files: &'static [&'static str],
}

impl BoardProfile {
    /// Look up a profile by board name.
    pub fn lookup(name: &str) -> Result<&'static BoardProfile, UnknownBoardError> {
        name.parse::<Board>()
            .map(Board::profile)
            .map_err(|_| UnknownBoardError(name.to_string()))
    }

    /// Bootloader binary, relative to the artifacts root.
    ///
    /// Resolves to `<arch>/u-boot/<name>/u-boot-<family>.bin`.
    pub fn bootloader_artifact_relative_path(&self) -> PathBuf {
        Path::new(self.arch)
            .join("u-boot")
            .join(self.name)
            .join(format!("u-boot-{}.bin", self.family))
    }

    /// Overlay blob directory, relative to `<artifacts>/<arch>/`.
    pub fn device_tree_overlay_dir(&self) -> PathBuf {
        Path::new(self.device_tree_dir).join(OVERLAY_SUBDIR)
    }

    /// Partition start offset in bytes.
    pub fn partition_offset_bytes(&self) -> u64 {
        self.partition_offset_sectors * SECTOR_SIZE
    }
}

static ROCKPI4: BoardProfile = BoardProfile {
    name: "rockpi4",
    arch: "arm64",
    family: "rockchip",
    kernel_args: ROCKCHIP_KERNEL_ARGS,
    partition_offset_sectors: ROCKCHIP_PARTITION_OFFSET_SECTORS,
    bootloader_write_offset_bytes: ROCKCHIP_UBOOT_OFFSET,
    device_tree_dir: "dtb/rockchip",
    // 4A and 4B share the same device tree.
    device_tree_blob: "dtb/rockchip/rk3399-rock-pi-4b.dtb",
    base_boot_files: &["dtb/rockchip/rk3399-rock-pi-4b.dtb", BOOT_SCRIPT],
};

static NANOPI_R4S: BoardProfile = BoardProfile {
    name: "nanopi-r4s",
    arch: "arm64",
    family: "rockchip",
    kernel_args: ROCKCHIP_KERNEL_ARGS,
    partition_offset_sectors: ROCKCHIP_PARTITION_OFFSET_SECTORS,
    bootloader_write_offset_bytes: ROCKCHIP_UBOOT_OFFSET,
    device_tree_dir: "dtb/rockchip",
    device_tree_blob: "dtb/rockchip/rk3399-nanopi-r4s.dtb",
    base_boot_files: &["dtb/rockchip/rk3399-nanopi-r4s.dtb", BOOT_SCRIPT],
};

static ROCK4CPLUS: BoardProfile = BoardProfile {
    name: "rock4cplus",
    arch: "arm64",
    family: "rockchip",
    kernel_args: ROCKCHIP_KERNEL_ARGS,
    partition_offset_sectors: ROCKCHIP_PARTITION_OFFSET_SECTORS,
    bootloader_write_offset_bytes: ROCKCHIP_UBOOT_OFFSET,
    device_tree_dir: "dtb/rockchip",
    device_tree_blob: "dtb/rockchip/rk3399-rock-4c-plus.dtb",
    base_boot_files: &["dtb/rockchip/rk3399-rock-4c-plus.dtb", BOOT_SCRIPT],
};

/// Board selection.
///
/// String forms match the board names used for artifact directories, so
/// `"nanopi-r4s".parse::<Board>()` works directly on user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
pub enum Board {
    /// Radxa ROCK Pi 4A/4B.
    #[strum(serialize = "rockpi4")]
    RockPi4,
    /// FriendlyElec NanoPi R4S.
    #[strum(serialize = "nanopi-r4s")]
    NanoPiR4s,
    /// Radxa ROCK 4C+.
    #[strum(serialize = "rock4cplus")]
    Rock4CPlus,
}

impl Board {
    /// The installation profile for this board.
    pub fn profile(self) -> &'static BoardProfile {
        match self {
            Board::RockPi4 => &ROCKPI4,
            Board::NanoPiR4s => &NANOPI_R4S,
            Board::Rock4CPlus => &ROCK4CPLUS,
        }
    }

    /// All registered board names, in declaration order.
    pub fn names() -> Vec<&'static str> {
        Board::iter().map(|b| b.profile().name).collect()
    }
}

/// Returned when a board name is not in the registry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown board '{0}'. Valid: rockpi4, nanopi-r4s, rock4cplus")]
pub struct UnknownBoardError(pub String);
