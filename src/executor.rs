//! Board install executor.
//!
//! Runs the install pipeline for one board against one target:
//!
//! 1. Open the raw disk (`O_RDWR | O_CLOEXEC`)
//! 2. Read `<artifacts>/<arch>/u-boot/<board>/u-boot-<family>.bin`
//! 3. Write it at the board's fixed raw offset
//! 4. Sync the disk
//! 5. Append `overlays=...` to `boot.env` if overlays were requested
//! 6. Compute the boot file plan
//! 7. Copy each planned file into `<mount>/boot/EFI/`
//!
//! # Invariants
//!
//! - The bootloader is read fully before the disk is written, so a missing
//!   artifact leaves the disk untouched.
//! - The sync in step 4 completes before anything under the mount prefix is
//!   touched. On loop devices an unsynced write can be lost when the device
//!   is detached.
//! - The disk handle is owned by `install` and closed on every exit path.
//!
//! # Failure Modes
//!
//! The first failing step aborts the attempt. Earlier effects stay in place:
//! bootloader bytes on disk, the env line, files already copied. Recovery is
//! a full re-run.

use std::fs::{self, DirBuilder, File, OpenOptions};
use std::io::{self, Write};
use std::os::unix::fs::{DirBuilderExt, FileExt, OpenOptionsExt};
use std::path::{Path, PathBuf};

use nix::libc;
use tracing::{debug, info};

use crate::board::BoardProfile;
use crate::error::{InstallError, Result};
use crate::plan;
use crate::request::{InstallRequest, overlays_env_line};
use crate::step::InstallStep;

/// Positional write access to a raw disk.
///
/// Implemented for [`File`]; tests substitute recorders to observe ordering.
pub trait RawDisk {
    /// Write `buf` at absolute `offset`, returning the bytes accepted.
    fn write_at(&mut self, buf: &[u8], offset: u64) -> io::Result<usize>;

    /// Force all preceding writes to stable storage.
    fn sync(&mut self) -> io::Result<()>;
}

impl RawDisk for File {
    fn write_at(&mut self, buf: &[u8], offset: u64) -> io::Result<usize> {
        FileExt::write_at(self, buf, offset)
    }

    fn sync(&mut self) -> io::Result<()> {
        self.sync_all()
    }
}

/// What a successful install did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallReport {
    pub board: &'static str,
    /// Size of the bootloader written to the raw disk.
    pub bootloader_bytes: usize,
    /// Whether an `overlays=` line was appended to `boot.env`.
    pub env_updated: bool,
    /// Destination paths of the copied boot files, in copy order.
    pub copied: Vec<PathBuf>,
}

/// Installs the bootloader and boot assets for one board.
#[derive(Debug, Clone, Copy)]
pub struct InstallExecutor<'a> {
    profile: &'a BoardProfile,
}

impl<'a> InstallExecutor<'a> {
    pub fn new(profile: &'a BoardProfile) -> Self {
        Self { profile }
    }

    pub fn profile(&self) -> &'a BoardProfile {
        self.profile
    }

    /// Run the full pipeline, opening `request.install_disk` first.
    pub fn install(&self, request: &InstallRequest) -> Result<InstallReport> {
        enter(InstallStep::OpenDisk);
        let mut disk = open_disk(&request.install_disk)?;

        // `disk` is dropped (closed) on return, success or not
        self.install_on(&mut disk, request)
    }

    /// Run steps 2 onwards against an already open disk.
    pub fn install_on<D: RawDisk>(
        &self,
        disk: &mut D,
        request: &InstallRequest,
    ) -> Result<InstallReport> {
        let profile = self.profile;
        info!(
            board = profile.name,
            disk = %request.install_disk.display(),
            overlays = request.overlays.len(),
            "Installing bootloader"
        );

        enter(InstallStep::LoadBootloader);
        let artifact = request
            .artifacts_path
            .join(profile.bootloader_artifact_relative_path());
        let uboot = fs::read(&artifact).map_err(|source| InstallError::ArtifactRead {
            path: artifact.clone(),
            source,
        })?;
        debug!("Loaded {} bytes from {}", uboot.len(), artifact.display());

        enter(InstallStep::WriteBootloader);
        write_all_at(
            disk,
            &uboot,
            profile.bootloader_write_offset_bytes,
            &request.install_disk,
        )?;

        enter(InstallStep::SyncDisk);
        disk.sync().map_err(|source| InstallError::Sync {
            path: request.install_disk.clone(),
            source,
        })?;

        enter(InstallStep::WriteEnv);
        let env_updated = if request.overlays.is_empty() {
            debug!("No overlays requested, leaving boot.env untouched");
            false
        } else {
            append_overlays_env(&request.boot_env_path(), &request.overlays)?;
            true
        };

        enter(InstallStep::PlanAssets);
        let files = plan::plan(profile, &request.overlays);
        debug!("{}", plan::summary(profile, &files));

        enter(InstallStep::CopyAssets);
        let src_root = request.asset_root(profile.arch);
        let dst_root = request.esp_root();
        let mut copied = Vec::with_capacity(files.len());
        for file in &files {
            let src = src_root.join(file);
            let dst = dst_root.join(file);
            copy_boot_file(&src, &dst)?;
            copied.push(dst);
        }

        enter(InstallStep::Completed);
        info!(
            board = profile.name,
            files = copied.len(),
            "Bootloader and boot files installed"
        );

        Ok(InstallReport {
            board: profile.name,
            bootloader_bytes: uboot.len(),
            env_updated,
            copied,
        })
    }
}

/// Install `profile` according to `request`.
pub fn install(profile: &BoardProfile, request: &InstallRequest) -> Result<InstallReport> {
    InstallExecutor::new(profile).install(request)
}

fn enter(step: InstallStep) {
    debug!(step = step.order(), "{}", step);
}

/// Open the target disk read/write without truncating or creating it.
fn open_disk(path: &Path) -> Result<File> {
    OpenOptions::new()
        .read(true)
        .write(true)
        .custom_flags(libc::O_CLOEXEC)
        .open(path)
        .map_err(|source| InstallError::DeviceOpen {
            path: path.to_path_buf(),
            source,
        })
}

/// Write the whole buffer at `offset`.
///
/// A write that accepts zero bytes before the buffer is exhausted is reported
/// as a partial write, together with how far it got.
fn write_all_at<D: RawDisk>(disk: &mut D, buf: &[u8], offset: u64, path: &Path) -> Result<()> {
    let mut written = 0;
    while written < buf.len() {
        match disk.write_at(&buf[written..], offset + written as u64) {
            Ok(0) => {
                return Err(InstallError::PartialWrite {
                    path: path.to_path_buf(),
                    offset,
                    written,
                    expected: buf.len(),
                });
            }
            Ok(n) => written += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(source) => {
                return Err(InstallError::Write {
                    path: path.to_path_buf(),
                    offset,
                    source,
                });
            }
        }
    }
    debug!("Wrote {} bytes at offset {}", written, offset);
    Ok(())
}

/// Append one `overlays=` line to the boot environment, creating the file.
fn append_overlays_env(path: &Path, overlays: &[String]) -> Result<()> {
    let env_err = |source| InstallError::EnvWrite {
        path: path.to_path_buf(),
        source,
    };

    let mut env = OpenOptions::new()
        .append(true)
        .create(true)
        .mode(0o644)
        .open(path)
        .map_err(env_err)?;

    let line = overlays_env_line(overlays);
    env.write_all(line.as_bytes()).map_err(env_err)?;
    info!("Appended {} to {}", line.trim_end(), path.display());
    Ok(())
}

/// Create the destination directory tree and copy one file byte for byte.
fn copy_boot_file(src: &Path, dst: &Path) -> Result<()> {
    if let Some(dir) = dst.parent() {
        DirBuilder::new()
            .recursive(true)
            .mode(0o755)
            .create(dir)
            .map_err(|source| InstallError::DirectoryCreate {
                path: dir.to_path_buf(),
                source,
            })?;
    }

    fs::copy(src, dst).map_err(|source| InstallError::Copy {
        src: src.to_path_buf(),
        dst: dst.to_path_buf(),
        source,
    })?;
    debug!("Copied {} -> {}", src.display(), dst.display());
    Ok(())
}
