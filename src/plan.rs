//! Boot asset plan.
//!
//! Computes which files end up in the boot partition. Pure logic: no I/O and
//! no validation that requested overlays exist. A missing overlay blob is
//! reported later, when the executor tries to copy it.

use std::path::PathBuf;

use crate::board::BoardProfile;

/// Ordered list of boot files to install, relative to `<artifacts>/<arch>/`.
///
/// The board's base files come first, followed by one
/// `<overlay dir>/<name>.dtbo` per requested overlay, in request order.
/// Duplicate overlay names produce duplicate entries.
pub fn plan<S: AsRef<str>>(profile: &BoardProfile, overlays: &[S]) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = profile.base_boot_files.iter().map(PathBuf::from).collect();

    let overlay_dir = profile.device_tree_overlay_dir();
    files.extend(
        overlays
            .iter()
            .map(|name| overlay_dir.join(format!("{}.dtbo", name.as_ref()))),
    );

    files
}

/// One-line-per-file rendering of a plan, for logs and the CLI.
pub fn summary(profile: &BoardProfile, files: &[PathBuf]) -> String {
    let mut lines = vec![format!("Boot files for {} ({}):", profile.name, files.len())];
    for (i, file) in files.iter().enumerate() {
        lines.push(format!("  {}. {}", i + 1, file.display()));
    }
    lines.join("\n")
}
