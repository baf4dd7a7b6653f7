//! Property-Based Tests for the boot asset plan
//!
//! These tests verify:
//! - Base boot files always lead the plan, unchanged
//! - One overlay blob per requested name, in request order
//! - Overlay string parsing preserves order and duplicates

use proptest::prelude::*;
use std::path::PathBuf;

use sbc_installer::request::overlays_env_line;
use sbc_installer::{Board, parse_overlay_names, plan, resolve};

/// Strategy for generating valid Board variants
fn board_strategy() -> impl Strategy<Value = Board> {
    prop_oneof![
        Just(Board::RockPi4),
        Just(Board::NanoPiR4s),
        Just(Board::Rock4CPlus),
    ]
}

/// Overlay names as they appear in practice: no whitespace, non-empty
fn overlay_names_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z0-9][a-z0-9_-]{0,15}", 0..8)
}

proptest! {
    /// plan = base files ++ one .dtbo per overlay, in order
    #[test]
    fn plan_is_base_then_overlays(board in board_strategy(), names in overlay_names_strategy()) {
        let profile = board.profile();
        let files = plan(profile, &names);

        prop_assert_eq!(files.len(), profile.base_boot_files.len() + names.len());

        let (base, overlays) = files.split_at(profile.base_boot_files.len());
        let expected_base: Vec<PathBuf> =
            profile.base_boot_files.iter().map(PathBuf::from).collect();
        prop_assert_eq!(base, expected_base.as_slice());

        for (file, name) in overlays.iter().zip(&names) {
            let expected = profile.device_tree_overlay_dir().join(format!("{}.dtbo", name));
            prop_assert_eq!(file, &expected);
        }
    }

    /// Base files never depend on the requested overlays
    #[test]
    fn base_files_independent_of_overlays(board in board_strategy(), names in overlay_names_strategy()) {
        let profile = board.profile();
        let with = plan(profile, &names);
        let without = plan::<&str>(profile, &[]);
        prop_assert_eq!(&with[..without.len()], without.as_slice());
    }

    /// Joining with arbitrary whitespace and splitting again is lossless
    #[test]
    fn overlay_parsing_preserves_order(names in overlay_names_strategy(), sep in "[ \t\n]{1,3}") {
        let raw = format!("{sep}{}{sep}", names.join(sep.as_str()));
        prop_assert_eq!(parse_overlay_names(&raw), names);
    }

    /// The env line is one line holding every name once per request
    #[test]
    fn env_line_is_single_line(names in prop::collection::vec("[a-z0-9-]{1,12}", 1..8)) {
        let line = overlays_env_line(&names);
        prop_assert!(line.starts_with("overlays="));
        prop_assert!(line.ends_with('\n'));
        prop_assert_eq!(line.matches('\n').count(), 1);
        prop_assert_eq!(parse_overlay_names(&line["overlays=".len()..]), names);
    }

    /// Options never vary with anything but the board
    #[test]
    fn options_match_profile(board in board_strategy()) {
        let profile = board.profile();
        let options = resolve(profile);
        prop_assert_eq!(options.name.as_str(), profile.name);
        prop_assert_eq!(options.partition_offset_sectors, profile.partition_offset_sectors);
        prop_assert_eq!(options.kernel_args.len(), profile.kernel_args.len());
    }
}
