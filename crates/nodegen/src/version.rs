// crates/nodegen/src/version.rs

//! Code format version tables.
//!
//! A Data Block declares the code format version its firmware was built
//! against. Each domain maps that overall version to its own internal
//! subversion; these tables are the single place where compatibility with a
//! runtime library release is declared. They are deliberately not shared.

use core::ops::RangeInclusive;

/// Overall code format versions this engine knows how to generate.
pub const KNOWN_VERSIONS: RangeInclusive<u16> = 1..=6;

/// Newest overall code format version.
pub const LATEST_VERSION: u16 = 6;

pub fn is_known(version: u16) -> bool {
    KNOWN_VERSIONS.contains(&version)
}

/// Datapool subversion.
///
/// - 3: safe/non-safe RAM placement uses START/STOP wrapper macros
/// - 4: linkage enum instead of remote flag, remote info always present
/// - 5: NVM scratch buffer, scaling macros
pub fn datapool(version: u16) -> Option<u16> {
    match version {
        1..=5 => Some(version),
        6 => Some(5),
        _ => None,
    }
}

/// Communication stack subversion.
///
/// - 2: multiplexed messages (mux definition/status slices)
/// - 3: mux status RAM placement
pub fn comm(version: u16) -> Option<u16> {
    match version {
        1..=3 => Some(version),
        4..=6 => Some(3),
        _ => None,
    }
}

/// CANopen manager configuration subversion.
///
/// - 2: factory reset sub-index per device, SYNC cycle/window in the manager record
pub fn canopen(version: u16) -> Option<u16> {
    match version {
        1..=5 => Some(1),
        6 => Some(2),
        _ => None,
    }
}

/// HALC configuration subversion. There is a single target contract so far.
pub fn halc(version: u16) -> Option<u16> {
    match version {
        0..=6 => Some(1),
        _ => None,
    }
}

/// Runtime-init wrapper subversion, follows the Datapool layout.
pub fn init(version: u16) -> Option<u16> {
    datapool(version)
}
