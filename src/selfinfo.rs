//! The tool's own build capsule.
//!
//! `machineinfo show` prints the same four-block capsule for this binary
//! that `generate` produces for a native library build, with parameters
//! captured at compile time by build.rs. The capsule is rendered once on
//! first access and never mutated afterwards.

use std::sync::LazyLock;

use crate::capsule::BuildInfoCapsule;
use crate::params::BuildParams;
use crate::template::render_capsule;

static SELF_CAPSULE: LazyLock<BuildInfoCapsule> = LazyLock::new(|| render_capsule(&self_params()));

/// Compile-time parameters for this binary's own build.
///
/// Rust builds have no Fortran toolchain and no separate linker driver, so
/// those fields render as empty sub-lines, matching the capsule invariant
/// that an absent value never drops a line.
fn self_params() -> BuildParams {
    BuildParams {
        library_name: env!("CARGO_PKG_NAME").to_string(),
        date: env!("BUILD_DATE").to_string(),
        time: env!("BUILD_TIME").to_string(),
        host: env!("BUILD_MACHINE").to_string(),
        machine: env!("BUILD_HOST_TRIPLE").to_string(),
        directory: env!("CARGO_MANIFEST_DIR").to_string(),
        arch: env!("TARGET").to_string(),
        c_compiler: env!("BUILD_RUSTC").to_string(),
        c_flags: format!(
            "-C opt-level={} ({} profile)",
            env!("BUILD_OPT_LEVEL"),
            env!("BUILD_PROFILE")
        ),
        c_linker: env!("BUILD_RUSTC").to_string(),
        ..BuildParams::default()
    }
}

/// The embedded capsule for this binary.
pub fn capsule() -> &'static BuildInfoCapsule {
    &SELF_CAPSULE
}
