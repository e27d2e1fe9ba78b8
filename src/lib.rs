//! Library entrypoint for machineinfo-cli.
//!
//! The primary interface is the `machineinfo` binary. This lib target exists
//! to expose internal modules to integration tests and to programs that want
//! to render or embed capsules directly.

pub mod capsule;
pub mod emit;
pub mod output;
pub mod params;
pub mod selfinfo;
pub mod template;
