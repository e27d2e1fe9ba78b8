//! Template rendering for capsule blocks.
//!
//! The block layout mirrors the machine-info headers emitted by numerical
//! library configure scripts: each block opens with a blank line, carries a
//! fixed set of `Using ...` lines, and is terminated by a 41-hyphen
//! separator line. The general block additionally opens with a separator
//! after the blank line.
//!
//! Rendering is pure string substitution. Parameter values are inserted
//! verbatim — including any leading or trailing whitespace they carry —
//! because downstream tooling compares these blocks byte-for-byte against
//! the output of the upstream configure step. An empty parameter renders as
//! an empty sub-line, never as an omitted line.

use crate::capsule::BuildInfoCapsule;
use crate::params::BuildParams;

/// The fixed separator rule delimiting each block: exactly 41 hyphens.
pub const SEPARATOR: &str = "-----------------------------------------";

fn push_separator(out: &mut String) {
    out.push_str(SEPARATOR);
    out.push('\n');
}

/// Render the general-info block.
///
/// Line order: blank, separator, compiled-on, machine characteristics,
/// directory, arch, separator. The compiled-on line keeps a single trailing
/// space after the host name, and the arch line keeps a trailing space when
/// the arch label is empty. Both come from the upstream header layout.
pub fn render_general(p: &BuildParams) -> String {
    let mut out = String::new();
    out.push('\n');
    push_separator(&mut out);
    out.push_str(&format!(
        "Libraries compiled on {} {} on {} \n",
        p.date, p.time, p.host
    ));
    out.push_str(&format!("Machine characteristics: {}\n", p.machine));
    out.push_str(&format!(
        "Using {} directory: {}\n",
        p.library_name, p.directory
    ));
    out.push_str(&format!("Using {} arch: {}\n", p.library_name, p.arch));
    push_separator(&mut out);
    out
}

/// Render the compiler block.
///
/// The two spaces between the compiler path and its flag string are part of
/// the format: the upstream generator concatenates the compiler template
/// part and the flags template part, each contributing one space.
pub fn render_compiler(p: &BuildParams) -> String {
    let mut out = String::new();
    out.push('\n');
    out.push_str(&format!(
        "Using C compiler: {}  {}\n",
        p.c_compiler, p.c_flags
    ));
    out.push_str(&format!(
        "Using Fortran compiler: {}  {}\n",
        p.fortran_compiler, p.fortran_flags
    ));
    push_separator(&mut out);
    out
}

/// Render the include-path block.
pub fn render_flags(p: &BuildParams) -> String {
    let mut out = String::new();
    out.push('\n');
    out.push_str(&format!("Using include paths: {}\n", p.include_paths));
    push_separator(&mut out);
    out
}

/// Render the linker block.
pub fn render_linker(p: &BuildParams) -> String {
    let mut out = String::new();
    out.push('\n');
    out.push_str(&format!("Using C linker: {}\n", p.c_linker));
    out.push_str(&format!("Using Fortran linker: {}\n", p.fortran_linker));
    out.push_str(&format!("Using libraries: {}\n", p.libraries));
    push_separator(&mut out);
    out
}

/// Render all four blocks from one parameter set.
///
/// Deterministic: the same parameters always produce byte-identical blocks.
pub fn render_capsule(p: &BuildParams) -> BuildInfoCapsule {
    BuildInfoCapsule::new(
        render_general(p),
        render_compiler(p),
        render_flags(p),
        render_linker(p),
    )
}
