//! Emission backends for rendered capsules.
//!
//! A generated capsule is embedded in the consuming program's static data,
//! so besides plain text the tool emits source files: a C header of four
//! `static const char *` constants (the shape the upstream configure step
//! produces) and the equivalent Rust module of `pub static` string slices.
//! Both write one string literal per capsule line so diffs against a
//! regenerated file stay line-oriented.

use crate::capsule::{BuildInfoCapsule, Section};

/// Output shape for `generate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmitFormat {
    /// The four blocks verbatim, concatenated.
    Text,
    /// C header with four `static const char *` constants.
    CHeader,
    /// Rust source with four `pub static` string constants.
    Rust,
}

/// Per-section constant name suffixes, shared by both source backends.
fn section_suffix(section: Section) -> &'static str {
    match section {
        Section::General => "machineinfo",
        Section::Compiler => "compilerinfo",
        Section::Flags => "compilerflagsinfo",
        Section::Linker => "linkerinfo",
    }
}

fn rust_section_suffix(section: Section) -> &'static str {
    match section {
        Section::General => "MACHINE_INFO",
        Section::Compiler => "COMPILER_INFO",
        Section::Flags => "COMPILER_FLAGS_INFO",
        Section::Linker => "LINKER_INFO",
    }
}

/// Lowercase the library name to a C identifier fragment, dropping anything
/// that is not alphanumeric or underscore. An empty result is fine: constant
/// names then carry no library prefix.
fn ident_fragment(library_name: &str) -> String {
    library_name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Escape one capsule line (without its newline) for a double-quoted
/// C or Rust string literal.
fn escape_literal(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    for c in line.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            _ => out.push(c),
        }
    }
    out
}

/// Emit `capsule` in the requested format.
///
/// `library_name` only affects the constant names in the source backends;
/// the block text is embedded exactly as rendered.
pub fn emit(capsule: &BuildInfoCapsule, library_name: &str, format: EmitFormat) -> String {
    match format {
        EmitFormat::Text => capsule.full_text(),
        EmitFormat::CHeader => emit_c_header(capsule, library_name),
        EmitFormat::Rust => emit_rust(capsule, library_name),
    }
}

/// C header backend. Layout matches the upstream generated header: the
/// opening `"\n"` literal sits on the declaration line and every following
/// capsule line becomes its own literal.
fn emit_c_header(capsule: &BuildInfoCapsule, library_name: &str) -> String {
    let prefix = ident_fragment(library_name);
    let mut out = String::new();
    for section in Section::ALL {
        let name = format!("{prefix}{}", section_suffix(section));
        out.push_str(&format!("static const char *{name} = "));
        push_c_literals(&mut out, capsule.section(section));
        out.push_str(";\n");
    }
    out
}

fn push_c_literals(out: &mut String, block: &str) {
    let mut first = true;
    for line in block.lines() {
        if !first {
            out.push('\n');
        }
        first = false;
        out.push_str(&format!("\"{}\\n\"", escape_literal(line)));
    }
}

/// Rust backend: one `pub static` per section, lines joined with `concat!`.
fn emit_rust(capsule: &BuildInfoCapsule, library_name: &str) -> String {
    let prefix = ident_fragment(library_name).to_ascii_uppercase();
    let mut out = String::new();
    out.push_str("// Generated by machineinfo; do not edit.\n");
    for section in Section::ALL {
        let name = if prefix.is_empty() {
            rust_section_suffix(section).to_string()
        } else {
            format!("{prefix}_{}", rust_section_suffix(section))
        };
        out.push('\n');
        out.push_str(&format!("pub static {name}: &str = concat!(\n"));
        for line in capsule.section(section).lines() {
            out.push_str(&format!("    \"{}\\n\",\n", escape_literal(line)));
        }
        out.push_str(");\n");
    }
    out
}
