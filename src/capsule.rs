//! The build-info capsule: four immutable provenance text blocks.
//!
//! A capsule records how a native library build was configured — the
//! compiler invocations, include paths, and link libraries — as four
//! fully-formed, human-readable text blocks. It is populated exactly once
//! (by the template renderer or at compile time for the tool's own build)
//! and read verbatim afterwards. There is no write path after construction,
//! so a capsule is freely shareable across threads.

use std::fmt;

/// Selector for one of the four capsule blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    /// Timestamp, host, machine characteristics, install directory, arch label.
    General,
    /// C and Fortran compiler invocations with full flag strings.
    Compiler,
    /// Include-path flags.
    Flags,
    /// Linker invocations and the link-library list.
    Linker,
}

impl Section {
    /// All sections in their canonical output order.
    pub const ALL: [Section; 4] = [
        Section::General,
        Section::Compiler,
        Section::Flags,
        Section::Linker,
    ];
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Section::General => "general",
            Section::Compiler => "compiler",
            Section::Flags => "flags",
            Section::Linker => "linker",
        };
        f.write_str(name)
    }
}

/// An immutable record of build provenance for one library build.
///
/// Each field is a complete multi-line block terminated by the 41-hyphen
/// separator line. Fields are never empty: an absent parameter shows up as
/// an empty sub-line inside the block, not as a missing line or block.
/// Accessors return the stored text verbatim and cannot fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildInfoCapsule {
    general_info: String,
    compiler_info: String,
    compiler_flags_info: String,
    linker_info: String,
}

impl BuildInfoCapsule {
    /// Assemble a capsule from four pre-rendered blocks.
    ///
    /// Callers are expected to pass blocks produced by the template
    /// renderer; the capsule itself does not validate or reformat them.
    pub(crate) fn new(
        general_info: String,
        compiler_info: String,
        compiler_flags_info: String,
        linker_info: String,
    ) -> Self {
        Self {
            general_info,
            compiler_info,
            compiler_flags_info,
            linker_info,
        }
    }

    /// The general-info block: compile timestamp, build host, machine
    /// characteristics, install directory, and arch label.
    pub fn general_info(&self) -> &str {
        &self.general_info
    }

    /// The compiler block: C and Fortran compiler invocations.
    pub fn compiler_info(&self) -> &str {
        &self.compiler_info
    }

    /// The include-path block.
    pub fn compiler_flags_info(&self) -> &str {
        &self.compiler_flags_info
    }

    /// The linker block: linker invocations and the link-library list.
    pub fn linker_info(&self) -> &str {
        &self.linker_info
    }

    /// The block selected by `section`, verbatim.
    pub fn section(&self, section: Section) -> &str {
        match section {
            Section::General => self.general_info(),
            Section::Compiler => self.compiler_info(),
            Section::Flags => self.compiler_flags_info(),
            Section::Linker => self.linker_info(),
        }
    }

    /// All four blocks concatenated in canonical order.
    ///
    /// This is what a `--config`-style diagnostics query prints.
    pub fn full_text(&self) -> String {
        let mut out = String::with_capacity(
            self.general_info.len()
                + self.compiler_info.len()
                + self.compiler_flags_info.len()
                + self.linker_info.len(),
        );
        for section in Section::ALL {
            out.push_str(self.section(section));
        }
        out
    }
}
