//! Build-parameter file module.
//!
//! A params file is the explicit input to capsule generation: it records the
//! compiler paths, flag strings, include paths, and link libraries of one
//! native library build, persisted as TOML so a configure step (or a human)
//! can hand the tool a complete parameter set.
//!
//! Unlike an optional settings file, a params file is required input for
//! `generate` and `render`, so a missing file is a hard error rather than a
//! silent fallback to defaults.

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::path::Path;
use time::OffsetDateTime;
use time::macros::format_description;

/// Default params file name in the working directory.
pub const DEFAULT_PARAMS_FILE: &str = "machineinfo.toml";

/// Fallback used when the build host cannot be determined.
const UNKNOWN_HOST: &str = "unknown";

/// One build's worth of provenance parameters.
///
/// Every field is plain text and substituted verbatim into the capsule
/// templates, whitespace included. Fields absent from the TOML file default
/// to the empty string, which renders as an empty sub-line in the capsule
/// rather than dropping the line.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct BuildParams {
    /// Library name used in the `Using <name> directory:` and arch lines.
    pub library_name: String,
    /// Build date, e.g. `2024-07-18`.
    pub date: String,
    /// Build time, e.g. `12:51:25`.
    pub time: String,
    /// Host the build ran on.
    pub host: String,
    /// Machine characteristics string (OS/kernel/arch).
    pub machine: String,
    /// Library install directory.
    pub directory: String,
    /// Build-variant (arch) label; frequently empty.
    pub arch: String,
    /// C compiler path.
    pub c_compiler: String,
    /// C compiler flag string.
    pub c_flags: String,
    /// Fortran compiler path.
    pub fortran_compiler: String,
    /// Fortran compiler flag string.
    pub fortran_flags: String,
    /// Include-path flags, space-separated `-I...` entries.
    pub include_paths: String,
    /// C linker path.
    pub c_linker: String,
    /// Fortran linker path.
    pub fortran_linker: String,
    /// Link-library flags, space-separated `-Wl,.../-L/-l` entries.
    pub libraries: String,
}

impl BuildParams {
    /// Load params from a TOML file.
    ///
    /// A missing file is a hard error: the params file is explicit input,
    /// and generating a capsule from an all-empty parameter set because of
    /// a typo'd path would be silently wrong.
    pub fn load(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents)
                .with_context(|| format!("failed to parse params file at {}", path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                bail!(
                    "params file not found at {} (run `machineinfo init` to create one)",
                    path.display()
                )
            }
            Err(e) => {
                Err(e).with_context(|| format!("failed to read params file at {}", path.display()))
            }
        }
    }

    /// Save params to a TOML file, creating parent directories if needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("failed to create params directory at {}", parent.display())
            })?;
        }
        let contents = toml::to_string_pretty(self).context("failed to serialize params")?;
        std::fs::write(path, &contents)
            .with_context(|| format!("failed to write params file at {}", path.display()))?;
        Ok(())
    }

    /// Build a starter parameter set from the running environment.
    ///
    /// Fills the timestamp, host, and machine fields; everything build-tool
    /// specific (compilers, flags, libraries) is left empty for the caller
    /// to fill in, since this tool does not probe toolchains.
    pub fn detect() -> Self {
        Self::detect_with(
            OffsetDateTime::now_utc(),
            std::env::var("HOSTNAME").ok(),
        )
    }

    /// Internal detector that accepts its inputs as parameters for testability.
    fn detect_with(now: OffsetDateTime, hostname: Option<String>) -> Self {
        let date_format = format_description!("[year]-[month]-[day]");
        let time_format = format_description!("[hour]:[minute]:[second]");

        // format() on these descriptions cannot fail for a valid OffsetDateTime.
        let date = now.format(&date_format).unwrap_or_default();
        let time = now.format(&time_format).unwrap_or_default();

        let host = hostname
            .filter(|h| !h.trim().is_empty())
            .unwrap_or_else(|| UNKNOWN_HOST.to_string());

        Self {
            date,
            time,
            host,
            machine: format!("{}-{}", std::env::consts::OS, std::env::consts::ARCH),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;
    use time::macros::datetime;

    /// Helper: save/restore an env var around a test.
    struct EnvGuard {
        key: String,
        original: Option<String>,
    }

    impl EnvGuard {
        fn new(key: &str) -> Self {
            Self {
                key: key.to_string(),
                original: std::env::var(key).ok(),
            }
        }

        fn set(&self, value: &str) {
            unsafe { std::env::set_var(&self.key, value) };
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            match &self.original {
                Some(v) => unsafe { std::env::set_var(&self.key, v) },
                None => unsafe { std::env::remove_var(&self.key) },
            }
        }
    }

    // -----------------------------------------------------------------------
    // Defaults
    // -----------------------------------------------------------------------

    #[test]
    fn test_default_params_all_empty() {
        let p = BuildParams::default();
        assert_eq!(p.library_name, "");
        assert_eq!(p.c_compiler, "");
        assert_eq!(p.libraries, "");
    }

    // -----------------------------------------------------------------------
    // load()
    // -----------------------------------------------------------------------

    #[test]
    fn test_load_missing_file_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nope.toml");
        let err = BuildParams::load(&path).unwrap_err();
        assert!(err.to_string().contains("params file not found"));
    }

    #[test]
    fn test_load_partial_file_defaults_missing_fields_to_empty() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("machineinfo.toml");
        std::fs::write(&path, "library_name = \"PETSc\"\nc_compiler = \"gcc\"\n").unwrap();

        let p = BuildParams::load(&path).unwrap();
        assert_eq!(p.library_name, "PETSc");
        assert_eq!(p.c_compiler, "gcc");
        assert_eq!(p.fortran_compiler, "");
        assert_eq!(p.arch, "");
    }

    #[test]
    fn test_load_malformed_file_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("machineinfo.toml");
        std::fs::write(&path, "library_name = [not toml").unwrap();

        let err = BuildParams::load(&path).unwrap_err();
        assert!(err.to_string().contains("failed to parse params file"));
    }

    // -----------------------------------------------------------------------
    // save() / round-trip
    // -----------------------------------------------------------------------

    #[test]
    fn test_save_creates_parent_directories() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("dir").join("params.toml");

        let p = BuildParams {
            library_name: "PETSc".to_string(),
            ..BuildParams::default()
        };
        p.save(&path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_save_load_round_trip_preserves_whitespace() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("params.toml");

        // Flag strings carry meaningful trailing whitespace.
        let p = BuildParams {
            library_name: "PETSc".to_string(),
            c_compiler: "gcc".to_string(),
            c_flags: "-fPIC -Wall  ".to_string(),
            arch: "".to_string(),
            ..BuildParams::default()
        };
        p.save(&path).unwrap();
        let loaded = BuildParams::load(&path).unwrap();
        assert_eq!(loaded, p);
    }

    // -----------------------------------------------------------------------
    // detect()
    // -----------------------------------------------------------------------

    #[test]
    fn test_detect_formats_date_and_time() {
        let now = datetime!(2024-07-18 12:51:25 UTC);
        let p = BuildParams::detect_with(now, Some("D2000".to_string()));
        assert_eq!(p.date, "2024-07-18");
        assert_eq!(p.time, "12:51:25");
        assert_eq!(p.host, "D2000");
    }

    #[test]
    fn test_detect_falls_back_to_unknown_host() {
        let now = datetime!(2024-07-18 12:51:25 UTC);
        assert_eq!(BuildParams::detect_with(now, None).host, "unknown");
        assert_eq!(
            BuildParams::detect_with(now, Some("  ".to_string())).host,
            "unknown"
        );
    }

    #[test]
    #[serial]
    fn test_detect_reads_hostname_from_env() {
        let guard = EnvGuard::new("HOSTNAME");
        guard.set("builder01");

        let p = BuildParams::detect();
        assert_eq!(p.host, "builder01");
        drop(guard);
    }

    #[test]
    fn test_detect_leaves_toolchain_fields_empty() {
        let now = datetime!(2024-07-18 12:51:25 UTC);
        let p = BuildParams::detect_with(now, None);
        assert_eq!(p.c_compiler, "");
        assert_eq!(p.fortran_compiler, "");
        assert_eq!(p.include_paths, "");
        assert_eq!(p.libraries, "");
        assert!(!p.machine.is_empty());
    }
}
