// build.rs — capture compile-time provenance for the tool's own capsule.
//
// Cargo provides build scripts with the target/host triples, profile, and
// the rustc path in env vars. We re-export them as `cargo:rustc-env=...` so
// runtime code can embed them via `env!(...)` and `machineinfo show` can
// print the tool's own build capsule. The build timestamp and build host
// are captured here as well, since they only exist at build time.

use time::OffsetDateTime;
use time::macros::format_description;

fn main() {
    // Cargo always sets these for build scripts. Read them directly — they
    // are the canonical values for the compilation in progress.
    let target = std::env::var("TARGET")
        .expect("TARGET env var not set by Cargo. This should never happen in a normal build.");
    let host = std::env::var("HOST")
        .expect("HOST env var not set by Cargo. This should never happen in a normal build.");

    println!("cargo:rustc-env=TARGET={target}");
    println!("cargo:rustc-env=BUILD_HOST_TRIPLE={host}");

    for (cargo_var, exported) in [
        ("PROFILE", "BUILD_PROFILE"),
        ("OPT_LEVEL", "BUILD_OPT_LEVEL"),
        ("RUSTC", "BUILD_RUSTC"),
    ] {
        let value = std::env::var(cargo_var).unwrap_or_default();
        println!("cargo:rustc-env={exported}={value}");
    }

    let now = OffsetDateTime::now_utc();
    let date = now
        .format(format_description!("[year]-[month]-[day]"))
        .unwrap_or_default();
    let time = now
        .format(format_description!("[hour]:[minute]:[second]"))
        .unwrap_or_default();
    println!("cargo:rustc-env=BUILD_DATE={date}");
    println!("cargo:rustc-env=BUILD_TIME={time}");

    // Best effort: not every environment exports a hostname.
    let build_host = std::env::var("HOSTNAME").unwrap_or_else(|_| "unknown".to_string());
    println!("cargo:rustc-env=BUILD_MACHINE={build_host}");

    println!("cargo:rerun-if-changed=build.rs");
}
