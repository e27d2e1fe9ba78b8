use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::process;

use machineinfo_cli::capsule::{BuildInfoCapsule, Section};
use machineinfo_cli::emit::{self, EmitFormat};
use machineinfo_cli::output;
use machineinfo_cli::params::{BuildParams, DEFAULT_PARAMS_FILE};
use machineinfo_cli::selfinfo;
use machineinfo_cli::template::render_capsule;

/// Build-provenance capsules for native library builds: generate embeddable
/// machine-info blocks from a parameter file, and print the capsule this
/// binary was built with.
#[derive(Parser, Debug)]
#[command(
    name = "machineinfo",
    version,
    about,
    after_help = "Examples:\n  machineinfo init\n  machineinfo generate --format c-header -o petscmachineinfo.h\n  machineinfo render --section compiler\n  machineinfo show"
)]
struct Cli {
    /// Print detail lines about what the tool is doing.
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a starter params file with timestamp/host/machine pre-filled.
    Init {
        /// Where to write the params file.
        #[arg(long, default_value = DEFAULT_PARAMS_FILE)]
        params: PathBuf,
        /// Overwrite an existing params file.
        #[arg(long)]
        force: bool,
    },

    /// Render a capsule from a params file and emit it as text or source.
    Generate {
        /// Params file to render.
        #[arg(long, default_value = DEFAULT_PARAMS_FILE)]
        params: PathBuf,
        /// Output shape.
        #[arg(long, value_enum, default_value = "text")]
        format: FormatArg,
        /// Output file; stdout when omitted.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print one capsule block (or all four) from a params file, verbatim.
    Render {
        /// Params file to render.
        #[arg(long, default_value = DEFAULT_PARAMS_FILE)]
        params: PathBuf,
        /// Block to print; all four in order when omitted.
        #[arg(long, value_enum)]
        section: Option<SectionArg>,
    },

    /// Print the capsule this binary was built with.
    Show {
        /// Block to print; all four in order when omitted.
        #[arg(long, value_enum)]
        section: Option<SectionArg>,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum SectionArg {
    General,
    Compiler,
    Flags,
    Linker,
}

impl From<SectionArg> for Section {
    fn from(arg: SectionArg) -> Self {
        match arg {
            SectionArg::General => Section::General,
            SectionArg::Compiler => Section::Compiler,
            SectionArg::Flags => Section::Flags,
            SectionArg::Linker => Section::Linker,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
enum FormatArg {
    #[default]
    Text,
    CHeader,
    Rust,
}

impl From<FormatArg> for EmitFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => EmitFormat::Text,
            FormatArg::CHeader => EmitFormat::CHeader,
            FormatArg::Rust => EmitFormat::Rust,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    output::set_verbose(cli.verbose);

    let result = match cli.command {
        Command::Init { params, force } => run_init(&params, force),
        Command::Generate {
            params,
            format,
            output,
        } => run_generate(&params, format.into(), output.as_deref()),
        Command::Render { params, section } => run_render(&params, section.map(Into::into)),
        Command::Show { section } => run_show(section.map(Into::into)),
    };

    if let Err(e) = result {
        eprintln!("[machineinfo] error: {e:#}");
        process::exit(1);
    }
}

fn run_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "params file already exists at {} (use --force to overwrite)",
            path.display()
        );
    }

    let params = BuildParams::detect();
    params.save(path)?;
    output::success("Wrote", &path.display().to_string());
    output::note("toolchain fields (compilers, flags, libraries) are left empty; fill them in");
    Ok(())
}

fn run_generate(params_path: &Path, format: EmitFormat, out_path: Option<&Path>) -> Result<()> {
    let params = BuildParams::load(params_path)?;
    output::detail(&format!("params: {}", params_path.display()));

    let capsule = render_capsule(&params);
    let emitted = emit::emit(&capsule, &params.library_name, format);

    match out_path {
        Some(path) => {
            std::fs::write(path, &emitted)
                .with_context(|| format!("failed to write output file at {}", path.display()))?;
            output::success("Wrote", &path.display().to_string());
        }
        None => print!("{emitted}"),
    }
    Ok(())
}

fn run_render(params_path: &Path, section: Option<Section>) -> Result<()> {
    let params = BuildParams::load(params_path)?;
    print_sections(&render_capsule(&params), section);
    Ok(())
}

fn run_show(section: Option<Section>) -> Result<()> {
    print_sections(selfinfo::capsule(), section);
    Ok(())
}

/// Print the selected block, or all four in canonical order, verbatim.
fn print_sections(capsule: &BuildInfoCapsule, section: Option<Section>) {
    match section {
        Some(s) => print!("{}", capsule.section(s)),
        None => print!("{}", capsule.full_text()),
    }
}
