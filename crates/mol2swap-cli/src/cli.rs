use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "mol2swap - generate atom-type substitution variants of Tripos MOL2 ligands.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads used by --parallel generation.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write every substitution variant of a ligand as a separate MOL2 file.
    Substitute(SubstituteArgs),
    /// Summarize the atom types of a MOL2 file and check their numbering.
    Inspect(InspectArgs),
}

/// Arguments for the `substitute` subcommand.
#[derive(Args, Debug)]
pub struct SubstituteArgs {
    // --- Input ---
    /// Path to the input MOL2 file.
    #[arg(
        short,
        long,
        value_name = "PATH",
        required_unless_present = "ligand",
        conflicts_with = "ligand"
    )]
    pub input: Option<PathBuf>,

    /// Chemical component id to load from --ligand-dir instead of --input.
    #[arg(long, value_name = "ID", requires = "ligand_dir")]
    pub ligand: Option<String>,

    /// Directory holding downloaded ligands as <ID>_ideal.mol2 or <ID>.mol2.
    #[arg(long, value_name = "DIR")]
    pub ligand_dir: Option<PathBuf>,

    // --- Output ---
    /// Directory the variants are written to as <stem>_<index>.mol2.
    #[arg(short, long, required = true, value_name = "DIR")]
    pub output: PathBuf,

    /// Override the output file stem (defaults to the input stem or ligand id).
    #[arg(long, value_name = "STEM")]
    pub stem: Option<String>,

    // --- Substitution ---
    /// Chemical type of the atoms to replace (e.g. 'H').
    #[arg(long = "from", value_name = "TYPE")]
    pub from_type: Option<String>,

    /// Chemical type to write in their place (e.g. 'F').
    #[arg(long = "to", value_name = "TYPE")]
    pub to_type: Option<String>,

    /// Number of atoms replaced per variant. Accepts '2', '1-3' or '1,3'.
    /// Can be used multiple times. Defaults to every size.
    #[arg(short = 'k', long = "size", value_name = "SPEC")]
    pub sizes: Vec<String>,

    /// Stop after writing this many variants.
    #[arg(short = 'n', long, value_name = "INT")]
    pub max_variants: Option<usize>,

    /// Build variants in parallel before writing them.
    #[arg(long)]
    pub parallel: bool,

    // --- Configuration ---
    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S substitution.max-variants=50
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `inspect` subcommand.
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Path to the MOL2 file to inspect.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Report how many variants substituting this type would produce.
    #[arg(long = "from", value_name = "TYPE")]
    pub from_type: Option<String>,
}
