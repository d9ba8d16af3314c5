mod cmd;
mod logging;

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;
use vaultmerge_core::order::OrderPolicy;

#[derive(Debug, Parser)]
#[command(
    name = "vaultmerge",
    version,
    about = "Merge a markdown notes vault into a single source file for LLM tools"
)]
pub struct Cli {
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[arg(long, global = true)]
    profile: Option<String>,

    /// Show debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Merge a vault into one markdown file
    Merge(MergeArgs),

    /// Report unresolved and ambiguous references without writing anything
    Check(CheckArgs),

    /// Validate configuration and print resolved settings
    Doctor,

    /// Print a shell completion script
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Options shared by every command that reads a vault.
#[derive(Debug, Args)]
pub struct VaultArgs {
    /// Vault directory, or the name of a vault inside the profile's vaults_dir
    #[arg(long)]
    pub vault: String,

    /// Order of notes: hierarchical, folders-first, alphabetical, modified or links
    /// (defaults to the config value)
    #[arg(long, value_name = "POLICY")]
    pub order: Option<OrderPolicy>,

    /// Vault-relative folder to leave out (repeatable)
    #[arg(long, value_name = "FOLDER")]
    pub exclude: Vec<PathBuf>,
}

#[derive(Debug, Args)]
pub struct MergeArgs {
    #[command(flatten)]
    pub vault: VaultArgs,

    /// Output file (defaults to `<vault name>.md` in the current directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Extra instructions for the reader, or `@FILE` to read them from a file
    #[arg(long, value_name = "TEXT|@FILE")]
    pub instructions: Option<String>,

    /// Leave out the closing table of contents
    #[arg(long)]
    pub no_toc: bool,

    /// Keep frontmatter as a `Metadata:` list at the top of each note
    #[arg(long)]
    pub include_metadata: bool,

    /// Exit non-zero if the merge produced any warnings
    #[arg(long)]
    pub strict: bool,
}

#[derive(Debug, Args)]
pub struct CheckArgs {
    #[command(flatten)]
    pub vault: VaultArgs,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,

    /// Shorthand for `--output json`
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

fn main() {
    let cli = Cli::parse();
    let config = cli.config.as_deref();
    let profile = cli.profile.as_deref();

    match cli.command {
        Commands::Merge(args) => cmd::merge::run(config, profile, cli.verbose, args),
        Commands::Check(args) => cmd::check::run(config, profile, cli.verbose, args),
        Commands::Doctor => cmd::doctor::run(config, profile, cli.verbose),
        Commands::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "vaultmerge",
                &mut std::io::stdout(),
            );
        }
    }

    logging::flush();
}
