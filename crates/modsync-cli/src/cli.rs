//! CLI argument parsing using clap.

use clap::Parser;
use clap::Subcommand;
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "modsync")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Replace the configured folders of a directory with the archive's copies
    Update(UpdateArgs),
    /// List the archive entries an update would restore
    List(ListArgs),
    /// Generate shell completions
    Completion(CompletionArgs),
}

impl Commands {
    /// Operation name used in JSON output.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Update(_) => "update",
            Self::List(_) => "list",
            Self::Completion(_) => "completion",
        }
    }
}

#[derive(clap::Args)]
pub struct UpdateArgs {
    /// Directory whose folders are replaced
    #[arg(value_name = "DESTINATION")]
    pub destination: PathBuf,

    /// Path to the ZIP archive
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    /// Folder to restore (repeatable, replaces the default set)
    #[arg(short = 'f', long = "folder", value_name = "NAME")]
    pub folders: Vec<String>,
}

#[derive(clap::Args)]
pub struct ListArgs {
    /// Path to the ZIP archive
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    /// Folder to match (repeatable, replaces the default set)
    #[arg(short = 'f', long = "folder", value_name = "NAME")]
    pub folders: Vec<String>,

    /// Show type, mode and size for each entry
    #[arg(short, long)]
    pub long: bool,
}

#[derive(clap::Args)]
pub struct CompletionArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,
}
