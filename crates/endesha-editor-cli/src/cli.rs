use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    /// Config file to use instead of ~/.config/endesha-editor/config.toml
    #[arg(long = "config", global = true)]
    pub config_path: Option<PathBuf>,

    #[arg(short = 'v', long = "verbose", global = true, default_value = "false")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the Markdown projection of a stored answer
    Render { record: PathBuf },
    /// Report answers whose content does not decode or whose Markdown is stale
    Check {
        #[arg(required = true)]
        records: Vec<PathBuf>,
    },
    /// Regenerate the stored Markdown of an answer from its content
    Sync {
        record: PathBuf,
        #[arg(long = "dry-run", default_value = "false")]
        dry_run: bool,
    },
    /// Print the HTML preview of an answer
    Preview { record: PathBuf },
}
