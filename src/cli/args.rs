use std::path::PathBuf;

use clap::Parser;

use crate::ShellCommand;

/// Process arguments
#[derive(Parser, Debug)]
#[clap(
    version,
    about = "In-memory notes with search, categories, colors, pins and an archive"
)]
pub struct Cli {
    /// Path to the configuration file
    #[clap(short = 'c', long, value_parser)]
    pub config: Option<PathBuf>,

    /// Verbose output mode
    #[clap(short, long)]
    pub verbose: bool,

    /// Disable colored output
    #[clap(long)]
    pub no_color: bool,

    /// Run these shell commands and exit instead of reading stdin
    #[clap(short = 'e', long = "exec", value_name = "COMMAND")]
    pub exec: Vec<String>,
}

/// One line typed into the shell
#[derive(Parser, Debug)]
#[clap(no_binary_name = true, disable_version_flag = true)]
pub struct ShellInput {
    #[clap(subcommand)]
    pub command: ShellCommand,
}
