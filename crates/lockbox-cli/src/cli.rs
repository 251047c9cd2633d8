use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use lockbox_core::VERSION;

/// Lockbox - A local vault for passkey-encrypted secrets
#[derive(Parser)]
#[command(name = "lockbox")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the store file
    #[arg(short, long, global = true, env = "LOCKBOX_STORE")]
    pub store: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Arguments for the `register` command
#[derive(Args)]
pub struct RegisterArgs {
    /// Username for the new account
    #[arg(value_name = "USERNAME")]
    pub username: Option<String>,

    /// Disable interactive prompts
    #[arg(long)]
    pub no_input: bool,
}

/// Arguments for the `status` command
#[derive(Args)]
pub struct StatusArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `completions` command
#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_name = "SHELL")]
    pub shell: Shell,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Register a new account in the store
    Register(RegisterArgs),

    /// Start an interactive vault session
    Shell,

    /// Show the store location and account count
    Status(StatusArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}
