//! Lockbox CLI - A local vault for passkey-encrypted secrets
//!
//! This is the command-line interface for Lockbox. It wraps the core
//! library in a one-shot `register` command and an interactive `shell`
//! for login, store, and retrieve.

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod helpers;
mod ui;

use clap::Parser;
use lockbox_core::VERSION;

use crate::app::AppContext;
use crate::cli::{Cli, Commands};
use crate::commands::{misc, register, shell, status};
use crate::ui::print_error;

fn main() {
    let cli = Cli::parse();
    let ctx = AppContext::new(&cli);

    if let Err(e) = run(&ctx, &cli) {
        print_error(&format!("{}", e));
        std::process::exit(1);
    }
}

fn run(ctx: &AppContext, cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Some(Commands::Register(args)) => {
            register::handle_register(ctx, args)?;
        }
        Some(Commands::Shell) => {
            shell::handle_shell(ctx)?;
        }
        Some(Commands::Status(args)) => {
            status::handle_status(ctx, args)?;
        }
        Some(Commands::Completions(args)) => {
            misc::handle_completions(args.shell)?;
        }
        None => {
            println!("Lockbox v{}", VERSION);
            println!("\nQuickstart:");
            println!("  lockbox register alice");
            println!("  lockbox shell");
            println!("  lockbox status");
            println!("\nRun `lockbox --help` for full usage.");
        }
    }

    Ok(())
}
