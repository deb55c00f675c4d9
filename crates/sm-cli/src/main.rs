//! Stonemason CLI - a forward-only SQL schema migration tool

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use cli::Cli;
use commands::common::ExitCode;
use commands::{init, new, status, up, verify};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let result = match &cli.command {
        cli::Commands::Init(args) => init::execute(args).await,
        cli::Commands::New(args) => new::execute(args, &cli.global).await,
        cli::Commands::Up(args) => up::execute(args, &cli.global).await,
        cli::Commands::Status(args) => status::execute(args, &cli.global).await,
        cli::Commands::Verify(args) => verify::execute(args, &cli.global).await,
    };

    if let Err(err) = result {
        if let Some(ExitCode(code)) = err.downcast_ref::<ExitCode>() {
            std::process::exit(*code);
        }
        return Err(err);
    }
    Ok(())
}
