//! Ninefold - letters in nine-pixel rows
//!
//! A CLI tool that hides alphabetic messages in the pixels of a carrier image,
//! with or without a key image.

mod commands;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use commands::{CommandExecutor, DecodeCommand, EncodeCommand, PatternCommand, SeedCommand};

/// Ninefold - letters in nine-pixel rows
///
/// Hides letters in the first nine pixels of image rows. Without a key the
/// message can be read back by anyone who knows the scheme; with a key image
/// the values are masked by a keystream derived from that image.
#[derive(Parser)]
#[command(name = "ninefold")]
#[command(version)]
#[command(about = "Hide alphabetic messages in image pixels")]
#[command(long_about = None)]
struct Cli {
    /// Log library progress to stderr (RUST_LOG overrides)
    #[arg(long, global = true)]
    log: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Hide a message in an image
    Encode(EncodeCommand),

    /// Recover a message from an image
    Decode(DecodeCommand),

    /// Show the keystream seed derived from a key image
    Seed(SeedCommand),

    /// Write a checkerboard test carrier
    Pattern(PatternCommand),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.log)?;

    match &cli.command {
        Commands::Encode(cmd) => cmd.execute(),
        Commands::Decode(cmd) => cmd.execute(),
        Commands::Seed(cmd) => cmd.execute(),
        Commands::Pattern(cmd) => cmd.execute(),
    }
}

fn init_tracing(log: bool) -> Result<()> {
    let level = if log { "info" } else { "warn" };

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("ninefold={level}")))
        .context("Invalid log filter")?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to set subscriber")?;

    Ok(())
}
