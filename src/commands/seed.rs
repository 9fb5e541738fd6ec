//! Seed command - show the keystream seed of a key image.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use ninefold::{KeyImage, KeySource};

use super::CommandExecutor;

/// Print the SHA-256 seed derived from a key image.
///
/// The seed depends only on decoded RGB pixel values, so two files with the
/// same pixels (say a PNG and a BMP) print the same seed. Compare seeds to
/// check that both sides hold the same key image.
#[derive(Args, Debug)]
pub struct SeedCommand {
    /// Path to the key image
    #[arg(required = true)]
    pub key_path: PathBuf,
}

impl CommandExecutor for SeedCommand {
    fn execute(&self) -> Result<()> {
        let key = KeyImage::from_file(&self.key_path)
            .with_context(|| format!("Failed to load key image {}", self.key_path.display()))?;
        let (width, height) = key.dimensions();

        println!("Key: {} ({}x{})", self.key_path.display(), width, height);
        println!("Seed: {}", key.key_seed().to_hex());

        Ok(())
    }
}
