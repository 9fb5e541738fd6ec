//! Pattern command - write a checkerboard test carrier.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;

use ninefold::StegoImage;

use super::CommandExecutor;

/// Write a checkerboard/gradient carrier image for trying things out.
#[derive(Args, Debug)]
pub struct PatternCommand {
    /// Output image path
    #[arg(short, long, default_value = "carrier.png")]
    pub output: PathBuf,

    /// Width in pixels
    #[arg(long, default_value = "200")]
    pub width: u32,

    /// Height in pixels
    #[arg(long, default_value = "200")]
    pub height: u32,
}

impl CommandExecutor for PatternCommand {
    fn execute(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            bail!("Width and height must be positive");
        }

        let pattern = StegoImage::test_pattern(self.width, self.height);
        pattern
            .save(&self.output)
            .with_context(|| format!("Failed to save {}", self.output.display()))?;

        println!(
            "Carrier written to {} ({}x{}, room for {} groups)",
            self.output.display(),
            self.width,
            self.height,
            pattern.group_capacity()
        );

        Ok(())
    }
}
