//! Encode command - hide a message in an image.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;

use ninefold::{
    encode_with_config, EncoderConfig, KeyImage, KeySource, ResizeFilter, Scheme, StegoImage,
};

use super::CommandExecutor;

/// Hide a message in an image.
///
/// Only the ASCII letters of the message are kept. Without --key the
/// key-less sum scheme is used; with --key the keyed stream scheme.
///
/// Prints the decode parameters (scheme, group count, original length) as
/// JSON. Keep them: the stream scheme cannot be decoded without the group
/// count, and the original length removes padding exactly.
#[derive(Args, Debug)]
pub struct EncodeCommand {
    /// Message to hide
    #[arg(short, long)]
    pub message: String,

    /// Carrier image (default: black image 9 pixels wide)
    #[arg(short, long)]
    pub carrier: Option<PathBuf>,

    /// Key image; switches to the keyed stream scheme
    #[arg(short, long)]
    pub key: Option<PathBuf>,

    /// Output image (use a lossless format such as .png or .bmp)
    #[arg(short, long)]
    pub output: PathBuf,

    /// Fail instead of stretching a carrier that is too small
    #[arg(long)]
    pub no_resize: bool,

    /// Stretch with bilinear filtering instead of nearest neighbour
    #[arg(long)]
    pub smooth: bool,

    /// Also write the decode parameters to this JSON file
    #[arg(long)]
    pub params: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl CommandExecutor for EncodeCommand {
    fn execute(&self) -> Result<()> {
        check_lossless(&self.output)?;

        let carrier = self
            .carrier
            .as_ref()
            .map(|path| {
                StegoImage::from_file(path)
                    .with_context(|| format!("Failed to load carrier {}", path.display()))
            })
            .transpose()?;

        let key = self
            .key
            .as_ref()
            .map(|path| {
                KeyImage::from_file(path)
                    .with_context(|| format!("Failed to load key image {}", path.display()))
            })
            .transpose()?;

        let config = EncoderConfig {
            scheme: if key.is_some() { Scheme::Stream } else { Scheme::Sum },
            resize: !self.no_resize,
            filter: if self.smooth {
                ResizeFilter::Triangle
            } else {
                ResizeFilter::Nearest
            },
            verbose: self.verbose,
        };

        let encoded = encode_with_config(
            &self.message,
            carrier.as_ref().map(StegoImage::image),
            key.as_ref().map(|k| k as &dyn KeySource),
            &config,
        )
        .context("Failed to encode message")?;

        encoded
            .image
            .save(&self.output)
            .with_context(|| format!("Failed to save {}", self.output.display()))?;

        let json = serde_json::to_string_pretty(&encoded.params)?;
        if let Some(path) = &self.params {
            fs::write(path, &json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
        }

        if self.verbose {
            eprintln!("Normalized: {}", encoded.normalized);
            let (width, height) = encoded.image.dimensions();
            eprintln!("Image: {}x{} -> {}", width, height, self.output.display());
        }
        println!("{json}");

        Ok(())
    }
}

/// Rejects output paths whose format would alter pixel values.
fn check_lossless(path: &Path) -> Result<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    if matches!(ext.as_deref(), Some("jpg" | "jpeg")) {
        bail!(
            "{} is a lossy format; hidden values would not survive. Use .png or .bmp",
            path.display()
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lossless_check() {
        assert!(check_lossless(Path::new("out.png")).is_ok());
        assert!(check_lossless(Path::new("out.BMP")).is_ok());
        assert!(check_lossless(Path::new("out.jpg")).is_err());
        assert!(check_lossless(Path::new("out.JPEG")).is_err());
    }
}
