//! Decode command - recover a message from an image.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;

use ninefold::{
    decode_with_config, DecodeParams, DecoderConfig, KeyImage, KeySource, Scheme, StegoImage,
};

use super::CommandExecutor;

/// Recover a message from an image.
///
/// With --key the keyed stream scheme is used and --groups or --length is
/// required. Without --key the key-less sum scheme is used; given neither
/// --groups nor --length it reads until an all-zero group, which only a
/// black canvas has.
///
/// Without --length, trailing 'x' letters are treated as padding and
/// removed, which also removes any real trailing 'x'.
///
/// A wrong key image is not detected: it decodes to a different string.
#[derive(Args, Debug)]
pub struct DecodeCommand {
    /// Encoded image
    #[arg(short, long)]
    pub image: PathBuf,

    /// Key image used at encode time
    #[arg(short, long)]
    pub key: Option<PathBuf>,

    /// Scheme to decode with (sum or stream; default: stream with --key)
    #[arg(short, long)]
    pub scheme: Option<Scheme>,

    /// Number of groups written at encode time
    #[arg(short, long)]
    pub groups: Option<usize>,

    /// Message length before padding
    #[arg(short, long)]
    pub length: Option<usize>,

    /// Read scheme, groups and length from a JSON file written by encode
    #[arg(long, conflicts_with_all = ["scheme", "groups", "length"])]
    pub params: Option<PathBuf>,

    /// Print the full decoded text, padding included
    #[arg(long)]
    pub full: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl CommandExecutor for DecodeCommand {
    fn execute(&self) -> Result<()> {
        let image = StegoImage::from_file(&self.image)
            .with_context(|| format!("Failed to load {}", self.image.display()))?;

        let key = self
            .key
            .as_ref()
            .map(|path| {
                KeyImage::from_file(path)
                    .with_context(|| format!("Failed to load key image {}", path.display()))
            })
            .transpose()?;

        let params = match &self.params {
            Some(path) => load_params(path)?,
            None => DecodeParams {
                scheme: self.scheme.unwrap_or(if key.is_some() {
                    Scheme::Stream
                } else {
                    Scheme::Sum
                }),
                group_count: self.groups,
                original_length: self.length,
            },
        };
        check_key(params.scheme, key.is_some())?;

        let mut config = DecoderConfig::from(params);
        config.verbose = self.verbose;

        let decoded = decode_with_config(
            image.image(),
            key.as_ref().map(|k| k as &dyn KeySource),
            &config,
        )
        .context("Failed to decode image")?;

        if self.verbose {
            eprintln!("Groups read: {}", decoded.group_count);
            eprintln!("Removed padding: {:?}", decoded.removed_padding);
        }

        if self.full {
            println!("{}", decoded.full);
        } else {
            println!("{}", decoded.message);
        }

        Ok(())
    }
}

fn load_params(path: &Path) -> Result<DecodeParams> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&json)
        .with_context(|| format!("Invalid parameters in {}", path.display()))
}

/// Rejects a key image the chosen scheme would not use.
fn check_key(scheme: Scheme, has_key: bool) -> Result<()> {
    if !scheme.is_keyed() && has_key {
        bail!("A key image was given but the scheme is '{scheme}', which takes no key");
    }
    Ok(())
}
