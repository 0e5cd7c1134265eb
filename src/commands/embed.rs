//! Embed command - hide a secret image inside a cover image.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use securestego::embed_secret_image;

use super::{derived_path, load_config, parse_output_format, CommandExecutor};

/// Hide a secret image inside a cover image.
///
/// The secret is resized to the cover, and its top 2 bits per channel are
/// written into the cover's low 2 bits. The password is appended after the
/// image. If no password is given, a random one is generated and printed.
#[derive(Args, Debug)]
pub struct EmbedCommand {
    /// Cover image (PNG, JPEG, BMP)
    #[arg(long)]
    pub cover: PathBuf,

    /// Secret image to hide (PNG, JPEG, BMP)
    #[arg(long)]
    pub secret: PathBuf,

    /// Password written as trailer (generated if omitted)
    #[arg(short, long)]
    pub password: Option<String>,

    /// Receiver's public key (.pub); wraps the password for transport
    #[arg(long)]
    pub their_key: Option<PathBuf>,

    /// Output path (default: stego_<cover>.<ext> next to the cover)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format: png (default, lossless) or jpeg (lossy, may destroy the payload)
    #[arg(long)]
    pub format: Option<String>,

    /// JPEG quality (1-100)
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub quality: Option<u8>,

    /// Also write the wrapped key to this file
    #[arg(long, requires = "their_key")]
    pub encrypted_key_out: Option<PathBuf>,
}

impl CommandExecutor for EmbedCommand {
    fn execute(&self, config_path: Option<&Path>) -> Result<()> {
        let mut encoder_config = load_config(config_path)?.embed;
        if let Some(ref format) = self.format {
            encoder_config.format = parse_output_format(format)?;
        }
        if let Some(quality) = self.quality {
            encoder_config.jpeg_quality = quality;
        }

        let cover = fs::read(&self.cover)
            .with_context(|| format!("Failed to read cover image {}", self.cover.display()))?;
        let secret = fs::read(&self.secret)
            .with_context(|| format!("Failed to read secret image {}", self.secret.display()))?;

        let public_pem = match self.their_key {
            Some(ref path) => Some(
                fs::read_to_string(path)
                    .with_context(|| format!("Failed to read public key {}", path.display()))?,
            ),
            None => None,
        };

        let artifact = embed_secret_image(
            &cover,
            &secret,
            self.password.as_deref(),
            public_pem.as_deref(),
            &encoder_config,
        )
        .context("Embedding failed")?;

        let output = self.output.clone().unwrap_or_else(|| {
            derived_path(&self.cover, "stego_", "", encoder_config.format.extension())
        });
        fs::write(&output, &artifact.bytes)
            .with_context(|| format!("Failed to write stego image {}", output.display()))?;

        println!(
            "Stego image written: {} ({}x{}, {} bytes)",
            output.display(),
            artifact.width,
            artifact.height,
            artifact.bytes.len()
        );

        if artifact.password_generated && artifact.encrypted_key.is_none() {
            println!();
            println!("Generated password (needed to extract, not stored anywhere):");
            println!("{}", artifact.password.as_str());
        }

        if let Some(ref encrypted_key) = artifact.encrypted_key {
            println!();
            println!("---- Encrypted Decryption Key (Base64, RSA-OAEP) ----");
            println!("{}", encrypted_key);
            println!("-----------------------------------------------------");
            println!("The receiver recovers the image with their private key:");
            println!("  securestego extract --stego <file> --encrypted-key <key> --key <their.key>");

            if let Some(ref path) = self.encrypted_key_out {
                fs::write(path, format!("{}\n", encrypted_key)).with_context(|| {
                    format!("Failed to write encrypted key {}", path.display())
                })?;
                println!();
                println!("Encrypted key written: {}", path.display());
            }
        }

        Ok(())
    }
}
