//! Extract command - recover a hidden image.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use log::warn;

use securestego::{extract_secret_image, extract_with_wrapped_key};

use super::{derived_path, read_encrypted_key, CommandExecutor};

/// Recover a hidden image from a stego file.
///
/// Either give the password directly, or give the wrapped key together with
/// your private key. The recovered image is always written as PNG.
#[derive(Args, Debug)]
pub struct ExtractCommand {
    /// Stego file produced by `embed`
    #[arg(long)]
    pub stego: PathBuf,

    /// Password used when embedding
    #[arg(short, long, conflicts_with_all = ["encrypted_key", "encrypted_key_file"])]
    pub password: Option<String>,

    /// Wrapped key (base64) received from the sender
    #[arg(long, conflicts_with = "encrypted_key_file", requires = "key")]
    pub encrypted_key: Option<String>,

    /// File containing the wrapped key
    #[arg(long, requires = "key")]
    pub encrypted_key_file: Option<PathBuf>,

    /// Your private key (.key)
    #[arg(short, long)]
    pub key: Option<PathBuf>,

    /// Output PNG (default: recovered_<stego>.png next to the stego file)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl CommandExecutor for ExtractCommand {
    fn execute(&self, _config_path: Option<&Path>) -> Result<()> {
        let artifact = fs::read(&self.stego)
            .with_context(|| format!("Failed to read stego file {}", self.stego.display()))?;

        let wrapped = self.encrypted_key.is_some() || self.encrypted_key_file.is_some();

        let recovered = if wrapped {
            let encrypted_key = read_encrypted_key(
                self.encrypted_key.as_deref(),
                self.encrypted_key_file.as_deref(),
            )?;
            let key_path = self
                .key
                .as_ref()
                .context("--key is required with an encrypted key")?;
            let private_pem = zeroize::Zeroizing::new(
                fs::read_to_string(key_path)
                    .with_context(|| format!("Failed to read private key {}", key_path.display()))?,
            );
            extract_with_wrapped_key(&artifact, &encrypted_key, &private_pem)
                .context("Recovery failed")?
        } else {
            let password = self.password.as_deref().unwrap_or("");
            if password.is_empty() {
                warn!("No password given; the trailer check is skipped");
            }
            extract_secret_image(&artifact, password).context("Recovery failed")?
        };

        let suffix = if wrapped { "_rsa" } else { "" };
        let output = self
            .output
            .clone()
            .unwrap_or_else(|| derived_path(&self.stego, "recovered_", suffix, "png"));
        recovered
            .save_png(&output)
            .with_context(|| format!("Failed to write recovered image {}", output.display()))?;

        println!(
            "Recovered image written: {} ({}x{})",
            output.display(),
            recovered.width(),
            recovered.height()
        );

        Ok(())
    }
}
