//! Unwrap-key command.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use zeroize::Zeroizing;

use securestego::decrypt_key;

use super::{read_encrypted_key, CommandExecutor};

/// Recover a wrapped password with your private key.
#[derive(Args, Debug)]
pub struct UnwrapKeyCommand {
    /// Wrapped key (base64)
    #[arg(long, conflicts_with = "encrypted_key_file")]
    pub encrypted_key: Option<String>,

    /// File containing the wrapped key
    #[arg(long)]
    pub encrypted_key_file: Option<PathBuf>,

    /// Your private key (.key)
    #[arg(short, long)]
    pub key: PathBuf,
}

impl CommandExecutor for UnwrapKeyCommand {
    fn execute(&self, _config_path: Option<&Path>) -> Result<()> {
        let encrypted_key = read_encrypted_key(
            self.encrypted_key.as_deref(),
            self.encrypted_key_file.as_deref(),
        )?;

        let private_pem = Zeroizing::new(
            fs::read_to_string(&self.key)
                .with_context(|| format!("Failed to read private key {}", self.key.display()))?,
        );

        let password = decrypt_key(&encrypted_key, &private_pem)
            .map_err(securestego::Error::from)
            .context("Failed to unwrap password")?;
        println!("{}", password.as_str());

        Ok(())
    }
}
