//! Wrap-key command.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use securestego::encrypt_key;

use super::CommandExecutor;

/// Wrap a password under a receiver's public key (RSA-OAEP, SHA-256).
#[derive(Args, Debug)]
pub struct WrapKeyCommand {
    /// Password to wrap
    #[arg(short, long)]
    pub password: String,

    /// Receiver's public key (.pub)
    #[arg(long)]
    pub their_key: PathBuf,

    /// Write the wrapped key here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl CommandExecutor for WrapKeyCommand {
    fn execute(&self, _config_path: Option<&Path>) -> Result<()> {
        let public_pem = fs::read_to_string(&self.their_key)
            .with_context(|| format!("Failed to read public key {}", self.their_key.display()))?;

        let encrypted_key =
            encrypt_key(&self.password, &public_pem).context("Failed to wrap password")?;

        match self.output {
            Some(ref path) => {
                fs::write(path, format!("{}\n", encrypted_key))
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                println!("Encrypted key written: {}", path.display());
            }
            None => println!("{}", encrypted_key),
        }

        Ok(())
    }
}
