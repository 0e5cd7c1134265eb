//! Key generation command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use log::info;

use securestego::crypto::KeyPair;

use super::{load_config, CommandExecutor};

/// Generate a new RSA key pair for receiving wrapped passwords.
#[derive(Args, Debug)]
pub struct KeygenCommand {
    /// Output path for keys (creates .pub and .key files)
    #[arg(short, long, default_value = "securestego")]
    pub output: PathBuf,

    /// RSA modulus size in bits (default from config, 2048)
    #[arg(long)]
    pub bits: Option<usize>,
}

impl CommandExecutor for KeygenCommand {
    fn execute(&self, config_path: Option<&Path>) -> Result<()> {
        let bits = match self.bits {
            Some(bits) => bits,
            None => load_config(config_path)?.keys.bits,
        };
        info!("Generating {}-bit RSA key pair", bits);

        let keypair = KeyPair::generate_with_bits(bits).context("Failed to generate key pair")?;
        keypair
            .save_to_files(&self.output)
            .context("Failed to save key pair")?;

        let pub_path = self.output.with_extension("pub");
        let key_path = self.output.with_extension("key");

        println!("Key pair generated successfully ({} bits):", keypair.bits());
        println!();
        println!("  Public key:  {}", pub_path.display());
        println!("  Private key: {}", key_path.display());
        println!();
        println!("Share your public key (.pub) with senders so they can wrap the password.");
        println!("Keep your private key (.key) secret and secure.");

        Ok(())
    }
}
