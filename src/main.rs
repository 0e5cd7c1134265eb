//! SecureStego - hide an image inside another image
//!
//! A CLI for 2-bit LSB image-in-image steganography with a password trailer
//! and RSA-OAEP password wrapping.

mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{
    CommandExecutor, EmbedCommand, ExtractCommand, KeygenCommand, UnwrapKeyCommand, WrapKeyCommand,
};

/// Exit code for a wrong password or a key that does not unwrap.
const EXIT_AUTH_FAILURE: u8 = 2;

/// SecureStego - hide an image inside another image
///
/// Hides the top 2 bits of every secret pixel in the low 2 bits of a cover
/// image. Extraction needs the password, which can travel wrapped under the
/// receiver's RSA public key.
#[derive(Parser)]
#[command(name = "securestego")]
#[command(version)]
#[command(about = "Image-in-image LSB steganography with password trailer and RSA key wrap")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file (default: ~/.securestego/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Verbose logging (same as RUST_LOG=debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a new RSA key pair
    Keygen(KeygenCommand),

    /// Hide a secret image inside a cover image
    Embed(EmbedCommand),

    /// Recover a hidden image
    Extract(ExtractCommand),

    /// Wrap a password under a public key
    #[command(name = "wrap-key")]
    WrapKey(WrapKeyCommand),

    /// Unwrap a password with a private key
    #[command(name = "unwrap-key")]
    UnwrapKey(UnwrapKeyCommand),
}

impl Commands {
    fn executor(&self) -> &dyn CommandExecutor {
        match self {
            Commands::Keygen(cmd) => cmd,
            Commands::Embed(cmd) => cmd,
            Commands::Extract(cmd) => cmd,
            Commands::WrapKey(cmd) => cmd,
            Commands::UnwrapKey(cmd) => cmd,
        }
    }
}

fn init_logger(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    cli.command.executor().execute(cli.config.as_deref())
}

fn is_auth_failure(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause
            .downcast_ref::<securestego::Error>()
            .is_some_and(securestego::Error::is_auth_failure)
    })
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) if is_auth_failure(&err) => {
            eprintln!("Authorization failed: {:#}", err);
            ExitCode::from(EXIT_AUTH_FAILURE)
        }
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
