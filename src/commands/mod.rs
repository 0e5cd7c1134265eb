//! Command module - Strategy pattern for CLI commands.
//!
//! Each command is a separate module implementing the `CommandExecutor` trait.

mod embed;
mod extract;
mod keygen;
mod unwrap_key;
mod wrap_key;

pub use embed::EmbedCommand;
pub use extract::ExtractCommand;
pub use keygen::KeygenCommand;
pub use unwrap_key::UnwrapKeyCommand;
pub use wrap_key::WrapKeyCommand;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use securestego::{Config, OutputFormat};

/// Trait for command execution - Strategy pattern.
///
/// Each command struct holds its parsed arguments and implements
/// this trait to define its execution logic. Commands that read settings
/// load the config themselves through [`load_config`].
pub trait CommandExecutor {
    /// Executes the command. `config_path` is the `--config` override, if any.
    fn execute(&self, config_path: Option<&Path>) -> Result<()>;
}

/// Loads the config from `path`, or from `~/.securestego/config.toml`.
pub(crate) fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Config::load().context("Failed to load config"),
    }
}

/// Parses a `--format` value.
pub(crate) fn parse_output_format(value: &str) -> Result<OutputFormat> {
    match value.to_lowercase().as_str() {
        "png" => Ok(OutputFormat::Png),
        "jpg" | "jpeg" => Ok(OutputFormat::Jpeg),
        other => bail!("Unknown output format '{}' (expected png or jpeg)", other),
    }
}

/// Reads a wrapped key given inline or as a file.
pub(crate) fn read_encrypted_key(inline: Option<&str>, file: Option<&Path>) -> Result<String> {
    match (inline, file) {
        (Some(key), _) => Ok(key.trim().to_string()),
        (None, Some(path)) => std::fs::read_to_string(path)
            .map(|s| s.trim().to_string())
            .with_context(|| format!("Failed to read encrypted key from {}", path.display())),
        (None, None) => bail!("Provide --encrypted-key or --encrypted-key-file"),
    }
}

/// Builds `{prefix}{input stem}{suffix}.{ext}` next to the input file.
pub(crate) fn derived_path(input: &Path, prefix: &str, suffix: &str, ext: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    let name = format!("{}{}{}.{}", prefix, stem, suffix, ext);
    match input.parent() {
        Some(parent) => parent.join(name),
        None => PathBuf::from(name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_output_format() {
        assert_eq!(parse_output_format("PNG").unwrap(), OutputFormat::Png);
        assert_eq!(parse_output_format("jpg").unwrap(), OutputFormat::Jpeg);
        assert!(parse_output_format("gif").is_err());
    }

    #[test]
    fn test_derived_path() {
        let path = derived_path(Path::new("photos/cat.jpeg"), "stego_", "", "png");
        assert_eq!(path, PathBuf::from("photos/stego_cat.png"));

        let path = derived_path(Path::new("cat.png"), "recovered_", "_rsa", "png");
        assert_eq!(path, PathBuf::from("recovered_cat_rsa.png"));
    }

    #[test]
    fn test_read_encrypted_key_inline_wins() {
        let key = read_encrypted_key(Some("  abc==\n"), Some(Path::new("/nonexistent"))).unwrap();
        assert_eq!(key, "abc==");
        assert!(read_encrypted_key(None, None).is_err());
    }

    #[test]
    fn test_load_config_rejects_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[embed]\npassword_bytes = \"many\"\n").unwrap();

        assert!(load_config(Some(&path)).is_err());
    }

    #[test]
    fn test_extract_ignores_malformed_config() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        std::fs::write(&config_path, "this is not toml [[[").unwrap();

        let image = image::RgbImage::from_pixel(4, 4, image::Rgb([128, 128, 128]));
        let mut png = Vec::new();
        image
            .write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
            .unwrap();
        let artifact = securestego::embed_secret_image(
            &png,
            &png,
            Some("pw"),
            None,
            &securestego::EncoderConfig::default(),
        )
        .unwrap();
        let stego_path = dir.path().join("stego.png");
        std::fs::write(&stego_path, &artifact.bytes).unwrap();

        let output = dir.path().join("recovered.png");
        let command = ExtractCommand {
            stego: stego_path,
            password: Some("pw".to_string()),
            encrypted_key: None,
            encrypted_key_file: None,
            key: None,
            output: Some(output.clone()),
        };

        command.execute(Some(&config_path)).unwrap();
        assert!(output.exists());
    }
}
