//! Configuration loading and parsing

use anyhow::{bail, Context, Result};
use pbp_decoder::DecoderConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main application configuration (loaded from config.toml)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    pub input: InputConfig,
    #[serde(default)]
    pub decoder: DecoderConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InputConfig {
    /// Directory holding `<id>.json` game documents
    pub games_dir: PathBuf,
    /// Contest identifiers to decode
    pub games: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
    /// Directory for per-contest exports (stdout when absent)
    pub output_dir: Option<PathBuf>,
    /// Fail the run if any roster desync was recorded
    #[serde(default)]
    pub strict: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Csv,
            output_dir: None,
            strict: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

impl OutputFormat {
    /// File extension for exports in this format
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        }
    }
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    validate(&config)?;
    Ok(config)
}

fn validate(config: &AppConfig) -> Result<()> {
    if config.input.games.is_empty() {
        bail!("No games listed under [input]");
    }
    if !config.input.games_dir.is_dir() {
        bail!("Games directory does not exist: {:?}", config.input.games_dir);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialization() {
        let toml_content = r#"
            [input]
            games_dir = "games"
            games = ["0021500001", "0021500002"]

            [decoder]
            checkpoint_categories = [18]

            [output]
            format = "json"
            strict = true
        "#;

        let config: AppConfig = toml::from_str(toml_content).unwrap();
        assert_eq!(config.input.games.len(), 2);
        assert!(config.decoder.is_checkpoint_category(18));
        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(config.output.strict);
    }

    #[test]
    fn test_config_defaults() {
        let toml_content = r#"
            [input]
            games_dir = "games"
            games = ["g1"]
        "#;

        let config: AppConfig = toml::from_str(toml_content).unwrap();
        assert_eq!(config.decoder, DecoderConfig::default());
        assert_eq!(config.output.format, OutputFormat::Csv);
        assert!(config.output.output_dir.is_none());
    }

    #[test]
    fn test_load_config_validates_games_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[input]\ngames_dir = \"/does/not/exist\"\ngames = [\"g1\"]\n").unwrap();
        assert!(load_config(&path).is_err());

        let games = dir.path().to_string_lossy().replace('\\', "/");
        let content = format!("[input]\ngames_dir = \"{}\"\ngames = [\"g1\"]\n", games);
        fs::write(&path, content).unwrap();
        assert!(load_config(&path).is_ok());
    }
}
