use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

/// Analysis configuration.
///
/// Loaded from a TOML file and validated before use.
/// See [`Config::from_file`] for loading.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Input parameters.
    pub input: InputConfig,
    /// Output parameters.
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Glob pattern of the series files, relative to the data directory.
    pub pattern: String,
}

#[derive(Debug, Default, PartialEq, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Format of the results files.
    #[serde(default)]
    pub format: Format,
}

#[derive(Debug, Default, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Json,
    Msgpack,
}

impl Format {
    pub fn extension(self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Msgpack => "msgpack",
        }
    }
}

impl Config {
    /// Load a [`Config`] from a file.
    ///
    /// The file must be TOML-encoded and contain a serialized [`Config`].
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, deserialized,
    /// or if the configuration values are invalid.
    pub fn from_file<P: AsRef<Path>>(file: P) -> Result<Self> {
        let file = file.as_ref();
        let contents =
            fs::read_to_string(file).with_context(|| format!("failed to read {file:?}"))?;

        let config: Config = toml::from_str(&contents).context("failed to deserialize config")?;

        config.validate().context("failed to validate config")?;

        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let pattern = self.input.pattern.trim();
        if pattern.is_empty() {
            bail!("input pattern must not be empty");
        }
        if Path::new(pattern).is_absolute() {
            bail!("input pattern must be relative to the data directory, but is {pattern:?}");
        }
        glob::Pattern::new(pattern).context("invalid input pattern")?;
        Ok(())
    }
}

/// Named sequence of numbers read from a series file.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Series {
    /// Series name (defaults to the file stem).
    #[serde(default)]
    pub name: Option<String>,
    /// Values of the series.
    pub numbers: Vec<f64>,
}

impl Series {
    /// Load a [`Series`] from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or deserialized,
    /// or if it holds no numbers.
    pub fn from_file<P: AsRef<Path>>(file: P) -> Result<Self> {
        let file = file.as_ref();
        let contents =
            fs::read_to_string(file).with_context(|| format!("failed to read {file:?}"))?;

        let mut series: Series =
            toml::from_str(&contents).context("failed to deserialize series")?;

        if series.numbers.is_empty() {
            bail!("series must have at least one number");
        }
        if series.name.is_none() {
            series.name = file
                .file_stem()
                .and_then(|stem| stem.to_str())
                .map(str::to_owned);
        }

        Ok(series)
    }

    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("unnamed")
    }
}
