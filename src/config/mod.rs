//! Configuration module for report-finder
//!
//! Report sensors read their report path from a named setting. Settings are
//! loaded with the `config` crate from TOML, either from a file (by default
//! `~/.config/report-finder/config.toml` on Linux), an inline document, or
//! explicit key/value overrides.
//!
//! Keys are dotted paths into the TOML tables:
//!
//! ```toml
//! [report]
//! path = "build/reports/*-report.xml"
//! ```
//!
//! makes `settings.get("report.path")` return the pattern.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, File, FileFormat};

/// Read-only key/value settings
#[derive(Debug, Clone, Default)]
pub struct Settings {
    inner: Config,
}

impl Settings {
    /// Get the path to the default settings file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;

        Ok(config_dir.join("report-finder").join("config.toml"))
    }

    /// Load settings from a TOML file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let inner = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml))
            .build()?;
        Ok(Self { inner })
    }

    /// Load the default settings file, or empty settings if it does not exist
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file exists but cannot be read or parsed.
    pub fn load_default() -> Result<Self, ConfigError> {
        let path = Self::default_path()?;
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse settings from an inline TOML document
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `text` is not valid TOML.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let inner = Config::builder()
            .add_source(File::from_str(text, FileFormat::Toml))
            .build()?;
        Ok(Self { inner })
    }

    /// Build settings from explicit `(key, value)` pairs
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a key is not a valid path expression.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut builder = Config::builder();
        for (key, value) in pairs {
            let value: String = value.into();
            builder = builder.set_override(key.as_ref(), value)?;
        }
        Ok(Self { inner: builder.build()? })
    }

    /// Look up a string setting. Missing keys, and keys holding a table or
    /// array, are `None`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        self.inner.get_string(key).ok()
    }
}
