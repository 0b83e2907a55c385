//! Configuration Loader (Figment-based)
//!
//! Loads and merges configuration from multiple sources using Figment:
//! 1. Built-in defaults (Serialized)
//! 2. Global config (config dir, e.g. ~/.config/webloom/config.toml)
//! 3. Project config (./webloom.toml)
//! 4. Environment variables (WEBLOOM_* prefix)
//!
//! The provider credential is resolved separately (env var, then a `.env`
//! file) and its absence is a fatal configuration error raised before any
//! network activity.

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::types::Config;
use crate::types::{Result, WebloomError};

/// Environment variable holding the provider credential
pub const API_KEY_ENV: &str = "COHERE_API_KEY";

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with full resolution chain:
    /// defaults → global → project → env vars
    pub fn load() -> Result<Config> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            debug!("Loading global config from: {}", global_path.display());
            figment = figment.merge(Toml::file(&global_path));
        }

        let project_path = Self::project_config_path();
        if project_path.exists() {
            debug!("Loading project config from: {}", project_path.display());
            figment = figment.merge(Toml::file(&project_path));
        }

        // e.g. WEBLOOM_PROVIDER_MODEL -> provider.model
        figment = figment.merge(Env::prefixed("WEBLOOM_").split('_').lowercase(true));

        let config: Config = figment
            .extract()
            .map_err(|e| WebloomError::Config(format!("Configuration error: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a specific file only
    pub fn load_from_file(path: &Path) -> Result<Config> {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(path))
            .extract()
            .map_err(|e| WebloomError::Config(format!("Configuration error: {}", e)))
    }

    // =========================================================================
    // Credential Resolution
    // =========================================================================

    /// Resolve the provider API key: environment variable first, then a
    /// `KEY=value` line in a local `.env` file. Missing credential is fatal.
    pub fn api_key() -> Result<SecretString> {
        Self::api_key_from(Path::new(".env"))
    }

    /// Credential resolution with an injectable dotfile path (for tests).
    pub fn api_key_from(dotenv_path: &Path) -> Result<SecretString> {
        if let Ok(key) = env::var(API_KEY_ENV)
            && !key.trim().is_empty()
        {
            return Ok(SecretString::from(key.trim().to_string()));
        }

        if dotenv_path.exists() {
            let contents = fs::read_to_string(dotenv_path)?;
            for line in contents.lines() {
                let line = line.trim();
                if let Some(value) = line.strip_prefix(&format!("{API_KEY_ENV}="))
                    && !value.trim().is_empty()
                {
                    return Ok(SecretString::from(value.trim().to_string()));
                }
            }
        }

        Err(WebloomError::Config(format!(
            "{API_KEY_ENV} not found. Set it as an environment variable \
             or add a `{API_KEY_ENV}=<key>` line to {}",
            dotenv_path.display()
        )))
    }

    // =========================================================================
    // Path Management
    // =========================================================================

    /// Get path to the global config file (platform config dir)
    pub fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "webloom")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Get path to the project config file
    pub fn project_config_path() -> PathBuf {
        PathBuf::from("webloom.toml")
    }

    // =========================================================================
    // Config Commands
    // =========================================================================

    /// Show config file paths
    pub fn show_paths() {
        println!("Configuration paths:");
        println!();

        if let Some(global) = Self::global_config_path() {
            let exists = if global.exists() { "✓" } else { "✗" };
            println!("  Global:  {} {}", exists, global.display());
        } else {
            println!("  Global:  (not available)");
        }

        let project = Self::project_config_path();
        let exists = if project.exists() { "✓" } else { "✗" };
        println!("  Project: {} {}", exists, project.display());
    }

    /// Show current effective configuration
    pub fn show_config(as_json: bool) -> Result<()> {
        let config = Self::load()?;

        if as_json {
            println!("{}", serde_json::to_string_pretty(&config)?);
        } else {
            println!(
                "{}",
                toml::to_string_pretty(&config).map_err(|e| WebloomError::Config(e.to_string()))?
            );
        }

        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::io::Write;

    #[test]
    fn test_api_key_from_dotenv_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "# comment line").unwrap();
        writeln!(file, "COHERE_API_KEY=sk-test-123").unwrap();

        // Only meaningful when the env var is not set in the test environment
        if env::var(API_KEY_ENV).is_err() {
            let key = ConfigLoader::api_key_from(&path).unwrap();
            assert_eq!(key.expose_secret(), "sk-test-123");
        }
    }

    #[test]
    fn test_missing_api_key_is_config_error() {
        if env::var(API_KEY_ENV).is_err() {
            let dir = tempfile::tempdir().unwrap();
            let err = ConfigLoader::api_key_from(&dir.path().join(".env")).unwrap_err();
            assert!(matches!(err, WebloomError::Config(_)));
        }
    }

    #[test]
    fn test_load_from_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("webloom.toml");
        fs::write(&path, "[provider]\nmodel = \"command-light\"\n").unwrap();

        let config = ConfigLoader::load_from_file(&path).unwrap();
        assert_eq!(config.provider.model, "command-light");
        // Untouched sections keep defaults
        assert_eq!(config.pipeline.max_synthesis_chars, 12_000);
    }
}
