//! Config Command
//!
//! Usage:
//!   webloom config show [-f json]
//!   webloom config path

use crate::config::ConfigLoader;
use crate::types::Result;

/// Show the merged effective configuration
pub fn show(format: &str) -> Result<()> {
    ConfigLoader::show_config(format == "json")
}

/// Show configuration file paths
pub fn path() -> Result<()> {
    ConfigLoader::show_paths();
    Ok(())
}
