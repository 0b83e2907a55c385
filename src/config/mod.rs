//! Configuration Management
//!
//! Unified configuration system with hierarchical resolution:
//! 1. Built-in defaults
//! 2. Global config (config dir)
//! 3. Project config (./webloom.toml)
//! 4. Environment variables (WEBLOOM_*)

mod loader;
mod types;

pub use loader::{API_KEY_ENV, ConfigLoader};
pub use types::*;
