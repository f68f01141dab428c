//! Site Plan Settings Crate
//!
//! Handles designer and export configuration and its persistence.

pub mod config;
pub mod error;

pub use config::{Config, DesignerSettings, ExportSettings};
pub use error::{ConfigError, SettingsError, SettingsResult};
