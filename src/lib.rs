//! # Site Plan
//!
//! Calibrate a real-world scale on an uploaded site image and annotate it
//! with measured wells, septic fields, structures and rulers.
//!
//! ## Architecture
//!
//! The workspace is organized as multiple crates:
//!
//! 1. **siteplan-core** - Error types, feet formatting and parsing, defaults
//! 2. **siteplan-designer** - Calibration, shape store, labels, event routing, export
//! 3. **siteplan-settings** - Designer and export configuration
//! 4. **siteplan** - This crate, re-exporting the others and setting up logging

pub use siteplan_core as core;
pub use siteplan_designer as designer;
pub use siteplan_settings as settings;

pub use siteplan_core::{DesignerError, Error, ExportError, Result};
pub use siteplan_designer::{
    DesignerState, ExportAdapter, HitTarget, Key, OperatorPrompt, Placement, PlacementTool,
    PngExporter, Point, PointerEvent, Shape,
};
pub use siteplan_settings::Config;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support
///
/// Fails if a global subscriber is already installed.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    tracing::info!("siteplan {} (built {})", VERSION, BUILD_DATE);
    Ok(())
}
