//! # Site Plan Core
//!
//! Core types and utilities shared by the site plan crates.
//! Provides the error hierarchy, real-world unit formatting and parsing,
//! and the constants the designer falls back to when no configuration
//! is supplied.

pub mod constants;
pub mod error;
pub mod units;

pub use error::{DesignerError, Error, ExportError, Result};
pub use units::{format_feet, parse_feet, LengthUnit};
