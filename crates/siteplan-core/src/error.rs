//! Error handling for the site plan annotator
//!
//! Provides error types for the layers of the application:
//! - Designer errors (calibration, placement, label edits, shape references)
//! - Export errors (rasterisation and encoding)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Designer error type
///
/// Represents rejected operator input and logic errors inside the
/// annotation model. None of these are fatal: the operation that raised
/// one leaves the designer exactly as it was before the triggering action.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DesignerError {
    /// Real-world calibration distance was missing, non-numeric or not positive
    #[error("Invalid calibration input: {reason}")]
    InvalidCalibrationInput {
        /// Why the calibration was rejected.
        reason: String,
    },

    /// Structure dimensions were missing or not positive
    #[error("Invalid placement input: {reason}")]
    InvalidPlacementInput {
        /// Why the placement was rejected.
        reason: String,
    },

    /// An update or delete referenced a shape that does not exist
    #[error("Unknown shape reference: {id}")]
    UnknownShapeReference {
        /// The shape id that was not found.
        id: u64,
    },

    /// A measurement label edit could not be parsed as a positive length
    #[error("Invalid label input: '{input}'")]
    InvalidLabelInput {
        /// The raw text the operator entered.
        input: String,
    },

    /// The requested label does not exist on the shape
    #[error("Shape {id} has no editable {field} label")]
    NotEditable {
        /// The shape id.
        id: u64,
        /// The field name that was requested.
        field: String,
    },
}

/// Export error type
///
/// Represents failures while turning the current scene into raster bytes.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExportError {
    /// Pixel ratio must be positive and finite
    #[error("Invalid pixel ratio: {ratio}")]
    InvalidPixelRatio {
        /// The rejected ratio.
        ratio: f64,
    },

    /// The raster surface could not be allocated
    #[error("Failed to allocate {width}x{height} surface")]
    SurfaceAllocation {
        /// Requested width in pixels.
        width: u32,
        /// Requested height in pixels.
        height: u32,
    },

    /// Image encoding failed
    #[error("Failed to encode image: {reason}")]
    Encode {
        /// The encoder's error message.
        reason: String,
    },
}

/// Main error type for the site plan annotator
///
/// A unified error type that can represent any error from all layers.
#[derive(Error, Debug)]
pub enum Error {
    /// Designer error
    #[error(transparent)]
    Designer(#[from] DesignerError),

    /// Export error
    #[error(transparent)]
    Export(#[from] ExportError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a designer error
    pub fn is_designer_error(&self) -> bool {
        matches!(self, Error::Designer(_))
    }

    /// Check if this is an export error
    pub fn is_export_error(&self) -> bool {
        matches!(self, Error::Export(_))
    }

    /// Check if the operator should be told about this error.
    ///
    /// Only calibration failures are surfaced; placement and reference
    /// errors abort silently.
    pub fn is_user_visible(&self) -> bool {
        matches!(
            self,
            Error::Designer(DesignerError::InvalidCalibrationInput { .. })
                | Error::Export(_)
                | Error::Io(_)
        )
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
