//! Canvas type definitions: ShapeRecord, PlacementTool.

use crate::model::{Shape, ShapeKind};
use serde::{Deserialize, Serialize};

/// One placed annotation as owned by the shape store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeRecord {
    pub id: u64,
    pub shape: Shape,
}

impl ShapeRecord {
    /// Creates a new shape record.
    pub fn new(id: u64, shape: Shape) -> Self {
        Self { id, shape }
    }

    pub fn kind(&self) -> ShapeKind {
        self.shape.kind()
    }
}

/// Placement tool armed from the toolbar.
///
/// A tool stays armed until the next background click consumes it, or
/// until it is cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlacementTool {
    Well,
    Septic,
    Structure,
    Ruler,
}

impl PlacementTool {
    pub fn kind(&self) -> ShapeKind {
        match self {
            PlacementTool::Well => ShapeKind::Well,
            PlacementTool::Septic => ShapeKind::Septic,
            PlacementTool::Structure => ShapeKind::Structure,
            PlacementTool::Ruler => ShapeKind::Ruler,
        }
    }
}

impl From<ShapeKind> for PlacementTool {
    fn from(kind: ShapeKind) -> Self {
        match kind {
            ShapeKind::Well => PlacementTool::Well,
            ShapeKind::Septic => PlacementTool::Septic,
            ShapeKind::Structure => PlacementTool::Structure,
            ShapeKind::Ruler => PlacementTool::Ruler,
        }
    }
}
