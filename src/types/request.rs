//! Data request protocol types.
//!
//! The viewport asks the host page for row blocks through `DataRequest`
//! values and the host answers with a `DataResponse` carrying the same
//! request back. Matching is by request id, so a stale or duplicate
//! delivery can never clobber a newer window.

use serde::{Deserialize, Serialize};

use super::GridRow;

/// A contiguous, half-open row-index range `[from, to)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowRange {
    /// First row index of the range.
    pub from: u32,
    /// One past the last row index of the range.
    pub to: u32,
}

impl RowRange {
    /// Create a range. `to` is clamped so the range is never inverted.
    #[must_use]
    pub fn new(from: u32, to: u32) -> Self {
        Self {
            from,
            to: to.max(from),
        }
    }

    /// Number of rows in the range.
    #[must_use]
    pub fn len(&self) -> u32 {
        self.to - self.from
    }

    /// True when the range covers no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.to == self.from
    }
}

/// Identity of one data request. Ids increase monotonically per viewport,
/// so a response can be checked against the outstanding request without
/// comparing object references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(pub u64);

/// An outbound request for a block of rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataRequest {
    /// Identity used to match the response.
    pub id: RequestId,
    /// Rows being requested.
    pub range: RowRange,
}

/// The host's answer to a [`DataRequest`].
#[derive(Debug, Clone)]
pub struct DataResponse {
    /// The request being answered, echoed back by the host.
    pub request: DataRequest,
    /// Rows covering `request.range`.
    pub rows: Vec<GridRow>,
}

/// Scrollbar pixel sizes reported to the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScrollbarSizes {
    /// Horizontal scrollbar height, 0 when absent.
    pub horizontal: f64,
    /// Vertical scrollbar width, 0 when absent.
    pub vertical: f64,
}

/// Structured cell identity: 0-based row and column within the rendered
/// window. Attached to rendered cells as metadata so interaction handlers
/// never have to parse coordinates out of id strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellCoord {
    /// 0-based row index within the rendered window.
    pub row: u32,
    /// 0-based column index.
    pub col: u32,
}

impl CellCoord {
    /// The legacy 1-based DOM id for this cell, kept for stylesheet
    /// compatibility. Nothing in the crate parses it back.
    #[must_use]
    pub fn legacy_id(&self) -> String {
        format!("cell_{}_{}", self.row + 1, self.col + 1)
    }
}
