//! pivotgrid - virtualized pivot grid widget for the web
//!
//! A resizable data grid that materializes only a window of a potentially
//! large dataset into DOM rows, requesting blocks from the host page as
//! the window moves:
//! - Two viewport strategies: thumb-driven paging and infinite append
//! - Row cache with stale-response rejection
//! - Draggable column resize grips
//! - Templated cell tooltips with fade animation
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { PivotGrid } from 'pivotgrid';
//! await init();
//! const grid = PivotGrid.create(container, options, "paging");
//! grid.on_request_data((request) => fetchRows(request));
//! grid.populate_data(response);
//! ```

// Core logic modules (platform independent)
pub mod error;
pub mod resize;
pub mod tooltip;
pub mod types;
pub mod viewport;

// DOM widget (wasm32)
pub mod widget;

use wasm_bindgen::prelude::*;

// Re-export the main widget struct
pub use widget::PivotGrid;

pub use error::{PivotError, Result};
pub use types::*;
pub use viewport::{
    GridSurface, GridViewport, PagingViewport, RowCache, ScrollingViewport, ViewportCallbacks,
    ViewportCore,
};

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
