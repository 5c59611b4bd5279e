//! Widget options.
//!
//! Options cross the JS boundary as a plain object and are deserialized via
//! `serde-wasm-bindgen`; every field has a default so hosts only specify
//! what they change.

use serde::Deserialize;

use super::GridRow;

/// Options for the pivot grid widget and its viewports.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GridOptions {
    /// Initial dataset rendered at creation. Later blocks arrive through
    /// the data request protocol.
    pub data: Vec<GridRow>,
    /// Ordered column header labels. Columns past the end of this list get
    /// a blank header.
    pub column_headers: Vec<String>,
    /// Number of rows materialized in the DOM at any time. 0 = all rows.
    pub grid_rows: u32,
    /// Total logical row count, used for scrollbar sizing. May be far
    /// larger than the materialized row count.
    pub max_rows_number: u32,
    /// Minimum width in pixels allowed for a column.
    pub column_min_width: f64,
    /// Update the table layout on every mouse-move while dragging a grip,
    /// not only on release.
    pub live_drag: bool,
    /// Custom HTML for the grip handle; the built-in grip is used when the
    /// value is too short to be a tag.
    pub grip_inner_html: String,
    /// Cursor shown when hovering a grip.
    pub hover_cursor: String,
    /// Cursor shown while dragging a grip.
    pub drag_cursor: String,
    /// CSS class of the outer grid table.
    pub main_grid_class_name: String,
    /// CSS class applied to every data cell.
    pub grid_row_class_name: String,
    /// CSS class applied to header cells.
    pub grid_header_class_name: String,
    /// CSS class of the first cell in a row.
    pub left_cell_class_name: String,
    /// CSS class of the last cell in a row.
    pub right_cell_class_name: String,
    /// Tooltip geometry and animation options.
    pub tooltip_options: TooltipOptions,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            column_headers: Vec::new(),
            grid_rows: 0,
            max_rows_number: 0,
            column_min_width: 15.0,
            live_drag: false,
            grip_inner_html: String::new(),
            hover_cursor: "e-resize".to_string(),
            drag_cursor: "e-resize".to_string(),
            main_grid_class_name: "pivotGridTable".to_string(),
            grid_row_class_name: "pivotGridRow".to_string(),
            grid_header_class_name: "pivotGridHeader".to_string(),
            left_cell_class_name: "leftCell".to_string(),
            right_cell_class_name: "rightCell".to_string(),
            tooltip_options: TooltipOptions::default(),
        }
    }
}

/// Tooltip geometry and fade animation options.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TooltipOptions {
    /// Vertical offset from the pointer, in pixels.
    pub top_offset: f64,
    /// Horizontal offset from the pointer, in pixels.
    pub left_offset: f64,
    /// Maximum tooltip width in pixels.
    pub max_width: f64,
    /// Opacity percentage added per animation tick.
    pub fading_speed: u8,
    /// Template for the tooltip body. `{{_name}}` and `{{value}}` are
    /// replaced with the hovered cell's header label and value.
    pub default_html_content: Option<String>,
}

impl Default for TooltipOptions {
    fn default() -> Self {
        Self {
            top_offset: 3.0,
            left_offset: 3.0,
            max_width: 300.0,
            fading_speed: 10,
            default_html_content: None,
        }
    }
}
