//! The seam between viewport logic and the rendered grid.
//!
//! Viewports never touch the DOM. Everything they need from the page —
//! materializing rows, measuring heights and widths, sizing the synthetic
//! scroll track — goes through this trait. The wasm widget implements it
//! over `web-sys` nodes; tests implement it in memory with fixed metrics.

use crate::types::CellValue;

/// Rendering target driven by a viewport.
///
/// Pixel-returning methods report post-layout measurements, so a viewport
/// can record the authoritative row height from the first row it renders.
pub trait GridSurface {
    /// Remove every materialized data row.
    fn clear_rows(&mut self);

    /// Append one rendered row at window index `row`; returns the row's
    /// measured pixel height.
    fn append_row(&mut self, row: usize, cells: &[CellValue]) -> f64;

    /// Install the header row; returns the measured per-column pixel
    /// widths.
    fn install_header(&mut self, labels: &[String]) -> Vec<f64>;

    /// Measured height of the materialized inner table.
    fn table_height(&self) -> f64;

    /// Current height of the synthetic scroller element.
    fn scroller_height(&self) -> f64;

    /// Size the synthetic scroller element.
    fn set_scroller_height(&mut self, px: f64);

    /// Size the synthetic scroll track content; the track height encodes
    /// the full logical dataset height.
    fn set_track_height(&mut self, px: f64);

    /// Show or hide the synthetic scroller.
    fn set_scroller_visible(&mut self, visible: bool);

    /// Move the scrollbar thumb to an absolute pixel offset.
    fn set_thumb_position(&mut self, px: f64);

    /// Fix the scroll container's height (infinite-scroll variant).
    fn set_container_height(&mut self, px: f64);

    /// Toggle the container's native vertical scrollbar.
    fn set_native_scrollbar(&mut self, enabled: bool);

    /// Width consumed by the native vertical scrollbar: the container's
    /// offset/client width difference.
    fn scrollbar_thickness(&self) -> f64;

    /// Set column widths in pixels. A negative entry leaves that column
    /// unchanged.
    fn apply_column_widths(&mut self, widths: &[f64]);
}
