//! Paging viewport: a synthetic scrollbar thumb drives the visible window.
//!
//! The materialized table never grows past `grid_rows` rows. A detached
//! scroller element whose track height encodes the full logical dataset
//! provides the thumb; every thumb move recomputes the visible window and
//! either re-renders from the row cache or requests the missing block from
//! the host.

use crate::error::Result;
use crate::types::{column_count, CellCoord, GridRow, RowRange, ScrollbarSizes};

use super::{row_at_offset, GridSurface, GridViewport, ViewportCore};

/// Height trimmed off the scroller so it does not overlap the table's
/// bottom border.
const SCROLLER_HEIGHT_TRIM: f64 = 3.0;

/// Thumb-driven virtualizing viewport.
pub struct PagingViewport {
    core: ViewportCore,
    /// One past the last rendered dataset row.
    current_last_row: u32,
    /// Thumb position at the last handled scroll event.
    thumb_position: f64,
    /// Set when a thumb nudge is about to cause a synthetic scroll event
    /// that must not be reprocessed.
    ignore_next_scroll: bool,
    header_built: bool,
    scroller_sized: bool,
    last_scrollbar_thickness: Option<f64>,
}

impl PagingViewport {
    /// Fresh paging viewport; `initialize` must run before data arrives.
    #[must_use]
    pub fn new() -> Self {
        Self {
            core: ViewportCore::new(),
            current_last_row: 0,
            thumb_position: 0.0,
            ignore_next_scroll: false,
            header_built: false,
            scroller_sized: false,
            last_scrollbar_thickness: None,
        }
    }

    /// One past the last rendered dataset row.
    #[must_use]
    pub fn current_last_row(&self) -> u32 {
        self.current_last_row
    }

    /// Render `rows` as the window starting at dataset row `window_start`.
    ///
    /// Clears the previous window, appends at most `grid_rows` rows,
    /// records the first row's measured height as the authoritative row
    /// height, lazily installs the header the first time data shows up,
    /// and reports created cells upward.
    fn render_window(
        &mut self,
        surface: &mut dyn GridSurface,
        window_start: u32,
        rows: &[GridRow],
    ) {
        surface.clear_rows();

        let grid_rows = self.core.options().grid_rows as usize;
        let count = if grid_rows > 0 {
            rows.len().min(grid_rows)
        } else {
            rows.len()
        };

        let mut created = Vec::new();
        for (index, row) in rows.iter().take(count).enumerate() {
            let height = surface.append_row(index, row);
            if index == 0 {
                self.core.record_row_height(height);
            }
            let window_row = u32::try_from(index).unwrap_or(u32::MAX);
            for col in 0..row.len() {
                created.push(CellCoord {
                    row: window_row,
                    col: u32::try_from(col).unwrap_or(u32::MAX),
                });
            }
        }

        if !self.header_built && count > 0 {
            let labels = self.core.header_labels(column_count(rows));
            let widths = surface.install_header(&labels);
            self.header_built = true;
            self.core.callbacks().raise_column_sizes_changed(&widths);
        }

        self.core.callbacks().raise_cells_created(&created);

        self.current_last_row =
            window_start + u32::try_from(count).unwrap_or(u32::MAX);
    }
}

impl Default for PagingViewport {
    fn default() -> Self {
        Self::new()
    }
}

impl GridViewport for PagingViewport {
    fn core(&self) -> &ViewportCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ViewportCore {
        &mut self.core
    }

    fn create_inner_table(&mut self, surface: &mut dyn GridSurface) -> Result<()> {
        surface.set_scroller_visible(false);
        surface.set_track_height(0.0);
        Ok(())
    }

    fn populate_grid_with_data(
        &mut self,
        surface: &mut dyn GridSurface,
        rows: &[GridRow],
    ) -> Result<()> {
        let window_start = self.core.row_offset();
        self.render_window(surface, window_start, rows);
        self.core.cache_block_if_empty(window_start, rows);

        // The scroller is sized to the table exactly once, after the first
        // rows exist to measure.
        if !self.scroller_sized && surface.scroller_height() < 1.0 {
            surface.set_scroller_height(surface.table_height() - SCROLLER_HEIGHT_TRIM);
            self.scroller_sized = true;
        }

        self.calculate_inner_grid_size(surface);
        Ok(())
    }

    fn calculate_inner_grid_size(&mut self, surface: &mut dyn GridSurface) {
        let Some(row_height) = self.core.row_height() else {
            return;
        };
        let max_rows = f64::from(self.max_rows_number());
        if row_height < 1.0 || surface.scroller_height() < 1.0 || max_rows < 1.0 {
            return;
        }

        let track_height = max_rows * row_height;
        surface.set_track_height(track_height);
        surface.set_scroller_visible(track_height > 0.0);

        let thickness = surface.scrollbar_thickness();
        let changed = self
            .last_scrollbar_thickness
            .is_none_or(|t| (t - thickness).abs() > f64::EPSILON);
        if changed {
            self.last_scrollbar_thickness = Some(thickness);
            self.core
                .callbacks()
                .raise_scrollbar_size_changed(ScrollbarSizes {
                    horizontal: 0.0,
                    vertical: thickness,
                });
        }
    }

    fn on_scroll(&mut self, surface: &mut dyn GridSurface, scroll_top: f64) {
        if self.ignore_next_scroll {
            self.ignore_next_scroll = false;
            self.thumb_position = scroll_top;
            return;
        }

        let Some(row_height) = self.core.row_height() else {
            return;
        };

        let top_row = row_at_offset(scroll_top, row_height);
        let bottom_row = top_row + self.core.options().grid_rows;
        let window = RowRange::new(top_row, bottom_row);

        // A window whose bottom sits exactly on the last rendered row
        // would leave the thumb visually stuck on the boundary. Nudge one
        // row in the direction of travel; the synthetic scroll event the
        // nudge fires is consumed by the flag.
        if bottom_row == self.current_last_row {
            let direction = if scroll_top >= self.thumb_position {
                1.0
            } else {
                -1.0
            };
            self.ignore_next_scroll = true;
            surface.set_thumb_position(scroll_top + direction * row_height);
            return;
        }

        // Duplicate scroll-derived ranges collapse onto the request
        // already in flight.
        if self.core.is_range_outstanding(window) {
            return;
        }

        // Snap the thumb onto the row grid.
        surface.set_thumb_position(f64::from(top_row) * row_height);

        if let Some(cached) = self.core.cache().and_then(|c| c.slice(window)) {
            let rows = cached.to_vec();
            self.render_window(surface, top_row, &rows);
        } else {
            self.core.invalidate_cache();
            self.core.issue_request(window);
        }

        self.thumb_position = scroll_top;
    }
}
