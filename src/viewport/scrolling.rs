//! Scrolling viewport: native scrolling with infinite row append.
//!
//! The container scrolls natively; rows are appended, never replaced. When
//! the visible window approaches the end of loaded data the viewport asks
//! the host for the next block, sized like the last one it received.

use crate::error::Result;
use crate::types::{CellCoord, GridRow, RowRange, ScrollbarSizes};

use super::{row_at_offset, GridSurface, GridViewport, ViewportCore};

/// Border allowance added when fixing the container height.
const CONTAINER_HEIGHT_PADDING: f64 = 5.0;

/// Infinite-append viewport over a natively scrolling container.
pub struct ScrollingViewport {
    core: ViewportCore,
    /// Total rows appended so far; the next block starts past this.
    current_last_row: u32,
    /// Length of the last received block; the size heuristic for the next
    /// request. Zero until the first block arrives.
    last_block_len: u32,
    container_sized: bool,
    current_scrollbar_size: Option<f64>,
}

impl ScrollingViewport {
    /// Fresh scrolling viewport; `initialize` must run before data
    /// arrives.
    #[must_use]
    pub fn new() -> Self {
        Self {
            core: ViewportCore::new(),
            current_last_row: 0,
            last_block_len: 0,
            container_sized: false,
            current_scrollbar_size: None,
        }
    }

    /// Total rows appended so far.
    #[must_use]
    pub fn current_last_row(&self) -> u32 {
        self.current_last_row
    }

    /// Block size for the next request: the last received block's length,
    /// falling back to one visible window before anything has arrived.
    fn next_block_len(&self) -> u32 {
        if self.last_block_len > 0 {
            self.last_block_len
        } else {
            self.core.options().grid_rows
        }
    }
}

impl Default for ScrollingViewport {
    fn default() -> Self {
        Self::new()
    }
}

impl GridViewport for ScrollingViewport {
    fn core(&self) -> &ViewportCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ViewportCore {
        &mut self.core
    }

    fn create_inner_table(&mut self, surface: &mut dyn GridSurface) -> Result<()> {
        surface.set_native_scrollbar(false);
        Ok(())
    }

    fn populate_grid_with_data(
        &mut self,
        surface: &mut dyn GridSurface,
        rows: &[GridRow],
    ) -> Result<()> {
        let mut created = Vec::new();
        let base = self.current_last_row as usize;

        for (index, row) in rows.iter().enumerate() {
            let height = surface.append_row(base + index, row);
            if index == 0 {
                self.core.record_row_height(height);
            }
            let window_row = u32::try_from(base + index).unwrap_or(u32::MAX);
            for col in 0..row.len() {
                created.push(CellCoord {
                    row: window_row,
                    col: u32::try_from(col).unwrap_or(u32::MAX),
                });
            }
        }

        self.core.callbacks().raise_cells_created(&created);

        let block_len = u32::try_from(rows.len()).unwrap_or(u32::MAX);
        self.core
            .cache_block_if_empty(self.core.row_offset(), rows);
        self.current_last_row += block_len;
        if block_len > 0 {
            self.last_block_len = block_len;
        }

        self.calculate_inner_grid_size(surface);
        Ok(())
    }

    fn calculate_inner_grid_size(&mut self, surface: &mut dyn GridSurface) {
        let grid_rows = self.core.options().grid_rows;

        if let Some(row_height) = self.core.row_height() {
            if grid_rows > 0 && !self.container_sized {
                surface.set_container_height(
                    row_height * f64::from(grid_rows) + CONTAINER_HEIGHT_PADDING,
                );
                self.container_sized = true;
            }
        }

        // The scrollbar has to be shown before its thickness can be
        // measured.
        let vertical = if self.current_last_row > grid_rows {
            surface.set_native_scrollbar(true);
            surface.scrollbar_thickness()
        } else {
            surface.set_native_scrollbar(false);
            0.0
        };

        let changed = self
            .current_scrollbar_size
            .is_none_or(|s| (s - vertical).abs() > f64::EPSILON);
        if changed {
            self.current_scrollbar_size = Some(vertical);
            self.core
                .callbacks()
                .raise_scrollbar_size_changed(ScrollbarSizes {
                    horizontal: 0.0,
                    vertical,
                });
        }
    }

    fn on_scroll(&mut self, surface: &mut dyn GridSurface, scroll_top: f64) {
        let _ = surface;
        let Some(row_height) = self.core.row_height() else {
            return;
        };

        let top_row = row_at_offset(scroll_top, row_height);
        let bottom_row = top_row + self.core.options().grid_rows;

        if bottom_row >= self.current_last_row {
            let from = bottom_row + 1;
            let range = RowRange::new(from, from + self.next_block_len());
            if self.core.is_range_outstanding(range) {
                return;
            }
            self.core.issue_request(range);
        }
    }
}
