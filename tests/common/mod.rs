//! Common test utilities for exercising viewports without a DOM.
//!
//! `TestSurface` implements `GridSurface` in memory with fixed metrics and
//! records everything a viewport does to it; `track_requests` captures the
//! data requests a viewport raises.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use std::cell::RefCell;
use std::rc::Rc;

use pivotgrid::types::{DataRequest, GridOptions, GridRow, ScrollbarSizes};
use pivotgrid::viewport::{GridSurface, GridViewport};

/// Fixed row height used by the in-memory surface.
pub const ROW_HEIGHT: f64 = 20.0;

/// Fixed per-column width reported for installed headers.
pub const COLUMN_WIDTH: f64 = 80.0;

/// In-memory `GridSurface` with fixed metrics.
pub struct TestSurface {
    /// Height reported for every appended row.
    pub row_height: f64,
    /// Currently materialized rows as (window index, cells).
    pub rows: Vec<(usize, GridRow)>,
    /// Number of `clear_rows` calls.
    pub clears: u32,
    /// Labels passed to `install_header`, if it ran.
    pub header_labels: Option<Vec<String>>,
    /// Scroll track content height.
    pub track_height: f64,
    /// Synthetic scroller visibility.
    pub scroller_visible: bool,
    /// Synthetic scroller element height.
    pub scroller_height: f64,
    /// Last thumb position set by the viewport.
    pub thumb_position: f64,
    /// Every thumb move, in order.
    pub thumb_moves: Vec<f64>,
    /// Fixed container height (scrolling variant), if set.
    pub container_height: Option<f64>,
    /// Native scrollbar toggle (scrolling variant).
    pub native_scrollbar: bool,
    /// Thickness reported for the scrollbar.
    pub scrollbar_thickness: f64,
    /// Every width set passed to `apply_column_widths`.
    pub applied_widths: Vec<Vec<f64>>,
}

impl TestSurface {
    pub fn new() -> Self {
        Self {
            row_height: ROW_HEIGHT,
            rows: Vec::new(),
            clears: 0,
            header_labels: None,
            track_height: 0.0,
            scroller_visible: false,
            scroller_height: 0.0,
            thumb_position: 0.0,
            thumb_moves: Vec::new(),
            container_height: None,
            native_scrollbar: false,
            scrollbar_thickness: 17.0,
            applied_widths: Vec::new(),
        }
    }

    /// First cell of the materialized row at window index `index`.
    pub fn first_cell(&self, index: usize) -> &str {
        &self.rows[index].1[0]
    }
}

impl GridSurface for TestSurface {
    fn clear_rows(&mut self) {
        self.rows.clear();
        self.clears += 1;
    }

    fn append_row(&mut self, row: usize, cells: &[String]) -> f64 {
        self.rows.push((row, cells.to_vec()));
        self.row_height
    }

    fn install_header(&mut self, labels: &[String]) -> Vec<f64> {
        self.header_labels = Some(labels.to_vec());
        vec![COLUMN_WIDTH; labels.len()]
    }

    fn table_height(&self) -> f64 {
        self.row_height * self.rows.len() as f64
    }

    fn scroller_height(&self) -> f64 {
        self.scroller_height
    }

    fn set_scroller_height(&mut self, px: f64) {
        self.scroller_height = px;
    }

    fn set_track_height(&mut self, px: f64) {
        self.track_height = px;
    }

    fn set_scroller_visible(&mut self, visible: bool) {
        self.scroller_visible = visible;
    }

    fn set_thumb_position(&mut self, px: f64) {
        self.thumb_position = px;
        self.thumb_moves.push(px);
    }

    fn set_container_height(&mut self, px: f64) {
        self.container_height = Some(px);
    }

    fn set_native_scrollbar(&mut self, enabled: bool) {
        self.native_scrollbar = enabled;
    }

    fn scrollbar_thickness(&self) -> f64 {
        self.scrollbar_thickness
    }

    fn apply_column_widths(&mut self, widths: &[f64]) {
        self.applied_widths.push(widths.to_vec());
    }
}

/// Dataset rows `from..to` with `cols` columns, cells labelled `r{r}c{c}`.
pub fn make_rows(from: u32, to: u32, cols: u32) -> Vec<GridRow> {
    (from..to)
        .map(|r| (0..cols).map(|c| format!("r{r}c{c}")).collect())
        .collect()
}

/// Options with the fields the viewports care about.
pub fn options(grid_rows: u32, max_rows_number: u32) -> GridOptions {
    GridOptions {
        grid_rows,
        max_rows_number,
        column_headers: vec!["Name".to_string(), "Value".to_string(), "Delta".to_string()],
        ..GridOptions::default()
    }
}

/// Record every data request the viewport raises.
pub fn track_requests(viewport: &mut dyn GridViewport) -> Rc<RefCell<Vec<DataRequest>>> {
    let requests = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&requests);
    viewport
        .core_mut()
        .callbacks()
        .on_data_request(move |request| sink.borrow_mut().push(*request));
    requests
}

/// Record every scrollbar size notification the viewport raises.
pub fn track_scrollbar_sizes(viewport: &mut dyn GridViewport) -> Rc<RefCell<Vec<ScrollbarSizes>>> {
    let sizes = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&sizes);
    viewport
        .core_mut()
        .callbacks()
        .on_scrollbar_size_changed(move |s| sink.borrow_mut().push(s));
    sizes
}
