//! Viewport subsystem: decides which rows are materialized at any time.
//!
//! A viewport is the pluggable strategy object controlling how scroll
//! events map to data requests. Two variants conform to [`GridViewport`]:
//!
//! - [`PagingViewport`]: a synthetic scrollbar thumb drives the visible
//!   window; rows are re-rendered per window, served from the row cache
//!   when possible.
//! - [`ScrollingViewport`]: native scrolling; rows are appended once the
//!   window approaches the end of loaded data.
//!
//! Shared request/response state lives in [`ViewportCore`], which both
//! variants embed. The trait's default method bodies stand in for the
//! abstract base: calling an operation a variant must override fails with
//! [`PivotError::NotImplemented`].

mod cache;
mod paging;
mod scrolling;
mod surface;

pub use cache::RowCache;
pub use paging::PagingViewport;
pub use scrolling::ScrollingViewport;
pub use surface::GridSurface;

use crate::error::{PivotError, Result};
use crate::types::{
    CellCoord, CellValue, DataRequest, DataResponse, GridOptions, GridRow, RequestId, RowRange,
    ScrollbarSizes,
};

/// Header label used when a column has no configured header.
pub const BLANK_HEADER: &str = "&nbsp;";

type DataRequestHandler = Box<dyn FnMut(&DataRequest)>;
type ScrollbarSizeHandler = Box<dyn FnMut(ScrollbarSizes)>;
type ColumnSizesHandler = Box<dyn FnMut(&[f64])>;
type CellsCreatedHandler = Box<dyn FnMut(&[CellCoord])>;

/// Optional host subscriptions to viewport events.
///
/// The host subscribes explicitly; raising an event with no subscriber is
/// a no-op.
#[derive(Default)]
pub struct ViewportCallbacks {
    data_request: Option<DataRequestHandler>,
    scrollbar_size_changed: Option<ScrollbarSizeHandler>,
    column_sizes_changed: Option<ColumnSizesHandler>,
    cells_created: Option<CellsCreatedHandler>,
}

impl ViewportCallbacks {
    /// Subscribe to data requests: the viewport needs rows it does not
    /// have.
    pub fn on_data_request(&mut self, handler: impl FnMut(&DataRequest) + 'static) {
        self.data_request = Some(Box::new(handler));
    }

    /// Subscribe to scrollbar size changes.
    pub fn on_scrollbar_size_changed(&mut self, handler: impl FnMut(ScrollbarSizes) + 'static) {
        self.scrollbar_size_changed = Some(Box::new(handler));
    }

    /// Subscribe to column size results, emitted after the header row is
    /// measured.
    pub fn on_column_sizes_changed(&mut self, handler: impl FnMut(&[f64]) + 'static) {
        self.column_sizes_changed = Some(Box::new(handler));
    }

    /// Subscribe to cell creation, for attaching interaction behavior to
    /// freshly rendered cells.
    pub fn on_cells_created(&mut self, handler: impl FnMut(&[CellCoord]) + 'static) {
        self.cells_created = Some(Box::new(handler));
    }

    pub(crate) fn has_data_request_handler(&self) -> bool {
        self.data_request.is_some()
    }

    pub(crate) fn raise_data_request(&mut self, request: &DataRequest) {
        if let Some(handler) = self.data_request.as_mut() {
            handler(request);
        }
    }

    pub(crate) fn raise_scrollbar_size_changed(&mut self, sizes: ScrollbarSizes) {
        if let Some(handler) = self.scrollbar_size_changed.as_mut() {
            handler(sizes);
        }
    }

    pub(crate) fn raise_column_sizes_changed(&mut self, widths: &[f64]) {
        if let Some(handler) = self.column_sizes_changed.as_mut() {
            handler(widths);
        }
    }

    pub(crate) fn raise_cells_created(&mut self, cells: &[CellCoord]) {
        if let Some(handler) = self.cells_created.as_mut() {
            handler(cells);
        }
    }
}

/// State shared by every viewport variant: options, the authoritative row
/// height, the outstanding request, and the row cache.
#[derive(Default)]
pub struct ViewportCore {
    options: GridOptions,
    row_height: Option<f64>,
    outstanding: Option<DataRequest>,
    cache: Option<RowCache>,
    row_offset: u32,
    next_request_id: u64,
    callbacks: ViewportCallbacks,
}

impl ViewportCore {
    /// Fresh core with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The active options.
    #[must_use]
    pub fn options(&self) -> &GridOptions {
        &self.options
    }

    pub(crate) fn options_mut(&mut self) -> &mut GridOptions {
        &mut self.options
    }

    pub(crate) fn set_options(&mut self, options: GridOptions) {
        self.options = options;
    }

    /// Event subscriptions.
    pub fn callbacks(&mut self) -> &mut ViewportCallbacks {
        &mut self.callbacks
    }

    /// The authoritative row height, recorded from the first rendered row.
    #[must_use]
    pub fn row_height(&self) -> Option<f64> {
        self.row_height
    }

    pub(crate) fn record_row_height(&mut self, height: f64) {
        if height > 0.0 {
            self.row_height = Some(height);
        }
    }

    /// Offset in the logical dataset of the first rendered row.
    #[must_use]
    pub fn row_offset(&self) -> u32 {
        self.row_offset
    }

    pub(crate) fn set_row_offset(&mut self, offset: u32) {
        self.row_offset = offset;
    }

    /// The request currently in flight, if any.
    #[must_use]
    pub fn outstanding_request(&self) -> Option<DataRequest> {
        self.outstanding
    }

    /// True when `range` is exactly the range already in flight.
    #[must_use]
    pub fn is_range_outstanding(&self, range: RowRange) -> bool {
        self.outstanding.is_some_and(|r| r.range == range)
    }

    /// Issue a request for `range` unless nobody is listening.
    ///
    /// The request becomes the outstanding one; its id is what a response
    /// must present to be accepted.
    pub(crate) fn issue_request(&mut self, range: RowRange) {
        if !self.callbacks.has_data_request_handler() {
            return;
        }
        self.next_request_id += 1;
        let request = DataRequest {
            id: RequestId(self.next_request_id),
            range,
        };
        self.outstanding = Some(request);
        self.callbacks.raise_data_request(&request);
    }

    /// Accept a response if and only if it answers the outstanding
    /// request. Stale or duplicate deliveries return `None` and leave all
    /// state untouched.
    pub(crate) fn accept_response(&mut self, response: DataResponse) -> Option<Vec<GridRow>> {
        let outstanding = self.outstanding?;
        if outstanding.id != response.request.id {
            return None;
        }
        self.outstanding = None;
        self.row_offset = response.request.range.from;
        Some(response.rows)
    }

    /// The cached block, if any.
    #[must_use]
    pub fn cache(&self) -> Option<&RowCache> {
        self.cache.as_ref()
    }

    pub(crate) fn invalidate_cache(&mut self) {
        self.cache = None;
    }

    /// Store `rows` as the cached block unless one is already held.
    pub(crate) fn cache_block_if_empty(&mut self, offset: u32, rows: &[GridRow]) {
        if self.cache.is_none() {
            self.cache = Some(RowCache::new(offset, rows.to_vec()));
        }
    }

    /// Cell lookup by absolute dataset indices, served from the cached
    /// block. Out-of-range lookups return `None`.
    #[must_use]
    pub fn cell_value(&self, col: u32, row: u32) -> Option<&CellValue> {
        self.cache.as_ref().and_then(|c| c.cell(row, col))
    }

    /// Header label for a column; blank when the column has no configured
    /// header.
    #[must_use]
    pub fn column_header(&self, index: usize) -> &str {
        self.options
            .column_headers
            .get(index)
            .map_or(BLANK_HEADER, String::as_str)
    }

    /// Header labels for `count` columns, padding with blanks.
    #[must_use]
    pub fn header_labels(&self, count: usize) -> Vec<String> {
        (0..count).map(|i| self.column_header(i).to_string()).collect()
    }
}

/// The viewport contract: the polymorphic interface every variant
/// implements.
///
/// Default bodies implement the behavior shared by all variants
/// (request/response bookkeeping, the `max_rows_number` accessor pair,
/// cache-backed cell lookup). `create_inner_table` and
/// `populate_grid_with_data` have no shared behavior; their defaults fail
/// with [`PivotError::NotImplemented`] and every concrete variant must
/// override both.
pub trait GridViewport {
    /// Shared viewport state. Variants embed a [`ViewportCore`] and hand
    /// it out here so the default method bodies can reach it.
    fn core(&self) -> &ViewportCore;

    /// Mutable access to the shared state.
    fn core_mut(&mut self) -> &mut ViewportCore;

    /// Adopt the widget's options. Called once before any rendering.
    fn initialize(&mut self, options: GridOptions) {
        self.core_mut().set_options(options);
    }

    /// Build the variant's inner table scaffolding on `surface`.
    fn create_inner_table(&mut self, surface: &mut dyn GridSurface) -> Result<()> {
        let _ = surface;
        Err(PivotError::NotImplemented("create_inner_table"))
    }

    /// Materialize `rows` on `surface`. Called several times over the
    /// grid's lifetime as the visible window moves.
    fn populate_grid_with_data(
        &mut self,
        surface: &mut dyn GridSurface,
        rows: &[GridRow],
    ) -> Result<()> {
        let _ = (surface, rows);
        Err(PivotError::NotImplemented("populate_grid_with_data"))
    }

    /// Deliver the host's answer to an outstanding data request.
    ///
    /// A response that does not match the outstanding request is silently
    /// ignored; this is the idempotence guard against stale or duplicate
    /// deliveries, not an error.
    fn set_data_from_request(
        &mut self,
        surface: &mut dyn GridSurface,
        response: DataResponse,
    ) -> Result<()> {
        let Some(rows) = self.core_mut().accept_response(response) else {
            return Ok(());
        };
        self.populate_grid_with_data(surface, &rows)
    }

    /// Total logical row count used for scrollbar sizing.
    fn max_rows_number(&self) -> u32 {
        self.core().options().max_rows_number
    }

    /// Change the total logical row count and resize the inner grid.
    fn set_max_rows_number(&mut self, surface: &mut dyn GridSurface, value: u32) {
        self.core_mut().options_mut().max_rows_number = value;
        self.calculate_inner_grid_size(surface);
    }

    /// Cell lookup by `(col, row)`; out-of-range lookups return `None`
    /// rather than failing.
    fn get_cell_value(&self, col: u32, row: u32) -> Option<&CellValue> {
        self.core().cell_value(col, row)
    }

    /// Apply host-resized column widths to the inner table. A negative
    /// width leaves that column unchanged.
    fn change_columns_size(&mut self, surface: &mut dyn GridSurface, widths: &[f64]) {
        surface.apply_column_widths(widths);
    }

    /// Recompute sizing-derived state (track height, scrollbar
    /// visibility). Variants override; the base has nothing to size.
    fn calculate_inner_grid_size(&mut self, surface: &mut dyn GridSurface) {
        let _ = surface;
    }

    /// React to a scroll event. `scroll_top` is the thumb position for the
    /// paging variant and the native scroll offset for the scrolling
    /// variant.
    fn on_scroll(&mut self, surface: &mut dyn GridSurface, scroll_top: f64) {
        let _ = (surface, scroll_top);
    }
}

/// Convert a pixel offset to the row index it lands on.
///
/// `round` matches thumb math: a thumb halfway through a row maps to the
/// next row boundary.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn row_at_offset(scroll_top: f64, row_height: f64) -> u32 {
    if row_height <= 0.0 {
        return 0;
    }
    let row = (scroll_top / row_height).round();
    if row <= 0.0 {
        0
    } else {
        row as u32
    }
}
