//! Scrolling (infinite-append) viewport tests
//!
//! Native-scroll row math: append-only population, the next-block request
//! heuristic, and scrollbar visibility notifications.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use common::{make_rows, options, track_requests, track_scrollbar_sizes, TestSurface, ROW_HEIGHT};
use pivotgrid::types::DataResponse;
use pivotgrid::viewport::{GridViewport, ScrollingViewport};

/// Viewport with 5 visible rows, primed with the first 20 rows.
fn primed_viewport() -> (ScrollingViewport, TestSurface) {
    let mut viewport = ScrollingViewport::new();
    let mut surface = TestSurface::new();
    viewport.initialize(options(5, 0));
    viewport
        .create_inner_table(&mut surface)
        .expect("scrolling implements create_inner_table");
    viewport
        .populate_grid_with_data(&mut surface, &make_rows(0, 20, 3))
        .expect("initial populate");
    (viewport, surface)
}

// =============================================================================
// APPEND-ONLY POPULATION
// =============================================================================

#[test]
fn populate_appends_rows_without_clearing() {
    let (mut viewport, mut surface) = primed_viewport();
    assert_eq!(surface.rows.len(), 20);
    assert_eq!(surface.clears, 0, "rows are appended, never replaced");
    assert_eq!(viewport.current_last_row(), 20);

    viewport
        .populate_grid_with_data(&mut surface, &make_rows(20, 30, 3))
        .expect("second populate");

    assert_eq!(surface.rows.len(), 30);
    assert_eq!(surface.clears, 0);
    assert_eq!(viewport.current_last_row(), 30);
    // Window indices continue across batches.
    assert_eq!(surface.rows[20].0, 20);
    assert_eq!(surface.first_cell(20), "r20c0");
}

#[test]
fn container_height_is_fixed_once_from_first_rows() {
    let (mut viewport, mut surface) = primed_viewport();
    // 5 visible rows at 20px plus the border allowance.
    assert_eq!(surface.container_height, Some(105.0));

    surface.container_height = None;
    viewport
        .populate_grid_with_data(&mut surface, &make_rows(20, 30, 3))
        .expect("second populate");
    assert_eq!(
        surface.container_height, None,
        "the container is not resized again"
    );
}

// =============================================================================
// NEXT-BLOCK REQUESTS
// =============================================================================

#[test]
fn reaching_loaded_data_requests_the_next_block() {
    let (mut viewport, mut surface) = primed_viewport();
    let requests = track_requests(&mut viewport);

    // top_row = 15, bottom_row = 20 = current_last_row: time to ask for
    // more, starting one row past the window, sized like the last block.
    viewport.on_scroll(&mut surface, 15.0 * ROW_HEIGHT);

    let requests = requests.borrow();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].range.from, 21);
    assert_eq!(requests[0].range.to, 41, "sized to the previous block");
}

#[test]
fn identical_scroll_positions_request_once() {
    let (mut viewport, mut surface) = primed_viewport();
    let requests = track_requests(&mut viewport);

    viewport.on_scroll(&mut surface, 15.0 * ROW_HEIGHT);
    viewport.on_scroll(&mut surface, 15.0 * ROW_HEIGHT);

    assert_eq!(requests.borrow().len(), 1);
}

#[test]
fn scroll_short_of_loaded_data_requests_nothing() {
    let (mut viewport, mut surface) = primed_viewport();
    let requests = track_requests(&mut viewport);

    // bottom_row = 10 < current_last_row = 20.
    viewport.on_scroll(&mut surface, 5.0 * ROW_HEIGHT);

    assert!(requests.borrow().is_empty());
}

#[test]
fn response_rows_are_appended_and_extend_the_window() {
    let (mut viewport, mut surface) = primed_viewport();
    let requests = track_requests(&mut viewport);

    viewport.on_scroll(&mut surface, 15.0 * ROW_HEIGHT);
    let request = *requests.borrow().last().expect("request issued");

    viewport
        .set_data_from_request(
            &mut surface,
            DataResponse {
                request,
                rows: make_rows(21, 41, 3),
            },
        )
        .expect("matching response");

    assert_eq!(surface.rows.len(), 40);
    assert_eq!(viewport.current_last_row(), 40);
    assert!(viewport.core().outstanding_request().is_none());

    // The next request is sized like this block.
    viewport.on_scroll(&mut surface, 35.0 * ROW_HEIGHT);
    let request = *requests.borrow().last().expect("follow-up request");
    assert_eq!(request.range.from, 41);
    assert_eq!(request.range.to, 61);
}

// =============================================================================
// SCROLLBAR NOTIFICATIONS
// =============================================================================

#[test]
fn scrollbar_appears_only_past_the_visible_window() {
    let mut viewport = ScrollingViewport::new();
    let mut surface = TestSurface::new();
    viewport.initialize(options(5, 0));
    let sizes = track_scrollbar_sizes(&mut viewport);
    viewport
        .create_inner_table(&mut surface)
        .expect("create_inner_table");

    viewport
        .populate_grid_with_data(&mut surface, &make_rows(0, 4, 3))
        .expect("populate under one window");
    assert!(!surface.native_scrollbar);
    assert_eq!(sizes.borrow().len(), 1);
    assert_eq!(sizes.borrow()[0].vertical, 0.0);

    viewport
        .populate_grid_with_data(&mut surface, &make_rows(4, 14, 3))
        .expect("populate past one window");
    assert!(surface.native_scrollbar);
    assert_eq!(sizes.borrow().len(), 2);
    assert_eq!(sizes.borrow()[1].vertical, 17.0);

    // Unchanged thickness: no further notification.
    viewport
        .populate_grid_with_data(&mut surface, &make_rows(14, 24, 3))
        .expect("third populate");
    assert_eq!(sizes.borrow().len(), 2);
}

#[test]
fn first_block_is_cached_for_cell_lookup() {
    let (viewport, _surface) = primed_viewport();
    assert_eq!(
        viewport.get_cell_value(2, 7).map(String::as_str),
        Some("r7c2")
    );
    assert_eq!(viewport.get_cell_value(0, 20), None);
}
