//! Base viewport contract tests
//!
//! The trait's default bodies stand in for the abstract base class: the
//! two rendering operations must fail until overridden, while the shared
//! request/response bookkeeping works on any conforming type.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use common::{options, TestSurface};
use pivotgrid::error::PivotError;
use pivotgrid::types::{DataRequest, DataResponse, RequestId, RowRange};
use pivotgrid::viewport::{GridViewport, ViewportCore};

/// A viewport that overrides nothing: exactly what the abstract base
/// provides.
struct BareViewport {
    core: ViewportCore,
}

impl BareViewport {
    fn new() -> Self {
        Self {
            core: ViewportCore::new(),
        }
    }
}

impl GridViewport for BareViewport {
    fn core(&self) -> &ViewportCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ViewportCore {
        &mut self.core
    }
}

#[test]
fn create_inner_table_is_abstract() {
    let mut viewport = BareViewport::new();
    let mut surface = TestSurface::new();

    let err = viewport
        .create_inner_table(&mut surface)
        .expect_err("base operation must fail");
    assert!(matches!(err, PivotError::NotImplemented("create_inner_table")));
    assert_eq!(err.to_string(), "create_inner_table is not implemented");
}

#[test]
fn populate_grid_with_data_is_abstract() {
    let mut viewport = BareViewport::new();
    let mut surface = TestSurface::new();

    let err = viewport
        .populate_grid_with_data(&mut surface, &[])
        .expect_err("base operation must fail");
    assert!(matches!(
        err,
        PivotError::NotImplemented("populate_grid_with_data")
    ));
}

#[test]
fn unsolicited_response_is_silently_dropped() {
    let mut viewport = BareViewport::new();
    let mut surface = TestSurface::new();

    // No request is outstanding, so the response never reaches the
    // (abstract) render path.
    let response = DataResponse {
        request: DataRequest {
            id: RequestId(1),
            range: RowRange::new(0, 5),
        },
        rows: vec![vec!["x".to_string()]],
    };
    viewport
        .set_data_from_request(&mut surface, response)
        .expect("dropped without touching populate_grid_with_data");
    assert!(surface.rows.is_empty());
}

#[test]
fn max_rows_number_accessor_pair_works_on_the_base() {
    let mut viewport = BareViewport::new();
    let mut surface = TestSurface::new();
    viewport.initialize(options(5, 100));

    assert_eq!(viewport.max_rows_number(), 100);
    viewport.set_max_rows_number(&mut surface, 40);
    assert_eq!(viewport.max_rows_number(), 40);
}

#[test]
fn cell_lookup_without_data_returns_none() {
    let viewport = BareViewport::new();
    assert_eq!(viewport.get_cell_value(0, 0), None);
}

#[test]
fn change_columns_size_reaches_the_surface() {
    let mut viewport = BareViewport::new();
    let mut surface = TestSurface::new();
    viewport.change_columns_size(&mut surface, &[50.0, 60.0]);
    assert_eq!(surface.applied_widths, vec![vec![50.0, 60.0]]);
}
