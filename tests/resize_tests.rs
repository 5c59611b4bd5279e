//! Column resize invariant tests
//!
//! Dragging grip `i` by delta `d` must change column `i` by `d` and
//! column `i+1` by `-d`, leaving every other column and the total row
//! width unchanged.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use pivotgrid::resize::{ColumnResizer, DragGesture};
use test_case::test_case;

const MIN_WIDTH: f64 = 15.0;

fn resizer() -> ColumnResizer {
    ColumnResizer::new(vec![100.0, 80.0, 120.0, 60.0], MIN_WIDTH, 2.0)
}

#[test_case(0, 10.0 ; "grow first column")]
#[test_case(0, -10.0 ; "shrink first column")]
#[test_case(1, 37.5 ; "fractional delta")]
#[test_case(2, -44.0 ; "shrink third column")]
fn drag_moves_width_between_the_grip_pair(index: usize, delta: f64) {
    let mut r = resizer();
    let before = r.widths().to_vec();
    let total = r.total_width();

    let applied = r.resize_by(index, delta);

    assert_eq!(applied, delta, "delta within bounds applies fully");
    assert_eq!(r.widths()[index], before[index] + delta);
    assert_eq!(r.widths()[index + 1], before[index + 1] - delta);
    for (i, (&now, &was)) in r.widths().iter().zip(&before).enumerate() {
        if i != index && i != index + 1 {
            assert_eq!(now, was, "column {i} must be untouched");
        }
    }
    assert_eq!(r.total_width(), total, "total row width is invariant");
}

#[test_case(0, 1000.0, 65.0 ; "clamped by right neighbor")]
#[test_case(0, -1000.0, -85.0 ; "clamped by dragged column")]
#[test_case(3, 10.0, 0.0 ; "last grip has no neighbor")]
fn drag_is_clamped_at_min_width(index: usize, delta: f64, expected: f64) {
    let mut r = resizer();
    let total = r.total_width();

    let applied = r.resize_by(index, delta);

    assert_eq!(applied, expected);
    assert_eq!(r.total_width(), total);
    for &width in r.widths() {
        assert!(width >= MIN_WIDTH, "no column below the minimum width");
    }
}

#[test]
fn gesture_end_equals_sum_of_live_increments() {
    // The same pointer path must land on the same widths whether applied
    // live or only on release.
    let path = [210.0, 232.0, 190.0, 205.0];

    let mut live = resizer();
    let mut live_gesture = DragGesture::new(1, 200.0);
    for x in path {
        live_gesture.drag_to(&mut live, x);
    }

    let mut deferred = resizer();
    let mut deferred_gesture = DragGesture::new(1, 200.0);
    deferred_gesture.drag_to(&mut deferred, path[path.len() - 1]);

    assert_eq!(live.widths(), deferred.widths());
}

#[test]
fn gesture_respects_bounds_across_moves() {
    let mut r = resizer();
    let mut gesture = DragGesture::new(2, 300.0);

    // Way past the neighbor's minimum: only 45px are available.
    gesture.drag_to(&mut r, 900.0);
    assert_eq!(r.widths(), &[100.0, 80.0, 165.0, 15.0]);

    // Coming back re-opens the clamped headroom.
    gesture.drag_to(&mut r, 310.0);
    assert_eq!(r.widths(), &[100.0, 80.0, 130.0, 50.0]);
}
