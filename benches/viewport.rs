//! Benchmarks for viewport window math.
//!
//! Run with: cargo bench
//!
//! Results are saved to `target/criterion/` with HTML reports.
#![allow(clippy::expect_used, clippy::unwrap_used)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use pivotgrid::types::{CellValue, GridOptions};
use pivotgrid::viewport::{GridSurface, GridViewport, PagingViewport};

/// Surface that swallows everything at a fixed row height.
struct NullSurface;

impl GridSurface for NullSurface {
    fn clear_rows(&mut self) {}
    fn append_row(&mut self, _row: usize, _cells: &[CellValue]) -> f64 {
        20.0
    }
    fn install_header(&mut self, labels: &[String]) -> Vec<f64> {
        vec![80.0; labels.len()]
    }
    fn table_height(&self) -> f64 {
        100.0
    }
    fn scroller_height(&self) -> f64 {
        100.0
    }
    fn set_scroller_height(&mut self, _px: f64) {}
    fn set_track_height(&mut self, _px: f64) {}
    fn set_scroller_visible(&mut self, _visible: bool) {}
    fn set_thumb_position(&mut self, _px: f64) {}
    fn set_container_height(&mut self, _px: f64) {}
    fn set_native_scrollbar(&mut self, _enabled: bool) {}
    fn scrollbar_thickness(&self) -> f64 {
        17.0
    }
    fn apply_column_widths(&mut self, _widths: &[f64]) {}
}

fn primed_viewport(rows: u32, cols: u32) -> (PagingViewport, NullSurface) {
    let mut viewport = PagingViewport::new();
    let mut surface = NullSurface;
    viewport.initialize(GridOptions {
        grid_rows: 20,
        max_rows_number: rows,
        ..GridOptions::default()
    });
    let data: Vec<Vec<String>> = (0..rows)
        .map(|r| (0..cols).map(|c| format!("r{r}c{c}")).collect())
        .collect();
    viewport
        .populate_grid_with_data(&mut surface, &data)
        .expect("populate");
    (viewport, surface)
}

/// Benchmark cache-hit scrolling: every window re-render is served from
/// the cached block.
fn bench_cache_hit_scroll(c: &mut Criterion) {
    let (mut viewport, mut surface) = primed_viewport(10_000, 8);

    c.bench_function("paging_scroll_cache_hit", |b| {
        let mut offset = 0.0;
        b.iter(|| {
            offset = (offset + 40.0) % 150_000.0;
            viewport.on_scroll(&mut surface, black_box(offset));
        });
    });
}

/// Benchmark the full populate path for one visible window.
fn bench_populate_window(c: &mut Criterion) {
    let (mut viewport, mut surface) = primed_viewport(100, 8);
    let window: Vec<Vec<String>> = (0..20u32)
        .map(|r| (0..8u32).map(|col| format!("r{r}c{col}")).collect())
        .collect();

    c.bench_function("paging_populate_window", |b| {
        b.iter(|| {
            viewport
                .populate_grid_with_data(&mut surface, black_box(&window))
                .expect("populate");
        });
    });
}

criterion_group!(benches, bench_cache_hit_scroll, bench_populate_window);
criterion_main!(benches);
