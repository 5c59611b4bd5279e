//! Main `PivotGrid` widget - the wasm-exported entry point.
//!
//! The widget owns the DOM scaffolding and a single viewport instance:
//! - Builds the outer table and the variant-specific inner containers
//! - Subscribes to the viewport's callbacks, forwarding data requests to
//!   the host page and widening the header row when a scrollbar appears
//! - Creates the column resize grips and the shared cell tooltip
//!
//! Event handlers share one per-instance state object behind
//! `Rc<RefCell<SharedState>>`; nothing is stashed on DOM nodes.

#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod grips;
#[cfg(target_arch = "wasm32")]
mod tooltip_dom;

use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use std::cell::RefCell;
#[cfg(target_arch = "wasm32")]
use std::rc::{Rc, Weak};

#[cfg(target_arch = "wasm32")]
use js_sys::Function;
#[cfg(target_arch = "wasm32")]
use serde::{Deserialize, Serialize};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::closure::Closure;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;
#[cfg(target_arch = "wasm32")]
use web_sys::{Document, Element, Event, HtmlElement, MouseEvent};

#[cfg(target_arch = "wasm32")]
use crate::resize::ColumnResizer;
#[cfg(target_arch = "wasm32")]
use crate::tooltip::render_template;
#[cfg(target_arch = "wasm32")]
use crate::types::{
    column_count, CellCoord, DataRequest, DataResponse, GridOptions, GridRow, RequestId, RowRange,
};
#[cfg(target_arch = "wasm32")]
use crate::viewport::{
    GridSurface, GridViewport, PagingViewport, ScrollingViewport, BLANK_HEADER,
};

#[cfg(target_arch = "wasm32")]
use dom::{build_scaffolding, DomSurface};
#[cfg(target_arch = "wasm32")]
use grips::ActiveDrag;
#[cfg(target_arch = "wasm32")]
use tooltip_dom::TooltipController;

/// Tooltip body used when the host configures none.
#[cfg(target_arch = "wasm32")]
const DEFAULT_TOOLTIP_TEMPLATE: &str = "<b>{{_name}}</b>: {{value}}";

/// Header cell class marking the scrollbar spacer column.
#[cfg(target_arch = "wasm32")]
const SCROLLBAR_ROW_CLASS: &str = "scrollbarRow";

/// Per-instance widget state shared with event handlers.
#[cfg(target_arch = "wasm32")]
pub(crate) struct SharedState {
    pub(crate) options: GridOptions,
    pub(crate) viewport: Box<dyn GridViewport>,
    pub(crate) surface: DomSurface,
    pub(crate) resizer: Option<ColumnResizer>,
    pub(crate) grips: Vec<HtmlElement>,
    pub(crate) grips_container: Option<HtmlElement>,
    pub(crate) drag: Option<ActiveDrag>,
    pub(crate) drag_cursor_style: Option<Element>,
}

/// Wire shape of an outbound data request: the host fills `gridData` and
/// hands the object back through `populate_data`.
#[cfg(target_arch = "wasm32")]
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WireRequest {
    id: u64,
    from: u32,
    to: u32,
    grid_data: Option<Vec<GridRow>>,
}

#[cfg(target_arch = "wasm32")]
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireResponse {
    id: u64,
    from: u32,
    to: u32,
    #[serde(default)]
    grid_data: Option<Vec<GridRow>>,
}

#[cfg(target_arch = "wasm32")]
#[derive(Serialize)]
struct WireCell {
    row: u32,
    col: u32,
}

/// The main widget struct exported to JavaScript
#[wasm_bindgen]
pub struct PivotGrid {
    #[cfg(target_arch = "wasm32")]
    state: Rc<RefCell<SharedState>>,
    #[cfg(target_arch = "wasm32")]
    tooltip: Rc<RefCell<TooltipController>>,
    #[cfg(target_arch = "wasm32")]
    request_sink: Rc<RefCell<Option<Function>>>,
    #[cfg(target_arch = "wasm32")]
    cells_sink: Rc<RefCell<Option<Function>>>,
    #[cfg(target_arch = "wasm32")]
    pending_requests: Rc<RefCell<Vec<JsValue>>>,
    #[cfg(target_arch = "wasm32")]
    pending_cells: Rc<RefCell<Vec<JsValue>>>,
    #[cfg(target_arch = "wasm32")]
    viewport_kind: String,
    #[cfg(target_arch = "wasm32")]
    #[allow(dead_code)]
    grip_closures: Vec<Closure<dyn FnMut(MouseEvent)>>,
    #[cfg(target_arch = "wasm32")]
    #[allow(dead_code)]
    scroll_closure: Option<Closure<dyn FnMut(Event)>>,
    #[cfg(target_arch = "wasm32")]
    #[allow(dead_code)]
    resize_closure: Option<Closure<dyn FnMut(Event)>>,
    #[cfg(target_arch = "wasm32")]
    #[allow(dead_code)]
    doc_move: Rc<Closure<dyn FnMut(MouseEvent)>>,
    #[cfg(target_arch = "wasm32")]
    #[allow(dead_code)]
    doc_up: Rc<Closure<dyn FnMut(MouseEvent)>>,
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
impl PivotGrid {
    /// Create the widget inside `host`.
    ///
    /// `options` is a plain JS object matching [`GridOptions`];
    /// `viewport_kind` selects the strategy: `"paging"` or `"scrolling"`.
    pub fn create(
        host: HtmlElement,
        options: JsValue,
        viewport_kind: &str,
    ) -> Result<PivotGrid, JsValue> {
        console_error_panic_hook::set_once();

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let options: GridOptions = serde_wasm_bindgen::from_value(options)
            .map_err(|e| JsValue::from_str(&format!("Invalid options: {e}")))?;

        let mut viewport: Box<dyn GridViewport> = match viewport_kind {
            "paging" => Box::new(PagingViewport::new()),
            "scrolling" => Box::new(ScrollingViewport::new()),
            other => {
                return Err(JsValue::from_str(&format!(
                    "Invalid options: unknown viewport kind {other:?}"
                )))
            }
        };

        let scaffolding = build_scaffolding(&document, &host, &options)?;
        let mut surface = match viewport_kind {
            "paging" => DomSurface::paging(
                document.clone(),
                scaffolding.outer_table.clone(),
                &scaffolding.inner_cell,
                options.clone(),
            )?,
            _ => DomSurface::scrolling(
                document.clone(),
                scaffolding.outer_table.clone(),
                &scaffolding.inner_cell,
                options.clone(),
            )?,
        };

        let tooltip = Rc::new(RefCell::new(TooltipController::new(
            document.clone(),
            options.tooltip_options.clone(),
        )));
        Self::wire_cell_listeners(&mut surface, &tooltip, &options);

        let request_sink: Rc<RefCell<Option<Function>>> = Rc::new(RefCell::new(None));
        let cells_sink: Rc<RefCell<Option<Function>>> = Rc::new(RefCell::new(None));

        // Viewport events fire while the widget state is mutably borrowed,
        // and a host may answer a data request synchronously by calling
        // populate_data. Handlers therefore only enqueue; event closures
        // drain the queues to JS after releasing the borrow.
        let pending_requests: Rc<RefCell<Vec<JsValue>>> = Rc::new(RefCell::new(Vec::new()));
        let pending_cells: Rc<RefCell<Vec<JsValue>>> = Rc::new(RefCell::new(Vec::new()));

        viewport.initialize(options.clone());
        Self::wire_viewport_callbacks(
            &mut *viewport,
            &document,
            &scaffolding.outer_table,
            &pending_requests,
            &pending_cells,
        );

        viewport.create_inner_table(&mut surface)?;
        if !options.data.is_empty() {
            let data = options.data.clone();
            viewport.populate_grid_with_data(&mut surface, &data)?;
        }
        // The scrolling viewport leaves the header row to the widget;
        // infer the column count from the initial dataset.
        if viewport_kind == "scrolling" {
            let count = column_count(&options.data);
            if count > 0 {
                let labels: Vec<String> = (0..count)
                    .map(|i| {
                        options
                            .column_headers
                            .get(i)
                            .cloned()
                            .unwrap_or_else(|| BLANK_HEADER.to_string())
                    })
                    .collect();
                let _ = surface.install_header(&labels);
            }
        }
        // Nothing is subscribed this early; drop what the initial
        // populate queued.
        pending_requests.borrow_mut().clear();
        pending_cells.borrow_mut().clear();

        let scroll_element = surface.scroll_element();
        let state = Rc::new(RefCell::new(SharedState {
            options,
            viewport,
            surface,
            resizer: None,
            grips: Vec::new(),
            grips_container: None,
            drag: None,
            drag_cursor_style: None,
        }));

        // Scroll events drive the viewport's window math.
        let scroll_closure = scroll_element.map(|element| {
            let state = Rc::clone(&state);
            let target = element.clone();
            let pending_requests = Rc::clone(&pending_requests);
            let pending_cells = Rc::clone(&pending_cells);
            let request_sink = Rc::clone(&request_sink);
            let cells_sink = Rc::clone(&cells_sink);
            let closure = Closure::wrap(Box::new(move |_event: Event| {
                {
                    let s = &mut *state.borrow_mut();
                    let SharedState {
                        viewport, surface, ..
                    } = s;
                    viewport.on_scroll(&mut *surface, f64::from(target.scroll_top()));
                }
                drain_notifications(&pending_requests, &request_sink);
                drain_notifications(&pending_cells, &cells_sink);
            }) as Box<dyn FnMut(Event)>);
            let _ = element
                .add_event_listener_with_callback("scroll", closure.as_ref().unchecked_ref());
            closure
        });

        // Document-level drag listeners, attached per gesture.
        let doc_move: Rc<Closure<dyn FnMut(MouseEvent)>> = Rc::new(Closure::wrap(Box::new({
            let state = Rc::clone(&state);
            move |event: MouseEvent| {
                grips::on_drag_move(&state, f64::from(event.page_x()));
            }
        })
            as Box<dyn FnMut(MouseEvent)>));
        let up_slot: Rc<RefCell<Weak<Closure<dyn FnMut(MouseEvent)>>>> =
            Rc::new(RefCell::new(Weak::new()));
        let doc_up: Rc<Closure<dyn FnMut(MouseEvent)>> = Rc::new(Closure::wrap(Box::new({
            let state = Rc::clone(&state);
            let doc_move = Rc::clone(&doc_move);
            let up_slot = Rc::clone(&up_slot);
            move |event: MouseEvent| {
                if let Some(doc_up) = up_slot.borrow().upgrade() {
                    grips::on_drag_end(&state, f64::from(event.page_x()), &doc_move, &doc_up);
                }
            }
        })
            as Box<dyn FnMut(MouseEvent)>));
        *up_slot.borrow_mut() = Rc::downgrade(&doc_up);

        grips::inject_grip_styles(&document)?;
        let grip_closures = grips::create_grips(&document, &state, &doc_move, &doc_up)?;

        // Keep grips aligned when the browser reflows the table.
        let resize_closure = {
            let state = Rc::clone(&state);
            let closure = Closure::wrap(Box::new(move |_event: Event| {
                grips::on_window_resize(&state);
            }) as Box<dyn FnMut(Event)>);
            if let Some(window) = web_sys::window() {
                let _ = window
                    .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
            }
            Some(closure)
        };

        Ok(PivotGrid {
            state,
            tooltip,
            request_sink,
            cells_sink,
            pending_requests,
            pending_cells,
            viewport_kind: viewport_kind.to_string(),
            grip_closures,
            scroll_closure,
            resize_closure,
            doc_move,
            doc_up,
        })
    }

    /// Register the host callback invoked when the viewport needs rows it
    /// does not have. The callback receives
    /// `{id, from, to, gridData: null}`.
    pub fn on_request_data(&self, callback: Function) {
        *self.request_sink.borrow_mut() = Some(callback);
    }

    /// Register a host callback invoked with the coordinates of freshly
    /// rendered cells.
    pub fn on_cells_created(&self, callback: Function) {
        *self.cells_sink.borrow_mut() = Some(callback);
    }

    /// Deliver requested rows back to the viewport. The object must be the
    /// one received through the request callback, with `gridData` filled.
    pub fn populate_data(&self, response: JsValue) -> Result<(), JsValue> {
        let wire: WireResponse = serde_wasm_bindgen::from_value(response)
            .map_err(|e| JsValue::from_str(&format!("Invalid response: {e}")))?;
        let response = DataResponse {
            request: DataRequest {
                id: RequestId(wire.id),
                range: RowRange::new(wire.from, wire.to),
            },
            rows: wire.grid_data.unwrap_or_default(),
        };

        {
            let s = &mut *self.state.borrow_mut();
            let SharedState {
                viewport, surface, ..
            } = s;
            viewport.set_data_from_request(&mut *surface, response)?;
            grips::sync_grips(s);
        }
        drain_notifications(&self.pending_requests, &self.request_sink);
        drain_notifications(&self.pending_cells, &self.cells_sink);
        Ok(())
    }

    /// Total logical row count used for scrollbar sizing.
    pub fn max_rows_number(&self) -> u32 {
        self.state.borrow().viewport.max_rows_number()
    }

    /// Change the total logical row count; the scroll track resizes to
    /// match.
    pub fn set_max_rows_number(&self, value: u32) {
        let s = &mut *self.state.borrow_mut();
        s.options.max_rows_number = value;
        let SharedState {
            viewport, surface, ..
        } = s;
        viewport.set_max_rows_number(&mut *surface, value);
    }

    /// The active viewport strategy: `"paging"` or `"scrolling"`.
    pub fn viewport_kind(&self) -> String {
        self.viewport_kind.clone()
    }

    /// Cell lookup by `(col, row)`; returns `undefined` for anything
    /// outside the cached block.
    pub fn cell_value(&self, col: u32, row: u32) -> Option<String> {
        self.state.borrow().viewport.get_cell_value(col, row).cloned()
    }
}

#[cfg(target_arch = "wasm32")]
impl PivotGrid {
    /// Attach the shared tooltip enter/leave handlers used by every
    /// rendered cell. Content is resolved from the cell's structured
    /// coordinates, never from its id string.
    fn wire_cell_listeners(
        surface: &mut DomSurface,
        tooltip: &Rc<RefCell<TooltipController>>,
        options: &GridOptions,
    ) {
        let headers = options.column_headers.clone();
        let template = options
            .tooltip_options
            .default_html_content
            .clone()
            .unwrap_or_else(|| DEFAULT_TOOLTIP_TEMPLATE.to_string());

        let enter = Closure::wrap(Box::new({
            let tooltip = Rc::clone(tooltip);
            move |event: MouseEvent| {
                let Some(target) = event
                    .target()
                    .and_then(|t| t.dyn_into::<HtmlElement>().ok())
                else {
                    return;
                };
                let Some(col) = target
                    .get_attribute("data-col")
                    .and_then(|v| v.parse::<usize>().ok())
                else {
                    return;
                };
                let header = headers.get(col).map_or(BLANK_HEADER, String::as_str);
                let value = target.inner_html();
                let html = render_template(&template, header, &value);
                if let Err(e) = TooltipController::show(
                    &tooltip,
                    &html,
                    f64::from(event.page_x()),
                    f64::from(event.page_y()),
                ) {
                    web_sys::console::error_1(&JsValue::from_str(&e.to_string()));
                }
            }
        }) as Box<dyn FnMut(MouseEvent)>);

        let leave = Closure::wrap(Box::new({
            let tooltip = Rc::clone(tooltip);
            move |_event: MouseEvent| {
                TooltipController::hide(&tooltip);
            }
        }) as Box<dyn FnMut(MouseEvent)>);

        surface.set_cell_listeners(enter, leave);
    }

    /// Subscribe the widget to its viewport's events.
    ///
    /// Handlers run while the widget state is mutably borrowed, so they
    /// never call into JS themselves: host-bound notifications are
    /// enqueued and drained by the event closures after the borrow ends.
    fn wire_viewport_callbacks(
        viewport: &mut dyn GridViewport,
        document: &Document,
        outer_table: &web_sys::HtmlTableElement,
        pending_requests: &Rc<RefCell<Vec<JsValue>>>,
        pending_cells: &Rc<RefCell<Vec<JsValue>>>,
    ) {
        let callbacks = viewport.core_mut().callbacks();

        callbacks.on_data_request({
            let queue = Rc::clone(pending_requests);
            move |request| {
                let wire = WireRequest {
                    id: request.id.0,
                    from: request.range.from,
                    to: request.range.to,
                    grid_data: None,
                };
                if let Ok(value) = serde_wasm_bindgen::to_value(&wire) {
                    queue.borrow_mut().push(value);
                }
            }
        });

        callbacks.on_scrollbar_size_changed({
            let document = document.clone();
            let table = outer_table.clone();
            move |sizes| {
                if sizes.vertical <= 0.0 {
                    return;
                }
                let spacer = match table.query_selector(&format!(".{SCROLLBAR_ROW_CLASS}")) {
                    Ok(Some(th)) => th,
                    _ => {
                        let Ok(th) = document.create_element("th") else {
                            return;
                        };
                        th.set_class_name(SCROLLBAR_ROW_CLASS);
                        th.set_inner_html(BLANK_HEADER);
                        let Ok(Some(header_row)) = table.query_selector("thead>tr") else {
                            return;
                        };
                        if header_row.append_child(&th).is_err() {
                            return;
                        }
                        th
                    }
                };
                if let Some(el) = spacer.dyn_ref::<HtmlElement>() {
                    let _ = el
                        .style()
                        .set_property("width", &format!("{}px", sizes.vertical));
                }
            }
        });

        callbacks.on_cells_created({
            let queue = Rc::clone(pending_cells);
            move |cells: &[CellCoord]| {
                if cells.is_empty() {
                    return;
                }
                let wire: Vec<WireCell> = cells
                    .iter()
                    .map(|c| WireCell {
                        row: c.row,
                        col: c.col,
                    })
                    .collect();
                if let Ok(value) = serde_wasm_bindgen::to_value(&wire) {
                    queue.borrow_mut().push(value);
                }
            }
        });
    }
}

/// Hand queued notifications to the subscribed JS callback, if any. The
/// queue is always emptied, so an unsubscribed host does not accumulate
/// stale notifications.
#[cfg(target_arch = "wasm32")]
fn drain_notifications(queue: &Rc<RefCell<Vec<JsValue>>>, sink: &Rc<RefCell<Option<Function>>>) {
    let drained: Vec<JsValue> = queue.borrow_mut().drain(..).collect();
    if drained.is_empty() {
        return;
    }
    let Some(callback) = sink.borrow().clone() else {
        return;
    };
    for value in drained {
        let _ = callback.call1(&JsValue::NULL, &value);
    }
}
