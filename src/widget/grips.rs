//! Column resize grips: DOM glue over [`crate::resize`].
//!
//! A grip `<div>` sits on every column boundary of the outer table.
//! Dragging one attaches document-level mousemove/mouseup listeners for
//! the duration of the gesture; both are detached unconditionally on
//! mouseup. Width math lives in [`ColumnResizer`]; this module only moves
//! pixels between it and the DOM.

#![cfg(target_arch = "wasm32")]

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, MouseEvent};

use crate::error::{PivotError, Result};
use crate::resize::{ColumnResizer, DragGesture};
use crate::viewport::GridSurface;

use super::dom::dom_err;
use super::SharedState;

/// Cell spacing assumed when the table reports none.
const DEFAULT_CELL_SPACING: f64 = 2.0;

/// Grip stylesheet, injected once per document.
const GRIP_STYLES: &str = "\
.pivotGridGrips{height:0px;position:relative;}\
.pivotGridGrip{margin-left:-2px;position:absolute;z-index:5;}\
.pivotGridGrip .pivotGridColResizer{position:absolute;opacity:0;width:10px;height:100%;top:0px}\
.pivotGridTable,.pivotGridInnerTable{table-layout:fixed;}\
.pivotGridTable td,.pivotGridTable th{overflow:hidden;padding-left:0!important;padding-right:0!important;}\
.pivotGridLastGrip{position:absolute;width:1px;}\
.pivotGridGripDrag{margin-left:2px;border-left:1px dotted black;}";

/// An in-flight drag plus the latest pointer position, for deferred
/// (non-live) layout application on release.
pub(crate) struct ActiveDrag {
    pub(crate) gesture: DragGesture,
    pub(crate) last_x: f64,
}

pub(crate) fn inject_grip_styles(document: &Document) -> Result<()> {
    let style = document.create_element("style").map_err(dom_err)?;
    style.set_text_content(Some(GRIP_STYLES));
    let head = document
        .head()
        .ok_or_else(|| PivotError::Dom("document has no head".to_string()))?;
    head.append_child(&style).map_err(dom_err)?;
    Ok(())
}

/// Build the grip container and one grip per column, wiring mousedown on
/// every draggable grip. Returns the mousedown closures so the caller
/// keeps them alive.
pub(crate) fn create_grips(
    document: &Document,
    state: &Rc<RefCell<SharedState>>,
    doc_move: &Rc<Closure<dyn FnMut(MouseEvent)>>,
    doc_up: &Rc<Closure<dyn FnMut(MouseEvent)>>,
) -> Result<Vec<Closure<dyn FnMut(MouseEvent)>>> {
    let mut closures = Vec::new();

    let (outer_table, header_cells, grip_inner_html, hover_cursor) = {
        let s = state.borrow();
        (
            s.surface.outer_table().clone(),
            s.surface.header_cells().to_vec(),
            s.options.grip_inner_html.clone(),
            s.options.hover_cursor.clone(),
        )
    };
    if header_cells.is_empty() {
        return Ok(closures);
    }

    let container: HtmlElement = document
        .create_element("div")
        .map_err(dom_err)?
        .dyn_into()
        .map_err(|_| PivotError::Dom("div element".to_string()))?;
    container.set_class_name("pivotGridGrips");
    outer_table
        .before_with_node_1(&container)
        .map_err(dom_err)?;

    // The built-in grip is used unless the host supplied at least a tag.
    let grip_html = if grip_inner_html.len() >= 6 {
        grip_inner_html.as_str()
    } else {
        "<div class='grip'></div>"
    };

    let widths: Vec<f64> = header_cells
        .iter()
        .map(|th| f64::from(th.offset_width()))
        .collect();

    let mut grips = Vec::new();
    let draggable_count = header_cells.len().saturating_sub(1);
    for index in 0..header_cells.len() {
        let grip: HtmlElement = document
            .create_element("div")
            .map_err(dom_err)?
            .dyn_into()
            .map_err(|_| PivotError::Dom("div element".to_string()))?;

        if index < draggable_count {
            grip.set_class_name("pivotGridGrip");
            grip.set_inner_html(grip_html);
            if let Ok(resizer) = document.create_element("div") {
                resizer.set_class_name("pivotGridColResizer");
                if let Some(el) = resizer.dyn_ref::<HtmlElement>() {
                    let _ = el.style().set_property("cursor", &hover_cursor);
                }
                let _ = grip.append_child(&resizer);
            }

            let state = Rc::clone(state);
            let doc_move = Rc::clone(doc_move);
            let doc_up = Rc::clone(doc_up);
            let closure = Closure::wrap(Box::new(move |event: MouseEvent| {
                event.prevent_default();
                begin_drag(&state, index, f64::from(event.page_x()), &doc_move, &doc_up);
            }) as Box<dyn FnMut(MouseEvent)>);
            let _ = grip
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closures.push(closure);
        } else {
            // The last grip only marks the table edge.
            grip.set_class_name("pivotGridLastGrip");
        }

        container.append_child(&grip).map_err(dom_err)?;
        grips.push(grip);
    }

    {
        let mut s = state.borrow_mut();
        let min_width = s.options.column_min_width;
        s.resizer = Some(ColumnResizer::new(widths, min_width, DEFAULT_CELL_SPACING));
        s.grips = grips;
        s.grips_container = Some(container);
    }
    sync_grips(&mut state.borrow_mut());

    Ok(closures)
}

fn begin_drag(
    state: &Rc<RefCell<SharedState>>,
    index: usize,
    page_x: f64,
    doc_move: &Rc<Closure<dyn FnMut(MouseEvent)>>,
    doc_up: &Rc<Closure<dyn FnMut(MouseEvent)>>,
) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };

    {
        let mut s = state.borrow_mut();
        if s.resizer.as_ref().is_none_or(|r| !r.is_draggable(index)) {
            return;
        }
        s.drag = Some(ActiveDrag {
            gesture: DragGesture::new(index, page_x),
            last_x: page_x,
        });
        if let Some(grip) = s.grips.get(index) {
            let _ = grip.class_list().add_1("pivotGridGripDrag");
        }

        // Force the drag cursor everywhere for the duration of the
        // gesture.
        if let Ok(style) = document.create_element("style") {
            style.set_text_content(Some(&format!(
                "*{{cursor:{}!important}}",
                s.options.drag_cursor
            )));
            if let Some(head) = document.head() {
                let _ = head.append_child(&style);
            }
            s.drag_cursor_style = Some(style);
        }
    }

    let _ = document
        .add_event_listener_with_callback("mousemove", doc_move.as_ref().as_ref().unchecked_ref());
    let _ = document
        .add_event_listener_with_callback("mouseup", doc_up.as_ref().as_ref().unchecked_ref());
}

/// Document mousemove while a grip is held.
pub(crate) fn on_drag_move(state: &Rc<RefCell<SharedState>>, page_x: f64) {
    let s = &mut *state.borrow_mut();
    let Some(drag) = s.drag.as_mut() else {
        return;
    };
    let Some(resizer) = s.resizer.as_mut() else {
        return;
    };
    drag.last_x = page_x;

    if s.options.live_drag {
        let applied = drag.gesture.drag_to(resizer, page_x);
        if applied.abs() > 0.0 {
            let widths = resizer.widths().to_vec();
            s.surface.apply_column_widths(&widths);
            s.viewport.change_columns_size(&mut s.surface, &widths);
            sync_grips_inner(&s.grips, s.grips_container.as_ref(), resizer, &s.surface);
        }
    } else {
        // Deferred mode: only the grip tracks the pointer; the clamp
        // keeps it between its neighbors.
        let index = drag.gesture.index();
        let clamped = resizer.clamp_delta(index, drag.gesture.delta_from(page_x));
        if let Some(grip) = s.grips.get(index) {
            let left = resizer.grip_position(index) + clamped;
            let _ = grip.style().set_property("left", &format!("{left}px"));
        }
    }
}

/// Document mouseup: the gesture ends, listeners come off no matter what.
pub(crate) fn on_drag_end(
    state: &Rc<RefCell<SharedState>>,
    page_x: f64,
    doc_move: &Rc<Closure<dyn FnMut(MouseEvent)>>,
    doc_up: &Rc<Closure<dyn FnMut(MouseEvent)>>,
) {
    if let Some(document) = web_sys::window().and_then(|w| w.document()) {
        let _ = document.remove_event_listener_with_callback(
            "mousemove",
            doc_move.as_ref().as_ref().unchecked_ref(),
        );
        let _ = document.remove_event_listener_with_callback(
            "mouseup",
            doc_up.as_ref().as_ref().unchecked_ref(),
        );
    }

    let s = &mut *state.borrow_mut();
    if let Some(style) = s.drag_cursor_style.take() {
        remove_element(&style);
    }
    let Some(mut drag) = s.drag.take() else {
        return;
    };
    let Some(resizer) = s.resizer.as_mut() else {
        return;
    };
    if let Some(grip) = s.grips.get(drag.gesture.index()) {
        let _ = grip.class_list().remove_1("pivotGridGripDrag");
    }

    if !s.options.live_drag {
        drag.gesture.drag_to(resizer, page_x);
    }

    let widths = resizer.widths().to_vec();
    s.surface.apply_column_widths(&widths);
    s.viewport.change_columns_size(&mut s.surface, &widths);
    sync_grips_inner(&s.grips, s.grips_container.as_ref(), resizer, &s.surface);
}

fn remove_element(element: &Element) {
    if let Some(parent) = element.parent_node() {
        let _ = parent.remove_child(element);
    }
}

/// Re-place every grip according to the current table layout.
pub(crate) fn sync_grips(state: &mut SharedState) {
    let SharedState {
        grips,
        grips_container,
        resizer,
        surface,
        ..
    } = state;
    if let Some(resizer) = resizer {
        sync_grips_inner(grips, grips_container.as_ref(), resizer, surface);
    }
}

fn sync_grips_inner(
    grips: &[HtmlElement],
    container: Option<&HtmlElement>,
    resizer: &ColumnResizer,
    surface: &super::dom::DomSurface,
) {
    let table = surface.outer_table();
    if let Some(container) = container {
        let _ = container
            .style()
            .set_property("width", &format!("{}px", table.offset_width()));
    }
    let table_height = f64::from(table.offset_height());
    for (index, grip) in grips.iter().enumerate() {
        let left = resizer.grip_position(index);
        let _ = grip.style().set_property("left", &format!("{left}px"));
        let _ = grip
            .style()
            .set_property("height", &format!("{table_height}px"));
    }
}

/// Window resize: column widths are rebased to percentages so the table
/// reflows with the page, then the grips are re-placed.
pub(crate) fn on_window_resize(state: &Rc<RefCell<SharedState>>) {
    let s = &mut *state.borrow_mut();
    let Some(resizer) = s.resizer.as_mut() else {
        return;
    };
    let table = s.surface.outer_table();
    let table_width = f64::from(table.offset_width());
    if table_width < 1.0 {
        return;
    }

    let header_cells = s.surface.header_cells().to_vec();
    for (th, &width) in header_cells.iter().zip(resizer.widths()) {
        let percent = (width * 100.0 / table_width).round();
        let _ = th.style().set_property("width", &format!("{percent}%"));
    }

    let measured: Vec<f64> = header_cells
        .iter()
        .map(|th| f64::from(th.offset_width()))
        .collect();
    resizer.set_widths(measured);
    sync_grips_inner(&s.grips, s.grips_container.as_ref(), resizer, &s.surface);
}
