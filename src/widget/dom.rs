//! DOM-backed [`GridSurface`] and table scaffolding.
//!
//! Everything the viewports need from the page is implemented here over
//! `web-sys` nodes. The paging variant gets a detached scroller `<div>`
//! whose inner "track" element encodes the logical dataset height; the
//! scrolling variant gets an overflow container wrapping the inner table.

#![cfg(target_arch = "wasm32")]

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, HtmlDivElement, HtmlElement, HtmlTableElement, HtmlTableSectionElement,
    MouseEvent,
};

use crate::error::{PivotError, Result};
use crate::types::{CellValue, GridOptions};
use crate::viewport::GridSurface;

pub(crate) fn dom_err(e: JsValue) -> PivotError {
    PivotError::Dom(format!("{e:?}"))
}

#[allow(clippy::cast_possible_truncation)]
fn px_to_i32(px: f64) -> i32 {
    px.round().clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32
}

fn px(value: f64) -> String {
    format!("{value}px")
}

/// CSS class naming a cell's column, derived from the header label with
/// whitespace and blank entities stripped. Empty labels get no class.
fn column_class(label: &str) -> Option<String> {
    let stripped: String = label
        .replace("&nbsp;", "")
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    if stripped.is_empty() {
        None
    } else {
        Some(format!("column{stripped}"))
    }
}

/// The widget's DOM scaffolding shared by both viewport variants: the
/// outer table, and the inner cell spanning all columns that hosts the
/// viewport's own nodes.
pub(crate) struct Scaffolding {
    pub(crate) outer_table: HtmlTableElement,
    pub(crate) inner_cell: HtmlElement,
}

/// Build the outer table inside `host`: one body row whose single cell
/// spans every column and receives the viewport's inner table.
pub(crate) fn build_scaffolding(
    document: &Document,
    host: &HtmlElement,
    options: &GridOptions,
) -> Result<Scaffolding> {
    let outer_table: HtmlTableElement = document
        .create_element("table")
        .map_err(dom_err)?
        .dyn_into()
        .map_err(|_| PivotError::Dom("table element".to_string()))?;
    outer_table.set_class_name(&options.main_grid_class_name);
    outer_table.set_cell_padding("0");
    outer_table.set_cell_spacing("0");

    let tbody: HtmlTableSectionElement = document
        .create_element("tbody")
        .map_err(dom_err)?
        .dyn_into()
        .map_err(|_| PivotError::Dom("tbody element".to_string()))?;
    let row = document.create_element("tr").map_err(dom_err)?;
    let inner_cell: HtmlElement = document
        .create_element("td")
        .map_err(dom_err)?
        .dyn_into()
        .map_err(|_| PivotError::Dom("td element".to_string()))?;
    inner_cell.set_class_name("pivotGridInnerCell");
    let _ = inner_cell.style().set_property("position", "relative");

    row.append_child(&inner_cell).map_err(dom_err)?;
    tbody.append_child(&row).map_err(dom_err)?;
    outer_table.append_child(&tbody).map_err(dom_err)?;
    host.append_child(&outer_table).map_err(dom_err)?;

    Ok(Scaffolding {
        outer_table,
        inner_cell,
    })
}

/// [`GridSurface`] over live DOM nodes.
pub(crate) struct DomSurface {
    document: Document,
    outer_table: HtmlTableElement,
    inner_table: HtmlTableElement,
    inner_tbody: HtmlTableSectionElement,
    /// Synthetic scroller (paging variant).
    scroller: Option<HtmlDivElement>,
    /// Scroll track content whose height encodes the dataset (paging).
    track: Option<HtmlDivElement>,
    /// Overflow container (scrolling variant).
    scroll_container: Option<HtmlDivElement>,
    /// The outer cell hosting the viewport; spans all columns once the
    /// header is known.
    inner_cell: HtmlElement,
    header_cells: Vec<HtmlElement>,
    options: GridOptions,
    cell_enter: Option<Closure<dyn FnMut(MouseEvent)>>,
    cell_leave: Option<Closure<dyn FnMut(MouseEvent)>>,
}

impl DomSurface {
    /// Paging scaffolding: inner table plus a detached, absolutely
    /// positioned scroller with its track element.
    pub(crate) fn paging(
        document: Document,
        outer_table: HtmlTableElement,
        inner_cell: &HtmlElement,
        options: GridOptions,
    ) -> Result<Self> {
        let (inner_table, inner_tbody) = Self::create_inner_table(&document)?;

        let scroller: HtmlDivElement = document
            .create_element("div")
            .map_err(dom_err)?
            .dyn_into()
            .map_err(|_| PivotError::Dom("div element".to_string()))?;
        scroller.set_id("pivotGridScroller");
        let style = scroller.style();
        let _ = style.set_property("width", "18px");
        let _ = style.set_property("height", "0px");
        let _ = style.set_property("overflow-y", "scroll");
        let _ = style.set_property("overflow-x", "hidden");
        let _ = style.set_property("position", "absolute");
        let _ = style.set_property("right", "0px");
        let _ = style.set_property("top", "0px");
        let _ = style.set_property("display", "none");

        let track: HtmlDivElement = document
            .create_element("div")
            .map_err(dom_err)?
            .dyn_into()
            .map_err(|_| PivotError::Dom("div element".to_string()))?;
        let _ = track.style().set_property("height", "0px");
        let _ = track.style().set_property("width", "1px");
        scroller.append_child(&track).map_err(dom_err)?;

        inner_cell.append_child(&inner_table).map_err(dom_err)?;
        inner_cell.append_child(&scroller).map_err(dom_err)?;

        Ok(Self {
            document,
            outer_table,
            inner_table,
            inner_tbody,
            scroller: Some(scroller),
            track: Some(track),
            scroll_container: None,
            inner_cell: inner_cell.clone(),
            header_cells: Vec::new(),
            options,
            cell_enter: None,
            cell_leave: None,
        })
    }

    /// Scrolling scaffolding: inner table wrapped by an overflow
    /// container that scrolls natively.
    pub(crate) fn scrolling(
        document: Document,
        outer_table: HtmlTableElement,
        inner_cell: &HtmlElement,
        options: GridOptions,
    ) -> Result<Self> {
        let (inner_table, inner_tbody) = Self::create_inner_table(&document)?;

        let container: HtmlDivElement = document
            .create_element("div")
            .map_err(dom_err)?
            .dyn_into()
            .map_err(|_| PivotError::Dom("div element".to_string()))?;
        let style = container.style();
        let _ = style.set_property("overflow-y", "hidden");
        let _ = style.set_property("overflow-x", "hidden");
        let _ = style.set_property("margin", "0px");
        let _ = style.set_property("padding", "0px");
        let _ = style.set_property("border", "0px");

        container.append_child(&inner_table).map_err(dom_err)?;
        inner_cell.append_child(&container).map_err(dom_err)?;

        Ok(Self {
            document,
            outer_table,
            inner_table,
            inner_tbody,
            scroller: None,
            track: None,
            scroll_container: Some(container),
            inner_cell: inner_cell.clone(),
            header_cells: Vec::new(),
            options,
            cell_enter: None,
            cell_leave: None,
        })
    }

    fn create_inner_table(
        document: &Document,
    ) -> Result<(HtmlTableElement, HtmlTableSectionElement)> {
        let table: HtmlTableElement = document
            .create_element("table")
            .map_err(dom_err)?
            .dyn_into()
            .map_err(|_| PivotError::Dom("table element".to_string()))?;
        table.set_class_name("pivotGridInnerTable");
        let tbody: HtmlTableSectionElement = document
            .create_element("tbody")
            .map_err(dom_err)?
            .dyn_into()
            .map_err(|_| PivotError::Dom("tbody element".to_string()))?;
        table.append_child(&tbody).map_err(dom_err)?;
        Ok((table, tbody))
    }

    /// Element whose scroll events drive the viewport: the synthetic
    /// scroller for paging, the overflow container for scrolling.
    pub(crate) fn scroll_element(&self) -> Option<HtmlElement> {
        self.scroller
            .as_ref()
            .map(|s| s.clone().unchecked_into())
            .or_else(|| {
                self.scroll_container
                    .as_ref()
                    .map(|c| c.clone().unchecked_into())
            })
    }

    /// Header cells of the outer table, for grip layout.
    pub(crate) fn header_cells(&self) -> &[HtmlElement] {
        &self.header_cells
    }

    /// The outer table element.
    pub(crate) fn outer_table(&self) -> &HtmlTableElement {
        &self.outer_table
    }

    /// Install the shared tooltip enter/leave handlers attached to every
    /// rendered cell.
    pub(crate) fn set_cell_listeners(
        &mut self,
        enter: Closure<dyn FnMut(MouseEvent)>,
        leave: Closure<dyn FnMut(MouseEvent)>,
    ) {
        self.cell_enter = Some(enter);
        self.cell_leave = Some(leave);
    }

    fn measurable(element: &Element) -> Option<&HtmlElement> {
        element.dyn_ref::<HtmlElement>()
    }
}

impl GridSurface for DomSurface {
    fn clear_rows(&mut self) {
        self.inner_tbody.set_inner_html("");
    }

    fn append_row(&mut self, row: usize, cells: &[CellValue]) -> f64 {
        let Ok(tr) = self.document.create_element("tr") else {
            return 0.0;
        };

        let row_class = &self.options.grid_row_class_name;
        let last = cells.len().saturating_sub(1);
        for (col, value) in cells.iter().enumerate() {
            let Ok(td) = self.document.create_element("td") else {
                continue;
            };
            let side_class = if col == last {
                &self.options.right_cell_class_name
            } else {
                &self.options.left_cell_class_name
            };
            td.set_class_name(&format!("{row_class} {side_class}"));
            if let Some(class) = column_class(self.options.column_headers.get(col).map_or("", String::as_str)) {
                let _ = td.class_list().add_1(&class);
            }

            // Structured coordinates ride as per-axis metadata; the legacy
            // composite id stays for stylesheet compatibility only.
            let _ = td.set_attribute("data-row", &row.to_string());
            let _ = td.set_attribute("data-col", &col.to_string());
            td.set_id(&format!("cell_{}_{}", row + 1, col + 1));
            td.set_inner_html(value);

            if row == 0 {
                if let Some(el) = Self::measurable(&td) {
                    let _ = el.style().set_property("border-top", "0px none");
                }
            }

            if let Some(enter) = &self.cell_enter {
                let _ = td
                    .add_event_listener_with_callback("mouseenter", enter.as_ref().unchecked_ref());
            }
            if let Some(leave) = &self.cell_leave {
                let _ =
                    td.add_event_listener_with_callback("mouseout", leave.as_ref().unchecked_ref());
            }

            let _ = tr.append_child(&td);
        }

        let _ = self.inner_tbody.append_child(&tr);
        Self::measurable(&tr).map_or(0.0, |el| f64::from(el.offset_height()))
    }

    fn install_header(&mut self, labels: &[String]) -> Vec<f64> {
        if self.header_cells.is_empty() && !labels.is_empty() {
            let header_class = &self.options.grid_header_class_name;
            let last = labels.len() - 1;

            let Ok(colgroup) = self.document.create_element("colgroup") else {
                return Vec::new();
            };
            let Ok(thead) = self.document.create_element("thead") else {
                return Vec::new();
            };
            let Ok(header_row) = self.document.create_element("tr") else {
                return Vec::new();
            };

            for (index, label) in labels.iter().enumerate() {
                let side_class = if index == last {
                    &self.options.right_cell_class_name
                } else {
                    &self.options.left_cell_class_name
                };
                if let Ok(col) = self.document.create_element("col") {
                    col.set_class_name(&format!("{header_class} {side_class}"));
                    let _ = colgroup.append_child(&col);
                }
                if let Ok(th) = self.document.create_element("th") {
                    th.set_inner_html(label);
                    let _ = header_row.append_child(&th);
                    if let Some(el) = th.dyn_ref::<HtmlElement>() {
                        self.header_cells.push(el.clone());
                    }
                }
            }
            let _ = thead.append_child(&header_row);

            let first = self.outer_table.first_child();
            let _ = self
                .outer_table
                .insert_before(&thead, first.as_ref())
                .map_err(dom_err);
            let _ = self
                .outer_table
                .insert_before(&colgroup, Some(thead.as_ref()))
                .map_err(dom_err);
            let _ = self
                .inner_cell
                .set_attribute("colspan", &labels.len().to_string());
        }

        self.header_cells
            .iter()
            .map(|th| f64::from(th.offset_width()))
            .collect()
    }

    fn table_height(&self) -> f64 {
        f64::from(self.inner_table.offset_height())
    }

    fn scroller_height(&self) -> f64 {
        self.scroller
            .as_ref()
            .map_or(0.0, |s| f64::from(s.offset_height()))
    }

    fn set_scroller_height(&mut self, height: f64) {
        if let Some(scroller) = &self.scroller {
            let _ = scroller.style().set_property("height", &px(height));
        }
    }

    fn set_track_height(&mut self, height: f64) {
        if let Some(track) = &self.track {
            let _ = track.style().set_property("height", &px(height));
        }
    }

    fn set_scroller_visible(&mut self, visible: bool) {
        if let Some(scroller) = &self.scroller {
            let display = if visible { "block" } else { "none" };
            let _ = scroller.style().set_property("display", display);
        }
    }

    fn set_thumb_position(&mut self, offset: f64) {
        if let Some(scroller) = &self.scroller {
            scroller.set_scroll_top(px_to_i32(offset));
        }
    }

    fn set_container_height(&mut self, height: f64) {
        if let Some(container) = &self.scroll_container {
            let _ = container.style().set_property("height", &px(height));
        }
    }

    fn set_native_scrollbar(&mut self, enabled: bool) {
        if let Some(container) = &self.scroll_container {
            let overflow = if enabled { "scroll" } else { "hidden" };
            let _ = container.style().set_property("overflow-y", overflow);
        }
    }

    fn scrollbar_thickness(&self) -> f64 {
        let element: Option<&HtmlElement> = self
            .scroll_container
            .as_ref()
            .map(|c| c.unchecked_ref())
            .or_else(|| self.scroller.as_ref().map(|s| s.unchecked_ref()));
        element.map_or(0.0, |el| {
            f64::from(el.offset_width() - el.client_width())
        })
    }

    fn apply_column_widths(&mut self, widths: &[f64]) {
        for (th, &width) in self.header_cells.iter().zip(widths) {
            if width >= 0.0 {
                let _ = th.style().set_property("width", &px(width));
            }
        }
    }
}
