//! Tooltip DOM glue: one shared floating element per widget.
//!
//! The element is created on first show and reused; the fade interval is
//! owned here and cleared before every phase switch, so a fade-in racing a
//! fade-out can never double-step the opacity.

#![cfg(target_arch = "wasm32")]

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement};

use crate::error::{PivotError, Result};
use crate::tooltip::{placement, FadeAnimation, FadePhase, FadeTick, FADE_TICK_MS};
use crate::types::TooltipOptions;

use super::dom::dom_err;

/// The shared floating tooltip element and its fade timer.
pub(crate) struct TooltipController {
    document: Document,
    main_div: Option<HtmlElement>,
    content_div: Option<HtmlElement>,
    fade: FadeAnimation,
    timer: Option<i32>,
    tick_closure: Option<Closure<dyn FnMut()>>,
    options: TooltipOptions,
}

impl TooltipController {
    pub(crate) fn new(document: Document, options: TooltipOptions) -> Self {
        let fade = FadeAnimation::new(options.fading_speed);
        Self {
            document,
            main_div: None,
            content_div: None,
            fade,
            timer: None,
            tick_closure: None,
            options,
        }
    }

    /// Lazily build the floating element: top cap, content, bottom cap.
    fn ensure_element(&mut self) -> Result<HtmlElement> {
        if let Some(main) = &self.main_div {
            return Ok(main.clone());
        }

        let main: HtmlElement = self
            .document
            .create_element("div")
            .map_err(dom_err)?
            .dyn_into()
            .map_err(|_| PivotError::Dom("div element".to_string()))?;
        main.set_id("pivotGridTooltip");
        let style = main.style();
        let _ = style.set_property("position", "absolute");
        let _ = style.set_property("opacity", "0");
        let _ = style.set_property("display", "none");

        for part in ["top", "cont", "bot"] {
            let child: HtmlElement = self
                .document
                .create_element("div")
                .map_err(dom_err)?
                .dyn_into()
                .map_err(|_| PivotError::Dom("div element".to_string()))?;
            child.set_id(&format!("pivotGridTooltip{part}"));
            main.append_child(&child).map_err(dom_err)?;
            if part == "cont" {
                self.content_div = Some(child);
            }
        }

        let body = self
            .document
            .body()
            .ok_or_else(|| PivotError::Dom("document has no body".to_string()))?;
        body.append_child(&main).map_err(dom_err)?;
        self.main_div = Some(main.clone());
        Ok(main)
    }

    fn clear_timer(&mut self) {
        if let (Some(window), Some(id)) = (web_sys::window(), self.timer.take()) {
            window.clear_interval_with_handle(id);
        }
    }

    /// Show the tooltip at document coordinates `(x, y)` with `html`
    /// content and start the fade-in.
    pub(crate) fn show(
        controller: &Rc<RefCell<Self>>,
        html: &str,
        x: f64,
        y: f64,
    ) -> Result<()> {
        {
            let mut t = controller.borrow_mut();
            let main = t.ensure_element()?;

            let _ = main.style().set_property("display", "block");
            if let Some(content) = &t.content_div {
                content.set_inner_html(html);
            }

            // Shrink-wrap, then clamp to the configured maximum.
            let _ = main.style().set_property("width", "auto");
            if f64::from(main.offset_width()) > t.options.max_width {
                let _ = main
                    .style()
                    .set_property("width", &format!("{}px", t.options.max_width));
            }

            let raised_height = f64::from(main.offset_height()) + t.options.top_offset;
            let spot = placement(x, y, raised_height, t.options.left_offset)?;
            let _ = main.style().set_property("top", &format!("{}px", spot.top));
            let _ = main
                .style()
                .set_property("left", &format!("{}px", spot.left));

            t.clear_timer();
            if html.is_empty() {
                return Ok(());
            }
            t.fade.start(FadePhase::In);
        }
        Self::start_timer(controller);
        Ok(())
    }

    /// Start the fade-out towards hidden.
    pub(crate) fn hide(controller: &Rc<RefCell<Self>>) {
        {
            let mut t = controller.borrow_mut();
            if t.main_div.is_none() {
                return;
            }
            t.clear_timer();
            t.fade.start(FadePhase::Out);
        }
        Self::start_timer(controller);
    }

    fn start_timer(controller: &Rc<RefCell<Self>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let mut t = controller.borrow_mut();
        if t.tick_closure.is_none() {
            let weak = Rc::downgrade(controller);
            let closure = Closure::wrap(Box::new(move || {
                if let Some(controller) = weak.upgrade() {
                    Self::on_tick(&controller);
                }
            }) as Box<dyn FnMut()>);
            t.tick_closure = Some(closure);
        }
        let Some(callback) = t.tick_closure.as_ref() else {
            return;
        };
        match window.set_interval_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            i32::try_from(FADE_TICK_MS).unwrap_or(20),
        ) {
            Ok(id) => t.timer = Some(id),
            Err(_) => t.timer = None,
        }
    }

    fn on_tick(controller: &Rc<RefCell<Self>>) {
        let mut t = controller.borrow_mut();
        match t.fade.tick() {
            FadeTick::Step(opacity) => {
                if let Some(main) = &t.main_div {
                    let _ = main.style().set_property("opacity", &opacity.to_string());
                }
            }
            FadeTick::Done { visible } => {
                t.clear_timer();
                if !visible {
                    if let Some(main) = &t.main_div {
                        let _ = main.style().set_property("display", "none");
                    }
                }
            }
        }
    }
}
