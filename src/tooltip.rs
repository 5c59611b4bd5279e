//! Tooltip fade animation and content templating.
//!
//! The fade engine is a pure state machine advanced by `tick()`; the DOM
//! glue in `widget::tooltip_dom` owns the single repeating interval that
//! drives it and clears that interval before starting a new phase, so
//! fade-in and fade-out never overlap.

use crate::error::{PivotError, Result};

/// Interval between fade ticks, in milliseconds.
pub const FADE_TICK_MS: u32 = 20;

/// Opacity percentage a fade-in converges to.
pub const TARGET_ALPHA: u8 = 95;

/// Which way the current fade is heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadePhase {
    /// Towards [`TARGET_ALPHA`].
    In,
    /// Towards fully transparent, then hidden.
    Out,
}

/// Result of one fade tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FadeTick {
    /// Animation continues; apply this opacity (0.0..=1.0).
    Step(f64),
    /// Animation finished; stop the timer. `visible` tells whether the
    /// tooltip ends shown (fade-in) or must be hidden (fade-out).
    Done {
        /// True after a completed fade-in.
        visible: bool,
    },
}

/// Opacity ramp shared by fade-in and fade-out.
///
/// Alpha persists across phases, so hiding a half-faded tooltip starts
/// from its current opacity instead of snapping.
#[derive(Debug, Clone)]
pub struct FadeAnimation {
    alpha: u8,
    speed: u8,
    phase: FadePhase,
}

impl FadeAnimation {
    /// Animation stepping `speed` percent per tick.
    #[must_use]
    pub fn new(speed: u8) -> Self {
        Self {
            alpha: 0,
            speed: speed.max(1),
            phase: FadePhase::Out,
        }
    }

    /// Switch phase. The caller is responsible for restarting its timer;
    /// alpha carries over.
    pub fn start(&mut self, phase: FadePhase) {
        self.phase = phase;
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> FadePhase {
        self.phase
    }

    /// Current opacity in `0.0..=1.0`.
    #[must_use]
    pub fn opacity(&self) -> f64 {
        f64::from(self.alpha) / 100.0
    }

    /// Advance one tick.
    pub fn tick(&mut self) -> FadeTick {
        match self.phase {
            FadePhase::In => {
                if self.alpha >= TARGET_ALPHA {
                    return FadeTick::Done { visible: true };
                }
                let step = self.speed.min(TARGET_ALPHA - self.alpha);
                self.alpha += step;
                FadeTick::Step(self.opacity())
            }
            FadePhase::Out => {
                if self.alpha == 0 {
                    return FadeTick::Done { visible: false };
                }
                let step = self.speed.min(self.alpha);
                self.alpha -= step;
                FadeTick::Step(self.opacity())
            }
        }
    }
}

/// Where to place the tooltip, in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TooltipPlacement {
    /// Document-space x of the tooltip's left edge.
    pub left: f64,
    /// Document-space y of the tooltip's top edge.
    pub top: f64,
}

/// Compute the tooltip position from pointer coordinates.
///
/// The tooltip is raised by its own height (plus the configured top
/// offset, already folded into `raised_height`) and shifted right by
/// `left_offset`. Non-finite pointer coordinates are a programmer error
/// and fail fatally.
pub fn placement(
    pointer_x: f64,
    pointer_y: f64,
    raised_height: f64,
    left_offset: f64,
) -> Result<TooltipPlacement> {
    if !pointer_x.is_finite() || !pointer_y.is_finite() {
        return Err(PivotError::TooltipCoordinates(pointer_x, pointer_y));
    }
    Ok(TooltipPlacement {
        left: pointer_x + left_offset,
        top: pointer_y - raised_height,
    })
}

/// Substitute `{{_name}}` / `{{value}}` placeholders in a tooltip
/// template.
///
/// Unknown tags are left in place verbatim; a template with no tags passes
/// through untouched.
#[must_use]
pub fn render_template(template: &str, header: &str, value: &str) -> String {
    let mut pieces = template.split("{{");
    let mut out = String::with_capacity(template.len() + header.len() + value.len());

    if let Some(first) = pieces.next() {
        out.push_str(first);
    }
    for piece in pieces {
        match piece.split_once("}}") {
            Some(("_name", rest)) => {
                out.push_str(header);
                out.push_str(rest);
            }
            Some(("value", rest)) => {
                out.push_str(value);
                out.push_str(rest);
            }
            _ => {
                out.push_str("{{");
                out.push_str(piece);
            }
        }
    }
    out
}
