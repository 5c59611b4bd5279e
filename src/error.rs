//! Structured error types for pivotgrid.
//!
//! One enum covers the whole crate; the wasm boundary converts it to a
//! `JsValue` so JS callers see a readable message.

/// All errors that can occur while building or driving the grid.
#[derive(Debug, thiserror::Error)]
pub enum PivotError {
    /// A base viewport operation was invoked without a concrete override.
    #[error("{0} is not implemented")]
    NotImplemented(&'static str),

    /// Tooltip pointer coordinates were not finite numbers.
    #[error("Undefined tooltip coordinates: ({0}, {1})")]
    TooltipCoordinates(f64, f64),

    /// Invalid widget options.
    #[error("Invalid options: {0}")]
    Options(String),

    /// DOM access or mutation failure at the wasm boundary.
    #[error("DOM error: {0}")]
    Dom(String),

    /// Catch-all for string errors.
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PivotError>;

impl From<String> for PivotError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for PivotError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<PivotError> for wasm_bindgen::JsValue {
    fn from(e: PivotError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
