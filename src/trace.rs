//! Conditional tracing macros for the pyramid search.
//!
//! The search opens a `search` span and one `pyramid_level` span per resized
//! haystack width. Inside a level it emits `step_scored`, `step_skipped` and
//! `early_stop` events keyed by needle divisor, and a final `search_done`.
//!
//! With the `tracing` feature the macros forward to `tracing`; without it they
//! compile to nothing, so call sites never need their own `cfg` attributes.

/// Create an info-level span around a search or pyramid level.
#[cfg(feature = "tracing")]
macro_rules! trace_span {
    ($name:expr $(, $($field:tt)*)?) => {
        tracing::info_span!($name $(, $($field)*)?)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_span {
    ($name:expr $(, $($field:tt)*)?) => {
        $crate::trace::NoopSpan
    };
}

/// Emit an info-level event for a pyramid step, with key/value fields.
///
/// Without the `tracing` feature the values are still evaluated (and dropped)
/// so that bindings used only for logging do not trigger unused warnings.
/// Pass `Copy` values or references.
#[cfg(feature = "tracing")]
macro_rules! trace_event {
    ($name:expr, $($key:ident = $value:expr),+ $(,)?) => {
        tracing::info!(name: $name, $($key = $value),+)
    };
    ($name:expr) => {
        tracing::info!(name: $name)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_event {
    ($name:expr, $($key:ident = $value:expr),+ $(,)?) => {
        let _ = ($($value,)+);
    };
    ($name:expr) => {};
}

pub(crate) use trace_event;
pub(crate) use trace_span;

/// Span guard used when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub struct NoopSpan;

#[cfg(not(feature = "tracing"))]
impl NoopSpan {
    /// Returns self, mimicking `Span::entered()`.
    #[inline]
    pub fn entered(self) -> Self {
        self
    }
}
