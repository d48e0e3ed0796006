//! Tracing hooks that vanish when the `tracing` feature is off.
//!
//! Spans wrap a whole trajectory and each rendered frame; events carry the
//! per-frame padding so slow or oversized frames can be spotted in profiles.

/// Opens an info-level span for a trajectory or frame.
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

/// Emits a debug-level event with key/value fields.
///
/// Without the `tracing` feature the values are still evaluated so callers
/// do not trip unused-variable lints.
#[cfg(feature = "tracing")]
macro_rules! trace_event {
    ($name:expr, $($key:ident = $value:expr),+ $(,)?) => {
        tracing::debug!(name: $name, $($key = $value),+)
    };
    ($name:expr) => {
        tracing::debug!(name: $name)
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

/// Stand-in span guard used when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub struct NoopSpan;

#[cfg(not(feature = "tracing"))]
impl NoopSpan {
    /// Returns self, mirroring `Span::entered()`.
    #[inline]
    pub fn entered(self) -> Self {
        self
    }
}
