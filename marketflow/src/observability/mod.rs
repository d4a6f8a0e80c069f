//! Observability utilities.

mod subscriber;
mod timing;

pub use subscriber::{init_tracing, verbosity_filter, LogFormat};
pub use timing::{SpanTimer, StageSpanAttributes};
