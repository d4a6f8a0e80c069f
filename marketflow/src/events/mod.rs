//! Pipeline lifecycle events.
//!
//! The orchestrator reports each run to an [`EventSink`] passed in at build
//! time. Event names are the constants below.

mod sink;

pub use sink::{CollectingEventSink, EventSink, LoggingEventSink, NoOpEventSink};

/// Emitted once before the first stage.
pub const PIPELINE_STARTED: &str = "pipeline.started";
/// Emitted once after the last stage that ran.
pub const PIPELINE_COMPLETED: &str = "pipeline.completed";
/// Emitted before each stage.
pub const STAGE_STARTED: &str = "stage.started";
/// Emitted when a stage stored its record.
pub const STAGE_COMPLETED: &str = "stage.completed";
/// Emitted when a stage recorded an error.
pub const STAGE_FAILED: &str = "stage.failed";
/// Emitted for each stage not run after a fail-fast stop.
pub const STAGE_SKIPPED: &str = "stage.skipped";
