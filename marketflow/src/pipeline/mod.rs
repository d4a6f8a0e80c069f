//! Pipeline building and execution.
//!
//! This module provides:
//! - Pipeline builder with validation
//! - The sequential runner and its events
//! - Failure tolerance modes
//! - Wiring of the four marketing stages

mod builder;
mod failure_tolerance;
mod marketing;
mod runner;

pub use builder::PipelineBuilder;
pub use failure_tolerance::{
    FailureCollector, FailureMode, FailureRecord, FailureSummary,
};
pub use marketing::{build_marketing_pipeline, pipeline_from_config, MarketingClients};
pub use runner::Pipeline;
