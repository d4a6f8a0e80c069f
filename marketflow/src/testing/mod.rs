//! Testing utilities for marketflow pipelines.
//!
//! This module provides:
//! - A queued mock model provider and static search/scrape adapters
//! - Canned stage replies and sample states
//! - Assertions on pipeline states

mod assertions;
pub mod fixtures;
mod mocks;

pub use assertions::{assert_run_succeeded, assert_stage_completed, assert_stage_failed};
pub use mocks::{FailingStage, MockLLMProvider, RecordingStage, StaticScraper, StaticSearch};
