//! Core domain model types for marketflow.
//!
//! This module contains the fundamental types used throughout the crate:
//! - Stage kind and status enums
//! - The typed records each stage produces
//! - The pipeline input and the state threaded between stages

mod records;
mod state;
mod status;

pub use records::{
    attribute, Attributes, CampaignContent, CampaignIdea, Copy, MarketResearch,
    MarketingStrategy, TrendAnalysis, NOT_AVAILABLE,
};
pub use state::{MarketingInput, PipelineState, INITIAL_STEP, TARGET_MARKET_UNSPECIFIED};
pub use status::{StageKind, StageStatus};
