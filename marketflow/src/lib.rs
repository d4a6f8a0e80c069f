//! # Marketflow
//!
//! A four-stage marketing analysis pipeline driven by a language model.
//!
//! A run threads one [`core::PipelineState`] through these stages, in order:
//!
//! - **Market research**: web search and a scrape of the company site, then
//!   a customer profile, competitors and target audience
//! - **Trend analysis**: market, technology and consumer trends
//! - **Strategy planning**: goals, tactics, channels and KPIs
//! - **Content creation**: five campaign ideas, each paired with its copy
//!
//! Stages never abort a run. A failing stage leaves an error message on the
//! state and, unless fail-fast mode is chosen, the next stage still runs.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use marketflow::prelude::*;
//! use std::sync::Arc;
//!
//! let config = AppConfig::load(None)?;
//! let pipeline = pipeline_from_config(&config, Arc::new(LoggingEventSink::default()))?;
//!
//! let input = MarketingInput::new("acme.io", "SaaS", "Launch campaign for ...");
//! let state = run_analysis(&pipeline, input).await?;
//! println!("{}", render_markdown(&state, &now_utc()));
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod config;
pub mod core;
pub mod errors;
pub mod events;
pub mod observability;
pub mod pipeline;
pub mod presentation;
pub mod providers;
pub mod stages;
pub mod testing;
pub mod utils;
pub mod websearch;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{AppConfig, PipelineConfig, StageModels};
    pub use crate::core::{
        CampaignContent, MarketResearch, MarketingInput, MarketingStrategy, PipelineState,
        StageKind, StageStatus, TrendAnalysis,
    };
    pub use crate::errors::{
        ContractErrorInfo, InputValidationError, MarketflowError, PipelineValidationError,
        StageError,
    };
    pub use crate::events::{CollectingEventSink, EventSink, LoggingEventSink, NoOpEventSink};
    pub use crate::pipeline::{
        build_marketing_pipeline, pipeline_from_config, FailureMode, FailureSummary,
        MarketingClients, Pipeline, PipelineBuilder,
    };
    pub use crate::presentation::{render, render_markdown, run_analysis, ReportFormat};
    pub use crate::providers::{LlmConfig, LlmProvider, ModelSettings, OpenAiProvider};
    pub use crate::stages::{FnStage, Stage};
    pub use crate::utils::{now_utc, Timestamp};
    pub use crate::websearch::{PageScraper, SearchProvider, WebScraper, WebSearchClient};
}
