//! Stage kind and status enums.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The four steps of the marketing pipeline, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageKind {
    /// Company, competitor and audience research.
    MarketResearch,
    /// Market, technology and consumer trends.
    TrendAnalysis,
    /// Goals, tactics, channels and KPIs.
    StrategyPlanning,
    /// Campaign ideas and marketing copy.
    ContentCreation,
}

impl StageKind {
    /// All stages in pipeline order.
    pub const ALL: [Self; 4] = [
        Self::MarketResearch,
        Self::TrendAnalysis,
        Self::StrategyPlanning,
        Self::ContentCreation,
    ];

    /// The stage name used in step labels, events and logs.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MarketResearch => "market_research",
            Self::TrendAnalysis => "trend_analysis",
            Self::StrategyPlanning => "strategy_planning",
            Self::ContentCreation => "content_creation",
        }
    }

    /// Human-readable name used in error messages.
    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::MarketResearch => "Market research",
            Self::TrendAnalysis => "Trend analysis",
            Self::StrategyPlanning => "Strategy planning",
            Self::ContentCreation => "Content creation",
        }
    }

    /// Step label written to the state when the stage succeeds.
    #[must_use]
    pub fn completed_step(&self) -> String {
        format!("{}_completed", self.as_str())
    }

    /// Step label written to the state when the stage fails.
    #[must_use]
    pub fn failed_step(&self) -> String {
        format!("{}_failed", self.as_str())
    }

    /// Looks a stage up by its name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == name)
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a stage ended within one pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageStatus {
    /// Stage produced its record.
    Completed,
    /// Stage set the error marker.
    Failed,
    /// Stage was not run because the pipeline stopped early.
    Skipped,
}

impl fmt::Display for StageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Completed => write!(f, "completed"),
            Self::Failed => write!(f, "failed"),
            Self::Skipped => write!(f, "skipped"),
        }
    }
}

impl StageStatus {
    /// Returns true if the status indicates failure.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed)
    }
}
