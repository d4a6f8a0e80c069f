//! Rendering a finished run for people and for machines.

use serde::Serialize;
use std::fmt::{self, Write as _};
use std::str::FromStr;

use crate::core::{
    attribute, CampaignContent, MarketResearch, MarketingStrategy, PipelineState, TrendAnalysis,
    NOT_AVAILABLE,
};
use crate::errors::Result;
use crate::utils::{bullet_list, report_date, Timestamp};

/// Report output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    /// Markdown sections, one per record.
    #[default]
    Markdown,
    /// The whole run as pretty-printed JSON.
    Json,
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "markdown" | "md" => Ok(Self::Markdown),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown report format: {other}")),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Markdown => "markdown",
            Self::Json => "json",
        })
    }
}

/// The banner shown instead of results when a run recorded an error.
#[must_use]
pub fn render_error_banner(error: &str) -> String {
    format!("Analysis failed: {error}")
}

/// Renders `state` in `format`.
///
/// # Errors
///
/// Returns an error only if JSON serialization fails.
pub fn render(state: &PipelineState, format: ReportFormat, generated_at: &Timestamp) -> Result<String> {
    match format {
        ReportFormat::Markdown => Ok(render_markdown(state, generated_at)),
        ReportFormat::Json => render_json(state, generated_at),
    }
}

/// Markdown report: a header, then either the error banner or the four records.
#[must_use]
pub fn render_markdown(state: &PipelineState, generated_at: &Timestamp) -> String {
    let mut out = String::from("# Marketing Strategy Report\n\n");
    let _ = writeln!(out, "- **Company:** {}", state.company_domain);
    let _ = writeln!(out, "- **Industry:** {}", state.industry);
    let _ = writeln!(out, "- **Target Market:** {}", state.target_market_or_default());
    let _ = writeln!(out, "- **Generated:** {}", report_date(generated_at));
    let _ = writeln!(out, "- **Run:** {}", state.run_id);

    if let Some(error) = &state.error {
        let _ = write!(out, "\n> **{}**\n", render_error_banner(error));
        return out;
    }

    out.push('\n');
    out.push_str(&market_research_section(state.market_research.as_ref()));
    out.push('\n');
    out.push_str(&trend_analysis_section(state.trend_analysis.as_ref()));
    out.push('\n');
    out.push_str(&strategy_section(state.marketing_strategy.as_ref()));
    out.push('\n');
    out.push_str(&campaign_section(state.campaign_content.as_ref()));
    out
}

fn missing(title: &str) -> String {
    format!("## {title}\n\n{NOT_AVAILABLE}\n")
}

fn bullets_or_na(items: &[String]) -> String {
    if items.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        bullet_list(items)
    }
}

/// Customer profile, audience, competitors and positioning.
#[must_use]
pub fn market_research_section(research: Option<&MarketResearch>) -> String {
    let Some(research) = research else {
        return missing("Market Research");
    };

    let mut out = String::from("## Market Research\n\n### Customer Profile\n\n");
    for (label, key) in [
        ("Company Name", "company_name"),
        ("Industry", "industry"),
        ("Products/Services", "products_services"),
        ("Market Position", "market_position"),
    ] {
        let _ = writeln!(out, "- **{label}:** {}", research.profile(key));
    }

    out.push_str("\n### Target Audience\n\n");
    for (label, key) in [
        ("Demographics", "demographics"),
        ("Preferences", "preferences"),
        ("Pain Points", "pain_points"),
        ("Behavior", "behavior"),
    ] {
        let _ = writeln!(out, "- **{label}:** {}", research.audience(key));
    }

    out.push_str("\n### Competitors\n");
    for (i, competitor) in research.competitors.iter().enumerate() {
        let _ = write!(
            out,
            "\n#### Competitor {}: {}\n\n- **Strengths:** {}\n- **Weaknesses:** {}\n- **Differentiation:** {}\n",
            i + 1,
            attribute(competitor, "name"),
            attribute(competitor, "strengths"),
            attribute(competitor, "weaknesses"),
            attribute(competitor, "differentiation"),
        );
    }

    let _ = write!(out, "\n### Market Positioning\n\n{}\n", research.market_positioning);
    out
}

/// Trend lists and the impact assessment.
#[must_use]
pub fn trend_analysis_section(trends: Option<&TrendAnalysis>) -> String {
    let Some(trends) = trends else {
        return missing("Trend Analysis");
    };

    format!(
        "## Trend Analysis\n\n### Market Trends\n\n{}\n\n### Technology Trends\n\n{}\n\n\
         ### Consumer Trends\n\n{}\n\n### Opportunities\n\n{}\n\n### Impact Assessment\n\n{}\n",
        bullets_or_na(&trends.market_trends),
        bullets_or_na(&trends.tech_trends),
        bullets_or_na(&trends.consumer_trends),
        bullets_or_na(&trends.opportunities),
        trends.trend_impact,
    )
}

/// Strategy name with goals, tactics, channels and KPIs.
#[must_use]
pub fn strategy_section(strategy: Option<&MarketingStrategy>) -> String {
    let Some(strategy) = strategy else {
        return missing("Marketing Strategy");
    };

    format!(
        "## Marketing Strategy: {}\n\n### Goals\n\n{}\n\n### Tactics\n\n{}\n\n\
         ### Channels\n\n{}\n\n### KPIs\n\n{}\n",
        strategy.name,
        bullets_or_na(&strategy.goals),
        bullets_or_na(&strategy.tactics),
        bullets_or_na(&strategy.channels),
        bullets_or_na(&strategy.kpis),
    )
}

/// Each campaign idea next to the copy carrying its identifier.
#[must_use]
pub fn campaign_section(content: Option<&CampaignContent>) -> String {
    let Some(content) = content else {
        return missing("Campaign Content");
    };

    let mut out = String::from("## Campaign Content\n");
    for (i, (idea, copy)) in content.pairs().into_iter().enumerate() {
        let _ = write!(
            out,
            "\n### Campaign {}: {}\n\n- **Description:** {}\n- **Target Audience:** {}\n- **Channel:** {}\n",
            i + 1,
            idea.name,
            idea.description,
            idea.audience,
            idea.channel,
        );
        match copy {
            Some(copy) => {
                let _ = write!(out, "\n**{}**\n\n{}\n", copy.title, copy.body);
            }
            None => {
                let _ = write!(out, "\n_No copy for this campaign._\n");
            }
        }
    }

    let orphans = content.orphan_copies();
    if !orphans.is_empty() {
        out.push_str("\n### Unmatched Copy\n");
        for copy in orphans {
            let _ = write!(out, "\n**{}** ({})\n\n{}\n", copy.title, copy.campaign_id, copy.body);
        }
    }
    out
}

#[derive(Serialize)]
struct JsonReport<'a> {
    generated_at: &'a Timestamp,
    succeeded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    banner: Option<String>,
    #[serde(flatten)]
    state: &'a PipelineState,
}

/// The full state plus a success flag and, on error, the banner text.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render_json(state: &PipelineState, generated_at: &Timestamp) -> Result<String> {
    let report = JsonReport {
        generated_at,
        succeeded: state.error.is_none(),
        banner: state.error.as_deref().map(render_error_banner),
        state,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}
