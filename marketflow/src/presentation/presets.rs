//! Example inputs loaded from a YAML file.
//!
//! ```yaml
//! examples:
//!   - name: "Analytics startup"
//!     company_domain: "acme.io"
//!     industry: "SaaS"
//!     project_description: "..."
//!     target_market: "Small retailers"
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, error};

use super::form::DEFAULT_INDUSTRY;
use crate::core::MarketingInput;

/// Where the CLI looks for presets by default.
pub const DEFAULT_PRESETS_PATH: &str = "config/examples.yaml";

/// A named set of form values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    /// Name shown in listings.
    pub name: String,
    /// Company domain or name.
    #[serde(default)]
    pub company_domain: String,
    /// Industry.
    #[serde(default = "default_industry")]
    pub industry: String,
    /// Project description.
    #[serde(default)]
    pub project_description: String,
    /// Optional target market.
    #[serde(default)]
    pub target_market: Option<String>,
}

fn default_industry() -> String {
    DEFAULT_INDUSTRY.to_string()
}

impl Preset {
    /// The form input this preset fills in.
    #[must_use]
    pub fn to_input(&self) -> MarketingInput {
        let input = MarketingInput::new(
            self.company_domain.clone(),
            self.industry.clone(),
            self.project_description.clone(),
        );
        match &self.target_market {
            Some(market) => input.with_target_market(market.clone()),
            None => input,
        }
    }
}

#[derive(Debug, Deserialize)]
struct PresetsFile {
    #[serde(default)]
    examples: Vec<Preset>,
}

/// Parses presets from YAML text.
///
/// # Errors
///
/// Returns the parser error if the text is not a presets document.
pub fn parse_presets(text: &str) -> Result<Vec<Preset>, serde_yaml::Error> {
    let file: PresetsFile = serde_yaml::from_str(text)?;
    Ok(file.examples)
}

/// Loads presets from `path`.
///
/// A missing or malformed file yields an empty list.
#[must_use]
pub fn load_presets(path: &Path) -> Vec<Preset> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            error!(path = %path.display(), error = %e, "failed to read presets");
            return Vec::new();
        }
    };
    match parse_presets(&text) {
        Ok(presets) => {
            debug!(path = %path.display(), count = presets.len(), "presets loaded");
            presets
        }
        Err(e) => {
            error!(path = %path.display(), error = %e, "failed to parse presets");
            Vec::new()
        }
    }
}

/// Finds the preset called `name`.
#[must_use]
pub fn find_preset<'a>(presets: &'a [Preset], name: &str) -> Option<&'a Preset> {
    presets.iter().find(|preset| preset.name == name)
}
