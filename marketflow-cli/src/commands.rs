//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use marketflow::config::AppConfig;
use marketflow::core::MarketingInput;
use marketflow::events::LoggingEventSink;
use marketflow::observability::{self, verbosity_filter, LogFormat};
use marketflow::pipeline::{pipeline_from_config, FailureMode};
use marketflow::presentation::{
    find_preset, load_presets, render, render_error_banner, run_analysis, Preset, ReportFormat,
    DEFAULT_INDUSTRY, DEFAULT_PRESETS_PATH, INDUSTRY_OPTIONS,
};
use marketflow::utils::now_utc;
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// Marketflow: market research, trend analysis and strategy planning.
#[derive(Parser)]
#[command(
    name = "marketflow",
    version,
    about = "Generate a marketing strategy report with a four-stage LLM pipeline.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Run the analysis and print the report.
    Analyze(AnalyzeArgs),

    /// List presets from the presets file.
    Presets {
        /// YAML presets file.
        #[arg(long, default_value = DEFAULT_PRESETS_PATH)]
        presets_file: PathBuf,
    },

    /// List the selectable industries.
    Industries,
}

/// Arguments of `analyze`.
#[derive(clap::Args)]
pub(crate) struct AnalyzeArgs {
    /// Company domain or name.
    #[arg(long)]
    pub company_domain: Option<String>,

    /// Industry (see `marketflow industries`).
    #[arg(long)]
    pub industry: Option<String>,

    /// Project description, at least 50 characters.
    #[arg(long)]
    pub description: Option<String>,

    /// Target market.
    #[arg(long)]
    pub target_market: Option<String>,

    /// Start from a named preset; other flags override its fields.
    #[arg(long)]
    pub preset: Option<String>,

    /// YAML presets file.
    #[arg(long, default_value = DEFAULT_PRESETS_PATH)]
    pub presets_file: PathBuf,

    /// TOML configuration file.
    #[arg(long, env = "MARKETFLOW_CONFIG")]
    pub config: Option<PathBuf>,

    /// Use this model for every stage.
    #[arg(long)]
    pub model: Option<String>,

    /// Report format: markdown (default) or json.
    #[arg(long, default_value = "markdown")]
    pub format: ReportFormat,

    /// Stop at the first failed stage.
    #[arg(long)]
    pub fail_fast: bool,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    observability::init_tracing(verbosity_filter(cli.verbose), cli.log_format);
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Analyze(args) => cmd_analyze(args).await,
        Command::Presets { presets_file } => cmd_presets(&presets_file),
        Command::Industries => cmd_industries(),
    }
}

async fn cmd_analyze(args: AnalyzeArgs) -> Result<()> {
    let input = resolve_input(&args)?;

    let mut config = AppConfig::load(args.config.as_deref()).context("failed to load configuration")?;
    if let Some(model) = &args.model {
        config.stages = config.stages.with_model_everywhere(model.clone());
    }
    if args.fail_fast {
        config.pipeline = config.pipeline.with_failure_mode(FailureMode::FailFast);
    }
    if config.llm.api_key.is_none() {
        bail!("no model API key configured; set OPENAI_API_KEY or [llm].api_key in the config file");
    }

    // Event lines show up from -v on.
    let pipeline = pipeline_from_config(&config, Arc::new(LoggingEventSink::debug()))?;
    info!(
        pipeline = pipeline.name(),
        failure_mode = ?pipeline.failure_mode(),
        format = %args.format,
        "running analysis"
    );

    let state = run_analysis(&pipeline, input).await?;
    println!("{}", render(&state, args.format, &now_utc())?);

    match &state.error {
        Some(error) => Err(anyhow!(render_error_banner(error))),
        None => Ok(()),
    }
}

/// Merges the preset (if any) with explicit flags.
fn resolve_input(args: &AnalyzeArgs) -> Result<MarketingInput> {
    let base = match &args.preset {
        Some(name) => {
            let presets = load_presets(&args.presets_file);
            find_preset(&presets, name)
                .map(Preset::to_input)
                .ok_or_else(|| {
                    anyhow!(
                        "no preset named '{name}' in {}",
                        args.presets_file.display()
                    )
                })?
        }
        None => MarketingInput::new("", DEFAULT_INDUSTRY, ""),
    };

    let input = MarketingInput {
        company_domain: args.company_domain.clone().unwrap_or(base.company_domain),
        industry: args.industry.clone().unwrap_or(base.industry),
        project_description: args.description.clone().unwrap_or(base.project_description),
        target_market: base.target_market,
    };
    Ok(match &args.target_market {
        Some(market) => input.with_target_market(market.clone()),
        None => input,
    })
}

fn cmd_presets(presets_file: &Path) -> Result<()> {
    let presets = load_presets(presets_file);
    if presets.is_empty() {
        println!("No presets found in {}", presets_file.display());
        return Ok(());
    }

    println!();
    for preset in &presets {
        println!("  {}", preset.name);
        println!("    Company:  {}", preset.company_domain);
        println!("    Industry: {}", preset.industry);
        if let Some(market) = &preset.target_market {
            println!("    Market:   {market}");
        }
        println!();
    }
    Ok(())
}

fn cmd_industries() -> Result<()> {
    for industry in INDUSTRY_OPTIONS {
        if *industry == DEFAULT_INDUSTRY {
            println!("{industry} (default)");
        } else {
            println!("{industry}");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyze(argv: &[&str]) -> AnalyzeArgs {
        let cli = Cli::try_parse_from(argv).unwrap();
        match cli.command {
            Command::Analyze(args) => args,
            _ => panic!("expected analyze"),
        }
    }

    #[test]
    fn test_flags_without_preset() {
        let args = analyze(&[
            "marketflow",
            "analyze",
            "--company-domain",
            "acme.io",
            "--description",
            "A long enough description of the project for the form.",
            "--format",
            "json",
            "--fail-fast",
        ]);
        assert_eq!(args.format, ReportFormat::Json);
        assert!(args.fail_fast);

        let input = resolve_input(&args).unwrap();
        assert_eq!(input.company_domain, "acme.io");
        assert_eq!(input.industry, DEFAULT_INDUSTRY);
        assert_eq!(input.target_market, None);
    }

    #[test]
    fn test_unknown_preset_is_an_error() {
        let args = analyze(&[
            "marketflow",
            "analyze",
            "--preset",
            "missing",
            "--presets-file",
            "/nonexistent/examples.yaml",
        ]);
        let err = resolve_input(&args).unwrap_err();
        assert!(err.to_string().contains("no preset named 'missing'"));
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::try_parse_from(["marketflow", "industries", "-vv", "--log-format", "json"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.log_format, LogFormat::Json);
        assert!(matches!(cli.command, Command::Industries));
    }
}
