// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Three subcommands: `predict`, `batch` and `risk`, plus the
// global options that shape the PredictConfig.

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::application::predict_use_case::PredictConfig;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Predict the premium for one applicant (JSON object)
    Predict(PredictArgs),

    /// Predict premiums for a JSON Lines file and write a CSV report
    Batch(BatchArgs),

    /// Print the normalized risk score for a medical history
    Risk(RiskArgs),
}

/// Options shared by every subcommand.
/// Flags override the config file, which overrides the defaults.
#[derive(Args, Debug, Default)]
pub struct GlobalArgs {
    /// JSON config file with PredictConfig keys
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Directory containing model_{young,rest}.json and scaler_{young,rest}.json
    #[arg(long, global = true)]
    pub artifacts_dir: Option<String>,

    /// Highest age routed to the young model
    #[arg(long, global = true)]
    pub age_threshold: Option<u32>,

    /// Fail when artifacts are missing instead of using fallback premiums
    #[arg(long, global = true)]
    pub strict: bool,
}

impl GlobalArgs {
    /// Resolve the final configuration: defaults → config file → flags.
    pub fn resolve(&self) -> Result<PredictConfig> {
        let mut cfg = match &self.config {
            Some(path) => PredictConfig::from_file(path)?,
            None       => PredictConfig::default(),
        };

        if let Some(dir) = &self.artifacts_dir {
            cfg.artifacts_dir = dir.clone();
        }
        if let Some(threshold) = self.age_threshold {
            cfg.age_threshold = threshold;
        }
        if self.strict {
            cfg.strict = true;
        }
        Ok(cfg)
    }
}

#[derive(Args, Debug)]
pub struct PredictArgs {
    /// Applicant JSON file, or "-" for stdin
    #[arg(long, default_value = "-")]
    pub input: String,

    /// Also print the segment and the scaled feature vector
    #[arg(long)]
    pub features: bool,
}

#[derive(Args, Debug)]
pub struct BatchArgs {
    /// JSON Lines file, one applicant per line
    #[arg(long)]
    pub input: String,

    /// CSV report path
    #[arg(long, default_value = "predictions.csv")]
    pub output: String,
}

#[derive(Args, Debug)]
pub struct RiskArgs {
    /// Conditions joined with " & ", e.g. "Diabetes & Thyroid"
    #[arg(long)]
    pub history: String,
}
