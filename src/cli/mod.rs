// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Parses arguments with clap and prints results. All logic is
// delegated to Layer 2 (application).
//
//   predict — price one applicant
//   batch   — price a JSON Lines file into a CSV report
//   risk    — show the normalized medical risk score

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{BatchArgs, Commands, GlobalArgs, PredictArgs, RiskArgs};

use crate::application::{batch_use_case::BatchUseCase, predict_use_case::PredictUseCase};
use crate::data::{loader::JsonApplicantLoader, risk::calculate_normalized_risk};

#[derive(Parser, Debug)]
#[command(
    name = "premium-predictor",
    version,
    about = "Encode applicant attributes and predict an insurance premium with age-segmented models."
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match &self.command {
            Commands::Predict(args) => self.run_predict(args),
            Commands::Batch(args)   => self.run_batch(args),
            Commands::Risk(args)    => self.run_risk(args),
        }
    }

    fn run_predict(&self, args: &PredictArgs) -> Result<()> {
        let cfg       = self.global.resolve()?;
        let use_case  = PredictUseCase::new(&cfg)?;
        let applicant = JsonApplicantLoader::new(&args.input).load()?;

        let prediction = use_case.explain(&applicant)?;

        if args.features {
            println!("segment: {}", prediction.segment);
            for (name, value) in prediction.features.iter() {
                println!("  {:<34} {}", name, value);
            }
        }
        println!("{}", prediction.premium);
        Ok(())
    }

    fn run_batch(&self, args: &BatchArgs) -> Result<()> {
        let cfg       = self.global.resolve()?;
        let predictor = PredictUseCase::new(&cfg)?;

        let summary = BatchUseCase::new(&predictor).execute(&args.input, &args.output)?;
        println!(
            "Predicted {} applicants ({} skipped). Report: {}",
            summary.predicted, summary.skipped, args.output
        );
        Ok(())
    }

    fn run_risk(&self, args: &RiskArgs) -> Result<()> {
        println!("{:.6}", calculate_normalized_risk(&args.history));
        Ok(())
    }
}
