// ============================================================
// Layer 2 — BatchUseCase
// ============================================================
// Prices every applicant in a JSON Lines file and writes the
// results to CSV.
//
//   Step 1: Read applicants, skipping malformed lines  (Layer 4)
//   Step 2: Predict each one                           (Layer 5)
//   Step 3: Write successful rows to the report        (Layer 6)
//
// A line that cannot be parsed or priced is logged and
// counted as skipped.

use anyhow::Result;

use crate::application::predict_use_case::PredictUseCase;
use crate::data::loader::JsonLinesLoader;
use crate::infra::report::{ReportRow, ReportWriter};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub predicted: usize,
    pub skipped:   usize,
}

pub struct BatchUseCase<'a> {
    predictor: &'a PredictUseCase,
}

impl<'a> BatchUseCase<'a> {
    pub fn new(predictor: &'a PredictUseCase) -> Self {
        Self { predictor }
    }

    pub fn execute(&self, input: &str, output: &str) -> Result<BatchSummary> {
        tracing::info!("Pricing applicants from '{}'", input);
        let batch = JsonLinesLoader::new(input).load_numbered()?;

        let mut report  = ReportWriter::create(output)?;
        let mut summary = BatchSummary { predicted: 0, skipped: batch.rejected };

        for (line, applicant) in &batch.applicants {
            match self.predictor.explain(applicant) {
                Ok(p) => {
                    report.write(&ReportRow {
                        line:    *line,
                        age:     applicant.age,
                        segment: p.segment,
                        premium: p.premium,
                    })?;
                    summary.predicted += 1;
                }
                Err(e) => {
                    tracing::warn!("Line {}: prediction failed: {:#}", line, e);
                    summary.skipped += 1;
                }
            }
        }

        let written = report.finish()?;
        tracing::info!(
            "Batch complete: {} predicted, {} skipped, report '{}'",
            written,
            summary.skipped,
            output
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::predict_use_case::PredictConfig;
    use std::fs;

    #[test]
    fn test_batch_with_fallback_models() {
        let dir    = tempfile::tempdir().unwrap();
        let input  = dir.path().join("applicants.jsonl");
        let output = dir.path().join("out.csv");
        fs::write(&input, "{\"Age\": 18}\nnot json\n\n{\"Age\": 64, \"Region\": \"Northwest\"}\n").unwrap();

        let cfg = PredictConfig {
            artifacts_dir: dir.path().join("missing").to_string_lossy().to_string(),
            ..PredictConfig::default()
        };
        let predictor = PredictUseCase::new(&cfg).unwrap();
        let summary = BatchUseCase::new(&predictor)
            .execute(&input.to_string_lossy(), &output.to_string_lossy())
            .unwrap();

        assert_eq!(summary, BatchSummary { predicted: 2, skipped: 1 });
        let csv = fs::read_to_string(&output).unwrap();
        assert_eq!(csv, "line,age,segment,premium\n1,18,young,1000\n4,64,rest,2000\n");
    }

    #[test]
    fn test_unparseable_and_ageless_lines_count_as_skipped() {
        let dir    = tempfile::tempdir().unwrap();
        let input  = dir.path().join("applicants.jsonl");
        let output = dir.path().join("out.csv");
        fs::write(&input, "{\"Age\": 18}\nnot json\n{\"Gender\": \"Male\"}\n").unwrap();

        let cfg = PredictConfig {
            artifacts_dir: dir.path().join("missing").to_string_lossy().to_string(),
            ..PredictConfig::default()
        };
        let predictor = PredictUseCase::new(&cfg).unwrap();
        let summary = BatchUseCase::new(&predictor)
            .execute(&input.to_string_lossy(), &output.to_string_lossy())
            .unwrap();

        assert_eq!(summary, BatchSummary { predicted: 1, skipped: 2 });
        let csv = fs::read_to_string(&output).unwrap();
        assert_eq!(csv, "line,age,segment,premium\n1,18,young,1000\n");
    }
}
