// ============================================================
// Layer 4 — Applicant Loaders
// ============================================================
// Reads applicant records from disk (or stdin).
//
//   JsonApplicantLoader → one JSON object, from a path or "-"
//   JsonLinesLoader     → one JSON object per line
//
// The JSON Lines loader is lenient: a malformed line is logged
// and skipped so one bad record never sinks a whole batch.

use anyhow::{Context, Result};
use std::{
    fs,
    io::{self, Read},
    path::{Path, PathBuf},
};

use crate::domain::applicant::ApplicantInput;
use crate::domain::traits::ApplicantSource;

/// Path value meaning "read from standard input"
pub const STDIN_PATH: &str = "-";

// ─── Single applicant ─────────────────────────────────────────────────────────
pub struct JsonApplicantLoader {
    path: String,
}

impl JsonApplicantLoader {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    pub fn load(&self) -> Result<ApplicantInput> {
        let text = if self.path == STDIN_PATH {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Cannot read applicant from stdin")?;
            buf
        } else {
            fs::read_to_string(&self.path)
                .with_context(|| format!("Cannot read applicant file '{}'", self.path))?
        };

        parse_applicant(&text)
            .with_context(|| format!("Invalid applicant JSON in '{}'", self.path))
    }
}

impl ApplicantSource for JsonApplicantLoader {
    fn load_all(&self) -> Result<Vec<ApplicantInput>> {
        Ok(vec![self.load()?])
    }
}

pub fn parse_applicant(text: &str) -> Result<ApplicantInput> {
    Ok(serde_json::from_str(text)?)
}

// ─── Batch (JSON Lines) ───────────────────────────────────────────────────────
/// Parsed applicants with their 1-based line numbers, plus the
/// number of non-blank lines that could not be parsed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JsonLinesBatch {
    pub applicants: Vec<(usize, ApplicantInput)>,
    pub rejected:   usize,
}

pub struct JsonLinesLoader {
    path: PathBuf,
}

impl JsonLinesLoader {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }

    /// Load every parseable line and count the ones that were rejected.
    pub fn load_numbered(&self) -> Result<JsonLinesBatch> {
        let text = fs::read_to_string(&self.path)
            .with_context(|| format!("Cannot read batch file '{}'", self.path.display()))?;
        Ok(parse_json_lines(&text))
    }
}

impl ApplicantSource for JsonLinesLoader {
    fn load_all(&self) -> Result<Vec<ApplicantInput>> {
        Ok(self.load_numbered()?.applicants.into_iter().map(|(_, a)| a).collect())
    }
}

fn parse_json_lines(text: &str) -> JsonLinesBatch {
    let mut out = JsonLinesBatch::default();

    for (i, line) in text.lines().enumerate() {
        let line_no = i + 1;
        let line    = line.trim();
        if line.is_empty() {
            continue;
        }

        match parse_applicant(line) {
            Ok(applicant) => out.applicants.push((line_no, applicant)),
            Err(e) => {
                tracing::warn!("Skipping line {}: {}", line_no, e);
                out.rejected += 1;
            }
        }
    }

    tracing::debug!("Parsed {} applicants, rejected {}", out.applicants.len(), out.rejected);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_json_lines_skips_blank_and_bad_lines() {
        let text = "{\"Age\": 20}\n\n not json\n{\"Age\": 45, \"Gender\": \"Male\"}\n";
        let batch = parse_json_lines(text);
        assert_eq!(batch.rejected, 1);
        let parsed = &batch.applicants;
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].0, 1);
        assert_eq!(parsed[1].0, 4);
        assert_eq!(parsed[1].1.gender.as_deref(), Some("Male"));
    }

    #[test]
    fn test_missing_age_line_is_skipped() {
        let batch = parse_json_lines("{\"Region\": \"Northwest\"}\n{\"Age\": 33}");
        assert_eq!(batch.rejected, 1);
        assert_eq!(batch.applicants, vec![(2, ApplicantInput::with_age(33))]);
    }

    #[test]
    fn test_loads_single_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, "{{\"Age\": 52, \"Insurance Plan\": \"Bronze\"}}").unwrap();
        let loader = JsonApplicantLoader::new(f.path().to_string_lossy().to_string());
        let all = loader.load_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].age, 52);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let loader = JsonLinesLoader::new("/definitely/not/here.jsonl");
        assert!(loader.load_all().is_err());
    }
}
