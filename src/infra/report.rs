// ============================================================
// Layer 6 — Batch Report Writer
// ============================================================
// Writes one CSV row per priced applicant.
//
// Example output:
//   line,age,segment,premium
//   1,22,young,8412
//   3,47,rest,21337

use anyhow::{Context, Result};
use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::domain::segment::AgeSegment;

pub const REPORT_HEADER: &str = "line,age,segment,premium";

#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    /// 1-based line in the input file
    pub line:    usize,
    pub age:     u32,
    pub segment: AgeSegment,
    pub premium: i64,
}

pub struct ReportWriter {
    path: PathBuf,
    out:  BufWriter<File>,
    rows: usize,
}

impl ReportWriter {
    /// Create (or truncate) the report file and write the header.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Cannot create '{}'", parent.display()))?;
        }

        let file = File::create(&path)
            .with_context(|| format!("Cannot create report '{}'", path.display()))?;
        let mut out = BufWriter::new(file);
        writeln!(out, "{REPORT_HEADER}")?;

        tracing::debug!("Created report '{}'", path.display());
        Ok(Self { path, out, rows: 0 })
    }

    pub fn write(&mut self, row: &ReportRow) -> Result<()> {
        writeln!(self.out, "{},{},{},{}", row.line, row.age, row.segment, row.premium)?;
        self.rows += 1;
        Ok(())
    }

    /// Flush buffered rows and return how many were written.
    pub fn finish(mut self) -> Result<usize> {
        self.out
            .flush()
            .with_context(|| format!("Cannot flush report '{}'", self.path.display()))?;
        Ok(self.rows)
    }
}
