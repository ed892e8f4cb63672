// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The application layer only talks to these traits, so an
// artifact-backed model and a fallback constant are
// interchangeable, as are a single JSON file and a JSON
// Lines batch.

use anyhow::Result;

use crate::domain::applicant::ApplicantInput;
use crate::domain::feature::FeatureVector;

// ─── Regressor ────────────────────────────────────────────────────────────────
/// Anything that maps a feature vector to a premium.
///
/// Implementations:
///   - LinearModel   → intercept + weighted sum
///   - TreeEnsemble  → base score + sum of tree leaves
///   - ConstantModel → fixed value, used when artifacts are missing
pub trait Regressor: Send + Sync {
    fn predict(&self, features: &FeatureVector) -> Result<f64>;

    /// Short label for logs, e.g. "linear(18)"
    fn describe(&self) -> String;
}

// ─── ApplicantSource ──────────────────────────────────────────────────────────
/// Any component that can produce applicants to price.
///
/// Implementations:
///   - JsonApplicantLoader  → one applicant from a file or stdin
///   - JsonLinesLoader      → many applicants, one per line
pub trait ApplicantSource {
    fn load_all(&self) -> Result<Vec<ApplicantInput>>;
}
