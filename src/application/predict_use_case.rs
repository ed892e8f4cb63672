// ============================================================
// Layer 2 — PredictUseCase
// ============================================================
// Builds the inferencer from configuration and prices single
// applicants:
//
//   Step 1: Load artifacts (or the fallback bundle)   (Layer 6)
//   Step 2: Assemble the segment pipelines            (Layer 5)
//   Step 3: Encode, scale, dispatch, predict          (Layers 4-5)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

use crate::domain::applicant::ApplicantInput;
use crate::domain::feature::FeatureVector;
use crate::domain::segment::{AgeSegment, DEFAULT_AGE_THRESHOLD};
use crate::infra::artifact_store::{ArtifactStore, FallbackPremiums};
use crate::ml::inferencer::{Inferencer, Prediction};

// ─── Prediction Configuration ────────────────────────────────────────────────
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictConfig {
    pub artifacts_dir:  String,
    pub age_threshold:  u32,
    /// Fail instead of falling back when artifacts cannot be loaded
    pub strict:         bool,
    pub fallback_young: f64,
    pub fallback_rest:  f64,
}

impl Default for PredictConfig {
    fn default() -> Self {
        let premiums = FallbackPremiums::default();
        Self {
            artifacts_dir:  "artifacts".to_string(),
            age_threshold:  DEFAULT_AGE_THRESHOLD,
            strict:         false,
            fallback_young: premiums.young,
            fallback_rest:  premiums.rest,
        }
    }
}

impl PredictConfig {
    /// Read a JSON config file. Missing keys take their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context(|| format!("Cannot read config '{}'", path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Invalid config '{}'", path.display()))
    }

    pub fn fallback_premiums(&self) -> FallbackPremiums {
        FallbackPremiums { young: self.fallback_young, rest: self.fallback_rest }
    }
}

// ─── PredictUseCase ──────────────────────────────────────────────────────────
pub struct PredictUseCase {
    inferencer:    Inferencer,
    uses_fallback: bool,
}

impl PredictUseCase {
    pub fn new(config: &PredictConfig) -> Result<Self> {
        let store = ArtifactStore::new(&config.artifacts_dir);

        let bundle = if config.strict {
            store.load().context("Artifact loading failed in strict mode")?
        } else {
            store.load_or_fallback(config.fallback_premiums())
        };

        let uses_fallback = bundle.is_fallback;
        let inferencer    = Inferencer::new(bundle.young, bundle.rest, config.age_threshold);
        Ok(Self { inferencer, uses_fallback })
    }

    /// Whether predictions come from the constant fallback bundle
    pub fn uses_fallback(&self) -> bool {
        self.uses_fallback
    }

    pub fn predict(&self, applicant: &ApplicantInput) -> Result<i64> {
        self.inferencer.predict(applicant)
    }

    pub fn explain(&self, applicant: &ApplicantInput) -> Result<Prediction> {
        self.inferencer.explain(applicant)
    }

    pub fn features(&self, applicant: &ApplicantInput) -> Result<(AgeSegment, FeatureVector)> {
        self.inferencer.features(applicant)
    }
}
