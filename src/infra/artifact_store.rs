// ============================================================
// Layer 6 — Artifact Store
// ============================================================
// Loads the four externally trained artifacts for the two age
// segments:
//
//   artifacts/
//     model_young.json    ← regressor for age ≤ threshold
//     model_rest.json     ← regressor for everyone else
//     scaler_young.json   ← scaler fitted with model_young
//     scaler_rest.json    ← scaler fitted with model_rest
//
// Loading is all-or-nothing: if any artifact is missing or
// invalid the whole bundle fails. In best-effort mode the
// caller then gets the fallback bundle (constant premiums and
// identity scalers) for both segments.

use anyhow::{Context, Result};
use std::{fs, path::PathBuf};

use crate::domain::segment::AgeSegment;
use crate::ml::inferencer::SegmentPipeline;
use crate::ml::model::{ConstantModel, RegressionModel};
use crate::ml::scaler::ScalerArtifact;

/// Columns named by the fallback identity scalers
pub const FALLBACK_SCALED_COLUMNS: [&str; 2] = ["age", "income_lakhs"];

/// Both segment pipelines plus where they came from
pub struct ArtifactBundle {
    pub young:       SegmentPipeline,
    pub rest:        SegmentPipeline,
    pub is_fallback: bool,
}

/// Constant premiums used when artifacts cannot be loaded
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FallbackPremiums {
    pub young: f64,
    pub rest:  f64,
}

impl Default for FallbackPremiums {
    fn default() -> Self {
        Self { young: 1000.0, rest: 2000.0 }
    }
}

pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn model_path(&self, segment: AgeSegment) -> PathBuf {
        self.dir.join(format!("model_{}.json", segment.as_str()))
    }

    pub fn scaler_path(&self, segment: AgeSegment) -> PathBuf {
        self.dir.join(format!("scaler_{}.json", segment.as_str()))
    }

    /// Load and validate all four artifacts.
    pub fn load(&self) -> Result<ArtifactBundle> {
        let young = self.load_segment(AgeSegment::Young)?;
        let rest  = self.load_segment(AgeSegment::Rest)?;

        tracing::info!(
            "Loaded artifacts from '{}': young={}, rest={}",
            self.dir.display(),
            young.model.describe(),
            rest.model.describe()
        );
        Ok(ArtifactBundle { young, rest, is_fallback: false })
    }

    /// Load the artifacts, or fall back to constants if anything fails.
    pub fn load_or_fallback(&self, premiums: FallbackPremiums) -> ArtifactBundle {
        match self.load() {
            Ok(bundle) => bundle,
            Err(e) => {
                tracing::warn!(
                    "Cannot load artifacts from '{}' ({:#}); using fallback premiums {} / {}",
                    self.dir.display(),
                    e,
                    premiums.young,
                    premiums.rest
                );
                fallback_bundle(premiums)
            }
        }
    }

    fn load_segment(&self, segment: AgeSegment) -> Result<SegmentPipeline> {
        let model_path = self.model_path(segment);
        let json = fs::read_to_string(&model_path)
            .with_context(|| format!("Cannot read model '{}'", model_path.display()))?;
        let model = RegressionModel::from_json(&json)
            .with_context(|| format!("Invalid model '{}'", model_path.display()))?;

        let scaler_path = self.scaler_path(segment);
        let json = fs::read_to_string(&scaler_path)
            .with_context(|| format!("Cannot read scaler '{}'", scaler_path.display()))?;
        let scaler = ScalerArtifact::from_json(&json)
            .with_context(|| format!("Invalid scaler '{}'", scaler_path.display()))?;

        tracing::debug!("Segment '{}' uses {}", segment, model_path.display());
        Ok(SegmentPipeline::new(scaler, Box::new(model)))
    }
}

pub fn fallback_bundle(premiums: FallbackPremiums) -> ArtifactBundle {
    let pipeline = |value: f64| {
        SegmentPipeline::new(
            ScalerArtifact::identity(&FALLBACK_SCALED_COLUMNS),
            Box::new(ConstantModel::new(value)),
        )
    };
    ArtifactBundle {
        young:       pipeline(premiums.young),
        rest:        pipeline(premiums.rest),
        is_fallback: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::feature::FeatureVector;

    const LINEAR: &str = r#"{"kind": "linear", "feature_names": ["age"], "coefficients": [1.0], "intercept": 0}"#;
    const IDENTITY: &str = r#"{"cols_to_scale": ["age"], "scaler": null}"#;

    fn write_all(dir: &std::path::Path) {
        fs::write(dir.join("model_young.json"), LINEAR).unwrap();
        fs::write(dir.join("model_rest.json"), r#"{"kind": "constant", "value": 5}"#).unwrap();
        fs::write(dir.join("scaler_young.json"), IDENTITY).unwrap();
        fs::write(dir.join("scaler_rest.json"), IDENTITY).unwrap();
    }

    #[test]
    fn test_loads_complete_directory() {
        let dir = tempfile::tempdir().unwrap();
        write_all(dir.path());
        let bundle = ArtifactStore::new(dir.path()).load().unwrap();
        assert!(!bundle.is_fallback);
        assert_eq!(bundle.young.model.describe(), "linear(1)");
        assert_eq!(bundle.rest.model.predict(&FeatureVector::zeros()).unwrap(), 5.0);
    }

    #[test]
    fn test_one_missing_artifact_fails_whole_load() {
        let dir = tempfile::tempdir().unwrap();
        write_all(dir.path());
        fs::remove_file(dir.path().join("scaler_rest.json")).unwrap();
        let store = ArtifactStore::new(dir.path());
        assert!(store.load().is_err());

        let bundle = store.load_or_fallback(FallbackPremiums::default());
        assert!(bundle.is_fallback);
        // the valid young model is discarded too
        assert_eq!(bundle.young.model.describe(), "constant(1000)");
    }

    #[test]
    fn test_invalid_artifact_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        write_all(dir.path());
        fs::write(dir.path().join("model_rest.json"), "{not json").unwrap();
        let bundle = ArtifactStore::new(dir.path()).load_or_fallback(FallbackPremiums::default());
        assert!(bundle.is_fallback);
        assert_eq!(bundle.rest.model.predict(&FeatureVector::zeros()).unwrap(), 2000.0);
        assert!(bundle.rest.scaler.is_identity());
        assert_eq!(bundle.rest.scaler.cols_to_scale, vec!["age", "income_lakhs"]);
    }

    #[test]
    fn test_paths_use_segment_labels() {
        let store = ArtifactStore::new("artifacts");
        assert!(store.model_path(AgeSegment::Young).ends_with("model_young.json"));
        assert!(store.scaler_path(AgeSegment::Rest).ends_with("scaler_rest.json"));
    }
}
