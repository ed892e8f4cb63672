// ============================================================
// Layer 5 — Feature Scalers
// ============================================================
// Each age segment carries the scaler that was fitted alongside
// its model. The artifact names the columns it touches and,
// optionally, the fitted parameters:
//
//   { "cols_to_scale": ["age", "income_lakhs"], "scaler": null }
//   { "cols_to_scale": [...], "scaler": { "kind": "min_max",
//                                         "min": [...], "scale": [...] } }
//   { "cols_to_scale": [...], "scaler": { "kind": "standard",
//                                         "mean": [...], "scale": [...] } }
//
// A null scaler leaves the vector untouched.
//
// Columns listed in cols_to_scale but absent from the feature
// vector (the placeholder `income_level` column used at fit
// time, for example) are skipped. Both transforms act on each
// column independently, so skipping is equivalent to scaling a
// dummy column and dropping it afterwards.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::domain::feature::{index_of, FeatureVector};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScalerParams {
    /// x' = x * scale + min
    MinMax { min: Vec<f64>, scale: Vec<f64> },
    /// x' = (x - mean) / scale
    Standard { mean: Vec<f64>, scale: Vec<f64> },
}

impl ScalerParams {
    fn len_check(&self, expected: usize) -> Result<()> {
        let (a, b) = match self {
            ScalerParams::MinMax { min, scale }    => (min.len(), scale.len()),
            ScalerParams::Standard { mean, scale } => (mean.len(), scale.len()),
        };
        if a != expected || b != expected {
            bail!("Scaler parameters have lengths {a}/{b}, expected {expected}");
        }
        Ok(())
    }

    fn apply(&self, i: usize, x: f64) -> f64 {
        match self {
            ScalerParams::MinMax { min, scale } => x * scale[i] + min[i],
            ScalerParams::Standard { mean, scale } => {
                // zero variance at fit time: centre only
                if scale[i] == 0.0 {
                    x - mean[i]
                } else {
                    (x - mean[i]) / scale[i]
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalerArtifact {
    pub cols_to_scale: Vec<String>,
    #[serde(default)]
    pub scaler: Option<ScalerParams>,
}

impl ScalerArtifact {
    /// A scaler that names its columns but changes nothing.
    pub fn identity(cols: &[&str]) -> Self {
        Self {
            cols_to_scale: cols.iter().map(|c| c.to_string()).collect(),
            scaler:        None,
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let artifact: ScalerArtifact =
            serde_json::from_str(json).context("Malformed scaler artifact")?;
        artifact.validate()?;
        Ok(artifact)
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(params) = &self.scaler {
            params.len_check(self.cols_to_scale.len())?;
        }
        Ok(())
    }

    pub fn is_identity(&self) -> bool {
        self.scaler.is_none()
    }

    /// Return a scaled copy of `features`. Parameter arrays that do not
    /// match cols_to_scale are an error.
    pub fn transform(&self, features: &FeatureVector) -> Result<FeatureVector> {
        let mut out = *features;
        let Some(params) = &self.scaler else { return Ok(out) };
        self.validate()?;

        for (i, col) in self.cols_to_scale.iter().enumerate() {
            match index_of(col) {
                Some(idx) => out.set_at(idx, params.apply(i, features.at(idx))),
                None => tracing::trace!("Scaler column '{}' not in feature vector, skipped", col),
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FeatureVector {
        let mut v = FeatureVector::zeros();
        v.set("age", 40.0).unwrap();
        v.set("income_lakhs", 20.0).unwrap();
        v.set("insurance_plan", 2.0).unwrap();
        v
    }

    #[test]
    fn test_identity_leaves_vector_untouched() {
        let s = ScalerArtifact::identity(&["age", "income_lakhs"]);
        assert!(s.is_identity());
        assert_eq!(s.transform(&sample()).unwrap(), sample());
    }

    #[test]
    fn test_null_scaler_from_json() {
        let s = ScalerArtifact::from_json(r#"{"cols_to_scale": ["age"], "scaler": null}"#).unwrap();
        assert!(s.is_identity());
    }

    #[test]
    fn test_min_max_with_placeholder_column() {
        // age range 18..=68, income_level placeholder, income range 0..=100
        let json = r#"{
            "cols_to_scale": ["age", "income_level", "income_lakhs"],
            "scaler": {"kind": "min_max",
                       "min":   [-0.36, 0.0, 0.0],
                       "scale": [0.02, 0.5, 0.01]}
        }"#;
        let s = ScalerArtifact::from_json(json).unwrap();
        let v = s.transform(&sample()).unwrap();
        assert!((v.get("age").unwrap() - 0.44).abs() < 1e-12);
        assert!((v.get("income_lakhs").unwrap() - 0.2).abs() < 1e-12);
        // untouched column
        assert_eq!(v.get("insurance_plan"), Some(2.0));
    }

    #[test]
    fn test_standard_scaler() {
        let json = r#"{
            "cols_to_scale": ["age", "income_lakhs"],
            "scaler": {"kind": "standard", "mean": [30.0, 20.0], "scale": [5.0, 0.0]}
        }"#;
        let v = ScalerArtifact::from_json(json).unwrap().transform(&sample()).unwrap();
        assert_eq!(v.get("age"), Some(2.0));
        assert_eq!(v.get("income_lakhs"), Some(0.0));
    }

    #[test]
    fn test_unvalidated_mismatched_scaler_refuses_to_transform() {
        let s = ScalerArtifact {
            cols_to_scale: vec!["age".into(), "income_lakhs".into()],
            scaler:        Some(ScalerParams::MinMax { min: vec![0.0], scale: vec![1.0] }),
        };
        assert!(s.transform(&sample()).is_err());
    }

    #[test]
    fn test_rejects_parameter_length_mismatch() {
        let json = r#"{
            "cols_to_scale": ["age", "income_lakhs"],
            "scaler": {"kind": "min_max", "min": [0.0], "scale": [1.0, 1.0]}
        }"#;
        assert!(ScalerArtifact::from_json(json).is_err());
    }
}
