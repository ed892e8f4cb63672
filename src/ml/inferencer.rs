// ============================================================
// Layer 5 — Inferencer
// ============================================================
// Routes an applicant to the young or rest pipeline, encodes,
// scales and predicts. The premium is the model output
// truncated toward zero.

use anyhow::{bail, Result};

use crate::data::preprocessor::Preprocessor;
use crate::domain::applicant::ApplicantInput;
use crate::domain::feature::FeatureVector;
use crate::domain::segment::AgeSegment;
use crate::domain::traits::Regressor;
use crate::ml::scaler::ScalerArtifact;

/// Scaler and model for one age segment
pub struct SegmentPipeline {
    pub scaler: ScalerArtifact,
    pub model:  Box<dyn Regressor>,
}

impl SegmentPipeline {
    pub fn new(scaler: ScalerArtifact, model: Box<dyn Regressor>) -> Self {
        Self { scaler, model }
    }
}

/// Everything computed for one applicant, for inspection
#[derive(Debug, Clone)]
pub struct Prediction {
    pub segment:  AgeSegment,
    pub features: FeatureVector,
    pub raw:      f64,
    pub premium:  i64,
}

pub struct Inferencer {
    preprocessor:  Preprocessor,
    age_threshold: u32,
    young:         SegmentPipeline,
    rest:          SegmentPipeline,
}

impl Inferencer {
    pub fn new(young: SegmentPipeline, rest: SegmentPipeline, age_threshold: u32) -> Self {
        tracing::debug!(
            "Inferencer ready: young={}, rest={}, threshold={}",
            young.model.describe(),
            rest.model.describe(),
            age_threshold
        );
        Self { preprocessor: Preprocessor::new(), age_threshold, young, rest }
    }

    pub fn segment_for(&self, applicant: &ApplicantInput) -> AgeSegment {
        AgeSegment::for_age(applicant.age, self.age_threshold)
    }

    fn pipeline(&self, segment: AgeSegment) -> &SegmentPipeline {
        match segment {
            AgeSegment::Young => &self.young,
            AgeSegment::Rest  => &self.rest,
        }
    }

    /// Encoded and scaled feature vector plus the segment that produced it.
    pub fn features(&self, applicant: &ApplicantInput) -> Result<(AgeSegment, FeatureVector)> {
        let segment  = self.segment_for(applicant);
        let encoded  = self.preprocessor.encode(applicant);
        let scaled   = self.pipeline(segment).scaler.transform(&encoded)?;
        Ok((segment, scaled))
    }

    pub fn explain(&self, applicant: &ApplicantInput) -> Result<Prediction> {
        let (segment, features) = self.features(applicant)?;
        let raw = self.pipeline(segment).model.predict(&features)?;

        if !raw.is_finite() {
            bail!("Model for segment '{segment}' returned non-finite prediction {raw}");
        }
        let truncated = raw.trunc();
        // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive
        if truncated < i64::MIN as f64 || truncated >= i64::MAX as f64 {
            bail!("Model for segment '{segment}' returned out-of-range prediction {raw}");
        }
        let premium = truncated as i64;

        tracing::debug!("age={} segment={} raw={:.4} premium={}", applicant.age, segment, raw, premium);
        Ok(Prediction { segment, features, raw, premium })
    }

    pub fn predict(&self, applicant: &ApplicantInput) -> Result<i64> {
        Ok(self.explain(applicant)?.premium)
    }
}
