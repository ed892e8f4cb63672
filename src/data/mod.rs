// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything between a raw applicant record and the feature
// vector a model consumes:
//
//   JSON / JSON Lines
//       │
//       ▼
//   loader         → ApplicantInput records
//       │
//       ▼
//   risk           → normalized medical risk score
//       │
//       ▼
//   preprocessor   → 18-column FeatureVector (unscaled)
//
// Scaling is applied afterwards by the ml layer, because the
// scaler depends on which age segment was selected.

/// Reads applicants from JSON and JSON Lines
pub mod loader;

/// Medical history → normalized risk score
pub mod risk;

/// Applicant → fixed-order feature vector
pub mod preprocessor;
