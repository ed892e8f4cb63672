// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// File-system concerns shared by the use cases:
//
//   artifact_store.rs — Loading model and scaler artifacts
//                       for both age segments, with the
//                       constant fallback bundle when they
//                       are unavailable.
//
//   report.rs         — CSV output for batch predictions.

/// Model / scaler artifact loading and fallback
pub mod artifact_store;

/// Batch prediction CSV writer
pub mod report;
