// ============================================================
// Layer 5 — ML / Model Layer
// ============================================================
// Evaluation of externally trained artifacts. Nothing here
// trains or fits anything.
//
//   model.rs      — linear, tree-ensemble and constant regressors
//   scaler.rs     — min-max / standard column scalers
//   inferencer.rs — age routing, scaling and prediction

/// Regression model artifacts and their evaluation
pub mod model;

/// Per-segment feature scaling
pub mod scaler;

/// Age-segmented dispatch from applicant to premium
pub mod inferencer;
