// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Orchestrates the other layers. No encoding or model math
// lives here, and no printing (that's Layer 1).

// Single-applicant prediction and its configuration
pub mod predict_use_case;

// JSON Lines → CSV batch pricing
pub mod batch_use_case;
