// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust structs, enums and traits describing the core
// concepts of premium prediction.
//
// Rules for this layer:
//   - NO file I/O
//   - NO model or scaler arithmetic
//   - Only the vocabulary the other layers share
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// A single applicant's raw attributes
pub mod applicant;

// The fixed 18-column feature vector
pub mod feature;

// Age-based routing between the two models
pub mod segment;

// Core abstractions (traits) that other layers implement
pub mod traits;
