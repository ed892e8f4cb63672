// ============================================================
// Layer 4 — Medical Risk Score
// ============================================================
// Medical history is free text of the form
// "Diabetes & High blood pressure". Each known condition has a
// fixed weight; the weights are summed and divided by the
// maximum score seen during training.
//
// Unknown conditions weigh nothing. Repeated conditions count
// every time. The result is NOT clamped, so combinations such
// as "Diabetes & Heart disease" can exceed 1.0.

const CONDITION_WEIGHTS: [(&str, f64); 6] = [
    ("diabetes",            6.0),
    ("heart disease",       8.0),
    ("high blood pressure", 6.0),
    ("thyroid",             5.0),
    ("no disease",          0.0),
    ("none",                0.0),
];

const MIN_SCORE: f64 = 0.0;
const MAX_SCORE: f64 = 14.0;

/// Separator between conditions. Matching is on the exact
/// string, so "Diabetes&Thyroid" is a single unknown condition.
const SEPARATOR: &str = " & ";

/// Weight of a single, already-normalised condition name
fn condition_weight(condition: &str) -> f64 {
    CONDITION_WEIGHTS
        .iter()
        .find(|(name, _)| *name == condition)
        .map(|(_, w)| *w)
        .unwrap_or(0.0)
}

/// Compute the normalized risk score for a medical history string.
pub fn calculate_normalized_risk(medical_history: &str) -> f64 {
    let lowered = medical_history.to_lowercase();

    let total: f64 = lowered
        .split(SEPARATOR)
        .map(|c| condition_weight(c.trim()))
        .sum();

    let score = (total - MIN_SCORE) / (MAX_SCORE - MIN_SCORE);
    tracing::debug!("Medical history '{}' → risk {:.4}", medical_history, score);
    score
}
