// ============================================================
// Layer 4 — Feature Preprocessor
// ============================================================
// Turns an ApplicantInput into the unscaled FeatureVector.
//
// Encoding steps (applied in order):
//   1. Start from all zeros (every category at its baseline)
//   2. Copy the numeric attributes
//   3. Ordinal-encode the insurance plan
//   4. Set the one-hot dummies for each categorical attribute
//   5. Compute the normalized medical risk score
//
// Category matching is exact and case-sensitive. A value that
// is not listed below leaves every dummy of that attribute at
// zero, i.e. it is treated like the baseline category.

use crate::data::risk::calculate_normalized_risk;
use crate::domain::applicant::ApplicantInput;
use crate::domain::feature::{index_of, FeatureVector};

// ─── Category tables ──────────────────────────────────────────────────────────
// (input value, feature column) pairs. Baselines are omitted.

const GENDER: &[(&str, &str)] = &[("Male", "gender_Male")];

const REGION: &[(&str, &str)] = &[
    ("Northwest", "region_Northwest"),
    ("Southeast", "region_Southeast"),
    ("Southwest", "region_Southwest"),
];

const MARITAL_STATUS: &[(&str, &str)] = &[("Unmarried", "marital_status_Unmarried")];

const BMI_CATEGORY: &[(&str, &str)] = &[
    ("Obesity",     "bmi_category_Obesity"),
    ("Overweight",  "bmi_category_Overweight"),
    ("Underweight", "bmi_category_Underweight"),
];

const SMOKING_STATUS: &[(&str, &str)] = &[
    ("Occasional", "smoking_status_Occasional"),
    ("Regular",    "smoking_status_Regular"),
];

const EMPLOYMENT_STATUS: &[(&str, &str)] = &[
    ("Salaried",      "employment_status_Salaried"),
    ("Self-Employed", "employment_status_Self-Employed"),
];

const INSURANCE_PLAN: &[(&str, f64)] = &[("Bronze", 1.0), ("Silver", 2.0), ("Gold", 3.0)];

/// Code used when a plan is given but not recognised
const UNKNOWN_PLAN_CODE: f64 = 1.0;

pub struct Preprocessor;

impl Preprocessor {
    pub fn new() -> Self {
        Self
    }

    /// Encode one applicant into the fixed 18-column layout.
    pub fn encode(&self, applicant: &ApplicantInput) -> FeatureVector {
        let mut v = FeatureVector::zeros();

        // ── Numeric attributes ────────────────────────────────────────────────
        put(&mut v, "age",                  applicant.age as f64);
        put(&mut v, "number_of_dependants", applicant.number_of_dependants as f64);
        put(&mut v, "income_lakhs",         applicant.income_lakhs);
        put(&mut v, "genetical_risk",       applicant.genetical_risk as f64);

        // ── Insurance plan (ordinal) ──────────────────────────────────────────
        // Absent → 0, unknown → 1
        if let Some(plan) = applicant.insurance_plan.as_deref() {
            put(&mut v, "insurance_plan", encode_plan(plan));
        }

        // ── One-hot dummies ───────────────────────────────────────────────────
        one_hot(&mut v, applicant.gender.as_deref(),            GENDER);
        one_hot(&mut v, applicant.region.as_deref(),            REGION);
        one_hot(&mut v, applicant.marital_status.as_deref(),    MARITAL_STATUS);
        one_hot(&mut v, applicant.bmi_category.as_deref(),      BMI_CATEGORY);
        one_hot(&mut v, applicant.smoking_status.as_deref(),    SMOKING_STATUS);
        one_hot(&mut v, applicant.employment_status.as_deref(), EMPLOYMENT_STATUS);

        // ── Medical risk ──────────────────────────────────────────────────────
        let risk = calculate_normalized_risk(applicant.medical_history_or_default());
        put(&mut v, "normalized_risk_score", risk);

        v
    }
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self::new()
    }
}

fn encode_plan(plan: &str) -> f64 {
    INSURANCE_PLAN
        .iter()
        .find(|(name, _)| *name == plan)
        .map(|(_, code)| *code)
        .unwrap_or(UNKNOWN_PLAN_CODE)
}

fn one_hot(v: &mut FeatureVector, value: Option<&str>, table: &[(&str, &str)]) {
    let Some(value) = value else { return };
    if let Some((_, column)) = table.iter().find(|(category, _)| *category == value) {
        put(v, column, 1.0);
    }
}

// Every column named in the tables above is a member of FEATURE_COLUMNS
// (checked by test_category_tables_name_real_columns).
fn put(v: &mut FeatureVector, column: &str, value: f64) {
    if let Some(i) = index_of(column) {
        v.set_at(i, value);
    }
}
