// ============================================================
// Layer 3 — Feature Vector
// ============================================================
// The fixed-order numeric encoding consumed by both models.
// Column names match the ones the models were fitted with,
// including the one-hot dummies (baseline categories have
// no column of their own).

use anyhow::{bail, Result};
use serde::Serialize;

/// Number of columns in every feature vector.
pub const FEATURE_COUNT: usize = 18;

/// Column order shared by the encoder, the scalers and the models.
pub const FEATURE_COLUMNS: [&str; FEATURE_COUNT] = [
    "age",
    "number_of_dependants",
    "income_lakhs",
    "insurance_plan",
    "genetical_risk",
    "normalized_risk_score",
    "gender_Male",
    "region_Northwest",
    "region_Southeast",
    "region_Southwest",
    "marital_status_Unmarried",
    "bmi_category_Obesity",
    "bmi_category_Overweight",
    "bmi_category_Underweight",
    "smoking_status_Occasional",
    "smoking_status_Regular",
    "employment_status_Salaried",
    "employment_status_Self-Employed",
];

/// Position of a column by name, or None for unknown names.
pub fn index_of(name: &str) -> Option<usize> {
    FEATURE_COLUMNS.iter().position(|c| *c == name)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureVector {
    values: [f64; FEATURE_COUNT],
}

impl FeatureVector {
    /// All-zero vector: every numeric field 0, every category at baseline.
    pub fn zeros() -> Self {
        Self { values: [0.0; FEATURE_COUNT] }
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        index_of(name).map(|i| self.values[i])
    }

    /// Overwrite one column. Unknown column names are an error.
    pub fn set(&mut self, name: &str, value: f64) -> Result<()> {
        match index_of(name) {
            Some(i) => {
                self.values[i] = value;
                Ok(())
            }
            None => bail!("Unknown feature column '{name}'"),
        }
    }

    pub fn at(&self, index: usize) -> f64 {
        self.values[index]
    }

    pub fn set_at(&mut self, index: usize, value: f64) {
        self.values[index] = value;
    }

    pub fn values(&self) -> &[f64; FEATURE_COUNT] {
        &self.values
    }

    /// (column name, value) pairs in column order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        FEATURE_COLUMNS.iter().copied().zip(self.values.iter().copied())
    }
}

impl Default for FeatureVector {
    fn default() -> Self {
        Self::zeros()
    }
}
