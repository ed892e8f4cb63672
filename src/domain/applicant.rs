// ============================================================
// Layer 3 — ApplicantInput Domain Type
// ============================================================
// The flat set of attributes collected for one applicant.
// Field names on the wire are the human-facing labels
// ("Age", "BMI Category", ...) so a form or a JSON file can
// be deserialised directly.
//
// Only `Age` is mandatory: it decides which model is used.
// Every other attribute has a neutral default (zero, or the
// baseline category) when it is absent. Keys that are not
// listed here are ignored.

use serde::{Deserialize, Deserializer, Serialize};

/// Raw applicant attributes before encoding.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApplicantInput {
    #[serde(rename = "Age")]
    pub age: u32,

    #[serde(rename = "Number of Dependants", default)]
    pub number_of_dependants: u32,

    #[serde(rename = "Income in Lakhs", default)]
    pub income_lakhs: f64,

    /// Inherited risk level reported by the applicant (0-5 in practice)
    #[serde(rename = "Genetical Risk", default)]
    pub genetical_risk: u32,

    /// Absent → None. A present key, even `null`, is Some and
    /// encodes as the unknown-plan code when it names no plan.
    #[serde(
        rename = "Insurance Plan",
        default,
        deserialize_with = "present_plan",
        skip_serializing_if = "Option::is_none"
    )]
    pub insurance_plan: Option<String>,

    #[serde(rename = "Gender", default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,

    #[serde(rename = "Region", default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    #[serde(rename = "Marital Status", default, skip_serializing_if = "Option::is_none")]
    pub marital_status: Option<String>,

    #[serde(rename = "BMI Category", default, skip_serializing_if = "Option::is_none")]
    pub bmi_category: Option<String>,

    #[serde(rename = "Smoking Status", default, skip_serializing_if = "Option::is_none")]
    pub smoking_status: Option<String>,

    #[serde(rename = "Employment Status", default, skip_serializing_if = "Option::is_none")]
    pub employment_status: Option<String>,

    /// Conditions joined with " & ", e.g. "Diabetes & Thyroid"
    #[serde(rename = "Medical History", default, skip_serializing_if = "Option::is_none")]
    pub medical_history: Option<String>,
}

impl ApplicantInput {
    /// Create an applicant with only the mandatory age set.
    pub fn with_age(age: u32) -> Self {
        Self { age, ..Self::default() }
    }

    /// Medical history text, falling back to "no disease" when absent.
    pub fn medical_history_or_default(&self) -> &str {
        self.medical_history.as_deref().unwrap_or("no disease")
    }
}

// Only called when the key is present; `null` becomes an empty plan name.
fn present_plan<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Some(Option::<String>::deserialize(deserializer)?.unwrap_or_default()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_form_labels() {
        let json = r#"{
            "Age": 30,
            "Number of Dependants": 2,
            "Income in Lakhs": 12.5,
            "Genetical Risk": 3,
            "Insurance Plan": "Gold",
            "Gender": "Male",
            "Region": "Southeast",
            "Marital Status": "Married",
            "BMI Category": "Overweight",
            "Smoking Status": "Regular",
            "Employment Status": "Salaried",
            "Medical History": "Diabetes & Thyroid",
            "Income Level": "10L - 25L"
        }"#;
        let a: ApplicantInput = serde_json::from_str(json).unwrap();
        assert_eq!(a.age, 30);
        assert_eq!(a.number_of_dependants, 2);
        assert_eq!(a.income_lakhs, 12.5);
        assert_eq!(a.insurance_plan.as_deref(), Some("Gold"));
        assert_eq!(a.medical_history_or_default(), "Diabetes & Thyroid");
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let a: ApplicantInput = serde_json::from_str(r#"{"Age": 22}"#).unwrap();
        assert_eq!(a, ApplicantInput::with_age(22));
        assert_eq!(a.medical_history_or_default(), "no disease");
    }

    #[test]
    fn test_null_plan_counts_as_present() {
        let a: ApplicantInput =
            serde_json::from_str(r#"{"Age": 40, "Insurance Plan": null}"#).unwrap();
        assert_eq!(a.insurance_plan.as_deref(), Some(""));
    }

    #[test]
    fn test_age_is_required() {
        let r: Result<ApplicantInput, _> = serde_json::from_str(r#"{"Gender": "Male"}"#);
        assert!(r.is_err());
    }
}
