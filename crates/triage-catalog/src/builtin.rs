use std::sync::LazyLock;

use triage_core::models::model_spec::ModelSpec;

/// Default models served when no catalog file is configured.
///
/// - `cardiovascular_risk`: 11 inputs, blood pressure in mmHg, cholesterol
///   and glucose as 1–3 categorical levels, lifestyle flags 0/1.
/// - `diabetes_risk`: 8 inputs, Pima-style clinical measurements.
/// - `stroke_risk`: 10 inputs, demographics plus comorbidities.
pub fn builtin_models() -> &'static [ModelSpec] {
    static MODELS: LazyLock<Vec<ModelSpec>> = LazyLock::new(|| {
        let spec = |name: &str, tool: &str, description: &str, parameters: &[&str]| ModelSpec {
            name: name.to_string(),
            required_parameters: parameters.iter().map(|p| p.to_string()).collect(),
            backend_tool: tool.to_string(),
            description: Some(description.to_string()),
        };

        vec![
            spec(
                "cardiovascular_risk",
                "cardiovascular_predictor",
                "Presence of cardiovascular disease",
                &[
                    "age",
                    "gender",
                    "height",
                    "weight",
                    "ap_hi",
                    "ap_lo",
                    "cholesterol",
                    "gluc",
                    "smoke",
                    "alco",
                    "active",
                ],
            ),
            spec(
                "diabetes_risk",
                "diabetes_predictor",
                "Onset of type 2 diabetes",
                &[
                    "pregnancies",
                    "glucose",
                    "blood_pressure",
                    "skin_thickness",
                    "insulin",
                    "bmi",
                    "diabetes_pedigree_function",
                    "age",
                ],
            ),
            spec(
                "stroke_risk",
                "stroke_predictor",
                "Likelihood of stroke",
                &[
                    "gender",
                    "age",
                    "hypertension",
                    "heart_disease",
                    "ever_married",
                    "work_type",
                    "residence_type",
                    "avg_glucose_level",
                    "bmi",
                    "smoking_status",
                ],
            ),
        ]
    });
    &MODELS
}
