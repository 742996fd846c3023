//! Feature schema validation for the employment prediction model.
//!
//! The model was fitted on a fixed, ordered set of 23 columns. The scaler
//! and the network both index features positionally, so the order below is
//! part of the model contract: reordering it silently corrupts predictions
//! without any error being raised. It must only change together with the
//! artifacts.

use crate::error::{PredictError, PredictResult};
use crate::types::PredictionRequest;

/// Number of features the model consumes.
pub const FEATURE_COUNT: usize = 23;

/// Canonical feature names in training order.
pub const FEATURE_ORDER: [&str; FEATURE_COUNT] = [
    "Employment",
    "PreviousSalary",
    "YearsCode",
    "ComputerSkills",
    "Lang_AWS",
    "Lang_Bash/Shell",
    "Lang_C#",
    "Lang_Docker",
    "Lang_Git",
    "Lang_HTML/CSS",
    "Lang_Java",
    "Lang_JavaScript",
    "Lang_Microsoft SQL Server",
    "Lang_MySQL",
    "Lang_Node.js",
    "Lang_Other",
    "Lang_PostgreSQL",
    "Lang_Python",
    "Lang_React.js",
    "Lang_SQL",
    "Lang_TypeScript",
    "Age (>35)",
    "edlevel_encoded",
];

/// A validated, ordered model input vector.
///
/// Constructed per request via [`SchemaValidator::validate`] and discarded
/// after inference.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector([f32; FEATURE_COUNT]);

impl FeatureVector {
    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        FEATURE_COUNT
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Validates requests against the fixed schema and projects them into
/// training order.
pub struct SchemaValidator;

impl SchemaValidator {
    pub fn new() -> Self {
        Self
    }

    /// Validate a request and assemble the ordered feature vector.
    ///
    /// Flag fields must be exactly 0 or 1; numeric fields must be finite
    /// and non-negative. Fails on the first offending field and produces
    /// no partial vector. Pure function, no side effects.
    pub fn validate(&self, request: &PredictionRequest) -> PredictResult<FeatureVector> {
        let flags = [
            ("Employment", request.employment),
            ("Lang_AWS", request.lang_aws),
            ("Lang_Bash/Shell", request.lang_bash_shell),
            ("Lang_C#", request.lang_csharp),
            ("Lang_Docker", request.lang_docker),
            ("Lang_Git", request.lang_git),
            ("Lang_HTML/CSS", request.lang_html_css),
            ("Lang_Java", request.lang_java),
            ("Lang_JavaScript", request.lang_javascript),
            ("Lang_Microsoft SQL Server", request.lang_microsoft_sql_server),
            ("Lang_MySQL", request.lang_mysql),
            ("Lang_Node.js", request.lang_node_js),
            ("Lang_Other", request.lang_other),
            ("Lang_PostgreSQL", request.lang_postgresql),
            ("Lang_Python", request.lang_python),
            ("Lang_React.js", request.lang_react_js),
            ("Lang_SQL", request.lang_sql),
            ("Lang_TypeScript", request.lang_typescript),
            ("Age (>35)", request.age_over_35),
        ];
        for (name, value) in flags {
            if value != 0 && value != 1 {
                return Err(PredictError::invalid_field(
                    name,
                    format!("must be 0 or 1 (got {})", value),
                ));
            }
        }

        let numerics = [
            ("PreviousSalary", request.previous_salary),
            ("YearsCode", request.years_code),
            ("ComputerSkills", request.computer_skills),
        ];
        for (name, value) in numerics {
            if !value.is_finite() {
                return Err(PredictError::invalid_field(name, "must be a finite number"));
            }
            if value < 0.0 {
                return Err(PredictError::invalid_field(
                    name,
                    format!("must be non-negative (got {})", value),
                ));
            }
        }

        if request.edlevel_encoded < 0 {
            return Err(PredictError::invalid_field(
                "edlevel_encoded",
                format!("must be non-negative (got {})", request.edlevel_encoded),
            ));
        }

        // Training order. Must stay in sync with FEATURE_ORDER.
        Ok(FeatureVector([
            request.employment as f32,
            request.previous_salary as f32,
            request.years_code as f32,
            request.computer_skills as f32,
            request.lang_aws as f32,
            request.lang_bash_shell as f32,
            request.lang_csharp as f32,
            request.lang_docker as f32,
            request.lang_git as f32,
            request.lang_html_css as f32,
            request.lang_java as f32,
            request.lang_javascript as f32,
            request.lang_microsoft_sql_server as f32,
            request.lang_mysql as f32,
            request.lang_node_js as f32,
            request.lang_other as f32,
            request.lang_postgresql as f32,
            request.lang_python as f32,
            request.lang_react_js as f32,
            request.lang_sql as f32,
            request.lang_typescript as f32,
            request.age_over_35 as f32,
            request.edlevel_encoded as f32,
        ]))
    }

    /// Number of features produced.
    pub fn feature_count(&self) -> usize {
        FEATURE_COUNT
    }

    /// Canonical feature names in training order.
    pub fn feature_names(&self) -> &'static [&'static str] {
        &FEATURE_ORDER
    }
}

impl Default for SchemaValidator {
    fn default() -> Self {
        Self::new()
    }
}
