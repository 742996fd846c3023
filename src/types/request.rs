//! Prediction request payload.
//!
//! Field names mirror the columns the model was trained on. Several
//! canonical names contain characters that are awkward in some transports
//! (`/`, `#`, spaces), so a transport-safe alias is accepted alongside
//! each canonical spelling. Canonical names remain the single source of
//! truth for feature ordering.

use serde::{Deserialize, Serialize};

use crate::error::{PredictError, PredictResult};

/// One row of model input: all 23 features, every one required.
///
/// Unknown extra fields in the payload are ignored. Missing fields and
/// wrong-typed values are rejected at deserialization with a message
/// naming the field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionRequest {
    /// Employment status flag (0 or 1)
    #[serde(rename = "Employment")]
    pub employment: i64,

    /// Previous salary
    #[serde(rename = "PreviousSalary")]
    pub previous_salary: f64,

    /// Years of coding experience
    #[serde(rename = "YearsCode")]
    pub years_code: f64,

    /// Computer skills rating
    #[serde(rename = "ComputerSkills")]
    pub computer_skills: f64,

    /// AWS skill flag (0 or 1)
    #[serde(rename = "Lang_AWS")]
    pub lang_aws: i64,

    /// Bash/Shell skill flag (0 or 1)
    #[serde(rename = "Lang_Bash/Shell", alias = "Lang_Bash_Shell")]
    pub lang_bash_shell: i64,

    /// C# skill flag (0 or 1)
    #[serde(rename = "Lang_C#", alias = "Lang_CSharp")]
    pub lang_csharp: i64,

    /// Docker skill flag (0 or 1)
    #[serde(rename = "Lang_Docker")]
    pub lang_docker: i64,

    /// Git skill flag (0 or 1)
    #[serde(rename = "Lang_Git")]
    pub lang_git: i64,

    /// HTML/CSS skill flag (0 or 1)
    #[serde(rename = "Lang_HTML/CSS", alias = "Lang_HTML_CSS")]
    pub lang_html_css: i64,

    /// Java skill flag (0 or 1)
    #[serde(rename = "Lang_Java")]
    pub lang_java: i64,

    /// JavaScript skill flag (0 or 1)
    #[serde(rename = "Lang_JavaScript")]
    pub lang_javascript: i64,

    /// Microsoft SQL Server skill flag (0 or 1)
    #[serde(
        rename = "Lang_Microsoft SQL Server",
        alias = "Lang_Microsoft_SQL_Server"
    )]
    pub lang_microsoft_sql_server: i64,

    /// MySQL skill flag (0 or 1)
    #[serde(rename = "Lang_MySQL")]
    pub lang_mysql: i64,

    /// Node.js skill flag (0 or 1)
    #[serde(rename = "Lang_Node.js", alias = "Lang_Node_js")]
    pub lang_node_js: i64,

    /// Other languages flag (0 or 1)
    #[serde(rename = "Lang_Other")]
    pub lang_other: i64,

    /// PostgreSQL skill flag (0 or 1)
    #[serde(rename = "Lang_PostgreSQL")]
    pub lang_postgresql: i64,

    /// Python skill flag (0 or 1)
    #[serde(rename = "Lang_Python")]
    pub lang_python: i64,

    /// React.js skill flag (0 or 1)
    #[serde(rename = "Lang_React.js", alias = "Lang_React_js")]
    pub lang_react_js: i64,

    /// SQL skill flag (0 or 1)
    #[serde(rename = "Lang_SQL")]
    pub lang_sql: i64,

    /// TypeScript skill flag (0 or 1)
    #[serde(rename = "Lang_TypeScript")]
    pub lang_typescript: i64,

    /// Age greater than 35 flag (0 or 1)
    #[serde(rename = "Age (>35)", alias = "Age_gt35")]
    pub age_over_35: i64,

    /// Education level code (non-negative integer)
    #[serde(rename = "edlevel_encoded")]
    pub edlevel_encoded: i64,
}

impl PredictionRequest {
    /// Deserialize a request from a raw JSON value.
    ///
    /// serde's error message names the missing or wrong-typed field, which
    /// is exactly what we want to surface to the caller.
    pub fn from_json(value: serde_json::Value) -> PredictResult<Self> {
        serde_json::from_value(value).map_err(|e| PredictError::Validation(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_payload() -> serde_json::Value {
        json!({
            "Employment": 1,
            "PreviousSalary": 50000.0,
            "YearsCode": 7,
            "ComputerSkills": 4,
            "Lang_AWS": 0,
            "Lang_Bash/Shell": 1,
            "Lang_C#": 0,
            "Lang_Docker": 0,
            "Lang_Git": 1,
            "Lang_HTML/CSS": 0,
            "Lang_Java": 0,
            "Lang_JavaScript": 0,
            "Lang_Microsoft SQL Server": 0,
            "Lang_MySQL": 0,
            "Lang_Node.js": 1,
            "Lang_Other": 1,
            "Lang_PostgreSQL": 1,
            "Lang_Python": 1,
            "Lang_React.js": 0,
            "Lang_SQL": 0,
            "Lang_TypeScript": 0,
            "Age (>35)": 0,
            "edlevel_encoded": 3
        })
    }

    #[test]
    fn test_full_payload_deserializes() {
        let req = PredictionRequest::from_json(full_payload()).unwrap();
        assert_eq!(req.employment, 1);
        assert_eq!(req.previous_salary, 50000.0);
        assert_eq!(req.lang_bash_shell, 1);
        assert_eq!(req.age_over_35, 0);
        assert_eq!(req.edlevel_encoded, 3);
    }

    #[test]
    fn test_safe_aliases_accepted() {
        let mut payload = full_payload();
        let obj = payload.as_object_mut().unwrap();
        let v = obj.remove("Lang_Bash/Shell").unwrap();
        obj.insert("Lang_Bash_Shell".to_string(), v);
        let v = obj.remove("Lang_C#").unwrap();
        obj.insert("Lang_CSharp".to_string(), v);
        let v = obj.remove("Age (>35)").unwrap();
        obj.insert("Age_gt35".to_string(), v);

        let req = PredictionRequest::from_json(payload).unwrap();
        assert_eq!(req.lang_bash_shell, 1);
        assert_eq!(req.lang_csharp, 0);
        assert_eq!(req.age_over_35, 0);
    }

    #[test]
    fn test_missing_field_names_field() {
        let mut payload = full_payload();
        payload.as_object_mut().unwrap().remove("Lang_Python");

        let err = PredictionRequest::from_json(payload).unwrap_err();
        assert!(err.to_string().contains("Lang_Python"));
    }

    #[test]
    fn test_wrong_type_rejected() {
        let mut payload = full_payload();
        payload
            .as_object_mut()
            .unwrap()
            .insert("YearsCode".to_string(), serde_json::json!("seven"));

        assert!(PredictionRequest::from_json(payload).is_err());
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let mut payload = full_payload();
        payload
            .as_object_mut()
            .unwrap()
            .insert("Lang_COBOL".to_string(), serde_json::json!(1));

        assert!(PredictionRequest::from_json(payload).is_ok());
    }
}
