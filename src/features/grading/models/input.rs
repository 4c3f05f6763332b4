use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::strategy::SubmissionField;

/// Result of running one test case against submitted code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TestCaseResult {
    #[serde(default)]
    pub test_case_id: Option<i32>,
    #[serde(default)]
    pub passed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

/// What a user handed in for one challenge
#[derive(Debug, Clone, Default)]
pub struct GradingInput {
    pub code: Option<String>,
    pub explanation: Option<String>,
    /// Pre-computed results from a code runner, when one is available
    pub test_results: Option<Vec<TestCaseResult>>,
}

impl GradingInput {
    /// Non-blank text of the given field
    pub fn text(&self, field: SubmissionField) -> Option<&str> {
        let value = match field {
            SubmissionField::Code => self.code.as_deref(),
            SubmissionField::Explanation => self.explanation.as_deref(),
        };
        value.filter(|v| !v.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_text_counts_as_missing() {
        let input = GradingInput {
            code: Some("   \n\t".to_string()),
            explanation: Some("It reverses the list".to_string()),
            test_results: None,
        };

        assert_eq!(input.text(SubmissionField::Code), None);
        assert_eq!(
            input.text(SubmissionField::Explanation),
            Some("It reverses the list")
        );
        assert_eq!(GradingInput::default().text(SubmissionField::Code), None);
    }

    #[test]
    fn test_case_result_defaults_to_failed() {
        let result: TestCaseResult = serde_json::from_str(r#"{"test_case_id": 3}"#).unwrap();
        assert!(!result.passed);
        assert_eq!(result.test_case_id, Some(3));
    }
}
