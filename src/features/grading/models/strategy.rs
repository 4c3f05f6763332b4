use serde::Serialize;

use crate::features::challenges::models::ChallengeCategory;

/// How a challenge category is graded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradingStrategy {
    /// Scored by the completion model against a rubric
    LlmRubric(Rubric),
    /// Scored from test-case results
    TestPassRate,
    /// Accepted with a fixed score, pending human review
    Manual,
}

impl GradingStrategy {
    pub fn for_category(category: ChallengeCategory) -> Self {
        match category {
            ChallengeCategory::Comprehension => Self::LlmRubric(Rubric::Comprehension),
            ChallengeCategory::AiReview | ChallengeCategory::Security => {
                Self::LlmRubric(Rubric::CodeReview)
            }
            ChallengeCategory::Debugging => Self::TestPassRate,
            ChallengeCategory::Design => Self::Manual,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::LlmRubric(Rubric::Comprehension) => "llm_comprehension",
            Self::LlmRubric(Rubric::CodeReview) => "llm_code_review",
            Self::TestPassRate => "test_pass_rate",
            Self::Manual => "manual",
        }
    }
}

/// Submission text fields a strategy may require
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionField {
    Code,
    Explanation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rubric {
    Comprehension,
    CodeReview,
}

/// One scored aspect of a rubric
#[derive(Debug, Clone, Serialize)]
pub struct RubricDimension {
    /// Key expected in the reply's `breakdown`
    pub name: &'static str,
    pub label: &'static str,
    pub max: u32,
    pub question: &'static str,
    /// Value shown in the prompt's sample reply
    #[serde(skip)]
    pub example: u32,
}

const COMPREHENSION_DIMENSIONS: &[RubricDimension] = &[
    RubricDimension {
        name: "accuracy",
        label: "Accuracy",
        max: 40,
        question: "Is the explanation technically correct?",
        example: 38,
    },
    RubricDimension {
        name: "completeness",
        label: "Completeness",
        max: 30,
        question: "Did they cover all important aspects?",
        example: 25,
    },
    RubricDimension {
        name: "clarity",
        label: "Clarity",
        max: 20,
        question: "Is it well-written and easy to understand?",
        example: 15,
    },
    RubricDimension {
        name: "depth",
        label: "Depth",
        max: 10,
        question: "Did they show deep understanding?",
        example: 7,
    },
];

const CODE_REVIEW_DIMENSIONS: &[RubricDimension] = &[
    RubricDimension {
        name: "issue_identification",
        label: "Issue Identification",
        max: 40,
        question: "Did they find the critical problems?",
        example: 38,
    },
    RubricDimension {
        name: "impact_assessment",
        label: "Impact Assessment",
        max: 25,
        question: "Do they understand the severity?",
        example: 22,
    },
    RubricDimension {
        name: "solution_quality",
        label: "Solution Quality",
        max: 25,
        question: "Are their fixes appropriate?",
        example: 20,
    },
    RubricDimension {
        name: "best_practices",
        label: "Best Practices",
        max: 10,
        question: "Do they demonstrate good security/coding knowledge?",
        example: 5,
    },
];

impl Rubric {
    pub fn template_name(&self) -> &'static str {
        match self {
            Self::Comprehension => "grading/comprehension.jinja",
            Self::CodeReview => "grading/code_review.jinja",
        }
    }

    pub fn required_field(&self) -> SubmissionField {
        SubmissionField::Explanation
    }

    pub fn missing_message(&self) -> &'static str {
        match self {
            Self::Comprehension => "explanation required",
            Self::CodeReview => "review required",
        }
    }

    pub fn dimensions(&self) -> &'static [RubricDimension] {
        match self {
            Self::Comprehension => COMPREHENSION_DIMENSIONS,
            Self::CodeReview => CODE_REVIEW_DIMENSIONS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_dispatch() {
        use ChallengeCategory::*;

        assert_eq!(
            GradingStrategy::for_category(Comprehension),
            GradingStrategy::LlmRubric(Rubric::Comprehension)
        );
        assert_eq!(
            GradingStrategy::for_category(AiReview),
            GradingStrategy::LlmRubric(Rubric::CodeReview)
        );
        assert_eq!(
            GradingStrategy::for_category(Security),
            GradingStrategy::LlmRubric(Rubric::CodeReview)
        );
        assert_eq!(
            GradingStrategy::for_category(Debugging),
            GradingStrategy::TestPassRate
        );
        assert_eq!(GradingStrategy::for_category(Design), GradingStrategy::Manual);
    }

    #[test]
    fn test_rubric_maxima_sum_to_100() {
        for rubric in [Rubric::Comprehension, Rubric::CodeReview] {
            let max: u32 = rubric.dimensions().iter().map(|d| d.max).sum();
            assert_eq!(max, 100, "{:?}", rubric);

            for d in rubric.dimensions() {
                assert!(d.example <= d.max, "{} example exceeds max", d.name);
            }
        }
    }

    #[test]
    fn test_rubric_dimension_names() {
        let names: Vec<_> = Rubric::CodeReview
            .dimensions()
            .iter()
            .map(|d| d.name)
            .collect();
        assert_eq!(
            names,
            [
                "issue_identification",
                "impact_assessment",
                "solution_quality",
                "best_practices"
            ]
        );
    }
}
