use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use uuid::Uuid;

use super::prompt_builder::build_prompt;
use super::reply::{ReplyError, RubricReply};
use super::test_grader::grade_by_tests;
use crate::core::config::GradingConfig;
use crate::features::challenges::models::Challenge;
use crate::features::grading::error::GradingError;
use crate::features::grading::models::{
    GradingInput, GradingOutcome, GradingStrategy, Rubric, SubmissionField,
};
use crate::modules::completion::{CompletionClient, CompletionError};
use crate::shared::llm::{extract_json_object, ParseError};
use crate::shared::prompts::{PromptRenderer, TemplateError};

/// Replies longer than this are truncated in debug logs
const MAX_LOGGED_REPLY_CHARS: usize = 500;

/// Tunables for LLM-backed grading
#[derive(Debug, Clone)]
pub struct GradingSettings {
    pub max_output_tokens: u32,
    pub temperature: f32,
    pub timeout: Duration,
    /// Minimum score (inclusive) for a submission to count as correct
    pub pass_threshold: u32,
}

impl From<&GradingConfig> for GradingSettings {
    fn from(config: &GradingConfig) -> Self {
        Self {
            max_output_tokens: config.max_output_tokens,
            temperature: config.temperature,
            timeout: config.timeout,
            pass_threshold: config.pass_threshold,
        }
    }
}

/// Reasons an LLM grading attempt degraded to the fallback outcome
#[derive(Debug, Error)]
enum RubricFailure {
    #[error("prompt template failed: {0}")]
    Template(#[from] TemplateError),

    #[error("completion call failed: {0}")]
    Completion(#[from] CompletionError),

    #[error("completion call exceeded {0:?}")]
    TimedOut(Duration),

    #[error("unparsable reply: {0}")]
    Parse(#[from] ParseError),

    #[error("malformed reply: {0}")]
    Reply(#[from] ReplyError),
}

impl RubricFailure {
    /// Failures caused by our own code or deployment rather than the completion API
    fn is_internal(&self) -> bool {
        matches!(self, Self::Template(_))
    }
}

/// Grades submissions; one instance is shared by all requests.
pub struct GradingService {
    client: Arc<dyn CompletionClient>,
    settings: GradingSettings,
    prompts: PromptRenderer,
}

impl GradingService {
    pub fn new(
        client: Arc<dyn CompletionClient>,
        settings: GradingSettings,
        prompts: PromptRenderer,
    ) -> Self {
        Self {
            client,
            settings,
            prompts,
        }
    }

    /// Grade a submission for the given challenge.
    ///
    /// Only a missing required field is an error. Any failure of the completion
    /// call or its reply yields [`GradingOutcome::fallback`].
    pub async fn grade(
        &self,
        challenge: &Challenge,
        input: &GradingInput,
    ) -> Result<GradingOutcome, GradingError> {
        let strategy = GradingStrategy::for_category(challenge.category);

        tracing::info!(
            challenge_id = %challenge.id,
            category = %challenge.category,
            strategy = strategy.name(),
            "Grading submission"
        );

        match strategy {
            GradingStrategy::LlmRubric(rubric) => {
                let text = input
                    .text(rubric.required_field())
                    .ok_or(GradingError::MissingField(rubric.missing_message()))?;
                Ok(self.grade_with_rubric(challenge, rubric, text).await)
            }
            GradingStrategy::TestPassRate => {
                input
                    .text(SubmissionField::Code)
                    .ok_or(GradingError::MissingField("code required"))?;

                Ok(match input.test_results.as_deref() {
                    Some(results) if !results.is_empty() => grade_by_tests(results),
                    _ => GradingOutcome::tests_pending(),
                })
            }
            GradingStrategy::Manual => Ok(GradingOutcome::manual_review()),
        }
    }

    async fn grade_with_rubric(
        &self,
        challenge: &Challenge,
        rubric: Rubric,
        submission: &str,
    ) -> GradingOutcome {
        match self.try_grade_with_rubric(challenge, rubric, submission).await {
            Ok(outcome) => outcome,
            Err(failure) => {
                log_failure(challenge.id, &failure);
                GradingOutcome::fallback()
            }
        }
    }

    async fn try_grade_with_rubric(
        &self,
        challenge: &Challenge,
        rubric: Rubric,
        submission: &str,
    ) -> Result<GradingOutcome, RubricFailure> {
        let prompt = build_prompt(&self.prompts, rubric, challenge, submission)?;

        let call = self.client.complete(
            &prompt,
            self.settings.max_output_tokens,
            self.settings.temperature,
        );
        let reply = tokio::time::timeout(self.settings.timeout, call)
            .await
            .map_err(|_| RubricFailure::TimedOut(self.settings.timeout))??;

        tracing::debug!(
            challenge_id = %challenge.id,
            "Grading reply: {}",
            reply.chars().take(MAX_LOGGED_REPLY_CHARS).collect::<String>()
        );

        let parsed = RubricReply::from_object(extract_json_object(&reply)?)?;

        Ok(GradingOutcome::from_reply(
            parsed.score,
            self.settings.pass_threshold,
            parsed.feedback,
            parsed.breakdown,
        ))
    }
}

fn log_failure(challenge_id: Uuid, failure: &RubricFailure) {
    if failure.is_internal() {
        tracing::error!(
            challenge_id = %challenge_id,
            "Grading failed internally, using fallback outcome: {}",
            failure
        );
    } else {
        tracing::warn!(
            challenge_id = %challenge_id,
            "Grading dependency failed, using fallback outcome: {}",
            failure
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::challenges::models::ChallengeCategory;
    use crate::features::grading::models::TestCaseResult;
    use crate::shared::test_helpers::{sample_challenge, FakeCompletionClient};
    use rust_decimal::Decimal;
    use serde_json::json;
    use tokio_test::{assert_err, assert_ok};

    fn settings() -> GradingSettings {
        GradingSettings {
            max_output_tokens: 1000,
            temperature: 0.3,
            timeout: Duration::from_secs(5),
            pass_threshold: 70,
        }
    }

    fn service_with(client: Arc<FakeCompletionClient>, settings: GradingSettings) -> GradingService {
        GradingService::new(client, settings, PromptRenderer::builtin())
    }

    fn explanation(text: &str) -> GradingInput {
        GradingInput {
            explanation: Some(text.to_string()),
            ..Default::default()
        }
    }

    fn assert_fallback(outcome: &GradingOutcome) {
        assert_eq!(outcome, &GradingOutcome::fallback());
        assert_eq!(outcome.score, Decimal::from(50));
        assert!(!outcome.is_correct);
    }

    #[tokio::test]
    async fn test_comprehension_reply_wrapped_in_prose() {
        let client = Arc::new(FakeCompletionClient::replying(
            "Sure! {\"score\": 82, \"feedback\": \"Good job\", \"breakdown\": {\"accuracy\":35,\"completeness\":25,\"clarity\":15,\"depth\":7}}",
        ));
        let service = service_with(client.clone(), settings());
        let challenge = sample_challenge(ChallengeCategory::Comprehension);

        let outcome = assert_ok!(
            service
                .grade(&challenge, &explanation("It sums the list recursively."))
                .await
        );

        assert_eq!(outcome.score, Decimal::from(82));
        assert_eq!(outcome.max_score, Decimal::from(100));
        assert!(outcome.is_correct);
        assert_eq!(outcome.feedback, "Good job");
        assert_eq!(
            outcome.breakdown_value(),
            json!({"accuracy": 35, "completeness": 25, "clarity": 15, "depth": 7})
        );
        assert_eq!(client.call_count(), 1);

        let prompt = client.last_prompt().unwrap();
        assert!(prompt.contains("It sums the list recursively."));
        assert!(prompt.contains(&challenge.title));
    }

    #[tokio::test]
    async fn test_missing_required_text_makes_no_call() {
        let client = Arc::new(FakeCompletionClient::replying("{\"score\": 90, \"feedback\": \"x\"}"));
        let service = service_with(client.clone(), settings());

        let cases = [
            (ChallengeCategory::Comprehension, "explanation required"),
            (ChallengeCategory::AiReview, "review required"),
            (ChallengeCategory::Security, "review required"),
        ];

        for (category, message) in cases {
            let challenge = sample_challenge(category);
            for input in [
                GradingInput::default(),
                explanation(""),
                explanation("   \n"),
                GradingInput {
                    code: Some("print(1)".to_string()),
                    ..Default::default()
                },
            ] {
                let err = assert_err!(service.grade(&challenge, &input).await);
                assert_eq!(err, GradingError::MissingField(message));
            }
        }

        assert_eq!(client.call_count(), 0);
    }

    #[tokio::test]
    async fn test_debugging_placeholder() {
        let client = Arc::new(FakeCompletionClient::replying("unused"));
        let service = service_with(client.clone(), settings());
        let challenge = sample_challenge(ChallengeCategory::Debugging);

        let input = GradingInput {
            code: Some("print(1)".to_string()),
            ..Default::default()
        };
        let outcome = assert_ok!(service.grade(&challenge, &input).await);

        assert_eq!(outcome.score, Decimal::from(75));
        assert_eq!(outcome.max_score, Decimal::from(100));
        assert!(outcome.is_correct);
        assert!(outcome.feedback.contains("Automated testing"));
        assert_eq!(client.call_count(), 0);
    }

    #[tokio::test]
    async fn test_debugging_requires_code() {
        let client = Arc::new(FakeCompletionClient::replying("unused"));
        let service = service_with(client, settings());
        let challenge = sample_challenge(ChallengeCategory::Debugging);

        let err = assert_err!(
            service
                .grade(&challenge, &explanation("I fixed the loop bound"))
                .await
        );
        assert_eq!(err, GradingError::MissingField("code required"));
    }

    #[tokio::test]
    async fn test_debugging_uses_supplied_test_results() {
        let client = Arc::new(FakeCompletionClient::replying("unused"));
        let service = service_with(client, settings());
        let challenge = sample_challenge(ChallengeCategory::Debugging);

        let input = GradingInput {
            code: Some("def fix(): return 1".to_string()),
            explanation: None,
            test_results: Some(
                [true, true, false]
                    .into_iter()
                    .map(|passed| TestCaseResult {
                        test_case_id: None,
                        passed,
                        error_message: None,
                    })
                    .collect(),
            ),
        };

        let outcome = assert_ok!(service.grade(&challenge, &input).await);
        assert!(!outcome.is_correct);
        assert_eq!(outcome.breakdown_value(), json!({"passed": 2, "total": 3}));
    }

    #[tokio::test]
    async fn test_design_is_manual() {
        let client = Arc::new(FakeCompletionClient::replying("unused"));
        let service = service_with(client.clone(), settings());
        let challenge = sample_challenge(ChallengeCategory::Design);

        for input in [GradingInput::default(), explanation("A queue in front of the DB")] {
            let outcome = assert_ok!(service.grade(&challenge, &input).await);
            assert_eq!(outcome.score, Decimal::from(50));
            assert_eq!(outcome.max_score, Decimal::from(100));
            assert!(!outcome.is_correct);
            assert!(outcome.feedback.contains("Manual grading required"));
        }
        assert_eq!(client.call_count(), 0);
    }

    #[tokio::test]
    async fn test_completion_failures_fall_back() {
        let challenge = sample_challenge(ChallengeCategory::AiReview);
        let input = explanation("Off-by-one in the loop bound.");

        let clients = [
            FakeCompletionClient::failing_transport(),
            FakeCompletionClient::failing_status(503),
            FakeCompletionClient::replying("I'd rate this submission highly."),
            FakeCompletionClient::replying("{\"score\": 90, \"feedback\": }"),
            FakeCompletionClient::replying("{\"feedback\": \"no score given\"}"),
            FakeCompletionClient::replying("{\"score\": \"ninety\", \"feedback\": \"x\"}"),
            FakeCompletionClient::replying("{\"score\": 90}"),
        ];

        for client in clients {
            let client = Arc::new(client);
            let service = service_with(client.clone(), settings());

            let outcome = assert_ok!(service.grade(&challenge, &input).await);
            assert_fallback(&outcome);
            assert_eq!(client.call_count(), 1);
        }
    }

    #[tokio::test]
    async fn test_timeout_falls_back() {
        let client = Arc::new(
            FakeCompletionClient::replying("{\"score\": 95, \"feedback\": \"late\"}")
                .with_delay(Duration::from_secs(10)),
        );
        let service = service_with(
            client.clone(),
            GradingSettings {
                timeout: Duration::from_millis(50),
                ..settings()
            },
        );
        let challenge = sample_challenge(ChallengeCategory::Comprehension);

        let outcome = assert_ok!(service.grade(&challenge, &explanation("text")).await);
        assert_fallback(&outcome);
        assert_eq!(client.call_count(), 1);
    }

    #[tokio::test]
    async fn test_score_clamped_and_threshold_applied() {
        let challenge = sample_challenge(ChallengeCategory::Security);
        let input = explanation("Hardcoded credentials on line 3.");

        let high = Arc::new(FakeCompletionClient::replying(
            "{\"score\": 130, \"feedback\": \"Excellent\"}",
        ));
        let outcome = assert_ok!(service_with(high, settings()).grade(&challenge, &input).await);
        assert_eq!(outcome.score, Decimal::from(100));
        assert!(outcome.is_correct);
        assert!(outcome.breakdown.is_empty());

        let low = Arc::new(FakeCompletionClient::replying(
            "{\"score\": -20, \"feedback\": \"Missed everything\"}",
        ));
        let outcome = assert_ok!(service_with(low, settings()).grade(&challenge, &input).await);
        assert_eq!(outcome.score, Decimal::ZERO);
        assert!(!outcome.is_correct);

        for (score, expected) in [(69, false), (70, true)] {
            let client = Arc::new(FakeCompletionClient::replying(&format!(
                "{{\"score\": {}, \"feedback\": \"ok\"}}",
                score
            )));
            let outcome =
                assert_ok!(service_with(client, settings()).grade(&challenge, &input).await);
            assert_eq!(outcome.is_correct, expected, "score {}", score);
        }

        let strict = Arc::new(FakeCompletionClient::replying(
            "{\"score\": 80, \"feedback\": \"ok\"}",
        ));
        let outcome = assert_ok!(
            service_with(
                strict,
                GradingSettings {
                    pass_threshold: 85,
                    ..settings()
                }
            )
            .grade(&challenge, &input)
            .await
        );
        assert!(!outcome.is_correct);
    }

    #[test]
    fn test_only_template_failures_are_internal() {
        assert!(RubricFailure::Template(TemplateError::NotFound("x".into())).is_internal());
        assert!(!RubricFailure::TimedOut(Duration::from_secs(1)).is_internal());
        assert!(!RubricFailure::Completion(CompletionError::EmptyResponse).is_internal());
        assert!(!RubricFailure::Parse(ParseError::NoObject).is_internal());
        assert!(!RubricFailure::Reply(ReplyError::MissingScore).is_internal());
    }
}
