//! Submission grading.
//!
//! Grading is internal: it has no routes of its own and is invoked by the
//! submissions feature. The strategy is picked from the challenge category:
//!
//! | Category | Strategy |
//! |----------|----------|
//! | `comprehension` | LLM rubric (accuracy, completeness, clarity, depth) |
//! | `ai_review`, `security` | LLM rubric (issue identification, impact, solution, best practices) |
//! | `debugging` | Test pass rate, or a fixed placeholder when no results are available |
//! | `design` | Manual review placeholder |
//!
//! Completion and parsing failures never reach the caller; they degrade to
//! [`GradingOutcome::fallback`].

mod error;

pub mod models;
pub mod services;

pub use error::GradingError;
pub use models::{GradingInput, GradingOutcome, TestCaseResult};
pub use services::{grade_by_tests, GradingService, GradingSettings};
