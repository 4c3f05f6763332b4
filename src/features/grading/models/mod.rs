mod input;
mod outcome;
mod strategy;

pub use input::{GradingInput, TestCaseResult};
pub use outcome::GradingOutcome;
pub use strategy::{GradingStrategy, Rubric, RubricDimension, SubmissionField};
