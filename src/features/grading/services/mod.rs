mod grading_service;
mod prompt_builder;
mod reply;
mod test_grader;

pub use grading_service::{GradingService, GradingSettings};
pub use test_grader::grade_by_tests;
