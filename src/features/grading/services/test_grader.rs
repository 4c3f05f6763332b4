use crate::features::grading::models::{GradingOutcome, TestCaseResult};

/// Grade a debugging submission from its test-case results.
///
/// Score is the pass percentage; only a clean sweep counts as correct.
pub fn grade_by_tests(results: &[TestCaseResult]) -> GradingOutcome {
    let passed = results.iter().filter(|r| r.passed).count();
    GradingOutcome::from_test_counts(passed, results.len())
}
