/// Default page size for pagination
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 100;

// =============================================================================
// ROLE CONSTANTS
// =============================================================================

/// Platform administrator - can create and edit challenges
pub const ROLE_ADMIN: &str = "admin";

/// Regular user - can browse challenges and submit solutions
pub const ROLE_USER: &str = "user";

// =============================================================================
// SCORING
// =============================================================================

/// Upper bound of every grading outcome
pub const MAX_SCORE: u32 = 100;

/// Language assumed for challenges that don't declare one
pub const DEFAULT_CHALLENGE_LANGUAGE: &str = "python";
