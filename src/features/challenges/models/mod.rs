mod challenge;

pub use challenge::{Challenge, ChallengeCategory, ChallengeDifficulty};
