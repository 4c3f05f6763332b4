mod challenge_service;

pub(crate) use challenge_service::CHALLENGE_COLUMNS;
pub use challenge_service::ChallengeService;
