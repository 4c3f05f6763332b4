pub mod auth;
pub mod challenges;
pub mod grading;
pub mod leaderboard;
pub mod submissions;
