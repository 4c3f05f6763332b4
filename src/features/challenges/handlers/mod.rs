mod challenge_handler;

pub use challenge_handler::*;
