//! Submissions: one graded attempt per user per challenge.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/api/submissions` | Yes | Submit and grade a solution |
//! | GET | `/api/submissions` | Yes | Current user's submissions, newest first |
//! | GET | `/api/submissions/{id}` | Yes | One of the current user's submissions |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;

pub use services::SubmissionService;
pub use store::{PgSubmissionStore, SubmissionStore};
