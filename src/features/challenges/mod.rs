//! Challenge catalogue.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/challenges` | No | List active challenges (filter by category/difficulty) |
//! | GET | `/api/challenges/{id}` | Yes | Full challenge |
//! | POST | `/api/challenges` | Admin | Create challenge |
//! | PATCH | `/api/challenges/{id}` | Admin | Edit challenge |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::ChallengeService;
