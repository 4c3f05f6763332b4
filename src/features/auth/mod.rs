//! Local username/password accounts and HS256 access tokens.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/api/auth/register` | No | Create an account |
//! | POST | `/api/auth/login` | No | Exchange credentials for an access token |
//! | GET | `/api/auth/me` | Yes | Current user profile |

mod validator;

pub mod dtos;
pub mod guards;
pub mod handlers;
pub mod model;
pub mod models;
pub mod routes;
pub mod services;

pub use services::{AuthService, TokenService};
pub use validator::JwtValidator;
