//! Modules layer - Infrastructure components for external integrations
//!
//! Contains clients and adapters for external services, currently the hosted
//! text-completion API used for grading.

pub mod completion;
