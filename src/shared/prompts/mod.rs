//! Prompt template management.
//!
//! Templates use Jinja2 syntax and live in `templates/prompts/`. The same files
//! are embedded in the binary as defaults.
//!
//! # Usage
//!
//! ```ignore
//! use std::collections::HashMap;
//! use minijinja::Value;
//! use crate::shared::prompts::PromptRenderer;
//!
//! let renderer = PromptRenderer::with_overrides("templates/prompts");
//! let mut ctx = HashMap::new();
//! ctx.insert("title", Value::from("Reverse a linked list"));
//! let prompt = renderer.render("grading/comprehension.jinja", &ctx)?;
//! ```

pub mod engine;

pub use engine::{PromptRenderer, TemplateError};
