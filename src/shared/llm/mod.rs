//! Helpers for interpreting free-form model output.

mod parser;

pub use parser::{extract_json_object, ParseError};
