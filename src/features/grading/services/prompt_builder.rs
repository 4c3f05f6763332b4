use minijinja::Value;
use std::collections::HashMap;

use crate::features::challenges::models::Challenge;
use crate::features::grading::models::Rubric;
use crate::shared::prompts::{PromptRenderer, TemplateError};

/// Render the grading prompt for one submission.
pub fn build_prompt(
    renderer: &PromptRenderer,
    rubric: Rubric,
    challenge: &Challenge,
    submission: &str,
) -> Result<String, TemplateError> {
    let mut ctx: HashMap<&str, Value> = HashMap::new();
    ctx.insert("title", Value::from(challenge.title.as_str()));
    ctx.insert("description", Value::from(challenge.description.as_str()));
    ctx.insert("language", Value::from(challenge.language_or_default()));
    ctx.insert(
        "code_snippet",
        Value::from(challenge.code_snippet.as_deref().unwrap_or_default()),
    );
    ctx.insert("submission", Value::from(submission));
    ctx.insert("dimensions", Value::from_serialize(rubric.dimensions()));
    ctx.insert("breakdown_example", Value::from(breakdown_example(rubric)));

    renderer.render(rubric.template_name(), &ctx)
}

/// Sample `breakdown` object in rubric order, indented to sit inside the reply example
fn breakdown_example(rubric: Rubric) -> String {
    let fields = rubric
        .dimensions()
        .iter()
        .map(|d| format!("    \"{}\": {}", d.name, d.example))
        .collect::<Vec<_>>()
        .join(",\n");

    format!("{{\n{}\n  }}", fields)
}
