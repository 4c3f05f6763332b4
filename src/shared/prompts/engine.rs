//! Template engine for grading prompts using Jinja2 syntax.
//!
//! Built-in templates are compiled into the binary; files found under the
//! configured template directory replace the built-in template with the same
//! name, so prompts can be tuned without a rebuild.

use minijinja::{Environment, Value};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Templates shipped with the binary, keyed by their path relative to the template dir
const BUILTIN_TEMPLATES: &[(&str, &str)] = &[
    (
        "grading/comprehension.jinja",
        include_str!("../../../templates/prompts/grading/comprehension.jinja"),
    ),
    (
        "grading/code_review.jinja",
        include_str!("../../../templates/prompts/grading/code_review.jinja"),
    ),
];

/// Errors that can occur during template operations
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template '{0}' not found")]
    NotFound(String),

    #[error("Failed to render template: {0}")]
    RenderError(String),
}

/// Owns the template environment; constructed once at startup and shared.
pub struct PromptRenderer {
    env: Environment<'static>,
}

impl PromptRenderer {
    /// Built-in templates only
    pub fn builtin() -> Self {
        let mut env = Environment::new();
        for (name, source) in BUILTIN_TEMPLATES {
            if let Err(e) = env.add_template(*name, *source) {
                tracing::error!("Built-in template {} failed to compile: {}", name, e);
            }
        }
        Self { env }
    }

    /// Built-in templates, overridden by any `.jinja` files under `template_dir`
    pub fn with_overrides(template_dir: impl AsRef<Path>) -> Self {
        let mut renderer = Self::builtin();
        let template_path = template_dir.as_ref();

        if template_path.exists() {
            load_templates_recursive(&mut renderer.env, template_path, template_path);
        } else {
            tracing::debug!(
                "Template directory {} not found, using built-in prompts",
                template_path.display()
            );
        }

        renderer
    }

    /// Render a template with the given context.
    ///
    /// # Arguments
    /// * `template_name` - The template path relative to the template dir (e.g., "grading/comprehension.jinja")
    /// * `ctx` - A HashMap of variable names to values
    pub fn render(
        &self,
        template_name: &str,
        ctx: &HashMap<&str, Value>,
    ) -> Result<String, TemplateError> {
        let template = self
            .env
            .get_template(template_name)
            .map_err(|_| TemplateError::NotFound(template_name.to_string()))?;

        let render_ctx = Value::from_iter(ctx.iter().map(|(k, v)| (*k, v.clone())));

        template
            .render(render_ctx)
            .map_err(|e| TemplateError::RenderError(e.to_string()))
    }

    #[cfg(test)]
    pub fn template_exists(&self, template_name: &str) -> bool {
        self.env.get_template(template_name).is_ok()
    }
}

/// Recursively load all .jinja templates from a directory
fn load_templates_recursive(env: &mut Environment<'static>, base_path: &Path, current_path: &Path) {
    let Ok(entries) = std::fs::read_dir(current_path) else {
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            load_templates_recursive(env, base_path, &path);
            continue;
        }
        if !path.extension().is_some_and(|ext| ext == "jinja") {
            continue;
        }

        let Ok(relative) = path.strip_prefix(base_path) else {
            continue;
        };
        // Template names always use forward slashes
        let template_name = relative.to_string_lossy().replace('\\', "/");

        match std::fs::read_to_string(&path) {
            Ok(content) => {
                // Templates live for the whole process, so leaking gives us 'static sources
                let static_name: &'static str = Box::leak(template_name.clone().into_boxed_str());
                let static_content: &'static str = Box::leak(content.into_boxed_str());
                if let Err(e) = env.add_template(static_name, static_content) {
                    tracing::warn!("Failed to load template {}: {}", template_name, e);
                } else {
                    tracing::debug!("Loaded template override: {}", template_name);
                }
            }
            Err(e) => tracing::warn!("Failed to read template {}: {}", path.display(), e),
        }
    }
}
