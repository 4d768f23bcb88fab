//! Placeholder substitution for generated text artifacts.

use std::collections::HashMap;

use super::ProjectName;

/// Variables available to support file templates.
///
/// Templates reference them as `{{PROJECT_NAME}}` and `{{SERVICE_NAME}}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderContext {
    variables: HashMap<String, String>,
}

impl RenderContext {
    pub fn new(project: &ProjectName) -> Self {
        let mut vars = HashMap::new();
        vars.insert("PROJECT_NAME".to_string(), project.to_string());
        vars.insert("SERVICE_NAME".to_string(), project.service_name());

        Self { variables: vars }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(|s| s.as_str())
    }

    /// Replace every `{{VARIABLE}}` placeholder.
    ///
    /// Unknown placeholders are left untouched.
    pub fn render(&self, template: &str) -> String {
        let mut result = template.to_string();

        for (key, value) in &self.variables {
            let placeholder = format!("{{{{{key}}}}}");
            result = result.replace(&placeholder, value);
        }

        result
    }
}
