//! AI prompt generation from a theory's template.
//!
//! Placeholders are bracketed keys such as `[topic]`. Substitution is plain
//! text replacement driven by the context map; unknown placeholders are left
//! in place and unused context keys are ignored.

use crate::catalog::{TheoryCatalog, TheoryId};
use serde::Serialize;
use std::collections::BTreeMap;

/// Substitution values keyed by placeholder name (without brackets).
pub type PromptContext = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Serialize)]
/// Filled-in prompt plus the guidance a teacher needs alongside it.
pub struct GeneratedPrompt {
    pub theory: String,
    pub prompt: String,
    pub key_principles: Vec<String>,
    pub practical_tips: Vec<String>,
}

/// Build the prompt for `id`, or `None` when the theory does not exist.
pub fn generate_ai_prompt(
    catalog: &TheoryCatalog,
    id: TheoryId,
    context: &PromptContext,
) -> Option<GeneratedPrompt> {
    let theory = catalog.find_by_id(id)?;
    let name = theory.display_name();
    let template = match &theory.ai_prompt_template {
        Some(template) => template.clone(),
        None => format!("Design a learning activity based on {name}"),
    };
    Some(GeneratedPrompt {
        prompt: fill_placeholders(&template, context),
        theory: name,
        key_principles: theory.key_principles().to_vec(),
        practical_tips: theory.practical_tips().to_vec(),
    })
}

/// Replace every `[key]` in `template` with its value from `context`.
///
/// Keys are applied in map order; since placeholders are distinct tokens the
/// order does not change the result unless a value itself contains a
/// placeholder.
pub fn fill_placeholders(template: &str, context: &PromptContext) -> String {
    let mut prompt = template.to_string();
    for (key, value) in context {
        let placeholder = format!("[{key}]");
        if prompt.contains(&placeholder) {
            prompt = prompt.replace(&placeholder, value);
        }
    }
    prompt
}

impl GeneratedPrompt {
    /// Lesson-planning text block: the prompt followed by principles and tips.
    pub fn render_lesson_plan(&self) -> String {
        format!(
            "Based on {}, here's your lesson planning prompt:\n\n{}\n\nKey Principles to Consider:\n{}\n\nPractical Tips from Veteran Teachers:\n{}\n",
            self.theory,
            self.prompt,
            self.key_principles.join(", "),
            self.practical_tips.join(", ")
        )
    }
}
