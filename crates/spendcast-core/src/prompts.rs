//! Prompt templates for the AI backend
//!
//! A prompt is resolved in two steps:
//! 1. an override file in the data dir (`~/.local/share/spendcast/prompts/overrides/<id>.md`)
//! 2. the default compiled into the binary
//!
//! Prompt files start with YAML frontmatter (`id`, `version`) followed by
//! `# System` and `# User` sections. Templates support `{{var}}` and
//! `{{#if var}}...{{/if}}`.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};

mod defaults {
    pub const BUDGET_SUGGESTIONS: &str = include_str!("../../../prompts/budget_suggestions.md");
}

/// Known prompt IDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromptId {
    BudgetSuggestions,
}

impl PromptId {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BudgetSuggestions => "budget_suggestions",
        }
    }

    pub fn all() -> &'static [PromptId] {
        &[Self::BudgetSuggestions]
    }

    fn embedded(&self) -> &'static str {
        match self {
            Self::BudgetSuggestions => defaults::BUDGET_SUGGESTIONS,
        }
    }
}

/// Frontmatter of a prompt file
#[derive(Debug, Clone, Deserialize)]
pub struct PromptMetadata {
    pub id: String,
    pub version: u32,
}

/// A parsed prompt
#[derive(Debug, Clone)]
pub struct Prompt {
    pub metadata: PromptMetadata,
    pub body: String,
    /// Set when the prompt was read from an override file
    pub override_path: Option<PathBuf>,
}

impl Prompt {
    pub fn system_section(&self) -> Option<&str> {
        section(&self.body, "# System")
    }

    pub fn user_section(&self) -> Option<&str> {
        section(&self.body, "# User")
    }

    pub fn render_system(&self, vars: &HashMap<&str, String>) -> Option<String> {
        self.system_section().map(|s| render(s, vars))
    }

    /// Render the user section, or the whole body when there are no sections
    pub fn render_user(&self, vars: &HashMap<&str, String>) -> String {
        render(self.user_section().unwrap_or(&self.body), vars)
    }

    pub fn is_override(&self) -> bool {
        self.override_path.is_some()
    }
}

/// Resolves prompts from the override directory or the embedded defaults
#[derive(Debug, Clone)]
pub struct PromptLibrary {
    override_dir: Option<PathBuf>,
}

impl PromptLibrary {
    /// Library using the platform data directory for overrides
    pub fn new() -> Self {
        Self {
            override_dir: default_prompts_dir(),
        }
    }

    pub fn with_override_dir(path: PathBuf) -> Self {
        Self {
            override_dir: Some(path),
        }
    }

    /// Library that ignores override files
    pub fn embedded_only() -> Self {
        Self { override_dir: None }
    }

    pub fn override_dir(&self) -> Option<&PathBuf> {
        self.override_dir.as_ref()
    }

    /// Load a prompt. Override files are re-read on every call.
    pub fn get(&self, id: PromptId) -> Result<Prompt> {
        if let Some(path) = self
            .override_dir
            .as_ref()
            .map(|dir| dir.join(format!("{}.md", id.as_str())))
            .filter(|path| path.exists())
        {
            let content = fs::read_to_string(&path)?;
            let (metadata, body) = parse_prompt(&content)?;
            debug!(prompt = id.as_str(), path = %path.display(), "Using prompt override");
            return Ok(Prompt {
                metadata,
                body,
                override_path: Some(path),
            });
        }

        let (metadata, body) = parse_prompt(id.embedded())?;
        Ok(Prompt {
            metadata,
            body,
            override_path: None,
        })
    }
}

impl Default for PromptLibrary {
    fn default() -> Self {
        Self::new()
    }
}

/// `~/.local/share/spendcast/prompts/overrides` on Linux
pub fn default_prompts_dir() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("spendcast").join("prompts").join("overrides"))
}

fn parse_prompt(content: &str) -> Result<(PromptMetadata, String)> {
    let rest = content
        .trim_start()
        .strip_prefix("---")
        .ok_or_else(|| Error::InvalidData("Prompt must start with YAML frontmatter (---)".into()))?;

    let end = rest
        .find("\n---")
        .ok_or_else(|| Error::InvalidData("Prompt frontmatter is not closed".into()))?;

    let metadata: PromptMetadata = serde_yaml::from_str(&rest[..end])
        .map_err(|e| Error::InvalidData(format!("Invalid prompt frontmatter: {}", e)))?;
    let body = rest[end + 4..].trim().to_string();

    Ok((metadata, body))
}

fn section<'a>(body: &'a str, header: &str) -> Option<&'a str> {
    let start = body.find(header)? + header.len();
    let rest = &body[start..];
    let end = rest.find("\n# ").unwrap_or(rest.len());
    Some(rest[..end].trim())
}

/// Expand conditional blocks, then substitute variables
fn render(template: &str, vars: &HashMap<&str, String>) -> String {
    let mut out = expand_conditionals(template, vars);
    for (key, value) in vars {
        out = out.replace(&format!("{{{{{}}}}}", key), value);
    }
    out
}

/// Keep `{{#if var}}` blocks whose variable is set and non-empty, drop the rest
fn expand_conditionals(template: &str, vars: &HashMap<&str, String>) -> String {
    const OPEN: &str = "{{#if ";
    const CLOSE: &str = "{{/if}}";

    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find(OPEN) {
        let after_open = &rest[open + OPEN.len()..];
        let Some(name_end) = after_open.find("}}") else {
            break;
        };
        let block = &after_open[name_end + 2..];
        let Some(close) = block.find(CLOSE) else {
            break;
        };

        let name = after_open[..name_end].trim();
        out.push_str(&rest[..open]);
        if vars.get(name).is_some_and(|v| !v.is_empty()) {
            out.push_str(&block[..close]);
        }
        rest = &block[close + CLOSE.len()..];
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&'static str, &str)]) -> HashMap<&'static str, String> {
        pairs.iter().map(|(k, v)| (*k, v.to_string())).collect()
    }

    #[test]
    fn test_parse_prompt() {
        let content = "---\nid: sample\nversion: 2\n---\n\n# System\nBe brief.\n\n# User\nHi {{name}}.\n";
        let (metadata, body) = parse_prompt(content).unwrap();
        assert_eq!(metadata.id, "sample");
        assert_eq!(metadata.version, 2);
        assert_eq!(section(&body, "# System"), Some("Be brief."));
        assert_eq!(section(&body, "# User"), Some("Hi {{name}}."));
    }

    #[test]
    fn test_parse_prompt_requires_frontmatter() {
        assert!(parse_prompt("# User\nno frontmatter").is_err());
        assert!(parse_prompt("---\nid: x\nversion: 1\n").is_err());
    }

    #[test]
    fn test_conditionals() {
        let template = "A{{#if x}} x={{x}}{{/if}} B{{#if y}} y{{/if}} C";
        assert_eq!(render(template, &vars(&[("x", "1")])), "A x=1 B C");
        assert_eq!(render(template, &vars(&[("x", ""), ("y", "z")])), "A B y C");
    }

    #[test]
    fn test_embedded_prompts_parse() {
        let library = PromptLibrary::embedded_only();
        for id in PromptId::all() {
            let prompt = library.get(*id).unwrap();
            assert_eq!(prompt.metadata.id, id.as_str());
            assert!(!prompt.is_override());
            assert!(prompt.system_section().is_some());
            assert!(prompt.user_section().is_some());
        }
    }

    #[test]
    fn test_budget_prompt_renders() {
        let prompt = PromptLibrary::embedded_only()
            .get(PromptId::BudgetSuggestions)
            .unwrap();
        let rendered = prompt.render_user(&vars(&[
            ("today", "2026-03-10"),
            ("avg_monthly_expense", "200.00"),
            ("this_month_expense", "55.00"),
            ("this_month_category", "Fun"),
            ("this_month_total", "40.00"),
        ]));

        assert!(rendered.contains("as of 2026-03-10"));
        assert!(rendered.contains("Fun ($40.00)"));
        assert!(!rendered.contains("last month:"));
        assert!(!rendered.contains("{{"));
    }

    #[test]
    fn test_override_dir_wins() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("budget_suggestions.md"),
            "---\nid: budget_suggestions\nversion: 9\n---\n# User\nCustom {{today}}",
        )
        .unwrap();

        let library = PromptLibrary::with_override_dir(dir.path().to_path_buf());
        let prompt = library.get(PromptId::BudgetSuggestions).unwrap();
        assert!(prompt.is_override());
        assert_eq!(prompt.metadata.version, 9);
        assert_eq!(prompt.render_user(&vars(&[("today", "now")])), "Custom now");
    }
}
