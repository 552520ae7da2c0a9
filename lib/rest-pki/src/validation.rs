//! Validation results reported by the service when finalizing an
//! authentication or rejecting a signature.
//!
//! The tree is informational only: every check the service performed lands
//! in one of the three lists, and a failed check may nest the results of
//! the sub-checks that caused it.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResults {
    #[serde(default)]
    pub errors: Vec<ValidationItem>,
    #[serde(default)]
    pub warnings: Vec<ValidationItem>,
    #[serde(default)]
    pub passed_checks: Vec<ValidationItem>,
}

#[skip_serializing_none]
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationItem {
    #[serde(rename = "type")]
    pub item_type: String,
    pub message: String,
    pub detail: Option<String>,
    #[serde(rename = "innerValidationResults")]
    pub inner: Option<Box<ValidationResults>>,
}

impl ValidationResults {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn checks_performed(&self) -> usize {
        self.errors.len() + self.warnings.len() + self.passed_checks.len()
    }

    /// One-line digest of the outcome, indented `level` tabs.
    pub fn summary(&self, level: usize) -> String {
        let mut text = format!("{}Validation results: ", "\t".repeat(level));

        if self.checks_performed() == 0 {
            text.push_str("no checks performed");
            return text;
        }

        text.push_str(&format!("{} checks performed", self.checks_performed()));
        if self.has_errors() {
            text.push_str(&format!(", {} errors", self.errors.len()));
        }
        if self.has_warnings() {
            text.push_str(&format!(", {} warnings", self.warnings.len()));
        }
        if !self.passed_checks.is_empty() {
            if !self.has_errors() && !self.has_warnings() {
                text.push_str(", all passed");
            } else {
                text.push_str(&format!(", {} passed", self.passed_checks.len()));
            }
        }

        text
    }

    fn render(&self, level: usize) -> String {
        let indent = "\t".repeat(level);
        let mut text = self.summary(level);

        if self.has_errors() {
            text.push_str(&format!("\n{indent}Errors:\n"));
            text.push_str(&join_items(&self.errors, level));
        }
        if self.has_warnings() {
            text.push_str(&format!("\n{indent}Warnings:\n"));
            text.push_str(&join_items(&self.warnings, level));
        }
        if !self.passed_checks.is_empty() {
            text.push_str(&format!("\n{indent}Passed Checks:\n"));
            text.push_str(&join_items(&self.passed_checks, level));
        }

        text
    }
}

impl ValidationItem {
    fn render(&self, level: usize) -> String {
        let mut text = self.message.clone();
        if let Some(detail) = self.detail.as_ref().filter(|detail| !detail.is_empty()) {
            text.push_str(&format!(" ({detail})"));
        }
        if let Some(inner) = &self.inner {
            text.push('\n');
            text.push_str(&inner.render(level + 1));
        }
        text
    }
}

fn join_items(items: &[ValidationItem], level: usize) -> String {
    let indent = "\t".repeat(level);
    items
        .iter()
        .map(|item| format!("{indent}- {}", item.render(level)))
        .collect::<Vec<_>>()
        .join("\n")
}

impl fmt::Display for ValidationResults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render(0))
    }
}
