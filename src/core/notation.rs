//! Dependency notation parsing.
//!
//! A dependency reference looks like `$[[ <node-label> :!: <variables> ]]$`,
//! where the variable list holds one or more `<< name >>` markers. Editors
//! often hand us HTML-escaped text, so `&lt;`/`&gt;` are folded back to
//! `<`/`>` before scanning.

use super::error::NotationError;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Separates the node label from the variable list.
pub const DELIMITER: &str = ":!:";

/// Shortest match between the wrappers; capture group 1 is the inner text.
static DEPENDENCY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\[\[(.*?)\]\]\$").expect("dependency pattern is valid"));

/// Greedy: one match stretches to the last `>>` on the line.
static VARIABLE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<<.*>>").expect("variable pattern is valid"));

/// A dependency reference split into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    /// Inner text exactly as written between `$[[` and `]]$`
    pub raw: String,

    /// Referenced task (untrimmed)
    pub node_label: String,

    /// Variable names in order of appearance, duplicates kept
    pub variables: Vec<String>,
}

impl Dependency {
    /// Split and check a raw dependency string.
    pub fn parse(raw: &str) -> Result<Self, NotationError> {
        let (node_label, variable_list) = split_notation(raw)?;
        if node_label.trim().is_empty() {
            return Err(NotationError::EmptyNodeLabel(raw.to_string()));
        }
        let variables = variables_in_dependency(variable_list);
        if variables.iter().any(|v| v.trim().is_empty()) {
            return Err(NotationError::EmptyVariableName(raw.to_string()));
        }
        Ok(Self {
            raw: raw.to_string(),
            node_label: node_label.to_string(),
            variables,
        })
    }
}

/// Fold HTML-escaped angle brackets back to literal ones.
pub fn unescape_editor_tags(text: &str) -> String {
    text.replace("&lt;", "<").replace("&gt;", ">")
}

/// Split a dependency into `(node_label, variable_list)` on the first delimiter.
pub fn split_notation(dependency: &str) -> Result<(&str, &str), NotationError> {
    dependency
        .split_once(DELIMITER)
        .ok_or_else(|| NotationError::MalformedDependency(dependency.to_string()))
}

/// Discover every dependency reference in `text`.
///
/// Each reference is checked before anything is returned, so one malformed
/// reference fails the whole string. The result holds the raw inner strings,
/// de-duplicated in first-occurrence order.
pub fn retrieve(text: &str) -> Result<Vec<String>, NotationError> {
    Ok(retrieve_parsed(text)?
        .into_iter()
        .map(|dep| dep.raw)
        .collect())
}

/// Like [`retrieve`], but keeps the split form of each dependency.
pub fn retrieve_parsed(text: &str) -> Result<Vec<Dependency>, NotationError> {
    let text = unescape_editor_tags(text);
    let mut seen = HashSet::new();
    let mut dependencies = Vec::new();

    for caps in DEPENDENCY_PATTERN.captures_iter(&text) {
        let Some(inner) = caps.get(1) else {
            continue;
        };
        let dependency = Dependency::parse(inner.as_str())?;
        if seen.insert(dependency.raw.clone()) {
            dependencies.push(dependency);
        }
    }

    Ok(dependencies)
}

/// Extract variable names from a variable list, stripping the `<`/`>` markers.
pub fn variables_in_dependency(variable_list: &str) -> Vec<String> {
    VARIABLE_PATTERN
        .find_iter(variable_list)
        .map(|m| m.as_str().trim_matches(|c| c == '<' || c == '>').to_string())
        .collect()
}

/// Wrap a raw dependency string back into its `$[[...]]$` form.
pub fn variable_to_notation(dependency: &str) -> String {
    format!("$[[{}]]$", dependency)
}

/// True when `text` is exactly one dependency reference and nothing else.
pub fn is_pure_variable(text: &str, discovered: &[String]) -> bool {
    match discovered {
        [only] => variable_to_notation(only) == text,
        _ => false,
    }
}
