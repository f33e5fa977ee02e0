//! Dependency injection into nested targets.
//!
//! Strings that are exactly one reference are replaced by the resolved value
//! itself, keeping its type. Strings with surrounding text, or with several
//! references, get each reference replaced by the value's textual form.
//! Sequences splice list-valued results in place.
//!
//! Malformed notation never aborts injection: the offending string is left
//! untouched and the rest of the structure is still processed.

use super::config::EngineConfig;
use super::error::NotationError;
use super::notation::{self, Dependency};
use super::types::{DependencyTable, Target};
use super::validator::Validator;

/// Look up the value for a raw dependency string.
///
/// The raw inner text is tried first (`"Task:!:<<Label>>"`). A dependency
/// naming exactly one variable then falls back to that variable's name,
/// as written and then trimmed.
pub fn resolve<'a>(dependency: &str, dependencies: &'a DependencyTable) -> Option<&'a Target> {
    if let Some(value) = dependencies.get(dependency) {
        return Some(value);
    }
    let (_, variable_list) = notation::split_notation(dependency).ok()?;
    let variables = notation::variables_in_dependency(variable_list);
    match variables.as_slice() {
        [name] => dependencies
            .get(name.as_str())
            .or_else(|| dependencies.get(name.trim())),
        _ => None,
    }
}

/// Walks targets and substitutes resolved dependency values.
#[derive(Debug, Clone, Default)]
pub struct Injector {
    validator: Validator,
    enforce_blacklist: bool,
}

impl Injector {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            validator: Validator::new(config.blacklist()),
            enforce_blacklist: config.enforce_blacklist,
        }
    }

    /// Inject dependency values into `target`, returning a new value.
    pub fn inject(&self, target: &Target, dependencies: &DependencyTable) -> Target {
        match target {
            Target::Mapping(map) => Target::Mapping(
                map.iter()
                    .map(|(k, v)| (k.clone(), self.inject(v, dependencies)))
                    .collect(),
            ),
            Target::String(text) => self.inject_str(text, dependencies),
            Target::Sequence(items) => Target::Sequence(self.inject_into_list(items, dependencies)),
            Target::Other(_) => target.clone(),
        }
    }

    /// Inject into each item, splicing sequence results one level deep.
    pub fn inject_into_list(&self, items: &[Target], dependencies: &DependencyTable) -> Vec<Target> {
        let mut result = Vec::with_capacity(items.len());
        for item in items {
            match self.inject(item, dependencies) {
                Target::Sequence(inner) => result.extend(inner),
                other => result.push(other),
            }
        }
        result
    }

    fn inject_str(&self, original: &str, dependencies: &DependencyTable) -> Target {
        let text = notation::unescape_editor_tags(original);
        let found = match self.discover(&text) {
            Ok(found) => found,
            Err(e) => {
                tracing::debug!(error = %e, "leaving string untouched");
                return Target::String(original.to_string());
            }
        };
        if found.is_empty() {
            return Target::String(original.to_string());
        }

        if notation::is_pure_variable(&text, &found) {
            return match resolve(&found[0], dependencies) {
                Some(value) => value.clone(),
                None => {
                    tracing::debug!(dependency = %found[0], "unresolved dependency");
                    Target::null()
                }
            };
        }

        let mut result = text;
        for dependency in &found {
            let replacement = match resolve(dependency, dependencies) {
                Some(value) => value.to_text(),
                None => {
                    tracing::debug!(dependency = %dependency, "unresolved dependency");
                    String::new()
                }
            };
            result = result.replace(&notation::variable_to_notation(dependency), &replacement);
        }
        Target::String(result)
    }

    /// Retrieve references and, when enforcement is on, screen their variables.
    fn discover(&self, text: &str) -> Result<Vec<String>, NotationError> {
        if !self.enforce_blacklist {
            return notation::retrieve(text);
        }
        let parsed = notation::retrieve_parsed(text)?;
        for Dependency { variables, .. } in &parsed {
            if let Err(e) = self.validator.assert_all_valid(variables.as_slice()) {
                tracing::warn!(error = %e, "blacklisted variable in target");
                return Err(e);
            }
        }
        Ok(parsed.into_iter().map(|dep| dep.raw).collect())
    }
}
