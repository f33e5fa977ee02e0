//! Request payloads: `{"target": ..., "dependencies": {...}}`.
//!
//! Shape problems are rejected here, before any injection work. Problems
//! inside individual strings of the target are the injector's business and
//! never fail a payload.

use super::error::PayloadError;
use super::injector::Injector;
use super::types::{DependencyTable, Target};
use serde_json::{json, Map, Value};

/// A decoded request.
#[derive(Debug, Clone, PartialEq)]
pub struct Payload {
    pub target: Target,
    pub dependencies: DependencyTable,
}

impl Payload {
    /// Parse a payload from JSON text.
    pub fn from_json(text: &str) -> Result<Self, PayloadError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }

    /// Check the request shape and split it into target and dependencies.
    pub fn from_value(value: Value) -> Result<Self, PayloadError> {
        let mut object = match value {
            Value::Object(object) => object,
            other => return Err(PayloadError::NotAnObject(json_kind(&other))),
        };

        let target = object.remove("target").ok_or(PayloadError::MissingTarget)?;
        let dependencies = match object.remove("dependencies") {
            Some(Value::Object(map)) => dependency_table(map),
            _ => return Err(PayloadError::InvalidDependencies),
        };

        match &target {
            Value::String(_) | Value::Array(_) | Value::Object(_) => {}
            other => return Err(PayloadError::UnsupportedTarget(json_kind(other))),
        }

        Ok(Self {
            target: Target::from(target),
            dependencies,
        })
    }

    /// Inject the dependencies into the target.
    pub fn process(&self, injector: &Injector) -> Target {
        injector.inject(&self.target, &self.dependencies)
    }
}

/// Decode, inject and wrap the result as `{"result": ...}`.
pub fn process_payload(injector: &Injector, text: &str) -> Result<Value, PayloadError> {
    let payload = Payload::from_json(text)?;
    tracing::debug!(
        target_kind = payload.target.kind(),
        dependencies = payload.dependencies.len(),
        "processing payload"
    );
    Ok(json!({ "result": Value::from(payload.process(injector)) }))
}

fn dependency_table(map: Map<String, Value>) -> DependencyTable {
    map.into_iter().map(|(k, v)| (k, Target::from(v))).collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
