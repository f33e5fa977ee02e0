//! Value model for injection targets and dependency tables.
//!
//! A [`Target`] is one of exactly four shapes. JSON values convert into it
//! losslessly: strings, arrays and objects get their own variants, every other
//! scalar (numbers, booleans, null) is carried opaquely in [`Target::Other`].

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// Resolved values keyed by dependency or variable name.
pub type DependencyTable = IndexMap<String, Target>;

// ============================================================================
// Target
// ============================================================================

/// A value that may contain dependency references anywhere inside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum Target {
    /// Text that may carry `$[[ ... ]]$` references
    String(String),

    /// Ordered sequence; list-valued injections splice into it
    Sequence(Vec<Target>),

    /// Key-value mapping (insertion order preserved)
    Mapping(IndexMap<String, Target>),

    /// Numbers, booleans and null
    Other(Scalar),
}

/// Opaque leaf values. Injection passes them through unchanged.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Number(Number),
}

impl From<Scalar> for Value {
    fn from(scalar: Scalar) -> Self {
        match scalar {
            Scalar::Null => Value::Null,
            Scalar::Bool(b) => Value::Bool(b),
            Scalar::Number(n) => Value::Number(n),
        }
    }
}

impl Target {
    /// The null value, used for references with no resolved value.
    pub fn null() -> Self {
        Target::Other(Scalar::Null)
    }

    /// Short shape name for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Target::String(_) => "string",
            Target::Sequence(_) => "sequence",
            Target::Mapping(_) => "mapping",
            Target::Other(Scalar::Null) => "null",
            Target::Other(Scalar::Bool(_)) => "bool",
            Target::Other(Scalar::Number(_)) => "number",
        }
    }

    /// Textual form used when a value is spliced into surrounding text.
    ///
    /// Strings are verbatim and null is empty. Everything else renders as
    /// compact JSON, so `42` becomes `42` and `[1,2]` becomes `[1,2]`.
    pub fn to_text(&self) -> String {
        match self {
            Target::String(s) => s.clone(),
            Target::Other(Scalar::Null) => String::new(),
            Target::Other(Scalar::Bool(b)) => b.to_string(),
            Target::Other(Scalar::Number(n)) => n.to_string(),
            structured => Value::from(structured.clone()).to_string(),
        }
    }
}

impl From<Value> for Target {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => Target::String(s),
            Value::Array(items) => Target::Sequence(items.into_iter().map(Target::from).collect()),
            Value::Object(map) => {
                Target::Mapping(map.into_iter().map(|(k, v)| (k, Target::from(v))).collect())
            }
            Value::Null => Target::Other(Scalar::Null),
            Value::Bool(b) => Target::Other(Scalar::Bool(b)),
            Value::Number(n) => Target::Other(Scalar::Number(n)),
        }
    }
}

impl From<Target> for Value {
    fn from(target: Target) -> Self {
        match target {
            Target::String(s) => Value::String(s),
            Target::Sequence(items) => Value::Array(items.into_iter().map(Value::from).collect()),
            Target::Mapping(map) => {
                Value::Object(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
            Target::Other(scalar) => Value::from(scalar),
        }
    }
}

impl From<&str> for Target {
    fn from(s: &str) -> Self {
        Target::String(s.to_string())
    }
}

impl From<String> for Target {
    fn from(s: String) -> Self {
        Target::String(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_types_from_json_shapes() {
        assert_eq!(Target::from(json!("a")), Target::String("a".into()));
        assert_eq!(Target::from(json!(7)), Target::Other(Scalar::Number(Number::from(7_i64))));
        assert_eq!(Target::from(json!(null)), Target::null());
        assert!(matches!(Target::from(json!([1, "x"])), Target::Sequence(v) if v.len() == 2));
        assert!(matches!(Target::from(json!({"k": 1})), Target::Mapping(m) if m.contains_key("k")));
    }

    #[test]
    fn test_types_mapping_order_preserved() {
        let value = json!({"zeta": 1, "alpha": 2, "mid": 3});
        let target = Target::from(value.clone());
        let Target::Mapping(map) = &target else {
            panic!("expected mapping");
        };
        let keys: Vec<&str> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
        assert_eq!(Value::from(target), value);
    }

    #[test]
    fn test_types_to_text() {
        assert_eq!(Target::from("plain").to_text(), "plain");
        assert_eq!(Target::null().to_text(), "");
        assert_eq!(Target::from(json!(42)).to_text(), "42");
        assert_eq!(Target::from(json!(1.5)).to_text(), "1.5");
        assert_eq!(Target::from(json!(true)).to_text(), "true");
        assert_eq!(Target::from(json!([1, 2])).to_text(), "[1,2]");
        assert_eq!(Target::from(json!({"a": "b"})).to_text(), r#"{"a":"b"}"#);
    }

    #[test]
    fn test_types_serde_roundtrip() {
        let target: Target = serde_json::from_str(r#"{"x": ["$[[T:!:<<X>>]]$", 3]}"#).unwrap();
        assert_eq!(target.kind(), "mapping");
        let back = serde_json::to_string(&target).unwrap();
        assert_eq!(back, r#"{"x":["$[[T:!:<<X>>]]$",3]}"#);
    }

    #[test]
    fn test_types_nested_string_is_text_not_json() {
        let target = Target::from(json!({"inner": ["s"]}));
        let Target::Mapping(map) = &target else {
            panic!("expected mapping");
        };
        let Target::Sequence(items) = &map["inner"] else {
            panic!("expected sequence");
        };
        assert_eq!(items[0], Target::String("s".into()));
        assert_eq!(items[0].to_text(), "s");
    }

    #[test]
    fn test_types_kind_names() {
        assert_eq!(Target::from(json!(false)).kind(), "bool");
        assert_eq!(Target::from(json!(0)).kind(), "number");
        assert_eq!(Target::from(json!([])).kind(), "sequence");
        assert_eq!(Target::from("s").kind(), "string");
    }
}
