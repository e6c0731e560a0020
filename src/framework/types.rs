//! Dynamic attribute values and diagnostics.

use std::collections::{BTreeSet, HashMap};

use crate::framework::value::Value;

/// A single Terraform attribute value as decoded by the host.
///
/// Numbers are f64 to match Terraform's type system.
#[derive(Debug, Clone, PartialEq)]
pub enum Dynamic {
    /// Explicit null value
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    /// Set-typed attributes arrive as lists; ordering is not significant
    List(Vec<Dynamic>),
    Map(HashMap<String, Dynamic>),
    /// Value not yet known (during planning)
    Unknown,
}

impl Dynamic {
    pub fn as_string(&self) -> Option<&str> {
        match self {
            Dynamic::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Dynamic::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Dynamic::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Dynamic]> {
        match self {
            Dynamic::List(l) => Some(l),
            _ => None,
        }
    }
}

/// An object of named attribute values: one resource instance's worth of
/// configuration, plan or state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DynamicObject {
    pub values: HashMap<String, Dynamic>,
}

/// Configuration values for a resource or data source
pub type Config = DynamicObject;

/// State values for a resource
pub type State = DynamicObject;

impl DynamicObject {
    pub fn new() -> Self {
        Self::default()
    }

    fn attr(&self, name: &str) -> Option<&Dynamic> {
        self.values.get(name)
    }

    /// Missing attributes and explicit nulls both decode to `Value::Null`.
    pub fn get_string(&self, name: &str) -> Value<String> {
        match self.attr(name) {
            Some(Dynamic::String(s)) => Value::Known(s.clone()),
            Some(Dynamic::Unknown) => Value::Unknown,
            _ => Value::Null,
        }
    }

    pub fn get_bool(&self, name: &str) -> Value<bool> {
        match self.attr(name) {
            Some(Dynamic::Bool(b)) => Value::Known(*b),
            Some(Dynamic::Unknown) => Value::Unknown,
            _ => Value::Null,
        }
    }

    pub fn get_int(&self, name: &str) -> Value<i64> {
        match self.attr(name) {
            Some(Dynamic::Number(n)) => Value::Known(*n as i64),
            Some(Dynamic::Unknown) => Value::Unknown,
            _ => Value::Null,
        }
    }

    pub fn get_string_set(&self, name: &str) -> Value<BTreeSet<String>> {
        match self.attr(name) {
            Some(Dynamic::List(items)) => Value::Known(
                items
                    .iter()
                    .filter_map(|v| v.as_string().map(str::to_string))
                    .collect(),
            ),
            Some(Dynamic::Unknown) => Value::Unknown,
            _ => Value::Null,
        }
    }

    pub fn get_int_set(&self, name: &str) -> Value<BTreeSet<i64>> {
        match self.attr(name) {
            Some(Dynamic::List(items)) => Value::Known(
                items
                    .iter()
                    .filter_map(|v| v.as_number().map(|n| n as i64))
                    .collect(),
            ),
            Some(Dynamic::Unknown) => Value::Unknown,
            _ => Value::Null,
        }
    }

    /// Setters write explicit nulls so state always carries every schema
    /// attribute, which is what the host expects back.
    pub fn set_string(&mut self, name: &str, value: &Value<String>) {
        self.set(name, value, |s| Dynamic::String(s.clone()));
    }

    pub fn set_bool(&mut self, name: &str, value: &Value<bool>) {
        self.set(name, value, |b| Dynamic::Bool(*b));
    }

    pub fn set_int(&mut self, name: &str, value: &Value<i64>) {
        self.set(name, value, |n| Dynamic::Number(*n as f64));
    }

    pub fn set_string_set(&mut self, name: &str, value: &Value<BTreeSet<String>>) {
        self.set(name, value, |set| {
            Dynamic::List(set.iter().map(|s| Dynamic::String(s.clone())).collect())
        });
    }

    pub fn set_int_set(&mut self, name: &str, value: &Value<BTreeSet<i64>>) {
        self.set(name, value, |set| {
            Dynamic::List(set.iter().map(|n| Dynamic::Number(*n as f64)).collect())
        });
    }

    fn set<T>(&mut self, name: &str, value: &Value<T>, to_dynamic: impl Fn(&T) -> Dynamic) {
        let dynamic = match value {
            Value::Known(v) => to_dynamic(v),
            Value::Null => Dynamic::Null,
            Value::Unknown => Dynamic::Unknown,
        };
        self.values.insert(name.to_string(), dynamic);
    }
}

/// Severity level for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

/// A structured, non-fatal problem report surfaced to the practitioner
/// through the host.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub summary: String,
    pub detail: String,
}

impl Diagnostic {
    pub fn error(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            summary: summary.into(),
            detail: detail.into(),
        }
    }

    pub fn warning(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            summary: summary.into(),
            detail: detail.into(),
        }
    }
}

/// Accumulated diagnostics for one RPC. Failures are collected here rather
/// than propagated as errors so one bad field never hides the others.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagnostics {
    pub errors: Vec<Diagnostic>,
    pub warnings: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_error(&mut self, summary: impl Into<String>, detail: impl Into<String>) {
        self.errors.push(Diagnostic::error(summary, detail));
    }

    pub fn add_warning(&mut self, summary: impl Into<String>, detail: impl Into<String>) {
        self.warnings.push(Diagnostic::warning(summary, detail));
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_decodes_missing_attribute_as_null() {
        let obj = DynamicObject::new();
        assert_eq!(obj.get_string("name"), Value::Null);
        assert_eq!(obj.get_int("count"), Value::Null);
    }

    #[test]
    fn object_round_trips_scalars() {
        let mut obj = DynamicObject::new();
        obj.set_string("name", &Value::Known("widget".to_string()));
        obj.set_bool("enabled", &Value::Known(true));
        obj.set_int("count", &Value::Known(42));

        assert_eq!(obj.get_string("name"), Value::Known("widget".to_string()));
        assert_eq!(obj.get_bool("enabled"), Value::Known(true));
        assert_eq!(obj.get_int("count"), Value::Known(42));
    }

    #[test]
    fn object_writes_explicit_null() {
        let mut obj = DynamicObject::new();
        obj.set_string("name", &Value::Null);
        assert_eq!(obj.values.get("name"), Some(&Dynamic::Null));
    }

    #[test]
    fn object_round_trips_sets() {
        let mut obj = DynamicObject::new();
        let tags: BTreeSet<String> = ["a", "b"].iter().map(|s| s.to_string()).collect();
        obj.set_string_set("tags", &Value::Known(tags.clone()));
        assert_eq!(obj.get_string_set("tags"), Value::Known(tags));
    }

    #[test]
    fn diagnostics_accumulate() {
        let mut diags = Diagnostics::new();
        assert!(!diags.has_errors());
        diags.add_warning("heads up", "");
        assert!(!diags.has_errors());
        diags.add_error("boom", "details");
        assert!(diags.has_errors());
        assert_eq!(diags.errors.len(), 1);
        assert_eq!(diags.warnings.len(), 1);
    }
}
