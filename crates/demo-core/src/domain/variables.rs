//! Typed process variables

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A file attached to a process instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileValue {
    pub filename: String,
    pub mime_type: String,
    #[serde(skip)]
    pub content: Vec<u8>,
}

impl FileValue {
    pub fn new(filename: impl Into<String>, mime_type: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            mime_type: mime_type.into(),
            content,
        }
    }

    pub fn size(&self) -> usize {
        self.content.len()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum VariableValue {
    String(String),
    Double(f64),
    Integer(i64),
    Boolean(bool),
    File(FileValue),
}

impl VariableValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            VariableValue::String(_) => "String",
            VariableValue::Double(_) => "Double",
            VariableValue::Integer(_) => "Integer",
            VariableValue::Boolean(_) => "Boolean",
            VariableValue::File(_) => "File",
        }
    }
}

impl std::fmt::Display for VariableValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VariableValue::String(s) => write!(f, "{}", s),
            VariableValue::Double(d) => write!(f, "{}", d),
            VariableValue::Integer(i) => write!(f, "{}", i),
            VariableValue::Boolean(b) => write!(f, "{}", b),
            VariableValue::File(file) => write!(f, "{}", file.filename),
        }
    }
}

impl From<&str> for VariableValue {
    fn from(value: &str) -> Self {
        VariableValue::String(value.to_string())
    }
}

impl From<String> for VariableValue {
    fn from(value: String) -> Self {
        VariableValue::String(value)
    }
}

impl From<f64> for VariableValue {
    fn from(value: f64) -> Self {
        VariableValue::Double(value)
    }
}

impl From<i64> for VariableValue {
    fn from(value: i64) -> Self {
        VariableValue::Integer(value)
    }
}

impl From<bool> for VariableValue {
    fn from(value: bool) -> Self {
        VariableValue::Boolean(value)
    }
}

impl From<FileValue> for VariableValue {
    fn from(value: FileValue) -> Self {
        VariableValue::File(value)
    }
}

/// Variable map of a process instance or of a task completion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Variables(BTreeMap<String, VariableValue>);

impl Variables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Chainable insert.
    pub fn put(mut self, name: impl Into<String>, value: impl Into<VariableValue>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<VariableValue>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&VariableValue> {
        self.0.get(name)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        match self.0.get(name) {
            Some(VariableValue::String(s)) => Some(s),
            _ => None,
        }
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        match self.0.get(name) {
            Some(VariableValue::Boolean(b)) => Some(*b),
            _ => None,
        }
    }

    pub fn get_f64(&self, name: &str) -> Option<f64> {
        match self.0.get(name) {
            Some(VariableValue::Double(d)) => Some(*d),
            _ => None,
        }
    }

    pub fn get_file(&self, name: &str) -> Option<&FileValue> {
        match self.0.get(name) {
            Some(VariableValue::File(file)) => Some(file),
            _ => None,
        }
    }

    /// Later values win.
    pub fn merge(&mut self, other: Variables) {
        self.0.extend(other.0);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &VariableValue)> {
        self.0.iter()
    }
}
