//! Plugin parameters decoded from the `Comp`/`Cont` chunks.

use std::collections::HashMap;
use std::fmt;

/// Value carried by a [`Parameter`]. Exactly one representation per entry.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Number(f64),
    Text(String),
    Bytes(Vec<u8>),
}

/// A single named plugin parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub index: i32,
    pub value: ParamValue,
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            ParamValue::Number(n) => {
                write!(f, "{:<6} | {:<20} | {:>8.2}", self.index, self.name, n)
            }
            ParamValue::Text(s) => {
                let mut preview: String = s.chars().take(200).collect();
                if s.chars().count() > 200 {
                    preview.push_str(" ...");
                }
                write!(f, "{:<6} | {:<20} | {}", self.index, self.name, preview)
            }
            ParamValue::Bytes(b) => {
                let mut preview = String::new();
                for byte in b.iter().take(16) {
                    preview.push_str(&format!("{:02X} ", byte));
                }
                if b.len() > 16 {
                    preview.push_str("...");
                }
                write!(
                    f,
                    "{:<6} | {:<20} | {} ({} bytes)",
                    self.index,
                    self.name,
                    preview.trim_end(),
                    b.len()
                )
            }
        }
    }
}

/// Insertion-ordered parameter map keyed by name.
///
/// A name collision never overwrites: the colliding entry is re-keyed as
/// `name + index` and the collision is logged as a warning. Serialization
/// always walks entries in insertion order.
#[derive(Debug, Default, Clone)]
pub struct ParameterMap {
    entries: Vec<(String, Parameter)>,
    lookup: HashMap<String, usize>,
}

impl ParameterMap {
    pub fn new() -> ParameterMap {
        ParameterMap::default()
    }

    pub fn add_number(&mut self, name: &str, index: i32, value: f64) {
        self.insert(name, index, ParamValue::Number(value));
    }

    pub fn add_text(&mut self, name: &str, index: i32, value: impl Into<String>) {
        self.insert(name, index, ParamValue::Text(value.into()));
    }

    pub fn add_bytes(&mut self, name: &str, index: i32, value: Vec<u8>) {
        self.insert(name, index, ParamValue::Bytes(value));
    }

    fn insert(&mut self, name: &str, index: i32, value: ParamValue) {
        let key = if self.lookup.contains_key(name) {
            let rekeyed = format!("{}{}", name, index);
            tracing::warn!(
                name,
                index,
                key = %rekeyed,
                "duplicate parameter name, re-keying"
            );
            rekeyed
        } else {
            name.to_string()
        };

        let param = Parameter {
            name: name.to_string(),
            index,
            value,
        };
        let slot = self.entries.len();
        self.entries.push((key.clone(), param));
        // A doubly colliding key keeps the first mapping; the entry itself
        // is still serialized in order.
        self.lookup.entry(key).or_insert(slot);
    }

    /// Replace the value under `key`, or insert it if absent. Used for the
    /// reserved chunk-data entries, which are overwritten rather than
    /// re-keyed.
    pub fn set_bytes(&mut self, key: &str, value: Vec<u8>) {
        let index = value.len() as i32;
        match self.lookup.get(key) {
            Some(&slot) => {
                let entry = &mut self.entries[slot].1;
                tracing::debug!(
                    key,
                    old = match &entry.value {
                        ParamValue::Bytes(b) => b.len(),
                        _ => 0,
                    },
                    new = value.len(),
                    "overwriting chunk data"
                );
                entry.index = index;
                entry.value = ParamValue::Bytes(value);
            }
            None => self.insert(key, index, ParamValue::Bytes(value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Parameter> {
        self.lookup.get(key).map(|&slot| &self.entries[slot].1)
    }

    pub fn has(&self, key: &str) -> bool {
        self.lookup.contains_key(key)
    }

    pub fn number(&self, key: &str) -> Option<f64> {
        match self.get(key)?.value {
            ParamValue::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        match &self.get(key)?.value {
            ParamValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn bytes(&self, key: &str) -> Option<&[u8]> {
        match &self.get(key)?.value {
            ParamValue::Bytes(b) => Some(b),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parameters in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Parameter> {
        self.entries.iter().map(|(_, p)| p)
    }

    /// `(key, parameter)` pairs in insertion order. The key differs from the
    /// parameter name only for re-keyed duplicates.
    pub fn iter_keyed(&self) -> impl Iterator<Item = (&str, &Parameter)> {
        self.entries.iter().map(|(k, p)| (k.as_str(), p))
    }
}
