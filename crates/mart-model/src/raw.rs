//! Untyped raw-record representation.
//!
//! Source observations arrive as loosely typed mappings (one per product
//! snapshot or trend row). They are modeled as a variant type over the known
//! scalar kinds and consumed exactly once by the record normalizer; nothing
//! downstream of normalization sees a [`RawValue`].

use std::collections::BTreeMap;

/// A single untyped scalar or list value from a source record.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<RawValue>),
}

impl RawValue {
    pub fn is_null(&self) -> bool {
        matches!(self, RawValue::Null)
    }

    /// String view of the value, if it is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            RawValue::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Numeric view with truncation toward zero for floats.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            RawValue::Int(v) => Some(*v),
            RawValue::Float(v) if v.is_finite() => Some(v.trunc() as i64),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            RawValue::Int(v) => Some(*v as f64),
            RawValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            RawValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[RawValue]> {
        match self {
            RawValue::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }
}

/// One source observation: an ordered mapping of field names to raw values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    fields: BTreeMap<String, RawValue>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: RawValue) {
        self.fields.insert(name.into(), value);
    }

    /// Field lookup; absent and explicit-null fields both read as `None`.
    pub fn get(&self, name: &str) -> Option<&RawValue> {
        match self.fields.get(name) {
            Some(RawValue::Null) | None => None,
            Some(value) => Some(value),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Rename a field, keeping the existing value. The rename is skipped if
    /// the source field is absent; an existing value under `to` is replaced.
    pub fn rename(&mut self, from: &str, to: &str) {
        if let Some(value) = self.fields.remove(from) {
            self.fields.insert(to.to_string(), value);
        }
    }

    pub fn str_field(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(RawValue::as_str)
    }

    pub fn i64_field(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(RawValue::as_i64)
    }

    pub fn f64_field(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(RawValue::as_f64)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &RawValue)> {
        self.fields.iter()
    }
}

impl FromIterator<(String, RawValue)> for RawRecord {
    fn from_iter<T: IntoIterator<Item = (String, RawValue)>>(iter: T) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_null_reads_as_absent() {
        let mut record = RawRecord::new();
        record.insert("price", RawValue::Null);
        assert!(record.contains("price"));
        assert!(record.get("price").is_none());
    }

    #[test]
    fn rename_moves_value() {
        let mut record = RawRecord::new();
        record.insert("brand", RawValue::Str("Acme".into()));
        record.rename("brand", "brand_name");
        assert_eq!(record.str_field("brand_name"), Some("Acme"));
        assert!(!record.contains("brand"));
    }

    #[test]
    fn rename_missing_is_noop() {
        let mut record = RawRecord::new();
        record.insert("kept", RawValue::Int(1));
        record.rename("absent", "renamed");
        assert_eq!(record.len(), 1);
        assert_eq!(record.i64_field("kept"), Some(1));
    }

    #[test]
    fn numeric_coercion_truncates_toward_zero() {
        assert_eq!(RawValue::Float(3.9).as_i64(), Some(3));
        assert_eq!(RawValue::Float(-3.9).as_i64(), Some(-3));
        assert_eq!(RawValue::Float(f64::NAN).as_i64(), None);
        assert_eq!(RawValue::Int(7).as_f64(), Some(7.0));
    }
}
