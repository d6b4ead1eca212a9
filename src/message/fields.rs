//! Ordered field accumulator for webhook messages.

use std::ops::Deref;

use serde_json::{Map, Value};

/// Well-known field names.
pub mod field {
    /// The webhook URL the message is posted to.
    pub const URL: &str = "url";
    /// The message body.
    pub const TEXT: &str = "text";
    /// Optional message title.
    pub const TITLE: &str = "title";
}

/// Field names that must be present, non-null and non-empty, in check order.
pub const REQUIRED_FIELDS: [&str; 2] = [field::URL, field::TEXT];

/// Open-ended, insertion-ordered mapping from field name to optional value.
///
/// A `None` value is a null field: it is present and serialized as JSON
/// `null`. Overwriting a field keeps its position; a removed field that is
/// set again goes to the end.
///
/// `Fields` can only be created by a [`Message`](super::Message), which
/// owns it for its whole lifetime. Callers edit it through [`FieldsMut`].
#[derive(Debug, PartialEq, Eq)]
pub struct Fields {
    entries: Vec<(String, Option<String>)>,
}

impl Fields {
    pub(crate) const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|(key, _)| key == name)
    }

    /// Returns the value of a field that is present and not null.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.position(name)
            .and_then(|i| self.entries[i].1.as_deref())
    }

    /// Returns true if the field is present, null or not.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Returns true if the field is present with a null value.
    #[must_use]
    pub fn is_null(&self, name: &str) -> bool {
        self.position(name)
            .is_some_and(|i| self.entries[i].1.is_none())
    }

    /// Sets a field to a string value.
    pub(crate) fn set(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.insert(name, Some(value.into()));
        self
    }

    /// Sets a field to null.
    pub(crate) fn set_null(&mut self, name: impl Into<String>) -> &mut Self {
        self.insert(name, None);
        self
    }

    /// Inserts or overwrites a field, returning the previous value.
    ///
    /// The outer `Option` is `None` when the field was absent.
    pub(crate) fn insert(
        &mut self,
        name: impl Into<String>,
        value: Option<String>,
    ) -> Option<Option<String>> {
        let name = name.into();
        match self.position(&name) {
            Some(i) => Some(std::mem::replace(&mut self.entries[i].1, value)),
            None => {
                self.entries.push((name, value));
                None
            }
        }
    }

    /// Removes a field, returning its value if it was present.
    pub(crate) fn remove(&mut self, name: &str) -> Option<Option<String>> {
        let i = self.position(name)?;
        Some(self.entries.remove(i).1)
    }

    /// Number of fields, including null ones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Field names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_deref()))
    }

    /// Builds the JSON object posted to the webhook.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let object: Map<String, Value> = self
            .entries
            .iter()
            .map(|(name, value)| {
                let value = value.clone().map_or(Value::Null, Value::String);
                (name.clone(), value)
            })
            .collect();
        Value::Object(object)
    }

    /// Returns true if the field is absent, null or empty.
    pub(crate) fn is_blank(&self, name: &str) -> bool {
        self.get(name).is_none_or(str::is_empty)
    }
}

/// Mutable view of a message's fields.
///
/// Individual fields can be set, nulled or removed; the accumulator itself
/// cannot be taken out or swapped. Reads go through [`Deref`] to [`Fields`].
#[derive(Debug)]
pub struct FieldsMut<'a> {
    fields: &'a mut Fields,
}

impl<'a> FieldsMut<'a> {
    pub(crate) const fn new(fields: &'a mut Fields) -> Self {
        Self { fields }
    }

    /// Sets a field to a string value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.fields.set(name, value);
        self
    }

    /// Sets a field to null.
    pub fn set_null(&mut self, name: impl Into<String>) -> &mut Self {
        self.fields.set_null(name);
        self
    }

    /// Inserts or overwrites a field, returning the previous value.
    ///
    /// The outer `Option` is `None` when the field was absent.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: Option<String>,
    ) -> Option<Option<String>> {
        self.fields.insert(name, value)
    }

    /// Removes a field, returning its value if it was present.
    pub fn remove(&mut self, name: &str) -> Option<Option<String>> {
        self.fields.remove(name)
    }
}

impl Deref for FieldsMut<'_> {
    type Target = Fields;

    fn deref(&self) -> &Fields {
        &*self.fields
    }
}
