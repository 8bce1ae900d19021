use super::value::{AttributeValue, FromAttributeValue};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccessError {
    #[error("Attribute {name} has {count} values, expected one")]
    MultipleValues { name: String, count: usize },
    #[error("Attribute {name} holds {found}, requested {requested}")]
    TypeMismatch {
        name: String,
        requested: &'static str,
        found: &'static str,
    },
}

/// Ordered multimap from attribute name to decoded values.
///
/// Names keep the order in which they were first added and every name keeps its
/// values in arrival order, so repeated attributes survive a decode/encode cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeMap {
    entries: Vec<(String, Vec<AttributeValue>)>,
}

impl AttributeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value, creating the entry when the name is new
    pub fn add(&mut self, name: impl Into<String>, value: impl Into<AttributeValue>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, values)) => values.push(value),
            None => self.entries.push((name, vec![value])),
        }
    }

    /// All values stored under `name`, in arrival order
    pub fn values(&self, name: &str) -> &[AttributeValue] {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, values)| values.as_slice())
            .unwrap_or(&[])
    }

    /// Single value under `name`. Absent names give `Ok(None)`.
    pub fn get<T: FromAttributeValue>(&self, name: &str) -> Result<Option<T>, AccessError> {
        match self.values(name) {
            [] => Ok(None),
            [value] => convert(name, value).map(Some),
            values => Err(AccessError::MultipleValues {
                name: name.to_string(),
                count: values.len(),
            }),
        }
    }

    /// Every value under `name`. Absent names give an empty list.
    pub fn get_all<T: FromAttributeValue>(&self, name: &str) -> Result<Vec<T>, AccessError> {
        self.values(name)
            .iter()
            .map(|value| convert(name, value))
            .collect()
    }

    /// Remove every value stored under `name`
    pub fn remove(&mut self, name: &str) -> Vec<AttributeValue> {
        match self.entries.iter().position(|(n, _)| n == name) {
            Some(index) => self.entries.remove(index).1,
            None => Vec::new(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    /// Number of distinct names
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate names with their values, in first-insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[AttributeValue])> {
        self.entries
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }
}

fn convert<T: FromAttributeValue>(name: &str, value: &AttributeValue) -> Result<T, AccessError> {
    T::from_value(value).ok_or_else(|| AccessError::TypeMismatch {
        name: name.to_string(),
        requested: T::TYPE_NAME,
        found: value.type_name(),
    })
}
