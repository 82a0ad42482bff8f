use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Upper bound on the number of similar entries kept from a response
pub const MAX_RESULTS: usize = 5;

/// The querying user's timeline data
///
/// No schema is enforced; any JSON object is accepted as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Profile(pub Map<String, Value>);

/// One candidate record compared against the profile
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Entry(pub Map<String, Value>);

impl Entry {
    /// Identifying field, by convention `id`
    pub fn id(&self) -> Option<&Value> {
        self.0.get("id")
    }
}

impl TryFrom<Value> for Profile {
    type Error = Value;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(other),
        }
    }
}

impl TryFrom<Value> for Entry {
    type Error = Value;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(other),
        }
    }
}

/// Entries judged similar by the model, in the order the model returned them
///
/// Holds at most [`MAX_RESULTS`] values. Elements are whatever the model
/// echoed back and are not required to be objects.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ResultSet(Vec<Value>);

impl ResultSet {
    /// Keep the first [`MAX_RESULTS`] values, in order
    pub fn from_ranked(mut ranked: Vec<Value>) -> Self {
        ranked.truncate(MAX_RESULTS);
        Self(ranked)
    }

    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Value] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<Value> {
        self.0
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
