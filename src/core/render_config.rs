use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Backend option object produced by a strategy.
///
/// A fresh config is built on every reconciliation. The engine hands it to the
/// backend by reference and never mutates it afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RenderConfig(Value);

impl RenderConfig {
    /// The `{}` option used to reset the backend's option baseline.
    #[must_use]
    pub fn empty() -> Self {
        Self(Value::Object(Map::new()))
    }

    #[must_use]
    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    #[must_use]
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    #[must_use]
    pub fn into_value(self) -> Value {
        self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        match &self.0 {
            Value::Object(map) => map.is_empty(),
            Value::Null => true,
            _ => false,
        }
    }

    /// Looks up a JSON pointer such as `/series/0/data`.
    #[must_use]
    pub fn pointer(&self, pointer: &str) -> Option<&Value> {
        self.0.pointer(pointer)
    }

    #[must_use]
    pub fn series(&self) -> &[Value] {
        self.0
            .get("series")
            .and_then(Value::as_array)
            .map_or(&[], Vec::as_slice)
    }

    /// Number of data items in the series at `index`.
    #[must_use]
    pub fn series_data_len(&self, index: usize) -> Option<usize> {
        self.series()
            .get(index)?
            .get("data")?
            .as_array()
            .map(Vec::len)
    }
}

impl From<Value> for RenderConfig {
    fn from(value: Value) -> Self {
        Self(value)
    }
}
