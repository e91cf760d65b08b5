use std::collections::BTreeMap;

use serde_json::Value;

/// Holds the state for converting Avro → JSON Schema.
#[derive(Debug, Default)]
pub struct AvroToJsonConverter {
    /// Converted named types keyed by full name.
    ///
    /// A record is registered as `Value::Null` while its fields are being
    /// converted so that self references resolve.
    pub definitions: BTreeMap<String, Value>,
}

impl AvroToJsonConverter {
    /// Create a converter with no known types.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a named type with this full name has been seen.
    pub fn is_defined(&self, fullname: &str) -> bool {
        self.definitions.contains_key(fullname)
    }
}
