use serde_json::{json, Value};

/// JSON pointer prefix under which named types are stored.
pub const DEFINITIONS_POINTER: &str = "#/definitions/";

/// Create a `$ref` to the definition registered under `fullname`.
pub fn definition_ref(fullname: &str) -> Value {
    json!({ "$ref": format!("{DEFINITIONS_POINTER}{fullname}") })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_into_definitions() {
        assert_eq!(
            definition_ref("geo.Point"),
            json!({"$ref": "#/definitions/geo.Point"})
        );
    }
}
