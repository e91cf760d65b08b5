use serde_json::{json, Value};

/// Convert an Avro primitive type name into its JSON Schema equivalent.
///
/// `int` keeps its 32-bit range as `minimum`/`maximum`; `bytes` become
/// strings. Returns `None` for names that are not primitives.
pub fn avro_primitive_to_json_type(primitive: &str) -> Option<Value> {
    let json_type = match primitive {
        "null" => json!({"type": "null"}),
        "boolean" => json!({"type": "boolean"}),
        "int" => json!({
            "type": "integer",
            "minimum": i32::MIN,
            "maximum": i32::MAX
        }),
        "long" => json!({"type": "integer"}),
        "float" | "double" => json!({"type": "number"}),
        "bytes" | "string" => json!({"type": "string"}),
        _ => return None,
    };
    Some(json_type)
}
