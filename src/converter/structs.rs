use serde_json::{json, Map, Value};

/// Create a JSON Schema object for an Avro record.
///
/// Fields without a `default` are required. Unknown properties are rejected
/// since Avro records are closed.
pub fn create_object_type(
    properties: Map<String, Value>,
    required: Vec<String>,
    doc: Option<&str>,
) -> Value {
    let mut object = json!({
        "type": "object",
        "properties": properties,
        "required": required,
        "additionalProperties": false
    });
    add_description(&mut object, doc);
    object
}

/// Create a JSON Schema enumeration from Avro enum symbols.
pub fn create_enum_type(symbols: &[Value], doc: Option<&str>) -> Value {
    let mut enumeration = json!({ "enum": symbols });
    add_description(&mut enumeration, doc);
    enumeration
}

/// Create a fixed-length string for an Avro `fixed` type.
pub fn create_fixed_type(size: u64) -> Value {
    json!({
        "type": "string",
        "minLength": size,
        "maxLength": size
    })
}

/// Create a JSON Schema array type.
pub fn create_array_type(items: Value) -> Value {
    json!({
        "type": "array",
        "items": items
    })
}

/// Create a JSON Schema object with homogeneous values for an Avro map.
pub fn create_map_type(values: Value) -> Value {
    json!({
        "type": "object",
        "additionalProperties": values
    })
}

fn add_description(json_type: &mut Value, doc: Option<&str>) {
    if let (Some(doc), Some(obj)) = (doc, json_type.as_object_mut()) {
        obj.insert("description".to_string(), Value::String(doc.to_string()));
    }
}
