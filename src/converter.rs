//! Avro → JSON Schema conversion of the combined document.
//!
//! The build step only depends on the [`DialectConverter`] trait; the
//! bundled [`AvroToJsonSchema`] is the default implementation.
pub mod conversion;
pub mod references;
pub mod state;
pub mod structs;
pub mod types;
pub mod unions;

pub use state::AvroToJsonConverter;

use serde_json::{json, Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ConversionError, Error, Result};

/// File name of the converted artifact inside the output directory.
pub const OUTPUT_FILE_NAME: &str = "schema-definitions.json";

/// JSON Schema dialect the converter emits.
pub const JSON_SCHEMA_DRAFT: &str = "http://json-schema.org/draft-04/schema#";

/// Turns a combined schema document into another schema dialect.
pub trait DialectConverter {
    /// Convert the document at `combined` and write the result into `out_dir`,
    /// returning the path of the written file.
    fn convert(&self, combined: &Path, out_dir: &Path) -> Result<PathBuf>;
}

/// Converts a combined Avro document into one JSON Schema file named
/// [`OUTPUT_FILE_NAME`].
#[derive(Debug, Default, Clone, Copy)]
pub struct AvroToJsonSchema;

impl DialectConverter for AvroToJsonSchema {
    fn convert(&self, combined: &Path, out_dir: &Path) -> Result<PathBuf> {
        let content = fs::read(combined).map_err(|e| Error::io(combined, e))?;
        let avro_schema: Value = serde_json::from_slice(&content).map_err(ConversionError::from)?;
        let json_schema = avro_to_jsons(&avro_schema)?;

        fs::create_dir_all(out_dir).map_err(|e| Error::io(out_dir, e))?;
        let out_file = out_dir.join(OUTPUT_FILE_NAME);
        let pretty = serde_json::to_string_pretty(&json_schema).map_err(ConversionError::from)?;
        fs::write(&out_file, pretty + "\n").map_err(|e| Error::io(&out_file, e))?;
        Ok(out_file)
    }
}

/// Convert an in-memory Avro schema into a JSON Schema document.
///
/// Every named type ends up under `definitions`; the root type (a union
/// for a combined document) is converted in place.
pub fn avro_to_jsons(avro_schema: &Value) -> std::result::Result<Value, ConversionError> {
    let mut converter = AvroToJsonConverter::new();
    let root = converter.convert_type(avro_schema, "")?;

    let mut document = Map::new();
    document.insert("$schema".to_string(), json!(JSON_SCHEMA_DRAFT));
    if let Value::Object(root) = root {
        document.extend(root);
    }
    let definitions: Map<String, Value> = converter.definitions.into_iter().collect();
    document.insert("definitions".to_string(), Value::Object(definitions));
    Ok(Value::Object(document))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_root_becomes_one_of() {
        let document = avro_to_jsons(&json!([
            {"type": "record", "namespace": "geo", "name": "Point", "fields": [{"name": "x", "type": "double"}]},
            {"type": "record", "namespace": "geo", "name": "Line", "fields": [
                {"name": "points", "type": {"type": "array", "items": "Point"}}
            ]}
        ]))
        .unwrap();

        assert_eq!(document["$schema"], json!(JSON_SCHEMA_DRAFT));
        assert_eq!(
            document["oneOf"],
            json!([
                {"$ref": "#/definitions/geo.Point"},
                {"$ref": "#/definitions/geo.Line"}
            ])
        );
        assert_eq!(
            document["definitions"]["geo.Line"]["properties"]["points"]["items"],
            json!({"$ref": "#/definitions/geo.Point"})
        );
    }

    #[test]
    fn single_record_root_is_a_ref() {
        let document =
            avro_to_jsons(&json!({"type": "record", "name": "A", "fields": []})).unwrap();
        assert_eq!(document["$ref"], json!("#/definitions/A"));
        assert!(document["definitions"]["A"].is_object());
    }

    #[test]
    fn writes_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let combined = dir.path().join("combined.avsc");
        fs::write(&combined, "[\n{\"type\":\"record\",\"name\":\"A\",\"fields\":[]}]\n").unwrap();

        let out_dir = dir.path().join("out");
        let written = AvroToJsonSchema.convert(&combined, &out_dir).unwrap();

        assert_eq!(written, out_dir.join(OUTPUT_FILE_NAME));
        let document: Value = serde_json::from_str(&fs::read_to_string(written).unwrap()).unwrap();
        assert!(document["definitions"]["A"].is_object());
    }

    #[test]
    fn reports_invalid_combined_document() {
        let dir = tempfile::tempdir().unwrap();
        let combined = dir.path().join("combined.avsc");
        fs::write(&combined, "[ {").unwrap();
        let err = AvroToJsonSchema.convert(&combined, dir.path()).unwrap_err();
        assert!(matches!(err, Error::Conversion(ConversionError::Json(_))));
    }
}
