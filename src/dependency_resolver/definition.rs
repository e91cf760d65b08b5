use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::avro::{is_primitive, qualify};
use crate::error::{Error, Result};

/// One parsed schema file.
///
/// Built once per input file and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaDefinition {
    path: PathBuf,
    name: String,
    raw_content: Vec<u8>,
    dependencies: BTreeSet<String>,
    defined_names: BTreeSet<String>,
}

impl SchemaDefinition {
    /// Read and parse the schema file at `path`.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read(path).map_err(|e| Error::io(path, e))?;
        Self::parse(path, raw)
    }

    /// Parse raw schema bytes. `path` is only used for error reporting and logging.
    pub fn parse(path: impl Into<PathBuf>, raw_content: Vec<u8>) -> Result<Self> {
        let path = path.into();
        let parse_error = |message: String| Error::SchemaParse {
            path: path.clone(),
            message,
        };

        let json: Value = serde_json::from_slice(&raw_content)
            .map_err(|e| parse_error(format!("invalid JSON: {e}")))?;
        let obj = json
            .as_object()
            .ok_or_else(|| parse_error("top level is not a JSON object".to_string()))?;

        let namespace = match obj.get("namespace") {
            None | Some(Value::Null) => "",
            Some(Value::String(ns)) => ns.as_str(),
            Some(other) => return Err(parse_error(format!("namespace is not a string: {other}"))),
        };
        let local = obj
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| parse_error("missing string \"name\"".to_string()))?;

        let name = qualify(namespace, local);
        let dependencies = collect_dependencies(&json, namespace);
        let defined_names = collect_defined_names(&json, namespace);

        Ok(Self {
            path,
            name,
            raw_content,
            dependencies,
            defined_names,
        })
    }

    /// File this definition was read from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Full name of the defined type.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The file's bytes exactly as read.
    pub fn raw_content(&self) -> &[u8] {
        &self.raw_content
    }

    /// Full names of every non-primitive type the definition references.
    pub fn dependencies(&self) -> &BTreeSet<String> {
        &self.dependencies
    }

    /// Full names of the named types declared inline below the top-level
    /// definition (nested records, enums, fixed).
    pub fn defined_names(&self) -> &BTreeSet<String> {
        &self.defined_names
    }
}

/// Collect the full names of all named types referenced from the `fields`
/// of a record, descending into unions, arrays and nested records.
///
/// Names are qualified with `namespace`, the namespace of the top-level
/// definition, including those found inside nested records.
pub fn collect_dependencies(record: &Value, namespace: &str) -> BTreeSet<String> {
    let mut dependencies = BTreeSet::new();
    collect_field_types(record, namespace, &mut dependencies);
    dependencies
}

fn collect_field_types(record: &Value, namespace: &str, out: &mut BTreeSet<String>) {
    let Some(fields) = record.get("fields").and_then(Value::as_array) else {
        return;
    };
    for field in fields {
        if let Some(field_type) = field.as_object().and_then(|f| f.get("type")) {
            collect_types(field_type, namespace, out);
        }
    }
}

fn collect_types(type_expr: &Value, namespace: &str, out: &mut BTreeSet<String>) {
    match type_expr {
        Value::String(name) => {
            if !is_primitive(name) {
                out.insert(qualify(namespace, name));
            }
        }
        Value::Array(members) => {
            for member in members {
                collect_types(member, namespace, out);
            }
        }
        Value::Object(obj) => match obj.get("type").and_then(Value::as_str) {
            Some("array") => {
                if let Some(items) = obj.get("items") {
                    collect_types(items, namespace, out);
                }
            }
            Some("record") => collect_field_types(type_expr, namespace, out),
            _ => {}
        },
        _ => {}
    }
}

/// Collect the full names of named types declared inline anywhere below the
/// top-level definition. A declared `namespace` wins over the enclosing one.
pub fn collect_defined_names(record: &Value, namespace: &str) -> BTreeSet<String> {
    let mut defined = BTreeSet::new();
    if let Some(fields) = record.get("fields").and_then(Value::as_array) {
        for field in fields {
            if let Some(field_type) = field.get("type") {
                collect_declarations(field_type, namespace, &mut defined);
            }
        }
    }
    defined
}

fn collect_declarations(type_expr: &Value, namespace: &str, out: &mut BTreeSet<String>) {
    match type_expr {
        Value::Array(members) => {
            for member in members {
                collect_declarations(member, namespace, out);
            }
        }
        Value::Object(obj) => {
            let kind = obj.get("type");
            match kind.and_then(Value::as_str) {
                Some("record" | "error" | "enum" | "fixed") => {
                    let Some(name) = obj.get("name").and_then(Value::as_str) else {
                        return;
                    };
                    let own_namespace = obj
                        .get("namespace")
                        .and_then(Value::as_str)
                        .unwrap_or(namespace);
                    out.insert(qualify(own_namespace, name));
                    out.extend(collect_defined_names(type_expr, namespace));
                }
                Some("array") => {
                    if let Some(items) = obj.get("items") {
                        collect_declarations(items, namespace, out);
                    }
                }
                Some("map") => {
                    if let Some(values) = obj.get("values") {
                        collect_declarations(values, namespace, out);
                    }
                }
                Some(_) => {}
                None => {
                    if let Some(nested) = kind {
                        collect_declarations(nested, namespace, out);
                    }
                }
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: Value) -> Result<SchemaDefinition> {
        SchemaDefinition::parse("test.avsc", serde_json::to_vec(&value).unwrap())
    }

    #[test]
    fn qualifies_name_with_namespace() {
        let def = parse(json!({"type": "record", "namespace": "geo", "name": "Point", "fields": []}))
            .unwrap();
        assert_eq!(def.name(), "geo.Point");
        assert!(def.dependencies().is_empty());
    }

    #[test]
    fn keeps_already_qualified_name() {
        let def = parse(json!({"type": "record", "namespace": "geo", "name": "other.Point", "fields": []}))
            .unwrap();
        assert_eq!(def.name(), "other.Point");
    }

    #[test]
    fn missing_namespace_leaves_name_unqualified() {
        let def = parse(json!({"type": "record", "name": "Point", "fields": []})).unwrap();
        assert_eq!(def.name(), "Point");
    }

    #[test]
    fn collects_union_array_and_nested_record_references() {
        let def = parse(json!({
            "type": "record",
            "namespace": "geo",
            "name": "Feature",
            "fields": [
                {"name": "id", "type": "string"},
                {"name": "shape", "type": ["null", "Polygon", "geo.Line"]},
                {"name": "points", "type": {"type": "array", "items": "Point"}},
                {"name": "meta", "type": {
                    "type": "record",
                    "name": "Meta",
                    "fields": [
                        {"name": "source", "type": "org.Source"},
                        {"name": "tags", "type": {"type": "array", "items": ["null", "Tag"]}}
                    ]
                }},
                {"name": "lookup", "type": {"type": "map", "values": "Ignored"}},
                {"name": "count", "type": {"type": "int", "logicalType": "date"}}
            ]
        }))
        .unwrap();

        let expected: BTreeSet<String> = ["geo.Line", "geo.Point", "geo.Polygon", "geo.Tag", "org.Source"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(def.dependencies(), &expected);
    }

    #[test]
    fn collects_inline_declarations() {
        let def = parse(json!({
            "type": "record",
            "namespace": "geo",
            "name": "Shape",
            "fields": [
                {"name": "kind", "type": {"type": "enum", "name": "Kind", "symbols": ["A", "B"]}},
                {"name": "again", "type": "Kind"},
                {"name": "hash", "type": ["null", {"type": "fixed", "name": "Hash", "namespace": "crypto", "size": 16}]},
                {"name": "parts", "type": {"type": "array", "items": {
                    "type": "record",
                    "name": "Part",
                    "fields": [{"name": "unit", "type": {"type": "enum", "name": "Unit", "symbols": ["M"]}}]
                }}}
            ]
        }))
        .unwrap();

        let expected: BTreeSet<String> = ["crypto.Hash", "geo.Kind", "geo.Part", "geo.Unit"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(def.defined_names(), &expected);
        assert!(def.dependencies().contains("geo.Kind"));
    }

    #[test]
    fn deduplicates_dependencies() {
        let def = parse(json!({
            "type": "record",
            "namespace": "geo",
            "name": "Line",
            "fields": [
                {"name": "start", "type": "Point"},
                {"name": "end", "type": "geo.Point"},
                {"name": "via", "type": {"type": "array", "items": "Point"}}
            ]
        }))
        .unwrap();
        assert_eq!(def.dependencies().len(), 1);
        assert!(def.dependencies().contains("geo.Point"));
    }

    #[test]
    fn self_reference_is_listed_as_dependency() {
        let def = parse(json!({
            "type": "record",
            "namespace": "tree",
            "name": "Node",
            "fields": [{"name": "children", "type": {"type": "array", "items": "Node"}}]
        }))
        .unwrap();
        assert!(def.dependencies().contains("tree.Node"));
    }

    #[test]
    fn preserves_raw_bytes() {
        let raw = b"{ \"name\" : \"A\",\n  \"type\": \"record\", \"fields\": [] }\n".to_vec();
        let def = SchemaDefinition::parse("a.avsc", raw.clone()).unwrap();
        assert_eq!(def.raw_content(), raw.as_slice());
    }

    #[test]
    fn rejects_malformed_input() {
        let err = SchemaDefinition::parse("bad.avsc", b"{ not json".to_vec()).unwrap_err();
        match err {
            Error::SchemaParse { path, .. } => assert_eq!(path, PathBuf::from("bad.avsc")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_missing_name() {
        let err = parse(json!({"type": "record", "fields": []})).unwrap_err();
        assert!(matches!(err, Error::SchemaParse { .. }));
    }

    #[test]
    fn rejects_non_object_root() {
        let err = parse(json!(["a", "b"])).unwrap_err();
        assert!(matches!(err, Error::SchemaParse { .. }));
    }
}
