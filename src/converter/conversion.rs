use serde_json::{Map, Value};
use tracing::warn;

use crate::avro::{is_primitive, namespace_of, qualify};
use crate::converter::references::definition_ref;
use crate::converter::state::AvroToJsonConverter;
use crate::converter::structs::{
    create_array_type, create_enum_type, create_fixed_type, create_map_type, create_object_type,
};
use crate::converter::types::avro_primitive_to_json_type;
use crate::converter::unions::create_one_of;
use crate::error::ConversionError;

impl AvroToJsonConverter {
    /// Convert one Avro type expression into JSON Schema.
    ///
    /// Named types are registered in [`AvroToJsonConverter::definitions`] and
    /// replaced by a `$ref`. `namespace` is the enclosing namespace used to
    /// qualify relative names.
    pub fn convert_type(&mut self, avro_type: &Value, namespace: &str) -> Result<Value, ConversionError> {
        match avro_type {
            Value::String(name) => Ok(self.convert_type_name(name, namespace)),
            Value::Array(members) => {
                let converted = members
                    .iter()
                    .map(|member| self.convert_type(member, namespace))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(create_one_of(converted))
            }
            Value::Object(obj) => match obj.get("type") {
                Some(Value::String(kind)) => match kind.as_str() {
                    "record" | "error" | "enum" | "fixed" => self.convert_named_type(obj, kind, namespace),
                    "array" => {
                        let items = obj
                            .get("items")
                            .ok_or_else(|| invalid("array without \"items\"", avro_type))?;
                        Ok(create_array_type(self.convert_type(items, namespace)?))
                    }
                    "map" => {
                        let values = obj
                            .get("values")
                            .ok_or_else(|| invalid("map without \"values\"", avro_type))?;
                        Ok(create_map_type(self.convert_type(values, namespace)?))
                    }
                    // Primitives with attributes, e.g. logical types.
                    other => Ok(self.convert_type_name(other, namespace)),
                },
                Some(nested @ (Value::Object(_) | Value::Array(_))) => self.convert_type(nested, namespace),
                _ => Err(invalid("missing \"type\"", avro_type)),
            },
            _ => Err(invalid("unsupported type expression", avro_type)),
        }
    }

    fn convert_type_name(&mut self, name: &str, namespace: &str) -> Value {
        if let Some(primitive) = avro_primitive_to_json_type(name) {
            return primitive;
        }
        let fullname = qualify(namespace, name);
        if !self.is_defined(&fullname) {
            warn!(reference = %fullname, "referenced type is not defined in the combined document");
        }
        definition_ref(&fullname)
    }

    fn convert_named_type(
        &mut self,
        obj: &Map<String, Value>,
        kind: &str,
        namespace: &str,
    ) -> Result<Value, ConversionError> {
        let schema = Value::Object(obj.clone());
        let name = obj
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| invalid("named type without \"name\"", &schema))?;
        if is_primitive(name) {
            return Err(invalid("named type shadows a primitive", &schema));
        }
        let own_namespace = obj
            .get("namespace")
            .and_then(Value::as_str)
            .unwrap_or(namespace);
        let fullname = qualify(own_namespace, name);
        if self.is_defined(&fullname) {
            return Err(ConversionError::Redefined(fullname));
        }
        self.definitions.insert(fullname.clone(), Value::Null);

        let doc = obj.get("doc").and_then(Value::as_str);
        let converted = match kind {
            "enum" => {
                let symbols = obj
                    .get("symbols")
                    .and_then(Value::as_array)
                    .ok_or_else(|| invalid("enum without \"symbols\"", &schema))?;
                create_enum_type(symbols, doc)
            }
            "fixed" => {
                let size = obj
                    .get("size")
                    .and_then(Value::as_u64)
                    .ok_or_else(|| invalid("fixed without \"size\"", &schema))?;
                create_fixed_type(size)
            }
            _ => self.convert_record(obj, namespace_of(&fullname), doc, &schema)?,
        };

        self.definitions.insert(fullname.clone(), converted);
        Ok(definition_ref(&fullname))
    }

    fn convert_record(
        &mut self,
        obj: &Map<String, Value>,
        namespace: &str,
        doc: Option<&str>,
        schema: &Value,
    ) -> Result<Value, ConversionError> {
        let fields = obj
            .get("fields")
            .and_then(Value::as_array)
            .ok_or_else(|| invalid("record without \"fields\"", schema))?;

        let mut properties = Map::new();
        let mut required = Vec::new();
        for field in fields {
            let field_name = field
                .get("name")
                .and_then(Value::as_str)
                .ok_or_else(|| invalid("field without \"name\"", field))?;
            let field_type = field
                .get("type")
                .ok_or_else(|| invalid("field without \"type\"", field))?;
            properties.insert(field_name.to_string(), self.convert_type(field_type, namespace)?);
            if field.get("default").is_none() {
                required.push(field_name.to_string());
            }
        }
        Ok(create_object_type(properties, required, doc))
    }
}

fn invalid(reason: &str, avro_type: &Value) -> ConversionError {
    ConversionError::InvalidType(format!("{reason}: {avro_type}"))
}
