//! Avro naming vocabulary shared by the resolver and the converter.

/// The built-in Avro primitive type names. Anything else appearing as a
/// bare type name refers to a named type.
pub const PRIMITIVE_TYPES: [&str; 8] = [
    "null", "boolean", "int", "long", "float", "double", "bytes", "string",
];

/// Separator between namespace segments and the local name.
pub const NAME_SEPARATOR: char = '.';

/// Whether `name` is one of the [`PRIMITIVE_TYPES`].
pub fn is_primitive(name: &str) -> bool {
    PRIMITIVE_TYPES.contains(&name)
}

/// Build the full name of a type from a namespace and a (possibly already
/// qualified) name.
///
/// A name containing a `.` is already a full name and is returned as-is.
/// An empty namespace leaves the name unqualified.
pub fn qualify(namespace: &str, name: &str) -> String {
    if name.contains(NAME_SEPARATOR) || namespace.is_empty() {
        name.to_string()
    } else {
        format!("{namespace}{NAME_SEPARATOR}{name}")
    }
}

/// Namespace part of a full name (`""` for unqualified names).
pub fn namespace_of(fullname: &str) -> &str {
    fullname
        .rsplit_once(NAME_SEPARATOR)
        .map(|(ns, _)| ns)
        .unwrap_or("")
}

/// Local part of a full name.
pub fn local_name(fullname: &str) -> &str {
    fullname
        .rsplit_once(NAME_SEPARATOR)
        .map(|(_, name)| name)
        .unwrap_or(fullname)
}
