//! # avsc2jsonschema
//!
//! Order a batch of [Apache Avro](https://avro.apache.org/) schema files so
//! that every named type is defined before it is referenced, merge them into
//! one Avro document, and convert that document to
//! [JSON Schema](https://json-schema.org/).
//!
//! ## Features
//!
//! - Extracts type references from fields, unions, arrays and nested records
//! - Builds a dependency graph; references to types outside the batch are
//!   treated as externally defined (or rejected in strict mode)
//! - Deterministic topological sort (Kahn's algorithm, ties broken by name)
//!   with explicit cycle reporting
//! - Byte-preserving merge into a single `[...]` document, written atomically
//! - Avro → JSON Schema conversion into `schema-definitions.json`
//! - CLI tool `avsc2jsonschema`
//!
//! ## Example (Programmatic Usage)
//!
//! ```no_run
//! use avsc2jsonschema::generate::GenerateJsonSchema;
//!
//! let output = GenerateJsonSchema::new()
//!     .from("schemas")
//!     .include("**/*.avsc")
//!     .into("build/json-schema")
//!     .run()?;
//! println!("wrote {}", output.display());
//! # Ok::<(), avsc2jsonschema::Error>(())
//! ```
//!
//! Ordering without conversion:
//!
//! ```
//! use avsc2jsonschema::dependency_resolver::{resolve, SchemaDefinition};
//!
//! let point = SchemaDefinition::parse(
//!     "Point.avsc",
//!     br#"{"type":"record","namespace":"geo","name":"Point","fields":[]}"#.to_vec(),
//! )?;
//! let polygon = SchemaDefinition::parse(
//!     "Polygon.avsc",
//!     br#"{"type":"record","namespace":"geo","name":"Polygon",
//!          "fields":[{"name":"points","type":{"type":"array","items":"geo.Point"}}]}"#.to_vec(),
//! )?;
//!
//! let sorted = resolve(vec![polygon, point], false)?;
//! let names: Vec<&str> = sorted.iter().map(|d| d.name()).collect();
//! assert_eq!(names, ["geo.Point", "geo.Polygon"]);
//! # Ok::<(), avsc2jsonschema::Error>(())
//! ```
//!
//! ## Example (CLI)
//!
//! ```bash
//! avsc2jsonschema src/main/resources --out-dir build/generated/resources
//! ```
//!
//! ## Crate Layout
//!
//! - [`avro`] — Avro primitive names and name qualification
//! - [`dependency_resolver`] — Parsing, dependency graph and topological sort
//! - [`merge`] — Combined document construction
//! - [`converter`] — Avro → JSON Schema conversion
//! - [`generate`] — The end-to-end build step
//!
//! The CLI binary is enabled with the `cli` feature (on by default).
pub mod avro;
pub mod converter;
pub mod dependency_resolver;
pub mod error;
pub mod generate;
pub mod merge;

pub use error::{ConversionError, Error, Result};
