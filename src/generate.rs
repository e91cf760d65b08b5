//! The build step: discover schema files, order and merge them, then convert.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::converter::{AvroToJsonSchema, DialectConverter};
use crate::dependency_resolver::{resolve, SchemaDefinition};
use crate::error::{Error, Result};
use crate::merge::write_combined;

/// Options for one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateJsonSchema {
    /// Directory the include pattern is evaluated in.
    pub source_dir: PathBuf,
    /// Glob selecting schema files below `source_dir`.
    pub include: String,
    /// Directory the converted artifact is written to.
    pub out_dir: PathBuf,
    /// Where the intermediate combined document goes.
    pub combined_path: PathBuf,
    /// Fail on references to types no input file defines.
    pub strict: bool,
}

impl Default for GenerateJsonSchema {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("src/main/resources"),
            include: "**/*.avsc".to_string(),
            out_dir: PathBuf::from("build/generated/resources"),
            combined_path: PathBuf::from("build/tmp/generateJsonSchema/combined.avsc"),
            strict: false,
        }
    }
}

impl GenerateJsonSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read schema files from `dir`.
    pub fn from(mut self, dir: impl Into<PathBuf>) -> Self {
        self.source_dir = dir.into();
        self
    }

    pub fn include(mut self, pattern: impl Into<String>) -> Self {
        self.include = pattern.into();
        self
    }

    /// Write the converted artifact into `dir`.
    pub fn into(mut self, dir: impl Into<PathBuf>) -> Self {
        self.out_dir = dir.into();
        self
    }

    pub fn combined_at(mut self, path: impl Into<PathBuf>) -> Self {
        self.combined_path = path.into();
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Full glob pattern: the escaped `source_dir` joined with `include`.
    pub fn pattern(&self) -> String {
        let source_dir = glob::Pattern::escape(&self.source_dir.to_string_lossy());
        Path::new(&source_dir)
            .join(&self.include)
            .to_string_lossy()
            .into_owned()
    }

    /// List the matching schema files in path order.
    pub fn discover(&self) -> Result<Vec<PathBuf>> {
        let pattern = self.pattern();
        let mut files = Vec::new();
        for entry in glob::glob(&pattern)? {
            let path = entry.map_err(|e| {
                let path = e.path().to_path_buf();
                Error::io(path, e.into_error())
            })?;
            if path.is_file() {
                files.push(path);
            }
        }
        if files.is_empty() {
            return Err(Error::NoSchemaFiles { pattern });
        }
        files.sort();
        Ok(files)
    }

    /// Parse the discovered files and put them in merge order.
    pub fn sorted_definitions(&self) -> Result<Vec<SchemaDefinition>> {
        let definitions = self
            .discover()?
            .iter()
            .map(SchemaDefinition::from_file)
            .collect::<Result<Vec<_>>>()?;
        let sorted = resolve(definitions, self.strict)?;
        for line in dependency_report(&sorted) {
            info!("{line}");
        }
        Ok(sorted)
    }

    /// Run with the bundled Avro → JSON Schema converter.
    pub fn run(&self) -> Result<PathBuf> {
        self.run_with(&AvroToJsonSchema)
    }

    /// Order, merge and convert; returns the path of the converted artifact.
    pub fn run_with(&self, converter: &dyn DialectConverter) -> Result<PathBuf> {
        let sorted = self.sorted_definitions()?;
        write_combined(&sorted, &self.combined_path)?;
        info!(path = %self.combined_path.display(), files = sorted.len(), "wrote combined schema");

        let output = converter.convert(&self.combined_path, &self.out_dir)?;
        info!(path = %output.display(), "wrote converted schema");
        Ok(output)
    }
}

/// Lines logged after sorting: each file's dependencies in merge order,
/// then the merge order itself.
fn dependency_report(sorted: &[SchemaDefinition]) -> Vec<String> {
    let mut lines = Vec::new();
    for definition in sorted {
        lines.push(format!("{} depends on:", definition.name()));
        lines.extend(definition.dependencies().iter().map(|d| format!("  - {d}")));
    }
    lines.push("sorted files:".to_string());
    lines.extend(sorted.iter().map(|d| format!("  - {}", d.path().display())));
    lines
}
