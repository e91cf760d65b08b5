//! Merge ordered schema files into one Avro document.
//!
//! The combined document is a JSON list whose items are the original file
//! contents, byte for byte, in merge order.

use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::dependency_resolver::SchemaDefinition;
use crate::error::{Error, Result};

const LIST_OPEN: &[u8] = b"[\n";
const ITEM_SEPARATOR: &[u8] = b",\n";
const LIST_CLOSE: &[u8] = b"]\n";

/// Join raw definitions into a bracketed, comma-separated list.
pub fn combine<'a, I>(items: I) -> Vec<u8>
where
    I: IntoIterator<Item = &'a [u8]>,
{
    let mut combined = LIST_OPEN.to_vec();
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            combined.extend_from_slice(ITEM_SEPARATOR);
        }
        combined.extend_from_slice(item);
    }
    combined.extend_from_slice(LIST_CLOSE);
    combined
}

/// Write the combined document for `sorted` to `path`, replacing any existing file.
///
/// Missing parent directories are created. The content goes to a temporary
/// file next to `path` first and is renamed into place once fully written,
/// so `path` never holds a partial document.
pub fn write_combined(sorted: &[SchemaDefinition], path: &Path) -> Result<()> {
    let combined = combine(sorted.iter().map(SchemaDefinition::raw_content));

    let parent = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;

    let mut tmp = NamedTempFile::new_in(parent).map_err(|e| Error::io(parent, e))?;
    tmp.write_all(&combined).map_err(|e| Error::io(tmp.path(), e))?;
    tmp.as_file().sync_all().map_err(|e| Error::io(tmp.path(), e))?;
    tmp.persist(path).map_err(|e| Error::io(path, e.error))?;
    Ok(())
}
