//! Schema unit loader.
//!
//! Declaration files are parsed upstream; this module loads the resulting
//! object model from its JSON form.

use crate::declarations::SchemaUnit;
use crate::error::ParseError;
use std::path::Path;

/// Parses a schema unit from a JSON string.
///
/// # Arguments
/// * `json` - Serialized schema unit
///
/// # Returns
/// Parsed unit or parse error.
///
/// # Errors
/// Returns `ParseError` if the JSON is malformed or the unit has no filename.
pub fn parse_unit(json: &str) -> Result<SchemaUnit, ParseError> {
    let unit: SchemaUnit = serde_json::from_str(json)?;
    if unit.filename.trim().is_empty() {
        return Err(ParseError::invalid("schema unit has an empty filename"));
    }
    tracing::debug!(
        "Loaded unit '{}' with {} objects",
        unit.filename,
        unit.objects.len()
    );
    Ok(unit)
}

/// Parses a schema unit from a JSON file.
///
/// When the document does not name its source file, the file stem is used.
///
/// # Errors
/// Returns `ParseError` if reading or parsing fails.
pub fn parse_unit_file(path: &Path) -> Result<SchemaUnit, ParseError> {
    let json = std::fs::read_to_string(path)?;
    let mut value: serde_json::Value = serde_json::from_str(&json)?;
    let needs_filename =
        matches!(&value, serde_json::Value::Object(map) if !map.contains_key("filename"));
    if let (true, serde_json::Value::Object(map)) = (needs_filename, &mut value) {
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| ParseError::invalid(format!("unusable file name: {}", path.display())))?;
        map.insert(
            "filename".to_string(),
            serde_json::Value::String(stem.to_string()),
        );
    }
    parse_unit(&value.to_string())
}
