//! # IronIDL Codegen
//!
//! Rust binding generation from interface declarations.
//!
//! This crate provides:
//! - Type classification for the public, method-table and wrapper surfaces
//! - Class name derivation and identifier sanitizing
//! - Parent and pointer resolution against the class registry
//! - Template-driven emission of interfaces and dictionaries
//! - Build script integration

pub mod config;
pub mod diagnostics;
pub mod driver;
pub mod error;
pub mod generator;
pub mod naming;
pub mod resolver;
pub mod rust;
pub mod templates;

pub use config::GeneratorConfig;
pub use diagnostics::{Diagnostic, DiagnosticKind};
pub use driver::generate_from_files;
pub use error::CodegenError;
pub use generator::{GeneratedUnit, Generator, generate_all};
pub use naming::{class_name_for, identifier_for};
pub use templates::TemplateSet;

/// Generates Rust code from serialized schema units.
///
/// All units are generated together, so parents and pointer types may refer
/// to classes declared in any of them.
///
/// # Arguments
/// * `units` - JSON schema units
///
/// # Returns
/// Generated Rust code, one string per unit in input order.
///
/// # Errors
/// Returns `CodegenError` if parsing or generation fails.
pub fn generate_from_json(units: &[&str]) -> Result<Vec<String>, CodegenError> {
    let units = units
        .iter()
        .map(|json| ironidl_schema::parse_unit(json))
        .collect::<Result<Vec<_>, _>>()?;
    let templates = TemplateSet::builtin()?;
    let generated = generate_all(&units, &templates, &GeneratorConfig::default())?;
    Ok(generated.into_iter().map(|unit| unit.source).collect())
}

/// Generates Rust code from a single schema unit file.
///
/// # Arguments
/// * `path` - Path to the JSON schema unit
///
/// # Returns
/// Generated Rust code as a string.
///
/// # Errors
/// Returns `CodegenError` if reading, parsing, or generation fails.
pub fn generate_from_file(path: &std::path::Path) -> Result<String, CodegenError> {
    let unit = ironidl_schema::parse_unit_file(path)?;
    let templates = TemplateSet::builtin()?;
    let mut generated = generate_all(
        std::slice::from_ref(&unit),
        &templates,
        &GeneratorConfig::default(),
    )?;
    generated
        .pop()
        .map(|unit| unit.source)
        .ok_or_else(|| CodegenError::generation("no output for unit"))
}
