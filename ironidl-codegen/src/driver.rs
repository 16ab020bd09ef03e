//! File system driver.
//!
//! The generator itself is pure. This module reads schema units and
//! template overrides from disk and writes the generated files, for use from
//! build scripts and tools.

use crate::config::GeneratorConfig;
use crate::error::CodegenError;
use crate::generator::{GeneratedUnit, generate_all};
use crate::templates::{TemplateKind, TemplateSet};
use ironidl_schema::{SchemaUnit, parse_unit_file};
use std::path::{Path, PathBuf};

/// Loads schema units from JSON files, in the given order.
///
/// # Errors
/// Returns [`CodegenError::Parse`] for the first file that fails to load.
pub fn load_units<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<SchemaUnit>, CodegenError> {
    paths
        .iter()
        .map(|path| {
            let path = path.as_ref();
            tracing::debug!("Loading unit {}", path.display());
            parse_unit_file(path).map_err(CodegenError::from)
        })
        .collect()
}

/// Loads the template set for a configuration.
///
/// Files named `<kind>.rs.tpl` in the configured template directory replace
/// the matching built-in template.
///
/// # Errors
/// Returns [`CodegenError::Io`] if an override cannot be read and
/// [`CodegenError::Template`] if any template is malformed.
pub fn load_templates(config: &GeneratorConfig) -> Result<TemplateSet, CodegenError> {
    let Some(dir) = &config.template_dir else {
        return TemplateSet::builtin();
    };

    let mut overrides = Vec::new();
    for kind in TemplateKind::ALL {
        let path = dir.join(kind.file_name());
        if path.is_file() {
            tracing::info!("Using template override {}", path.display());
            overrides.push((kind, std::fs::read_to_string(&path)?));
        }
    }
    TemplateSet::from_sources(|kind| {
        overrides
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, source)| source.clone())
    })
}

/// Writes generated units to `out_dir`, creating it if needed.
///
/// # Returns
/// Paths of the written files, in unit order.
///
/// # Errors
/// Returns [`CodegenError::Io`] if a directory or file cannot be written.
pub fn write_units(
    units: &[GeneratedUnit],
    out_dir: &Path,
    extension: &str,
) -> Result<Vec<PathBuf>, CodegenError> {
    std::fs::create_dir_all(out_dir)?;
    let mut written = Vec::with_capacity(units.len());
    for unit in units {
        let path = unit.output_path(out_dir, extension);
        std::fs::write(&path, &unit.source)?;
        tracing::debug!("Wrote {}", path.display());
        written.push(path);
    }
    Ok(written)
}

/// Loads, generates and writes a set of schema files.
///
/// # Arguments
/// * `inputs` - JSON schema unit files
/// * `out_dir` - Output directory
/// * `config` - Generator configuration
///
/// # Returns
/// The generated units, in input order.
///
/// # Errors
/// Returns `CodegenError` if loading, generation or writing fails.
pub fn generate_from_files<P: AsRef<Path>>(
    inputs: &[P],
    out_dir: &Path,
    config: &GeneratorConfig,
) -> Result<Vec<GeneratedUnit>, CodegenError> {
    let units = load_units(inputs)?;
    let templates = load_templates(config)?;
    let generated = generate_all(&units, &templates, config)?;
    write_units(&generated, out_dir, &config.extension)?;
    Ok(generated)
}
