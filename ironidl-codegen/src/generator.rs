//! Unit orchestration.
//!
//! Generation is two-phase. Every unit of a run is registered in a
//! [`ClassRegistry`] first; only then is any unit emitted, each against the
//! same frozen registry. Emission of one unit never looks at another unit's
//! output, so independent units are emitted in parallel.

use crate::config::GeneratorConfig;
use crate::diagnostics::{Diagnostic, DiagnosticKind, DiagnosticSink};
use crate::error::CodegenError;
use crate::naming::class_name_for;
use crate::resolver::ClassResolver;
use crate::rust::{DictionaryGenerator, InterfaceGenerator};
use crate::templates::{BaseFragment, TemplateSet};
use ironidl_schema::{
    ClassObject, ClassRegistry, DeclaredObject, SchemaUnit, bindable_unit, check_members,
    validate_unit,
};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// Output of one unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedUnit {
    /// Source unit filename.
    pub filename: String,
    /// Class name derived from the filename.
    pub class_name: String,
    /// Generated Rust source.
    pub source: String,
    /// Members and objects that were skipped.
    pub diagnostics: Vec<Diagnostic>,
}

impl GeneratedUnit {
    /// Path of the output file: `<out_dir>/<stem>.<extension>`.
    #[must_use]
    pub fn output_path(&self, out_dir: &Path, extension: &str) -> PathBuf {
        let stem = ironidl_schema::file_stem(&self.filename);
        out_dir.join(format!("{stem}.{extension}"))
    }
}

/// Emits Rust bindings for schema units.
pub struct Generator<'a> {
    registry: &'a ClassRegistry,
    templates: &'a TemplateSet,
    config: &'a GeneratorConfig,
}

impl<'a> Generator<'a> {
    /// Creates a generator over a frozen registry.
    #[must_use]
    pub fn new(
        registry: &'a ClassRegistry,
        templates: &'a TemplateSet,
        config: &'a GeneratorConfig,
    ) -> Self {
        Self {
            registry,
            templates,
            config,
        }
    }

    /// Generates the source of one unit.
    ///
    /// Objects are rendered in declaration order. Members rejected by
    /// [`check_members`] are reported and left out. Blank lines are stripped
    /// once, after the whole file has been assembled.
    ///
    /// # Errors
    /// Returns [`CodegenError::Template`] if rendering fails, or
    /// [`CodegenError::Strict`] if diagnostics were reported in strict mode.
    pub fn generate(&self, unit: &SchemaUnit) -> Result<GeneratedUnit, CodegenError> {
        let resolver = ClassResolver::new(self.registry);
        let interfaces = InterfaceGenerator::new(resolver);
        let dictionaries = DictionaryGenerator::new(resolver);
        let mut sink = DiagnosticSink::new(unit.filename.clone());
        let class_name = class_name_for(unit.stem());

        let mut fragments = Vec::new();
        for object in &unit.objects {
            tracing::debug!("Rendering {} '{}'", object.kind_name(), object.name());
            let fragment = match object {
                DeclaredObject::Interface(class) => {
                    let name = self.object_name(unit, class);
                    let class = checked_class(class, &mut sink);
                    let fragment = interfaces.generate(&class, &name, &mut sink);
                    self.templates.render(&fragment)?
                }
                DeclaredObject::Dictionary(class) => {
                    let name = self.object_name(unit, class);
                    let class = checked_class(class, &mut sink);
                    let fragment = dictionaries.generate(&class, &name, &mut sink);
                    self.templates.render(&fragment)?
                }
                DeclaredObject::GlobalFunction(function) => {
                    tracing::debug!("Skipping free function '{}'", function.name);
                    continue;
                }
                DeclaredObject::Unsupported { kind, name } => {
                    sink.report(
                        name.as_deref().unwrap_or("<anonymous>"),
                        None,
                        DiagnosticKind::UnsupportedObject { kind: kind.clone() },
                    );
                    continue;
                }
            };
            if !fragment.trim().is_empty() {
                fragments.push(fragment);
            }
        }

        if self.config.strict && !sink.is_empty() {
            return Err(CodegenError::Strict {
                unit: unit.filename.clone(),
                count: sink.len(),
            });
        }

        let base = BaseFragment {
            source: unit.filename.clone(),
            class_name: class_name.clone(),
            content: fragments.join("\n"),
        };
        let source = strip_blank_lines(&self.templates.render(&base)?);
        let diagnostics = sink.into_vec();

        tracing::info!(
            "Generated {} from '{}' ({} objects, {} diagnostics)",
            class_name,
            unit.filename,
            fragments.len(),
            diagnostics.len()
        );

        Ok(GeneratedUnit {
            filename: unit.filename.clone(),
            class_name,
            source,
            diagnostics,
        })
    }

    /// Name a class of `unit` is emitted under.
    fn object_name(&self, unit: &SchemaUnit, class: &ClassObject) -> String {
        let resolver = ClassResolver::new(self.registry);
        resolver.emitted_name(&class.name).unwrap_or_else(|| {
            // Not registered: the unit is generated on its own.
            let is_primary = unit
                .classes()
                .next()
                .is_some_and(|first| first.name == class.name);
            let derived = class_name_for(unit.stem());
            if is_primary && !derived.is_empty() {
                derived
            } else {
                class.name.clone()
            }
        })
    }
}

/// Drops the members of `class` that cannot be bound and reports each one.
fn checked_class(class: &ClassObject, sink: &mut DiagnosticSink) -> ClassObject {
    let (checked, issues) = check_members(class);
    for issue in issues {
        let member = Some(issue.member.as_str()).filter(|m| !m.trim().is_empty());
        sink.report(
            &class.name,
            member,
            DiagnosticKind::InvalidMember { issue: issue.kind },
        );
    }
    checked
}

/// Generates every unit of a run.
///
/// Units are validated, registered together, then emitted against the
/// frozen registry. The result keeps the input order. Only problems that
/// keep a unit out of the registry are fatal; member-level problems become
/// diagnostics of their unit.
///
/// # Errors
/// Returns the first validation, registry, template or strict-mode error.
pub fn generate_all(
    units: &[SchemaUnit],
    templates: &TemplateSet,
    config: &GeneratorConfig,
) -> Result<Vec<GeneratedUnit>, CodegenError> {
    for unit in units {
        validate_unit(unit)?;
    }
    let bindable: Vec<SchemaUnit> = units.iter().map(bindable_unit).collect();
    let registry = ClassRegistry::build(&bindable)?;
    tracing::info!(
        "Registered {} classes from {} units",
        registry.len(),
        units.len()
    );

    let generator = Generator::new(&registry, templates, config);
    if config.parallel {
        units.par_iter().map(|unit| generator.generate(unit)).collect()
    } else {
        units.iter().map(|unit| generator.generate(unit)).collect()
    }
}

/// Removes every line that is empty or only whitespace.
#[must_use]
pub fn strip_blank_lines(source: &str) -> String {
    let mut output = String::with_capacity(source.len());
    for line in source.lines().filter(|line| !line.trim().is_empty()) {
        output.push_str(line);
        output.push('\n');
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use ironidl_schema::{Attribute, FunctionObject, MemberIssueKind, Operation, ParameterType};

    fn dom_point() -> SchemaUnit {
        SchemaUnit::new("domPoint").with_object(DeclaredObject::Interface(
            ClassObject::new("DOMPoint")
                .with_attribute(Attribute::readonly("x", ParameterType::Double))
                .with_attribute(Attribute::readonly("y", ParameterType::Double)),
        ))
    }

    #[test]
    fn test_strip_blank_lines() {
        assert_eq!(strip_blank_lines("a\n\n  \nb\n\t\nc"), "a\nb\nc\n");
        assert_eq!(strip_blank_lines(""), "");
    }

    #[test]
    fn test_generate_dom_point() {
        let templates = TemplateSet::builtin().expect("templates");
        let config = GeneratorConfig::default();
        let units = vec![dom_point()];
        let generated = generate_all(&units, &templates, &config).expect("generate");

        let unit = &generated[0];
        assert_eq!(unit.class_name, "DOMPoint");
        assert!(unit.diagnostics.is_empty());
        assert!(unit.source.contains("pub struct DOMPoint {"));
        assert!(unit
            .source
            .contains("pub x: extern \"C\" fn(*const OpaquePtr) -> c_double,"));
        assert!(unit
            .source
            .contains("pub fn y(&self) -> Result<f64, BoundaryError> {"));
        assert!(!unit.source.lines().any(|line| line.trim().is_empty()));
    }

    #[test]
    fn test_generate_is_deterministic() {
        let templates = TemplateSet::builtin().expect("templates");
        let config = GeneratorConfig::default();
        let units = vec![dom_point()];
        let first = generate_all(&units, &templates, &config).expect("first");
        let second = generate_all(&units, &templates, &config.clone().with_parallel(false))
            .expect("second");
        assert_eq!(first, second);
    }

    #[test]
    fn test_free_functions_and_unsupported_objects() {
        let unit = dom_point()
            .with_object(DeclaredObject::GlobalFunction(FunctionObject {
                name: "alert".to_string(),
                arguments: Vec::new(),
                return_type: ParameterType::Void,
            }))
            .with_object(DeclaredObject::Unsupported {
                kind: "typedef".to_string(),
                name: Some("Callback".to_string()),
            });
        let templates = TemplateSet::builtin().expect("templates");
        let config = GeneratorConfig::default();
        let generated = generate_all(&[unit], &templates, &config).expect("generate");

        assert!(!generated[0].source.contains("alert"));
        assert_eq!(generated[0].diagnostics.len(), 1);
        assert_eq!(generated[0].diagnostics[0].object, "Callback");
    }

    #[test]
    fn test_strict_mode() {
        let unit = dom_point().with_object(DeclaredObject::Unsupported {
            kind: "enum".to_string(),
            name: None,
        });
        let templates = TemplateSet::builtin().expect("templates");
        let config = GeneratorConfig::default().with_strict(true);
        let result = generate_all(&[unit], &templates, &config);
        assert!(matches!(result, Err(CodegenError::Strict { count: 1, .. })));
    }

    #[test]
    fn test_unregistered_unit_uses_derived_name() {
        let registry = ClassRegistry::default();
        let templates = TemplateSet::builtin().expect("templates");
        let config = GeneratorConfig::default();
        let generator = Generator::new(&registry, &templates, &config);

        let unit = SchemaUnit::new("dom_rect").with_object(DeclaredObject::Interface(
            ClassObject::new("Rect")
                .with_attribute(Attribute::readonly("width", ParameterType::Double)),
        ));
        let generated = generator.generate(&unit).expect("generate");
        assert!(generated.source.contains("pub struct DOMRect {"));
        assert!(generated.source.contains("pub const CLASS_NAME: &'static str = \"Rect\";"));
    }

    #[test]
    fn test_member_conflict_does_not_stop_other_units() {
        let node = SchemaUnit::new("node").with_object(DeclaredObject::Interface(
            ClassObject::new("Node")
                .with_attribute(Attribute::readonly("nodeName", ParameterType::DomString)),
        ));
        let element = SchemaUnit::new("element").with_object(DeclaredObject::Interface(
            ClassObject::new("Element")
                .with_parent("Node")
                .with_attribute(Attribute::new("id", ParameterType::DomString))
                .with_attribute(Attribute::readonly("id", ParameterType::Double))
                .with_operation(Operation::new("id", ParameterType::DomString))
                .with_operation(Operation::new("remove", ParameterType::Void)),
        ));
        let templates = TemplateSet::builtin().expect("templates");
        let config = GeneratorConfig::default();
        let generated = generate_all(&[node, element], &templates, &config).expect("generate");

        assert!(generated[0].diagnostics.is_empty());
        assert!(generated[0].source.contains("pub struct Node {"));

        let element = &generated[1];
        let issues: Vec<&DiagnosticKind> = element.diagnostics.iter().map(|d| &d.kind).collect();
        assert_eq!(
            issues,
            vec![
                &DiagnosticKind::InvalidMember {
                    issue: MemberIssueKind::DuplicateAttribute
                },
                &DiagnosticKind::InvalidMember {
                    issue: MemberIssueKind::ShadowsAttribute
                },
            ]
        );
        assert!(element.source.contains("pub fn id(&self) -> Result<String, BoundaryError> {"));
        assert!(element.source.contains("pub fn set_id(&self, value: &str"));
        assert!(!element.source.contains("id_2"));
        assert!(element.source.contains("pub fn remove(&self, exception_state: &ExceptionState)"));
        assert!(element.source.contains("impl std::ops::Deref for Element {"));
    }

    #[test]
    fn test_member_conflict_fails_strict_mode() {
        let unit = dom_point().with_object(DeclaredObject::Dictionary(
            ClassObject::new("DOMPointInit")
                .with_attribute(Attribute::new("x", ParameterType::Double))
                .with_attribute(Attribute::new("x", ParameterType::Double)),
        ));
        let templates = TemplateSet::builtin().expect("templates");
        let config = GeneratorConfig::default().with_strict(true);
        let result = generate_all(&[unit], &templates, &config);
        assert!(matches!(result, Err(CodegenError::Strict { count: 1, .. })));
    }

    #[test]
    fn test_output_path() {
        let unit = GeneratedUnit {
            filename: "dom/dom_point.d.ts".to_string(),
            class_name: "DOMPoint".to_string(),
            source: String::new(),
            diagnostics: Vec::new(),
        };
        assert_eq!(
            unit.output_path(Path::new("/out"), "rs"),
            PathBuf::from("/out/dom_point.rs")
        );
    }
}
