//! Dictionary value type generation.
//!
//! A dictionary becomes three types: the value struct used from Rust, a
//! `#[repr(C)]` raw struct matching the native layout, and a native owner
//! that keeps the string buffers referenced by the raw struct alive.
//! Inherited fields are flattened into all three.

use super::classifier::{Surface, classify};
use super::conversions::{from_raw_field, to_raw_field};
use super::{TypeUse, resolve_type};
use crate::diagnostics::{DiagnosticKind, DiagnosticSink};
use crate::naming::{UniqueNames, rust_identifier};
use crate::resolver::ClassResolver;
use crate::templates::DictionaryFragment;
use ironidl_schema::ClassObject;

/// Generator for dictionary types.
pub struct DictionaryGenerator<'a> {
    resolver: ClassResolver<'a>,
}

impl<'a> DictionaryGenerator<'a> {
    /// Creates a new dictionary generator.
    #[must_use]
    pub fn new(resolver: ClassResolver<'a>) -> Self {
        Self { resolver }
    }

    /// Builds the fragment for `class`, emitted as `object_name`.
    ///
    /// A broken inheritance chain is reported and the resolvable fields are
    /// still emitted. Operations have no meaning on a dictionary and are
    /// ignored.
    pub fn generate(
        &self,
        class: &ClassObject,
        object_name: &str,
        sink: &mut DiagnosticSink,
    ) -> DictionaryFragment {
        let mut fragment = DictionaryFragment {
            object_name: object_name.to_string(),
            class_name: class.name.clone(),
            ..DictionaryFragment::default()
        };

        let resolved = self.resolver.dictionary_fields(class);
        if let Some(parent) = resolved.unresolved {
            sink.report(&class.name, None, DiagnosticKind::UnresolvedParent { parent });
        }

        let mut names = UniqueNames::default();
        for (declared, attribute) in resolved.fields {
            let ty = match resolve_type(&self.resolver, &attribute.ty, TypeUse::Field) {
                Ok(ty) => ty,
                Err(kind) => {
                    sink.report(&class.name, Some(declared), kind);
                    continue;
                }
            };
            let field = names.allocate(&rust_identifier(declared));

            fragment.fields.push_str(&format!(
                "    pub {}: {},\n",
                field,
                classify(&ty, Surface::MethodReturn)
            ));
            fragment.raw_fields.push_str(&format!(
                "    pub {}: {},\n",
                field,
                classify(&ty, Surface::PublicReturn)
            ));

            let conversion = to_raw_field(&field, &ty);
            if let Some(prelude) = conversion.prelude {
                for line in prelude.lines() {
                    fragment.to_native_body.push_str(&format!("        {line}\n"));
                }
            }
            fragment
                .raw_init
                .push_str(&format!("                {}: {},\n", field, conversion.expr));
            fragment.from_raw_fields.push_str(&format!(
                "            {}: {},\n",
                field,
                from_raw_field(&field, &ty)
            ));
        }

        fragment
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ironidl_schema::{Attribute, ClassRegistry, DeclaredObject, ParameterType, SchemaUnit};

    fn registry() -> ClassRegistry {
        let units = vec![
            SchemaUnit::new("event_init").with_object(DeclaredObject::Dictionary(
                ClassObject::new("EventInit")
                    .with_attribute(Attribute::new("bubbles", ParameterType::Boolean))
                    .with_attribute(Attribute::new("composed", ParameterType::Boolean)),
            )),
            SchemaUnit::new("custom_event_init").with_object(DeclaredObject::Dictionary(
                ClassObject::new("CustomEventInit")
                    .with_parent("EventInit")
                    .with_attribute(Attribute::new("detail", ParameterType::Any))
                    .with_attribute(Attribute::new("composed", ParameterType::Int32))
                    .with_attribute(Attribute::new("type", ParameterType::DomString))
                    .with_attribute(Attribute::new("target", ParameterType::pointer("EventInit"))),
            )),
        ];
        ClassRegistry::build(&units).expect("registry")
    }

    #[test]
    fn test_inherited_fields_with_override() {
        let registry = registry();
        let generator = DictionaryGenerator::new(ClassResolver::new(&registry));
        let class = registry.object("CustomEventInit").expect("class");
        let mut sink = DiagnosticSink::new("custom_event_init");

        let fragment = generator.generate(class, "CustomEventInit", &mut sink);
        assert_eq!(
            fragment.fields,
            "    pub bubbles: bool,\n    pub composed: i64,\n    pub detail: ScriptValueRef,\n    pub type_: String,\n"
        );
        assert_eq!(
            fragment.raw_fields,
            "    pub bubbles: Boolean,\n    pub composed: i64,\n    pub detail: RustValue<ScriptValueRefRustMethods>,\n    pub type_: *const c_char,\n"
        );

        let diagnostics = sink.into_vec();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].member.as_deref(), Some("target"));
    }

    #[test]
    fn test_conversion_bodies() {
        let registry = registry();
        let generator = DictionaryGenerator::new(ClassResolver::new(&registry));
        let class = registry.object("CustomEventInit").expect("class");
        let mut sink = DiagnosticSink::new("custom_event_init");

        let fragment = generator.generate(class, "CustomEventInit", &mut sink);
        assert!(fragment
            .to_native_body
            .contains("        let type__buffer = to_native_string(&self.type_)?;\n"));
        assert!(fragment.raw_init.contains("type_: type__ptr,"));
        assert!(fragment.raw_init.contains("bubbles: Boolean::from(self.bubbles),"));
        assert!(fragment.raw_init.contains("detail: self.detail.to_rust_value(),"));
        assert!(fragment
            .from_raw_fields
            .contains("type_: unsafe { copy_native_string(raw.type_) }?,"));
        assert!(fragment.from_raw_fields.contains("bubbles: raw.bubbles != 0,"));
    }

    #[test]
    fn test_unresolved_parent_reported() {
        let registry = ClassRegistry::default();
        let generator = DictionaryGenerator::new(ClassResolver::new(&registry));
        let class = ClassObject::new("MouseEventInit")
            .with_parent("UIEventInit")
            .with_attribute(Attribute::new("clientX", ParameterType::Double));
        let mut sink = DiagnosticSink::new("mouse_event_init");

        let fragment = generator.generate(&class, "MouseEventInit", &mut sink);
        assert_eq!(fragment.fields, "    pub client_x: f64,\n");
        assert_eq!(
            sink.into_vec()[0].kind,
            DiagnosticKind::UnresolvedParent {
                parent: "UIEventInit".to_string()
            }
        );
    }
}
