//! Class model resolution against the frozen registry.
//!
//! Parents and pointer types name classes by their declared name. The
//! resolver looks them up in the [`ClassRegistry`] and maps them to the name
//! the class is emitted under: the primary class of a unit is named after the
//! unit's file, every other class keeps its declared name.

use crate::naming::class_name_for;
use indexmap::IndexMap;
use ironidl_schema::{Attribute, ClassKind, ClassObject, ClassRegistry, file_stem};
use std::collections::HashSet;

/// Outcome of a parent lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum ParentResolution<'a> {
    /// The class has no parent.
    Root,
    /// Parent found.
    Resolved {
        /// Emitted parent name.
        name: String,
        /// Parent declaration.
        object: &'a ClassObject,
    },
    /// Parent named but missing from the registry.
    Unresolved(String),
}

/// Outcome of a pointer type lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PointerResolution {
    /// Interface class, carrying its emitted name.
    Interface(String),
    /// Dictionaries have no method table and cannot be pointed to.
    Dictionary(String),
    /// Class missing from the registry.
    Unresolved,
}

/// Inherited field set of a dictionary.
#[derive(Debug, Clone)]
pub struct DictionaryFields<'a> {
    /// Fields, root ancestor first. Overrides keep the inherited position.
    pub fields: IndexMap<&'a str, &'a Attribute>,
    /// First missing ancestor, if the chain is broken.
    pub unresolved: Option<String>,
}

/// Resolves class references for emission.
#[derive(Debug, Clone, Copy)]
pub struct ClassResolver<'a> {
    registry: &'a ClassRegistry,
}

impl<'a> ClassResolver<'a> {
    /// Creates a resolver over a frozen registry.
    #[must_use]
    pub fn new(registry: &'a ClassRegistry) -> Self {
        Self { registry }
    }

    /// Returns the emitted name of a registered class.
    #[must_use]
    pub fn emitted_name(&self, declared: &str) -> Option<String> {
        let class = self.registry.get(declared)?;
        if class.primary {
            let name = class_name_for(file_stem(&class.unit));
            if !name.is_empty() {
                return Some(name);
            }
        }
        Some(class.object.name.clone())
    }

    /// Looks up the parent of `object`.
    #[must_use]
    pub fn resolve_parent(&self, object: &ClassObject) -> ParentResolution<'a> {
        let Some(parent) = object.parent.as_deref() else {
            return ParentResolution::Root;
        };
        match (self.registry.object(parent), self.emitted_name(parent)) {
            (Some(object), Some(name)) => ParentResolution::Resolved { name, object },
            _ => ParentResolution::Unresolved(parent.to_string()),
        }
    }

    /// Looks up the class named by a pointer type.
    #[must_use]
    pub fn resolve_pointer(&self, class: &str) -> PointerResolution {
        let (Some(registered), Some(name)) = (self.registry.get(class), self.emitted_name(class))
        else {
            return PointerResolution::Unresolved;
        };
        match registered.kind {
            ClassKind::Interface => PointerResolution::Interface(name),
            ClassKind::Dictionary => PointerResolution::Dictionary(name),
        }
    }

    /// Walks the resolvable ancestors of `object`, nearest first.
    ///
    /// Stops at the first missing parent and never loops.
    #[must_use]
    pub fn ancestors(&self, object: &ClassObject) -> Vec<&'a ClassObject> {
        let mut chain = Vec::new();
        let mut seen = HashSet::from([object.name.clone()]);
        let mut current = object.parent.as_deref();
        while let Some(name) = current {
            let Some(parent) = self.registry.object(name) else {
                break;
            };
            if !seen.insert(parent.name.clone()) {
                break;
            }
            chain.push(parent);
            current = parent.parent.as_deref();
        }
        chain
    }

    /// Computes the fields of a dictionary including inherited ones.
    ///
    /// Ancestor fields come first in ancestor order, then own fields. A field
    /// redeclared by a descendant replaces the inherited one in place.
    #[must_use]
    pub fn dictionary_fields<'b>(&self, object: &'b ClassObject) -> DictionaryFields<'b>
    where
        'a: 'b,
    {
        let ancestors = self.ancestors(object);
        let last = ancestors.last().copied().unwrap_or(object);
        let unresolved = last
            .parent
            .as_deref()
            .filter(|parent| !self.registry.contains(parent))
            .map(str::to_string);

        let mut fields: IndexMap<&'b str, &'b Attribute> = IndexMap::new();
        for class in ancestors.into_iter().rev() {
            for attribute in class.attributes() {
                fields.insert(attribute.name.as_str(), attribute);
            }
        }
        for attribute in object.attributes() {
            fields.insert(attribute.name.as_str(), attribute);
        }

        DictionaryFields { fields, unresolved }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ironidl_schema::{DeclaredObject, ParameterType, SchemaUnit};

    fn registry(units: &[SchemaUnit]) -> ClassRegistry {
        ClassRegistry::build(units).expect("registry")
    }

    fn dictionary_units() -> Vec<SchemaUnit> {
        vec![
            SchemaUnit::new("event_init").with_object(DeclaredObject::Dictionary(
                ClassObject::new("EventInit")
                    .with_attribute(Attribute::new("bubbles", ParameterType::Boolean))
                    .with_attribute(Attribute::new("cancelable", ParameterType::Boolean)),
            )),
            SchemaUnit::new("ui_event_init").with_object(DeclaredObject::Dictionary(
                ClassObject::new("UIEventInit")
                    .with_parent("EventInit")
                    .with_attribute(Attribute::new("detail", ParameterType::Int32)),
            )),
            SchemaUnit::new("mouse_event_init").with_object(DeclaredObject::Dictionary(
                ClassObject::new("MouseEventInit")
                    .with_parent("UIEventInit")
                    .with_attribute(Attribute::new("clientX", ParameterType::Double))
                    .with_attribute(Attribute::new("cancelable", ParameterType::Int64)),
            )),
        ]
    }

    #[test]
    fn test_emitted_names() {
        let units = vec![
            SchemaUnit::new("dom_point")
                .with_object(DeclaredObject::Interface(ClassObject::new("Point")))
                .with_object(DeclaredObject::Dictionary(ClassObject::new("DOMPointInit"))),
        ];
        let registry = registry(&units);
        let resolver = ClassResolver::new(&registry);

        assert_eq!(resolver.emitted_name("Point").as_deref(), Some("DOMPoint"));
        assert_eq!(
            resolver.emitted_name("DOMPointInit").as_deref(),
            Some("DOMPointInit")
        );
        assert_eq!(resolver.emitted_name("Missing"), None);
    }

    #[test]
    fn test_resolve_parent() {
        let units = vec![
            SchemaUnit::new("node")
                .with_object(DeclaredObject::Interface(ClassObject::new("Node"))),
            SchemaUnit::new("element").with_object(DeclaredObject::Interface(
                ClassObject::new("Element").with_parent("Node"),
            )),
        ];
        let registry = registry(&units);
        let resolver = ClassResolver::new(&registry);

        let node = registry.object("Node").expect("node");
        let element = registry.object("Element").expect("element");
        assert_eq!(resolver.resolve_parent(node), ParentResolution::Root);
        assert!(matches!(
            resolver.resolve_parent(element),
            ParentResolution::Resolved { ref name, .. } if name == "Node"
        ));

        let orphan = ClassObject::new("Orphan").with_parent("Missing");
        assert_eq!(
            resolver.resolve_parent(&orphan),
            ParentResolution::Unresolved("Missing".to_string())
        );
    }

    #[test]
    fn test_resolve_pointer() {
        let units = dictionary_units();
        let mut all = units.clone();
        all.push(SchemaUnit::new("element").with_object(DeclaredObject::Interface(
            ClassObject::new("Element"),
        )));
        let registry = registry(&all);
        let resolver = ClassResolver::new(&registry);

        assert_eq!(
            resolver.resolve_pointer("Element"),
            PointerResolution::Interface("Element".to_string())
        );
        assert_eq!(
            resolver.resolve_pointer("EventInit"),
            PointerResolution::Dictionary("EventInit".to_string())
        );
        assert_eq!(resolver.resolve_pointer("Nope"), PointerResolution::Unresolved);
    }

    #[test]
    fn test_ancestors_nearest_first() {
        let units = dictionary_units();
        let registry = registry(&units);
        let resolver = ClassResolver::new(&registry);
        let mouse = registry.object("MouseEventInit").expect("mouse");

        let names: Vec<&str> = resolver
            .ancestors(mouse)
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["UIEventInit", "EventInit"]);
    }

    #[test]
    fn test_dictionary_field_union_with_override() {
        let units = dictionary_units();
        let registry = registry(&units);
        let resolver = ClassResolver::new(&registry);
        let mouse = registry.object("MouseEventInit").expect("mouse");

        let resolved = resolver.dictionary_fields(mouse);
        assert!(resolved.unresolved.is_none());
        let names: Vec<&str> = resolved.fields.keys().copied().collect();
        assert_eq!(names, vec!["bubbles", "cancelable", "detail", "clientX"]);
        assert_eq!(resolved.fields["cancelable"].ty, ParameterType::Int64);
    }

    #[test]
    fn test_dictionary_fields_unresolved_parent() {
        let registry = registry(&[]);
        let resolver = ClassResolver::new(&registry);
        let orphan = ClassObject::new("KeyboardEventInit")
            .with_parent("UIEventInit")
            .with_attribute(Attribute::new("key", ParameterType::DomString));

        let resolved = resolver.dictionary_fields(&orphan);
        assert_eq!(resolved.unresolved.as_deref(), Some("UIEventInit"));
        assert_eq!(resolved.fields.len(), 1);
    }
}
