//! Class registry for cross-unit name resolution.
//!
//! Parent classes and pointer types refer to classes by name, and the
//! referenced class may be declared in any unit of a generation pass. The
//! registry is therefore built in its own phase:
//!
//! 1. [`RegistryBuilder`] collects every interface and dictionary of every
//!    unit. Registration is append-only.
//! 2. [`RegistryBuilder::finish`] checks inheritance chains and freezes the
//!    mapping into a [`ClassRegistry`].
//! 3. Emission only ever reads the frozen registry.

use crate::declarations::{ClassObject, DeclaredObject, SchemaUnit};
use crate::error::SchemaError;
use std::collections::{HashMap, HashSet};

/// Kind of a registered class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassKind {
    /// Interface.
    Interface,
    /// Dictionary.
    Dictionary,
}

/// A class together with where it was declared.
#[derive(Debug, Clone)]
pub struct RegisteredClass {
    /// Interface or dictionary.
    pub kind: ClassKind,
    /// Declaring unit's filename.
    pub unit: String,
    /// True for the first class of its unit, which is named after the unit.
    pub primary: bool,
    /// The declaration.
    pub object: ClassObject,
}

/// Collects classes from all units before emission.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    classes: HashMap<String, RegisteredClass>,
}

impl RegistryBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(
        &mut self,
        kind: ClassKind,
        unit: &str,
        object: &ClassObject,
        primary: bool,
    ) -> Result<(), SchemaError> {
        if let Some(existing) = self.classes.get(&object.name) {
            return Err(SchemaError::DuplicateClass {
                name: object.name.clone(),
                first: existing.unit.clone(),
                second: unit.to_string(),
            });
        }
        tracing::debug!("Registered {:?} '{}' from '{}'", kind, object.name, unit);
        self.classes.insert(
            object.name.clone(),
            RegisteredClass {
                kind,
                unit: unit.to_string(),
                primary,
                object: object.clone(),
            },
        );
        Ok(())
    }

    /// Registers every interface and dictionary of a unit.
    ///
    /// The first class of the unit is marked as its primary class.
    ///
    /// # Errors
    /// Returns [`SchemaError::DuplicateClass`] on name collisions.
    pub fn register_unit(&mut self, unit: &SchemaUnit) -> Result<(), SchemaError> {
        let mut primary = true;
        for object in &unit.objects {
            let (kind, class) = match object {
                DeclaredObject::Interface(c) => (ClassKind::Interface, c),
                DeclaredObject::Dictionary(c) => (ClassKind::Dictionary, c),
                DeclaredObject::GlobalFunction(_) | DeclaredObject::Unsupported { .. } => continue,
            };
            self.insert(kind, &unit.filename, class, primary)?;
            primary = false;
        }
        Ok(())
    }

    /// Freezes the registry.
    ///
    /// # Errors
    /// Returns [`SchemaError::CircularReference`] if an inheritance chain
    /// loops. Parents missing from the registry are not an error here; they
    /// are reported per object during emission.
    pub fn finish(self) -> Result<ClassRegistry, SchemaError> {
        let registry = ClassRegistry {
            classes: self.classes,
        };
        registry.check_cycles()?;
        Ok(registry)
    }
}

/// Frozen mapping from class name to declaration.
#[derive(Debug, Clone, Default)]
pub struct ClassRegistry {
    classes: HashMap<String, RegisteredClass>,
}

impl ClassRegistry {
    /// Builds a registry from every class in `units`.
    ///
    /// # Errors
    /// Returns `SchemaError` on duplicate classes or inheritance cycles.
    pub fn build<'a>(units: impl IntoIterator<Item = &'a SchemaUnit>) -> Result<Self, SchemaError> {
        let mut builder = RegistryBuilder::new();
        for unit in units {
            builder.register_unit(unit)?;
        }
        builder.finish()
    }

    /// Looks up a class by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&RegisteredClass> {
        self.classes.get(name)
    }

    /// Looks up a class declaration by name.
    #[must_use]
    pub fn object(&self, name: &str) -> Option<&ClassObject> {
        self.classes.get(name).map(|c| &c.object)
    }

    /// Returns true if a class with the given name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    /// Number of registered classes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Returns true if nothing was registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Registered class names in sorted order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.classes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    fn check_cycles(&self) -> Result<(), SchemaError> {
        for name in self.names() {
            let mut path = vec![name];
            let mut seen = HashSet::from([name]);
            let mut current = self.object(name).and_then(|c| c.parent.as_deref());
            while let Some(parent) = current {
                path.push(parent);
                if !seen.insert(parent) {
                    return Err(SchemaError::CircularReference {
                        path: path.join(" -> "),
                    });
                }
                current = self.object(parent).and_then(|c| c.parent.as_deref());
            }
        }
        Ok(())
    }
}
