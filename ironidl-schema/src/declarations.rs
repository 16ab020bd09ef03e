//! Declaration definitions for schema units.
//!
//! This module contains the data structures for one declaration file:
//! interfaces, dictionaries, free functions and their members.

use crate::types::{FunctionArgument, ParameterType};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One parsed declaration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaUnit {
    /// Source file name, used to derive the emitted class and file names.
    pub filename: String,
    /// Declared objects in source order.
    #[serde(default)]
    pub objects: Vec<DeclaredObject>,
}

impl SchemaUnit {
    /// Creates an empty unit.
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            objects: Vec::new(),
        }
    }

    /// Adds an object to the unit.
    pub fn add_object(&mut self, object: DeclaredObject) {
        self.objects.push(object);
    }

    /// Builder-style variant of [`SchemaUnit::add_object`].
    #[must_use]
    pub fn with_object(mut self, object: DeclaredObject) -> Self {
        self.add_object(object);
        self
    }

    /// File name without directories or extensions (`dom_point.d.ts` -> `dom_point`).
    #[must_use]
    pub fn stem(&self) -> &str {
        file_stem(&self.filename)
    }

    /// Iterates over the interfaces and dictionaries of the unit.
    pub fn classes(&self) -> impl Iterator<Item = &ClassObject> {
        self.objects.iter().filter_map(DeclaredObject::as_class)
    }
}

/// Strips directories and every extension from a unit file name.
#[must_use]
pub fn file_stem(filename: &str) -> &str {
    let name = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
    name.split('.').next().unwrap_or(name)
}

/// One object declared in a unit.
///
/// Unknown declaration kinds load as [`DeclaredObject::Unsupported`] so the
/// rest of the unit can still be processed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawObject", into = "RawObject")]
pub enum DeclaredObject {
    /// Interface with attributes and operations.
    Interface(ClassObject),
    /// Plain field-carrying dictionary.
    Dictionary(ClassObject),
    /// Free function.
    GlobalFunction(FunctionObject),
    /// Declaration kind without a template.
    Unsupported {
        /// Declared kind.
        kind: String,
        /// Declared name, if any.
        name: Option<String>,
    },
}

impl DeclaredObject {
    /// Returns the declared name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Interface(c) | Self::Dictionary(c) => &c.name,
            Self::GlobalFunction(f) => &f.name,
            Self::Unsupported { name, .. } => name.as_deref().unwrap_or(""),
        }
    }

    /// Returns the declaration kind as written in the schema.
    #[must_use]
    pub fn kind_name(&self) -> &str {
        match self {
            Self::Interface(_) => "interface",
            Self::Dictionary(_) => "dictionary",
            Self::GlobalFunction(_) => "global_function",
            Self::Unsupported { kind, .. } => kind,
        }
    }

    /// Returns the class object of interfaces and dictionaries.
    #[must_use]
    pub const fn as_class(&self) -> Option<&ClassObject> {
        match self {
            Self::Interface(c) | Self::Dictionary(c) => Some(c),
            Self::GlobalFunction(_) | Self::Unsupported { .. } => None,
        }
    }
}

/// Serialized shape of a declared object.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawObject {
    kind: String,
    #[serde(flatten)]
    body: serde_json::Map<String, serde_json::Value>,
}

impl TryFrom<RawObject> for DeclaredObject {
    type Error = serde_json::Error;

    fn try_from(raw: RawObject) -> Result<Self, Self::Error> {
        let body = serde_json::Value::Object(raw.body);
        match raw.kind.as_str() {
            "interface" => serde_json::from_value(body).map(Self::Interface),
            "dictionary" => serde_json::from_value(body).map(Self::Dictionary),
            "global_function" => serde_json::from_value(body).map(Self::GlobalFunction),
            _ => Ok(Self::Unsupported {
                name: body
                    .get("name")
                    .and_then(serde_json::Value::as_str)
                    .map(str::to_owned),
                kind: raw.kind.clone(),
            }),
        }
    }
}

impl From<DeclaredObject> for RawObject {
    fn from(object: DeclaredObject) -> Self {
        let (kind, body) = match object {
            DeclaredObject::Interface(c) => ("interface".to_string(), serde_json::to_value(c)),
            DeclaredObject::Dictionary(c) => ("dictionary".to_string(), serde_json::to_value(c)),
            DeclaredObject::GlobalFunction(f) => {
                ("global_function".to_string(), serde_json::to_value(f))
            }
            DeclaredObject::Unsupported { kind, name } => {
                let mut body = serde_json::Map::new();
                if let Some(name) = name {
                    body.insert("name".to_string(), serde_json::Value::String(name));
                }
                (kind, Ok(serde_json::Value::Object(body)))
            }
        };
        let body = match body {
            Ok(serde_json::Value::Object(map)) => map,
            _ => serde_json::Map::new(),
        };
        Self { kind, body }
    }
}

/// Interface or dictionary declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassObject {
    /// Declared class name.
    pub name: String,
    /// Parent class name. Resolved through the registry, never owned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    /// Attributes and operations in source order.
    #[serde(default)]
    pub members: Vec<Member>,
}

impl ClassObject {
    /// Creates a class without members.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            members: Vec::new(),
        }
    }

    /// Sets the parent class name.
    #[must_use]
    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Adds an attribute.
    #[must_use]
    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.members.push(Member::Attribute(attribute));
        self
    }

    /// Adds an operation.
    #[must_use]
    pub fn with_operation(mut self, operation: Operation) -> Self {
        self.members.push(Member::Operation(operation));
        self
    }

    /// Iterates over attributes in source order.
    pub fn attributes(&self) -> impl Iterator<Item = &Attribute> {
        self.members.iter().filter_map(|m| match m {
            Member::Attribute(a) => Some(a),
            Member::Operation(_) => None,
        })
    }

    /// Iterates over operations in source order.
    pub fn operations(&self) -> impl Iterator<Item = &Operation> {
        self.members.iter().filter_map(|m| match m {
            Member::Operation(o) => Some(o),
            Member::Attribute(_) => None,
        })
    }

    /// Groups operations by name, in order of first declaration.
    #[must_use]
    pub fn overload_groups(&self) -> IndexMap<&str, Vec<&Operation>> {
        let mut groups: IndexMap<&str, Vec<&Operation>> = IndexMap::new();
        for op in self.operations() {
            groups.entry(op.name.as_str()).or_default().push(op);
        }
        groups
    }

    /// Returns true if the class has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Member of an interface or dictionary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "member", rename_all = "snake_case")]
pub enum Member {
    /// Attribute (dictionary field or interface property).
    Attribute(Attribute),
    /// Operation.
    Operation(Operation),
}

impl Member {
    /// Returns the member name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Attribute(a) => &a.name,
            Self::Operation(o) => &o.name,
        }
    }
}

/// Attribute declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    /// Attribute name.
    pub name: String,
    /// Attribute type.
    #[serde(rename = "type")]
    pub ty: ParameterType,
    /// Read-only attributes get no setter.
    #[serde(default)]
    pub readonly: bool,
}

impl Attribute {
    /// Creates a writable attribute.
    pub fn new(name: impl Into<String>, ty: ParameterType) -> Self {
        Self {
            name: name.into(),
            ty,
            readonly: false,
        }
    }

    /// Creates a read-only attribute.
    pub fn readonly(name: impl Into<String>, ty: ParameterType) -> Self {
        Self {
            readonly: true,
            ..Self::new(name, ty)
        }
    }
}

/// Operation declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    /// Operation name.
    pub name: String,
    /// Arguments in declaration order.
    #[serde(default)]
    pub arguments: Vec<FunctionArgument>,
    /// Return type.
    pub return_type: ParameterType,
}

impl Operation {
    /// Creates an operation without arguments.
    pub fn new(name: impl Into<String>, return_type: ParameterType) -> Self {
        Self {
            name: name.into(),
            arguments: Vec::new(),
            return_type,
        }
    }

    /// Adds an argument.
    #[must_use]
    pub fn with_argument(mut self, argument: FunctionArgument) -> Self {
        self.arguments.push(argument);
        self
    }
}

/// Free function declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionObject {
    /// Function name.
    pub name: String,
    /// Arguments in declaration order.
    #[serde(default)]
    pub arguments: Vec<FunctionArgument>,
    /// Return type.
    pub return_type: ParameterType,
}
