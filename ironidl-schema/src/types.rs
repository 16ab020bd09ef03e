//! Parameter type descriptors.
//!
//! This module contains the closed set of types a declaration can use for
//! attributes, arguments and return values.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Type of an attribute, argument or return value.
///
/// Exactly one kind is active per descriptor. Pointer descriptors carry the
/// name of the referenced class, which must be present in the class registry
/// when bindings are emitted. Kinds outside this set load as
/// [`ParameterType::Unsupported`] instead of failing the whole unit.
///
/// JSON form: `{"kind": "double"}` or `{"kind": "pointer", "class": "Element"}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParameterType {
    /// 32-bit signed integer.
    Int32,
    /// 64-bit signed integer.
    Int64,
    /// Double precision float.
    Double,
    /// Boolean.
    Boolean,
    /// DOM string.
    DomString,
    /// Legacy DOM string, mapped exactly like [`ParameterType::DomString`].
    LegacyDomString,
    /// Opaque dynamic value.
    Any,
    /// No value.
    Void,
    /// Reference to another generated class.
    Pointer {
        /// Referenced class name.
        class: String,
    },
    /// Any kind without a mapping.
    #[serde(other)]
    Unsupported,
}

impl ParameterType {
    /// Creates a pointer descriptor.
    pub fn pointer(class: impl Into<String>) -> Self {
        Self::Pointer {
            class: class.into(),
        }
    }

    /// Returns the declaration name of the type.
    #[must_use]
    pub fn idl_name(&self) -> String {
        match self {
            Self::Int32 => "int32".to_string(),
            Self::Int64 => "int64".to_string(),
            Self::Double => "double".to_string(),
            Self::Boolean => "boolean".to_string(),
            Self::DomString => "dom_string".to_string(),
            Self::LegacyDomString => "legacy_dom_string".to_string(),
            Self::Any => "any".to_string(),
            Self::Void => "void".to_string(),
            Self::Pointer { class } => format!("{class}*"),
            Self::Unsupported => "unsupported".to_string(),
        }
    }

    /// Returns true for `void`.
    #[must_use]
    pub const fn is_void(&self) -> bool {
        matches!(self, Self::Void)
    }
}

impl fmt::Display for ParameterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.idl_name())
    }
}

/// Named, typed argument of an operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionArgument {
    /// Argument name as declared.
    pub name: String,
    /// Argument type.
    #[serde(rename = "type")]
    pub ty: ParameterType,
    /// Whether the argument may be omitted by script callers.
    #[serde(default)]
    pub optional: bool,
}

impl FunctionArgument {
    /// Creates a required argument.
    pub fn new(name: impl Into<String>, ty: ParameterType) -> Self {
        Self {
            name: name.into(),
            ty,
            optional: false,
        }
    }
}
