//! Rust backend.

pub mod classifier;
pub mod conversions;
pub mod dictionary;
pub mod interface;

pub use classifier::{MappedType, Surface, classify};
pub use dictionary::DictionaryGenerator;
pub use interface::InterfaceGenerator;

use crate::diagnostics::DiagnosticKind;
use crate::resolver::{ClassResolver, PointerResolution};
use ironidl_schema::ParameterType;

/// Position a type is used in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TypeUse {
    /// Operation return; `void` allowed.
    Return,
    /// Attribute, argument or field.
    Value,
    /// Dictionary field; pointers are not allowed either.
    Field,
}

/// Checks that a member type can be emitted and rewrites pointer types to
/// the emitted class name.
pub(crate) fn resolve_type(
    resolver: &ClassResolver<'_>,
    ty: &ParameterType,
    usage: TypeUse,
) -> Result<ParameterType, DiagnosticKind> {
    let unsupported = |reason: &str| DiagnosticKind::UnsupportedMember {
        reason: reason.to_string(),
    };
    match ty {
        ParameterType::Unsupported => Err(unsupported("type has no mapping")),
        ParameterType::Void if usage != TypeUse::Return => {
            Err(unsupported("void is only valid as a return type"))
        }
        ParameterType::Pointer { .. } if usage == TypeUse::Field => {
            Err(unsupported("pointer-typed dictionary fields are not supported"))
        }
        ParameterType::Pointer { class } => match resolver.resolve_pointer(class) {
            PointerResolution::Interface(name) => Ok(ParameterType::pointer(name)),
            PointerResolution::Dictionary(name) => Err(DiagnosticKind::UnsupportedMember {
                reason: format!("pointer to dictionary '{name}'"),
            }),
            PointerResolution::Unresolved => Err(DiagnosticKind::UnresolvedClass {
                class: class.clone(),
            }),
        },
        other => Ok(other.clone()),
    }
}
