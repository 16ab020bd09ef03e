//! Schema validation utilities.
//!
//! Two levels of checks exist. [`validate_unit`] rejects units the registry
//! cannot hold at all: a unit without a usable file name, a class without a
//! name, or a class inheriting from itself. Everything confined to a single
//! member is reported by [`check_members`] and only drops that member.

use crate::declarations::{ClassObject, DeclaredObject, Member, SchemaUnit};
use crate::error::SchemaError;
use crate::types::FunctionArgument;
use std::collections::HashSet;
use std::fmt;

/// Validates a loaded unit.
///
/// # Arguments
/// * `unit` - The unit to validate
///
/// # Returns
/// Ok(()) if valid, or SchemaError describing the issue.
///
/// # Errors
/// Returns `SchemaError` if the unit cannot be registered.
pub fn validate_unit(unit: &SchemaUnit) -> Result<(), SchemaError> {
    if unit.stem().is_empty() {
        return Err(SchemaError::validation(format!(
            "unit '{}' has no usable file name",
            unit.filename
        )));
    }

    for class in unit.classes() {
        if class.name.trim().is_empty() {
            return Err(SchemaError::validation(format!(
                "class declared without a name in '{}'",
                unit.filename
            )));
        }
        if class.parent.as_deref() == Some(class.name.as_str()) {
            return Err(SchemaError::CircularReference {
                path: format!("{0} -> {0}", class.name),
            });
        }
    }
    Ok(())
}

/// What is wrong with a single member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberIssueKind {
    /// Attribute or operation declared without a name.
    Unnamed,
    /// Attribute declared again in the same class.
    DuplicateAttribute,
    /// Operation sharing its name with an attribute of the same class.
    ShadowsAttribute,
    /// Argument with a missing or repeated name.
    InvalidArgument {
        /// Offending argument name.
        argument: String,
    },
}

impl fmt::Display for MemberIssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unnamed => f.write_str("member declared without a name"),
            Self::DuplicateAttribute => f.write_str("attribute declared more than once"),
            Self::ShadowsAttribute => f.write_str("operation shares its name with an attribute"),
            Self::InvalidArgument { argument } => {
                write!(f, "argument name '{argument}' is missing or repeated")
            }
        }
    }
}

/// A member dropped by [`check_members`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberIssue {
    /// Member name as declared.
    pub member: String,
    /// Issue.
    pub kind: MemberIssueKind,
}

/// Splits the members of `class` into bindable ones and issues.
///
/// The first declaration of an attribute name wins. Operations may share a
/// name with each other (overloads) but not with an attribute.
///
/// # Returns
/// A copy of `class` holding only the bindable members, in source order,
/// and one issue per dropped member.
#[must_use]
pub fn check_members(class: &ClassObject) -> (ClassObject, Vec<MemberIssue>) {
    let attributes: HashSet<&str> = class.attributes().map(|a| a.name.as_str()).collect();
    let mut seen_attributes = HashSet::new();
    let mut checked = ClassObject {
        name: class.name.clone(),
        parent: class.parent.clone(),
        members: Vec::with_capacity(class.members.len()),
    };
    let mut issues = Vec::new();

    for member in &class.members {
        let name = member.name();
        let issue = if name.trim().is_empty() {
            Some(MemberIssueKind::Unnamed)
        } else {
            match member {
                Member::Attribute(_) => {
                    (!seen_attributes.insert(name)).then_some(MemberIssueKind::DuplicateAttribute)
                }
                Member::Operation(_) if attributes.contains(name) => {
                    Some(MemberIssueKind::ShadowsAttribute)
                }
                Member::Operation(operation) => invalid_argument(&operation.arguments)
                    .map(|argument| MemberIssueKind::InvalidArgument { argument }),
            }
        };

        match issue {
            Some(kind) => issues.push(MemberIssue {
                member: name.to_string(),
                kind,
            }),
            None => checked.members.push(member.clone()),
        }
    }

    (checked, issues)
}

/// Returns a copy of `unit` whose classes hold only bindable members.
#[must_use]
pub fn bindable_unit(unit: &SchemaUnit) -> SchemaUnit {
    let objects = unit
        .objects
        .iter()
        .map(|object| match object {
            DeclaredObject::Interface(class) => DeclaredObject::Interface(check_members(class).0),
            DeclaredObject::Dictionary(class) => DeclaredObject::Dictionary(check_members(class).0),
            other => other.clone(),
        })
        .collect();
    SchemaUnit {
        filename: unit.filename.clone(),
        objects,
    }
}

/// First argument whose name is empty or already taken.
fn invalid_argument(arguments: &[FunctionArgument]) -> Option<String> {
    let mut seen = HashSet::new();
    arguments
        .iter()
        .find(|argument| argument.name.is_empty() || !seen.insert(argument.name.as_str()))
        .map(|argument| argument.name.clone())
}
