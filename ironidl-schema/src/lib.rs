//! # IronIDL Schema
//!
//! Object model for interface declarations consumed by the binding
//! generator.
//!
//! This crate provides:
//! - Schema units, declared objects and parameter type descriptors
//! - JSON loading of already-parsed declaration files
//! - Structural validation of units and per-member checks
//! - The class registry used for cross-unit parent and pointer resolution

pub mod declarations;
pub mod error;
pub mod parser;
pub mod registry;
pub mod types;
pub mod validation;

pub use declarations::{
    Attribute, ClassObject, DeclaredObject, FunctionObject, Member, Operation, SchemaUnit,
    file_stem,
};
pub use error::{ParseError, SchemaError};
pub use parser::{parse_unit, parse_unit_file};
pub use registry::{ClassKind, ClassRegistry, RegisteredClass, RegistryBuilder};
pub use types::{FunctionArgument, ParameterType};
pub use validation::{
    MemberIssue, MemberIssueKind, bindable_unit, check_members, validate_unit,
};
