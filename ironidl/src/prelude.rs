//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and functions.
//!
//! ```ignore
//! use ironidl::prelude::*;
//! ```

// Runtime types
pub use ironidl_core::{
    Boolean, BoundaryError, BoundaryHandle, ExceptionState, OpaquePtr, RustMethods, RustValue,
    RustValueStatus, ScriptValueRef,
};

// Schema types
pub use ironidl_schema::{
    Attribute, ClassObject, ClassRegistry, DeclaredObject, FunctionArgument, Operation,
    ParameterType, SchemaUnit, parse_unit, parse_unit_file,
};

// Generation
pub use ironidl_codegen::driver::{load_templates, load_units, write_units};
pub use ironidl_codegen::{
    CodegenError, Diagnostic, DiagnosticKind, GeneratedUnit, Generator, GeneratorConfig,
    TemplateSet, class_name_for, generate_all, generate_from_files,
};
