//! # IronIDL
//!
//! Compiles interface declarations into Rust bindings for native objects
//! exposed through versioned method tables.
//!
//! ## Features
//!
//! - **Two-phase generation** - All units are registered before any is
//!   emitted, so parents and pointer types resolve across files
//! - **Typed surfaces** - Every declared type maps to an ABI-safe public form
//!   and an idiomatic Rust form, with explicit conversions at call sites
//! - **Recoverable diagnostics** - Unsupported or unresolved members are
//!   skipped and reported instead of aborting the unit
//! - **Runtime support** - Boundary handles, string conversion and exception
//!   propagation used by the generated code
//!
//! ## Quick Start
//!
//! ```ignore
//! use ironidl::prelude::*;
//!
//! let units = load_units(&["schema/dom_point.json"])?;
//! let templates = TemplateSet::builtin()?;
//! let generated = generate_all(&units, &templates, &GeneratorConfig::default())?;
//! ```
//!
//! ## Crate Organization
//!
//! - [`core`] - Runtime types linked by generated bindings
//! - [`schema`] - Declaration object model, loader and class registry
//! - [`codegen`] - Binding generation

pub mod prelude;

/// Runtime support for generated bindings.
pub mod core {
    pub use ironidl_core::*;
}

/// Declaration object model and class registry.
pub mod schema {
    pub use ironidl_schema::*;
}

/// Binding generation.
pub mod codegen {
    pub use ironidl_codegen::*;
}
