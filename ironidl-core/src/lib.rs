//! # IronIDL Core
//!
//! Runtime types shared by every binding that IronIDL generates.
//!
//! This crate provides:
//! - ABI-stable value carriers ([`RustValue`], [`Boolean`], [`OpaquePtr`])
//! - [`BoundaryHandle`], the bundle that represents one live native object
//! - Opaque dynamic values ([`ScriptValueRef`])
//! - Exception propagation from the native side ([`ExceptionState`])
//! - String conversion across the boundary with explicit failure paths

pub mod boundary;
pub mod error;
pub mod exception;
pub mod script_value;
pub mod string;
pub mod types;

pub use boundary::BoundaryHandle;
pub use error::{BoundaryError, Result};
pub use exception::{ExceptionState, ExceptionStateRustMethods};
pub use script_value::{ScriptValueRef, ScriptValueRefRustMethods};
pub use string::{
    copy_native_string, ironidl_string_new, take_native_buffer, take_native_string,
    to_native_string,
};
pub use types::{Boolean, OpaquePtr, RustMethods, RustValue, RustValueStatus};
