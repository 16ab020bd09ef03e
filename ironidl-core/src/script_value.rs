//! Opaque dynamic values.

use crate::types::{OpaquePtr, RustMethods, RustValue};
use std::ffi::c_double;

/// Method table of a native script value.
#[repr(C)]
#[derive(Debug)]
pub struct ScriptValueRefRustMethods {
    /// Table layout version.
    pub version: c_double,
    /// Releases the native value.
    pub release: extern "C" fn(*const OpaquePtr),
}

impl RustMethods for ScriptValueRefRustMethods {
    fn version(&self) -> c_double {
        self.version
    }
}

/// A dynamic value paired with its method table.
///
/// The pair is the unit passed back across the boundary: the handle is never
/// separated from its table on the method surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptValueRef {
    /// Raw native value.
    pub ptr: *const OpaquePtr,
    /// Its method table.
    pub method_pointer: *const ScriptValueRefRustMethods,
}

impl ScriptValueRef {
    /// Wraps a value returned by a native call.
    #[must_use]
    pub const fn from_rust_value(value: RustValue<ScriptValueRefRustMethods>) -> Self {
        Self {
            ptr: value.value,
            method_pointer: value.method_pointer,
        }
    }

    /// Converts back into the public representation.
    #[must_use]
    pub const fn to_rust_value(&self) -> RustValue<ScriptValueRefRustMethods> {
        RustValue::new(self.ptr, self.method_pointer, std::ptr::null())
    }

    /// Raw handle, as passed to native parameters of type `any`.
    #[inline]
    #[must_use]
    pub const fn as_ptr(&self) -> *const OpaquePtr {
        self.ptr
    }
}
