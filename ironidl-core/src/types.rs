//! ABI-stable types shared with the native side.
//!
//! Every type here is `#[repr(C)]` or a plain integer so that its layout
//! matches the native declarations exactly.

use std::ffi::c_double;
use std::marker::{PhantomData, PhantomPinned};

/// Integer-backed boolean used on the public surface.
///
/// Native `bool` layout is never assumed across the boundary; generated code
/// widens with [`Boolean::from`] and narrows with `value != 0`.
pub type Boolean = i32;

/// Opaque native object. Only ever handled behind a pointer.
#[repr(C)]
pub struct OpaquePtr {
    _data: [u8; 0],
    _marker: PhantomData<(*mut u8, PhantomPinned)>,
}

/// Liveness flag shared between a native object and its Rust handles.
#[repr(C)]
#[derive(Debug, Default)]
pub struct RustValueStatus {
    /// Non-zero once the native side has disposed the object.
    pub disposed: Boolean,
}

impl RustValueStatus {
    /// Returns true if the native object has been disposed.
    #[must_use]
    pub const fn is_disposed(&self) -> bool {
        self.disposed != 0
    }
}

/// Value returned by native functions that hand out object references.
///
/// `value` is the raw object, `method_pointer` its method table and `status`
/// the shared liveness flag. The owning context is supplied by the caller
/// when the value is wrapped into a [`BoundaryHandle`](crate::BoundaryHandle).
#[repr(C)]
#[derive(Debug)]
pub struct RustValue<T> {
    /// Raw native object.
    pub value: *const OpaquePtr,
    /// Method table of the object.
    pub method_pointer: *const T,
    /// Liveness flag.
    pub status: *const RustValueStatus,
}

impl<T> Clone for RustValue<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for RustValue<T> {}

impl<T> RustValue<T> {
    /// Creates a value from its raw parts.
    #[must_use]
    pub const fn new(
        value: *const OpaquePtr,
        method_pointer: *const T,
        status: *const RustValueStatus,
    ) -> Self {
        Self {
            value,
            method_pointer,
            status,
        }
    }

    /// Returns true if the native side returned no object.
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.value.is_null()
    }
}

/// Implemented by every generated `<Class>RustMethods` table.
///
/// Method tables start with a `version` field so the native side can grow
/// them without breaking older bindings.
pub trait RustMethods {
    /// Version of the method table layout.
    fn version(&self) -> c_double;
}
