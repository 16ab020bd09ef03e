//! Boundary handles for native objects.
//!
//! A [`BoundaryHandle`] is the unit that represents one live object reference
//! crossing the boundary. It bundles four pointers that must always travel
//! together:
//!
//! ```text
//! +---------------+------------------------------------------+
//! | ptr           | raw native object                        |
//! | context       | executing context that owns the object   |
//! | method_pointer| the object's <Class>RustMethods table    |
//! | status        | liveness flag shared with the native side|
//! +---------------+------------------------------------------+
//! ```
//!
//! # Ownership
//!
//! The native side owns the object and keeps it alive until it receives a
//! `release` call through the method table. The generated wrapper of the
//! root class of an inheritance chain issues that call exactly once on drop,
//! and only while `status` does not report the object as disposed. Handles
//! themselves are plain `Copy` values and never free anything.

use crate::error::{BoundaryError, Result};
use crate::types::{OpaquePtr, RustValue, RustValueStatus};

/// Raw handle, owning context, method table and status of one native object.
#[derive(Debug)]
pub struct BoundaryHandle<M> {
    ptr: *const OpaquePtr,
    context: *const OpaquePtr,
    method_pointer: *const M,
    status: *const RustValueStatus,
}

impl<M> Clone for BoundaryHandle<M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M> Copy for BoundaryHandle<M> {}

impl<M> BoundaryHandle<M> {
    /// Creates a handle from its raw parts.
    #[must_use]
    pub const fn new(
        ptr: *const OpaquePtr,
        context: *const OpaquePtr,
        method_pointer: *const M,
        status: *const RustValueStatus,
    ) -> Self {
        Self {
            ptr,
            context,
            method_pointer,
            status,
        }
    }

    /// Wraps a value returned by a native call, carrying forward the
    /// caller's context.
    #[must_use]
    pub const fn from_rust_value(value: RustValue<M>, context: *const OpaquePtr) -> Self {
        Self::new(value.value, context, value.method_pointer, value.status)
    }

    /// Converts back into the public representation.
    #[must_use]
    pub const fn as_rust_value(&self) -> RustValue<M> {
        RustValue::new(self.ptr, self.method_pointer, self.status)
    }

    /// Returns the same object viewed through another method table.
    ///
    /// Used to build the parent part of a derived class, whose method table
    /// embeds a pointer to the parent's table.
    #[must_use]
    pub const fn with_methods<P>(&self, method_pointer: *const P) -> BoundaryHandle<P> {
        BoundaryHandle::new(self.ptr, self.context, method_pointer, self.status)
    }

    /// Raw native object.
    #[inline]
    #[must_use]
    pub const fn ptr(&self) -> *const OpaquePtr {
        self.ptr
    }

    /// Owning executing context.
    #[inline]
    #[must_use]
    pub const fn context(&self) -> *const OpaquePtr {
        self.context
    }

    /// Method table pointer.
    #[inline]
    #[must_use]
    pub const fn method_pointer(&self) -> *const M {
        self.method_pointer
    }

    /// Status pointer.
    #[inline]
    #[must_use]
    pub const fn status(&self) -> *const RustValueStatus {
        self.status
    }

    /// Returns true if the native side has disposed the object.
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        // SAFETY: the status block is owned by the native side and outlives
        // every handle created for the object.
        !self.status.is_null() && unsafe { (*self.status).is_disposed() }
    }

    /// Borrows the method table, failing if it is null or the object has
    /// been disposed.
    ///
    /// # Errors
    /// Returns [`BoundaryError::NullPointer`] or [`BoundaryError::Disposed`].
    pub fn methods(&self) -> Result<&M> {
        if self.ptr.is_null() {
            return Err(BoundaryError::null("object"));
        }
        if self.method_pointer.is_null() {
            return Err(BoundaryError::null("method table"));
        }
        if self.is_disposed() {
            return Err(BoundaryError::Disposed);
        }
        // SAFETY: non-null and the object is alive, so the native side
        // guarantees the table is valid.
        Ok(unsafe { &*self.method_pointer })
    }
}
