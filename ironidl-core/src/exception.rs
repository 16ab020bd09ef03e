//! Exception propagation from the native side.
//!
//! Generated operations pass an [`ExceptionState`] into every native call and
//! check it before unwrapping the return value. The method table mirrors the
//! native exception state API:
//!
//! ```text
//! bool has_exception(state)
//! void stringify(context, state, char** message, uint32_t* length)
//! ```

use crate::error::{BoundaryError, Result};
use crate::string::take_native_buffer;
use crate::types::{OpaquePtr, RustMethods};
use std::ffi::{c_char, c_double};

/// Method table of a native exception state.
#[repr(C)]
#[derive(Debug)]
pub struct ExceptionStateRustMethods {
    /// Table layout version.
    pub version: c_double,
    /// Returns true if an exception was recorded. One-byte C `bool`.
    pub has_exception: extern "C" fn(*const OpaquePtr) -> bool,
    /// Writes the stringified exception and its byte length through the two
    /// out-parameters. The buffer is allocated with `ironidl_string_new` and
    /// owned by the caller afterwards.
    pub stringify:
        extern "C" fn(*const OpaquePtr, *const OpaquePtr, *mut *mut c_char, *mut u32),
}

impl RustMethods for ExceptionStateRustMethods {
    fn version(&self) -> c_double {
        self.version
    }
}

/// Collects exceptions raised during native calls.
#[derive(Debug)]
pub struct ExceptionState {
    ptr: *const OpaquePtr,
    method_pointer: *const ExceptionStateRustMethods,
}

impl ExceptionState {
    /// Creates an exception state from its raw parts.
    #[must_use]
    pub const fn new(
        ptr: *const OpaquePtr,
        method_pointer: *const ExceptionStateRustMethods,
    ) -> Self {
        Self {
            ptr,
            method_pointer,
        }
    }

    /// Raw native pointer, passed as the last argument of native calls.
    #[inline]
    #[must_use]
    pub const fn ptr(&self) -> *const OpaquePtr {
        self.ptr
    }

    fn methods(&self) -> Result<&ExceptionStateRustMethods> {
        if self.method_pointer.is_null() {
            return Err(BoundaryError::null("exception state method table"));
        }
        // SAFETY: non-null tables are provided by the native side and live as
        // long as the exception state.
        Ok(unsafe { &*self.method_pointer })
    }

    /// Returns true if the native side recorded an exception.
    ///
    /// # Errors
    /// Returns [`BoundaryError::NullPointer`] if the method table is null.
    pub fn has_exception(&self) -> Result<bool> {
        let methods = self.methods()?;
        Ok((methods.has_exception)(self.ptr))
    }

    /// Converts a recorded exception into an error.
    ///
    /// # Errors
    /// Returns [`BoundaryError::Exception`] when an exception was recorded,
    /// [`BoundaryError::NullPointer`] if the method table or the message is
    /// null, and [`BoundaryError::InvalidUtf8`] for an undecodable message.
    pub fn check(&self, context: *const OpaquePtr) -> Result<()> {
        let methods = self.methods()?;
        if !(methods.has_exception)(self.ptr) {
            return Ok(());
        }

        let mut message: *mut c_char = std::ptr::null_mut();
        let mut length: u32 = 0;
        (methods.stringify)(context, self.ptr, &mut message, &mut length);
        // SAFETY: stringify hands over a buffer allocated by ironidl_string_new.
        let message = unsafe { take_native_buffer(message, length) }?;
        Err(BoundaryError::exception(message))
    }
}
