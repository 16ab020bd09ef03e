//! String conversion across the boundary.
//!
//! Outgoing strings are packaged into an owned, NUL-terminated [`CString`]
//! that the caller keeps alive for the duration of the native call. Incoming
//! strings are NUL-terminated buffers allocated through
//! [`ironidl_string_new`]; ownership passes to Rust, which validates the
//! encoding and frees the buffer. Invalid text is always an error, never a
//! truncation.

use crate::error::{BoundaryError, Result};
use std::ffi::{CStr, CString, c_char};

/// Packages a string for the native side.
///
/// # Errors
/// Returns [`BoundaryError::InteriorNul`] if `value` contains a NUL byte.
pub fn to_native_string(value: &str) -> Result<CString> {
    CString::new(value).map_err(|e| BoundaryError::InteriorNul {
        position: e.nul_position(),
    })
}

/// Takes ownership of a native string buffer and decodes it.
///
/// The buffer is freed whether or not decoding succeeds.
///
/// # Safety
/// `ptr` must be null or a buffer returned by [`ironidl_string_new`] that is
/// not used again after this call.
///
/// # Errors
/// Returns [`BoundaryError::NullPointer`] for a null buffer and
/// [`BoundaryError::InvalidUtf8`] if the bytes are not valid UTF-8.
pub unsafe fn take_native_string(ptr: *const c_char) -> Result<String> {
    if ptr.is_null() {
        return Err(BoundaryError::null("string"));
    }
    // SAFETY: guaranteed by the caller; the buffer came from CString::into_raw.
    let owned = unsafe { CString::from_raw(ptr.cast_mut()) };
    owned
        .into_string()
        .map_err(|e| BoundaryError::InvalidUtf8 {
            valid_up_to: e.utf8_error().valid_up_to(),
        })
}

/// Takes ownership of a length-delimited native string buffer and decodes it.
///
/// Only the first `len` bytes are decoded; a length past the terminator is
/// clamped to it. The buffer is freed whether or not decoding succeeds.
///
/// # Safety
/// `ptr` must be null or a buffer returned by [`ironidl_string_new`] that is
/// not used again after this call.
///
/// # Errors
/// Returns [`BoundaryError::NullPointer`] for a null buffer and
/// [`BoundaryError::InvalidUtf8`] if the bytes are not valid UTF-8.
pub unsafe fn take_native_buffer(ptr: *mut c_char, len: u32) -> Result<String> {
    if ptr.is_null() {
        return Err(BoundaryError::null("string"));
    }
    // SAFETY: guaranteed by the caller; the buffer came from CString::into_raw.
    let owned = unsafe { CString::from_raw(ptr) };
    let bytes = owned.as_bytes();
    let len = usize::try_from(len).map_or(bytes.len(), |len| len.min(bytes.len()));
    std::str::from_utf8(&bytes[..len])
        .map(str::to_owned)
        .map_err(|e| BoundaryError::InvalidUtf8 {
            valid_up_to: e.valid_up_to(),
        })
}

/// Copies a borrowed native string without taking ownership.
///
/// # Safety
/// `ptr` must be null or point to a NUL-terminated buffer that stays valid
/// for the duration of the call.
///
/// # Errors
/// Returns [`BoundaryError::NullPointer`] for a null buffer and
/// [`BoundaryError::InvalidUtf8`] if the bytes are not valid UTF-8.
pub unsafe fn copy_native_string(ptr: *const c_char) -> Result<String> {
    if ptr.is_null() {
        return Err(BoundaryError::null("string"));
    }
    // SAFETY: guaranteed by the caller.
    let borrowed = unsafe { CStr::from_ptr(ptr) };
    borrowed
        .to_str()
        .map(str::to_owned)
        .map_err(|e| BoundaryError::InvalidUtf8 {
            valid_up_to: e.valid_up_to(),
        })
}

/// Allocates a string buffer for the native side to hand back to Rust.
///
/// Copies `len` bytes from `bytes`, stopping early at the first NUL. Returns
/// null if `bytes` is null.
///
/// # Safety
/// `bytes` must be null or valid for reads of `len` bytes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn ironidl_string_new(bytes: *const c_char, len: usize) -> *mut c_char {
    if bytes.is_null() {
        return std::ptr::null_mut();
    }
    // SAFETY: guaranteed by the caller.
    let slice = unsafe { std::slice::from_raw_parts(bytes.cast::<u8>(), len) };
    let end = slice.iter().position(|&b| b == 0).unwrap_or(slice.len());
    match CString::new(&slice[..end]) {
        Ok(owned) => owned.into_raw(),
        Err(_) => std::ptr::null_mut(),
    }
}
