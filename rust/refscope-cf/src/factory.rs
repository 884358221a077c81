//! Factory functions for the kinds Core Foundation can create from
//! primitive inputs.
//!
//! Each function invokes the documented `CF*Create` call with the default
//! allocator and adopts the returned +1 reference. A null result from the
//! host (allocation or argument failure) is not an error at this layer: the
//! returned handle is simply empty, and callers that care check
//! [`Handle::is_empty`](refscope_handle::Handle::is_empty).

use std::ffi::c_void;
use std::fmt;

use core_foundation_sys::array::{CFArrayCallBacks, CFArrayCreate, CFArrayCreateMutable};
use core_foundation_sys::base::{CFIndex, kCFAllocatorDefault};
use core_foundation_sys::data::CFDataCreate;
use core_foundation_sys::dictionary::{
    CFDictionaryCreate, CFDictionaryCreateMutable, CFDictionaryKeyCallBacks,
    CFDictionaryValueCallBacks,
};
use core_foundation_sys::number::{CFNumberCreate, CFNumberType};
use core_foundation_sys::string::{
    CFStringCreateWithBytes, CFStringEncoding, kCFStringEncodingUTF8,
};
use refscope_handle::Handle;
use refscope_handle::host::RawRef;

use crate::{
    CFArray, CFData, CFDictionary, CFMutableArray, CFMutableDictionary, CFNumber, CFString,
};

/// Creates a `CFString` from a byte buffer and a string encoding.
///
/// Bytes that are invalid in `encoding` make the host return null, which
/// surfaces as an empty handle.
pub fn string_from_bytes(bytes: &[u8], encoding: CFStringEncoding) -> CFString {
    let raw = unsafe {
        CFStringCreateWithBytes(
            kCFAllocatorDefault,
            bytes.as_ptr(),
            bytes.len() as CFIndex,
            encoding,
            0,
        )
    };
    unsafe { Handle::adopt(raw as RawRef) }
}

/// Creates a `CFString` from pre-formatted arguments.
///
/// Formatting happens in Rust through `std::fmt`; the rendered UTF-8 is then
/// handed to the host string factory. This replaces the C-variadic format
/// constructor, which cannot be called from Rust.
///
/// ```ignore
/// let s = string_from_format(format_args!("{} of {}", 3, 4));
/// ```
pub fn string_from_format(args: fmt::Arguments<'_>) -> CFString {
    let rendered = args.to_string();
    string_from_bytes(rendered.as_bytes(), kCFStringEncodingUTF8)
}

/// Creates a `CFNumber` from a numeric type tag and a pointer to the raw
/// value.
///
/// # Safety
///
/// `value_ptr` must point to a value whose size and layout match
/// `number_type`, per the `CFNumberCreate` contract.
pub unsafe fn number_create(number_type: CFNumberType, value_ptr: *const c_void) -> CFNumber {
    let raw = unsafe { CFNumberCreate(kCFAllocatorDefault, number_type, value_ptr) };
    unsafe { Handle::adopt(raw as RawRef) }
}

/// Creates an immutable `CFArray` from a buffer of element pointers.
///
/// # Safety
///
/// `values` must point to `num_values` valid element pointers, and
/// `callbacks` must be null or point to a callback table that is valid for
/// those elements, per the `CFArrayCreate` contract.
pub unsafe fn array_create(
    values: *const *const c_void,
    num_values: CFIndex,
    callbacks: *const CFArrayCallBacks,
) -> CFArray {
    let raw = unsafe { CFArrayCreate(kCFAllocatorDefault, values, num_values, callbacks) };
    unsafe { Handle::adopt(raw as RawRef) }
}

/// Creates a `CFMutableArray` with the given capacity.
///
/// # Safety
///
/// `callbacks` must be null or point to a callback table valid for every
/// element later stored, per the `CFArrayCreateMutable` contract.
pub unsafe fn array_create_mutable(
    capacity: CFIndex,
    callbacks: *const CFArrayCallBacks,
) -> CFMutableArray {
    let raw = unsafe { CFArrayCreateMutable(kCFAllocatorDefault, capacity, callbacks) };
    unsafe { Handle::adopt(raw as RawRef) }
}

/// Creates an immutable `CFDictionary` from parallel key and value buffers.
///
/// # Safety
///
/// `keys` and `values` must each point to `num_values` valid pointers, and
/// the callback tables must be valid for them, per the `CFDictionaryCreate`
/// contract.
pub unsafe fn dictionary_create(
    keys: *const *const c_void,
    values: *const *const c_void,
    num_values: CFIndex,
    key_callbacks: *const CFDictionaryKeyCallBacks,
    value_callbacks: *const CFDictionaryValueCallBacks,
) -> CFDictionary {
    let raw = unsafe {
        CFDictionaryCreate(
            kCFAllocatorDefault,
            keys,
            values,
            num_values,
            key_callbacks,
            value_callbacks,
        )
    };
    unsafe { Handle::adopt(raw as RawRef) }
}

/// Creates a `CFMutableDictionary` with the given capacity.
///
/// # Safety
///
/// The callback tables must be valid for every key and value later stored,
/// per the `CFDictionaryCreateMutable` contract.
pub unsafe fn dictionary_create_mutable(
    capacity: CFIndex,
    key_callbacks: *const CFDictionaryKeyCallBacks,
    value_callbacks: *const CFDictionaryValueCallBacks,
) -> CFMutableDictionary {
    let raw = unsafe {
        CFDictionaryCreateMutable(kCFAllocatorDefault, capacity, key_callbacks, value_callbacks)
    };
    unsafe { Handle::adopt(raw as RawRef) }
}

/// Creates a `CFData` holding a copy of `bytes`.
pub fn data_from_bytes(bytes: &[u8]) -> CFData {
    let raw = unsafe { CFDataCreate(kCFAllocatorDefault, bytes.as_ptr(), bytes.len() as CFIndex) };
    unsafe { Handle::adopt(raw as RawRef) }
}
