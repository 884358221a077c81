//! An instrumented, in-process host object system for exercising
//! [`refscope_handle::Handle`].
//!
//! This is not a mock: it is a small, thread-safe, reference-counted object
//! system with the same shape as the real host contract (retain, release,
//! structural equality, a per-kind factory catalogue), plus the bookkeeping
//! the real one lacks. Tests create objects through the factories here and
//! then observe [`ref_count`], [`is_live`] and friends to verify that every
//! wrapper operation keeps the counts balanced.
//!
//! Retain or release of a dead handle panics: in a test fixture, a loud
//! failure beats silently corrupted counts. Every transition is also traced
//! through the `log` facade.

use refscope_handle::Handle;
use refscope_handle::host::{HostKind, RawRef};

mod registry;

use registry::Value;
pub use registry::{check_balanced, is_live, live_objects, ref_count, release_raw};

macro_rules! testkit_kind {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug)]
        pub enum $name {}

        unsafe impl HostKind for $name {
            unsafe fn retain(raw: RawRef) {
                registry::retain(raw);
            }

            unsafe fn release(raw: RawRef) {
                registry::release(raw);
            }

            unsafe fn equal(a: RawRef, b: RawRef) -> bool {
                registry::equal(a, b)
            }
        }
    };
}

testkit_kind!(
    /// Kind marker for registry string objects.
    StringKind
);
testkit_kind!(
    /// Kind marker for registry number objects.
    NumberKind
);
testkit_kind!(
    /// Kind marker for registry array objects.
    ArrayKind
);
testkit_kind!(
    /// Kind marker for registry dictionary objects.
    DictionaryKind
);
testkit_kind!(
    /// Kind marker for registry data objects.
    DataKind
);

/// Byte encodings understood by [`string_from_bytes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Utf8,
    Ascii,
}

/// Creates a string object from a byte buffer and an encoding tag.
///
/// Returns an empty handle when the bytes are not valid in the given
/// encoding, mirroring a host factory's null result on argument failure.
pub fn string_from_bytes(bytes: &[u8], encoding: Encoding) -> Handle<StringKind> {
    let decoded = match encoding {
        Encoding::Utf8 => std::str::from_utf8(bytes).ok().map(str::to_owned),
        Encoding::Ascii => bytes
            .is_ascii()
            .then(|| String::from_utf8_lossy(bytes).into_owned()),
    };
    match decoded {
        Some(text) => unsafe { Handle::adopt(registry::create(Value::String(text))) },
        None => Handle::new(),
    }
}

/// Creates a number object from a 32-bit integer.
pub fn number_from_i32(value: i32) -> Handle<NumberKind> {
    unsafe { Handle::adopt(registry::create(Value::Number(i64::from(value)))) }
}

/// Creates a number object from a 64-bit integer.
pub fn number_from_i64(value: i64) -> Handle<NumberKind> {
    unsafe { Handle::adopt(registry::create(Value::Number(value))) }
}

/// Creates a data object holding a copy of `bytes`.
pub fn data_from_bytes(bytes: &[u8]) -> Handle<DataKind> {
    unsafe { Handle::adopt(registry::create(Value::Data(bytes.to_vec()))) }
}

/// Creates an empty array object with the given capacity hint.
pub fn array_with_capacity(capacity: usize) -> Handle<ArrayKind> {
    unsafe { Handle::adopt(registry::create_array(capacity, &[])) }
}

/// Creates an array object from a buffer of element handles, retaining each
/// element for the lifetime of the array.
///
/// Returns an empty handle when any element handle is dead.
pub fn array_from_values(values: &[RawRef]) -> Handle<ArrayKind> {
    unsafe { Handle::adopt(registry::create_array(values.len(), values)) }
}

/// Creates an empty dictionary object with the given capacity hint.
pub fn dictionary_with_capacity(capacity: usize) -> Handle<DictionaryKind> {
    unsafe { Handle::adopt(registry::create_dictionary(capacity, &[], &[])) }
}

/// Creates a dictionary object from parallel key and value buffers,
/// retaining every key and value.
///
/// Returns an empty handle when the buffers differ in length or any handle
/// is dead.
pub fn dictionary_from_keys_and_values(
    keys: &[RawRef],
    values: &[RawRef],
) -> Handle<DictionaryKind> {
    unsafe { Handle::adopt(registry::create_dictionary(keys.len(), keys, values)) }
}
