//! Kind markers binding [`Handle`](refscope_handle::Handle) to Core
//! Foundation object kinds.
//!
//! Every Core Foundation reference is a `CFTypeRef` underneath, and the
//! count primitives (`CFRetain`, `CFRelease`, `CFEqual`) are uniform across
//! kinds, so each marker forwards to the same three calls. The marker only
//! exists to keep handles of different kinds apart at compile time.

use core_foundation_sys::base::{CFEqual, CFRelease, CFRetain, CFTypeRef};
use refscope_handle::host::{HostKind, RawRef};

macro_rules! cf_kind {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug)]
        pub enum $name {}

        unsafe impl HostKind for $name {
            unsafe fn retain(raw: RawRef) {
                unsafe { CFRetain(raw as CFTypeRef) };
            }

            unsafe fn release(raw: RawRef) {
                unsafe { CFRelease(raw as CFTypeRef) };
            }

            unsafe fn equal(a: RawRef, b: RawRef) -> bool {
                unsafe { CFEqual(a as CFTypeRef, b as CFTypeRef) != 0 }
            }
        }
    };
}

cf_kind!(
    /// Any Core Foundation object (`CFTypeRef`).
    Type
);
cf_kind!(
    /// `CFDataRef`.
    Data
);
cf_kind!(
    /// `CFMutableDataRef`.
    MutableData
);
cf_kind!(
    /// `CFStringRef`.
    String
);
cf_kind!(
    /// `CFMutableStringRef`.
    MutableString
);
cf_kind!(
    /// `CFAttributedStringRef`.
    AttributedString
);
cf_kind!(
    /// `CFMutableAttributedStringRef`.
    MutableAttributedString
);
cf_kind!(
    /// `CFDictionaryRef`.
    Dictionary
);
cf_kind!(
    /// `CFMutableDictionaryRef`.
    MutableDictionary
);
cf_kind!(
    /// `CFArrayRef`.
    Array
);
cf_kind!(
    /// `CFMutableArrayRef`.
    MutableArray
);
cf_kind!(
    /// `CFSetRef`.
    Set
);
cf_kind!(
    /// `CFMutableSetRef`.
    MutableSet
);
cf_kind!(
    /// `CFBagRef`.
    Bag
);
cf_kind!(
    /// `CFMutableBagRef`.
    MutableBag
);
cf_kind!(
    /// `CFPropertyListRef`.
    PropertyList
);
cf_kind!(
    /// `CFBitVectorRef`.
    BitVector
);
cf_kind!(
    /// `CFMutableBitVectorRef`.
    MutableBitVector
);
cf_kind!(
    /// `CFCharacterSetRef`.
    CharacterSet
);
cf_kind!(
    /// `CFMutableCharacterSetRef`.
    MutableCharacterSet
);
cf_kind!(
    /// `CFURLRef`.
    Url
);
cf_kind!(
    /// `CFUUIDRef`.
    Uuid
);
cf_kind!(
    /// `CFNumberRef`.
    Number
);
cf_kind!(
    /// `CFBooleanRef`.
    Boolean
);
cf_kind!(
    /// `CFErrorRef`.
    Error
);
cf_kind!(
    /// `CFDateRef`.
    Date
);
cf_kind!(
    /// `CFReadStreamRef`.
    ReadStream
);
cf_kind!(
    /// `CFWriteStreamRef`.
    WriteStream
);
cf_kind!(
    /// `CFHTTPMessageRef` (CFNetwork).
    HttpMessage
);

#[cfg(target_os = "macos")]
cf_kind!(
    /// `SecKeychainItemRef` (Security, macOS only).
    KeychainItem
);
#[cfg(target_os = "macos")]
cf_kind!(
    /// `SecCertificateRef` (Security, macOS only).
    Certificate
);
#[cfg(target_os = "macos")]
cf_kind!(
    /// `SecTransformRef` (Security, macOS only).
    Transform
);
#[cfg(target_os = "macos")]
cf_kind!(
    /// `CGImageSourceRef` (ImageIO, macOS only).
    ImageSource
);
