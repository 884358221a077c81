//! Core Foundation kinds for [`refscope_handle::Handle`].
//!
//! This crate binds the generic handle wrapper to the Core Foundation object
//! system: one [`kind`] marker per CF kind, a type alias per kind, and
//! factory functions for the kinds CF can create from primitive inputs. On
//! non-Apple targets the crate is intentionally empty; there is no stubbed
//! fallback for a host system that is not present.
//!
//! Objects whose factories live outside this catalogue (streams, HTTP
//! messages, the Security and ImageIO kinds) are still coverable: wrap the
//! reference a platform call hands back with
//! [`Handle::adopt`](refscope_handle::Handle::adopt), or pass an empty
//! handle's [`out_slot`](refscope_handle::Handle::out_slot) to an
//! out-parameter API.

#[cfg(target_vendor = "apple")]
mod factory;
#[cfg(target_vendor = "apple")]
pub mod kind;

#[cfg(target_vendor = "apple")]
pub use factory::{
    array_create, array_create_mutable, data_from_bytes, dictionary_create,
    dictionary_create_mutable, number_create, string_from_bytes, string_from_format,
};

#[cfg(target_vendor = "apple")]
mod alias {
    use refscope_handle::Handle;

    use crate::kind;

    /// A wrapped `CFTypeRef`.
    pub type CFType = Handle<kind::Type>;
    /// A wrapped `CFDataRef`.
    pub type CFData = Handle<kind::Data>;
    /// A wrapped `CFMutableDataRef`.
    pub type CFMutableData = Handle<kind::MutableData>;
    /// A wrapped `CFStringRef`.
    pub type CFString = Handle<kind::String>;
    /// A wrapped `CFMutableStringRef`.
    pub type CFMutableString = Handle<kind::MutableString>;
    /// A wrapped `CFAttributedStringRef`.
    pub type CFAttributedString = Handle<kind::AttributedString>;
    /// A wrapped `CFMutableAttributedStringRef`.
    pub type CFMutableAttributedString = Handle<kind::MutableAttributedString>;
    /// A wrapped `CFDictionaryRef`.
    pub type CFDictionary = Handle<kind::Dictionary>;
    /// A wrapped `CFMutableDictionaryRef`.
    pub type CFMutableDictionary = Handle<kind::MutableDictionary>;
    /// A wrapped `CFArrayRef`.
    pub type CFArray = Handle<kind::Array>;
    /// A wrapped `CFMutableArrayRef`.
    pub type CFMutableArray = Handle<kind::MutableArray>;
    /// A wrapped `CFSetRef`.
    pub type CFSet = Handle<kind::Set>;
    /// A wrapped `CFMutableSetRef`.
    pub type CFMutableSet = Handle<kind::MutableSet>;
    /// A wrapped `CFBagRef`.
    pub type CFBag = Handle<kind::Bag>;
    /// A wrapped `CFMutableBagRef`.
    pub type CFMutableBag = Handle<kind::MutableBag>;
    /// A wrapped `CFPropertyListRef`.
    pub type CFPropertyList = Handle<kind::PropertyList>;
    /// A wrapped `CFBitVectorRef`.
    pub type CFBitVector = Handle<kind::BitVector>;
    /// A wrapped `CFMutableBitVectorRef`.
    pub type CFMutableBitVector = Handle<kind::MutableBitVector>;
    /// A wrapped `CFCharacterSetRef`.
    pub type CFCharacterSet = Handle<kind::CharacterSet>;
    /// A wrapped `CFMutableCharacterSetRef`.
    pub type CFMutableCharacterSet = Handle<kind::MutableCharacterSet>;
    /// A wrapped `CFURLRef`.
    pub type CFURL = Handle<kind::Url>;
    /// A wrapped `CFUUIDRef`.
    pub type CFUUID = Handle<kind::Uuid>;
    /// A wrapped `CFNumberRef`.
    pub type CFNumber = Handle<kind::Number>;
    /// A wrapped `CFBooleanRef`.
    pub type CFBoolean = Handle<kind::Boolean>;
    /// A wrapped `CFErrorRef`.
    pub type CFError = Handle<kind::Error>;
    /// A wrapped `CFDateRef`.
    pub type CFDate = Handle<kind::Date>;
    /// A wrapped `CFReadStreamRef`.
    pub type CFReadStream = Handle<kind::ReadStream>;
    /// A wrapped `CFWriteStreamRef`.
    pub type CFWriteStream = Handle<kind::WriteStream>;
    /// A wrapped `CFHTTPMessageRef`.
    pub type CFHTTPMessage = Handle<kind::HttpMessage>;

    /// A wrapped `SecKeychainItemRef`.
    #[cfg(target_os = "macos")]
    pub type SecKeychainItem = Handle<kind::KeychainItem>;
    /// A wrapped `SecCertificateRef`.
    #[cfg(target_os = "macos")]
    pub type SecCertificate = Handle<kind::Certificate>;
    /// A wrapped `SecTransformRef`.
    #[cfg(target_os = "macos")]
    pub type SecTransform = Handle<kind::Transform>;
    /// A wrapped `CGImageSourceRef`.
    #[cfg(target_os = "macos")]
    pub type CGImageSource = Handle<kind::ImageSource>;
}

#[cfg(target_vendor = "apple")]
pub use alias::*;
