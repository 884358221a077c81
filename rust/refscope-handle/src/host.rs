//! The contract between [`Handle`](crate::Handle) and the host object system.

use std::ffi::c_void;

/// An opaque, pointer-sized value identifying a host object.
///
/// A null `RawRef` is the "empty" sentinel: it identifies no object, and no
/// reference-count primitive is ever invoked on it.
pub type RawRef = *const c_void;

/// A kind of host object managed through the host system's reference-count
/// primitives.
///
/// Implementations are zero-sized markers, one per host-object kind. The
/// three operations forward to the host system's retain, release and
/// equality primitives; [`Handle`](crate::Handle) calls them only with
/// non-null references.
///
/// # Safety
///
/// An implementation must uphold the host system's reference-count contract:
///
/// * `retain` adds exactly one reference to the object identified by `raw`.
/// * `release` removes exactly one reference, destroying the object when the
///   count reaches zero.
/// * `equal` is valid for any two live, non-null references and implements
///   an equivalence relation over the objects they identify.
///
/// Violating any of these turns the bookkeeping done by `Handle` into
/// over- or under-release of live objects.
pub unsafe trait HostKind {
    /// Adds one reference to the object identified by `raw`.
    ///
    /// # Safety
    ///
    /// `raw` must be non-null and identify a live host object of this kind.
    unsafe fn retain(raw: RawRef);

    /// Removes one reference from the object identified by `raw`, destroying
    /// it when the count reaches zero.
    ///
    /// # Safety
    ///
    /// `raw` must be non-null and identify a live host object of this kind,
    /// and the caller must be giving up a reference it holds.
    unsafe fn release(raw: RawRef);

    /// Returns `true` if the two referenced objects are equal according to
    /// the host system.
    ///
    /// # Safety
    ///
    /// Both `a` and `b` must be non-null and identify live host objects.
    unsafe fn equal(a: RawRef, b: RawRef) -> bool;
}
