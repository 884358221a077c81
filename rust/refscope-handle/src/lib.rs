//! Scoped ownership of reference-counted host object handles.
//!
//! [`Handle`] binds an opaque, reference-counted host object to a lexical
//! scope: it holds the raw reference together with an ownership flag, retains
//! on clone when it owns, and releases exactly once on drop, across every
//! exit path. The host system itself stays behind the [`host::HostKind`]
//! seam; this crate only does the bookkeeping.

use std::fmt;
use std::marker::PhantomData;
use std::ptr;

use thiserror::Error;

pub mod host;

use host::{HostKind, RawRef};

/// A scoped owner of a single host object reference.
///
/// A handle is in one of three states:
///
/// * **Empty** - holds no reference; dropping it is a no-op.
/// * **Owning** - holds a non-null reference and is responsible for releasing
///   it exactly once when dropped.
/// * **Borrowing** - holds a non-null reference on behalf of some other
///   owner; dropping it performs no host call.
///
/// Cloning an owning handle retains one additional reference, so the clone
/// and the original each release their own. Moves transfer the reference
/// without touching the count; a source that must remain usable afterwards
/// is emptied with [`std::mem::take`].
///
/// Native assignment (`a = b`) is drop-then-move: the old value releases
/// unconditionally, even when both sides hold the identical reference. When
/// the right-hand side might alias the left (in particular a borrowed view
/// of the same object), assign through [`Handle::assign_from`] or
/// [`Handle::assign_taken_from`], which treat the identical-handle case as a
/// no-op.
///
/// `Handle` is neither `Send` nor `Sync`: a single instance belongs to one
/// thread at a time. Two distinct handles may reference the same object from
/// different threads when the host's count primitives are thread-safe.
pub struct Handle<K: HostKind> {
    raw: RawRef,
    owns: bool,
    _kind: PhantomData<K>,
}

impl<K: HostKind> Handle<K> {
    /// Creates an empty handle.
    pub const fn new() -> Handle<K> {
        Handle {
            raw: ptr::null(),
            owns: false,
            _kind: PhantomData,
        }
    }

    /// Wraps `raw`, taking over responsibility for one outstanding reference.
    ///
    /// No host call is made: the caller's +1 transfers to the handle, which
    /// will release it on drop. A null `raw` yields an empty handle.
    ///
    /// # Safety
    ///
    /// `raw` must be null, or identify a live host object of kind `K` on
    /// which the caller holds a reference that it hereby gives up.
    pub unsafe fn adopt(raw: RawRef) -> Handle<K> {
        Handle {
            raw,
            owns: true,
            _kind: PhantomData,
        }
    }

    /// Wraps `raw` without taking responsibility for any reference.
    ///
    /// The handle performs no host call on drop; some other owner must keep
    /// the object alive for as long as this handle is used.
    ///
    /// # Safety
    ///
    /// `raw` must be null, or identify a host object of kind `K` that stays
    /// live for the lifetime of the returned handle.
    pub unsafe fn borrowed(raw: RawRef) -> Handle<K> {
        Handle {
            raw,
            owns: false,
            _kind: PhantomData,
        }
    }

    /// Replaces the held reference with `raw`, adopting one outstanding
    /// reference to it.
    ///
    /// When `raw` is identical to the currently held reference this is a
    /// no-op. Otherwise the current reference is released if owned, and the
    /// handle becomes the owner of `raw`.
    ///
    /// # Safety
    ///
    /// Same contract as [`Handle::adopt`].
    pub unsafe fn set_adopted(&mut self, raw: RawRef) {
        if self.raw == raw {
            return;
        }
        if self.owns && !self.raw.is_null() {
            unsafe { K::release(self.raw) };
        }
        self.raw = raw;
        self.owns = true;
    }

    /// Copy-assigns from `source`: releases the current reference if owned,
    /// then holds `source`'s reference with its ownership flag, retaining
    /// when that flag is set.
    ///
    /// When `source` holds the identical reference this is a no-op, whatever
    /// the two ownership flags: releasing first would destroy an object the
    /// aliasing source still points at.
    pub fn assign_from(&mut self, source: &Handle<K>) {
        if self.raw == source.raw {
            return;
        }
        if self.owns && !self.raw.is_null() {
            unsafe { K::release(self.raw) };
        }
        self.raw = source.raw;
        self.owns = source.owns;
        if self.owns && !self.raw.is_null() {
            unsafe { K::retain(self.raw) };
        }
    }

    /// Move-assigns from `source`: releases the current reference if owned,
    /// then takes over `source`'s reference and ownership flag, leaving
    /// `source` empty. No count is touched.
    ///
    /// When `source` holds the identical reference this is a no-op and
    /// `source` keeps its reference.
    pub fn assign_taken_from(&mut self, source: &mut Handle<K>) {
        if self.raw == source.raw {
            return;
        }
        if self.owns && !self.raw.is_null() {
            unsafe { K::release(self.raw) };
        }
        self.raw = source.raw;
        self.owns = source.owns;
        source.raw = ptr::null();
    }

    /// Surrenders the held reference to the caller and leaves the handle
    /// empty.
    ///
    /// No release happens, now or at drop: if the handle was owning, the
    /// caller becomes responsible for the outstanding reference. Returns
    /// null when the handle is empty.
    pub fn relinquish(&mut self) -> RawRef {
        let raw = self.raw;
        self.raw = ptr::null();
        raw
    }

    /// Returns the held reference without transferring ownership.
    #[inline]
    pub fn as_raw(&self) -> RawRef {
        self.raw
    }

    /// Returns `true` if the handle holds no reference.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.raw.is_null()
    }

    /// Returns `true` if the handle will release its reference on drop.
    #[inline]
    pub fn owns_handle(&self) -> bool {
        self.owns && !self.raw.is_null()
    }

    /// Turns the handle into an out-parameter slot for a host factory call.
    ///
    /// Errors with [`SlotOccupied`] unless the handle is empty; silently
    /// overwriting a held reference would leak it. On success the returned
    /// guard exposes the slot as a `*mut RawRef`; once the guard drops, the
    /// handle owns whatever reference the factory wrote (or stays empty if
    /// the factory wrote nothing).
    pub fn out_slot(&mut self) -> Result<OutSlot<'_, K>, SlotOccupied> {
        if !self.raw.is_null() {
            return Err(SlotOccupied);
        }
        Ok(OutSlot { handle: self })
    }
}

impl<K: HostKind> Default for Handle<K> {
    fn default() -> Handle<K> {
        Handle::new()
    }
}

impl<K: HostKind> Clone for Handle<K> {
    fn clone(&self) -> Handle<K> {
        if self.owns && !self.raw.is_null() {
            unsafe { K::retain(self.raw) };
        }
        Handle {
            raw: self.raw,
            owns: self.owns,
            _kind: PhantomData,
        }
    }
}

impl<K: HostKind> Drop for Handle<K> {
    fn drop(&mut self) {
        if self.owns && !self.raw.is_null() {
            unsafe { K::release(self.raw) };
        }
        self.raw = ptr::null();
    }
}

impl<K: HostKind> PartialEq for Handle<K> {
    /// Reference identity first (two empty handles are equal), then the host
    /// system's equality predicate. An empty handle never equals a non-empty
    /// one.
    fn eq(&self, other: &Handle<K>) -> bool {
        if self.raw == other.raw {
            return true;
        }
        if self.raw.is_null() || other.raw.is_null() {
            return false;
        }
        unsafe { K::equal(self.raw, other.raw) }
    }
}

impl<K: HostKind> fmt::Debug for Handle<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.raw.is_null() {
            "empty"
        } else if self.owns {
            "owning"
        } else {
            "borrowing"
        };
        f.debug_struct("Handle")
            .field("raw", &self.raw)
            .field("state", &state)
            .finish()
    }
}

/// A writable single-reference slot borrowed from an empty [`Handle`],
/// destined for a host factory's out-parameter.
///
/// When the guard drops, the originating handle becomes the owner of the
/// reference written into the slot, if any.
pub struct OutSlot<'a, K: HostKind> {
    handle: &'a mut Handle<K>,
}

impl<K: HostKind> OutSlot<'_, K> {
    /// Returns the slot as a raw out-parameter pointer.
    ///
    /// # Safety of use
    ///
    /// The pointer is valid for writes for the lifetime of the guard. Any
    /// reference written must be one the caller owns; the handle adopts it
    /// when the guard drops.
    pub fn as_mut_ptr(&mut self) -> *mut RawRef {
        &mut self.handle.raw
    }
}

impl<K: HostKind> Drop for OutSlot<'_, K> {
    fn drop(&mut self) {
        // Adopt whatever the factory wrote. Remains harmless if the slot is
        // still null: an empty handle never releases.
        self.handle.owns = true;
    }
}

/// Error returned by [`Handle::out_slot`] when the handle already holds a
/// reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("out-parameter slot already holds a handle")]
pub struct SlotOccupied;

