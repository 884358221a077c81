//! A scoped, one-shot deferred action.
//!
//! [`Deferred`] holds a zero-argument closure and invokes it exactly once
//! when it is dropped, on every exit path out of the enclosing scope,
//! including panic unwind. It is the `defer` of Swift and Go, and a
//! lightweight alternative to a smart pointer with a custom deleter when the
//! resource to clean up is not a pointer at all.
//!
//! ```
//! use refscope_defer::defer;
//! use std::cell::RefCell;
//!
//! let log = RefCell::new(Vec::new());
//! {
//!     let _cleanup = defer(|| log.borrow_mut().push("closed"));
//!     log.borrow_mut().push("open");
//! }
//! assert_eq!(*log.borrow(), ["open", "closed"]);
//! ```
//!
//! Within one scope, deferred actions run in reverse construction order,
//! like any other drop.

/// Runs `action` when the returned guard goes out of scope.
///
/// The guard must be bound to a named variable; `let _ = defer(..)` drops it
/// immediately and runs the action on the spot.
pub fn defer<F: FnOnce()>(action: F) -> Deferred<F> {
    Deferred::new(action)
}

/// A holder that invokes its action exactly once, at destruction.
///
/// The action is stored by value, so the guard may capture moves and
/// temporaries without dangling. The guard is not `Clone`; there is no way
/// to run the action twice or to cancel it.
pub struct Deferred<F: FnOnce()> {
    action: Option<F>,
}

impl<F: FnOnce()> Deferred<F> {
    /// Creates a new guard executing `action` when dropped.
    ///
    /// Nothing runs at construction.
    pub fn new(action: F) -> Deferred<F> {
        Deferred {
            action: Some(action),
        }
    }
}

impl<F: FnOnce()> Drop for Deferred<F> {
    fn drop(&mut self) {
        // `action` is present until this point; `Drop` runs at most once.
        if let Some(action) = self.action.take() {
            action();
        }
    }
}

impl<F: FnOnce()> std::fmt::Debug for Deferred<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Deferred").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::panic::{AssertUnwindSafe, catch_unwind};
    use std::rc::Rc;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn runs_exactly_once_at_scope_end() {
        let fired = Cell::new(false);
        {
            let _cleanup = defer(|| fired.set(true));
            assert!(!fired.get());
        }
        assert!(fired.get());
    }

    #[test]
    fn runs_in_reverse_construction_order() {
        let order = RefCell::new(Vec::new());
        {
            let _first = defer(|| order.borrow_mut().push("first"));
            let _second = defer(|| order.borrow_mut().push("second"));
            let _third = defer(|| order.borrow_mut().push("third"));
        }
        assert_eq!(*order.borrow(), ["third", "second", "first"]);
    }

    #[test]
    fn runs_during_panic_unwind() {
        let count = Arc::new(AtomicUsize::new(0));
        let seen = count.clone();
        let outcome = catch_unwind(AssertUnwindSafe(move || {
            let _cleanup = defer(|| {
                seen.fetch_add(1, Ordering::SeqCst);
            });
            panic!("unwind");
        }));
        assert!(outcome.is_err());
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn action_is_stored_by_value() {
        let collected = Rc::new(RefCell::new(String::new()));
        let sink = collected.clone();
        let token = String::from("moved into the guard");
        {
            let _cleanup = defer(move || sink.borrow_mut().push_str(&token));
        }
        assert_eq!(*collected.borrow(), "moved into the guard");
    }

    #[test]
    fn explicit_drop_runs_the_action_early() {
        let fired = Cell::new(false);
        let cleanup = defer(|| fired.set(true));
        assert!(!fired.get());
        drop(cleanup);
        assert!(fired.get());
    }
}
