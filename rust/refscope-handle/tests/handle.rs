//! Handle bookkeeping tests against the instrumented testkit host.

use refscope_handle::{Handle, SlotOccupied};
use refscope_testkit as host_sys;
use refscope_testkit::{ArrayKind, DataKind, Encoding, NumberKind, StringKind};

fn new_string(text: &str) -> Handle<StringKind> {
    host_sys::string_from_bytes(text.as_bytes(), Encoding::Utf8)
}

#[test]
fn factory_result_is_owning_and_truthy() {
    let s = new_string("hello");
    assert!(!s.is_empty());
    assert!(s.owns_handle());
    assert_eq!(host_sys::ref_count(s.as_raw()), Some(1));
}

#[test]
fn drop_releases_adopted_reference() {
    let raw;
    {
        let s = new_string("hello");
        raw = s.as_raw();
        assert!(host_sys::is_live(raw));
    }
    assert!(!host_sys::is_live(raw));
}

#[test]
fn adopt_does_not_change_ref_count() {
    let mut s = new_string("adopted");
    let raw = s.relinquish();
    assert_eq!(host_sys::ref_count(raw), Some(1));

    let readopted = unsafe { Handle::<StringKind>::adopt(raw) };
    assert_eq!(host_sys::ref_count(raw), Some(1));
    drop(readopted);
    assert!(!host_sys::is_live(raw));
}

#[test]
fn clone_retains_and_each_drop_releases_once() {
    let a: Handle<ArrayKind> = host_sys::array_with_capacity(4);
    let raw = a.as_raw();
    assert_eq!(host_sys::ref_count(raw), Some(1));

    let b = a.clone();
    assert_eq!(host_sys::ref_count(raw), Some(2));
    assert!(a == b);

    drop(b);
    assert_eq!(host_sys::ref_count(raw), Some(1));
    assert!(!a.is_empty());

    drop(a);
    assert!(!host_sys::is_live(raw));
}

#[test]
fn move_transfers_ownership_without_host_calls() {
    let mut a: Handle<DataKind> = host_sys::data_from_bytes(&[0u8; 8]);
    let raw = a.as_raw();

    let b = std::mem::take(&mut a);
    assert!(a.is_empty());
    assert!(!b.is_empty());
    assert_eq!(host_sys::ref_count(raw), Some(1));

    drop(a);
    assert!(host_sys::is_live(raw));
    drop(b);
    assert!(!host_sys::is_live(raw));
}

#[test]
fn relinquish_suppresses_release() {
    let mut a: Handle<NumberKind> = host_sys::number_from_i32(42);
    let h = a.relinquish();
    assert!(a.is_empty());

    drop(a);
    assert_eq!(host_sys::ref_count(h), Some(1));

    host_sys::release_raw(h);
    assert!(!host_sys::is_live(h));
}

#[test]
fn relinquish_on_empty_returns_null() {
    let mut a = Handle::<StringKind>::new();
    assert!(a.relinquish().is_null());
}

#[test]
fn borrowed_handle_never_touches_the_count() {
    let owner = new_string("borrowed");
    let raw = owner.as_raw();
    {
        let b = unsafe { Handle::<StringKind>::borrowed(raw) };
        assert!(!b.is_empty());
        assert!(!b.owns_handle());
        assert_eq!(host_sys::ref_count(raw), Some(1));

        let c = b.clone();
        assert_eq!(host_sys::ref_count(raw), Some(1));
        drop(c);
    }
    assert_eq!(host_sys::ref_count(raw), Some(1));
}

#[test]
fn set_adopted_with_identical_reference_is_a_no_op() {
    let mut s = new_string("same");
    let raw = s.as_raw();
    unsafe { s.set_adopted(raw) };
    assert_eq!(host_sys::ref_count(raw), Some(1));
    assert!(s.owns_handle());
}

#[test]
fn set_adopted_releases_the_previous_reference() {
    let mut s = new_string("old");
    let old_raw = s.as_raw();

    let mut other = new_string("new");
    let new_raw = other.relinquish();

    unsafe { s.set_adopted(new_raw) };
    assert!(!host_sys::is_live(old_raw));
    assert_eq!(host_sys::ref_count(new_raw), Some(1));
    assert_eq!(s.as_raw(), new_raw);
}

#[test]
fn assignment_releases_the_previous_reference() {
    let mut s = new_string("first");
    let first_raw = s.as_raw();

    s = new_string("second");
    assert!(!host_sys::is_live(first_raw));
    assert!(host_sys::is_live(s.as_raw()));
}

#[test]
fn assign_from_retains_for_the_destination() {
    let source = new_string("shared");
    let raw = source.as_raw();

    let mut dest = new_string("replaced");
    let replaced_raw = dest.as_raw();

    dest.assign_from(&source);
    assert!(!host_sys::is_live(replaced_raw));
    assert_eq!(host_sys::ref_count(raw), Some(2));
    assert!(dest.owns_handle());

    drop(dest);
    assert_eq!(host_sys::ref_count(raw), Some(1));
    drop(source);
    assert!(!host_sys::is_live(raw));
}

#[test]
fn assign_from_identical_handle_keeps_the_object_alive() {
    // An owning wrapper assigned a borrowed view of its own object must not
    // release the only reference.
    let mut a = new_string("aliased");
    let raw = a.as_raw();
    let b = unsafe { Handle::<StringKind>::borrowed(raw) };

    a.assign_from(&b);
    assert!(host_sys::is_live(raw));
    assert_eq!(host_sys::ref_count(raw), Some(1));
    // The no-op leaves the ownership flag alone as well.
    assert!(a.owns_handle());

    drop(b);
    drop(a);
    assert!(!host_sys::is_live(raw));
}

#[test]
fn assign_from_a_borrowing_source_does_not_retain() {
    let owner = new_string("lent");
    let raw = owner.as_raw();
    let source = unsafe { Handle::<StringKind>::borrowed(raw) };

    let mut dest = Handle::<StringKind>::new();
    dest.assign_from(&source);
    assert!(!dest.owns_handle());
    assert_eq!(host_sys::ref_count(raw), Some(1));

    drop(dest);
    assert_eq!(host_sys::ref_count(raw), Some(1));
}

#[test]
fn assign_taken_from_transfers_without_host_calls() {
    let mut source = new_string("moving");
    let raw = source.as_raw();

    let mut dest = new_string("replaced");
    let replaced_raw = dest.as_raw();

    dest.assign_taken_from(&mut source);
    assert!(!host_sys::is_live(replaced_raw));
    assert!(source.is_empty());
    assert_eq!(host_sys::ref_count(raw), Some(1));
    assert!(dest.owns_handle());

    drop(dest);
    assert!(!host_sys::is_live(raw));
}

#[test]
fn assign_taken_from_identical_handle_keeps_the_source() {
    let mut a = new_string("kept");
    let raw = a.as_raw();
    let mut b = unsafe { Handle::<StringKind>::borrowed(raw) };

    a.assign_taken_from(&mut b);
    assert!(!b.is_empty());
    assert!(host_sys::is_live(raw));
    assert_eq!(host_sys::ref_count(raw), Some(1));
}

#[test]
fn equality_follows_the_host_predicate() {
    let a = new_string("same text");
    let b = new_string("same text");
    let c = new_string("different");
    assert_ne!(a.as_raw(), b.as_raw());
    assert!(a == b);
    assert!(!(a == c));
}

#[test]
fn equality_handles_empty_handles() {
    let empty_a = Handle::<StringKind>::new();
    let empty_b = Handle::<StringKind>::new();
    let full = new_string("x");
    assert!(empty_a == empty_b);
    assert!(!(empty_a == full));
    assert!(!(full == empty_a));
}

#[test]
fn equality_is_reflexive_on_identity() {
    let a = new_string("self");
    let b = unsafe { Handle::<StringKind>::borrowed(a.as_raw()) };
    assert!(a == b);
}

#[test]
fn out_slot_requires_an_empty_handle() {
    let mut full = new_string("occupied");
    assert!(matches!(full.out_slot(), Err(SlotOccupied)));
    // The failed attempt must not disturb the held reference.
    assert!(full.owns_handle());
    assert_eq!(host_sys::ref_count(full.as_raw()), Some(1));
}

#[test]
fn out_slot_adopts_what_the_factory_writes() {
    let mut produced = new_string("factory result");
    let raw = produced.relinquish();

    let mut dest = Handle::<StringKind>::new();
    {
        let mut slot = dest.out_slot().unwrap();
        unsafe { slot.as_mut_ptr().write(raw) };
    }
    assert!(dest.owns_handle());
    assert_eq!(host_sys::ref_count(raw), Some(1));

    drop(dest);
    assert!(!host_sys::is_live(raw));
}

#[test]
fn out_slot_left_unwritten_stays_empty() {
    let mut dest = Handle::<StringKind>::new();
    {
        let _slot = dest.out_slot().unwrap();
    }
    assert!(dest.is_empty());
    // Dropping an empty handle performs no host call.
}

#[test]
fn nested_object_lifetimes_follow_the_container() {
    let element = new_string("element");
    let element_raw = element.as_raw();

    let array = host_sys::array_from_values(&[element_raw]);
    // The array retains its elements.
    assert_eq!(host_sys::ref_count(element_raw), Some(2));

    drop(element);
    assert_eq!(host_sys::ref_count(element_raw), Some(1));

    drop(array);
    assert!(!host_sys::is_live(element_raw));
}

#[test]
fn debug_reports_the_ownership_state() {
    let empty = Handle::<StringKind>::new();
    assert!(format!("{empty:?}").contains("empty"));

    let owning = new_string("dbg");
    assert!(format!("{owning:?}").contains("owning"));

    let borrowing = unsafe { Handle::<StringKind>::borrowed(owning.as_raw()) };
    assert!(format!("{borrowing:?}").contains("borrowing"));
}
