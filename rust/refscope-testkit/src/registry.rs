//! The object registry backing the instrumented host system.
//!
//! Handles are never dereferenced: a handle is an opaque id minted by the
//! registry and cast to the pointer-sized [`RawRef`]. All state lives behind
//! one process-wide mutex, which also makes the count primitives thread-safe.

use std::collections::HashMap;
use std::sync::{Mutex, OnceLock};

use log::{trace, warn};
use refscope_handle::host::RawRef;

/// The payload of a host object, one variant per factory kind.
#[derive(Debug, Clone)]
pub(crate) enum Value {
    String(String),
    Number(i64),
    Data(Vec<u8>),
    Array {
        capacity: usize,
        /// Ids of retained elements, released when the array is destroyed.
        elements: Vec<usize>,
    },
    Dictionary {
        capacity: usize,
        /// Ids of retained (key, value) pairs, released on destruction.
        entries: Vec<(usize, usize)>,
    },
}

struct Object {
    refs: usize,
    value: Value,
}

struct Registry {
    objects: HashMap<usize, Object>,
    next_id: usize,
}

fn registry() -> &'static Mutex<Registry> {
    static REGISTRY: OnceLock<Mutex<Registry>> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        Mutex::new(Registry {
            objects: HashMap::new(),
            // Id zero is reserved so that a null RawRef never resolves.
            next_id: 1,
        })
    })
}

fn raw_to_id(raw: RawRef) -> usize {
    raw as usize
}

fn id_to_raw(id: usize) -> RawRef {
    id as RawRef
}

/// Registers a new object with a reference count of one and returns its
/// handle.
pub(crate) fn create(value: Value) -> RawRef {
    let mut reg = registry().lock().unwrap();
    let id = reg.next_id;
    reg.next_id += 1;
    trace!("host create id={id} value={value:?}");
    reg.objects.insert(id, Object { refs: 1, value });
    id_to_raw(id)
}

/// Creates an array object, retaining every element.
///
/// Returns null when any element handle is dead; ids are never reused, so a
/// dead element cannot be confused with a live one.
pub(crate) fn create_array(capacity: usize, values: &[RawRef]) -> RawRef {
    let mut reg = registry().lock().unwrap();
    let elements: Vec<usize> = values.iter().map(|&raw| raw_to_id(raw)).collect();
    if !elements.iter().all(|id| reg.objects.contains_key(id)) {
        return std::ptr::null();
    }
    for &id in &elements {
        retain_locked(&mut reg, id);
    }
    let id = reg.next_id;
    reg.next_id += 1;
    trace!("host create id={id} array len={}", elements.len());
    reg.objects.insert(
        id,
        Object {
            refs: 1,
            value: Value::Array { capacity, elements },
        },
    );
    id_to_raw(id)
}

/// Creates a dictionary object from parallel key and value buffers,
/// retaining every key and value.
///
/// Returns null when the buffers differ in length or any handle is dead.
pub(crate) fn create_dictionary(capacity: usize, keys: &[RawRef], values: &[RawRef]) -> RawRef {
    if keys.len() != values.len() {
        return std::ptr::null();
    }
    let mut reg = registry().lock().unwrap();
    let entries: Vec<(usize, usize)> = keys
        .iter()
        .zip(values)
        .map(|(&k, &v)| (raw_to_id(k), raw_to_id(v)))
        .collect();
    let all_live = entries
        .iter()
        .all(|&(k, v)| reg.objects.contains_key(&k) && reg.objects.contains_key(&v));
    if !all_live {
        return std::ptr::null();
    }
    for &(k, v) in &entries {
        retain_locked(&mut reg, k);
        retain_locked(&mut reg, v);
    }
    let id = reg.next_id;
    reg.next_id += 1;
    trace!("host create id={id} dictionary len={}", entries.len());
    reg.objects.insert(
        id,
        Object {
            refs: 1,
            value: Value::Dictionary { capacity, entries },
        },
    );
    id_to_raw(id)
}

/// Adds one reference. Panics on a dead handle: that is a bookkeeping bug in
/// the code under test.
pub(crate) fn retain(raw: RawRef) {
    let mut reg = registry().lock().unwrap();
    retain_locked(&mut reg, raw_to_id(raw));
}

fn retain_locked(reg: &mut Registry, id: usize) {
    let object = reg
        .objects
        .get_mut(&id)
        .expect("retain of a dead host handle");
    object.refs += 1;
    trace!("host retain id={id} refs={}", object.refs);
}

/// Removes one reference, destroying the object at zero. Panics on a dead
/// handle, which would be a double release in the code under test.
pub(crate) fn release(raw: RawRef) {
    let mut reg = registry().lock().unwrap();
    release_locked(&mut reg, raw_to_id(raw));
}

fn release_locked(reg: &mut Registry, id: usize) {
    let object = reg
        .objects
        .get_mut(&id)
        .expect("release of a dead host handle");
    object.refs -= 1;
    trace!("host release id={id} refs={}", object.refs);
    if object.refs == 0 {
        let object = reg.objects.remove(&id).unwrap();
        trace!("host destroy id={id}");
        match object.value {
            Value::Array { elements, .. } => {
                for element in elements {
                    release_locked(reg, element);
                }
            }
            Value::Dictionary { entries, .. } => {
                for (key, value) in entries {
                    release_locked(reg, key);
                    release_locked(reg, value);
                }
            }
            _ => {}
        }
    }
}

/// The host equality predicate: deep structural equality over values.
///
/// Container capacity does not participate; two arrays with equal element
/// sequences are equal. Dictionary comparison is entry-order-sensitive:
/// equal pairs in a different insertion order compare unequal, unlike a real
/// hashed host dictionary. Panics when either handle is dead.
pub(crate) fn equal(a: RawRef, b: RawRef) -> bool {
    let reg = registry().lock().unwrap();
    let a = raw_to_id(a);
    let b = raw_to_id(b);
    assert!(
        reg.objects.contains_key(&a) && reg.objects.contains_key(&b),
        "equality test on a dead host handle"
    );
    value_eq(&reg, a, b)
}

fn value_eq(reg: &Registry, a: usize, b: usize) -> bool {
    if a == b {
        return true;
    }
    match (&reg.objects[&a].value, &reg.objects[&b].value) {
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => x == y,
        (Value::Data(x), Value::Data(y)) => x == y,
        (Value::Array { elements: x, .. }, Value::Array { elements: y, .. }) => {
            x.len() == y.len() && x.iter().zip(y).all(|(&p, &q)| value_eq(reg, p, q))
        }
        (Value::Dictionary { entries: x, .. }, Value::Dictionary { entries: y, .. }) => {
            x.len() == y.len()
                && x.iter()
                    .zip(y)
                    .all(|(&(pk, pv), &(qk, qv))| value_eq(reg, pk, qk) && value_eq(reg, pv, qv))
        }
        _ => false,
    }
}

/// Returns the reference count of `raw`, or `None` when the object has been
/// destroyed (or never existed).
pub fn ref_count(raw: RawRef) -> Option<usize> {
    let reg = registry().lock().unwrap();
    reg.objects.get(&raw_to_id(raw)).map(|object| object.refs)
}

/// Returns `true` if `raw` identifies a live object.
pub fn is_live(raw: RawRef) -> bool {
    let reg = registry().lock().unwrap();
    reg.objects.contains_key(&raw_to_id(raw))
}

/// Number of live objects in the registry.
///
/// The registry is process-wide; under a parallel test runner this counts
/// objects from every running test.
pub fn live_objects() -> usize {
    let reg = registry().lock().unwrap();
    reg.objects.len()
}

/// Releases one reference on a raw handle, for tests that took a reference
/// out of a wrapper via relinquish and must balance it by hand.
///
/// Panics when `raw` is dead.
pub fn release_raw(raw: RawRef) {
    release(raw);
}

/// Warns when the registry still holds live objects and returns `true` when
/// it is empty.
pub fn check_balanced() -> bool {
    let live = live_objects();
    if live != 0 {
        warn!("host registry is not balanced: {live} live object(s)");
    }
    live == 0
}
