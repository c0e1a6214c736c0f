use std::borrow::Borrow;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::ops::Deref;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use crate::container::{ContainerRef, simple_type_name};
use crate::metrics::{MetricsRegistry, OperationAttrs, OperationEvent};

use super::{Observable, classify};

/// Stand-in for an argument that is moved into the container.
struct Opaque;

impl fmt::Debug for Opaque {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("_")
    }
}

static OPAQUE: Opaque = Opaque;

/// A container whose operations are reported to a [`MetricsRegistry`].
///
/// Reads through [`Deref`] are not reported; only the methods on `Tracked`
/// and calls made through [`observe`](Self::observe) are.
pub struct Tracked<C: Observable> {
    inner: C,
    reference: ContainerRef,
    registry: Arc<MetricsRegistry>,
}

impl<C: Observable> Tracked<C> {
    /// Wraps `inner` and issues a fresh identity for it.
    ///
    /// # Arguments
    ///
    /// * `inner` - The container to observe.
    /// * `namespace` - Namespace of the owning code; [`tracked!`](crate::tracked) passes `module_path!()`.
    /// * `registry` - Where the operations are recorded.
    pub fn new(inner: C, namespace: &str, registry: Arc<MetricsRegistry>) -> Self {
        let reference =
            ContainerRef::new(simple_type_name(std::any::type_name::<C>()), namespace);
        Self {
            inner,
            reference,
            registry,
        }
    }

    pub fn reference(&self) -> &ContainerRef {
        &self.reference
    }

    pub fn into_inner(self) -> C {
        self.inner
    }

    /// Runs `op` on the container and records it as a call to `method`.
    ///
    /// Size and capacity are captured right before and right after `op`. If
    /// `op` panics, the partial effect is recorded and the panic resumed.
    pub fn observe<R>(
        &mut self,
        method: &str,
        args: &[&dyn fmt::Debug],
        op: impl FnOnce(&mut C) -> R,
    ) -> R {
        let size_before = self.inner.len();
        let capacity_before = self.inner.capacity();

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| op(&mut self.inner)));

        let attrs = OperationAttrs::new(
            size_before,
            self.inner.len(),
            capacity_before,
            self.inner.capacity(),
        );
        let event = OperationEvent::new(classify(method), method, args, &self.reference, &self.inner);
        self.registry.record(&event, &attrs);

        match outcome {
            Ok(result) => result,
            Err(payload) => panic::resume_unwind(payload),
        }
    }

    /// Empties the container.
    pub fn clear(&mut self)
    where
        C: Clear,
    {
        self.observe("clear", &[], Clear::clear)
    }
}

/// Containers that can be emptied in place.
pub trait Clear {
    fn clear(&mut self);
}

impl<T> Clear for Vec<T> {
    fn clear(&mut self) {
        Vec::clear(self)
    }
}

impl<T, S> Clear for HashSet<T, S> {
    fn clear(&mut self) {
        HashSet::clear(self)
    }
}

impl<K, V, S> Clear for HashMap<K, V, S> {
    fn clear(&mut self) {
        HashMap::clear(self)
    }
}

impl<C: Observable> Deref for Tracked<C> {
    type Target = C;

    fn deref(&self) -> &C {
        &self.inner
    }
}

impl<C: Observable + fmt::Debug> fmt::Debug for Tracked<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tracked")
            .field("reference", &self.reference)
            .field("inner", &self.inner)
            .finish()
    }
}

impl<T> Tracked<Vec<T>> {
    pub fn push(&mut self, value: T) {
        self.observe("push", &[&OPAQUE], |v| v.push(value))
    }

    /// Appends all `values` in a single bulk call.
    pub fn add_all(&mut self, values: impl IntoIterator<Item = T>) {
        let values: Vec<T> = values.into_iter().collect();
        let opaque: &dyn fmt::Debug = &OPAQUE;
        let args = vec![opaque; values.len()];
        self.observe("add", &args, |v| v.extend(values))
    }

    pub fn get(&mut self, index: usize) -> Option<&T> {
        self.observe("get", &[&index], |v| index < v.len());
        self.inner.get(index)
    }

    /// Removes the first element equal to `value`; returns false if there was none.
    pub fn remove(&mut self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.observe("remove", &[&OPAQUE], |v| match v.iter().position(|x| x == value) {
            Some(pos) => {
                v.remove(pos);
                true
            }
            None => false,
        })
    }

    /// Removes the element at `index`, or returns `None` if it is out of bounds.
    pub fn remove_at(&mut self, index: usize) -> Option<T> {
        self.observe("remove", &[&index], |v| {
            (index < v.len()).then(|| v.remove(index))
        })
    }

    pub fn contains(&mut self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.observe("contains", &[&OPAQUE], |v| v.contains(value))
    }
}

impl<T, S> Tracked<HashSet<T, S>>
where
    T: Eq + Hash,
    S: BuildHasher,
{
    pub fn insert(&mut self, value: T) -> bool {
        self.observe("insert", &[&OPAQUE], |s| s.insert(value))
    }

    pub fn remove<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.observe("remove", &[&OPAQUE], |s| s.remove(value))
    }

    pub fn contains<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.observe("contains", &[&OPAQUE], |s| s.contains(value))
    }
}

impl<K, V, S> Tracked<HashMap<K, V, S>>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    /// Inserts a key-value pair; a two-argument call, so it counts as a bulk insert.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.observe("insert", &[&OPAQUE, &OPAQUE], |m| m.insert(key, value))
    }

    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.observe("get", &[&OPAQUE], |m| m.contains_key(key));
        self.inner.get(key)
    }

    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.observe("remove", &[&OPAQUE], |m| m.remove(key))
    }

    pub fn contains_key<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.observe("contains_key", &[&OPAQUE], |m| m.contains_key(key))
    }
}
