use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, LinkedList, VecDeque};

/// A container whose size, and possibly capacity, can be observed.
pub trait Observable {
    /// Number of elements currently stored.
    fn len(&self) -> usize;

    /// Allocated capacity, or `None` if the container has no such concept.
    fn capacity(&self) -> Option<usize>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> Observable for Vec<T> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn capacity(&self) -> Option<usize> {
        Some(Vec::capacity(self))
    }
}

impl<T> Observable for VecDeque<T> {
    fn len(&self) -> usize {
        VecDeque::len(self)
    }

    fn capacity(&self) -> Option<usize> {
        Some(VecDeque::capacity(self))
    }
}

impl<T, S> Observable for HashSet<T, S> {
    fn len(&self) -> usize {
        HashSet::len(self)
    }

    fn capacity(&self) -> Option<usize> {
        Some(HashSet::capacity(self))
    }
}

impl<K, V, S> Observable for HashMap<K, V, S> {
    fn len(&self) -> usize {
        HashMap::len(self)
    }

    fn capacity(&self) -> Option<usize> {
        Some(HashMap::capacity(self))
    }
}

impl<T> Observable for LinkedList<T> {
    fn len(&self) -> usize {
        LinkedList::len(self)
    }

    fn capacity(&self) -> Option<usize> {
        None
    }
}

impl<T> Observable for BTreeSet<T> {
    fn len(&self) -> usize {
        BTreeSet::len(self)
    }

    fn capacity(&self) -> Option<usize> {
        None
    }
}

impl<K, V> Observable for BTreeMap<K, V> {
    fn len(&self) -> usize {
        BTreeMap::len(self)
    }

    fn capacity(&self) -> Option<usize> {
        None
    }
}
