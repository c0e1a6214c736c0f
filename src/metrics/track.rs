//! Counters describing how a scalar dimension of a container changes over time.
//!
//! [`DimensionTrack`] is the building block; [`InsertTrack`] and [`RemoveTrack`]
//! wrap one and additionally split the calls they see by arity.

use std::fmt;

use super::event::{OperationAttrs, OperationEvent};

/// Tracks changes of a scalar dimension such as size or capacity.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct DimensionTrack {
    #[serde(skip)]
    label: &'static str,
    changes: u64,
    growths: u64,
    shrinks: u64,
}

impl DimensionTrack {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            changes: 0,
            growths: 0,
            shrinks: 0,
        }
    }

    /// Counts a change whose direction is unknown.
    pub fn track(&mut self) {
        self.changes += 1;
    }

    /// Counts one change and classifies it as growth or shrink.
    ///
    /// Equal values still count as a change but neither grow nor shrink.
    pub fn track_delta(&mut self, before: usize, after: usize) {
        self.changes += 1;
        if after > before {
            self.growths += 1;
        } else if after < before {
            self.shrinks += 1;
        }
    }

    /// Like [`track_delta`](Self::track_delta), but a no-op if either value is absent.
    pub fn track_optional(&mut self, before: Option<usize>, after: Option<usize>) {
        if let (Some(before), Some(after)) = (before, after) {
            self.track_delta(before, after);
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn changes(&self) -> u64 {
        self.changes
    }

    pub fn growths(&self) -> u64 {
        self.growths
    }

    pub fn shrinks(&self) -> u64 {
        self.shrinks
    }
}

impl fmt::Display for DimensionTrack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} (growths: {}, shrinks: {})",
            self.label, self.changes, self.growths, self.shrinks
        )
    }
}

/// Tracks insert calls, split into single-item and bulk calls.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct InsertTrack {
    #[serde(flatten)]
    dimension: DimensionTrack,
    single: u64,
    bulk: u64,
}

impl InsertTrack {
    pub fn new(label: &'static str) -> Self {
        Self {
            dimension: DimensionTrack::new(label),
            single: 0,
            bulk: 0,
        }
    }

    /// Records an insert-classified event.
    pub fn record_operation(&mut self, event: &OperationEvent<'_>) {
        self.dimension.track();
        if event.is_single_arg() {
            self.single += 1;
        } else {
            self.bulk += 1;
        }
    }

    pub fn dimension(&self) -> &DimensionTrack {
        &self.dimension
    }

    pub fn single(&self) -> u64 {
        self.single
    }

    pub fn bulk(&self) -> u64 {
        self.bulk
    }

    /// Number of insert events seen so far.
    pub fn calls(&self) -> u64 {
        self.single + self.bulk
    }
}

impl fmt::Display for InsertTrack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} (single: {}, bulk: {})",
            self.dimension.label, self.dimension.changes, self.single, self.bulk
        )
    }
}

/// Tracks remove calls, split by arity and by whether anything was removed.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct RemoveTrack {
    #[serde(flatten)]
    dimension: DimensionTrack,
    single: u64,
    bulk: u64,
    no_ops: u64,
}

impl RemoveTrack {
    pub fn new(label: &'static str) -> Self {
        Self {
            dimension: DimensionTrack::new(label),
            single: 0,
            bulk: 0,
            no_ops: 0,
        }
    }

    /// Records a remove-classified event.
    ///
    /// A removal that left the size unchanged counts as a no-op, whatever the
    /// number of arguments.
    pub fn record_operation(&mut self, event: &OperationEvent<'_>, attrs: &OperationAttrs) {
        self.dimension
            .track_delta(attrs.size_before, attrs.size_after);
        if event.is_single_arg() {
            self.single += 1;
        } else {
            self.bulk += 1;
        }
        if !attrs.size_changed() {
            self.no_ops += 1;
        }
    }

    pub fn dimension(&self) -> &DimensionTrack {
        &self.dimension
    }

    pub fn single(&self) -> u64 {
        self.single
    }

    pub fn bulk(&self) -> u64 {
        self.bulk
    }

    pub fn no_ops(&self) -> u64 {
        self.no_ops
    }

    /// Number of remove events seen so far.
    pub fn calls(&self) -> u64 {
        self.single + self.bulk
    }
}

impl fmt::Display for RemoveTrack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} (single: {}, bulk: {}, no-ops: {})",
            self.dimension.label, self.dimension.changes, self.single, self.bulk, self.no_ops
        )
    }
}

#[cfg(test)]
mod tests {
    use std::fmt::Debug;

    use super::*;
    use crate::container::ContainerRef;
    use crate::metrics::OperationKind;

    #[test]
    fn test_track_delta_classification() {
        let mut track = DimensionTrack::new("Size changes");

        track.track_delta(5, 5);
        assert_eq!((track.changes(), track.growths(), track.shrinks()), (1, 0, 0));

        track.track_delta(5, 8);
        assert_eq!((track.changes(), track.growths(), track.shrinks()), (2, 1, 0));

        track.track_delta(8, 5);
        assert_eq!((track.changes(), track.growths(), track.shrinks()), (3, 1, 1));
    }

    #[test]
    fn test_track_is_unconditional() {
        let mut track = DimensionTrack::new("Size changes");
        track.track();
        track.track();
        assert_eq!(track.changes(), 2);
        assert_eq!(track.growths() + track.shrinks(), 0);
    }

    #[test]
    fn test_track_optional_skips_absent_capacity() {
        let mut track = DimensionTrack::new("Capacity changes");
        track.track_optional(None, Some(4));
        track.track_optional(Some(4), None);
        assert_eq!(track.changes(), 0);

        track.track_optional(Some(4), Some(8));
        assert_eq!((track.changes(), track.growths()), (1, 1));
    }

    #[test]
    fn test_insert_arity_split() {
        let reference = ContainerRef::new("Vec", "app");
        let container: Vec<u8> = Vec::new();
        let one: &[&dyn Debug] = &[&1];
        let three: &[&dyn Debug] = &[&1, &2, &3];
        let mut inserts = InsertTrack::new("Inserts");

        inserts.record_operation(&OperationEvent::new(
            OperationKind::Insert,
            "push",
            one,
            &reference,
            &container,
        ));
        assert_eq!((inserts.single(), inserts.bulk()), (1, 0));

        inserts.record_operation(&OperationEvent::new(
            OperationKind::Insert,
            "add",
            three,
            &reference,
            &container,
        ));
        assert_eq!((inserts.single(), inserts.bulk()), (1, 1));
        assert_eq!(inserts.calls(), inserts.dimension().changes());
    }

    #[test]
    fn test_remove_no_op_detection() {
        let reference = ContainerRef::new("Vec", "app");
        let container: Vec<u8> = vec![1, 2];
        let one: &[&dyn Debug] = &[&9];
        let two: &[&dyn Debug] = &[&8, &9];
        let mut removals = RemoveTrack::new("Removals");

        let single = OperationEvent::new(OperationKind::Remove, "remove", one, &reference, &container);
        removals.record_operation(&single, &OperationAttrs::sized(2, 2));
        assert_eq!((removals.single(), removals.no_ops()), (1, 1));

        let bulk = OperationEvent::new(OperationKind::Remove, "remove", two, &reference, &container);
        removals.record_operation(&bulk, &OperationAttrs::sized(2, 2));
        assert_eq!((removals.bulk(), removals.no_ops()), (1, 2));

        removals.record_operation(&single, &OperationAttrs::sized(3, 2));
        assert_eq!(removals.no_ops(), 2);
        assert_eq!(removals.dimension().shrinks(), 1);
        assert_eq!(removals.calls(), 3);
    }

    #[test]
    fn test_display() {
        let mut track = DimensionTrack::new("Size changes");
        track.track_delta(0, 1);
        assert_eq!(track.to_string(), "Size changes: 1 (growths: 1, shrinks: 0)");
    }
}
