use std::fmt;

use super::event::{OperationAttrs, OperationEvent, OperationKind};
use super::track::{DimensionTrack, InsertTrack, RemoveTrack};

/// Aggregated usage of one tracked container.
///
/// `calls` always equals `lookups + clears + inserts + removals + others`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ContainerMetric {
    calls: u64,
    lookups: u64,
    clears: u64,
    others: u64,
    size: DimensionTrack,
    capacity: DimensionTrack,
    inserts: InsertTrack,
    removals: RemoveTrack,
}

impl Default for ContainerMetric {
    fn default() -> Self {
        Self {
            calls: 0,
            lookups: 0,
            clears: 0,
            others: 0,
            size: DimensionTrack::new("Size changes"),
            capacity: DimensionTrack::new("Capacity changes"),
            inserts: InsertTrack::new("Inserts"),
            removals: RemoveTrack::new("Removals"),
        }
    }
}

impl ContainerMetric {
    /// Applies one intercepted call to the counters.
    ///
    /// Never fails: attrs are taken as given, and unknown operations only
    /// count towards [`calls`](Self::calls).
    pub fn record(&mut self, event: &OperationEvent<'_>, attrs: &OperationAttrs) {
        self.calls += 1;
        self.size.track_delta(attrs.size_before, attrs.size_after);
        self.capacity
            .track_optional(attrs.capacity_before, attrs.capacity_after);

        match event.kind() {
            OperationKind::Clear => self.clears += 1,
            OperationKind::Lookup => self.lookups += 1,
            OperationKind::Insert => self.inserts.record_operation(event),
            OperationKind::Remove => self.removals.record_operation(event, attrs),
            OperationKind::Other => self.others += 1,
        }
    }

    /// Number of intercepted calls of any kind.
    pub fn calls(&self) -> u64 {
        self.calls
    }

    pub fn lookups(&self) -> u64 {
        self.lookups
    }

    /// Number of times the container was cleared.
    pub fn clears(&self) -> u64 {
        self.clears
    }

    /// Number of calls outside the tracked vocabulary.
    pub fn others(&self) -> u64 {
        self.others
    }

    pub fn size(&self) -> &DimensionTrack {
        &self.size
    }

    pub fn capacity(&self) -> &DimensionTrack {
        &self.capacity
    }

    pub fn inserts(&self) -> &InsertTrack {
        &self.inserts
    }

    pub fn removals(&self) -> &RemoveTrack {
        &self.removals
    }
}

impl fmt::Display for ContainerMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "\tCalls: {} Lookups: {} Clears: {} Others: {}",
            self.calls, self.lookups, self.clears, self.others
        )?;
        writeln!(f, "\t{} | {}", self.capacity, self.size)?;
        writeln!(f, "\t{}", self.inserts)?;
        write!(f, "\t{}", self.removals)
    }
}

#[cfg(test)]
mod tests {
    use std::fmt::Debug;

    use super::*;
    use crate::container::ContainerRef;

    fn record(
        metric: &mut ContainerMetric,
        kind: OperationKind,
        args: &[&dyn Debug],
        attrs: OperationAttrs,
    ) {
        let reference = ContainerRef::new("Vec", "app");
        let container: Vec<u8> = Vec::new();
        let event = OperationEvent::new(kind, "op", args, &reference, &container);
        metric.record(&event, &attrs);
    }

    #[test]
    fn test_record_dispatches_by_kind() {
        let mut metric = ContainerMetric::default();

        record(&mut metric, OperationKind::Insert, &[&1], OperationAttrs::sized(0, 1));
        record(&mut metric, OperationKind::Lookup, &[&0], OperationAttrs::sized(1, 1));
        record(&mut metric, OperationKind::Remove, &[&1], OperationAttrs::sized(1, 0));
        record(&mut metric, OperationKind::Clear, &[], OperationAttrs::sized(0, 0));
        record(&mut metric, OperationKind::Other, &[], OperationAttrs::sized(0, 0));

        assert_eq!(metric.calls(), 5);
        assert_eq!(metric.lookups(), 1);
        assert_eq!(metric.clears(), 1);
        assert_eq!(metric.others(), 1);
        assert_eq!(metric.inserts().calls(), 1);
        assert_eq!(metric.removals().calls(), 1);
        assert_eq!(
            metric.calls(),
            metric.lookups()
                + metric.clears()
                + metric.others()
                + metric.inserts().calls()
                + metric.removals().calls()
        );
    }

    #[test]
    fn test_record_tracks_size_for_every_event() {
        let mut metric = ContainerMetric::default();

        record(&mut metric, OperationKind::Other, &[], OperationAttrs::sized(0, 2));
        record(&mut metric, OperationKind::Lookup, &[&0], OperationAttrs::sized(2, 2));
        record(&mut metric, OperationKind::Clear, &[], OperationAttrs::sized(2, 0));

        assert_eq!(metric.size().changes(), 3);
        assert_eq!(metric.size().growths(), 1);
        assert_eq!(metric.size().shrinks(), 1);
        assert_eq!(metric.capacity().changes(), 0);
    }

    #[test]
    fn test_record_tracks_capacity_when_known() {
        let mut metric = ContainerMetric::default();
        record(
            &mut metric,
            OperationKind::Insert,
            &[&1],
            OperationAttrs::new(4, 5, Some(4), Some(8)),
        );
        assert_eq!(metric.capacity().changes(), 1);
        assert_eq!(metric.capacity().growths(), 1);
    }

    #[test]
    fn test_recording_twice_doubles_counters() {
        let mut once = ContainerMetric::default();
        let mut twice = ContainerMetric::default();
        let attrs = OperationAttrs::new(3, 3, Some(4), Some(4));

        record(&mut once, OperationKind::Remove, &[&7, &8], attrs);
        record(&mut twice, OperationKind::Remove, &[&7, &8], attrs);
        record(&mut twice, OperationKind::Remove, &[&7, &8], attrs);

        assert_eq!(twice.calls(), 2 * once.calls());
        assert_eq!(twice.removals().bulk(), 2 * once.removals().bulk());
        assert_eq!(twice.removals().no_ops(), 2 * once.removals().no_ops());
        assert_eq!(twice.size().changes(), 2 * once.size().changes());
        assert_eq!(twice.capacity().changes(), 2 * once.capacity().changes());
    }
}
