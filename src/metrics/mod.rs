//! Aggregation of intercepted container operations into per-container metrics.
//!
//! The interception hook turns every observed call into an [`OperationEvent`]
//! plus an [`OperationAttrs`] snapshot and hands both to a [`MetricsRegistry`].
//! The registry drops events from containers outside the tracked namespace and
//! folds the rest into one [`ContainerMetric`] per [`ContainerRef`].
//!
//! # Key Components
//!
//! - [`DimensionTrack`] — Counts changes, growths and shrinks of size or capacity.
//! - [`InsertTrack`] / [`RemoveTrack`] — Split insert and remove calls by arity;
//!   removals also count no-ops.
//! - [`ContainerMetric`] — All counters of one container.
//! - [`MetricsRegistry`] — Concurrent, namespace-filtered map of metrics.
//!
//! # Resource usage
//!
//! The registry never evicts: it holds one entry per container ever observed
//! for the lifetime of the registry. It is meant for short diagnostic sessions.
//!
//! [`ContainerRef`]: crate::container::ContainerRef
mod event;
mod metric;
mod registry;
mod report;
mod track;

pub use event::{OperationAttrs, OperationEvent, OperationKind};
pub use metric::ContainerMetric;
pub use registry::{MetricsRegistry, NamespaceMatch, Snapshot};
pub use track::{DimensionTrack, InsertTrack, RemoveTrack};
