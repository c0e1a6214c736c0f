use std::collections::HashMap;
use std::str::FromStr;
use std::sync::{PoisonError, RwLock};

use dashmap::DashMap;

use crate::container::{self, ContainerRef, Namespace};

use super::event::{OperationAttrs, OperationEvent};
use super::metric::ContainerMetric;

/// How a container's namespace is compared against the tracked namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NamespaceMatch {
    /// The container's namespace starts with the tracked namespace.
    #[default]
    Prefix,
    /// The container's namespace equals the tracked namespace.
    Exact,
}

impl NamespaceMatch {
    fn matches(self, tracked: &Namespace, namespace: &str) -> bool {
        match self {
            NamespaceMatch::Prefix => tracked.contains(namespace),
            NamespaceMatch::Exact => tracked.as_ref() == namespace,
        }
    }
}

impl FromStr for NamespaceMatch {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "prefix" => Ok(NamespaceMatch::Prefix),
            "exact" => Ok(NamespaceMatch::Exact),
            _ => Err(s.to_owned()),
        }
    }
}

/// Aggregates intercepted container operations per tracked container.
///
/// Events for different containers are recorded in parallel; events for the
/// same container are applied one at a time under that entry's shard lock.
#[derive(Debug)]
pub struct MetricsRegistry {
    namespace: RwLock<Namespace>,
    mode: NamespaceMatch,
    metrics: DashMap<ContainerRef, ContainerMetric>,
}

impl MetricsRegistry {
    pub fn new(namespace: Namespace, mode: NamespaceMatch) -> Self {
        Self {
            namespace: RwLock::new(namespace),
            mode,
            metrics: DashMap::new(),
        }
    }

    /// Returns the namespace currently used to filter events.
    pub fn tracked_namespace(&self) -> Namespace {
        self.namespace
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn match_mode(&self) -> NamespaceMatch {
        self.mode
    }

    /// Replaces the tracked namespace for subsequent events.
    ///
    /// Metrics recorded so far are kept as they are.
    ///
    /// # Errors
    ///
    /// Returns [`container::Error::BlankNamespace`] if `name` is empty or blank;
    /// the current namespace is left unchanged in that case.
    pub fn set_tracked_namespace(&self, name: impl AsRef<str>) -> container::Result<()> {
        let namespace = Namespace::new(name)?;
        log::info!("tracking container usage in namespace `{}`", namespace);
        *self
            .namespace
            .write()
            .unwrap_or_else(PoisonError::into_inner) = namespace;
        Ok(())
    }

    /// Returns true if containers owned by `namespace` are tracked.
    pub fn is_tracked(&self, namespace: &str) -> bool {
        let tracked = self.tracked_namespace();
        self.mode.matches(&tracked, namespace)
    }

    /// Records one intercepted call.
    ///
    /// # Returns
    ///
    /// `false` without touching any metric if the container lies outside the
    /// tracked namespace, `true` once the event has been applied.
    pub fn record(&self, event: &OperationEvent<'_>, attrs: &OperationAttrs) -> bool {
        let reference = event.reference();
        if !self.is_tracked(reference.namespace()) {
            log::trace!(
                "ignoring `{}` on {}: outside tracked namespace",
                event.method(),
                reference
            );
            return false;
        }

        self.metrics
            .entry(reference.clone())
            .or_insert_with(|| {
                log::debug!("tracking new container {}", reference);
                ContainerMetric::default()
            })
            .record(event, attrs);
        true
    }

    /// Returns a copy of the metric for `reference`, if any event was recorded for it.
    pub fn get(&self, reference: &ContainerRef) -> Option<ContainerMetric> {
        self.metrics.get(reference).map(|metric| metric.clone())
    }

    /// Copies all metrics into a [`Snapshot`].
    ///
    /// Shards are locked one at a time while copying, never all at once.
    pub fn snapshot(&self) -> Snapshot {
        let namespace = self.tracked_namespace();
        let metrics = self
            .metrics
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect();
        Snapshot { namespace, metrics }
    }

    /// Number of tracked containers.
    pub fn size(&self) -> usize {
        self.metrics.len()
    }
}

/// A point-in-time copy of the registry's metrics.
#[derive(Debug, Clone)]
pub struct Snapshot {
    namespace: Namespace,
    metrics: HashMap<ContainerRef, ContainerMetric>,
}

impl Snapshot {
    /// Namespace that was tracked when the snapshot was taken.
    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    pub fn get(&self, reference: &ContainerRef) -> Option<&ContainerMetric> {
        self.metrics.get(reference)
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ContainerRef, &ContainerMetric)> {
        self.metrics.iter()
    }

    /// Entries ordered by identity token, i.e. by the order containers were first created.
    pub fn sorted(&self) -> Vec<(&ContainerRef, &ContainerMetric)> {
        let mut entries: Vec<_> = self.metrics.iter().collect();
        entries.sort_by_key(|(reference, _)| reference.token());
        entries
    }
}
