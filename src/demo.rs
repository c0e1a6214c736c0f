//! A small workload exercising tracked containers, so that the binary has
//! something to report on with the default configuration.
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use rand::Rng;

use crate::metrics::MetricsRegistry;
use crate::tracked;

/// Fills a list with ten items, then looks up random positions; a set and a map
/// see a few inserts, lookups and removals as well.
pub fn run(registry: &Arc<MetricsRegistry>) {
    let mut rng = rand::thread_rng();

    let mut list = tracked!(registry, Vec::new());
    for i in 0..10 {
        list.push(i);
    }
    let size = list.len();
    for _ in 0..10 {
        list.get(rng.gen_range(0..size));
    }
    log::debug!("demo list: {:?}", *list);

    let mut seen = tracked!(registry, HashSet::new());
    for _ in 0..20 {
        seen.insert(rng.gen_range(0..8u8));
    }
    seen.remove(&0u8);
    seen.clear();

    let mut index = tracked!(registry, HashMap::new());
    for word in ["alpha", "beta", "gamma", "beta"] {
        index.insert(word, word.len());
    }
    index.get("beta");
    index.remove("delta");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::Namespace;
    use crate::metrics::NamespaceMatch;

    #[test]
    fn test_demo_is_tracked_under_default_namespace() {
        let registry = Arc::new(MetricsRegistry::new(
            Namespace::new(crate::config::DEFAULT_NAMESPACE).unwrap(),
            NamespaceMatch::Prefix,
        ));
        run(&registry);

        let snapshot = registry.snapshot();
        assert_eq!(snapshot.len(), 3);
        let calls: u64 = snapshot.iter().map(|(_, metric)| metric.calls()).sum();
        assert_eq!(calls, 20 + 22 + 6);
    }
}
