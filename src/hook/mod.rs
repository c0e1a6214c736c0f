//! In-process interception of container operations.
//!
//! Wrapping a container in [`Tracked`] reports every call made through the
//! wrapper to a [`MetricsRegistry`](crate::metrics::MetricsRegistry). The
//! [`tracked!`](crate::tracked) macro fills in the owning namespace from
//! `module_path!()`.
//!
//! Calls are classified by their method name alone, see [`classify`].
mod observable;
mod tracked;

pub use observable::Observable;
pub use tracked::{Clear, Tracked};

use crate::metrics::OperationKind;

/// Maps a method name to its [`OperationKind`] by exact match.
///
/// Argument types and return values are not considered, so an unrelated
/// method that happens to be called `get` is counted as a lookup.
pub fn classify(method: &str) -> OperationKind {
    match method {
        "add" | "insert" | "push" => OperationKind::Insert,
        "remove" => OperationKind::Remove,
        "get" => OperationKind::Lookup,
        "clear" => OperationKind::Clear,
        _ => OperationKind::Other,
    }
}

/// Wraps a container in a [`Tracked`] owned by the calling module.
///
/// ```
/// # use std::sync::Arc;
/// # use collection_advisor::container::Namespace;
/// # use collection_advisor::metrics::{MetricsRegistry, NamespaceMatch};
/// let registry = Arc::new(MetricsRegistry::new(
///     Namespace::new(module_path!()).unwrap(),
///     NamespaceMatch::Prefix,
/// ));
/// let mut list = collection_advisor::tracked!(registry, Vec::new());
/// list.push(1);
/// assert_eq!(registry.get(list.reference()).unwrap().calls(), 1);
/// ```
#[macro_export]
macro_rules! tracked {
    ($registry:expr, $container:expr) => {
        $crate::hook::Tracked::new(
            $container,
            ::std::module_path!(),
            ::std::sync::Arc::clone(&$registry),
        )
    };
}
