use std::fmt;

use crate::container::ContainerRef;
use crate::hook::Observable;

/// Kind of an intercepted operation, decided once by the interception hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    Insert,
    Remove,
    Lookup,
    Clear,
    /// Any method outside the tracked vocabulary.
    Other,
}

/// Size and capacity of a container right before and right after an operation.
///
/// Capacity is `None` for containers without a capacity concept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OperationAttrs {
    pub size_before: usize,
    pub size_after: usize,
    pub capacity_before: Option<usize>,
    pub capacity_after: Option<usize>,
}

impl OperationAttrs {
    pub fn new(
        size_before: usize,
        size_after: usize,
        capacity_before: Option<usize>,
        capacity_after: Option<usize>,
    ) -> Self {
        Self {
            size_before,
            size_after,
            capacity_before,
            capacity_after,
        }
    }

    /// Attrs of a container that has no capacity concept.
    pub fn sized(size_before: usize, size_after: usize) -> Self {
        Self::new(size_before, size_after, None, None)
    }

    pub fn size_changed(&self) -> bool {
        self.size_before != self.size_after
    }
}

/// One intercepted call on a tracked container.
pub struct OperationEvent<'a> {
    kind: OperationKind,
    method: &'a str,
    arguments: &'a [&'a dyn fmt::Debug],
    reference: &'a ContainerRef,
    container: &'a dyn Observable,
}

impl<'a> OperationEvent<'a> {
    /// Constructs an [`OperationEvent`].
    ///
    /// # Arguments
    ///
    /// * `kind` - Classification of the call.
    /// * `method` - Name of the called method, kept for diagnostics.
    /// * `arguments` - Arguments of the call; only their count is interpreted.
    /// * `reference` - Identity of the target container.
    /// * `container` - The container itself, as it is after the call.
    pub fn new(
        kind: OperationKind,
        method: &'a str,
        arguments: &'a [&'a dyn fmt::Debug],
        reference: &'a ContainerRef,
        container: &'a dyn Observable,
    ) -> Self {
        Self {
            kind,
            method,
            arguments,
            reference,
            container,
        }
    }

    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    pub fn method(&self) -> &str {
        self.method
    }

    pub fn arguments(&self) -> &[&'a dyn fmt::Debug] {
        self.arguments
    }

    pub fn arity(&self) -> usize {
        self.arguments.len()
    }

    /// Returns true if the call received exactly one argument.
    pub fn is_single_arg(&self) -> bool {
        self.arguments.len() == 1
    }

    pub fn reference(&self) -> &ContainerRef {
        self.reference
    }

    pub fn container(&self) -> &dyn Observable {
        self.container
    }
}

impl fmt::Debug for OperationEvent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperationEvent")
            .field("kind", &self.kind)
            .field("method", &self.method)
            .field("arguments", &self.arguments)
            .field("reference", &self.reference)
            .field("len", &self.container.len())
            .finish()
    }
}
