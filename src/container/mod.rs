use std::borrow::Borrow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

mod error;
mod utils;

pub use error::{Error, Result};
pub(crate) use utils::simple_type_name;

/// Source of identity tokens. Starts at 1 so that 0 never denotes a live container.
static NEXT_TOKEN: AtomicU64 = AtomicU64::new(1);

/// An opaque identity token for one container instance.
///
/// Tokens are issued once per instance and never reused within a process, so
/// two tokens compare equal only if they were issued for the same container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
pub struct ContainerToken(u64);

impl ContainerToken {
    /// Issues a fresh token, distinct from every token issued before.
    pub fn issue() -> Self {
        Self(NEXT_TOKEN.fetch_add(1, Ordering::Relaxed))
    }

    /// Wraps a fixed identity value; tests only, it may collide with issued tokens.
    #[cfg(test)]
    pub(crate) fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn as_raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ContainerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A validated, non-blank namespace such as a module path.
///
/// # Examples
///
/// ```
/// # use collection_advisor::container::{Namespace, Error};
/// let ns = Namespace::new("my_app::cache").unwrap();
/// assert_eq!(ns.as_ref(), "my_app::cache");
/// assert!(matches!(Namespace::new("   "), Err(Error::BlankNamespace(_))));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Namespace(Arc<str>);

impl Namespace {
    /// Creates a new `Namespace` from the given raw value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BlankNamespace`] if the value is empty or only whitespace.
    pub fn new(src: impl AsRef<str>) -> Result<Self> {
        let src = src.as_ref();
        if src.trim().is_empty() {
            return Err(Error::BlankNamespace(src.to_owned()));
        }

        Ok(Self(src.into()))
    }

    /// Returns true if `other` lies inside this namespace, i.e. starts with it.
    pub fn contains(&self, other: &str) -> bool {
        other.starts_with(&*self.0)
    }
}

impl AsRef<str> for Namespace {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Namespace {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identity key of one tracked container instance.
///
/// Equality and hashing only look at the [`ContainerToken`]; the type name and
/// namespace are descriptive and never take part in identity.
#[derive(Debug, Clone)]
pub struct ContainerRef {
    token: ContainerToken,
    type_name: Arc<str>,
    namespace: Arc<str>,
}

impl ContainerRef {
    /// Creates a reference with a freshly issued token.
    ///
    /// # Arguments
    ///
    /// * `type_name` - Simple name of the container's type, e.g. `Vec`.
    /// * `namespace` - Namespace of the code owning the container, e.g. `module_path!()`.
    pub fn new(type_name: impl Into<Arc<str>>, namespace: impl Into<Arc<str>>) -> Self {
        Self::with_token(ContainerToken::issue(), type_name, namespace)
    }

    pub fn with_token(
        token: ContainerToken,
        type_name: impl Into<Arc<str>>,
        namespace: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            token,
            type_name: type_name.into(),
            namespace: namespace.into(),
        }
    }

    pub fn token(&self) -> ContainerToken {
        self.token
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }
}

impl PartialEq for ContainerRef {
    fn eq(&self, other: &Self) -> bool {
        self.token == other.token
    }
}

impl Eq for ContainerRef {}

impl Hash for ContainerRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.token.hash(state);
    }
}

impl fmt::Display for ContainerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}{}", self.namespace, self.type_name, self.token)
    }
}
