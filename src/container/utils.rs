/// Reduces a fully qualified type name to its simple name.
///
/// Generic parameters and the module path are dropped, so
/// `alloc::vec::Vec<core::option::Option<i32>>` becomes `Vec`.
///
/// # Arguments
///
/// * `full` - A type name as returned by [`std::any::type_name`].
///
/// # Returns
///
/// The last path segment before any generic parameter list.
pub(crate) fn simple_type_name(full: &str) -> &str {
    let base = match full.find('<') {
        Some(idx) => &full[..idx],
        None => full,
    };
    base.rsplit("::").next().unwrap_or(base)
}
