//! Runtime configuration, read from environment variables.
//!
//! | Variable                          | Meaning                                   | Default                     |
//! |-----------------------------------|-------------------------------------------|-----------------------------|
//! | `COLLECTION_ADVISOR_NAMESPACE`    | Namespace whose containers are tracked    | `collection_advisor::demo`  |
//! | `COLLECTION_ADVISOR_MATCH`        | `prefix` or `exact` namespace matching    | `prefix`                    |
//! | `COLLECTION_ADVISOR_REPORT_PATH`  | File to write the report to               | standard output             |
//! | `COLLECTION_ADVISOR_EXPORT_ADDR`  | Address to serve the metrics as JSON on   | not served                  |
mod error;

use std::net::SocketAddr;
use std::path::PathBuf;

pub use error::{Error, Result};

use crate::container::Namespace;
use crate::metrics::NamespaceMatch;

pub const NAMESPACE_VAR: &str = "COLLECTION_ADVISOR_NAMESPACE";
pub const MATCH_VAR: &str = "COLLECTION_ADVISOR_MATCH";
pub const REPORT_PATH_VAR: &str = "COLLECTION_ADVISOR_REPORT_PATH";
pub const EXPORT_ADDR_VAR: &str = "COLLECTION_ADVISOR_EXPORT_ADDR";

/// Namespace tracked when none is configured; the bundled demo workload lives there.
pub const DEFAULT_NAMESPACE: &str = "collection_advisor::demo";

#[derive(Debug, Clone)]
pub struct Config {
    pub namespace: Namespace,
    pub match_mode: NamespaceMatch,
    pub report_path: Option<PathBuf>,
    pub export_addr: Option<SocketAddr>,
}

impl Config {
    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// See [`Config::from_lookup`].
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// * [`Error::Namespace`] if the namespace is set but blank.
    /// * [`Error::InvalidMatchMode`] if the match mode is neither `prefix` nor `exact`.
    /// * [`Error::InvalidExportAddr`] if the export address is not a socket address.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let namespace = lookup(NAMESPACE_VAR).unwrap_or_else(|| DEFAULT_NAMESPACE.to_owned());
        let namespace = Namespace::new(namespace).map_err(|source| Error::Namespace {
            variable: NAMESPACE_VAR,
            source,
        })?;

        let match_mode = match lookup(MATCH_VAR) {
            Some(value) => value.parse::<NamespaceMatch>().map_err(|value| Error::InvalidMatchMode {
                variable: MATCH_VAR,
                value,
            })?,
            None => NamespaceMatch::default(),
        };

        let report_path = lookup(REPORT_PATH_VAR)
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        let export_addr = lookup(EXPORT_ADDR_VAR)
            .map(|value| {
                value
                    .parse::<SocketAddr>()
                    .map_err(|source| Error::InvalidExportAddr {
                        variable: EXPORT_ADDR_VAR,
                        value,
                        source,
                    })
            })
            .transpose()?;

        Ok(Self {
            namespace,
            match_mode,
            report_path,
            export_addr,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.namespace.as_ref(), DEFAULT_NAMESPACE);
        assert_eq!(config.match_mode, NamespaceMatch::Prefix);
        assert!(config.report_path.is_none());
        assert!(config.export_addr.is_none());
    }

    #[test]
    fn test_all_values() {
        let config = Config::from_lookup(lookup(&[
            (NAMESPACE_VAR, "my_app"),
            (MATCH_VAR, "exact"),
            (REPORT_PATH_VAR, "/tmp/report.txt"),
            (EXPORT_ADDR_VAR, "127.0.0.1:3000"),
        ]))
        .unwrap();
        assert_eq!(config.namespace.as_ref(), "my_app");
        assert_eq!(config.match_mode, NamespaceMatch::Exact);
        assert_eq!(config.report_path, Some(PathBuf::from("/tmp/report.txt")));
        assert_eq!(config.export_addr, Some("127.0.0.1:3000".parse().unwrap()));
    }

    #[test]
    fn test_blank_namespace_fails() {
        let err = Config::from_lookup(lookup(&[(NAMESPACE_VAR, "  ")])).unwrap_err();
        assert!(matches!(err, Error::Namespace { .. }));
    }

    #[test]
    fn test_invalid_values_fail() {
        let err = Config::from_lookup(lookup(&[(MATCH_VAR, "glob")])).unwrap_err();
        assert!(matches!(err, Error::InvalidMatchMode { ref value, .. } if value == "glob"));

        let err = Config::from_lookup(lookup(&[(EXPORT_ADDR_VAR, "nowhere")])).unwrap_err();
        assert!(matches!(err, Error::InvalidExportAddr { .. }));
    }
}
