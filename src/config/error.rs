/// Errors that may occur while reading the configuration.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid value for `{variable}`: {source}")]
    Namespace {
        variable: &'static str,
        #[source]
        source: crate::container::Error,
    },
    #[error("invalid value for `{variable}`: expected `prefix` or `exact`, got `{value}`")]
    InvalidMatchMode {
        variable: &'static str,
        value: String,
    },
    #[error("invalid value for `{variable}`: `{value}`: {source}")]
    InvalidExportAddr {
        variable: &'static str,
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
