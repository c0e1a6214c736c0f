#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("tracked namespace cannot be blank: {0:?}")]
    BlankNamespace(String),
}
pub type Result<T> = std::result::Result<T, Error>;
