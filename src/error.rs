/// Turns a failure that must not abort the run into a logged error.
pub trait ResultOkLogExt<T> {
    /// Returns the value, or logs `context` with the error and returns `None`.
    fn ok_log(self, context: &str) -> Option<T>;
}

impl<T, E> ResultOkLogExt<T> for std::result::Result<T, E>
where
    E: std::error::Error,
{
    fn ok_log(self, context: &str) -> Option<T> {
        match self {
            Ok(ok) => Some(ok),
            Err(err) => {
                log::error!("{context}: {err}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_log() {
        let ok: Result<u8, std::io::Error> = Ok(1);
        assert_eq!(ok.ok_log("reading"), Some(1));

        let err: Result<u8, std::io::Error> = Err(std::io::Error::other("gone"));
        assert_eq!(err.ok_log("reading"), None);
    }
}
