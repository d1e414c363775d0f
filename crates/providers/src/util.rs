use ck_domain::error::Error;

/// Map a reqwest failure into the shared error type.
pub fn from_reqwest(e: reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::Http(format!("timeout: {e}"))
    } else {
        Error::Http(e.to_string())
    }
}
