use serde::{Deserialize, Serialize};

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Where a failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    /// The request never produced a response.
    Transport,
    /// The backend answered with a non-success status.
    Status(u16),
    /// The response body was missing or did not parse.
    Body,
    /// Validation or local store failure.
    Local,
}

/// A serializable error for client rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Error {
    pub kind: ErrorKind,
    pub message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn transport(error: impl std::fmt::Display) -> Self {
        Self::new(ErrorKind::Transport, error.to_string())
    }

    /// A non-success status. The backend's body text, when present, is the
    /// most useful message to show.
    pub fn status(code: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        let message = if body.trim().is_empty() {
            format!("request failed with status {code}")
        } else {
            body
        };
        Self::new(ErrorKind::Status(code), message)
    }

    pub fn body(error: impl std::fmt::Display) -> Self {
        Self::new(ErrorKind::Body, format!("malformed response: {error}"))
    }

    pub fn is_status(&self, code: u16) -> bool {
        self.kind == ErrorKind::Status(code)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

impl From<anyhow::Error> for Error {
    fn from(error: anyhow::Error) -> Self {
        // Alternate formatting keeps the context chain on one line.
        Self::new(ErrorKind::Local, format!("{error:#}"))
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::body(error)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Self::new(ErrorKind::Local, s)
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Self::new(ErrorKind::Local, s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;
    use pretty_assertions::assert_eq;

    #[test]
    fn status_prefers_body_text() {
        let error = Error::status(409, "course already approved");
        assert!(error.is_status(409));
        assert_eq!(error.to_string(), "course already approved");

        let error = Error::status(500, "  ");
        assert_eq!(error.to_string(), "request failed with status 500");
    }

    #[test]
    fn err_macro_builds_local_errors() {
        let error = crate::err!("missing {}", "course");
        assert_eq!(error.kind, ErrorKind::Local);
        assert_eq!(error.message, "missing course");
    }

    #[test]
    fn json_errors_are_body_errors() {
        let error: Error = serde_json::from_str::<Vec<u8>>("{").unwrap_err().into();
        assert_eq!(error.kind, ErrorKind::Body);
    }

    #[test]
    fn anyhow_context_stays_on_one_line() {
        let error: Error = Err::<(), _>(anyhow::anyhow!("disk full"))
            .context("saving snapshot")
            .unwrap_err()
            .into();
        assert_eq!(error.kind, ErrorKind::Local);
        assert_eq!(error.message, "saving snapshot: disk full");
    }
}
