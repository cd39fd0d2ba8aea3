pub mod attendance;
pub mod classroom;
pub mod course;
mod error;
pub mod marks;
pub mod notification;
pub mod student;

pub use error::{Error, ErrorKind, Result};

#[doc(hidden)]
pub use anyhow::anyhow as internal_anyhow_dont_use;

/// Build a [`Error`] of kind [`ErrorKind::Local`] from a format string.
#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {
        $crate::Error::from($crate::internal_anyhow_dont_use!($($arg)*))
    };
}

/// Records that carry an opaque string id.
pub trait Keyed {
    fn key(&self) -> &str;
}

/// Case-insensitive substring match used by every search box.
pub fn matches_query(query: &str, fields: &[&str]) -> bool {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }
    fields
        .iter()
        .any(|field| field.to_lowercase().contains(&query))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_query_matches_everything() {
        assert!(matches_query("   ", &["anything"]));
        assert!(matches_query("", &[]));
    }

    #[test]
    fn query_is_case_insensitive_and_trimmed() {
        assert!(matches_query(" data ", &["CS102", "Data Structures"]));
        assert!(!matches_query("physics", &["CS102", "Data Structures"]));
    }
}
