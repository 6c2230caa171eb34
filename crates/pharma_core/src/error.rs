use std::fmt;

/// Rejection of a search submission before any request is made.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeywordError {
    #[error("enter a keyword to search")]
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchErrorKind {
    Timeout,
    Server(u16),
    Connectivity,
}

/// Terminal failure of one search attempt, as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchError {
    pub kind: SearchErrorKind,
    pub message: String,
}

impl SearchError {
    pub fn new(kind: SearchErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn timeout() -> Self {
        Self::new(
            SearchErrorKind::Timeout,
            "The search took too long to respond. Please try again.",
        )
    }

    pub fn server(status: u16) -> Self {
        Self::new(
            SearchErrorKind::Server(status),
            format!("The search service failed with status {status}."),
        )
    }

    pub fn connectivity() -> Self {
        Self::new(
            SearchErrorKind::Connectivity,
            "Could not reach the search service. Check your connection.",
        )
    }
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
