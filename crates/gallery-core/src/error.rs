use thiserror::Error;

/// Recoverable and fatal conditions surfaced by the orchestration core.
///
/// Only `CapabilityMissing` at construction time is fatal; everything else
/// leaves the app in its last-known-good state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("missing platform capability: {0}")]
    CapabilityMissing(&'static str),

    #[error("navigation to {url} failed ({})", status_text(.status))]
    NavigationFetchFailure { url: String, status: Option<u16> },

    #[error("response from {url} is malformed: {reason}")]
    MalformedResponse { url: String, reason: String },

    #[error("render error: {0}")]
    Render(String),
}

fn status_text(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!("HTTP {code}"),
        None => "network error".to_string(),
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Failure confined to a single media tile.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TileError {
    #[error("media element {0} not found")]
    MissingElement(usize),
    #[error("media {index} failed to decode: {reason}")]
    Decode { index: usize, reason: String },
}
