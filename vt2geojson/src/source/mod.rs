//! Loading raw tile bytes from a local file or a URL.

mod http;

pub use http::{HttpClient, ReqwestClient, DEFAULT_TIMEOUT_SECS};

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

/// Errors that can occur while loading a tile source.
#[derive(Debug, Clone, Error)]
pub enum SourceError {
    /// Local file could not be read
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: Arc<std::io::Error>,
    },

    /// Request failed before a response was received
    #[error("failed to fetch {url}: {reason}")]
    Http { url: String, reason: String },

    /// Server answered with a non-success status
    #[error("HTTP {status} from {url}")]
    HttpStatus { url: String, status: u16 },

    /// HTTP client could not be constructed
    #[error("failed to create HTTP client: {0}")]
    ClientBuild(String),
}

/// Loads the raw bytes of a tile source.
pub trait SourceLoader {
    fn load(&self, source: &str) -> Result<Vec<u8>, SourceError>;
}

/// Returns true if the source should be fetched over HTTP.
pub fn is_remote(source: &str) -> bool {
    let lower = source.get(..8).unwrap_or(source).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Loader that fetches URLs over HTTP and reads everything else from disk.
pub struct DefaultLoader<C: HttpClient = ReqwestClient> {
    http: C,
}

impl DefaultLoader<ReqwestClient> {
    /// Creates a loader backed by reqwest with the given timeout.
    pub fn with_timeout(timeout_secs: u64) -> Result<Self, SourceError> {
        Ok(Self::new(ReqwestClient::with_timeout(timeout_secs)?))
    }
}

impl<C: HttpClient> DefaultLoader<C> {
    pub fn new(http: C) -> Self {
        Self { http }
    }
}

impl<C: HttpClient> SourceLoader for DefaultLoader<C> {
    fn load(&self, source: &str) -> Result<Vec<u8>, SourceError> {
        let bytes = if is_remote(source) {
            debug!(url = source, "Fetching tile over HTTP");
            self.http.get(source)?
        } else {
            debug!(path = source, "Reading tile from disk");
            std::fs::read(source).map_err(|e| SourceError::Io {
                path: PathBuf::from(source),
                source: Arc::new(e),
            })?
        };

        debug!(bytes = bytes.len(), "Loaded tile source");
        Ok(bytes)
    }
}
