use thiserror::Error;

/// Failures the catalog surfaces to callers.
///
/// A provider response of `Response: "False"` on a search is *not* represented
/// here: zero matches is normal data and comes back as an empty page.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Network-level failure: connect, timeout, non-2xx, or an unparseable body.
    #[error("transport failure: {0}")]
    Transport(String),

    /// Detail lookup for an id the provider has no record of.
    #[error("no catalog record for '{0}'")]
    NotFound(String),
}

impl CatalogError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Favorites persistence failures. These never escape the favorites store:
/// a read failure degrades to an empty list, a write failure is logged and
/// the in-memory state kept.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("failed to read favorites: {0}")]
    Read(String),

    #[error("failed to write favorites: {0}")]
    Write(String),
}
