//! # contract: object store boundary for index sync and drop upload
//!
//! This module defines the single trait (`ObjectStore`) through which all
//! remote storage is reached, plus the structured error kind it returns.
//!
//! ## Interface & Extensibility
//! - Implement the [`ObjectStore`] trait to create new store clients (e.g.
//!   a blob REST client, a local-filesystem fake, a mock).
//! - All methods are async and return [`StoreError`], which carries an
//!   explicit HTTP status where one exists. Callers distinguish "object
//!   absent" from any other store failure by matching
//!   [`StoreError::NotFound`], never by inspecting a wrapped cause chain.
//!
//! ## Mocking & Testing
//! - The trait is annotated for `mockall` so consumers can generate
//!   deterministic mocks for unit/integration tests.

use std::path::Path;

use async_trait::async_trait;
use thiserror::Error;

use mockall::automock;

/// Error kind returned by every [`ObjectStore`] method.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The requested object does not exist (HTTP 404 or equivalent).
    #[error("object not found")]
    NotFound,
    /// The store answered with a non-success status other than 404.
    #[error("store returned HTTP {status}: {message}")]
    Http { status: u16, message: String },
    /// The request never produced a store response (DNS, TLS, timeout...).
    #[error("transport failure: {0}")]
    Transport(String),
    /// Local I/O failed while preparing a request body.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Public-access policy applied to a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublicAccess {
    /// No anonymous access.
    None,
    /// Anonymous read access to blobs, but not container listing.
    Blob,
    /// Anonymous read access to blobs and container listing.
    Container,
}

/// Trait for reading and writing objects in a blob-style store.
/// The implementor is responsible for endpoint, credentials and transport.
///
/// `get_text`/`put_text` address objects in the store's root container by
/// path; `put_file` addresses an explicit container. The trait is
/// `Send + Sync` and intended for async/await usage; it is implemented by
/// the real client in the CLI crate and by test mocks.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Download the object at `path` in the root container as UTF-8 text.
    async fn get_text(&self, path: &str) -> Result<String, StoreError>;

    /// Overwrite the object at `path` in the root container with `text`.
    async fn put_text(&self, path: &str, text: &str) -> Result<(), StoreError>;

    /// Create the container `name` if it does not already exist.
    async fn ensure_container(&self, name: &str) -> Result<(), StoreError>;

    /// Apply `access` to the container `name`, replacing the current policy.
    async fn set_public_access(&self, name: &str, access: PublicAccess) -> Result<(), StoreError>;

    /// Upload the local file at `local_path` to `container` under `key`,
    /// overwriting any existing object at that key.
    async fn put_file(&self, container: &str, key: &str, local_path: &Path)
        -> Result<(), StoreError>;
}
