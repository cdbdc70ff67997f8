//! Remote channel index: fetch, touch, publish.
//!
//! The index is a JSON array of [`Channel`] entries living at a well-known
//! path in the store's root container. One invocation performs a plain
//! fetch-modify-write cycle: download and decode the document, update the
//! `lastModified` timestamp of each release channel, encode and overwrite.
//! There is no locking; concurrent writers race and the last write wins.
//!
//! # Error Handling
//! [`IndexError::NotFound`] is surfaced distinctly from any other store
//! failure so callers can print a targeted "check the storage account"
//! message. A channel missing from the index fails the whole touch before
//! anything is mutated, so a partially touched manifest is never published.

use chrono::Utc;
use thiserror::Error;
use tracing::{error, info};

use crate::channel::{self, Channel};
use crate::contract::{ObjectStore, StoreError};

/// Well-known path of the channel index in the root container.
pub const INDEX_BLOB: &str = "index.json";

/// The store's root container.
pub const ROOT_CONTAINER: &str = "$root";

/// The release channels whose timestamps a sync touches. Fixed list.
pub const RELEASE_CHANNELS: [&str; 3] = ["stable", "unstable", "dev"];

#[derive(Debug, Error)]
pub enum IndexError {
    #[error("no index.json was found at the expected location")]
    NotFound,
    #[error("malformed channel index: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("channel '{0}' is missing from the index")]
    ChannelNotFound(String),
    #[error("object store error: {0}")]
    Store(#[source] StoreError),
}

/// Downloads and decodes the channel index at `path`.
pub async fn fetch<S>(store: &S, path: &str) -> Result<Vec<Channel>, IndexError>
where
    S: ObjectStore + ?Sized,
{
    info!(path, "Fetching channel index");
    let text = store.get_text(path).await.map_err(|e| match e {
        StoreError::NotFound => IndexError::NotFound,
        other => {
            error!(error = %other, path, "Store error while fetching index");
            IndexError::Store(other)
        }
    })?;
    let channels = channel::decode(&text)?;
    info!(path, channel_count = channels.len(), "Fetched channel index");
    Ok(channels)
}

/// Encodes `channels` and overwrites the index at `path`.
///
/// Not transactional: the store is assumed to replace the whole object
/// atomically; nothing here retries or verifies the write.
pub async fn publish<S>(store: &S, path: &str, channels: &[Channel]) -> Result<(), IndexError>
where
    S: ObjectStore + ?Sized,
{
    let text = channel::encode(channels)?;
    store.put_text(path, &text).await.map_err(|e| {
        error!(error = %e, path, "Store error while publishing index");
        IndexError::Store(e)
    })?;
    info!(path, channel_count = channels.len(), "Published channel index");
    Ok(())
}

/// Sets `lastModified` to now on the first channel matching each of
/// `names`, returning the updated sequence.
///
/// All lookups are staged before any mutation: if any name has no match
/// the call fails with [`IndexError::ChannelNotFound`] and the input is
/// untouched. The same instant is reused across all names in one call.
pub fn touch(channels: &[Channel], names: &[&str]) -> Result<Vec<Channel>, IndexError> {
    let mut positions = Vec::with_capacity(names.len());
    for name in names {
        match channels.iter().position(|c| c.name == *name) {
            Some(pos) => positions.push(pos),
            None => {
                error!(channel = name, "Requested channel not present in index");
                return Err(IndexError::ChannelNotFound((*name).to_string()));
            }
        }
    }

    let now = Utc::now();
    let mut touched = channels.to_vec();
    for pos in positions {
        touched[pos].last_modified = Some(now);
    }
    info!(touched = names.len(), "Touched release channels");
    Ok(touched)
}
