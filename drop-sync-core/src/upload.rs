//! Upload orchestration: prepare the destination container, then push each
//! scanned drop under its base filename.
//!
//! The pipeline is deliberately sequential and fail-fast: container
//! preparation failure aborts the run before any upload is attempted, and
//! a failed upload stops the batch where it is. Earlier drops stay
//! uploaded, later drops are never sent. Re-running retransmits every drop
//! (unconditional overwrite, no content-hash short-circuit), which makes
//! the whole run idempotent in effect.
//!
//! # Callable From
//! - The `upload` CLI command (via [`run`]) and integration tests, which
//!   pass a mocked [`ObjectStore`].

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{error, info};

use crate::contract::{ObjectStore, PublicAccess, StoreError};
use crate::scan::{self, ScanError, DROP_PREFIXES};

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("could not prepare container: {0}")]
    Container(#[source] StoreError),
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error("upload aborted after {} successful file(s): {source}", .uploaded.len())]
    Batch {
        /// Base filenames uploaded before the failure, in scan order.
        uploaded: Vec<String>,
        #[source]
        source: StoreError,
    },
}

/// What a completed run uploaded, in scan order.
#[derive(Debug, Default)]
pub struct UploadReport {
    pub uploaded: Vec<String>,
}

/// Idempotently creates `name` and (re)applies anonymous blob-read access.
pub async fn ensure_container<S>(store: &S, name: &str) -> Result<(), UploadError>
where
    S: ObjectStore + ?Sized,
{
    store
        .ensure_container(name)
        .await
        .map_err(UploadError::Container)?;
    store
        .set_public_access(name, PublicAccess::Blob)
        .await
        .map_err(UploadError::Container)?;
    info!(container = name, "Container ready with blob-read access");
    Ok(())
}

/// Uploads each path to `container` under its base filename, in order.
///
/// Fail-fast: the first store error ends the batch; the error carries the
/// names already uploaded so the caller can still report them.
pub async fn upload_all<S>(
    store: &S,
    container: &str,
    paths: &[PathBuf],
) -> Result<UploadReport, UploadError>
where
    S: ObjectStore + ?Sized,
{
    let mut report = UploadReport::default();
    for path in paths {
        let key = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name.to_string(),
            // Scanner output always has a UTF-8 base name; anything else
            // cannot be addressed as a blob key.
            None => continue,
        };
        if let Err(e) = store.put_file(container, &key, path).await {
            error!(error = %e, file = %key, container, "Drop upload failed");
            return Err(UploadError::Batch {
                uploaded: report.uploaded,
                source: e,
            });
        }
        info!(file = %key, container, "Uploaded drop");
        report.uploaded.push(key);
    }
    Ok(report)
}

/// Full upload flow: prepare the container, scan `directory` for drops and
/// upload the batch.
///
/// A missing local directory is "nothing to do" (success, zero uploads),
/// unlike [`scan::scan`]'s own contract; the check happens here.
pub async fn run<S>(
    store: &S,
    container: &str,
    directory: &Path,
) -> Result<UploadReport, UploadError>
where
    S: ObjectStore + ?Sized,
{
    ensure_container(store, container).await?;

    if !directory.is_dir() {
        info!(
            directory = %directory.display(),
            "Drop directory absent, nothing to upload"
        );
        return Ok(UploadReport::default());
    }

    let drops = scan::scan(directory, &DROP_PREFIXES)?;
    upload_all(store, container, &drops).await
}
