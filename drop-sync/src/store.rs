//! Blob REST client: the concrete [`ObjectStore`] used by the CLI.
//!
//! Talks the blob storage REST dialect over HTTPS with account-SAS
//! authorisation: every request carries the SAS token from the settings as
//! its query string, so no request signing happens here. The endpoint is
//! derived from the account name, or taken verbatim from the settings for
//! emulators and test servers.
//!
//! Credential validation is purely syntactic and happens at construction
//! time ([`BlobClient::new`]); it never touches the network, which is what
//! the `check` command relies on.
//!
//! All store-level failures are mapped to the structured [`StoreError`]
//! kind: a 404 becomes [`StoreError::NotFound`], anything else carries its
//! HTTP status, so callers never inspect a cause chain.

use std::path::Path;

use async_trait::async_trait;
use regex::Regex;
use reqwest::{Response, StatusCode};
use thiserror::Error;
use tracing::{debug, info};

use drop_sync_core::contract::{ObjectStore, PublicAccess, StoreError};
use drop_sync_core::index::ROOT_CONTAINER;

use crate::load_config::Settings;

/// Storage account names are 3-24 lowercase alphanumeric characters.
const ACCOUNT_NAME_PATTERN: &str = "^[a-z0-9]{3,24}$";

/// Containers already present report 409; that is success for ensure.
const CONTAINER_EXISTS: u16 = 409;

#[derive(Debug, Error)]
#[error("invalid storage account information")]
pub struct CredentialError;

pub struct BlobClient {
    http: reqwest::Client,
    endpoint: String,
    sas_token: String,
}

impl BlobClient {
    /// Builds a client from the settings, validating credential shape:
    /// the account name must match the storage naming rules and the key
    /// must look like an account SAS token (it carries a `sig=` field).
    pub fn new(settings: &Settings) -> Result<Self, CredentialError> {
        let account_re = Regex::new(ACCOUNT_NAME_PATTERN).expect("account name pattern is valid");
        if !account_re.is_match(&settings.account_name) {
            tracing::error!(
                account_name = %settings.account_name,
                "Account name does not match storage naming rules"
            );
            return Err(CredentialError);
        }
        if !settings.account_key.contains("sig=") {
            tracing::error!("Account key is not a SAS token (missing signature field)");
            return Err(CredentialError);
        }

        let endpoint = match &settings.endpoint {
            Some(endpoint) => endpoint.trim_end_matches('/').to_string(),
            None => format!("https://{}.blob.core.windows.net", settings.account_name),
        };
        info!(endpoint = %endpoint, "Initialized blob client");
        Ok(BlobClient {
            http: reqwest::Client::new(),
            endpoint,
            sas_token: settings.account_key.trim_start_matches('?').to_string(),
        })
    }

    fn object_url(&self, container: &str, key: &str) -> String {
        format!("{}/{}/{}?{}", self.endpoint, container, key, self.sas_token)
    }

    fn container_url(&self, name: &str, params: &str) -> String {
        format!("{}/{}?{}&{}", self.endpoint, name, params, self.sas_token)
    }
}

fn transport(e: reqwest::Error) -> StoreError {
    StoreError::Transport(e.to_string())
}

/// Maps a non-success response to the structured error kind, reading the
/// body as the diagnostic message.
async fn check_status(response: Response) -> Result<Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::NOT_FOUND {
        return Err(StoreError::NotFound);
    }
    let message = response.text().await.unwrap_or_default();
    Err(StoreError::Http {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl ObjectStore for BlobClient {
    async fn get_text(&self, path: &str) -> Result<String, StoreError> {
        let url = self.object_url(ROOT_CONTAINER, path);
        debug!(path, "GET object as text");
        let response = self.http.get(&url).send().await.map_err(transport)?;
        let response = check_status(response).await?;
        response.text().await.map_err(transport)
    }

    async fn put_text(&self, path: &str, text: &str) -> Result<(), StoreError> {
        let url = self.object_url(ROOT_CONTAINER, path);
        debug!(path, bytes = text.len(), "PUT object from text");
        let response = self
            .http
            .put(&url)
            .header("x-ms-blob-type", "BlockBlob")
            .header("content-type", "application/json")
            .body(text.to_string())
            .send()
            .await
            .map_err(transport)?;
        check_status(response).await?;
        Ok(())
    }

    async fn ensure_container(&self, name: &str) -> Result<(), StoreError> {
        let url = self.container_url(name, "restype=container");
        debug!(container = name, "PUT container");
        let response = self.http.put(&url).send().await.map_err(transport)?;
        match check_status(response).await {
            Ok(_) => Ok(()),
            Err(StoreError::Http { status, .. }) if status == CONTAINER_EXISTS => Ok(()),
            Err(e) => Err(e),
        }
    }

    async fn set_public_access(&self, name: &str, access: PublicAccess) -> Result<(), StoreError> {
        let url = self.container_url(name, "restype=container&comp=acl");
        debug!(container = name, ?access, "PUT container ACL");
        let mut request = self.http.put(&url);
        request = match access {
            PublicAccess::None => request,
            PublicAccess::Blob => request.header("x-ms-blob-public-access", "blob"),
            PublicAccess::Container => request.header("x-ms-blob-public-access", "container"),
        };
        let response = request.send().await.map_err(transport)?;
        check_status(response).await?;
        Ok(())
    }

    async fn put_file(
        &self,
        container: &str,
        key: &str,
        local_path: &Path,
    ) -> Result<(), StoreError> {
        let content = tokio::fs::read(local_path).await?;
        let url = self.object_url(container, key);
        debug!(
            container,
            key,
            bytes = content.len(),
            "PUT object from file"
        );
        let response = self
            .http
            .put(&url)
            .header("x-ms-blob-type", "BlockBlob")
            .body(content)
            .send()
            .await
            .map_err(transport)?;
        check_status(response).await?;
        Ok(())
    }
}
