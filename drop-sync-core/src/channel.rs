use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One release channel entry in the index.
///
/// A manifest is an ordered sequence of these; names are expected unique
/// but the format does not enforce it, so lookups take the first match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Platform/architecture key to filename. Key order is irrelevant.
    #[serde(default)]
    pub files: BTreeMap<String, String>,
    /// Absent until the channel has been touched at least once.
    #[serde(
        rename = "lastModified",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub last_modified: Option<DateTime<Utc>>,
}

/// Parses JSON text into an ordered sequence of channels.
///
/// A document that is not a JSON array of objects with at least a `name`
/// field is a decode failure; a missing `lastModified` is tolerated.
pub fn decode(text: &str) -> Result<Vec<Channel>, serde_json::Error> {
    let channels: Vec<Channel> = serde_json::from_str(text)?;
    debug!(channel_count = channels.len(), "Decoded channel index");
    Ok(channels)
}

/// Serialises channels back to pretty-printed JSON, preserving field order
/// `name, version, url, files, lastModified` and omitting absent fields.
pub fn encode(channels: &[Channel]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(channels)
}
