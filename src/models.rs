//! Data models for StreamView

use serde::Deserialize;

/// Rendering mode for the channel collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Grid,
    List,
}

/// Channel information
///
/// Immutable once constructed; the catalog is fixed for the lifetime of the
/// process.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Channel {
    pub id: String,
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub logo: Option<String>,
    pub category: String,
    #[serde(default)]
    pub description: Option<String>,
}
