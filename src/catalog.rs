//! Built-in channel catalog and category index

use anyhow::{Context, Result};

use crate::models::Channel;

/// Sentinel category label that matches every channel
pub const ALL_CATEGORY: &str = "All";

const BUILTIN_CHANNELS: &str = include_str!("../assets/channels.json");

/// Load the channel catalog bundled into the binary.
pub fn builtin_catalog() -> Result<Vec<Channel>> {
    serde_json::from_str(BUILTIN_CHANNELS).context("built-in channel catalog is malformed")
}

/// Distinct category labels in first-seen catalog order, prefixed with the
/// "All" sentinel. Uniqueness is exact string equality.
pub fn categories(catalog: &[Channel]) -> Vec<String> {
    let mut labels = vec![ALL_CATEGORY.to_string()];
    for channel in catalog {
        if !labels[1..].contains(&channel.category) {
            labels.push(channel.category.clone());
        }
    }
    labels
}
