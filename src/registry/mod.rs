//! Registry data model.
//!
//! A snapshot of the remote catalogue: the flat global registry plus the
//! per-author partition, fetched fresh on every run and held immutable in
//! memory for the duration of that run. Maps are IndexMaps so that the
//! server's ordering survives end-to-end into generated output.

pub mod fetch;

pub use fetch::RegistryClient;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One published block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryEntry {
    /// Opaque stable identifier (24-char lowercase hex in practice).
    pub block_id: String,
    /// Name the component is exported under. Must be a valid identifier in
    /// the generated source; validated at synthesis time, not trusted.
    pub component_name: String,
    /// Owning namespace. Absent means the entry only appears globally.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Advisory semantic tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Display-only timestamp string from the server.
    #[serde(default)]
    pub last_updated: String,
}

/// componentName -> entry, unique within one map only. The same name under
/// two different authors is legal; each author gets an isolated module.
pub type Registry = IndexMap<String, RegistryEntry>;

/// author -> that author's scoped registry. The partition is server-provided
/// and trusted; ownership is never re-derived on this side.
pub type AuthorRegistry = IndexMap<String, Registry>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryMeta {
    #[serde(default)]
    pub total_blocks: usize,
    #[serde(default)]
    pub total_components: usize,
    #[serde(default)]
    pub total_authors: usize,
    #[serde(default)]
    pub last_updated: String,
}

/// The full fetch payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrySnapshot {
    #[serde(default)]
    pub registry: Registry,
    #[serde(default)]
    pub author_registry: AuthorRegistry,
    #[serde(default)]
    pub meta: RegistryMeta,
}

impl RegistrySnapshot {
    pub fn is_empty(&self) -> bool {
        self.registry.is_empty() && self.author_registry.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_deserializes_in_server_order() {
        let payload = r#"{
            "registry": {
                "Zeta": {
                    "blockId": "5f2c9a1b3e4d5c6b7a8091aa",
                    "componentName": "Zeta",
                    "title": "Zeta block",
                    "description": "Last alphabetically, first in the map",
                    "tags": ["layout"],
                    "lastUpdated": "2026-07-01T12:00:00Z"
                },
                "Alpha": {
                    "blockId": "5f2c9a1b3e4d5c6b7a8091ab",
                    "componentName": "Alpha",
                    "author": "alice",
                    "title": "Alpha block",
                    "description": "",
                    "tags": [],
                    "lastUpdated": "2026-07-02T09:30:00Z"
                }
            },
            "authorRegistry": {
                "alice": {
                    "Alpha": {
                        "blockId": "5f2c9a1b3e4d5c6b7a8091ab",
                        "componentName": "Alpha",
                        "author": "alice",
                        "title": "Alpha block",
                        "description": "",
                        "lastUpdated": "2026-07-02T09:30:00Z"
                    }
                }
            },
            "meta": {
                "totalBlocks": 2,
                "totalComponents": 2,
                "totalAuthors": 1,
                "lastUpdated": "2026-07-02T09:30:00Z"
            }
        }"#;

        let snapshot: RegistrySnapshot = serde_json::from_str(payload).unwrap();
        let names: Vec<&String> = snapshot.registry.keys().collect();
        assert_eq!(names, ["Zeta", "Alpha"]);
        assert_eq!(snapshot.meta.total_blocks, 2);
        assert_eq!(
            snapshot.author_registry["alice"]["Alpha"].author.as_deref(),
            Some("alice")
        );
        // tags omitted on the wire still deserializes as an empty list
        assert!(snapshot.author_registry["alice"]["Alpha"].tags.is_empty());
    }

    #[test]
    fn missing_required_fields_is_a_deserialize_error() {
        // componentName missing entirely
        let payload = r#"{
            "registry": {
                "Broken": { "blockId": "5f2c9a1b3e4d5c6b7a8091aa" }
            }
        }"#;
        assert!(serde_json::from_str::<RegistrySnapshot>(payload).is_err());
    }

    #[test]
    fn empty_snapshot_reports_empty() {
        let snapshot: RegistrySnapshot = serde_json::from_str("{}").unwrap();
        assert!(snapshot.is_empty());
    }
}
