//! An in-memory data source loaded from JSON.

use std::{fs, path::Path, time::Duration};

use async_trait::async_trait;
use orgtree_cache::{NodeId, NodeRecord};
use serde::Deserialize;
use tokio::time::sleep;

use super::DataSource;
use crate::SourceError;

/// A record as it appears in a dataset file, before validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawRecord {
    /// Node identifier. Required.
    pub id: Option<String>,
    /// Parent identifier. Absent or null for the root.
    pub parent_id: Option<String>,
    /// Display name. Required.
    pub name: Option<String>,
    /// Has-children hint. Defaults to false.
    pub has_children: Option<bool>,
    /// Field matched by search instead of `name`, if present.
    pub search_key: Option<String>,
    /// Alternative spelling of `search_key` used by org-chart exports.
    pub first_name: Option<String>,
}

impl RawRecord {
    /// Validates the record, returning it together with its lowercased search key.
    fn validate(self, index: usize) -> Result<Entry, SourceError> {
        let id = non_empty(self.id).ok_or(SourceError::InvalidRecord { index, field: "id" })?;
        let name = non_empty(self.name).ok_or(SourceError::InvalidRecord {
            index,
            field: "name",
        })?;
        let key = self
            .search_key
            .or(self.first_name)
            .unwrap_or_else(|| name.clone())
            .to_lowercase();
        Ok(Entry {
            record: NodeRecord {
                id: NodeId::from(id),
                parent_id: non_empty(self.parent_id).map(NodeId::from),
                name,
                has_children: self.has_children.unwrap_or(false),
            },
            key,
        })
    }
}

/// Treats blank strings the same as missing ones.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// A validated record and its search key.
#[derive(Debug, Clone)]
struct Entry {
    /// The record handed to callers.
    record: NodeRecord,
    /// Lowercased text matched by [`DataSource::search`].
    key: String,
}

/// A [`DataSource`] over a fixed list of records.
///
/// Records keep their input order, which is the order `get_children` reports.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    /// Validated records in input order.
    entries: Vec<Entry>,
    /// Delay applied to every call.
    latency: Duration,
}

impl MemorySource {
    /// Builds a source from raw records, rejecting any that fail validation.
    pub fn from_raw(records: Vec<RawRecord>) -> Result<Self, SourceError> {
        let entries = records
            .into_iter()
            .enumerate()
            .map(|(index, raw)| raw.validate(index))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            entries,
            latency: Duration::ZERO,
        })
    }

    /// Builds a source from already validated records, searching on their names.
    pub fn from_records(records: Vec<NodeRecord>) -> Self {
        let entries = records
            .into_iter()
            .map(|record| Entry {
                key: record.name.to_lowercase(),
                record,
            })
            .collect();
        Self {
            entries,
            latency: Duration::ZERO,
        }
    }

    /// Parses a JSON array of raw records.
    pub fn from_json_str(json: &str, path: &Path) -> Result<Self, SourceError> {
        let records: Vec<RawRecord> =
            serde_json::from_str(json).map_err(|source| SourceError::ParseJson {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_raw(records)
    }

    /// Loads a JSON dataset file.
    pub fn from_json_file(path: &Path) -> Result<Self, SourceError> {
        let json = fs::read_to_string(path).map_err(|source| SourceError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json, path)
    }

    /// Sets a delay applied before every call completes.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the source holds no records.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sleeps for the configured latency.
    async fn delay(&self) {
        if !self.latency.is_zero() {
            sleep(self.latency).await;
        }
    }
}

#[async_trait]
impl DataSource for MemorySource {
    async fn get_children(&self, parent: &NodeId) -> Result<Vec<NodeRecord>, SourceError> {
        self.delay().await;
        Ok(self
            .entries
            .iter()
            .filter(|e| e.record.parent_id.as_ref() == Some(parent))
            .map(|e| e.record.clone())
            .collect())
    }

    async fn get_node(&self, id: &NodeId) -> Result<Option<NodeRecord>, SourceError> {
        self.delay().await;
        Ok(self
            .entries
            .iter()
            .find(|e| &e.record.id == id)
            .map(|e| e.record.clone()))
    }

    async fn search(&self, term: &str) -> Result<Vec<NodeRecord>, SourceError> {
        self.delay().await;
        let needle = term.to_lowercase();
        Ok(self
            .entries
            .iter()
            .filter(|e| e.key.contains(&needle))
            .map(|e| e.record.clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use tokio::time::Instant;

    use super::*;

    fn source(json: &str) -> Result<MemorySource, SourceError> {
        MemorySource::from_json_str(json, &PathBuf::from("test.json"))
    }

    #[tokio::test]
    async fn children_keep_input_order() {
        let source = source(
            r#"[
                {"id": "root", "name": "Root", "hasChildren": true},
                {"id": "b", "parentId": "root", "name": "B"},
                {"id": "a", "parentId": "root", "name": "A"}
            ]"#,
        )
        .unwrap();

        let kids = source.get_children(&NodeId::from("root")).await.unwrap();
        let ids: Vec<&str> = kids.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert!(!kids[0].has_children);
    }

    #[tokio::test]
    async fn search_prefers_first_name_and_ignores_case() {
        let source = source(
            r#"[
                {"id": "1", "name": "Ada Lovelace", "firstName": "Ada"},
                {"id": "2", "name": "Grace Hopper"}
            ]"#,
        )
        .unwrap();

        let hits = source.search("LOVE").await.unwrap();
        assert!(hits.is_empty(), "name is not searched when firstName is set");

        let hits = source.search("aDa").await.unwrap();
        assert_eq!(hits.len(), 1);

        let hits = source.search("hopp").await.unwrap();
        assert_eq!(hits[0].id.as_str(), "2");
    }

    #[tokio::test]
    async fn get_node_finds_single_record() {
        let source = source(r#"[{"id": "1", "name": "One", "parentId": null}]"#).unwrap();
        let node = source.get_node(&NodeId::from("1")).await.unwrap().unwrap();
        assert!(node.parent_id.is_none());
        assert!(source.get_node(&NodeId::from("2")).await.unwrap().is_none());
    }

    #[test]
    fn missing_fields_are_rejected() {
        let err = source(r#"[{"id": "1", "name": "One"}, {"name": "Two"}]"#).unwrap_err();
        assert!(matches!(
            err,
            SourceError::InvalidRecord {
                index: 1,
                field: "id"
            }
        ));

        let err = source(r#"[{"id": "1", "name": "  "}]"#).unwrap_err();
        assert!(matches!(
            err,
            SourceError::InvalidRecord { field: "name", .. }
        ));
    }

    #[test]
    fn malformed_json_reports_path() {
        let err = source("not json").unwrap_err();
        assert!(err.to_string().contains("test.json"));
    }

    #[test]
    fn missing_file_is_read_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = MemorySource::from_json_file(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, SourceError::ReadFile { .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn latency_delays_calls() {
        let source = MemorySource::from_records(vec![NodeRecord::root("root", "Root")])
            .with_latency(Duration::from_millis(200));
        let start = Instant::now();
        source.get_node(&NodeId::from("root")).await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(200));
    }
}
