//! Project Tree Types
//!
//! This module defines the project/folder node returned by the analytics
//! platform and the nested tree envelope sent back to the browser client.
//!
//! # Node Lifecycle
//!
//! A `Node` is built from exactly one upstream project record with an empty
//! `children` list. The tree aggregator attaches the resolved children once,
//! after which the node is only serialized.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::shared::error::SharedError;

/// One entry in the project/folder hierarchy
///
/// `children` is always present on the wire; a leaf serializes as `[]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    /// Platform project ID
    pub id: String,
    /// Display name
    pub name: String,
    /// Parent project ID, `None` for top-level projects
    pub parent_id: Option<String>,
    /// Resolved child projects, in remote order
    #[serde(default)]
    pub children: Vec<Node>,
}

impl Node {
    /// Create a node with no children attached yet
    pub fn new(id: impl Into<String>, name: impl Into<String>, parent_id: Option<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            parent_id,
            children: Vec::new(),
        }
    }

    /// Build a node from a raw upstream project record
    ///
    /// The record must carry a string `id`. `name` falls back to the empty
    /// string and `parentProjectId` is optional, mirroring what the platform
    /// omits for top-level projects.
    pub fn from_record(record: &Value) -> Result<Self, SharedError> {
        let id = record
            .get("id")
            .and_then(Value::as_str)
            .ok_or_else(|| SharedError::shape("project record without an id"))?;
        let name = record.get("name").and_then(Value::as_str).unwrap_or_default();
        let parent_id = record
            .get("parentProjectId")
            .and_then(Value::as_str)
            .map(str::to_string);

        Ok(Self::new(id, name, parent_id))
    }

    /// Count this node and every node below it
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(Node::subtree_len).sum::<usize>()
    }
}

/// Response body for the folder-tree request
///
/// `raw_data` is the untouched top-level payload from the platform;
/// `nested_projects` is the fully resolved tree built from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectTreeResponse {
    pub raw_data: Value,
    pub nested_projects: Vec<Node>,
}
