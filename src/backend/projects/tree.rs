/**
 * Project Tree Aggregation
 *
 * Builds one fully resolved project tree from a single root listing.
 *
 * # Algorithm
 *
 * 1. List the top-level projects (the root frontier). Failure here is fatal.
 * 2. For every node of a frontier, list its direct children. Siblings are
 *    fetched concurrently and joined back in listing order.
 * 3. A non-empty child list becomes the next frontier and is resolved before
 *    being attached. An empty list stops that branch.
 *
 * # Failure Semantics
 *
 * - A failed or timed-out child listing degrades to "no children" and is
 *   logged; the rest of the tree is still returned.
 * - A project that appears on its own ancestor path aborts the whole tree
 *   with `CycleDetected`.
 * - A hierarchy deeper than the configured limit aborts with `DepthExceeded`.
 */

use std::time::Duration;

use futures_util::future::{join_all, BoxFuture};
use thiserror::Error;

use crate::backend::remote::{with_deadline, NodeScope, RemoteApi, RemoteError};
use crate::shared::{Credential, Node, ProjectTreeResponse, RelayConfig};

/// Fatal tree aggregation failures
#[derive(Debug, Error)]
pub enum TreeError {
    /// Root listing failed
    #[error(transparent)]
    Remote(#[from] RemoteError),

    #[error("project {node_id} appears in its own ancestry")]
    CycleDetected { node_id: String },

    #[error("project hierarchy is deeper than {limit} levels")]
    DepthExceeded { limit: usize },
}

/// Resolves the project hierarchy for one request
pub struct TreeAggregator<'a> {
    remote: &'a dyn RemoteApi,
    credential: &'a Credential,
    max_depth: usize,
    call_timeout: Duration,
}

impl<'a> TreeAggregator<'a> {
    pub fn new(remote: &'a dyn RemoteApi, credential: &'a Credential, config: &RelayConfig) -> Self {
        Self {
            remote,
            credential,
            max_depth: config.tree_max_depth,
            call_timeout: config.request_timeout,
        }
    }

    /// Fetch the root listing for `filter` and resolve every subtree
    pub async fn build(&self, filter: Option<&str>) -> Result<ProjectTreeResponse, TreeError> {
        let root = with_deadline(
            "root project listing",
            self.call_timeout,
            self.remote
                .fetch_nodes(NodeScope::Root { filter }, self.credential),
        )
        .await
        .map_err(|err| {
            tracing::error!("Root project listing failed: {}", err);
            err
        })?;

        tracing::info!(
            "Resolving project tree from {} top-level project(s)",
            root.nodes.len()
        );
        let nested_projects = self.resolve(root.nodes, Vec::new()).await?;

        Ok(ProjectTreeResponse {
            raw_data: root.raw,
            nested_projects,
        })
    }

    /// Resolve a frontier whose nodes sit below `ancestors`
    fn resolve(
        &self,
        frontier: Vec<Node>,
        ancestors: Vec<String>,
    ) -> BoxFuture<'_, Result<Vec<Node>, TreeError>> {
        Box::pin(async move {
            if frontier.is_empty() {
                return Ok(frontier);
            }
            if ancestors.len() >= self.max_depth {
                return Err(TreeError::DepthExceeded {
                    limit: self.max_depth,
                });
            }
            if let Some(node) = frontier.iter().find(|node| ancestors.contains(&node.id)) {
                return Err(TreeError::CycleDetected {
                    node_id: node.id.clone(),
                });
            }

            join_all(
                frontier
                    .into_iter()
                    .map(|node| self.attach_children(node, &ancestors)),
            )
            .await
            .into_iter()
            .collect()
        })
    }

    async fn attach_children(&self, mut node: Node, ancestors: &[String]) -> Result<Node, TreeError> {
        let children = self.fetch_children(&node.id).await;
        if children.is_empty() {
            return Ok(node);
        }

        let mut path = ancestors.to_vec();
        path.push(node.id.clone());
        node.children = self.resolve(children, path).await?;
        Ok(node)
    }

    /// Child listing for one node; failures become an empty list
    async fn fetch_children(&self, parent_id: &str) -> Vec<Node> {
        let listing = with_deadline(
            format!("child listing of project {parent_id}"),
            self.call_timeout,
            self.remote
                .fetch_nodes(NodeScope::Children(parent_id), self.credential),
        )
        .await;

        match listing {
            Ok(page) => page.nodes,
            Err(err) => {
                tracing::warn!("Treating project {} as a leaf: {}", parent_id, err);
                Vec::new()
            }
        }
    }
}
