/**
 * Preview Fan-out
 *
 * Fetches one preview image per listed view and joins the results back to
 * the view list by `viewId`.
 *
 * # Concurrency
 *
 * At most `preview_concurrency` fetches are outstanding at once. Results are
 * emitted in input order regardless of completion order, so `images[i]`
 * always belongs to `views[i]`.
 *
 * # Deadlines
 *
 * Each fetch has the per-call deadline; the batch as a whole has
 * `preview_batch_timeout`. A fetch that misses either deadline, or fails for
 * any other reason, yields `previewImage: null` for its view. Only the views
 * listing itself can fail the operation.
 */

use std::time::Duration;

use futures_util::future::BoxFuture;
use futures_util::stream::{self, StreamExt};
use tokio::time::Instant;

use crate::backend::remote::{with_deadline, RemoteApi, RemoteError};
use crate::shared::{Credential, PreviewResult, RelayConfig, ViewPreviewsResponse, ViewRef};

/// Collects previews for one request
pub struct PreviewCollector<'a> {
    remote: &'a dyn RemoteApi,
    credential: &'a Credential,
    concurrency: usize,
    call_timeout: Duration,
    batch_timeout: Duration,
}

impl<'a> PreviewCollector<'a> {
    pub fn new(remote: &'a dyn RemoteApi, credential: &'a Credential, config: &RelayConfig) -> Self {
        Self {
            remote,
            credential,
            concurrency: config.preview_concurrency.max(1),
            call_timeout: config.request_timeout,
            batch_timeout: config.preview_batch_timeout,
        }
    }

    /// List the views under `filter`, then collect their previews
    ///
    /// Fails only if the views listing fails.
    pub async fn list_with_previews(
        &self,
        filter: Option<&str>,
    ) -> Result<ViewPreviewsResponse, RemoteError> {
        let views = with_deadline(
            "views listing",
            self.call_timeout,
            self.remote.list_views(filter, self.credential),
        )
        .await
        .map_err(|err| {
            tracing::error!("Views listing failed: {}", err);
            err
        })?;

        let images = self.collect(&views).await;
        Ok(ViewPreviewsResponse { views, images })
    }

    /// One `PreviewResult` per view, in view order
    pub async fn collect(&self, views: &[ViewRef]) -> Vec<PreviewResult> {
        let batch_deadline = Instant::now() + self.batch_timeout;

        let pending: Vec<BoxFuture<'_, PreviewResult>> = views
            .iter()
            .map(|view| -> BoxFuture<'_, PreviewResult> {
                Box::pin(self.preview(view, batch_deadline))
            })
            .collect();

        let images: Vec<PreviewResult> = stream::iter(pending)
            .buffered(self.concurrency)
            .collect()
            .await;

        let missing = images
            .iter()
            .filter(|image| image.preview_image.is_none())
            .count();
        tracing::info!(
            "Collected {} preview(s), {} missing",
            images.len() - missing,
            missing
        );
        images
    }

    async fn preview(&self, view: &ViewRef, batch_deadline: Instant) -> PreviewResult {
        let call = with_deadline(
            format!("preview of view {}", view.view_id),
            self.call_timeout,
            self.remote.fetch_preview(
                &self.credential.site_id,
                &view.workbook_id,
                &view.view_id,
                self.credential,
            ),
        );

        match tokio::time::timeout_at(batch_deadline, call).await {
            Ok(Ok(bytes)) => PreviewResult::encoded(view.view_id.clone(), &bytes),
            Ok(Err(err)) => {
                tracing::warn!("No preview for view {}: {}", view.view_id, err);
                PreviewResult::missing(view.view_id.clone())
            }
            Err(_) => {
                tracing::warn!("No preview for view {}: batch deadline passed", view.view_id);
                PreviewResult::missing(view.view_id.clone())
            }
        }
    }
}
