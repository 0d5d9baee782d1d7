//! View and Preview Types
//!
//! `ViewRef` is a reference to one report view as listed by the platform.
//! Only `viewId` and `workbookId` are interpreted; every other attribute of
//! the upstream record is carried through untouched so the browser client
//! sees the same fields it would get from the platform directly.
//!
//! `PreviewResult` is one slot of the fan-out result, keyed by `viewId`.

use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::shared::error::SharedError;

/// MIME type used for preview data URIs
pub const PREVIEW_MIME: &str = "image/png";

/// Reference to one view, with pass-through attributes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewRef {
    pub view_id: String,
    pub workbook_id: String,
    /// Remaining upstream attributes (name, contentUrl, owner, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ViewRef {
    pub fn new(view_id: impl Into<String>, workbook_id: impl Into<String>) -> Self {
        Self {
            view_id: view_id.into(),
            workbook_id: workbook_id.into(),
            extra: Map::new(),
        }
    }

    /// Build a view reference from an upstream view record
    ///
    /// The platform nests the owning workbook as `{"workbook": {"id": ...}}`.
    /// Both ids are required; the record's `id` field is renamed to `viewId`
    /// and the rest is kept as-is.
    pub fn from_record(record: Value) -> Result<Self, SharedError> {
        let Value::Object(mut fields) = record else {
            return Err(SharedError::shape("view record is not an object"));
        };

        let view_id = match fields.remove("id") {
            Some(Value::String(id)) => id,
            _ => return Err(SharedError::shape("view record without an id")),
        };
        let workbook_id = fields
            .get("workbook")
            .and_then(|workbook| workbook.get("id"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| SharedError::shape(format!("view {view_id} without workbook.id")))?;

        Ok(Self {
            view_id,
            workbook_id,
            extra: fields,
        })
    }
}

/// Preview outcome for one view
///
/// `preview_image` is `None` when the fetch failed; it serializes as `null`,
/// never as a missing field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewResult {
    pub view_id: String,
    pub preview_image: Option<String>,
}

impl PreviewResult {
    /// Successful preview, encoded as a PNG data URI
    pub fn encoded(view_id: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            view_id: view_id.into(),
            preview_image: Some(to_data_uri(bytes)),
        }
    }

    /// Failed preview placeholder
    pub fn missing(view_id: impl Into<String>) -> Self {
        Self {
            view_id: view_id.into(),
            preview_image: None,
        }
    }
}

/// Encode raw image bytes as a `data:` URI
pub fn to_data_uri(bytes: &[u8]) -> String {
    format!("data:{};base64,{}", PREVIEW_MIME, STANDARD.encode(bytes))
}

/// Response body for the view/preview request
///
/// `views` and `images` are parallel lists joinable by `viewId`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewPreviewsResponse {
    pub views: Vec<ViewRef>,
    pub images: Vec<PreviewResult>,
}
