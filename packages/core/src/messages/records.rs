//! Records domain payload structs for the HTTP API.
//!
//! Request bodies for create/update, the records listing response with
//! 1-based display indices, and the inline warning body used for all
//! non-fatal validation failures.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::record::DeviceRecord;

/// Body of a create request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecordPayload {
    /// Name of the person the device is signed out to.
    pub fullname: String,
    /// Device name.
    pub device: String,
    /// Device barcode.
    pub barcode: String,
}

/// Body of an update request.
///
/// The target row is addressed by the display index in the request path,
/// never by a field of the body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRecordPayload {
    /// Replacement person name.
    pub fullname: String,
    /// Replacement device name.
    pub device: String,
    /// Replacement barcode.
    pub barcode: String,
}

/// A record as rendered to the display layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordView {
    /// 1-based display index within the current listing.
    ///
    /// This is the index update and delete requests address. It is a
    /// position, not an identity: deleting a row renumbers every later one.
    pub index: u32,
    /// Name of the person the device is signed out to.
    pub fullname: String,
    /// Device name.
    pub device: String,
    /// Device barcode.
    pub barcode: String,
}

impl RecordView {
    /// Builds a view from a record and its 1-based display index.
    #[must_use]
    pub fn new(index: u32, record: DeviceRecord) -> Self {
        Self {
            index,
            fullname: record.fullname,
            device: record.device,
            barcode: record.barcode,
        }
    }
}

/// Response to a listing or search request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordsRespPayload {
    /// Matched records, in display order.
    pub records: Vec<RecordView>,
    /// Number of records in `records`.
    pub total_count: u32,
}

/// Inline, non-fatal warning body.
///
/// All recoverable validation failures (invalid index, unknown search
/// column, missing index) are reported this way, in place of a result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WarningPayload {
    /// Human-readable warning text.
    pub warning: String,
}

/// Response to a roster request: the fixed list of holder names the display
/// layer offers in its person selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RosterRespPayload {
    /// Holder names, in configured order.
    pub names: Vec<String>,
}
