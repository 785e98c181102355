//! Wire payload schemas for the Gearbook HTTP API.
//!
//! All types serialize to JSON with camelCase field names and carry
//! `utoipa` schemas so the server can publish an OpenAPI document for the
//! display layer.

pub mod records;

pub use records::{
    CreateRecordPayload, RecordView, RecordsRespPayload, RosterRespPayload, UpdateRecordPayload,
    WarningPayload,
};
