//! Records CRUD and search handlers.
//!
//! One store round trip per request, then a full re-render on the display
//! side: list/search materializes the whole record set with 1-based display
//! indices; create/update/delete return no body. Search preserves the
//! original display indices of matching records so a follow-up update or
//! delete can address them.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use metrics::counter;
use serde::Deserialize;
use utoipa::IntoParams;

use gearbook_core::messages::{
    CreateRecordPayload, RecordView, RecordsRespPayload, UpdateRecordPayload, WarningPayload,
};
use gearbook_core::record::RecordColumn;
use gearbook_core::search::{matches, SearchError};

use super::{ApiError, AppState};

/// Query parameters of the listing/search endpoint.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListRecordsParams {
    /// Column to search: `Fullname`, `Device`, or `Barcode`. Defaults to
    /// `Fullname`.
    pub column: Option<String>,
    /// Substring to search for, case-insensitively. Absent or empty lists
    /// all records.
    pub q: Option<String>,
}

/// Lists all records, or the search matches when a query is present.
#[utoipa::path(
    get,
    path = "/records",
    params(ListRecordsParams),
    responses(
        (status = 200, description = "Records with 1-based display indices", body = RecordsRespPayload),
        (status = 422, description = "Unknown search column", body = WarningPayload),
    ),
)]
pub async fn list_records_handler(
    State(state): State<AppState>,
    Query(params): Query<ListRecordsParams>,
) -> Result<Json<RecordsRespPayload>, ApiError> {
    let records = state.records.read().await?;
    let indexed = records.into_iter().enumerate().map(|(position, record)| {
        (u32::try_from(position + 1).unwrap_or(u32::MAX), record)
    });

    let views: Vec<RecordView> = match params.q.as_deref() {
        None | Some("") => indexed
            .map(|(index, record)| RecordView::new(index, record))
            .collect(),
        Some(query) => {
            let column_name = params
                .column
                .as_deref()
                .unwrap_or(RecordColumn::Fullname.as_str());
            let column = RecordColumn::parse(column_name).ok_or_else(|| {
                ApiError::Warning(
                    SearchError::UnknownColumn(column_name.to_string()).to_string(),
                )
            })?;

            counter!("gearbook_searches_total").increment(1);
            indexed
                .filter(|(_, record)| matches(record, column, query))
                .map(|(index, record)| RecordView::new(index, record))
                .collect()
        }
    };

    let total_count = u32::try_from(views.len()).unwrap_or(u32::MAX);
    Ok(Json(RecordsRespPayload {
        records: views,
        total_count,
    }))
}

/// Appends a new record with the next sequence number.
#[utoipa::path(
    post,
    path = "/records",
    request_body = CreateRecordPayload,
    responses(
        (status = 201, description = "Record appended"),
        (status = 500, description = "Store fault", body = WarningPayload),
    ),
)]
pub async fn create_record_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateRecordPayload>,
) -> Result<StatusCode, ApiError> {
    let _guard = state.shutdown.in_flight_guard();
    state
        .records
        .create(&payload.fullname, &payload.device, &payload.barcode)
        .await?;
    Ok(StatusCode::CREATED)
}

/// Overwrites the record at the given 1-based display index.
#[utoipa::path(
    put,
    path = "/records/{index}",
    params(("index" = i64, Path, description = "1-based display index")),
    request_body = UpdateRecordPayload,
    responses(
        (status = 204, description = "Record updated"),
        (status = 422, description = "Invalid row index", body = WarningPayload),
    ),
)]
pub async fn update_record_handler(
    State(state): State<AppState>,
    Path(index): Path<i64>,
    Json(payload): Json<UpdateRecordPayload>,
) -> Result<StatusCode, ApiError> {
    let _guard = state.shutdown.in_flight_guard();
    state
        .records
        .update(index, &payload.fullname, &payload.device, &payload.barcode)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Removes the record at the given 1-based display index.
///
/// Every later record's display index permanently drops by one.
#[utoipa::path(
    delete,
    path = "/records/{index}",
    params(("index" = i64, Path, description = "1-based display index")),
    responses(
        (status = 204, description = "Record deleted"),
        (status = 422, description = "Invalid row index", body = WarningPayload),
    ),
)]
pub async fn delete_record_handler(
    State(state): State<AppState>,
    Path(index): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let _guard = state.shutdown.in_flight_guard();
    state.records.delete(index).await?;
    Ok(StatusCode::NO_CONTENT)
}
