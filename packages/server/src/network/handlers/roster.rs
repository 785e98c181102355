//! Roster endpoint handler.
//!
//! The display layer renders a fixed single-select list of holder names;
//! serving the configured roster here keeps that list out of the UI's own
//! configuration.

use axum::extract::State;
use axum::Json;

use gearbook_core::messages::RosterRespPayload;

use super::AppState;

/// Returns the configured holder names, in order.
#[utoipa::path(
    get,
    path = "/roster",
    responses(
        (status = 200, description = "Configured holder names", body = RosterRespPayload),
    ),
)]
pub async fn roster_handler(State(state): State<AppState>) -> Json<RosterRespPayload> {
    Json(RosterRespPayload {
        names: state.roster.as_ref().clone(),
    })
}
