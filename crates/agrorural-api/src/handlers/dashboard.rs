//! Dashboard endpoint

use axum::{extract::State, Json};

use agrorural_application::DashboardDto;

use crate::{
    error::{ApiResult, ErrorResponse},
    state::AppState,
};

/// Farm counts, hectares and land use across all properties
#[utoipa::path(
    get,
    path = "/api/v1/dashboard",
    tag = "dashboard",
    responses(
        (status = 200, description = "Aggregate statistics", body = DashboardDto),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn get_dashboard(State(state): State<AppState>) -> ApiResult<Json<DashboardDto>> {
    Ok(Json(state.services.dashboard.summary().await?))
}
