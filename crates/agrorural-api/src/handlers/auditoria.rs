//! Audit trail endpoint

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};

use agrorural_application::AuditListDto;

use crate::{
    error::{ApiResult, ErrorResponse},
    models::AuditListParams,
    state::AppState,
};

/// Newest entries first
#[utoipa::path(
    get,
    path = "/api/v1/auditoria",
    tag = "auditoria",
    params(AuditListParams),
    responses(
        (status = 200, description = "Matching audit entries", body = AuditListDto),
        (status = 400, description = "Unknown entity or action", body = ErrorResponse)
    )
)]
pub async fn list_auditoria(
    State(state): State<AppState>,
    params: Result<Query<AuditListParams>, QueryRejection>,
) -> ApiResult<Json<AuditListDto>> {
    let Query(params) = params?;
    Ok(Json(state.services.auditoria.list(params.into()).await?))
}
