//! Safra API handlers

use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    Json,
};

use agrorural_application::{
    CascadeReportDto, CreateSafraCommand, SafraDto, SafraListDto, UpdateSafraCommand,
};

use crate::{
    error::{ApiResult, ErrorResponse},
    models::SafraListParams,
    state::AppState,
};

#[utoipa::path(
    post,
    path = "/api/v1/safras",
    tag = "safras",
    request_body = CreateSafraCommand,
    responses(
        (status = 201, description = "Safra created", body = SafraDto),
        (status = 400, description = "Year out of range", body = ErrorResponse),
        (status = 404, description = "Propriedade not found", body = ErrorResponse),
        (status = 409, description = "Year already registered for the property", body = ErrorResponse)
    )
)]
pub async fn create_safra(
    State(state): State<AppState>,
    payload: Result<Json<CreateSafraCommand>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<SafraDto>)> {
    let Json(cmd) = payload?;
    let dto = state.services.safras.create(cmd).await?;
    Ok((StatusCode::CREATED, Json(dto)))
}

#[utoipa::path(
    get,
    path = "/api/v1/safras",
    tag = "safras",
    params(SafraListParams),
    responses(
        (status = 200, description = "Page of seasons", body = SafraListDto)
    )
)]
pub async fn list_safras(
    State(state): State<AppState>,
    params: Result<Query<SafraListParams>, QueryRejection>,
) -> ApiResult<Json<SafraListDto>> {
    let Query(params) = params?;
    let list = state
        .services
        .safras
        .find_all(params.propriedade_id.as_deref(), params.page())
        .await?;
    Ok(Json(list))
}

#[utoipa::path(
    get,
    path = "/api/v1/safras/{id}",
    tag = "safras",
    params(("id" = String, Path, description = "Safra id")),
    responses(
        (status = 200, description = "Safra", body = SafraDto),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn get_safra(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<SafraDto>> {
    Ok(Json(state.services.safras.find_one(&id).await?))
}

#[utoipa::path(
    patch,
    path = "/api/v1/safras/{id}",
    tag = "safras",
    params(("id" = String, Path, description = "Safra id")),
    request_body = UpdateSafraCommand,
    responses(
        (status = 200, description = "Updated safra", body = SafraDto),
        (status = 404, description = "Not found", body = ErrorResponse),
        (status = 409, description = "Year already registered for the property", body = ErrorResponse)
    )
)]
pub async fn update_safra(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateSafraCommand>, JsonRejection>,
) -> ApiResult<Json<SafraDto>> {
    let Json(cmd) = payload?;
    Ok(Json(state.services.safras.update(&id, cmd).await?))
}

/// Remove a season and its plantings
#[utoipa::path(
    delete,
    path = "/api/v1/safras/{id}",
    tag = "safras",
    params(("id" = String, Path, description = "Safra id")),
    responses(
        (status = 200, description = "Rows removed", body = CascadeReportDto),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn delete_safra(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<CascadeReportDto>> {
    Ok(Json(state.services.safras.remove(&id).await?))
}
