//! Cultura API handlers

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};

use agrorural_application::{CreateCulturaCommand, CulturaDto, CulturaListDto, UpdateCulturaCommand};

use crate::{
    error::{ApiResult, ErrorResponse},
    state::AppState,
};

#[utoipa::path(
    post,
    path = "/api/v1/culturas",
    tag = "culturas",
    request_body = CreateCulturaCommand,
    responses(
        (status = 201, description = "Cultura created", body = CulturaDto),
        (status = 400, description = "Blank or too long name", body = ErrorResponse),
        (status = 409, description = "Name already used", body = ErrorResponse)
    )
)]
pub async fn create_cultura(
    State(state): State<AppState>,
    payload: Result<Json<CreateCulturaCommand>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<CulturaDto>)> {
    let Json(cmd) = payload?;
    let dto = state.services.culturas.create(cmd).await?;
    Ok((StatusCode::CREATED, Json(dto)))
}

#[utoipa::path(
    get,
    path = "/api/v1/culturas",
    tag = "culturas",
    responses(
        (status = 200, description = "All crop types", body = CulturaListDto)
    )
)]
pub async fn list_culturas(State(state): State<AppState>) -> ApiResult<Json<CulturaListDto>> {
    Ok(Json(state.services.culturas.find_all().await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/culturas/{id}",
    tag = "culturas",
    params(("id" = String, Path, description = "Cultura id")),
    responses(
        (status = 200, description = "Cultura", body = CulturaDto),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn get_cultura(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<CulturaDto>> {
    Ok(Json(state.services.culturas.find_one(&id).await?))
}

#[utoipa::path(
    patch,
    path = "/api/v1/culturas/{id}",
    tag = "culturas",
    params(("id" = String, Path, description = "Cultura id")),
    request_body = UpdateCulturaCommand,
    responses(
        (status = 200, description = "Renamed cultura", body = CulturaDto),
        (status = 404, description = "Not found", body = ErrorResponse),
        (status = 409, description = "Name already used", body = ErrorResponse)
    )
)]
pub async fn update_cultura(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateCulturaCommand>, JsonRejection>,
) -> ApiResult<Json<CulturaDto>> {
    let Json(cmd) = payload?;
    Ok(Json(state.services.culturas.update(&id, cmd).await?))
}

/// Delete a crop type that no cultivo references
#[utoipa::path(
    delete,
    path = "/api/v1/culturas/{id}",
    tag = "culturas",
    params(("id" = String, Path, description = "Cultura id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not found", body = ErrorResponse),
        (status = 409, description = "Still planted somewhere", body = ErrorResponse)
    )
)]
pub async fn delete_cultura(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.services.culturas.remove(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
