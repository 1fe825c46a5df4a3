//! PropriedadeRural API handlers

use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    Json,
};

use agrorural_application::{
    CascadeReportDto, CreatePropriedadeCommand, PropriedadeDto, PropriedadeListDto,
    UpdatePropriedadeCommand,
};

use crate::{
    error::{ApiResult, ErrorResponse},
    models::PageParams,
    state::AppState,
};

#[utoipa::path(
    post,
    path = "/api/v1/propriedades",
    tag = "propriedades",
    request_body = CreatePropriedadeCommand,
    responses(
        (status = 201, description = "Propriedade created", body = PropriedadeDto),
        (status = 400, description = "Invalid payload or estado", body = ErrorResponse),
        (status = 404, description = "Owner not found", body = ErrorResponse),
        (status = 422, description = "Areas exceed area_total", body = ErrorResponse)
    )
)]
pub async fn create_propriedade(
    State(state): State<AppState>,
    payload: Result<Json<CreatePropriedadeCommand>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<PropriedadeDto>)> {
    let Json(cmd) = payload?;
    let dto = state.services.propriedades.create(cmd).await?;
    Ok((StatusCode::CREATED, Json(dto)))
}

#[utoipa::path(
    get,
    path = "/api/v1/propriedades",
    tag = "propriedades",
    params(PageParams),
    responses(
        (status = 200, description = "Page of properties", body = PropriedadeListDto)
    )
)]
pub async fn list_propriedades(
    State(state): State<AppState>,
    params: Result<Query<PageParams>, QueryRejection>,
) -> ApiResult<Json<PropriedadeListDto>> {
    let Query(params) = params?;
    Ok(Json(state.services.propriedades.find_all(params.page()).await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/propriedades/{id}",
    tag = "propriedades",
    params(("id" = String, Path, description = "Propriedade id")),
    responses(
        (status = 200, description = "Propriedade", body = PropriedadeDto),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn get_propriedade(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<PropriedadeDto>> {
    Ok(Json(state.services.propriedades.find_one(&id).await?))
}

/// Partial update; area changes are checked against existing plantings
#[utoipa::path(
    patch,
    path = "/api/v1/propriedades/{id}",
    tag = "propriedades",
    params(("id" = String, Path, description = "Propriedade id")),
    request_body = UpdatePropriedadeCommand,
    responses(
        (status = 200, description = "Updated propriedade", body = PropriedadeDto),
        (status = 404, description = "Not found", body = ErrorResponse),
        (status = 422, description = "Area rules violated", body = ErrorResponse)
    )
)]
pub async fn update_propriedade(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdatePropriedadeCommand>, JsonRejection>,
) -> ApiResult<Json<PropriedadeDto>> {
    let Json(cmd) = payload?;
    Ok(Json(state.services.propriedades.update(&id, cmd).await?))
}

/// Remove a property with its seasons and plantings
#[utoipa::path(
    delete,
    path = "/api/v1/propriedades/{id}",
    tag = "propriedades",
    params(("id" = String, Path, description = "Propriedade id")),
    responses(
        (status = 200, description = "Rows removed", body = CascadeReportDto),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn delete_propriedade(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<CascadeReportDto>> {
    Ok(Json(state.services.propriedades.remove(&id).await?))
}
