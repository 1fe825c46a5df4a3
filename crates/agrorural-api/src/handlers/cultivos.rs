//! Cultivo API handlers

use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    Json,
};

use agrorural_application::{CreateCultivoCommand, CultivoDto, CultivoListDto, UpdateCultivoCommand};

use crate::{
    error::{ApiResult, ErrorResponse},
    models::CultivoListParams,
    state::AppState,
};

/// Plant a crop in a season of a property
#[utoipa::path(
    post,
    path = "/api/v1/cultivos",
    tag = "cultivos",
    request_body = CreateCultivoCommand,
    responses(
        (status = 201, description = "Cultivo created", body = CultivoDto),
        (status = 400, description = "Non-positive area or malformed id", body = ErrorResponse),
        (status = 404, description = "Propriedade, cultura or safra not found", body = ErrorResponse),
        (status = 422, description = "Season planted area would exceed area_agricultavel", body = ErrorResponse)
    )
)]
pub async fn create_cultivo(
    State(state): State<AppState>,
    payload: Result<Json<CreateCultivoCommand>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<CultivoDto>)> {
    let Json(cmd) = payload?;
    let dto = state.services.cultivos.create(cmd).await?;
    Ok((StatusCode::CREATED, Json(dto)))
}

#[utoipa::path(
    get,
    path = "/api/v1/cultivos",
    tag = "cultivos",
    params(CultivoListParams),
    responses(
        (status = 200, description = "Page of plantings", body = CultivoListDto),
        (status = 400, description = "Malformed filter id", body = ErrorResponse)
    )
)]
pub async fn list_cultivos(
    State(state): State<AppState>,
    params: Result<Query<CultivoListParams>, QueryRejection>,
) -> ApiResult<Json<CultivoListDto>> {
    let Query(params) = params?;
    let list = state
        .services
        .cultivos
        .find_all(params.query(), params.page())
        .await?;
    Ok(Json(list))
}

#[utoipa::path(
    get,
    path = "/api/v1/cultivos/{id}",
    tag = "cultivos",
    params(("id" = String, Path, description = "Cultivo id")),
    responses(
        (status = 200, description = "Cultivo", body = CultivoDto),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn get_cultivo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<CultivoDto>> {
    Ok(Json(state.services.cultivos.find_one(&id).await?))
}

#[utoipa::path(
    patch,
    path = "/api/v1/cultivos/{id}",
    tag = "cultivos",
    params(("id" = String, Path, description = "Cultivo id")),
    request_body = UpdateCultivoCommand,
    responses(
        (status = 200, description = "Updated cultivo", body = CultivoDto),
        (status = 404, description = "Not found", body = ErrorResponse),
        (status = 422, description = "Season planted area would exceed area_agricultavel", body = ErrorResponse)
    )
)]
pub async fn update_cultivo(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateCultivoCommand>, JsonRejection>,
) -> ApiResult<Json<CultivoDto>> {
    let Json(cmd) = payload?;
    Ok(Json(state.services.cultivos.update(&id, cmd).await?))
}

#[utoipa::path(
    delete,
    path = "/api/v1/cultivos/{id}",
    tag = "cultivos",
    params(("id" = String, Path, description = "Cultivo id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn delete_cultivo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.services.cultivos.remove(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
