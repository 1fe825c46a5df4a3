//! Produtor API handlers

use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    Json,
};

use agrorural_application::{
    CascadeReportDto, CreateProdutorCommand, ProdutorDto, ProdutorListDto, UpdateProdutorCommand,
};

use crate::{
    error::{ApiResult, ErrorResponse},
    models::PageParams,
    state::AppState,
};

/// Register a producer, optionally linking existing properties
#[utoipa::path(
    post,
    path = "/api/v1/produtores",
    tag = "produtores",
    request_body = CreateProdutorCommand,
    responses(
        (status = 201, description = "Produtor created", body = ProdutorDto),
        (status = 400, description = "Invalid CPF/CNPJ or payload", body = ErrorResponse),
        (status = 404, description = "Linked propriedade not found", body = ErrorResponse),
        (status = 409, description = "Documento already registered", body = ErrorResponse)
    )
)]
pub async fn create_produtor(
    State(state): State<AppState>,
    payload: Result<Json<CreateProdutorCommand>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ProdutorDto>)> {
    let Json(cmd) = payload?;
    let dto = state.services.produtores.create(cmd).await?;
    Ok((StatusCode::CREATED, Json(dto)))
}

/// List producers ordered by name
#[utoipa::path(
    get,
    path = "/api/v1/produtores",
    tag = "produtores",
    params(PageParams),
    responses(
        (status = 200, description = "Page of producers", body = ProdutorListDto)
    )
)]
pub async fn list_produtores(
    State(state): State<AppState>,
    params: Result<Query<PageParams>, QueryRejection>,
) -> ApiResult<Json<ProdutorListDto>> {
    let Query(params) = params?;
    Ok(Json(state.services.produtores.find_all(params.page()).await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/produtores/{id}",
    tag = "produtores",
    params(("id" = String, Path, description = "Produtor id")),
    responses(
        (status = 200, description = "Produtor", body = ProdutorDto),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn get_produtor(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ProdutorDto>> {
    Ok(Json(state.services.produtores.find_one(&id).await?))
}

/// Partial update; `propriedade_ids`, when present, replaces the links
#[utoipa::path(
    patch,
    path = "/api/v1/produtores/{id}",
    tag = "produtores",
    params(("id" = String, Path, description = "Produtor id")),
    request_body = UpdateProdutorCommand,
    responses(
        (status = 200, description = "Updated produtor", body = ProdutorDto),
        (status = 404, description = "Not found", body = ErrorResponse),
        (status = 409, description = "Documento already registered", body = ErrorResponse),
        (status = 422, description = "Would leave a propriedade without owner", body = ErrorResponse)
    )
)]
pub async fn update_produtor(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateProdutorCommand>, JsonRejection>,
) -> ApiResult<Json<ProdutorDto>> {
    let Json(cmd) = payload?;
    Ok(Json(state.services.produtores.update(&id, cmd).await?))
}

/// Remove a producer together with the properties only they owned
#[utoipa::path(
    delete,
    path = "/api/v1/produtores/{id}",
    tag = "produtores",
    params(("id" = String, Path, description = "Produtor id")),
    responses(
        (status = 200, description = "Rows removed", body = CascadeReportDto),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn delete_produtor(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<CascadeReportDto>> {
    Ok(Json(state.services.produtores.remove(&id).await?))
}
