//! API route definitions

use axum::{
    middleware,
    routing::get,
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    handlers::{auditoria, cultivos, culturas, dashboard, produtores, propriedades, safras},
    middleware::timing_middleware,
    state::AppState,
};

/// API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Produtores
        .route(
            "/api/v1/produtores",
            get(produtores::list_produtores).post(produtores::create_produtor),
        )
        .route(
            "/api/v1/produtores/:id",
            get(produtores::get_produtor)
                .patch(produtores::update_produtor)
                .delete(produtores::delete_produtor),
        )
        // Propriedades
        .route(
            "/api/v1/propriedades",
            get(propriedades::list_propriedades).post(propriedades::create_propriedade),
        )
        .route(
            "/api/v1/propriedades/:id",
            get(propriedades::get_propriedade)
                .patch(propriedades::update_propriedade)
                .delete(propriedades::delete_propriedade),
        )
        // Culturas
        .route(
            "/api/v1/culturas",
            get(culturas::list_culturas).post(culturas::create_cultura),
        )
        .route(
            "/api/v1/culturas/:id",
            get(culturas::get_cultura)
                .patch(culturas::update_cultura)
                .delete(culturas::delete_cultura),
        )
        // Safras
        .route(
            "/api/v1/safras",
            get(safras::list_safras).post(safras::create_safra),
        )
        .route(
            "/api/v1/safras/:id",
            get(safras::get_safra)
                .patch(safras::update_safra)
                .delete(safras::delete_safra),
        )
        // Cultivos
        .route(
            "/api/v1/cultivos",
            get(cultivos::list_cultivos).post(cultivos::create_cultivo),
        )
        .route(
            "/api/v1/cultivos/:id",
            get(cultivos::get_cultivo)
                .patch(cultivos::update_cultivo)
                .delete(cultivos::delete_cultivo),
        )
        // Read models
        .route("/api/v1/dashboard", get(dashboard::get_dashboard))
        .route("/api/v1/auditoria", get(auditoria::list_auditoria))
}

/// Swagger UI routes
pub fn swagger_routes() -> Router<AppState> {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

/// Combined routes with tracing, timing and CORS applied
pub fn all_routes(state: AppState) -> Router {
    api_routes()
        .merge(swagger_routes())
        .layer(middleware::from_fn_with_state(state.clone(), timing_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[derive(OpenApi)]
#[openapi(
    paths(
        produtores::create_produtor,
        produtores::list_produtores,
        produtores::get_produtor,
        produtores::update_produtor,
        produtores::delete_produtor,
        propriedades::create_propriedade,
        propriedades::list_propriedades,
        propriedades::get_propriedade,
        propriedades::update_propriedade,
        propriedades::delete_propriedade,
        culturas::create_cultura,
        culturas::list_culturas,
        culturas::get_cultura,
        culturas::update_cultura,
        culturas::delete_cultura,
        safras::create_safra,
        safras::list_safras,
        safras::get_safra,
        safras::update_safra,
        safras::delete_safra,
        cultivos::create_cultivo,
        cultivos::list_cultivos,
        cultivos::get_cultivo,
        cultivos::update_cultivo,
        cultivos::delete_cultivo,
        dashboard::get_dashboard,
        auditoria::list_auditoria,
    ),
    components(schemas(
        agrorural_application::CreateProdutorCommand,
        agrorural_application::UpdateProdutorCommand,
        agrorural_application::ProdutorDto,
        agrorural_application::ProdutorListDto,
        agrorural_application::CreatePropriedadeCommand,
        agrorural_application::UpdatePropriedadeCommand,
        agrorural_application::PropriedadeDto,
        agrorural_application::PropriedadeListDto,
        agrorural_application::CreateCulturaCommand,
        agrorural_application::UpdateCulturaCommand,
        agrorural_application::CulturaDto,
        agrorural_application::CulturaListDto,
        agrorural_application::CreateSafraCommand,
        agrorural_application::UpdateSafraCommand,
        agrorural_application::SafraDto,
        agrorural_application::SafraListDto,
        agrorural_application::CreateCultivoCommand,
        agrorural_application::UpdateCultivoCommand,
        agrorural_application::CultivoDto,
        agrorural_application::CultivoListDto,
        agrorural_application::CascadeReportDto,
        agrorural_application::DashboardDto,
        agrorural_application::EstadoStatDto,
        agrorural_application::CulturaStatDto,
        agrorural_application::UsoDoSoloDto,
        agrorural_application::AuditEntryDto,
        agrorural_application::AuditListDto,
        crate::error::ErrorResponse,
        crate::error::ErrorBody,
    )),
    tags(
        (name = "produtores", description = "Rural producers identified by CPF or CNPJ"),
        (name = "propriedades", description = "Farms and their areas"),
        (name = "culturas", description = "Crop types"),
        (name = "safras", description = "Seasons per property and year"),
        (name = "cultivos", description = "Plantings of a crop in a season"),
        (name = "dashboard", description = "Aggregate statistics"),
        (name = "auditoria", description = "Audit trail of mutations")
    ),
    info(
        title = "AgroRural API",
        version = "1.0.0",
        description = "RESTful API for rural producers, properties, crops and seasons"
    )
)]
pub struct ApiDoc;
