use utoipa::OpenApi;

/// API documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "DJ Marketplace API",
        version = "0.1.0",
        description = "Registration API for the DJ and event-company marketplace"
    ),
    paths(
        // Health check endpoints
        crate::routes::health::health_check,
        // DJ registration endpoints
        crate::dj::controller::register,
        crate::dj::controller::options,
        // Company registration endpoints
        crate::company::controller::register,
        crate::company::controller::options
    ),
    components(
        schemas(
            // Health schemas
            crate::routes::health::HealthResponse,
            // DJ schemas
            crate::dj::model::DjRegistrationRequest,
            crate::dj::model::DjRegistrationResponse,
            crate::dj::model::DjFormOptions,
            crate::dj::model::DjErrorResponse,
            // Company schemas
            crate::company::model::CompanyRegistrationRequest,
            crate::company::model::CompanyRegistrationResponse,
            crate::company::model::CompanyFormOptions,
            crate::company::model::CompanyErrorResponse
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "djs", description = "DJ registration endpoints"),
        (name = "companies", description = "Company registration endpoints")
    )
)]
pub struct ApiDoc;
