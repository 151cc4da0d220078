mod api_doc;
mod backend;
mod company;
mod dj;
mod routes;

use axum::{routing::get, Router};
use dotenv::dotenv;
use std::{net::SocketAddr, sync::Arc};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api_doc::ApiDoc;
use crate::backend::client::BackendClient;
use crate::backend::supabase::SupabaseClient;
use crate::company::service::CompanyService;
use crate::dj::service::DjService;

// Simple app config struct
#[derive(Debug, Clone)]
struct AppConfig {
    supabase_url: String,
    supabase_api_key: String,
    port: u16,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger
    tracing_subscriber::fmt::init();

    // Load .env file if it exists
    dotenv().ok();

    let config = AppConfig {
        supabase_url: std::env::var("SUPABASE_URL").expect("SUPABASE_URL must be set"),
        supabase_api_key: std::env::var("SUPABASE_API_KEY")
            .expect("SUPABASE_API_KEY must be set"),
        port: std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(9500),
    };

    // The backend client is constructed once and injected into both
    // registration services
    let backend: Arc<dyn BackendClient> = Arc::new(SupabaseClient::new(
        config.supabase_url,
        config.supabase_api_key,
    ));

    let dj_service = Arc::new(DjService::new(backend.clone()));
    let company_service = Arc::new(CompanyService::new(backend));

    // Build the router
    let app = Router::new()
        // API documentation
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Health routes
        .merge(routes::health::routes())
        // DJ registration routes
        .merge(routes::djs::routes(dj_service))
        // Company registration routes
        .merge(routes::companies::routes(company_service))
        // Add welcome route
        .route(
            "/",
            get(|| async {
                "Welcome to the DJ Marketplace API. Register as a DJ at /api/djs/register or as a company at /api/companies/register"
            }),
        )
        // The forms are posted from browser frontends
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    // Try different ports
    let mut port = config.port;
    let max_tries = 5;
    for attempt in 1..=max_tries {
        let addr = SocketAddr::from(([127, 0, 0, 1], port));
        match axum::Server::try_bind(&addr) {
            Ok(server) => {
                println!(
                    "🚀 Server started successfully at http://localhost:{}",
                    port
                );
                println!("📄 API Documentation: http://localhost:{}/docs", port);
                println!(
                    "🎧 DJ Registration API: http://localhost:{}/api/djs/register",
                    port
                );
                println!(
                    "🏢 Company Registration API: http://localhost:{}/api/companies/register",
                    port
                );
                return server
                    .serve(app.into_make_service())
                    .await
                    .map_err(|e| e.into());
            }
            Err(_) => {
                if attempt == max_tries {
                    return Err("Failed to bind to any port".into());
                }
                port += 1;
            }
        }
    }

    Err("Failed to bind to any port".into())
}
