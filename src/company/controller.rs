use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{error, info};

use super::model::{
    CompanyErrorResponse, CompanyFormOptions, CompanyRegistration, CompanyRegistrationError,
    CompanyRegistrationRequest, CompanyRegistrationResponse, CompanyTextField, LocationField,
    COMMUNICATION_METHODS, EVENT_SIZE_OPTIONS, EVENT_TYPE_OPTIONS,
};
use super::service::CompanyService;

// Controller for company registration submissions
#[utoipa::path(
    post,
    path = "/api/companies/register",
    request_body(content = CompanyRegistrationRequest, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Company registered successfully", body = CompanyRegistrationResponse),
        (status = 400, description = "Missing or malformed form fields", body = CompanyErrorResponse),
        (status = 500, description = "Registration could not be saved", body = CompanyErrorResponse)
    ),
    tag = "companies"
)]
pub async fn register(
    State(service): State<Arc<CompanyService>>,
    mut multipart: Multipart,
) -> Response {
    let form = match read_form(&mut multipart).await {
        Ok(form) => form,
        Err(response) => return response,
    };

    info!("Company registration submitted for {}", form.company_name);

    match service.register(form).await {
        Ok(_) => (
            StatusCode::CREATED,
            Json(CompanyRegistrationResponse {
                message: "Company Registration Submitted Successfully!".to_string(),
            }),
        )
            .into_response(),
        Err(err) => handle_error(err),
    }
}

/// Choice lists for rendering the company form
#[utoipa::path(
    get,
    path = "/api/companies/options",
    responses(
        (status = 200, description = "Fixed choice lists of the company form", body = CompanyFormOptions)
    ),
    tag = "companies"
)]
pub async fn options() -> impl IntoResponse {
    Json(CompanyFormOptions {
        event_types: EVENT_TYPE_OPTIONS.iter().map(|e| e.to_string()).collect(),
        event_sizes: EVENT_SIZE_OPTIONS.iter().map(|s| s.to_string()).collect(),
        communication_methods: COMMUNICATION_METHODS.iter().map(|m| m.to_string()).collect(),
    })
}

/// Fold the multipart body, field by field, into a registration snapshot.
/// Repeated `eventTypes` parts toggle the selection; unknown part names are
/// dropped.
async fn read_form(multipart: &mut Multipart) -> Result<CompanyRegistration, Response> {
    let mut form = CompanyRegistration::default();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return Err(malformed(e)),
        };

        let name = field.name().unwrap_or_default().to_string();
        let value = match field.text().await {
            Ok(value) => value,
            Err(e) => return Err(malformed(e)),
        };

        if name == "eventTypes" {
            form = form.toggle_event_type(&value);
        } else if let Some(text_field) = CompanyTextField::from_name(&name) {
            form = form.with_text(text_field, value);
        } else if let Some(location_field) = LocationField::from_name(&name) {
            form = form.with_location(location_field, value);
        }
    }

    Ok(form)
}

fn malformed(err: impl std::fmt::Display) -> Response {
    info!("Rejected malformed company form submission: {}", err);
    (
        StatusCode::BAD_REQUEST,
        Json(CompanyErrorResponse {
            error: "The submitted form could not be read. Please try again.".to_string(),
            code: "MALFORMED_FORM".to_string(),
        }),
    )
        .into_response()
}

// Convert CompanyRegistrationError to Response
fn handle_error(err: CompanyRegistrationError) -> Response {
    let status = match &err {
        CompanyRegistrationError::MissingField(_) => StatusCode::BAD_REQUEST,
        CompanyRegistrationError::InsertFailed(_) | CompanyRegistrationError::InternalError(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    if status.is_server_error() {
        error!("Company registration failed: {}", err);
    } else {
        info!("Company registration rejected: {}", err);
    }

    (status, Json(CompanyErrorResponse::from(&err))).into_response()
}
