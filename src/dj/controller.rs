use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{error, info};

use super::model::{
    DjErrorResponse, DjFormOptions, DjRegistration, DjRegistrationError, DjRegistrationRequest,
    DjRegistrationResponse, DjTextField, LocationField, ProfilePicture, GENRE_OPTIONS,
    TRAVEL_PREFERENCES,
};
use super::service::DjService;

// Controller for DJ registration submissions
#[utoipa::path(
    post,
    path = "/api/djs/register",
    request_body(content = DjRegistrationRequest, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "DJ registered successfully", body = DjRegistrationResponse),
        (status = 400, description = "Missing or malformed form fields", body = DjErrorResponse),
        (status = 502, description = "Profile picture upload failed", body = DjErrorResponse),
        (status = 500, description = "Registration could not be saved", body = DjErrorResponse)
    ),
    tag = "djs"
)]
pub async fn register(
    State(service): State<Arc<DjService>>,
    mut multipart: Multipart,
) -> Response {
    let form = match read_form(&mut multipart).await {
        Ok(form) => form,
        Err(response) => return response,
    };

    info!("DJ registration submitted for {}", form.full_name);

    match service.register(form).await {
        Ok(_) => (
            StatusCode::CREATED,
            Json(DjRegistrationResponse {
                message: "DJ Registration Submitted Successfully!".to_string(),
            }),
        )
            .into_response(),
        Err(err) => handle_error(err),
    }
}

/// Choice lists for rendering the DJ form
#[utoipa::path(
    get,
    path = "/api/djs/options",
    responses(
        (status = 200, description = "Fixed choice lists of the DJ form", body = DjFormOptions)
    ),
    tag = "djs"
)]
pub async fn options() -> impl IntoResponse {
    Json(DjFormOptions {
        genres: GENRE_OPTIONS.iter().map(|g| g.to_string()).collect(),
        travel_preferences: TRAVEL_PREFERENCES.iter().map(|p| p.to_string()).collect(),
    })
}

/// Fold the multipart body, field by field, into a registration snapshot.
///
/// Each part is routed to the matching typed update: repeated `genres`
/// parts toggle the selection, `profilePicture` attaches the file, unknown
/// part names are dropped.
async fn read_form(multipart: &mut Multipart) -> Result<DjRegistration, Response> {
    let mut form = DjRegistration::default();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return Err(malformed(e)),
        };

        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "profilePicture" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let content = match field.bytes().await {
                    Ok(bytes) => bytes.to_vec(),
                    Err(e) => return Err(malformed(e)),
                };

                // Browsers send an empty part when no file was picked
                let picture = if file_name.is_empty() && content.is_empty() {
                    None
                } else {
                    Some(ProfilePicture {
                        file_name,
                        content_type,
                        content,
                    })
                };
                form = form.with_profile_picture(picture);
            }
            "genres" => {
                let value = match field.text().await {
                    Ok(value) => value,
                    Err(e) => return Err(malformed(e)),
                };
                form = form.toggle_genre(&value);
            }
            other => {
                let value = match field.text().await {
                    Ok(value) => value,
                    Err(e) => return Err(malformed(e)),
                };
                if let Some(text_field) = DjTextField::from_name(other) {
                    form = form.with_text(text_field, value);
                } else if let Some(location_field) = LocationField::from_name(other) {
                    form = form.with_location(location_field, value);
                }
            }
        }
    }

    Ok(form)
}

fn malformed(err: impl std::fmt::Display) -> Response {
    info!("Rejected malformed DJ form submission: {}", err);
    (
        StatusCode::BAD_REQUEST,
        Json(DjErrorResponse {
            error: "The submitted form could not be read. Please try again.".to_string(),
            code: "MALFORMED_FORM".to_string(),
        }),
    )
        .into_response()
}

// Convert DjRegistrationError to Response
fn handle_error(err: DjRegistrationError) -> Response {
    let status = match &err {
        DjRegistrationError::MissingField(_) | DjRegistrationError::InvalidExperienceYears => {
            StatusCode::BAD_REQUEST
        }
        DjRegistrationError::UploadFailed(_) => StatusCode::BAD_GATEWAY,
        DjRegistrationError::InsertFailed(_) | DjRegistrationError::InternalError(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    if status.is_server_error() {
        error!("DJ registration failed: {}", err);
    } else {
        info!("DJ registration rejected: {}", err);
    }

    (status, Json(DjErrorResponse::from(&err))).into_response()
}
