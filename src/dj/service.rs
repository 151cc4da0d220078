use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info};

use crate::backend::client::BackendClient;
use crate::dj::model::{DjRecord, DjRegistration, DjRegistrationError};

// Backend locations for DJ registrations
pub const DJ_TABLE: &str = "djs";
pub const PROFILE_PICTURE_BUCKET: &str = "dj-profile-pictures";

pub struct DjService {
    backend: Arc<dyn BackendClient>,
}

impl DjService {
    pub fn new(backend: Arc<dyn BackendClient>) -> Self {
        Self { backend }
    }

    /// Submit a DJ registration.
    ///
    /// Runs as a two-stage pipeline: upload the profile picture (skipped
    /// when none is attached), then map the snapshot onto the `djs` columns
    /// and insert the row. A failed upload aborts the submission; a failed
    /// insert after a successful upload leaves the uploaded object behind.
    pub async fn register(&self, form: DjRegistration) -> Result<DjRecord, DjRegistrationError> {
        ensure_required(&form)?;
        let experience_years = form.parse_experience_years()?;

        let profile_picture_url = self.upload_profile_picture(&form).await?;

        let record = form.to_record(experience_years, profile_picture_url);
        self.persist(record).await
    }

    /// Upload stage. Resolves to the public URL of the stored object, or
    /// `None` when the form carries no picture.
    async fn upload_profile_picture(
        &self,
        form: &DjRegistration,
    ) -> Result<Option<String>, DjRegistrationError> {
        let picture = match &form.profile_picture {
            Some(picture) => picture,
            None => return Ok(None),
        };

        let key = format!("{}-{}", form.full_name, Utc::now().timestamp_millis());
        info!("Uploading profile picture for {} as {}", form.full_name, key);

        let stored = self
            .backend
            .upload(
                PROFILE_PICTURE_BUCKET,
                &key,
                picture.content.clone(),
                &picture.content_type,
            )
            .await
            .map_err(|e| {
                error!("Error uploading profile picture: {}", e);
                DjRegistrationError::UploadFailed(e)
            })?;

        Ok(Some(
            self.backend
                .public_object_url(PROFILE_PICTURE_BUCKET, &stored.path),
        ))
    }

    /// Persist stage. One record, wrapped in a one-element batch.
    async fn persist(&self, record: DjRecord) -> Result<DjRecord, DjRegistrationError> {
        let row = serde_json::to_value(&record).map_err(|e| {
            DjRegistrationError::InternalError(format!("Failed to encode record: {}", e))
        })?;

        self.backend
            .insert(DJ_TABLE, vec![row])
            .await
            .map_err(|e| {
                error!("Error inserting DJ registration: {}", e);
                DjRegistrationError::InsertFailed(e)
            })?;

        info!("DJ registration stored for {}", record.full_name);
        Ok(record)
    }
}

/// Presence check for the fields the form marks as required
fn ensure_required(form: &DjRegistration) -> Result<(), DjRegistrationError> {
    let required = [
        (form.full_name.as_str(), "fullName"),
        (form.email.as_str(), "email"),
        (form.phone_number.as_str(), "phoneNumber"),
        (form.location.country.as_str(), "country"),
        (form.location.state.as_str(), "state"),
        (form.location.city.as_str(), "city"),
        (form.experience_years.as_str(), "experienceYears"),
    ];

    for (value, name) in required {
        if value.trim().is_empty() {
            return Err(DjRegistrationError::MissingField(name));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::client::{BackendError, MockBackendClient, StoredObject};
    use crate::dj::model::{DjErrorResponse, DjTextField, LocationField, ProfilePicture};

    fn filled_form() -> DjRegistration {
        DjRegistration::default()
            .with_text(DjTextField::FullName, "Ada Lovelace")
            .with_text(DjTextField::Email, "ada@example.com")
            .with_text(DjTextField::PhoneNumber, "+44 20 7946 0000")
            .with_location(LocationField::Country, "United Kingdom")
            .with_location(LocationField::State, "England")
            .with_location(LocationField::City, "London")
            .with_text(DjTextField::ExperienceYears, "5")
            .toggle_genre("House")
            .toggle_genre("Techno")
    }

    fn picture() -> ProfilePicture {
        ProfilePicture {
            file_name: "ada.png".to_string(),
            content_type: "image/png".to_string(),
            content: vec![0x89, 0x50, 0x4e, 0x47],
        }
    }

    #[tokio::test]
    async fn test_submission_without_file_never_uploads() {
        let mut backend = MockBackendClient::new();
        // No upload expectation: any upload call fails the test
        backend
            .expect_insert()
            .withf(|table, records| {
                table == DJ_TABLE
                    && records.len() == 1
                    && records[0]["profile_picture_url"].is_null()
                    && records[0]["experience_years"] == 5
                    && records[0]["primary_genres"] == serde_json::json!(["House", "Techno"])
            })
            .times(1)
            .returning(|_, _| Ok(vec![]));

        let service = DjService::new(Arc::new(backend));
        let record = service
            .register(filled_form())
            .await
            .expect("registration failed");

        assert_eq!(record.profile_picture_url, None);
        assert_eq!(record.experience_years, 5);
    }

    #[tokio::test]
    async fn test_submission_with_file_uploads_then_inserts_once() {
        let mut backend = MockBackendClient::new();
        backend
            .expect_upload()
            .withf(|bucket, key, content, content_type| {
                bucket == PROFILE_PICTURE_BUCKET
                    && key.starts_with("Ada Lovelace-")
                    && !content.is_empty()
                    && content_type == "image/png"
            })
            .times(1)
            .returning(|_, _, _, _| {
                Ok(StoredObject {
                    path: "Ada Lovelace-1700000000000".to_string(),
                })
            });
        backend.expect_public_object_url().returning(|bucket, path| {
            format!(
                "https://project.supabase.co/storage/v1/object/public/{}/{}",
                bucket, path
            )
        });
        backend
            .expect_insert()
            .withf(|table, records| {
                table == DJ_TABLE
                    && records[0]["profile_picture_url"]
                        == "https://project.supabase.co/storage/v1/object/public/dj-profile-pictures/Ada Lovelace-1700000000000"
            })
            .times(1)
            .returning(|_, _| Ok(vec![]));

        let service = DjService::new(Arc::new(backend));
        let form = filled_form().with_profile_picture(Some(picture()));
        let record = service.register(form).await.expect("registration failed");

        assert!(record
            .profile_picture_url
            .expect("url missing")
            .ends_with("/dj-profile-pictures/Ada Lovelace-1700000000000"));
    }

    #[tokio::test]
    async fn test_upload_failure_aborts_before_insert() {
        let mut backend = MockBackendClient::new();
        backend.expect_upload().times(1).returning(|_, _, _, _| {
            Err(BackendError::Rejected {
                status: 507,
                body: "storage quota exceeded".to_string(),
            })
        });
        // No insert expectation: the pipeline must stop at the upload stage

        let service = DjService::new(Arc::new(backend));
        let form = filled_form().with_profile_picture(Some(picture()));
        let err = service.register(form).await.expect_err("upload should fail");

        match &err {
            DjRegistrationError::UploadFailed(_) => {}
            other => panic!("Expected UploadFailed, got {:?}", other),
        }

        let response = DjErrorResponse::from(&err);
        assert_eq!(
            response.error,
            "Failed to upload profile picture. Please try again."
        );
        assert_eq!(response.code, "UPLOAD_FAILED");
    }

    #[tokio::test]
    async fn test_insert_failure_is_reported() {
        let mut backend = MockBackendClient::new();
        backend.expect_insert().times(1).returning(|_, _| {
            Err(BackendError::Rejected {
                status: 409,
                body: "duplicate key value".to_string(),
            })
        });

        let service = DjService::new(Arc::new(backend));
        let err = service
            .register(filled_form())
            .await
            .expect_err("insert should fail");

        match &err {
            DjRegistrationError::InsertFailed(_) => {}
            other => panic!("Expected InsertFailed, got {:?}", other),
        }

        let response = DjErrorResponse::from(&err);
        assert_eq!(
            response.error,
            "There was an error submitting your registration. Please try again."
        );
    }

    #[tokio::test]
    async fn test_missing_required_field_skips_backend_entirely() {
        // No expectations at all: any backend call fails the test
        let backend = MockBackendClient::new();
        let service = DjService::new(Arc::new(backend));

        let err = service
            .register(DjRegistration::default())
            .await
            .expect_err("empty form must be rejected");

        match err {
            DjRegistrationError::MissingField(field) => assert_eq!(field, "fullName"),
            other => panic!("Expected MissingField, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_non_numeric_experience_rejected_before_upload() {
        let backend = MockBackendClient::new();
        let service = DjService::new(Arc::new(backend));

        let form = filled_form()
            .with_text(DjTextField::ExperienceYears, "five")
            .with_profile_picture(Some(picture()));
        let err = service.register(form).await.expect_err("must be rejected");

        match err {
            DjRegistrationError::InvalidExperienceYears => {}
            other => panic!("Expected InvalidExperienceYears, got {:?}", other),
        }
    }
}
