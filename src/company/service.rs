use std::sync::Arc;

use tracing::{error, info};

use crate::backend::client::BackendClient;
use crate::company::model::{CompanyRecord, CompanyRegistration, CompanyRegistrationError};

// Backend table for company registrations
pub const COMPANY_TABLE: &str = "companies";

pub struct CompanyService {
    backend: Arc<dyn BackendClient>,
}

impl CompanyService {
    pub fn new(backend: Arc<dyn BackendClient>) -> Self {
        Self { backend }
    }

    /// Submit a company registration: map the snapshot onto the `companies`
    /// columns and insert the row as a one-element batch.
    pub async fn register(
        &self,
        form: CompanyRegistration,
    ) -> Result<CompanyRecord, CompanyRegistrationError> {
        ensure_required(&form)?;

        let record = form.to_record();
        let row = serde_json::to_value(&record).map_err(|e| {
            CompanyRegistrationError::InternalError(format!("Failed to encode record: {}", e))
        })?;

        self.backend
            .insert(COMPANY_TABLE, vec![row])
            .await
            .map_err(|e| {
                error!("Error inserting company registration: {}", e);
                CompanyRegistrationError::InsertFailed(e)
            })?;

        info!("Company registration stored for {}", record.company_name);
        Ok(record)
    }
}

/// Presence check for the fields the form marks as required
fn ensure_required(form: &CompanyRegistration) -> Result<(), CompanyRegistrationError> {
    let required = [
        (form.company_name.as_str(), "companyName"),
        (form.industry.as_str(), "industry"),
        (form.contact_name.as_str(), "contactName"),
        (form.email.as_str(), "email"),
        (form.phone.as_str(), "phone"),
        (form.location.city.as_str(), "city"),
        (form.location.country.as_str(), "country"),
        (form.event_size.as_str(), "eventSize"),
    ];

    for (value, name) in required {
        if value.trim().is_empty() {
            return Err(CompanyRegistrationError::MissingField(name));
        }
    }

    Ok(())
}
