use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::backend::client::BackendError;

// Choice lists offered by the company registration form
pub const EVENT_TYPE_OPTIONS: [&str; 6] = [
    "Weddings",
    "Corporate Events",
    "Nightclub Events",
    "Birthday Parties",
    "Festivals",
    "Other",
];

pub const EVENT_SIZE_OPTIONS: [&str; 3] = [
    "Small (0-100 guests)",
    "Medium (100-500 guests)",
    "Large (500+ guests)",
];

pub const COMMUNICATION_METHODS: [&str; 4] = ["Email", "Phone Call", "WhatsApp", "Other"];

/// Nested location block of the company form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    pub city: String,
    pub country: String,
}

/// Snapshot of the company registration form.
///
/// Starts all-empty and is only modified through the typed update
/// operations below, each of which returns a new snapshot and leaves the
/// previous one untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanyRegistration {
    pub company_name: String,
    pub industry: String,
    pub contact_name: String,
    pub email: String,
    pub phone: String,
    pub location: Location,
    pub description: String,
    pub services: String,
    pub event_types: Vec<String>,
    pub event_size: String,
    pub budget_range: String,
    pub communication_method: String,
    pub website: String,
    pub social_media: String,
    pub special_requirements: String,
}

/// Scalar text fields of the company form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompanyTextField {
    CompanyName,
    Industry,
    ContactName,
    Email,
    Phone,
    Description,
    Services,
    EventSize,
    BudgetRange,
    CommunicationMethod,
    Website,
    SocialMedia,
    SpecialRequirements,
}

impl CompanyTextField {
    /// Resolve a submitted form-field name. Unknown names get `None` and are
    /// dropped by the caller instead of being absorbed into the snapshot.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "companyName" => Some(Self::CompanyName),
            "industry" => Some(Self::Industry),
            "contactName" => Some(Self::ContactName),
            "email" => Some(Self::Email),
            "phone" => Some(Self::Phone),
            "description" => Some(Self::Description),
            "services" => Some(Self::Services),
            "eventSize" => Some(Self::EventSize),
            "budgetRange" => Some(Self::BudgetRange),
            "communicationMethod" => Some(Self::CommunicationMethod),
            "website" => Some(Self::Website),
            "socialMedia" => Some(Self::SocialMedia),
            "specialRequirements" => Some(Self::SpecialRequirements),
            _ => None,
        }
    }
}

/// Keys of the nested location block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationField {
    City,
    Country,
}

impl LocationField {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "city" => Some(Self::City),
            "country" => Some(Self::Country),
            _ => None,
        }
    }
}

impl CompanyRegistration {
    /// Replace one scalar field, leaving every other field untouched
    pub fn with_text(&self, field: CompanyTextField, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        let slot = match field {
            CompanyTextField::CompanyName => &mut next.company_name,
            CompanyTextField::Industry => &mut next.industry,
            CompanyTextField::ContactName => &mut next.contact_name,
            CompanyTextField::Email => &mut next.email,
            CompanyTextField::Phone => &mut next.phone,
            CompanyTextField::Description => &mut next.description,
            CompanyTextField::Services => &mut next.services,
            CompanyTextField::EventSize => &mut next.event_size,
            CompanyTextField::BudgetRange => &mut next.budget_range,
            CompanyTextField::CommunicationMethod => &mut next.communication_method,
            CompanyTextField::Website => &mut next.website,
            CompanyTextField::SocialMedia => &mut next.social_media,
            CompanyTextField::SpecialRequirements => &mut next.special_requirements,
        };
        *slot = value.into();
        next
    }

    /// Replace one key inside the location block; the sibling key and all
    /// top-level fields are preserved
    pub fn with_location(&self, field: LocationField, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        let slot = match field {
            LocationField::City => &mut next.location.city,
            LocationField::Country => &mut next.location.country,
        };
        *slot = value.into();
        next
    }

    /// Toggle an event type in or out of the selection. The selection never
    /// holds duplicates; removing an entry does not reorder the survivors.
    pub fn toggle_event_type(&self, event_type: &str) -> Self {
        let mut next = self.clone();
        match next.event_types.iter().position(|e| e == event_type) {
            Some(index) => {
                next.event_types.remove(index);
            }
            None => next.event_types.push(event_type.to_string()),
        }
        next
    }

    /// Map the snapshot onto the column names of the `companies` table
    pub fn to_record(&self) -> CompanyRecord {
        CompanyRecord {
            company_name: self.company_name.clone(),
            industry: self.industry.clone(),
            contact_name: self.contact_name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            city: self.location.city.clone(),
            country: self.location.country.clone(),
            description: self.description.clone(),
            services: self.services.clone(),
            event_types: self.event_types.clone(),
            event_size: self.event_size.clone(),
            budget_range: self.budget_range.clone(),
            communication_method: self.communication_method.clone(),
            website: self.website.clone(),
            social_media: self.social_media.clone(),
            special_requirements: self.special_requirements.clone(),
        }
    }
}

/// Row persisted into the `companies` table
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CompanyRecord {
    pub company_name: String,
    pub industry: String,
    pub contact_name: String,
    pub email: String,
    pub phone: String,
    pub city: String,
    pub country: String,
    pub description: String,
    pub services: String,
    pub event_types: Vec<String>,
    pub event_size: String,
    pub budget_range: String,
    pub communication_method: String,
    pub website: String,
    pub social_media: String,
    pub special_requirements: String,
}

/// Multipart field layout of the company registration form, for the API
/// docs. Checkbox fields (`eventTypes`) may repeat; repeating a value
/// deselects it.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompanyRegistrationRequest {
    #[schema(example = "Acme Events")]
    pub company_name: String,

    #[schema(example = "Entertainment")]
    pub industry: String,

    #[schema(example = "Grace Hopper")]
    pub contact_name: String,

    #[schema(example = "bookings@acme-events.example")]
    pub email: String,

    #[schema(example = "+1 555 0100")]
    pub phone: String,

    #[schema(example = "New York")]
    pub city: String,

    #[schema(example = "United States")]
    pub country: String,

    pub description: Option<String>,
    pub services: Option<String>,

    #[schema(example = json!(["Weddings", "Festivals"]))]
    pub event_types: Option<Vec<String>>,

    #[schema(example = "Medium (100-500 guests)")]
    pub event_size: String,

    pub budget_range: Option<String>,

    #[schema(example = "Email")]
    pub communication_method: Option<String>,

    pub website: Option<String>,
    pub social_media: Option<String>,
    pub special_requirements: Option<String>,
}

/// Terminal message returned after a successful company submission
#[derive(Debug, Serialize, ToSchema)]
pub struct CompanyRegistrationResponse {
    #[schema(example = "Company Registration Submitted Successfully!")]
    pub message: String,
}

/// Fixed choice lists of the company form
#[derive(Debug, Serialize, ToSchema)]
pub struct CompanyFormOptions {
    #[schema(example = json!(["Weddings", "Festivals"]))]
    pub event_types: Vec<String>,

    #[schema(example = json!(["Small (0-100 guests)"]))]
    pub event_sizes: Vec<String>,

    #[schema(example = json!(["Email", "WhatsApp"]))]
    pub communication_methods: Vec<String>,
}

/// Possible company registration errors
#[derive(Debug, Error)]
pub enum CompanyRegistrationError {
    #[error("Required field {0} is missing")]
    MissingField(&'static str),

    #[error("Registration insert failed: {0}")]
    InsertFailed(#[source] BackendError),

    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Error response for the API
#[derive(Debug, Serialize, ToSchema)]
pub struct CompanyErrorResponse {
    /// User-facing message
    #[schema(example = "There was an error submitting your registration. Please try again.")]
    pub error: String,

    /// Error code
    #[schema(example = "SUBMISSION_FAILED")]
    pub code: String,
}

impl From<&CompanyRegistrationError> for CompanyErrorResponse {
    fn from(err: &CompanyRegistrationError) -> Self {
        match err {
            CompanyRegistrationError::MissingField(field) => Self {
                error: format!("{} is required", field),
                code: "MISSING_FIELD".to_string(),
            },
            CompanyRegistrationError::InsertFailed(_) => Self {
                error: "There was an error submitting your registration. Please try again."
                    .to_string(),
                code: "SUBMISSION_FAILED".to_string(),
            },
            CompanyRegistrationError::InternalError(_) => Self {
                error: "There was an error submitting your registration. Please try again."
                    .to_string(),
                code: "INTERNAL_ERROR".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_update_is_local() {
        let initial = CompanyRegistration::default();
        let updated = initial
            .with_text(CompanyTextField::CompanyName, "Acme Events")
            .with_text(CompanyTextField::Industry, "Entertainment");

        assert_eq!(updated.company_name, "Acme Events");
        assert_eq!(updated.industry, "Entertainment");
        assert_eq!(updated.contact_name, initial.contact_name);
        assert_eq!(updated.location, initial.location);
        assert_eq!(updated.event_types, initial.event_types);
        // The previous snapshot is unaffected
        assert_eq!(initial.company_name, "");
    }

    #[test]
    fn test_location_update_preserves_sibling_key() {
        let form = CompanyRegistration::default()
            .with_location(LocationField::City, "New York")
            .with_location(LocationField::Country, "United States");

        let updated = form.with_location(LocationField::City, "Boston");

        assert_eq!(updated.location.city, "Boston");
        assert_eq!(updated.location.country, "United States");
    }

    #[test]
    fn test_event_type_toggle_is_an_involution() {
        let form = CompanyRegistration::default();
        let toggled = form.toggle_event_type("Weddings").toggle_event_type("Weddings");
        assert_eq!(toggled.event_types, form.event_types);
    }

    #[test]
    fn test_event_type_toggle_keeps_first_insertion_order() {
        let form = CompanyRegistration::default()
            .toggle_event_type("Weddings")
            .toggle_event_type("Corporate Events")
            .toggle_event_type("Festivals")
            .toggle_event_type("Corporate Events");

        assert_eq!(form.event_types, vec!["Weddings", "Festivals"]);
    }

    #[test]
    fn test_field_name_dispatch() {
        assert_eq!(
            CompanyTextField::from_name("companyName"),
            Some(CompanyTextField::CompanyName)
        );
        assert_eq!(
            CompanyTextField::from_name("specialRequirements"),
            Some(CompanyTextField::SpecialRequirements)
        );
        assert_eq!(LocationField::from_name("country"), Some(LocationField::Country));
        // Unknown keys are not absorbed
        assert_eq!(CompanyTextField::from_name("company_name"), None);
        assert_eq!(CompanyTextField::from_name("state"), None);
    }

    #[test]
    fn test_record_mapping_uses_snake_case_columns() {
        let form = CompanyRegistration::default()
            .with_text(CompanyTextField::CompanyName, "Acme Events")
            .with_text(CompanyTextField::EventSize, "Medium (100-500 guests)")
            .with_text(CompanyTextField::CommunicationMethod, "Email")
            .with_location(LocationField::City, "New York")
            .toggle_event_type("Weddings")
            .toggle_event_type("Festivals");

        let json = serde_json::to_value(form.to_record()).unwrap();

        assert_eq!(json["company_name"], "Acme Events");
        assert_eq!(json["event_size"], "Medium (100-500 guests)");
        assert_eq!(json["communication_method"], "Email");
        assert_eq!(json["city"], "New York");
        assert_eq!(json["event_types"], serde_json::json!(["Weddings", "Festivals"]));
    }
}
