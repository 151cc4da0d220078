use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::backend::client::BackendError;

// Choice lists offered by the DJ registration form
pub const GENRE_OPTIONS: [&str; 7] = [
    "EDM", "Hip-Hop", "House", "Techno", "Pop", "Rock", "Other",
];

pub const TRAVEL_PREFERENCES: [&str; 3] = ["Local only", "National", "International"];

/// Nested location block of the DJ form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    pub country: String,
    pub state: String,
    pub city: String,
}

/// Profile picture attached to the form, held until submission uploads it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfilePicture {
    pub file_name: String,
    pub content_type: String,
    pub content: Vec<u8>,
}

/// Snapshot of the DJ registration form.
///
/// Starts all-empty and is only modified through the typed update
/// operations below, each of which returns a new snapshot and leaves the
/// previous one untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DjRegistration {
    pub full_name: String,
    pub stage_name: String,
    pub profile_picture: Option<ProfilePicture>,
    pub email: String,
    pub phone_number: String,
    pub location: Location,
    pub experience_years: String,
    pub genres: Vec<String>,
    pub bio: String,
    pub dj_software: String,
    pub demo_links: String,
    pub past_events: String,
    pub pricing: String,
    pub travel_preference: String,
    pub social_media_links: String,
    pub personal_website: String,
}

/// Scalar text fields of the DJ form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DjTextField {
    FullName,
    StageName,
    Email,
    PhoneNumber,
    ExperienceYears,
    Bio,
    DjSoftware,
    DemoLinks,
    PastEvents,
    Pricing,
    TravelPreference,
    SocialMediaLinks,
    PersonalWebsite,
}

impl DjTextField {
    /// Resolve a submitted form-field name. Unknown names get `None` and are
    /// dropped by the caller instead of being absorbed into the snapshot.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "fullName" => Some(Self::FullName),
            "stageName" => Some(Self::StageName),
            "email" => Some(Self::Email),
            "phoneNumber" => Some(Self::PhoneNumber),
            "experienceYears" => Some(Self::ExperienceYears),
            "bio" => Some(Self::Bio),
            "djSoftware" => Some(Self::DjSoftware),
            "demoLinks" => Some(Self::DemoLinks),
            "pastEvents" => Some(Self::PastEvents),
            "pricing" => Some(Self::Pricing),
            "travelPreference" => Some(Self::TravelPreference),
            "socialMediaLinks" => Some(Self::SocialMediaLinks),
            "personalWebsite" => Some(Self::PersonalWebsite),
            _ => None,
        }
    }
}

/// Keys of the nested location block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationField {
    Country,
    State,
    City,
}

impl LocationField {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "country" => Some(Self::Country),
            "state" => Some(Self::State),
            "city" => Some(Self::City),
            _ => None,
        }
    }
}

impl DjRegistration {
    /// Replace one scalar field, leaving every other field untouched
    pub fn with_text(&self, field: DjTextField, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        let slot = match field {
            DjTextField::FullName => &mut next.full_name,
            DjTextField::StageName => &mut next.stage_name,
            DjTextField::Email => &mut next.email,
            DjTextField::PhoneNumber => &mut next.phone_number,
            DjTextField::ExperienceYears => &mut next.experience_years,
            DjTextField::Bio => &mut next.bio,
            DjTextField::DjSoftware => &mut next.dj_software,
            DjTextField::DemoLinks => &mut next.demo_links,
            DjTextField::PastEvents => &mut next.past_events,
            DjTextField::Pricing => &mut next.pricing,
            DjTextField::TravelPreference => &mut next.travel_preference,
            DjTextField::SocialMediaLinks => &mut next.social_media_links,
            DjTextField::PersonalWebsite => &mut next.personal_website,
        };
        *slot = value.into();
        next
    }

    /// Replace one key inside the location block; sibling keys and all
    /// top-level fields are preserved
    pub fn with_location(&self, field: LocationField, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        let slot = match field {
            LocationField::Country => &mut next.location.country,
            LocationField::State => &mut next.location.state,
            LocationField::City => &mut next.location.city,
        };
        *slot = value.into();
        next
    }

    /// Toggle a genre in or out of the selection. The selection never holds
    /// duplicates; removing an entry does not reorder the survivors.
    pub fn toggle_genre(&self, genre: &str) -> Self {
        let mut next = self.clone();
        match next.genres.iter().position(|g| g == genre) {
            Some(index) => {
                next.genres.remove(index);
            }
            None => next.genres.push(genre.to_string()),
        }
        next
    }

    /// Attach a profile picture, or leave the snapshot unchanged when the
    /// picker produced no file
    pub fn with_profile_picture(&self, picture: Option<ProfilePicture>) -> Self {
        let mut next = self.clone();
        if picture.is_some() {
            next.profile_picture = picture;
        }
        next
    }

    /// The integer coercion of the experience-years input
    pub fn parse_experience_years(&self) -> Result<i64, DjRegistrationError> {
        self.experience_years
            .trim()
            .parse::<i64>()
            .map_err(|_| DjRegistrationError::InvalidExperienceYears)
    }

    /// Map the snapshot onto the column names of the `djs` table
    pub fn to_record(&self, experience_years: i64, profile_picture_url: Option<String>) -> DjRecord {
        DjRecord {
            full_name: self.full_name.clone(),
            stage_name: self.stage_name.clone(),
            profile_picture_url,
            email: self.email.clone(),
            phone_number: self.phone_number.clone(),
            country: self.location.country.clone(),
            state: self.location.state.clone(),
            city: self.location.city.clone(),
            experience_years,
            primary_genres: self.genres.clone(),
            bio: self.bio.clone(),
            dj_software: self.dj_software.clone(),
            demo_links: self.demo_links.clone(),
            past_events: self.past_events.clone(),
            pricing_structure: self.pricing.clone(),
            travel_preference: self.travel_preference.clone(),
            social_links: self.social_media_links.clone(),
            website: self.personal_website.clone(),
        }
    }
}

/// Row persisted into the `djs` table
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DjRecord {
    pub full_name: String,
    pub stage_name: String,
    pub profile_picture_url: Option<String>,
    pub email: String,
    pub phone_number: String,
    pub country: String,
    pub state: String,
    pub city: String,
    pub experience_years: i64,
    pub primary_genres: Vec<String>,
    pub bio: String,
    pub dj_software: String,
    pub demo_links: String,
    pub past_events: String,
    pub pricing_structure: String,
    pub travel_preference: String,
    pub social_links: String,
    pub website: String,
}

/// Multipart field layout of the DJ registration form, for the API docs.
/// Checkbox fields (`genres`) may repeat; repeating a value deselects it.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DjRegistrationRequest {
    #[schema(example = "Ada Lovelace")]
    pub full_name: String,

    #[schema(example = "DJ Ada")]
    pub stage_name: Option<String>,

    /// Optional image file; uploaded to storage before the row is written
    #[schema(value_type = Option<String>, format = Binary)]
    pub profile_picture: Option<String>,

    #[schema(example = "ada@example.com")]
    pub email: String,

    #[schema(example = "+44 20 7946 0000")]
    pub phone_number: String,

    #[schema(example = "United Kingdom")]
    pub country: String,

    #[schema(example = "England")]
    pub state: String,

    #[schema(example = "London")]
    pub city: String,

    #[schema(example = "5")]
    pub experience_years: String,

    #[schema(example = json!(["House", "Techno"]))]
    pub genres: Option<Vec<String>>,

    pub bio: Option<String>,
    pub dj_software: Option<String>,
    pub demo_links: Option<String>,
    pub past_events: Option<String>,
    pub pricing: Option<String>,

    #[schema(example = "International")]
    pub travel_preference: Option<String>,

    pub social_media_links: Option<String>,
    pub personal_website: Option<String>,
}

/// Terminal message returned after a successful DJ submission
#[derive(Debug, Serialize, ToSchema)]
pub struct DjRegistrationResponse {
    #[schema(example = "DJ Registration Submitted Successfully!")]
    pub message: String,
}

/// Fixed choice lists of the DJ form
#[derive(Debug, Serialize, ToSchema)]
pub struct DjFormOptions {
    #[schema(example = json!(["EDM", "Hip-Hop", "House"]))]
    pub genres: Vec<String>,

    #[schema(example = json!(["Local only", "National", "International"]))]
    pub travel_preferences: Vec<String>,
}

/// Possible DJ registration errors
#[derive(Debug, Error)]
pub enum DjRegistrationError {
    #[error("Required field {0} is missing")]
    MissingField(&'static str),

    #[error("Experience years is not a whole number")]
    InvalidExperienceYears,

    #[error("Profile picture upload failed: {0}")]
    UploadFailed(#[source] BackendError),

    #[error("Registration insert failed: {0}")]
    InsertFailed(#[source] BackendError),

    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Error response for the API
#[derive(Debug, Serialize, ToSchema)]
pub struct DjErrorResponse {
    /// User-facing message
    #[schema(example = "Failed to upload profile picture. Please try again.")]
    pub error: String,

    /// Error code
    #[schema(example = "UPLOAD_FAILED")]
    pub code: String,
}

impl From<&DjRegistrationError> for DjErrorResponse {
    fn from(err: &DjRegistrationError) -> Self {
        match err {
            DjRegistrationError::MissingField(field) => Self {
                error: format!("{} is required", field),
                code: "MISSING_FIELD".to_string(),
            },
            DjRegistrationError::InvalidExperienceYears => Self {
                error: "Years of experience must be a whole number".to_string(),
                code: "INVALID_EXPERIENCE_YEARS".to_string(),
            },
            DjRegistrationError::UploadFailed(_) => Self {
                error: "Failed to upload profile picture. Please try again.".to_string(),
                code: "UPLOAD_FAILED".to_string(),
            },
            DjRegistrationError::InsertFailed(_) => Self {
                error: "There was an error submitting your registration. Please try again."
                    .to_string(),
                code: "SUBMISSION_FAILED".to_string(),
            },
            DjRegistrationError::InternalError(_) => Self {
                error: "There was an error submitting your registration. Please try again."
                    .to_string(),
                code: "INTERNAL_ERROR".to_string(),
            },
        }
    }
}
