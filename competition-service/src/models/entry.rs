use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use service_core::error::AppError;
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors};

use crate::utils::{deserialize_lax_bool, validate_email_shape, validate_lax_bool, LaxBool};

/// Collection holding every persisted competition entry.
pub const ENTRY_COLLECTION: &str = "competitionentry";

pub const TERMS_REQUIRED_MESSAGE: &str = "You must accept the terms and conditions to enter.";

/// Raw entry as submitted. Required fields are optional here so that a missing
/// field is reported alongside malformed ones instead of aborting deserialization.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct CompetitionEntryForm {
    #[validate(
        required(message = "field required"),
        length(min = 2, max = 100, message = "must be between 2 and 100 characters")
    )]
    #[schema(example = "Ada Lovelace", min_length = 2, max_length = 100)]
    pub full_name: Option<String>,

    #[validate(
        required(message = "field required"),
        email(message = "must be a valid email address"),
        custom(function = "validate_email_shape", message = "must be a valid email address")
    )]
    #[schema(example = "ada@example.com")]
    pub email: Option<String>,

    #[validate(
        required(message = "field required"),
        length(min = 2, max = 150, message = "must be between 2 and 150 characters")
    )]
    #[schema(example = "Imperial College London", min_length = 2, max_length = 150)]
    pub university: Option<String>,

    #[validate(length(max = 150, message = "must be at most 150 characters"))]
    #[schema(max_length = 150)]
    pub course: Option<String>,

    #[validate(length(max = 50, message = "must be at most 50 characters"))]
    #[schema(example = "MSc", max_length = 50)]
    pub year_of_study: Option<String>,

    #[serde(default, deserialize_with = "deserialize_lax_bool")]
    #[validate(custom(function = "validate_lax_bool", message = "must be a boolean"))]
    #[schema(value_type = Option<bool>)]
    pub marketing_opt_in: Option<LaxBool>,

    #[serde(default, deserialize_with = "deserialize_lax_bool")]
    #[validate(
        required(message = "field required"),
        custom(function = "validate_lax_bool", message = "must be a boolean")
    )]
    #[schema(value_type = bool)]
    pub consent_terms: Option<LaxBool>,

    #[validate(length(max = 50, message = "must be at most 50 characters"))]
    #[schema(max_length = 50)]
    pub referral_code: Option<String>,
}

/// A fully validated competition entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitionEntry {
    pub full_name: String,
    pub email: String,
    pub university: String,
    pub course: Option<String>,
    pub year_of_study: Option<String>,
    pub marketing_opt_in: bool,
    pub consent_terms: bool,
    pub referral_code: Option<String>,
}

impl TryFrom<CompetitionEntryForm> for CompetitionEntry {
    type Error = AppError;

    fn try_from(form: CompetitionEntryForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let missing = |field: &str| AppError::BadRequest(anyhow::anyhow!("{} is required", field));

        Ok(Self {
            full_name: form.full_name.ok_or_else(|| missing("full_name"))?,
            email: form.email.ok_or_else(|| missing("email"))?,
            university: form.university.ok_or_else(|| missing("university"))?,
            course: form.course,
            year_of_study: form.year_of_study,
            marketing_opt_in: form
                .marketing_opt_in
                .and_then(LaxBool::value)
                .unwrap_or(false),
            consent_terms: form
                .consent_terms
                .and_then(LaxBool::value)
                .ok_or_else(|| missing("consent_terms"))?,
            referral_code: form.referral_code,
        })
    }
}

/// One rejected field of a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Flattens validator output into one error per failed rule, ordered by field name.
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut fields: Vec<FieldError> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, failures)| {
            let field = field.to_string();
            failures.iter().map(move |failure| FieldError {
                field: field.clone(),
                message: failure
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| failure.code.to_string()),
            })
        })
        .collect();

    fields.sort_by(|a, b| a.field.cmp(&b.field).then_with(|| a.message.cmp(&b.message)));
    fields.dedup();
    fields
}

/// The document written to the store for an accepted entry.
#[derive(Debug, Clone, Serialize)]
pub struct EntryRecord {
    #[serde(flatten)]
    pub entry: CompetitionEntry,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl EntryRecord {
    pub fn new(entry: CompetitionEntry) -> Self {
        let now = Utc::now();
        Self {
            entry,
            created_at: now,
            updated_at: now,
        }
    }
}
