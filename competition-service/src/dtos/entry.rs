use serde::{Deserialize, Serialize};
use service_core::error::AppError;
use utoipa::ToSchema;

use crate::models::{field_errors, FieldError};
use crate::utils::truncate_chars;

pub const ENTRY_ACCEPTED_MESSAGE: &str = "Entry received. Good luck!";

const STORAGE_ERROR_CHARS: usize = 200;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EntryResponse {
    pub success: bool,
    #[schema(example = "665f1c2e9b1d4a3f8c0e7a12")]
    pub id: Option<String>,
    #[schema(example = "Entry received. Good luck!")]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

impl EntryResponse {
    pub fn accepted(id: String) -> Self {
        Self {
            success: true,
            id: Some(id),
            message: ENTRY_ACCEPTED_MESSAGE.to_string(),
            errors: None,
        }
    }

    /// Failure body for a rejected submission; the status code comes from the error.
    pub fn rejected(err: &AppError) -> Self {
        let (message, errors) = match err {
            AppError::ValidationError(validation) => {
                let fields = field_errors(validation);
                let summary = fields
                    .iter()
                    .map(|f| format!("{}: {}", f.field, f.message))
                    .collect::<Vec<_>>()
                    .join("; ");
                (format!("Validation failed: {}", summary), Some(fields))
            }
            AppError::BadRequest(e) => (e.to_string(), None),
            AppError::DatabaseError(e) | AppError::InternalError(e) => (
                format!(
                    "Failed to submit entry: {}",
                    truncate_chars(&e.to_string(), STORAGE_ERROR_CHARS)
                ),
                None,
            ),
            other => (
                format!(
                    "Failed to submit entry: {}",
                    truncate_chars(&other.to_string(), STORAGE_ERROR_CHARS)
                ),
                None,
            ),
        };

        Self {
            success: false,
            id: None,
            message,
            errors,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CountResponse {
    #[schema(example = 42)]
    pub count: u64,
}
