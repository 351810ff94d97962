use crate::error::DatabaseErrorConverter;
use thiserror::Error;

/// Application-wide error type shared by repositories, services and handlers.
///
/// Repositories produce the storage variants, services pass them through
/// unchanged, and the HTTP layer maps each variant to a status code.
#[derive(Error, Debug)]
pub enum AppError {
    /// No row matched the given key
    #[error("Resource not found: {entity} with {field}={value}")]
    NotFound {
        entity: String,
        field: String,
        value: String,
    },

    /// A uniqueness rule rejected the write
    #[error("Duplicate entry: {entity}.{field} = '{value}' already exists")]
    Duplicate {
        entity: String,
        field: String,
        value: String,
    },

    /// Malformed input or a violated business rule
    #[error("Validation failed for {field}: {reason}")]
    Validation { field: String, reason: String },

    /// Field-level failures collected from `validator`
    #[error("Validation failed: {}", format_field_errors(errors))]
    ValidationErrors { errors: Vec<FieldError> },

    #[error("Bad request: {message}")]
    BadRequest { message: String },

    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    /// Any other failed statement
    #[error("Database operation failed: {operation}")]
    Database {
        operation: String,
        #[source]
        source: anyhow::Error,
    },

    /// The request exceeded its time budget
    #[error("Request timed out after {seconds}s")]
    Timeout { seconds: u64 },

    #[error("Configuration error: {key}")]
    Configuration {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Connection pool error")]
    ConnectionPool {
        #[source]
        source: anyhow::Error,
    },

    #[error("Internal error")]
    Internal {
        #[source]
        source: anyhow::Error,
    },
}

/// A single field failure reported by request validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

fn format_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl AppError {
    pub fn not_found(entity: &str, field: &str, value: impl ToString) -> Self {
        AppError::NotFound {
            entity: entity.to_string(),
            field: field.to_string(),
            value: value.to_string(),
        }
    }

    pub fn duplicate(entity: &str, field: &str, value: impl ToString) -> Self {
        AppError::Duplicate {
            entity: entity.to_string(),
            field: field.to_string(),
            value: value.to_string(),
        }
    }

    pub fn validation(field: &str, reason: impl Into<String>) -> Self {
        AppError::Validation {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    /// Wraps a diesel error raised while running `operation`.
    pub fn database(operation: &str, error: diesel::result::Error) -> Self {
        DatabaseErrorConverter::convert_diesel_error(error, operation)
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::NotFound { .. })
    }

    /// Display text of this error followed by every source in its chain.
    pub fn detail(&self) -> String {
        let mut text = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            text.push_str(": ");
            text.push_str(&cause.to_string());
            source = cause.source();
        }
        text
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::Internal { source: error }
    }
}

impl From<diesel::result::Error> for AppError {
    fn from(error: diesel::result::Error) -> Self {
        DatabaseErrorConverter::convert_diesel_error(error, "database operation")
    }
}

impl From<bb8::RunError<diesel_async::pooled_connection::PoolError>> for AppError {
    fn from(error: bb8::RunError<diesel_async::pooled_connection::PoolError>) -> Self {
        AppError::ConnectionPool {
            source: anyhow::Error::new(error),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<FieldError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, failures)| {
                failures.iter().map(move |failure| FieldError {
                    field: field.to_string(),
                    message: failure
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| failure.code.to_string()),
                })
            })
            .collect();
        fields.sort_by(|a, b| a.field.cmp(&b.field));
        AppError::ValidationErrors { errors: fields }
    }
}

/// Type alias for Result with AppError to simplify function signatures
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_includes_source_chain() {
        let error = AppError::Database {
            operation: "insert tweet".to_string(),
            source: anyhow::anyhow!("connection reset"),
        };
        assert_eq!(
            error.detail(),
            "Database operation failed: insert tweet: connection reset"
        );
    }

    #[test]
    fn test_detail_without_source_is_display() {
        let error = AppError::not_found("tweet", "id", "abc");
        assert_eq!(error.detail(), "Resource not found: tweet with id=abc");
        assert!(error.is_not_found());
    }

    #[test]
    fn test_validation_errors_display_joins_fields() {
        let error = AppError::ValidationErrors {
            errors: vec![
                FieldError {
                    field: "content".to_string(),
                    message: "must not be empty".to_string(),
                },
                FieldError {
                    field: "user_id".to_string(),
                    message: "invalid".to_string(),
                },
            ],
        };
        assert_eq!(
            error.to_string(),
            "Validation failed: content: must not be empty; user_id: invalid"
        );
    }

    #[test]
    fn test_from_validator_errors_uses_message_or_code() {
        let mut errors = validator::ValidationErrors::new();
        let mut failure = validator::ValidationError::new("length");
        failure.message = Some("too short".into());
        errors.add("username", failure);
        errors.add("password", validator::ValidationError::new("required"));

        match AppError::from(errors) {
            AppError::ValidationErrors { errors } => {
                assert_eq!(errors.len(), 2);
                assert_eq!(errors[0].field, "password");
                assert_eq!(errors[0].message, "required");
                assert_eq!(errors[1].field, "username");
                assert_eq!(errors[1].message, "too short");
            }
            other => panic!("Expected ValidationErrors, got {other:?}"),
        }
    }
}
