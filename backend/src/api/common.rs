//! Shared helpers for API request validation.
//!
//! Services validate request DTOs with the `validator` derive; this module
//! flattens the resulting field errors into the single message carried by
//! `ServiceError::Validation`.

use crate::errors::ServiceError;

/// Flattens `validator::ValidationErrors` into one human-readable message.
pub fn format_validation_errors(errors: validator::ValidationErrors) -> String {
    errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                format!(
                    "{}: {}",
                    field,
                    error.message.as_ref().unwrap_or(&"Invalid value".into())
                )
            })
        })
        .collect::<Vec<String>>()
        .join(", ")
}

/// Helper to turn validation errors into a `ServiceError`.
pub fn validation_error(errors: validator::ValidationErrors) -> ServiceError {
    ServiceError::validation(format_validation_errors(errors))
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Probe {
        #[validate(length(min = 3, message = "Name too short"))]
        name: String,
    }

    #[test]
    fn test_format_validation_errors() {
        let probe = Probe {
            name: "ab".to_string(),
        };
        let errors = probe.validate().unwrap_err();

        let message = format_validation_errors(errors);
        assert_eq!(message, "name: Name too short");
    }

    #[test]
    fn test_validation_error_helper() {
        let probe = Probe {
            name: String::new(),
        };
        let err = validation_error(probe.validate().unwrap_err());
        assert!(matches!(err, ServiceError::Validation { .. }));
    }
}
