use crate::error::{PortalError, PortalResult};
use chrono::NaiveDate;
use validator::{Validate, ValidationError, ValidationErrors};

/// Run `validator` rules; a failed `required`/`length(min = 1)` or
/// [`not_blank`] check on a field is reported as a missing identifier.
pub fn validate_model<T: Validate>(model: &T) -> PortalResult<()> {
    match model.validate() {
        Ok(()) => Ok(()),
        Err(errors) => {
            let missing = missing_fields(&errors);
            if !missing.is_empty() {
                return Err(PortalError::missing_identifier(missing.join(", ")));
            }
            Err(PortalError::validation("model", format_validation_errors(&errors)))
        }
    }
}

fn missing_fields(errors: &ValidationErrors) -> Vec<String> {
    let mut fields: Vec<String> = errors
        .field_errors()
        .into_iter()
        .filter(|(_, field_errors)| {
            field_errors
                .iter()
                .any(|error| matches!(error.code.as_ref(), "required" | "length"))
        })
        .map(|(field, _)| field.to_string())
        .collect();
    fields.sort();
    fields
}

pub fn format_validation_errors(errors: &ValidationErrors) -> String {
    let mut messages = Vec::new();

    for (field, field_errors) in errors.field_errors() {
        for error in field_errors {
            let message = match error.code.as_ref() {
                "length" => format!("Length validation failed for field '{}'", field),
                "required" => format!("Field '{}' is required", field),
                _ => format!("Validation failed for field '{}': {}", field, error.code),
            };
            messages.push(message);
        }
    }

    messages.sort();
    messages.join(", ")
}

/// Custom `validator` rule rejecting empty and whitespace-only strings.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

/// Trimmed identifier, or `MissingIdentifier` when blank or absent.
pub fn require_identifier(field: &str, value: Option<&str>) -> PortalResult<String> {
    match value.map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value.to_string()),
        _ => Err(PortalError::missing_identifier(field)),
    }
}

/// Parse an optional `YYYY-MM-DD` query value. Blank counts as absent.
pub fn parse_day(field: &str, value: Option<&str>) -> PortalResult<Option<NaiveDate>> {
    let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| PortalError::validation(field, format!("'{}' is not a YYYY-MM-DD date", value)))
}
