//! Parse-then-validate helpers for raw text coming from the forms. Services
//! call these before touching the store so a bad field never causes a partial
//! write.

use crate::error::{ServiceError, ServiceResult};

/// Require a non-empty name. Names are kept as typed (no trimming) because
/// they double as lookup keys.
pub fn require_name(kind: &str, raw: &str) -> ServiceResult<String> {
    if raw.is_empty() {
        return Err(ServiceError::validation(format!(
            "Please provide both name and description for the {kind}."
        )));
    }
    Ok(raw.to_string())
}

/// Require a description that is non-empty after trimming; returns the
/// trimmed text, which is what gets stored.
pub fn require_description(kind: &str, raw: &str) -> ServiceResult<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::validation(format!(
            "Please provide both name and description for the {kind}."
        )));
    }
    Ok(trimmed.to_string())
}

/// Parse an integer field, reporting `field` in the error message.
pub fn parse_integer(field: &str, raw: &str) -> ServiceResult<i64> {
    raw.trim().parse::<i64>().map_err(|_| {
        ServiceError::validation(format!("Please enter a valid integer for {field}."))
    })
}

/// Parse an integer field, falling back to `default` for empty or unparsable
/// text. Used by the add flows, where the number is optional.
pub fn parse_integer_or(raw: &str, default: i64) -> i64 {
    raw.trim().parse::<i64>().unwrap_or(default)
}

/// Turn a selection name into a lookup key; an empty one means nothing was
/// selected.
pub fn require_selection(kind: &str, raw: &str) -> ServiceResult<String> {
    if raw.is_empty() {
        return Err(ServiceError::not_found(format!(
            "Please select a {kind} first."
        )));
    }
    Ok(raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_integer() {
        assert_eq!(parse_integer("level", " 12 ").unwrap(), 12);
        assert_eq!(parse_integer("level", "-4").unwrap(), -4);

        let err = parse_integer("character level", "twelve").unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert_eq!(
            err.to_string(),
            "Please enter a valid integer for character level."
        );
        assert!(parse_integer("level", "").is_err());
        assert!(parse_integer("level", "1.5").is_err());
    }

    #[test]
    fn test_parse_integer_or_default() {
        assert_eq!(parse_integer_or("7", 1), 7);
        assert_eq!(parse_integer_or("", 1), 1);
        assert_eq!(parse_integer_or("abc", 0), 0);
    }

    #[test]
    fn test_required_text() {
        assert_eq!(require_name("character", "Aria").unwrap(), "Aria");
        assert!(require_name("character", "").is_err());
        assert_eq!(require_name("character", "   ").unwrap(), "   ");
        assert_eq!(
            require_description("character", "  Brave ranger \n").unwrap(),
            "Brave ranger"
        );
        assert!(require_description("character", " \n\t").is_err());
    }

    #[test]
    fn test_require_selection() {
        assert!(matches!(
            require_selection("character", ""),
            Err(ServiceError::NotFound(_))
        ));
        assert_eq!(require_selection("character", "Aria").unwrap(), "Aria");
    }
}
