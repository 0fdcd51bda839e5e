//! Registrar error classification
//!
//! Namecheap reports failures as free text with a numeric `Number`, and the
//! numbers are not a documented stable taxonomy. Classification therefore
//! sniffs keywords in the first (primary) message. This is a best-effort
//! heuristic: a reworded vendor message can land in a different category,
//! and anything unrecognized falls through to [`ApiError::Api`].

use crate::error::{ApiError, ErrorContext};
use serde_json::Value;

const AUTHENTICATION_MARKERS: &[&str] = &["authentication", "unauthorized", "invalid api key"];
const VALIDATION_MARKERS: &[&str] = &["validation", "invalid parameter", "required parameter"];

/// Default code for authentication failures
pub const AUTHENTICATION_CODE: u16 = 401;
/// Default code for validation failures
pub const VALIDATION_CODE: u16 = 400;
/// Default code for every other registrar failure
pub const API_CODE: u16 = 500;

/// Map a list of registrar error strings to a classified error
///
/// Only the first entry drives classification, case-insensitively, with
/// authentication markers checked before validation markers. The full list
/// is kept in the error for diagnostics.
pub fn classify(errors: Vec<String>, command: &str) -> ApiError {
    let message = errors
        .first()
        .cloned()
        .unwrap_or_else(|| "Unknown error".to_string());
    let primary = message.to_lowercase();

    let mut context = ErrorContext::new();
    context.insert("command".to_string(), Value::String(command.to_string()));

    if contains_any(&primary, AUTHENTICATION_MARKERS) {
        context.insert("errors".to_string(), error_list(&errors));
        ApiError::Authentication {
            message,
            code: AUTHENTICATION_CODE,
            context,
        }
    } else if contains_any(&primary, VALIDATION_MARKERS) {
        ApiError::Validation {
            message,
            code: VALIDATION_CODE,
            errors,
            context,
        }
    } else {
        context.insert("errors".to_string(), error_list(&errors));
        ApiError::Api {
            message,
            code: API_CODE,
            context,
        }
    }
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

fn error_list(errors: &[String]) -> Value {
    Value::Array(errors.iter().cloned().map(Value::String).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use proptest::prelude::*;

    const COMMAND: &str = "namecheap.domains.check";

    fn kind_of(message: &str) -> ErrorKind {
        classify(vec![message.to_string()], COMMAND).kind()
    }

    #[test]
    fn test_authentication_markers() {
        assert_eq!(kind_of("[1011150] Invalid API Key"), ErrorKind::Authentication);
        assert_eq!(kind_of("[500000] Unauthorized request"), ErrorKind::Authentication);
        assert_eq!(kind_of("API Authentication failed"), ErrorKind::Authentication);
    }

    #[test]
    fn test_validation_markers() {
        assert_eq!(
            kind_of("[2011166] Required parameter DomainList is missing"),
            ErrorKind::Validation
        );
        assert_eq!(kind_of("[2011169] Invalid Parameter: Years"), ErrorKind::Validation);
        assert_eq!(kind_of("VALIDATION error on SLD"), ErrorKind::Validation);
    }

    #[test]
    fn test_unrecognized_is_generic() {
        let err = classify(vec!["[2030280] TLD is not supported".to_string()], COMMAND);
        assert_eq!(err.kind(), ErrorKind::Api);
        assert_eq!(err.code(), Some(API_CODE));
        assert_eq!(err.errors(), vec!["[2030280] TLD is not supported"]);
    }

    #[test]
    fn test_authentication_wins_over_validation() {
        assert_eq!(
            kind_of("Invalid API Key supplied as parameter: invalid parameter ApiKey"),
            ErrorKind::Authentication
        );
    }

    #[test]
    fn test_only_primary_message_is_used() {
        let errors = vec![
            "[2019166] Domain not found".to_string(),
            "[1011150] Invalid API Key".to_string(),
        ];
        let err = classify(errors, COMMAND);
        assert_eq!(err.kind(), ErrorKind::Api);
        assert_eq!(err.message(), "[2019166] Domain not found");
        assert_eq!(err.errors().len(), 2);
    }

    #[test]
    fn test_authentication_context() {
        let errors = vec![
            "[1011150] Invalid API Key".to_string(),
            "[1011102] Parameter APIUser is missing".to_string(),
        ];
        let err = classify(errors, COMMAND);
        assert_eq!(err.kind(), ErrorKind::Authentication);
        assert_eq!(err.code(), Some(AUTHENTICATION_CODE));
        assert_eq!(err.command(), Some(COMMAND));
        assert_eq!(
            err.errors(),
            vec!["[1011150] Invalid API Key", "[1011102] Parameter APIUser is missing"]
        );
    }

    #[test]
    fn test_validation_carries_errors_as_detail() {
        let errors = vec![
            "[2011166] Required parameter SLD is missing".to_string(),
            "[2011167] Required parameter TLD is missing".to_string(),
        ];
        match classify(errors.clone(), COMMAND) {
            ApiError::Validation {
                message,
                code,
                errors: detail,
                context,
            } => {
                assert_eq!(message, errors[0]);
                assert_eq!(code, VALIDATION_CODE);
                assert_eq!(detail, errors);
                assert_eq!(context.get("command").and_then(Value::as_str), Some(COMMAND));
                assert!(!context.contains_key("errors"));
            }
            other => panic!("Expected Validation, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_list_is_generic() {
        let err = classify(Vec::new(), COMMAND);
        assert_eq!(err.kind(), ErrorKind::Api);
        assert_eq!(err.message(), "Unknown error");
    }

    // Classification ignores case
    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_classification_is_case_insensitive(
            marker in prop::sample::select(vec![
                "authentication", "unauthorized", "invalid api key",
                "validation", "invalid parameter", "required parameter",
            ]),
            upper_mask in prop::collection::vec(prop::bool::ANY, 32),
            prefix in "[0-9]{1,7}",
        ) {
            let mixed: String = marker
                .chars()
                .zip(upper_mask.iter().cycle())
                .map(|(c, &upper)| if upper { c.to_ascii_uppercase() } else { c })
                .collect();
            let lower = format!("[{}] {}", prefix, marker);
            let shuffled = format!("[{}] {}", prefix, mixed);

            prop_assert_eq!(kind_of(&lower), kind_of(&shuffled));
        }
    }
}
