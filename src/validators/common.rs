//! Common validation utilities and helpers.

use validator::ValidationErrors;

use crate::constants::{CODE_INVALID_REDIRECT, CODE_VALIDATION_FAILED, ERR_INVALID_REDIRECT};
use crate::errors::ApiError;

/// Convert validator errors to ApiError::ValidationError.
///
/// # Example
/// ```ignore
/// body.validate().map_err(validation_errors_to_api_error)?;
/// ```
pub fn validation_errors_to_api_error(e: ValidationErrors) -> ApiError {
    let mut errors: Vec<String> = e
        .field_errors()
        .iter()
        .flat_map(|(_, errs)| {
            errs.iter()
                .map(|e| e.message.clone().unwrap_or_default().to_string())
        })
        .collect();
    errors.sort();
    ApiError::ValidationError {
        code: CODE_VALIDATION_FAILED.to_string(),
        errors,
    }
}

/// Accept only same-origin absolute paths, so a login form cannot be turned
/// into an open redirect.
pub fn validate_local_path(path: &str) -> Result<(), ApiError> {
    let local = path.starts_with('/')
        && !path.starts_with("//")
        && !path.contains('\\')
        && !path.chars().any(char::is_control);
    if !local {
        return Err(ApiError::BadRequest {
            code: CODE_INVALID_REDIRECT.to_string(),
            message: ERR_INVALID_REDIRECT.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LoginRequest;
    use validator::Validate;

    #[test]
    fn test_local_paths() {
        assert!(validate_local_path("/restaurant/menu").is_ok());
        assert!(validate_local_path("/").is_ok());
        assert!(validate_local_path("//evil.example").is_err());
        assert!(validate_local_path("https://evil.example").is_err());
        assert!(validate_local_path("/\\evil.example").is_err());
        assert!(validate_local_path("relative").is_err());
        assert!(validate_local_path("/a\nb").is_err());
    }

    #[test]
    fn test_login_validation_errors() {
        let req: LoginRequest =
            serde_json::from_str(r#"{"identifier":"not-an-email","secret":""}"#).unwrap();
        let err = validation_errors_to_api_error(req.validate().unwrap_err());
        match err {
            ApiError::ValidationError { code, errors } => {
                assert_eq!(code, CODE_VALIDATION_FAILED);
                assert_eq!(errors, vec!["Invalid email format", "Password is required"]);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }
}
