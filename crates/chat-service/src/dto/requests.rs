//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.

use serde::Deserialize;
use validator::Validate;

// ============================================================================
// Account Requests
// ============================================================================

/// User registration request
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(min = 3, message = "userName must be at least 3 characters"))]
    pub user_name: String,

    #[validate(length(min = 6, message = "password must be at least 6 characters"))]
    pub password: String,
}

/// User login request
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "userName is required"))]
    pub user_name: String,

    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_camel_case() {
        let request: RegisterRequest =
            serde_json::from_str(r#"{"userName":"alice","password":"secret1"}"#).unwrap();
        assert_eq!(request.user_name, "alice");
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_register_length_rules() {
        let short_name = RegisterRequest {
            user_name: "al".to_string(),
            password: "secret1".to_string(),
        };
        assert!(short_name.validate().is_err());

        let short_password = RegisterRequest {
            user_name: "alice".to_string(),
            password: "12345".to_string(),
        };
        let errors = short_password.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("password"));
    }

    #[test]
    fn test_login_requires_fields() {
        let empty = LoginRequest {
            user_name: String::new(),
            password: "x".to_string(),
        };
        assert!(empty.validate().is_err());
    }
}
