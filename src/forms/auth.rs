use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::auth::hash_password;
use crate::domain::user::NewUser;

/// Maximum allowed length for an e-mail address.
const EMAIL_MAX_LEN: u64 = 254;

/// Maximum allowed length for names and the username.
const NAME_MAX_LEN: u64 = 150;

/// Password length bounds.
const PASSWORD_MIN_LEN: u64 = 8;
const PASSWORD_MAX_LEN: u64 = 128;

/// Result type returned by the account form helpers.
pub type AuthFormResult<T> = Result<T, AuthFormError>;

/// Errors that can occur while processing account forms.
#[derive(Debug, Error)]
pub enum AuthFormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// The password could not be hashed.
    #[error("failed to process password")]
    Hash,
}

/// JSON payload accepted when registering an account.
#[derive(Debug, Deserialize, Validate)]
pub struct SignupForm {
    #[validate(email, length(max = EMAIL_MAX_LEN))]
    pub email: String,
    #[validate(length(min = 1, max = NAME_MAX_LEN))]
    pub username: String,
    #[validate(length(min = 1, max = NAME_MAX_LEN))]
    pub first_name: String,
    #[validate(length(min = 1, max = NAME_MAX_LEN))]
    pub last_name: String,
    #[validate(length(min = PASSWORD_MIN_LEN, max = PASSWORD_MAX_LEN))]
    pub password: String,
}

impl SignupForm {
    /// Validates the payload and hashes the password into a domain `NewUser`.
    pub fn into_new_user(self) -> AuthFormResult<NewUser> {
        self.validate()?;

        let password_hash = hash_password(&self.password).map_err(|_| AuthFormError::Hash)?;

        Ok(NewUser::new(
            self.email,
            self.username,
            self.first_name,
            self.last_name,
            password_hash,
        ))
    }
}

/// JSON payload accepted when logging in.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginForm {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::auth::verify_password;

    fn base_form() -> SignupForm {
        SignupForm {
            email: "amelie@example.com".to_string(),
            username: "amelie".to_string(),
            first_name: "Amélie".to_string(),
            last_name: "Poulain".to_string(),
            password: "montmartre-23".to_string(),
        }
    }

    #[test]
    fn signup_form_hashes_password() {
        let new_user = base_form().into_new_user().expect("expected success");

        assert_eq!(new_user.email, "amelie@example.com");
        assert_ne!(new_user.password_hash, "montmartre-23");
        assert!(
            verify_password("montmartre-23", &new_user.password_hash)
                .expect("verify should succeed")
        );
    }

    #[test]
    fn signup_form_rejects_invalid_email() {
        let mut form = base_form();
        form.email = "not-an-email".to_string();

        let result = form.into_new_user();

        assert!(matches!(result, Err(AuthFormError::Validation(_))));
    }

    #[test]
    fn signup_form_rejects_short_password() {
        let mut form = base_form();
        form.password = "short".to_string();

        let result = form.into_new_user();

        assert!(matches!(result, Err(AuthFormError::Validation(_))));
    }
}
