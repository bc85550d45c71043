//! Login and signup form input

use diabetes_risk_shared::AuthError;
use secrecy::{ExposeSecret, SecretString};
use validator::{Validate, ValidationError, ValidationErrors};

/// Derived checks plus the password, which the derive cannot see
fn required_fields(form: &impl Validate, password: &SecretString) -> Result<(), ValidationErrors> {
    let mut errors = form.validate().err().unwrap_or_else(ValidationErrors::new);
    if password.expose_secret().trim().is_empty() {
        errors.add("password", ValidationError::new("required"));
    }
    if errors.errors().is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Login form
#[derive(Debug, Validate)]
pub struct Credentials {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    pub password: SecretString,
    /// Keep the username for the next login
    pub remember_me: bool,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into().trim().to_string(),
            password: SecretString::new(password.into()),
            remember_me: false,
        }
    }

    pub fn remember(mut self, remember_me: bool) -> Self {
        self.remember_me = remember_me;
        self
    }

    /// Which required fields are missing
    pub fn field_errors(&self) -> Result<(), ValidationErrors> {
        required_fields(self, &self.password)
    }

    pub fn check(&self) -> Result<(), AuthError> {
        self.field_errors().map_err(|_| AuthError::MissingCredentials)
    }
}

/// Signup form
#[derive(Debug, Validate)]
pub struct SignupForm {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    pub password: SecretString,
    pub confirm_password: SecretString,
}

impl SignupForm {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        confirm_password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into().trim().to_string(),
            password: SecretString::new(password.into()),
            confirm_password: SecretString::new(confirm_password.into()),
        }
    }

    /// The confirmation check runs first, before required-field checks
    pub fn check(&self) -> Result<(), AuthError> {
        if self.password.expose_secret() != self.confirm_password.expose_secret() {
            return Err(AuthError::PasswordMismatch);
        }
        self.field_errors().map_err(|_| AuthError::MissingCredentials)
    }

    /// Which required fields are missing
    pub fn field_errors(&self) -> Result<(), ValidationErrors> {
        required_fields(self, &self.password)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::faker::internet::en::Username;
    use fake::Fake;
    use rstest::rstest;

    #[test]
    fn test_credentials_require_both_fields() {
        let username: String = Username().fake();
        assert!(Credentials::new(username.clone(), "secret").check().is_ok());
        assert_eq!(
            Credentials::new("  ", "secret").check(),
            Err(AuthError::MissingCredentials)
        );
        assert_eq!(
            Credentials::new(username, "").check(),
            Err(AuthError::MissingCredentials)
        );
    }

    #[test]
    fn test_signup_password_mismatch() {
        let form = SignupForm::new("alice", "one", "two");
        let err = form.check().unwrap_err();
        assert_eq!(err, AuthError::PasswordMismatch);
        assert_eq!(err.to_string(), "Passwords do not match");
    }

    #[test]
    fn test_signup_matching_passwords() {
        let username: String = Username().fake();
        assert!(SignupForm::new(username, "pw", "pw").check().is_ok());
    }

    #[rstest]
    #[case("", "username")]
    #[case("   ", "username")]
    fn test_blank_username_names_the_field(#[case] username: &str, #[case] field: &str) {
        let errors = Credentials::new(username, "secret").field_errors().unwrap_err();
        assert!(errors.field_errors().contains_key(field));
        assert!(!errors.field_errors().contains_key("password"));
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn test_blank_password_names_the_field(#[case] password: &str) {
        let username: String = Username().fake();
        let errors = Credentials::new(username.clone(), password)
            .field_errors()
            .unwrap_err();
        assert!(errors.field_errors().contains_key("password"));
        assert!(!errors.field_errors().contains_key("username"));

        let errors = SignupForm::new(username, password, password)
            .field_errors()
            .unwrap_err();
        assert!(errors.field_errors().contains_key("password"));
        assert_eq!(
            SignupForm::new("bob", password, password).check(),
            Err(AuthError::MissingCredentials)
        );
    }
}
