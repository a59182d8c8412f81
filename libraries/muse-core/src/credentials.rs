//! Login and registration input checks.
//!
//! These run before any request is sent to the session authority.

use crate::error::{Result, ValidationError};

/// Email and password entered on the login screen
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

impl LoginCredentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        check_email(&self.email)?;
        if self.password.trim().is_empty() {
            return Err(ValidationError::PasswordRequired);
        }
        Ok(())
    }
}

/// Fields of the signup screen
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registration {
    pub name: String,
    pub lastname: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl Registration {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::NameRequired);
        }
        if self.lastname.trim().is_empty() {
            return Err(ValidationError::LastnameRequired);
        }
        check_email(&self.email)?;
        if self.password.trim().is_empty() {
            return Err(ValidationError::PasswordRequired);
        }
        if self.password != self.confirm_password {
            return Err(ValidationError::PasswordMismatch);
        }
        Ok(())
    }
}

fn check_email(email: &str) -> Result<()> {
    let email = email.trim();
    if email.is_empty() {
        return Err(ValidationError::EmailRequired);
    }
    if !email.contains('@') || !email.contains('.') {
        return Err(ValidationError::EmailInvalid);
    }
    Ok(())
}
