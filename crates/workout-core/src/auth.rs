//! Auth forms
//!
//! Login and registration input, checked before anything is sent to the
//! hosted auth service.

use crate::domain::{AuthError, Identity, ValidationError};
use crate::store::AuthService;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), AuthError> {
        if self.email.trim().is_empty() {
            return Err(ValidationError::MissingField("email").into());
        }
        if self.password.is_empty() {
            return Err(ValidationError::MissingField("password").into());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    pub email: String,
    pub password: String,
    pub confirm: String,
}

impl RegistrationForm {
    pub fn validate(&self) -> Result<(), AuthError> {
        LoginForm {
            email: self.email.clone(),
            password: self.password.clone(),
        }
        .validate()?;
        if self.password != self.confirm {
            return Err(AuthError::PasswordMismatch);
        }
        Ok(())
    }
}

pub async fn login(auth: &dyn AuthService, form: &LoginForm) -> Result<Identity, AuthError> {
    form.validate()?;
    auth.sign_in(form.email.trim(), &form.password)
        .await
        .inspect_err(|err| log::warn!("[Auth] sign-in failed: {}", err))
}

pub async fn register(auth: &dyn AuthService, form: &RegistrationForm) -> Result<Identity, AuthError> {
    form.validate()?;
    auth.sign_up(form.email.trim(), &form.password)
        .await
        .inspect_err(|err| log::warn!("[Auth] sign-up failed: {}", err))
}

pub async fn logout(auth: &dyn AuthService) -> Result<(), AuthError> {
    auth.sign_out()
        .await
        .inspect_err(|err| log::warn!("[Auth] sign-out failed: {}", err))
}
