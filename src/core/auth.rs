//! Authentication seam
//!
//! The sign-in backend lives outside this crate. Actions only need to hand
//! it the submitted credentials and tell its refusals apart from faults.

use crate::core::error::AuthError;
use crate::core::validation::RawForm;
use async_trait::async_trait;
use thiserror::Error;

/// Credentials submitted by the login form
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn from_form(form: &RawForm) -> Self {
        Self {
            email: form.get("email").unwrap_or_default().trim().to_string(),
            password: form.get("password").unwrap_or_default().to_string(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &"<redacted>")
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Failure of a sign-in attempt
#[derive(Debug, Error)]
pub enum SignInError {
    /// The backend refused the attempt; shown to the user
    #[error(transparent)]
    Auth(#[from] AuthError),
    /// Anything else; propagated to the caller
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Sign-in backend
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Attempt a sign-in with the given provider (e.g. `"credentials"`)
    async fn sign_in(&self, provider: &str, credentials: &Credentials) -> Result<(), SignInError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_from_form() {
        let form = RawForm::new()
            .with("email", " user@nextmail.com ")
            .with("password", "123456");
        let creds = Credentials::from_form(&form);
        assert_eq!(creds.email, "user@nextmail.com");
        assert_eq!(creds.password, "123456");
    }

    #[test]
    fn test_debug_redacts_email_and_password() {
        let creds = Credentials {
            email: "a@b.c".into(),
            password: "hunter2".into(),
        };
        let debug = format!("{:?}", creds);
        assert!(!debug.contains("hunter2"));
        assert!(!debug.contains("a@b.c"));
    }

    fn refuse() -> Result<(), SignInError> {
        let refused: Result<(), AuthError> = Err(AuthError::CredentialsSignin);
        refused?;
        Ok(())
    }

    fn fault() -> Result<(), SignInError> {
        let offline: anyhow::Result<()> = Err(anyhow::anyhow!("session store offline"));
        offline?;
        Ok(())
    }

    #[test]
    fn test_sign_in_error_conversions() {
        let err = refuse().unwrap_err();
        assert!(matches!(err, SignInError::Auth(AuthError::CredentialsSignin)));
        assert_eq!(err.to_string(), AuthError::CredentialsSignin.to_string());

        let err = fault().unwrap_err();
        assert!(matches!(err, SignInError::Other(_)));
        assert_eq!(err.to_string(), "session store offline");
    }
}
