//! Login form action

use super::state::{ActionState, messages};
use crate::config::ActionsConfig;
use crate::core::auth::{Authenticator, Credentials, SignInError};
use crate::core::effects::{ActionOutcome, Effect, OutcomeKind};
use crate::core::error::AuthError;
use crate::core::validation::RawForm;
use std::sync::Arc;

/// Provider name passed to the backend for form logins
pub const CREDENTIALS_PROVIDER: &str = "credentials";

/// Login action backed by an external [`Authenticator`]
#[derive(Clone)]
pub struct AuthActions {
    authenticator: Arc<dyn Authenticator>,
    config: ActionsConfig,
}

impl AuthActions {
    pub fn new(authenticator: Arc<dyn Authenticator>, config: ActionsConfig) -> Self {
        Self {
            authenticator,
            config,
        }
    }

    /// Sign in with the submitted credentials
    ///
    /// Refusals from the backend become a message for the form. Faults that
    /// are not authentication errors are returned to the caller untouched.
    #[tracing::instrument(name = "authenticate", skip_all)]
    pub async fn authenticate(&self, input: &RawForm) -> anyhow::Result<ActionOutcome> {
        let credentials = Credentials::from_form(input);

        match self
            .authenticator
            .sign_in(CREDENTIALS_PROVIDER, &credentials)
            .await
        {
            Ok(()) => {
                tracing::info!("signed in");
                Ok(ActionOutcome::completed(
                    ActionState::default(),
                    vec![Effect::Redirect(self.config.after_login_path.clone())],
                ))
            }
            Err(SignInError::Auth(err)) => {
                tracing::warn!(error = %err, "sign-in refused");
                let message = match err {
                    AuthError::CredentialsSignin => messages::INVALID_CREDENTIALS,
                    AuthError::Other { .. } => messages::SOMETHING_WENT_WRONG,
                };
                Ok(ActionOutcome::halted(
                    OutcomeKind::Unauthorized,
                    ActionState::message(message),
                ))
            }
            Err(SignInError::Other(err)) => Err(err),
        }
    }
}
