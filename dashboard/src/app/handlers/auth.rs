//! # Authentication Handlers
//!
//! Registration, login and profile actions. Successful sign-ins go through
//! `App::sign_in`, which persists the session and opens the dashboard.

use crate::app::registration::RegistrationStep;
use crate::app::state::Action;
use crate::app::App;
use crate::core::error::Result;
use shared::{AuthResponse, UserInfo};

impl App {
    pub async fn register_phone(&mut self, raw_phone: &str) -> Result<RegistrationStep> {
        self.registration.submit_phone(raw_phone).await
    }

    pub async fn register_code(&mut self, raw_code: &str) -> Result<RegistrationStep> {
        self.registration.submit_code(raw_code).await
    }

    /// Final registration step; signs the new user in.
    pub async fn register_password(&mut self, password: &str) -> Result<AuthResponse> {
        let auth = self.registration.submit_password(password).await?;
        Ok(self.sign_in(auth))
    }

    pub fn register_back(&mut self) -> RegistrationStep {
        self.registration.back()
    }

    pub async fn login(&mut self, raw_phone: &str, password: &str) -> Result<AuthResponse> {
        let auth = self.login_flow.submit(raw_phone, password).await?;
        Ok(self.sign_in(auth))
    }

    /// Reload the signed-in user, e.g. after a top-up changed the balance.
    #[tracing::instrument(skip(self))]
    pub async fn refresh_profile(&mut self) -> Result<UserInfo> {
        let result = match self.token() {
            Ok(token) => self.gateway.profile(&token).await,
            Err(err) => Err(err),
        };
        let user = self.guarded(result)?;

        self.state.apply(Action::UserRefreshed(user.clone()));
        Ok(user)
    }
}
