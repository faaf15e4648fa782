//! # Login Flow
//!
//! Phone + password sign-in. Like registration, the flow only talks to the
//! gateway; [`crate::app::App::login`] stores the session and navigates.

use crate::core::error::{check, ClientError, Result};
use crate::core::service::RemoteGateway;
use lib_utils::validation::{validate_login_password, validate_phone};
use shared::AuthResponse;
use std::sync::Arc;

pub struct LoginFlow {
    gateway: Arc<dyn RemoteGateway>,
    pending: bool,
    last_error: Option<String>,
}

impl LoginFlow {
    pub fn new(gateway: Arc<dyn RemoteGateway>) -> Self {
        Self {
            gateway,
            pending: false,
            last_error: None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn cancel_pending(&mut self) {
        self.pending = false;
    }

    #[tracing::instrument(skip(self, raw_phone, password))]
    pub async fn submit(&mut self, raw_phone: &str, password: &str) -> Result<AuthResponse> {
        if self.pending {
            return Err(ClientError::Busy);
        }

        let validated = check("phone", validate_phone(raw_phone))
            .and_then(|phone| check("password", validate_login_password(password)).map(|_| phone));
        let phone = match validated {
            Ok(phone) => phone,
            Err(err) => {
                self.last_error = Some(err.to_string());
                return Err(err);
            }
        };

        self.pending = true;
        let result = self.gateway.login(&phone, password).await;
        self.pending = false;

        match result {
            Ok(auth) => {
                tracing::info!(user_id = %auth.user.id, "Signed in");
                self.last_error = None;
                Ok(auth)
            }
            Err(err) => {
                tracing::warn!(error = %err, "Sign-in failed");
                self.last_error = Some(err.to_string());
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::mock::MockGateway;

    async fn registered_gateway() -> Arc<MockGateway> {
        let gateway = Arc::new(MockGateway::new());
        gateway.register("79991234567", "1234", "Passw0rd").await.unwrap();
        gateway
    }

    #[tokio::test]
    async fn test_login_success_with_formatted_phone() {
        let gateway = registered_gateway().await;
        let mut flow = LoginFlow::new(gateway);

        let auth = flow.submit("+7 (999) 123-45-67", "Passw0rd").await.unwrap();

        assert_eq!(auth.user.phone, "79991234567");
        assert!(flow.last_error().is_none());
    }

    #[tokio::test]
    async fn test_empty_password_rejected_locally() {
        let gateway = registered_gateway().await;
        let mut flow = LoginFlow::new(gateway.clone());

        let err = flow.submit("79991234567", "").await.unwrap_err();

        assert_eq!(err.field(), Some("password"));
        assert_eq!(gateway.calls(), vec!["register"]);
    }

    #[tokio::test]
    async fn test_wrong_password_surfaces_message() {
        let gateway = registered_gateway().await;
        let mut flow = LoginFlow::new(gateway);

        assert!(flow.submit("79991234567", "Wrong1234").await.is_err());
        assert_eq!(flow.last_error(), Some("Invalid phone number or password"));
        assert!(!flow.is_pending());
    }
}
