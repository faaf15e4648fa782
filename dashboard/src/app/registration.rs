//! # Registration Flow
//!
//! Four-step SMS registration: `Phone → Code → Password → Done`.
//!
//! Each forward step validates its input locally, then makes exactly one remote
//! call (request code, verify code, register) and only advances when that call
//! succeeds. A failed step keeps its state and surfaces the message; the user
//! retries by submitting again. Nothing retries automatically.
//!
//! ```text
//!   Phone ──request_code ok──▶ Code ──verify_code ok──▶ Password ──register ok──▶ Done
//!     ▲                         │  ▲                       │
//!     └─────────back────────────┘  └─────────back──────────┘
//! ```
//!
//! The flow does not persist anything: [`RegistrationFlow::submit_password`]
//! returns the [`AuthResponse`] and the caller stores the session
//! (see [`crate::app::App::register_password`]).

use crate::core::error::{check, ClientError, Result};
use crate::core::service::RemoteGateway;
use lib_utils::validation::{validate_password, validate_phone, validate_sms_code};
use shared::AuthResponse;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationStep {
    Phone,
    Code,
    Password,
    Done,
}

impl RegistrationStep {
    pub fn title(&self) -> &'static str {
        match self {
            RegistrationStep::Phone => "Enter your phone number",
            RegistrationStep::Code => "Enter the code from the SMS",
            RegistrationStep::Password => "Create a password",
            RegistrationStep::Done => "Registration complete",
        }
    }
}

pub struct RegistrationFlow {
    gateway: Arc<dyn RemoteGateway>,
    step: RegistrationStep,
    /// Normalized phone, set once the phone step has passed.
    phone: Option<String>,
    /// Set once the code step has passed.
    code: Option<String>,
    pending: bool,
    last_error: Option<String>,
}

impl RegistrationFlow {
    pub fn new(gateway: Arc<dyn RemoteGateway>) -> Self {
        Self {
            gateway,
            step: RegistrationStep::Phone,
            phone: None,
            code: None,
            pending: false,
            last_error: None,
        }
    }

    pub fn step(&self) -> RegistrationStep {
        self.step
    }

    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    /// A remote call was started and has not settled.
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Forget an abandoned request so the flow accepts input again.
    pub fn cancel_pending(&mut self) {
        if self.pending {
            tracing::warn!(step = ?self.step, "Pending registration request abandoned");
        }
        self.pending = false;
    }

    /// Send a code to `raw_phone` and move to [`RegistrationStep::Code`].
    #[tracing::instrument(skip(self, raw_phone))]
    pub async fn submit_phone(&mut self, raw_phone: &str) -> Result<RegistrationStep> {
        self.expect_step(RegistrationStep::Phone)?;
        let phone = self.local(check("phone", validate_phone(raw_phone)))?;

        self.pending = true;
        let result = self.gateway.request_code(&phone).await;
        self.pending = false;
        self.remote(result)?;

        tracing::info!(phone = %phone, "Code requested");
        self.phone = Some(phone);
        self.code = None;
        Ok(self.advance(RegistrationStep::Code))
    }

    /// Verify `raw_code` and move to [`RegistrationStep::Password`].
    #[tracing::instrument(skip(self, raw_code))]
    pub async fn submit_code(&mut self, raw_code: &str) -> Result<RegistrationStep> {
        self.expect_step(RegistrationStep::Code)?;
        let code = raw_code.trim().to_string();
        self.local(check("code", validate_sms_code(&code)))?;
        let phone = self.passed_phone()?;

        self.pending = true;
        let result = self.gateway.verify_code(&phone, &code).await;
        self.pending = false;
        self.remote(result)?;

        self.code = Some(code);
        Ok(self.advance(RegistrationStep::Password))
    }

    /// Create the account. On success the flow is [`RegistrationStep::Done`].
    #[tracing::instrument(skip(self, password))]
    pub async fn submit_password(&mut self, password: &str) -> Result<AuthResponse> {
        self.expect_step(RegistrationStep::Password)?;
        self.local(check("password", validate_password(password)))?;
        let phone = self.passed_phone()?;
        let code = self
            .code
            .clone()
            .ok_or_else(|| ClientError::InvalidTransition("code step not passed".to_string()))?;

        self.pending = true;
        let result = self.gateway.register(&phone, &code, password).await;
        self.pending = false;
        let auth = self.remote(result)?;

        tracing::info!(user_id = %auth.user.id, "Registration complete");
        self.advance(RegistrationStep::Done);
        Ok(auth)
    }

    /// Step back one screen. Phone and code are kept for re-display.
    ///
    /// No-op on `Phone`, on `Done` and while a request is pending.
    pub fn back(&mut self) -> RegistrationStep {
        if !self.pending {
            self.step = match self.step {
                RegistrationStep::Code => RegistrationStep::Phone,
                RegistrationStep::Password => RegistrationStep::Code,
                other => other,
            };
            self.last_error = None;
        }
        self.step
    }

    fn expect_step(&mut self, expected: RegistrationStep) -> Result<()> {
        if self.pending {
            return Err(ClientError::Busy);
        }
        if self.step == expected {
            return Ok(());
        }

        let err = if self.step == RegistrationStep::Done {
            ClientError::InvalidTransition("registration is already complete".to_string())
        } else {
            ClientError::InvalidTransition(format!(
                "expected step {:?}, current step is {:?}",
                expected, self.step
            ))
        };
        Err(self.fail(err))
    }

    fn passed_phone(&self) -> Result<String> {
        self.phone
            .clone()
            .ok_or_else(|| ClientError::InvalidTransition("phone step not passed".to_string()))
    }

    fn local<T>(&mut self, result: Result<T>) -> Result<T> {
        result.map_err(|err| self.fail(err))
    }

    fn remote<T>(&mut self, result: Result<T>) -> Result<T> {
        result.map_err(|err| {
            tracing::warn!(step = ?self.step, error = %err, "Registration step failed");
            self.fail(err)
        })
    }

    fn fail(&mut self, err: ClientError) -> ClientError {
        self.last_error = Some(err.to_string());
        err
    }

    fn advance(&mut self, next: RegistrationStep) -> RegistrationStep {
        self.step = next;
        self.last_error = None;
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::mock::MockGateway;
    use std::time::Duration;

    fn flow() -> (RegistrationFlow, Arc<MockGateway>) {
        let gateway = Arc::new(MockGateway::new());
        (RegistrationFlow::new(gateway.clone()), gateway)
    }

    async fn at_password() -> (RegistrationFlow, Arc<MockGateway>) {
        let (mut flow, gateway) = flow();
        flow.submit_phone("79991234567").await.unwrap();
        flow.submit_code("1234").await.unwrap();
        (flow, gateway)
    }

    #[tokio::test]
    async fn test_full_scenario() {
        let (mut flow, gateway) = flow();

        assert_eq!(flow.submit_phone("79991234567").await.unwrap(), RegistrationStep::Code);

        let err = flow.submit_code("12a4").await.unwrap_err();
        assert_eq!(err.field(), Some("code"));
        assert_eq!(flow.step(), RegistrationStep::Code);

        assert_eq!(flow.submit_code("1234").await.unwrap(), RegistrationStep::Password);

        let err = flow.submit_password("short").await.unwrap_err();
        assert_eq!(err.field(), Some("password"));
        assert_eq!(flow.step(), RegistrationStep::Password);

        let auth = flow.submit_password("Passw0rd").await.unwrap();
        assert_eq!(flow.step(), RegistrationStep::Done);
        assert_eq!(auth.user.phone, "79991234567");
        assert!(!auth.token.is_empty());

        // Local failures never reached the gateway
        assert_eq!(gateway.calls(), vec!["request_code", "verify_code", "register"]);
    }

    #[tokio::test]
    async fn test_phone_is_normalized() {
        let (mut flow, _) = flow();
        flow.submit_phone("+7 (999) 123-45-67").await.unwrap();
        assert_eq!(flow.phone(), Some("79991234567"));
    }

    #[tokio::test]
    async fn test_invalid_phone_stays_without_call() {
        let (mut flow, gateway) = flow();

        let err = flow.submit_phone("8999123456").await.unwrap_err();

        assert_eq!(err.field(), Some("phone"));
        assert_eq!(flow.step(), RegistrationStep::Phone);
        assert!(flow.phone().is_none());
        assert!(flow.last_error().is_some());
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn test_remote_failure_keeps_step_and_allows_retry() {
        let (mut flow, gateway) = flow();
        gateway.fail_next(ClientError::Remote("Failed to send SMS".to_string()));

        let err = flow.submit_phone("79991234567").await.unwrap_err();
        assert_eq!(err, ClientError::Remote("Failed to send SMS".to_string()));
        assert_eq!(flow.step(), RegistrationStep::Phone);
        assert!(flow.phone().is_none());
        assert_eq!(flow.last_error(), Some("Failed to send SMS"));

        assert_eq!(flow.submit_phone("79991234567").await.unwrap(), RegistrationStep::Code);
        assert!(flow.last_error().is_none());
    }

    #[tokio::test]
    async fn test_wrong_code_from_remote() {
        let (mut flow, gateway) = flow();
        flow.submit_phone("79991234567").await.unwrap();
        gateway.fail_next(ClientError::Remote("Invalid code".to_string()));

        assert!(flow.submit_code("0000").await.is_err());
        assert_eq!(flow.step(), RegistrationStep::Code);
        assert!(flow.code().is_none());
    }

    #[tokio::test]
    async fn test_failed_register_stays_on_password() {
        let (mut flow, gateway) = at_password().await;
        gateway.fail_next(ClientError::Remote("Phone already registered".to_string()));

        let err = flow.submit_password("Passw0rd").await.unwrap_err();

        assert_eq!(err, ClientError::Remote("Phone already registered".to_string()));
        assert_eq!(flow.step(), RegistrationStep::Password);
        assert_eq!(flow.last_error(), Some("Phone already registered"));
        assert!(!flow.is_pending());

        flow.submit_password("Passw0rd").await.unwrap();
        assert_eq!(flow.step(), RegistrationStep::Done);
    }

    #[tokio::test]
    async fn test_back_keeps_phone_and_code() {
        let (mut flow, _) = at_password().await;

        assert_eq!(flow.back(), RegistrationStep::Code);
        assert_eq!(flow.code(), Some("1234"));
        assert_eq!(flow.back(), RegistrationStep::Phone);
        assert_eq!(flow.phone(), Some("79991234567"));
        assert_eq!(flow.back(), RegistrationStep::Phone);
    }

    #[tokio::test]
    async fn test_submit_in_wrong_step() {
        let (mut flow, gateway) = flow();

        let err = flow.submit_code("1234").await.unwrap_err();
        assert!(matches!(err, ClientError::InvalidTransition(_)));

        let err = flow.submit_password("Passw0rd").await.unwrap_err();
        assert!(matches!(err, ClientError::InvalidTransition(_)));
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn test_done_is_terminal() {
        let (mut flow, _) = at_password().await;
        flow.submit_password("Passw0rd").await.unwrap();

        assert_eq!(flow.back(), RegistrationStep::Done);
        let err = flow.submit_phone("79991234567").await.unwrap_err();
        assert!(matches!(err, ClientError::InvalidTransition(_)));
    }

    #[tokio::test]
    async fn test_abandoned_request_blocks_until_cancelled() {
        let (mut flow, gateway) = flow();
        gateway.set_latency(Duration::from_secs(30));

        let abandoned =
            tokio::time::timeout(Duration::from_millis(20), flow.submit_phone("79991234567")).await;
        assert!(abandoned.is_err());
        assert!(flow.is_pending());

        gateway.set_latency(Duration::ZERO);
        assert_eq!(flow.submit_phone("79991234567").await.unwrap_err(), ClientError::Busy);
        assert_eq!(flow.back(), RegistrationStep::Phone);

        flow.cancel_pending();
        assert_eq!(flow.submit_phone("79991234567").await.unwrap(), RegistrationStep::Code);
    }
}
