//! # Mock Gateway
//!
//! In-process stand-in for the backend, used for offline demos
//! (`DASHBOARD_MOCK=1`) and in tests.
//!
//! Behaviour follows the demo backend: any well-formed 4-digit code verifies,
//! accounts live in memory for the lifetime of the gateway, and demo calls
//! complete immediately. Tests can queue a failure with [`MockGateway::fail_next`]
//! and inspect which operations reached the gateway with [`MockGateway::calls`].
//! [`MockGateway::set_latency`] delays every call, like a slow network.

use crate::core::error::{ClientError, Result};
use crate::core::service::RemoteGateway;
use async_trait::async_trait;
use chrono::Utc;
use lib_utils::{format_time, now_utc};
use parking_lot::Mutex;
use shared::{
    tariff_catalog, AuthResponse, CallStatus, KnowledgeItem, OkResponse, PaymentIntent,
    ProcessKnowledgeResponse, ServiceType, Tariff, TestCallResponse, UserInfo,
};
use std::collections::HashMap;
use std::time::Duration;
use uuid::Uuid;

struct MockAccount {
    user: UserInfo,
    password: String,
    token: String,
}

#[derive(Default)]
struct MockState {
    accounts: HashMap<String, MockAccount>,
    next_user_id: u64,
    fail_next: Option<ClientError>,
    calls: Vec<&'static str>,
    latency: Duration,
}

#[derive(Default)]
pub struct MockGateway {
    state: Mutex<MockState>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next gateway call fail with `error`.
    pub fn fail_next(&self, error: ClientError) {
        self.state.lock().fail_next = Some(error);
    }

    /// Names of the operations called so far, in order.
    pub fn calls(&self) -> Vec<&'static str> {
        self.state.lock().calls.clone()
    }

    /// Invalidate every issued token, as if they all expired.
    pub fn expire_sessions(&self) {
        for account in self.state.lock().accounts.values_mut() {
            account.token = new_token();
        }
    }

    /// Delay every following call by `latency`.
    pub fn set_latency(&self, latency: Duration) {
        self.state.lock().latency = latency;
    }

    async fn begin(&self, operation: &'static str) -> Result<()> {
        let latency = {
            let mut state = self.state.lock();
            state.calls.push(operation);
            state.latency
        };

        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }

        match self.state.lock().fail_next.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn user_for_token(&self, token: &str) -> Result<UserInfo> {
        self.state
            .lock()
            .accounts
            .values()
            .find(|account| account.token == token)
            .map(|account| account.user.clone())
            .ok_or(ClientError::Unauthorized)
    }
}

fn new_token() -> String {
    format!("mock_token_{}", Uuid::new_v4().simple())
}

#[async_trait]
impl RemoteGateway for MockGateway {
    async fn request_code(&self, phone: &str) -> Result<OkResponse> {
        self.begin("request_code").await?;
        tracing::info!(phone = %phone, "Mock SMS sent");
        Ok(OkResponse::with_message("Code sent"))
    }

    async fn verify_code(&self, _phone: &str, code: &str) -> Result<OkResponse> {
        self.begin("verify_code").await?;
        if lib_utils::validation::validate_sms_code(code).is_err() {
            return Err(ClientError::Remote("Invalid code".to_string()));
        }
        Ok(OkResponse::with_message("Code verified"))
    }

    async fn register(&self, phone: &str, _code: &str, password: &str) -> Result<AuthResponse> {
        self.begin("register").await?;
        let mut state = self.state.lock();
        if state.accounts.contains_key(phone) {
            return Err(ClientError::Remote("User already exists".to_string()));
        }

        state.next_user_id += 1;
        let user = UserInfo {
            id: format!("user_{}", state.next_user_id),
            phone: phone.to_string(),
            email: None,
            balance: 0,
            is_active: true,
            created_at: format_time(now_utc()),
        };
        let token = new_token();

        state.accounts.insert(
            phone.to_string(),
            MockAccount {
                user: user.clone(),
                password: password.to_string(),
                token: token.clone(),
            },
        );

        Ok(AuthResponse {
            user,
            token,
            message: "Registration successful".to_string(),
        })
    }

    async fn login(&self, phone: &str, password: &str) -> Result<AuthResponse> {
        self.begin("login").await?;
        let state = self.state.lock();
        match state.accounts.get(phone) {
            Some(account) if account.password == password => Ok(AuthResponse {
                user: account.user.clone(),
                token: account.token.clone(),
                message: "Login successful".to_string(),
            }),
            _ => Err(ClientError::Remote(
                "Invalid phone number or password".to_string(),
            )),
        }
    }

    async fn profile(&self, token: &str) -> Result<UserInfo> {
        self.begin("profile").await?;
        self.user_for_token(token)
    }

    async fn test_call(&self, phone: &str) -> Result<TestCallResponse> {
        self.begin("test_call").await?;
        Ok(TestCallResponse {
            call_id: format!("call_{}", Uuid::new_v4().simple()),
            phone: phone.to_string(),
            status: CallStatus::Completed,
            estimated_wait: "0 minutes".to_string(),
        })
    }

    async fn process_knowledge(&self, text: &str) -> Result<ProcessKnowledgeResponse> {
        self.begin("process_knowledge").await?;
        Ok(ProcessKnowledgeResponse {
            items: vec![KnowledgeItem {
                id: format!("kb_{}", Uuid::new_v4().simple()),
                question: "General question".to_string(),
                answer: text.trim().to_string(),
                category: "general".to_string(),
                is_active: true,
            }],
            message: "Knowledge base processed".to_string(),
        })
    }

    async fn tariffs(&self) -> Result<Vec<Tariff>> {
        self.begin("tariffs").await?;
        Ok(tariff_catalog())
    }

    async fn activate_service(
        &self,
        token: &str,
        service_type: ServiceType,
        tariff_id: &str,
    ) -> Result<PaymentIntent> {
        self.begin("activate_service").await?;
        self.user_for_token(token)?;

        let tariff = tariff_catalog()
            .into_iter()
            .find(|t| t.id == tariff_id)
            .ok_or_else(|| ClientError::Remote(format!("Unknown tariff: {}", tariff_id)))?;

        Ok(PaymentIntent {
            id: Uuid::new_v4().to_string(),
            tariff_id: tariff.id,
            service_type,
            amount: tariff.price,
            currency: "RUB".to_string(),
            status: "pending".to_string(),
            created_at: Utc::now(),
        })
    }
}
