//! # Service Traits
//!
//! Ports the flows depend on. The HTTP client and the in-process mock both
//! implement [`RemoteGateway`]; the file and memory stores implement
//! [`SessionStore`]. Tests swap implementations without touching the flows.

use crate::core::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared::{
    AuthResponse, OkResponse, PaymentIntent, ProcessKnowledgeResponse, ServiceType, Tariff,
    TestCallResponse, UserInfo,
};

/// Backend operations used by the client.
///
/// Authenticated calls take the bearer token explicitly; implementations return
/// [`crate::core::error::ClientError::Unauthorized`] when the backend rejects it.
#[async_trait]
pub trait RemoteGateway: Send + Sync {
    /// Text a verification code to `phone`.
    async fn request_code(&self, phone: &str) -> Result<OkResponse>;

    /// Check a code without consuming it.
    async fn verify_code(&self, phone: &str, code: &str) -> Result<OkResponse>;

    /// Create the account and sign in.
    async fn register(&self, phone: &str, code: &str, password: &str) -> Result<AuthResponse>;

    async fn login(&self, phone: &str, password: &str) -> Result<AuthResponse>;

    /// Current user for `token`.
    async fn profile(&self, token: &str) -> Result<UserInfo>;

    async fn test_call(&self, phone: &str) -> Result<TestCallResponse>;

    async fn process_knowledge(&self, text: &str) -> Result<ProcessKnowledgeResponse>;

    async fn tariffs(&self) -> Result<Vec<Tariff>>;

    /// Open a (mocked) payment for a tariff.
    async fn activate_service(
        &self,
        token: &str,
        service_type: ServiceType,
        tariff_id: &str,
    ) -> Result<PaymentIntent>;
}

/// What survives a restart: the bearer token and the user it belongs to.
///
/// Serialized with the fixed keys `token` and `user`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PersistedSession {
    pub token: String,
    pub user: UserInfo,
}

/// Single-writer persistence for [`PersistedSession`].
pub trait SessionStore: Send + Sync {
    /// `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> Result<Option<PersistedSession>>;

    fn save(&self, session: &PersistedSession) -> Result<()>;

    /// Remove the saved session. Clearing an empty store is not an error.
    fn clear(&self) -> Result<()>;
}
