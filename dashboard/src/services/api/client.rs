//! # API Client
//!
//! Main HTTP client for backend API communication.

use crate::core::error::{ClientError, Result};
use crate::core::service::RemoteGateway;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use shared::{
    AuthResponse, ErrorResponse, OkResponse, PaymentIntent, ProcessKnowledgeResponse,
    ServiceType, Tariff, TestCallResponse, UserInfo,
};
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Default backend address (the backend's default `BIND_ADDRESS`).
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:3001";

/// Header the backend uses to correlate its logs with ours.
pub const REQUEST_ID_HEADER: &str = "X-Request-ID";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for communicating with the backend API server.
///
/// Every request is stamped with a fresh `X-Request-ID` and bounded by a
/// 10 second timeout, so a request always settles.
pub struct ApiClient {
    pub(crate) client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the backend at `base_url` (trailing `/` ignored).
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ClientError::Remote(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send `request` and decode a success body as `T`.
    ///
    /// `401` maps to [`ClientError::Unauthorized`]; any other failure becomes
    /// [`ClientError::Remote`] carrying the backend's `error` message when present.
    pub(crate) async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let request_id = Uuid::new_v4().to_string();
        let start = Instant::now();

        let response = request
            .header(REQUEST_ID_HEADER, &request_id)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(request_id = %request_id, error = %e, "Network error");
                ClientError::Remote(format!("Network error: {}", e))
            })?;

        let status = response.status();
        let duration_ms = start.elapsed().as_millis() as u64;

        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!(request_id = %request_id, duration_ms, "Request unauthorized");
            return Err(ClientError::Unauthorized);
        }

        if status.is_success() {
            tracing::debug!(request_id = %request_id, status = status.as_u16(), duration_ms, "Request succeeded");
            return response.json::<T>().await.map_err(|e| {
                tracing::error!(request_id = %request_id, error = %e, "Response parse error");
                ClientError::Remote(format!("Failed to parse response: {}", e))
            });
        }

        let message = match response.json::<ErrorResponse>().await {
            Ok(body) => body.error,
            Err(_) => format!("Request failed with status {}", status.as_u16()),
        };

        tracing::warn!(
            request_id = %request_id,
            status = status.as_u16(),
            error = %message,
            duration_ms,
            "Request failed"
        );
        Err(ClientError::Remote(message))
    }
}

#[async_trait::async_trait]
impl RemoteGateway for ApiClient {
    async fn request_code(&self, phone: &str) -> Result<OkResponse> {
        crate::services::api::auth::request_code(self, phone).await
    }

    async fn verify_code(&self, phone: &str, code: &str) -> Result<OkResponse> {
        crate::services::api::auth::verify_code(self, phone, code).await
    }

    async fn register(&self, phone: &str, code: &str, password: &str) -> Result<AuthResponse> {
        crate::services::api::auth::register(self, phone, code, password).await
    }

    async fn login(&self, phone: &str, password: &str) -> Result<AuthResponse> {
        crate::services::api::auth::login(self, phone, password).await
    }

    async fn profile(&self, token: &str) -> Result<UserInfo> {
        crate::services::api::auth::profile(self, token).await
    }

    async fn test_call(&self, phone: &str) -> Result<TestCallResponse> {
        crate::services::api::dashboard::test_call(self, phone).await
    }

    async fn process_knowledge(&self, text: &str) -> Result<ProcessKnowledgeResponse> {
        crate::services::api::dashboard::process_knowledge(self, text).await
    }

    async fn tariffs(&self) -> Result<Vec<Tariff>> {
        crate::services::api::dashboard::tariffs(self).await
    }

    async fn activate_service(
        &self,
        token: &str,
        service_type: ServiceType,
        tariff_id: &str,
    ) -> Result<PaymentIntent> {
        crate::services::api::dashboard::activate_service(self, token, service_type, tariff_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash() {
        let client = ApiClient::new("http://localhost:3001/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:3001");
        assert_eq!(client.url("/login"), "http://localhost:3001/login");
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_remote_error() {
        // Port 9 (discard) is closed on test machines
        let client = ApiClient::new("http://127.0.0.1:9").unwrap();

        let err = client.tariffs().await.unwrap_err();

        match err {
            ClientError::Remote(message) => assert!(message.starts_with("Network error")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
