//! # SMS Service
//!
//! Delivery of registration codes.
//!
//! The backend only depends on the [`SmsSender`] trait. Two implementations exist:
//!
//! - [`SmsRuSender`] - sends through the sms.ru HTTP API (`GET /sms/send?...&json=1`)
//! - [`LogSmsSender`] - writes the code to the log; selected when `SMSRU_API_ID` is unset
//!
//! ## Usage
//!
//! ```rust,no_run
//! use lib_web::services::sms::{generate_code, LogSmsSender, SmsSender};
//!
//! # async fn example() -> lib_core::Result<()> {
//! let sender = LogSmsSender;
//! let code = generate_code();
//! sender.send_code("79991234567", &code).await?;
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use lib_core::AppError;
use rand::Rng;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, warn};

const SMSRU_SEND_URL: &str = "https://sms.ru/sms/send";

/// Random 4-digit verification code (`1000..=9999`).
pub fn generate_code() -> String {
    rand::rng().random_range(1000..=9999).to_string()
}

/// Text of the message carrying `code`.
pub fn code_message(code: &str) -> String {
    format!("Your code: {}", code)
}

/// Outbound SMS channel for verification codes.
#[async_trait]
pub trait SmsSender: Send + Sync {
    /// Deliver `code` to `phone` (normalized digits).
    ///
    /// Returns [`AppError::Sms`] when the provider rejects the message.
    async fn send_code(&self, phone: &str, code: &str) -> Result<(), AppError>;
}

// region: --- sms.ru

/// Response body of sms.ru with `json=1`.
#[derive(Debug, Deserialize)]
struct SmsRuResponse {
    status: String,
    #[serde(default)]
    status_text: Option<String>,
}

/// Sender backed by the sms.ru HTTP API.
pub struct SmsRuSender {
    client: reqwest::Client,
    api_id: String,
    send_url: String,
}

impl SmsRuSender {
    pub fn new(api_id: impl Into<String>) -> Result<Self, AppError> {
        Self::with_url(api_id, SMSRU_SEND_URL)
    }

    /// Point the sender at a different endpoint (used by tests).
    pub fn with_url(api_id: impl Into<String>, send_url: impl Into<String>) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_id: api_id.into(),
            send_url: send_url.into(),
        })
    }
}

#[async_trait]
impl SmsSender for SmsRuSender {
    async fn send_code(&self, phone: &str, code: &str) -> Result<(), AppError> {
        debug!("[SMS] Sending code via sms.ru to {}", phone);

        let message = code_message(code);
        let response = self
            .client
            .get(&self.send_url)
            .query(&[
                ("api_id", self.api_id.as_str()),
                ("to", phone),
                ("msg", message.as_str()),
                ("json", "1"),
            ])
            .send()
            .await
            .map_err(|e| AppError::Sms(format!("sms.ru request failed: {}", e)))?;

        let body: SmsRuResponse = response
            .json()
            .await
            .map_err(|e| AppError::Sms(format!("sms.ru returned unreadable body: {}", e)))?;

        if body.status != "OK" {
            warn!("[SMS] sms.ru rejected message: {:?}", body.status_text);
            return Err(AppError::Sms(format!(
                "sms.ru status {}: {}",
                body.status,
                body.status_text.unwrap_or_default()
            )));
        }

        info!("[SMS] Code delivered to sms.ru for {}", phone);
        Ok(())
    }
}
// endregion: --- sms.ru

// region: --- Log only

/// Development sender: the code only appears in the server log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSmsSender;

#[async_trait]
impl SmsSender for LogSmsSender {
    async fn send_code(&self, phone: &str, code: &str) -> Result<(), AppError> {
        info!("[SMS] (log only) code for {}: {}", phone, code);
        Ok(())
    }
}
// endregion: --- Log only
