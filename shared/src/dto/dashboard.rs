//! # Dashboard DTOs
//!
//! Data exchanged by the onboarding tabs of the personal dashboard.
//!
//! ## Endpoints Using These DTOs
//!
//! - `POST /api/test-call` - [`TestCallRequest`] -> [`TestCallResponse`]
//! - `POST /api/process-knowledge` - [`ProcessKnowledgeRequest`] -> [`ProcessKnowledgeResponse`]
//! - `GET /api/tariffs` -> `Vec<`[`Tariff`]`>`
//! - `POST /api/payments/activate` - [`ActivateServiceRequest`] -> [`PaymentIntent`]
//!
//! [`Integration`] and [`CallSettings`] are kept client-side only; they are
//! defined here so the client state serializes with the same field names.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Request a demo call from the robot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TestCallRequest {
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script: Option<String>,
}

/// Synthetic result of a demo call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TestCallResponse {
    pub call_id: String,
    pub phone: String,
    pub status: CallStatus,
    /// Expected wait before the robot calls back.
    pub estimated_wait: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CallStatus {
    Pending,
    Completed,
    Missed,
}

/// Free text to turn into knowledge-base entries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProcessKnowledgeRequest {
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProcessKnowledgeResponse {
    pub items: Vec<KnowledgeItem>,
    pub message: String,
}

/// One question/answer pair the robot can use during a call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct KnowledgeItem {
    pub id: String,
    pub question: String,
    pub answer: String,
    pub category: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum IntegrationKind {
    Crm,
    Api,
    Webhook,
}

/// External system the robot reports call results to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Integration {
    pub id: String,
    pub kind: IntegrationKind,
    pub name: String,
    pub api_key: String,
    pub url: String,
    pub is_active: bool,
}

/// Quiet hours during which the robot places no calls.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DoNotDisturb {
    pub enabled: bool,
    /// `HH:MM`, 24-hour clock.
    pub start_time: String,
    /// `HH:MM`, 24-hour clock.
    pub end_time: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CallSettings {
    pub do_not_disturb: DoNotDisturb,
    pub phone_numbers: Vec<String>,
    pub max_concurrent_calls: u32,
}

impl Default for CallSettings {
    fn default() -> Self {
        Self {
            do_not_disturb: DoNotDisturb {
                enabled: false,
                start_time: "22:00".to_string(),
                end_time: "08:00".to_string(),
            },
            phone_numbers: Vec::new(),
            max_concurrent_calls: 5,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ServiceType {
    Incoming,
    Outgoing,
}

/// A prepaid package of call minutes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tariff {
    pub id: String,
    pub name: String,
    pub minutes: u32,
    /// Price in whole rubles.
    pub price: i64,
    pub features: Vec<String>,
    #[serde(default)]
    pub is_popular: bool,
}

/// Tariff preselected on the payment page.
pub const DEFAULT_TARIFF_ID: &str = "business";

/// The fixed tariff catalogue offered on the payment page.
pub fn tariff_catalog() -> Vec<Tariff> {
    fn features(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    vec![
        Tariff {
            id: "start".to_string(),
            name: "Start".to_string(),
            minutes: 500,
            price: 490,
            features: features(&[
                "500 call minutes",
                "Basic knowledge base",
                "Email support",
                "Call reports",
            ]),
            is_popular: false,
        },
        Tariff {
            id: "business".to_string(),
            name: "Business".to_string(),
            minutes: 2000,
            price: 1490,
            features: features(&[
                "2000 call minutes",
                "Extended knowledge base",
                "CRM integration",
                "Priority support",
                "Detailed analytics",
            ]),
            is_popular: true,
        },
        Tariff {
            id: "pro".to_string(),
            name: "Pro".to_string(),
            minutes: 10000,
            price: 4990,
            features: features(&[
                "10000 call minutes",
                "Unlimited knowledge base",
                "All integrations",
                "Personal manager",
                "API access",
                "Custom scripts",
            ]),
            is_popular: false,
        },
    ]
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActivateServiceRequest {
    pub service_type: ServiceType,
    pub tariff_id: String,
}

/// Payment placeholder returned by the mocked payment endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaymentIntent {
    pub id: String,
    pub tariff_id: String,
    pub service_type: ServiceType,
    /// Amount in whole rubles.
    pub amount: i64,
    pub currency: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}
