//! # Dashboard Endpoints
//!
//! Demo calls, knowledge processing, tariffs and payments.

use super::client::ApiClient;
use crate::core::error::Result;
use shared::{
    ActivateServiceRequest, PaymentIntent, ProcessKnowledgeRequest, ProcessKnowledgeResponse,
    ServiceType, Tariff, TestCallRequest, TestCallResponse,
};

#[tracing::instrument(skip(client), fields(phone = %phone))]
pub async fn test_call(client: &ApiClient, phone: &str) -> Result<TestCallResponse> {
    let request = TestCallRequest {
        phone: phone.to_string(),
        script: None,
    };

    client
        .send(client.client.post(client.url("/api/test-call")).json(&request))
        .await
}

#[tracing::instrument(skip(client, text), fields(text_len = text.len()))]
pub async fn process_knowledge(client: &ApiClient, text: &str) -> Result<ProcessKnowledgeResponse> {
    let request = ProcessKnowledgeRequest {
        text: text.to_string(),
    };

    client
        .send(client.client.post(client.url("/api/process-knowledge")).json(&request))
        .await
}

pub async fn tariffs(client: &ApiClient) -> Result<Vec<Tariff>> {
    client.send(client.client.get(client.url("/api/tariffs"))).await
}

#[tracing::instrument(skip(client, token))]
pub async fn activate_service(
    client: &ApiClient,
    token: &str,
    service_type: ServiceType,
    tariff_id: &str,
) -> Result<PaymentIntent> {
    let request = ActivateServiceRequest {
        service_type,
        tariff_id: tariff_id.to_string(),
    };

    client
        .send(
            client
                .client
                .post(client.url("/api/payments/activate"))
                .bearer_auth(token)
                .json(&request),
        )
        .await
}
