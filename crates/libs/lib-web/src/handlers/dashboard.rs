//! # Dashboard Handlers
//!
//! Endpoints behind the onboarding tabs. Calls and payments are simulated;
//! see [`crate::services::calls`] and [`crate::services::billing`].

use axum::{
    extract::{Extension, Json},
    http::StatusCode,
};
use lib_auth::Claims;
use lib_core::AppError;
use lib_utils::validation::{validate_knowledge_text, validate_phone};
use shared::{
    tariff_catalog, ActivateServiceRequest, PaymentIntent, ProcessKnowledgeRequest,
    ProcessKnowledgeResponse, Tariff, TestCallRequest, TestCallResponse,
};
use tracing::{info, instrument};

use crate::services::{billing, calls, knowledge};

/// Schedule a demo call.
#[instrument(skip(req), fields(phone = %req.phone))]
pub async fn test_call(Json(req): Json<TestCallRequest>) -> Result<Json<TestCallResponse>, AppError> {
    let phone = validate_phone(&req.phone).map_err(AppError::InvalidInput)?;
    Ok(Json(calls::schedule_test_call(&phone)))
}

/// Parse free text into knowledge-base entries.
#[instrument(skip_all, fields(chars = req.text.chars().count()))]
pub async fn process_knowledge(
    Json(req): Json<ProcessKnowledgeRequest>,
) -> Result<Json<ProcessKnowledgeResponse>, AppError> {
    validate_knowledge_text(&req.text).map_err(AppError::InvalidInput)?;

    let items = knowledge::parse_knowledge(&req.text);
    info!("[KNOWLEDGE] Parsed {} entries", items.len());

    Ok(Json(ProcessKnowledgeResponse {
        items,
        message: "Knowledge base processed".to_string(),
    }))
}

pub async fn tariffs() -> Json<Vec<Tariff>> {
    Json(tariff_catalog())
}

/// Create a payment intent for a tariff (bearer).
#[instrument(skip(claims, req), fields(user_id = %claims.sub, tariff = %req.tariff_id))]
pub async fn activate_service(
    Extension(claims): Extension<Claims>,
    Json(req): Json<ActivateServiceRequest>,
) -> Result<(StatusCode, Json<PaymentIntent>), AppError> {
    let intent = billing::create_payment_intent(req.service_type, &req.tariff_id)?;
    info!(
        "[PAYMENT] Intent {} for user {}: {} {}",
        intent.id, claims.sub, intent.amount, intent.currency
    );
    Ok((StatusCode::CREATED, Json(intent)))
}
