//! # Billing Service
//!
//! Tariff lookup and payment intents. Payments are mocked: an intent is created
//! in `pending` state and nothing is charged.

use chrono::Utc;
use lib_core::AppError;
use shared::{tariff_catalog, PaymentIntent, ServiceType, Tariff};
use uuid::Uuid;

pub const CURRENCY: &str = "RUB";

pub fn find_tariff(tariff_id: &str) -> Option<Tariff> {
    tariff_catalog().into_iter().find(|t| t.id == tariff_id)
}

/// Create a pending payment intent for `tariff_id`.
pub fn create_payment_intent(
    service_type: ServiceType,
    tariff_id: &str,
) -> Result<PaymentIntent, AppError> {
    let tariff = find_tariff(tariff_id)
        .ok_or_else(|| AppError::NotFound(format!("Unknown tariff: {}", tariff_id)))?;

    Ok(PaymentIntent {
        id: Uuid::new_v4().to_string(),
        tariff_id: tariff.id,
        service_type,
        amount: tariff.price,
        currency: CURRENCY.to_string(),
        status: "pending".to_string(),
        created_at: Utc::now(),
    })
}
