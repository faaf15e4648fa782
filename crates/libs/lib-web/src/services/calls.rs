//! # Calls Service
//!
//! Demo calls are simulated: the request is acknowledged as pending and no
//! telephony provider is contacted.

use shared::{CallStatus, TestCallResponse};
use tracing::info;
use uuid::Uuid;

/// Quoted wait until the robot calls back.
pub const DEMO_CALL_WAIT: &str = "5 minutes";

/// Schedule a demo call to an already normalized `phone`.
pub fn schedule_test_call(phone: &str) -> TestCallResponse {
    let call_id = Uuid::new_v4().to_string();
    info!("[TEST CALL] Scheduled demo call {} to {}", call_id, phone);

    TestCallResponse {
        call_id,
        phone: phone.to_string(),
        status: CallStatus::Pending,
        estimated_wait: DEMO_CALL_WAIT.to_string(),
    }
}
