//! # Dashboard Handlers
//!
//! One handler per onboarding tab. Each validates locally first, updates
//! [`crate::app::AppState`] through the reducer and marks its step complete
//! only on success.

use crate::app::state::Action;
use crate::app::step_gate::StepStatus;
use crate::app::App;
use crate::core::error::{check, ClientError, Result};
use lib_utils::validation::{
    validate_integration, validate_knowledge_text, validate_max_concurrent_calls, validate_phone,
    validate_time_of_day,
};
use shared::{parse_phone_list, CallSettings, Integration, IntegrationKind, KnowledgeItem, TestCallResponse};
use uuid::Uuid;

/// Integration form input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegrationDraft {
    pub kind: IntegrationKind,
    pub name: String,
    pub api_key: String,
    pub url: String,
}

impl App {
    /// Switch dashboard tabs; locked tabs are ignored.
    pub fn select_step(&mut self, step_id: &str) -> bool {
        self.gate.select_step(step_id)
    }

    /// Turn free text into knowledge-base entries.
    #[tracing::instrument(skip(self, text))]
    pub async fn process_knowledge(&mut self, text: &str) -> Result<&[KnowledgeItem]> {
        self.ensure_unlocked("knowledge")?;
        check("text", validate_knowledge_text(text))?;

        let result = self.gateway.process_knowledge(text.trim()).await;
        let response = self.guarded(result)?;
        tracing::info!(items = response.items.len(), "Knowledge base processed");

        self.state.apply(Action::KnowledgeLoaded(response.items));
        self.gate.complete("knowledge");
        Ok(&self.state.knowledge_base)
    }

    pub fn save_integration(&mut self, draft: IntegrationDraft) -> Result<Integration> {
        self.ensure_unlocked("integrations")?;
        let field = if draft.api_key.trim().is_empty() { "api_key" } else { "url" };
        check(field, validate_integration(&draft.api_key, &draft.url))?;

        let name = match draft.name.trim() {
            "" => default_integration_name(draft.kind).to_string(),
            name => name.to_string(),
        };
        let integration = Integration {
            id: Uuid::new_v4().to_string(),
            kind: draft.kind,
            name,
            api_key: draft.api_key.trim().to_string(),
            url: draft.url.trim().to_string(),
            is_active: true,
        };
        tracing::info!(id = %integration.id, kind = ?integration.kind, "Integration saved");

        self.state.apply(Action::IntegrationAdded(integration.clone()));
        self.gate.complete("integrations");
        Ok(integration)
    }

    /// Load numbers to call from pasted text, one per line.
    pub fn import_phone_numbers(&mut self, text: &str) -> Result<usize> {
        let numbers = parse_phone_list(text);
        if numbers.is_empty() {
            return Err(ClientError::validation("phone_numbers", "No valid phone numbers found"));
        }

        let count = numbers.len();
        self.state.apply(Action::PhoneNumbersImported(numbers));
        Ok(count)
    }

    pub fn save_settings(&mut self, settings: CallSettings) -> Result<()> {
        self.ensure_unlocked("settings")?;
        let dnd = &settings.do_not_disturb;
        check("start_time", validate_time_of_day(&dnd.start_time, "Start time"))?;
        check("end_time", validate_time_of_day(&dnd.end_time, "End time"))?;
        check(
            "max_concurrent_calls",
            validate_max_concurrent_calls(settings.max_concurrent_calls),
        )?;

        self.state.apply(Action::CallSettingsSaved(settings));
        self.gate.complete("settings");
        Ok(())
    }

    /// Balance of the signed-in user, in whole rubles.
    pub fn balance(&self) -> Option<i64> {
        self.state.user.as_ref().map(|user| user.balance)
    }

    pub fn complete_balance(&mut self) -> Result<()> {
        self.ensure_unlocked("balance")?;
        self.gate.complete("balance");
        Ok(())
    }

    /// Ask the robot to call `raw_phone` as a demo.
    pub async fn test_call(&mut self, raw_phone: &str) -> Result<TestCallResponse> {
        let phone = check("phone", validate_phone(raw_phone))?;
        let result = self.gateway.test_call(&phone).await;
        self.guarded(result)
    }

    fn ensure_unlocked(&self, step_id: &str) -> Result<()> {
        if self.gate.status(step_id) == StepStatus::Locked {
            tracing::warn!(step_id, "Action on locked step refused");
            return Err(ClientError::InvalidTransition(format!("step {step_id} is locked")));
        }
        Ok(())
    }
}

fn default_integration_name(kind: IntegrationKind) -> &'static str {
    match kind {
        IntegrationKind::Crm => "CRM",
        IntegrationKind::Api => "API",
        IntegrationKind::Webhook => "Webhook",
    }
}
