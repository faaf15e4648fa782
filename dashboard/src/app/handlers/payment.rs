//! # Payment Handlers
//!
//! Tariff page: refresh the catalogue, pick a tariff and activate it. Activation
//! only returns a payment placeholder; no money moves.

use crate::app::App;
use crate::core::error::{ClientError, Result};
use shared::{PaymentIntent, ServiceType, Tariff};

impl App {
    /// Replace the built-in catalogue with the backend's.
    pub async fn load_tariffs(&mut self) -> Result<&[Tariff]> {
        let result = self.gateway.tariffs().await;
        let tariffs = self.guarded(result)?;

        self.tariffs.replace_catalog(tariffs);
        Ok(self.tariffs.tariffs())
    }

    pub fn select_tariff(&mut self, tariff_id: &str) -> bool {
        self.tariffs.select(tariff_id)
    }

    pub fn set_service_type(&mut self, service_type: ServiceType) {
        self.tariffs.set_service_type(service_type);
    }

    /// Activate the selected tariff for the signed-in user.
    #[tracing::instrument(skip(self))]
    pub async fn activate_service(&mut self) -> Result<PaymentIntent> {
        let tariff_id = self
            .tariffs
            .selected()
            .map(|t| t.id.clone())
            .ok_or_else(|| ClientError::validation("tariff", "Choose a tariff"))?;
        let service_type = self.tariffs.service_type();

        let result = match self.token() {
            Ok(token) => {
                self.gateway
                    .activate_service(&token, service_type, &tariff_id)
                    .await
            }
            Err(err) => Err(err),
        };
        let intent = self.guarded(result)?;

        tracing::info!(payment_id = %intent.id, tariff_id = %intent.tariff_id, "Payment created");
        Ok(intent)
    }
}

#[cfg(test)]
mod tests {
    use crate::app::{App, Screen};
    use crate::core::error::ClientError;
    use crate::core::service::{RemoteGateway, SessionStore};
    use crate::services::{MemorySessionStore, MockGateway};
    use shared::ServiceType;
    use std::sync::Arc;

    async fn signed_in() -> (App, Arc<MockGateway>, Arc<MemorySessionStore>) {
        let gateway = Arc::new(MockGateway::new());
        let store = Arc::new(MemorySessionStore::new());
        gateway.register("79991234567", "1234", "Passw0rd").await.unwrap();
        let mut app = App::new(gateway.clone(), store.clone());
        app.login("79991234567", "Passw0rd").await.unwrap();
        app.navigate(Screen::Payment);
        (app, gateway, store)
    }

    #[tokio::test]
    async fn test_activate_default_tariff() {
        let (mut app, _, _) = signed_in().await;
        assert_eq!(app.load_tariffs().await.unwrap().len(), 3);

        let intent = app.activate_service().await.unwrap();

        assert_eq!(intent.tariff_id, "business");
        assert_eq!(intent.amount, 1490);
        assert_eq!(intent.service_type, ServiceType::Outgoing);
        assert_eq!(intent.status, "pending");
    }

    #[tokio::test]
    async fn test_unknown_tariff_keeps_selection() {
        let (mut app, _, _) = signed_in().await;
        app.set_service_type(ServiceType::Incoming);

        assert!(!app.select_tariff("enterprise"));
        assert!(app.select_tariff("pro"));

        let intent = app.activate_service().await.unwrap();
        assert_eq!(intent.tariff_id, "pro");
        assert_eq!(intent.service_type, ServiceType::Incoming);
    }

    #[tokio::test]
    async fn test_activate_with_expired_session() {
        let (mut app, gateway, store) = signed_in().await;
        gateway.expire_sessions();

        assert_eq!(app.activate_service().await.unwrap_err(), ClientError::Unauthorized);
        assert_eq!(app.screen(), Screen::Register);
        assert!(store.load().unwrap().is_none());
    }
}
