//! # Tariff Selection
//!
//! Payment page state: the catalogue, the chosen tariff (default `business`)
//! and the service direction.

use shared::{tariff_catalog, ServiceType, Tariff, DEFAULT_TARIFF_ID};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TariffSelection {
    tariffs: Vec<Tariff>,
    selected: String,
    service_type: ServiceType,
}

impl Default for TariffSelection {
    fn default() -> Self {
        Self::new(tariff_catalog())
    }
}

impl TariffSelection {
    pub fn new(tariffs: Vec<Tariff>) -> Self {
        let selected = tariffs
            .iter()
            .find(|t| t.id == DEFAULT_TARIFF_ID)
            .or_else(|| tariffs.first())
            .map(|t| t.id.clone())
            .unwrap_or_default();

        Self {
            tariffs,
            selected,
            service_type: ServiceType::Outgoing,
        }
    }

    pub fn tariffs(&self) -> &[Tariff] {
        &self.tariffs
    }

    pub fn selected(&self) -> Option<&Tariff> {
        self.tariffs.iter().find(|t| t.id == self.selected)
    }

    /// Choose a tariff by id. Unknown ids leave the selection unchanged.
    pub fn select(&mut self, tariff_id: &str) -> bool {
        if self.tariffs.iter().any(|t| t.id == tariff_id) {
            self.selected = tariff_id.to_string();
            true
        } else {
            false
        }
    }

    pub fn service_type(&self) -> ServiceType {
        self.service_type
    }

    pub fn set_service_type(&mut self, service_type: ServiceType) {
        self.service_type = service_type;
    }

    /// Swap in a fresh catalogue, keeping the selection when it still exists.
    pub fn replace_catalog(&mut self, tariffs: Vec<Tariff>) {
        let previous = std::mem::take(&mut self.selected);
        let service_type = self.service_type;
        *self = Self::new(tariffs);
        self.service_type = service_type;
        self.select(&previous);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_business() {
        let selection = TariffSelection::default();
        assert_eq!(selection.selected().unwrap().id, "business");
        assert_eq!(selection.service_type(), ServiceType::Outgoing);
    }

    #[test]
    fn test_unknown_id_ignored() {
        let mut selection = TariffSelection::default();
        assert!(selection.select("pro"));
        assert!(!selection.select("enterprise"));
        assert_eq!(selection.selected().unwrap().id, "pro");
    }

    #[test]
    fn test_replace_catalog_keeps_selection() {
        let mut selection = TariffSelection::default();
        selection.select("start");
        selection.set_service_type(ServiceType::Incoming);

        selection.replace_catalog(tariff_catalog());

        assert_eq!(selection.selected().unwrap().id, "start");
        assert_eq!(selection.service_type(), ServiceType::Incoming);
    }

    #[test]
    fn test_empty_catalog() {
        let selection = TariffSelection::new(Vec::new());
        assert!(selection.selected().is_none());
    }
}
