use crate::alerts::PriceAlertBook;
use crate::config::keys;
use crate::error::Result;
use crate::models::{AlertSettings, PriceAlert};
use crate::storage::LocalStore;

/// Persisted price alerts and notification settings.
pub struct AlertStore<'a> {
    store: &'a LocalStore,
}

impl<'a> AlertStore<'a> {
    pub fn new(store: &'a LocalStore) -> Self {
        Self { store }
    }

    pub fn load(&self) -> Result<PriceAlertBook> {
        let alerts: Vec<PriceAlert> = self.store.get(keys::PRICE_ALERTS)?.unwrap_or_default();
        Ok(PriceAlertBook::from_alerts(alerts))
    }

    pub fn save(&self, book: &PriceAlertBook) -> Result<()> {
        self.store.set_persistent(keys::PRICE_ALERTS, &book.alerts())
    }

    /// Saved settings, or the defaults when none were saved.
    pub fn settings(&self) -> Result<AlertSettings> {
        Ok(self.store.get(keys::ALERT_SETTINGS)?.unwrap_or_default())
    }

    pub fn save_settings(&self, settings: &AlertSettings) -> Result<()> {
        self.store.set_persistent(keys::ALERT_SETTINGS, settings)
    }
}
