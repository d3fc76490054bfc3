//! Price alerts: creation, lifecycle, listing and evaluation against new prices.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config;
use crate::models::{AlertStats, AlertType, AlertUpdate, NewAlert, PriceAlert};

/// Any-change alerts with no explicit threshold fire on a 5% move.
const DEFAULT_ANY_CHANGE_PERCENT: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertFilter {
    #[default]
    All,
    /// Active and not yet triggered.
    Active,
    Triggered,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSort {
    /// Newest first.
    #[default]
    Date,
    /// Most expensive first.
    Price,
    Name,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertQuery {
    pub filter: AlertFilter,
    pub search: String,
    pub sort_by: AlertSort,
}

fn new_alert_id() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&rand::distributions::Alphanumeric)
        .take(9)
        .map(|b| char::from(b).to_ascii_lowercase())
        .collect();
    format!("alert-{}-{}", Utc::now().timestamp_millis(), suffix)
}

/// Percent change from `from` to `to`; zero when `from` is not positive.
fn percent_change(from: f64, to: f64) -> f64 {
    if from <= 0.0 {
        0.0
    } else {
        (to - from) / from * 100.0
    }
}

fn crosses(alert: &PriceAlert, price: f64) -> bool {
    let change = percent_change(alert.current_price, price);
    match alert.alert_type {
        AlertType::Below => price <= alert.target_value,
        AlertType::Above => price >= alert.target_value,
        AlertType::PercentDrop => change <= -alert.target_value,
        AlertType::PercentRise => change >= alert.target_value,
        AlertType::AnyChange => {
            let threshold = if alert.target_value > 0.0 {
                alert.target_value
            } else {
                DEFAULT_ANY_CHANGE_PERCENT
            };
            change.abs() >= threshold
        }
    }
}

// ---------------------------------------------------------------------------
// PriceAlertBook
// ---------------------------------------------------------------------------

/// Ordered set of price alerts, newest first.
#[derive(Debug, Clone, Default)]
pub struct PriceAlertBook {
    alerts: Vec<PriceAlert>,
}

impl PriceAlertBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_alerts(alerts: Vec<PriceAlert>) -> Self {
        Self { alerts }
    }

    pub fn alerts(&self) -> &[PriceAlert] {
        &self.alerts
    }

    pub fn into_alerts(self) -> Vec<PriceAlert> {
        self.alerts
    }

    pub fn get(&self, id: &str) -> Option<&PriceAlert> {
        self.alerts.iter().find(|a| a.id == id)
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut PriceAlert> {
        self.alerts.iter_mut().find(|a| a.id == id)
    }

    // -- Lifecycle ---------------------------------------------------------

    /// Create an active, untriggered alert and return its id.
    pub fn create(&mut self, new: NewAlert) -> String {
        let alert = PriceAlert {
            id: new_alert_id(),
            card_id: new.card_id,
            card_name: new.card_name,
            card_image: new.card_image,
            card_set: new.card_set,
            card_number: new.card_number,
            current_price: new.current_price,
            alert_type: new.alert_type,
            target_value: new.target_value,
            is_active: true,
            is_triggered: false,
            triggered_at: None,
            triggered_price: None,
            created_at: Utc::now(),
            last_checked: None,
            notification_sent: None,
        };
        tracing::info!(
            id = %alert.id,
            card_id = %alert.card_id,
            alert_type = alert.alert_type.label(),
            target = alert.target_value,
            "price alert created"
        );
        let id = alert.id.clone();
        self.alerts.insert(0, alert);
        id
    }

    pub fn update(&mut self, id: &str, update: AlertUpdate) -> bool {
        let Some(alert) = self.get_mut(id) else {
            return false;
        };
        if let Some(t) = update.alert_type {
            alert.alert_type = t;
        }
        if let Some(v) = update.target_value {
            alert.target_value = v;
        }
        if let Some(p) = update.current_price {
            alert.current_price = p;
        }
        if let Some(a) = update.is_active {
            alert.is_active = a;
        }
        true
    }

    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.alerts.len();
        self.alerts.retain(|a| a.id != id);
        let removed = self.alerts.len() != before;
        if removed {
            tracing::info!(id, "price alert deleted");
        }
        removed
    }

    /// Flip an alert between active and paused.
    pub fn toggle(&mut self, id: &str) -> bool {
        match self.get_mut(id) {
            Some(alert) => {
                alert.is_active = !alert.is_active;
                true
            }
            None => false,
        }
    }

    /// Acknowledge a triggered alert so it can fire again.
    pub fn dismiss(&mut self, id: &str) -> bool {
        match self.get_mut(id) {
            Some(alert) => {
                alert.is_triggered = false;
                alert.notification_sent = Some(true);
                true
            }
            None => false,
        }
    }

    /// Acknowledge every triggered alert, re-arming it. Returns how many
    /// were cleared.
    pub fn clear_triggered(&mut self) -> usize {
        let mut cleared = 0;
        for alert in self.alerts.iter_mut().filter(|a| a.is_triggered) {
            alert.is_triggered = false;
            alert.notification_sent = Some(true);
            cleared += 1;
        }
        cleared
    }

    // -- Evaluation --------------------------------------------------------

    /// Check the active, untriggered alerts for `card_id` against `price`.
    ///
    /// Percent alerts are measured against the price recorded on the alert.
    /// Every checked alert then records `price` as its current price.
    /// Returns the ids of alerts that fired.
    pub fn evaluate(&mut self, card_id: &str, price: f64, now: DateTime<Utc>) -> Vec<String> {
        let mut fired = Vec::new();

        for alert in self
            .alerts
            .iter_mut()
            .filter(|a| a.card_id == card_id && a.is_active && !a.is_triggered)
        {
            if crosses(alert, price) {
                alert.is_triggered = true;
                alert.triggered_at = Some(now);
                alert.triggered_price = Some(price);
                alert.notification_sent = Some(false);
                tracing::info!(id = %alert.id, card_id, price, "price alert triggered");
                fired.push(alert.id.clone());
            }
            alert.last_checked = Some(now);
            alert.current_price = price;
        }

        fired
    }

    // -- Queries -----------------------------------------------------------

    pub fn stats(&self) -> AlertStats {
        AlertStats {
            total: self.alerts.len(),
            active: self.alerts.iter().filter(|a| a.is_active).count(),
            triggered: self.alerts.iter().filter(|a| a.is_triggered).count(),
            pending_notification: self
                .alerts
                .iter()
                .filter(|a| a.is_triggered && a.notification_sent != Some(true))
                .count(),
        }
    }

    pub fn query(&self, q: &AlertQuery) -> Vec<&PriceAlert> {
        let search = q.search.to_lowercase();
        let mut result: Vec<&PriceAlert> = self
            .alerts
            .iter()
            .filter(|a| match q.filter {
                AlertFilter::All => true,
                AlertFilter::Active => a.is_active && !a.is_triggered,
                AlertFilter::Triggered => a.is_triggered,
            })
            .filter(|a| {
                search.is_empty()
                    || a.card_name.to_lowercase().contains(&search)
                    || a.card_set.to_lowercase().contains(&search)
            })
            .collect();

        match q.sort_by {
            AlertSort::Date => result.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            AlertSort::Price => {
                result.sort_by(|a, b| b.current_price.total_cmp(&a.current_price))
            }
            AlertSort::Name => result.sort_by(|a, b| a.card_name.cmp(&b.card_name)),
        }
        result
    }

    /// One page (1-based) of query results.
    pub fn page(&self, q: &AlertQuery, page: usize) -> Vec<&PriceAlert> {
        let start = page.saturating_sub(1) * config::ALERT_PAGE_SIZE;
        self.query(q)
            .into_iter()
            .skip(start)
            .take(config::ALERT_PAGE_SIZE)
            .collect()
    }

    pub fn total_pages(&self, q: &AlertQuery) -> usize {
        self.query(q).len().div_ceil(config::ALERT_PAGE_SIZE)
    }
}
