use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// AlertType
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    Below,
    Above,
    PercentDrop,
    PercentRise,
    AnyChange,
}

impl AlertType {
    pub fn label(self) -> &'static str {
        match self {
            AlertType::Below => "Price Below",
            AlertType::Above => "Price Above",
            AlertType::PercentDrop => "Price Drop %",
            AlertType::PercentRise => "Price Rise %",
            AlertType::AnyChange => "Any Change",
        }
    }

    /// Whether `target_value` is a percentage rather than a price.
    pub fn is_percent(self) -> bool {
        matches!(
            self,
            AlertType::PercentDrop | AlertType::PercentRise | AlertType::AnyChange
        )
    }
}

// ---------------------------------------------------------------------------
// PriceAlert — A target-price watch on a card
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceAlert {
    pub id: String,
    pub card_id: String,
    pub card_name: String,
    #[serde(default)]
    pub card_image: String,
    #[serde(default)]
    pub card_set: String,
    #[serde(default)]
    pub card_number: String,
    /// Price when the alert was created or last checked.
    pub current_price: f64,
    pub alert_type: AlertType,
    /// Price for below/above alerts, percentage for percent alerts.
    pub target_value: f64,
    pub is_active: bool,
    pub is_triggered: bool,
    pub triggered_at: Option<DateTime<Utc>>,
    pub triggered_price: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub last_checked: Option<DateTime<Utc>>,
    pub notification_sent: Option<bool>,
}

/// Fields supplied by the caller when creating an alert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAlert {
    pub card_id: String,
    pub card_name: String,
    #[serde(default)]
    pub card_image: String,
    #[serde(default)]
    pub card_set: String,
    #[serde(default)]
    pub card_number: String,
    pub current_price: f64,
    pub alert_type: AlertType,
    pub target_value: f64,
}

/// Partial update applied by [`PriceAlertBook::update`](crate::alerts::PriceAlertBook::update).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlertUpdate {
    pub alert_type: Option<AlertType>,
    pub target_value: Option<f64>,
    pub current_price: Option<f64>,
    pub is_active: Option<bool>,
}

// ---------------------------------------------------------------------------
// AlertSettings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckFrequency {
    Hourly,
    Daily,
    Weekly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigestFrequency {
    Daily,
    Weekly,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertSettings {
    pub email_notifications: bool,
    pub email_address: Option<String>,
    pub check_frequency: CheckFrequency,
    pub digest_enabled: bool,
    pub digest_frequency: DigestFrequency,
    pub sound_enabled: bool,
}

impl Default for AlertSettings {
    fn default() -> Self {
        Self {
            email_notifications: false,
            email_address: None,
            check_frequency: CheckFrequency::Daily,
            digest_enabled: false,
            digest_frequency: DigestFrequency::Weekly,
            sound_enabled: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertStats {
    pub total: usize,
    pub active: usize,
    pub triggered: usize,
    pub pending_notification: usize,
}
