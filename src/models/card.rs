use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// PocketCard — A browsable TCG Pocket card
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PocketCard {
    pub id: String,
    pub name: String,
    pub image: Option<String>,
    pub rarity: Option<String>,
    pub pack: Option<String>,
    /// Energy type for Pokémon ("fire", "water"…), or "trainer" / "energy".
    #[serde(rename = "type")]
    pub type_field: Option<String>,
    pub category: Option<String>,
    pub stage: Option<String>,
    /// HP as printed on the card (string in the upstream data).
    pub health: Option<String>,
    pub hp: Option<u32>,
}

impl PocketCard {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            image: None,
            rarity: None,
            pack: None,
            type_field: None,
            category: None,
            stage: None,
            health: None,
            hp: None,
        }
    }

    /// Lowercased type, or `""` when absent.
    pub fn type_lower(&self) -> String {
        self.type_field
            .as_deref()
            .map(str::to_lowercase)
            .unwrap_or_default()
    }

    /// HP parsed from `health`, falling back to `hp`, then 0.
    ///
    /// Leading digits only, so `"120 HP"` parses as 120.
    pub fn hp_value(&self) -> u32 {
        if let Some(h) = &self.health {
            let digits: String = h.trim().chars().take_while(|c| c.is_ascii_digit()).collect();
            if let Ok(v) = digits.parse() {
                return v;
            }
        }
        self.hp.unwrap_or(0)
    }

    pub fn is_trainer(&self) -> bool {
        self.type_lower() == "trainer"
    }

    pub fn is_energy(&self) -> bool {
        self.type_lower() == "energy"
    }

    /// Trainer in the broad sense used for copy limits: type or category is
    /// trainer, supporter, item or tool.
    pub fn is_trainer_like(&self) -> bool {
        let category = self
            .category
            .as_deref()
            .map(str::to_lowercase)
            .unwrap_or_default();
        is_trainer_kind(&self.type_lower()) || is_trainer_kind(&category)
    }
}

pub(crate) fn is_trainer_kind(s: &str) -> bool {
    matches!(s, "trainer" | "supporter" | "item" | "tool")
}

// ---------------------------------------------------------------------------
// CardCategory / TrainerSubtype — browser filter values
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardCategory {
    #[default]
    All,
    Pokemon,
    Trainer,
    Energy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrainerSubtype {
    #[default]
    All,
    Item,
    Supporter,
    Tool,
}
