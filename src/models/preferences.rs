use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    System,
    Light,
    Dark,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    Small,
    #[default]
    Medium,
    Large,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorContrast {
    #[default]
    Normal,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardView {
    #[default]
    Grid,
    List,
}

// ---------------------------------------------------------------------------
// Preferences — Site-wide UI preferences
// ---------------------------------------------------------------------------

/// Site-wide user preferences.
///
/// Missing fields take their defaults on load, so older blobs stay readable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Preferences {
    pub theme: Theme,
    pub animations: bool,
    pub reduced_motion: bool,
    pub font_size: FontSize,
    pub color_contrast: ColorContrast,
    pub autoplay_media: bool,
    pub tooltips: bool,
    pub keyboard_navigation: bool,
    pub preferred_card_view: CardView,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            theme: Theme::System,
            animations: true,
            reduced_motion: false,
            font_size: FontSize::Medium,
            color_contrast: ColorContrast::Normal,
            autoplay_media: false,
            tooltips: true,
            keyboard_navigation: false,
            preferred_card_view: CardView::Grid,
        }
    }
}

impl Preferences {
    /// Animations run only when enabled and reduced motion is off.
    pub fn animations_enabled(&self) -> bool {
        self.animations && !self.reduced_motion
    }
}
