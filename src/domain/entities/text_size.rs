//! Text size preference levels.

use serde::{Deserialize, Serialize};

use crate::domain::errors::PreferencesError;

/// Base font scale chosen by the reader. Ordered from smallest to largest.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum TextSize {
    #[default]
    Normal,
    Large,
    ExtraLarge,
}

impl TextSize {
    /// All levels in ascending order.
    pub const ALL: [Self; 3] = [Self::Normal, Self::Large, Self::ExtraLarge];

    /// Value written to the preferences store.
    #[must_use]
    pub const fn storage_value(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Large => "large",
            Self::ExtraLarge => "extra-large",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Large => "Large",
            Self::ExtraLarge => "Extra Large",
        }
    }

    /// Root font size in CSS pixels.
    #[must_use]
    pub const fn base_font_px(self) -> u16 {
        match self {
            Self::Normal => 18,
            Self::Large => 22,
            Self::ExtraLarge => 26,
        }
    }

    #[must_use]
    pub const fn scale(self) -> f32 {
        match self {
            Self::Normal => 1.0,
            Self::Large => 1.22,
            Self::ExtraLarge => 1.44,
        }
    }

    /// Next larger level, `None` at the maximum.
    #[must_use]
    pub const fn larger(self) -> Option<Self> {
        match self {
            Self::Normal => Some(Self::Large),
            Self::Large => Some(Self::ExtraLarge),
            Self::ExtraLarge => None,
        }
    }

    /// Next smaller level, `None` at the minimum.
    #[must_use]
    pub const fn smaller(self) -> Option<Self> {
        match self {
            Self::Normal => None,
            Self::Large => Some(Self::Normal),
            Self::ExtraLarge => Some(Self::Large),
        }
    }

    #[must_use]
    pub const fn is_max(self) -> bool {
        matches!(self, Self::ExtraLarge)
    }

    #[must_use]
    pub const fn is_min(self) -> bool {
        matches!(self, Self::Normal)
    }
}

impl std::fmt::Display for TextSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.storage_value())
    }
}

impl std::str::FromStr for TextSize {
    type Err = PreferencesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|size| size.storage_value() == s.trim())
            .ok_or_else(|| PreferencesError::invalid_value(s))
    }
}
