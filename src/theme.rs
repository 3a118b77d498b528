//! Theme palettes and the active color set.
//!
//! Palettes come from a fixed catalog. Selecting one overwrites the active
//! `ThemeColors` wholesale. The brand panel's per-component swatches are kept
//! next to the theme but never flow into it.

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

use serde::{Deserialize, Serialize};

/// Active four-color set consumed by the preview renderer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeColors {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub text: String,
}

impl ThemeColors {
    #[must_use]
    pub fn role(&self, role: ColorRole) -> &str {
        match role {
            ColorRole::Primary => &self.primary,
            ColorRole::Secondary => &self.secondary,
            ColorRole::Accent => &self.accent,
            ColorRole::Text => &self.text,
        }
    }
}

impl Default for ThemeColors {
    fn default() -> Self {
        ORIGINAL.colors()
    }
}

/// One of the four theme channels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColorRole {
    Primary,
    Secondary,
    Accent,
    Text,
}

/// A named catalog palette: `[primary, secondary, accent, text]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThemePalette {
    pub id: &'static str,
    pub name: &'static str,
    pub colors: [&'static str; 4],
}

impl ThemePalette {
    #[must_use]
    pub fn colors(&self) -> ThemeColors {
        let [primary, secondary, accent, text] = self.colors;
        ThemeColors {
            primary: primary.to_string(),
            secondary: secondary.to_string(),
            accent: accent.to_string(),
            text: text.to_string(),
        }
    }
}

const ORIGINAL: ThemePalette =
    ThemePalette { id: "original", name: "Original", colors: ["#836FFF", "#211951", "#16F5BA", "#1F2937"] };

/// Fixed palette catalog, in dropdown order.
pub const PALETTES: [ThemePalette; 6] = [
    ORIGINAL,
    ThemePalette { id: "ocean-blue", name: "Ocean Blue", colors: ["#0047AB", "#4A90E2", "#1E3A8A", "#334155"] },
    ThemePalette { id: "forest-green", name: "Forest Green", colors: ["#2D6A4F", "#52B788", "#1B4332", "#283618"] },
    ThemePalette { id: "sunset-orange", name: "Sunset Orange", colors: ["#F97316", "#FDBA74", "#C2410C", "#431407"] },
    ThemePalette { id: "royal-purple", name: "Royal Purple", colors: ["#6B21A8", "#A855F7", "#4C1D95", "#2E1065"] },
    ThemePalette { id: "monochrome", name: "Monochrome", colors: ["#111827", "#6B7280", "#374151", "#111827"] },
];

/// Look up a catalog palette by id.
#[must_use]
pub fn palette(id: &str) -> Option<&'static ThemePalette> {
    PALETTES.iter().find(|p| p.id == id)
}

/// Active palette selection.
#[derive(Clone, Debug)]
pub struct ThemeModel {
    palette_id: &'static str,
    colors: ThemeColors,
}

impl Default for ThemeModel {
    fn default() -> Self {
        Self { palette_id: ORIGINAL.id, colors: ORIGINAL.colors() }
    }
}

impl ThemeModel {
    /// Start from a catalog palette; unknown ids fall back to the original palette.
    #[must_use]
    pub fn with_palette(id: &str) -> Self {
        let mut model = Self::default();
        model.select_palette(id);
        model
    }

    /// Overwrite the active colors with a catalog palette. Unknown ids are a no-op.
    pub fn select_palette(&mut self, id: &str) -> bool {
        let Some(found) = palette(id) else {
            return false;
        };
        self.palette_id = found.id;
        self.colors = found.colors();
        true
    }

    #[must_use]
    pub fn active_colors(&self) -> &ThemeColors {
        &self.colors
    }

    #[must_use]
    pub fn palette_id(&self) -> &'static str {
        self.palette_id
    }
}

/// Brand-panel component whose swatch can be picked individually.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BrandComponent {
    Buttons,
    Forms,
    Cards,
}

/// Panel-local swatches for buttons, forms, and cards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandSwatches {
    pub buttons: String,
    pub forms: String,
    pub cards: String,
}

impl Default for BrandSwatches {
    fn default() -> Self {
        Self { buttons: "#836FFF".into(), forms: "#F1F3FF".into(), cards: "#FFFFFF".into() }
    }
}

impl BrandSwatches {
    pub fn set(&mut self, component: BrandComponent, color: &str) {
        let slot = match component {
            BrandComponent::Buttons => &mut self.buttons,
            BrandComponent::Forms => &mut self.forms,
            BrandComponent::Cards => &mut self.cards,
        };
        *slot = color.to_string();
    }

    #[must_use]
    pub fn get(&self, component: BrandComponent) -> &str {
        match component {
            BrandComponent::Buttons => &self.buttons,
            BrandComponent::Forms => &self.forms,
            BrandComponent::Cards => &self.cards,
        }
    }
}
