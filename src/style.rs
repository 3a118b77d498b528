//! Text style values and their normalization.
//!
//! Effective styles arrive as raw CSS-like strings. The style snapshot shown
//! in the design panel normalizes two of them: the weight is bucketed into the
//! four dropdown options and the font family is reduced to its first entry.

#[cfg(test)]
#[path = "style_test.rs"]
mod style_test;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::{WEIGHT_MEDIUM_MAX, WEIGHT_NORMAL_MAX, WEIGHT_SEMIBOLD_MAX};

/// One of the four font weights the design panel can display.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontWeight {
    #[default]
    #[serde(rename = "normal")]
    Normal,
    #[serde(rename = "500")]
    Medium,
    #[serde(rename = "600")]
    SemiBold,
    #[serde(rename = "bold")]
    Bold,
}

impl FontWeight {
    /// Bucket a raw numeric-or-keyword weight.
    ///
    /// `<=450` is normal, `451..=550` is 500, `551..=650` is 600 and anything
    /// heavier is bold. Unrecognized input is normal.
    #[must_use]
    pub fn normalize(raw: &str) -> Self {
        let raw = raw.trim();
        let numeric = match raw.to_ascii_lowercase().as_str() {
            "normal" => 400.0,
            "bold" => 700.0,
            other => match other.parse::<f64>() {
                Ok(n) if n.is_finite() => n,
                _ => return Self::Normal,
            },
        };

        if numeric <= WEIGHT_NORMAL_MAX {
            Self::Normal
        } else if numeric <= WEIGHT_MEDIUM_MAX {
            Self::Medium
        } else if numeric <= WEIGHT_SEMIBOLD_MAX {
            Self::SemiBold
        } else {
            Self::Bold
        }
    }

    /// Dropdown value: `normal`, `500`, `600` or `bold`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Medium => "500",
            Self::SemiBold => "600",
            Self::Bold => "bold",
        }
    }

    /// Numeric CSS weight.
    #[must_use]
    pub fn numeric(self) -> u16 {
        match self {
            Self::Normal => 400,
            Self::Medium => 500,
            Self::SemiBold => 600,
            Self::Bold => 700,
        }
    }
}

impl fmt::Display for FontWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// First entry of a comma-separated font-family list, with surrounding quotes removed.
#[must_use]
pub fn primary_font_family(list: &str) -> String {
    let first = list.split(',').next().unwrap_or_default().trim();
    first.trim_matches(|c| c == '"' || c == '\'').trim().to_string()
}

/// A single style property editable from the design panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StyleProperty {
    TextAlign,
    Color,
    FontWeight,
    FontSize,
    FontFamily,
}

/// Effective style of a node after template defaults, theme, and inline edits.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputedStyle {
    pub text_align: String,
    pub color: String,
    /// Raw weight as the node carries it (numeric or keyword).
    pub font_weight: String,
    pub font_size: String,
    /// Full font-family list.
    pub font_family: String,
}

/// Normalized style captured when an element is selected.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleSnapshot {
    pub text_align: String,
    pub color: String,
    pub font_weight: FontWeight,
    pub font_size: String,
    pub font_family: String,
}

impl StyleSnapshot {
    /// Capture a snapshot from an effective style.
    #[must_use]
    pub fn capture(style: &ComputedStyle) -> Self {
        Self {
            text_align: style.text_align.clone(),
            color: style.color.clone(),
            font_weight: FontWeight::normalize(&style.font_weight),
            font_size: style.font_size.clone(),
            font_family: primary_font_family(&style.font_family),
        }
    }
}

/// Inline style overrides applied to a node from the design panel.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_align: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
}

impl InlineStyle {
    /// Set one property. Font weights are stored in their bucketed numeric form.
    pub fn set(&mut self, property: StyleProperty, value: &str) {
        let value = value.to_string();
        match property {
            StyleProperty::TextAlign => self.text_align = Some(value),
            StyleProperty::Color => self.color = Some(value),
            StyleProperty::FontWeight => self.font_weight = Some(FontWeight::normalize(&value).numeric().to_string()),
            StyleProperty::FontSize => self.font_size = Some(value),
            StyleProperty::FontFamily => self.font_family = Some(value),
        }
    }

    /// Overlay these overrides onto an effective style.
    pub fn apply_to(&self, style: &mut ComputedStyle) {
        if let Some(v) = &self.text_align {
            style.text_align.clone_from(v);
        }
        if let Some(v) = &self.color {
            style.color.clone_from(v);
        }
        if let Some(v) = &self.font_weight {
            style.font_weight.clone_from(v);
        }
        if let Some(v) = &self.font_size {
            style.font_size.clone_from(v);
        }
        if let Some(v) = &self.font_family {
            style.font_family.clone_from(v);
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text_align.is_none()
            && self.color.is_none()
            && self.font_weight.is_none()
            && self.font_size.is_none()
            && self.font_family.is_none()
    }
}
