//! Mode/page navigation for the editor.
//!
//! DESIGN
//! ======
//! `Navigator` is the top-level state machine: which editing surface is
//! visible (`EditorMode`), which funnel page the preview shows
//! (`PreviewPage`), and which results-page `Section` is targeted while in
//! controls mode. Transitions are total over the enums; the only cross-model
//! rule owned here is that controls mode always previews the results page.
//! Side effects on other models (conversation resets) are reported back to the
//! shell through `ModeChange`.

#[cfg(test)]
#[path = "navigator_test.rs"]
mod navigator_test;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::{DESKTOP_FRAME_WIDTH_PX, MOBILE_FRAME_WIDTH_PX, TABLET_FRAME_WIDTH_PX};

/// Editing surface shown in the side panel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EditorMode {
    /// Global chat that edits the whole funnel.
    #[default]
    Chat,
    /// Click-to-select inline styling of preview elements.
    Design,
    /// Per-section chats scoped to the results page.
    Controls,
    /// Palette and brand swatches.
    Brand,
    /// Generated markup view.
    Code,
    /// Funnel settings.
    Settings,
}

impl EditorMode {
    pub const ALL: [Self; 6] = [Self::Chat, Self::Design, Self::Controls, Self::Brand, Self::Code, Self::Settings];
}

/// Funnel page rendered in the preview area.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PreviewPage {
    /// Landing page with the email capture form.
    #[default]
    DataCapture,
    /// Quiz page gating access to the results.
    Gate,
    /// Personalized results page.
    Results,
}

impl PreviewPage {
    pub const ALL: [Self; 3] = [Self::DataCapture, Self::Gate, Self::Results];

    /// Stable slug used in node ids and configuration.
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Self::DataCapture => "dataCapture",
            Self::Gate => "gate",
            Self::Results => "results",
        }
    }

    /// Parse a page slug. Returns `None` for unknown input.
    #[must_use]
    pub fn from_slug(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.slug() == raw)
    }
}

/// Editable region of the results page, addressable in controls mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Section {
    ResultsHeader,
    PersonalityTraits,
    CareTips,
}

impl Section {
    pub const ALL: [Self; 3] = [Self::ResultsHeader, Self::PersonalityTraits, Self::CareTips];

    /// Position in `ALL`.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::ResultsHeader => 0,
            Self::PersonalityTraits => 1,
            Self::CareTips => 2,
        }
    }

    /// Stable slug used in node ids and logs.
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Self::ResultsHeader => "resultsHeader",
            Self::PersonalityTraits => "personalityTraits",
            Self::CareTips => "careTips",
        }
    }

    /// Heading shown above the section's chat.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::ResultsHeader => "Results Header",
            Self::PersonalityTraits => "Personality Traits",
            Self::CareTips => "Care Tips",
        }
    }

    /// Starter prompts offered while the section's channel is empty.
    #[must_use]
    pub fn starter_prompts(self) -> &'static [&'static str] {
        match self {
            Self::ResultsHeader => &["Make the personality type more playful.", "Shorten the congratulations message."],
            Self::PersonalityTraits => &["Add a Learn More button to each trait.", "Simplify the language"],
            Self::CareTips => &["Add a tip about water temperature.", "Make the tips more concise."],
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Device frame the preview is rendered into.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Device {
    Mobile,
    #[default]
    Desktop,
    Tablet,
}

impl Device {
    /// Width of the preview frame in CSS pixels.
    #[must_use]
    pub fn frame_width_px(self) -> u32 {
        match self {
            Self::Mobile => MOBILE_FRAME_WIDTH_PX,
            Self::Desktop => DESKTOP_FRAME_WIDTH_PX,
            Self::Tablet => TABLET_FRAME_WIDTH_PX,
        }
    }
}

/// Top-level application view: the standalone preview or the editor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AppView {
    #[default]
    Preview,
    Edit,
}

/// Outcome of a mode transition, consumed by the shell to apply cross-model effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModeChange {
    pub from: EditorMode,
    pub to: EditorMode,
}

impl ModeChange {
    /// Whether the transition actually changed the mode.
    #[must_use]
    pub fn changed(self) -> bool {
        self.from != self.to
    }

    #[must_use]
    pub fn entered(self, mode: EditorMode) -> bool {
        self.changed() && self.to == mode
    }

    #[must_use]
    pub fn left(self, mode: EditorMode) -> bool {
        self.changed() && self.from == mode
    }
}

/// Mode, page, and section navigation state.
#[derive(Clone, Debug, Default)]
pub struct Navigator {
    view: AppView,
    mode: EditorMode,
    page: PreviewPage,
    selected_section: Option<Section>,
    hovered_section: Option<Section>,
    device: Device,
    panel_collapsed: bool,
}

impl Navigator {
    #[must_use]
    pub fn new(page: PreviewPage) -> Self {
        Self { page, ..Self::default() }
    }

    // --- Queries ---

    #[must_use]
    pub fn view(&self) -> AppView {
        self.view
    }

    #[must_use]
    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    #[must_use]
    pub fn page(&self) -> PreviewPage {
        self.page
    }

    #[must_use]
    pub fn selected_section(&self) -> Option<Section> {
        self.selected_section
    }

    #[must_use]
    pub fn hovered_section(&self) -> Option<Section> {
        self.hovered_section
    }

    #[must_use]
    pub fn device(&self) -> Device {
        self.device
    }

    #[must_use]
    pub fn panel_collapsed(&self) -> bool {
        self.panel_collapsed
    }

    // --- Transitions ---

    /// Switch between the standalone preview and the editor.
    pub fn set_view(&mut self, view: AppView) {
        self.view = view;
    }

    /// Transition the editor mode.
    ///
    /// Entering controls forces the results page and clears the section
    /// selection; leaving controls clears section selection and hover.
    pub fn set_mode(&mut self, mode: EditorMode) -> ModeChange {
        let change = ModeChange { from: self.mode, to: mode };
        self.mode = mode;

        if change.entered(EditorMode::Controls) {
            self.page = PreviewPage::Results;
            self.selected_section = None;
        }
        if change.left(EditorMode::Controls) {
            self.selected_section = None;
            self.hovered_section = None;
        }
        change
    }

    /// Mode change initiated from the side menu. A collapsed panel is
    /// expanded before the mode switches.
    pub fn choose_mode(&mut self, mode: EditorMode) -> ModeChange {
        if self.panel_collapsed {
            self.panel_collapsed = false;
        }
        self.set_mode(mode)
    }

    /// Transition the previewed page. Has no effect on the mode.
    pub fn set_page(&mut self, page: PreviewPage) {
        self.page = page;
    }

    /// Select (or clear) the section targeted by the controls chat.
    /// Returns `false` when not in controls mode.
    pub fn select_section(&mut self, section: Option<Section>) -> bool {
        if self.mode != EditorMode::Controls {
            return false;
        }
        self.selected_section = section;
        true
    }

    /// Record which section the pointer is over. Render-only affordance.
    pub fn hover_section(&mut self, section: Option<Section>) {
        self.hovered_section = if self.mode == EditorMode::Controls { section } else { None };
    }

    pub fn set_device(&mut self, device: Device) {
        self.device = device;
    }

    pub fn toggle_panel(&mut self) {
        self.panel_collapsed = !self.panel_collapsed;
    }
}
