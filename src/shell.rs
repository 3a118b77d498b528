//! Editor shell: owns every model for the lifetime of an editing session.
//!
//! DESIGN
//! ======
//! The shell is the only place that applies cross-model rules. Event methods
//! mutate the models and return the `Action`s the host must carry out
//! (repaint, move focus, request an assistant reply). Nothing here awaits; the
//! async side lives in `session`.
//!
//! Whenever the page or a conversation-derived preview flag may have changed,
//! the shell remounts the page templates. Remounting reconciles by node id, so
//! inline styles and edits survive, a selection whose node disappeared is
//! dropped, and a surviving selection recaptures its snapshot.
//!
//! Editing events are ignored while the app shows the read-only preview.

#[cfg(test)]
#[path = "shell_test.rs"]
mod shell_test;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::asset;
use crate::config::EditorConfig;
use crate::consts::{GLOBAL_STARTER_PROMPTS, JAZZ_TRIGGER_KEYWORD};
use crate::conversation::{Channel, ConversationModel, Message, MessageId, PendingReply};
use crate::doc::{DocStore, ElementKind, NodeId};
use crate::navigator::{AppView, Device, EditorMode, ModeChange, Navigator, PreviewPage, Section};
use crate::render::{self, PreviewFlags, RenderContext, RenderedPage};
use crate::responder::ResponderError;
use crate::selection::SelectionModel;
use crate::style::StyleProperty;
use crate::templates;
use crate::theme::{BrandComponent, BrandSwatches, ThemeModel};

/// Side effects the host must perform after an event.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Repaint the preview and panels.
    RenderNeeded,
    /// Move focus to the channel's compose input.
    FocusCompose(Channel),
    /// Move focus to a preview node made editable in place.
    FocusNode(NodeId),
    /// Ask the responder for a reply and feed it to `complete_reply`.
    ReplyRequested(PendingReply),
}

/// What a click in the preview area landed on.
///
/// The host resolves each click to its innermost target; a click on an
/// element is never also delivered as a background click.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ClickTarget {
    Element { id: NodeId, kind: ElementKind },
    Background,
}

/// Composed editor state.
#[derive(Debug)]
pub struct EditorShell {
    config: EditorConfig,
    navigator: Navigator,
    doc: DocStore,
    selection: SelectionModel,
    theme: ThemeModel,
    swatches: BrandSwatches,
    conversation: ConversationModel,
    quiz_jazzed: bool,
}

impl Default for EditorShell {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl EditorShell {
    #[must_use]
    pub fn new(config: EditorConfig) -> Self {
        let mut shell = Self {
            navigator: Navigator::new(config.initial_page),
            doc: DocStore::new(),
            selection: SelectionModel::new(),
            theme: ThemeModel::with_palette(&config.palette_id),
            swatches: BrandSwatches::default(),
            conversation: ConversationModel::new(),
            quiz_jazzed: false,
            config,
        };
        shell.remount();
        shell
    }

    // --- Queries ---

    #[must_use]
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    #[must_use]
    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    #[must_use]
    pub fn doc(&self) -> &DocStore {
        &self.doc
    }

    #[must_use]
    pub fn selection(&self) -> &SelectionModel {
        &self.selection
    }

    #[must_use]
    pub fn theme(&self) -> &ThemeModel {
        &self.theme
    }

    #[must_use]
    pub fn swatches(&self) -> &BrandSwatches {
        &self.swatches
    }

    #[must_use]
    pub fn conversation(&self) -> &ConversationModel {
        &self.conversation
    }

    #[must_use]
    pub fn quiz_jazzed(&self) -> bool {
        self.quiz_jazzed
    }

    /// Conversation-derived switches the preview depends on.
    #[must_use]
    pub fn preview_flags(&self) -> PreviewFlags {
        PreviewFlags {
            header_prompted: self.conversation.section_prompted(Section::ResultsHeader),
            traits_prompted: self.conversation.section_prompted(Section::PersonalityTraits),
            quiz_jazzed: self.quiz_jazzed,
        }
    }

    /// Starter prompts to show for `channel`; empty once the channel has been used.
    #[must_use]
    pub fn starter_prompts(&self, channel: Channel) -> &'static [&'static str] {
        if !self.conversation.channel(channel).show_prompts {
            return &[];
        }
        match channel {
            Channel::Global => &GLOBAL_STARTER_PROMPTS,
            Channel::Section(section) => section.starter_prompts(),
        }
    }

    /// Render the previewed page.
    #[must_use]
    pub fn render(&self) -> RenderedPage {
        let ctx = RenderContext {
            page: self.navigator.page(),
            device: self.navigator.device(),
            theme: self.theme.active_colors(),
            flags: self.preview_flags(),
            selected_section: self.navigator.selected_section(),
            hovered_section: self.navigator.hovered_section(),
        };
        render::render(&self.doc, &ctx)
    }

    /// Markup shown by the code view.
    #[must_use]
    pub fn code_view(&self) -> String {
        self.render().markup()
    }

    // --- App view ---

    pub fn open_editor(&mut self) -> Vec<Action> {
        self.navigator.set_view(AppView::Edit);
        vec![Action::RenderNeeded]
    }

    /// Close the editor. The selection does not outlive the editor.
    pub fn open_preview(&mut self) -> Vec<Action> {
        self.navigator.set_view(AppView::Preview);
        self.selection.deselect(&mut self.doc);
        vec![Action::RenderNeeded]
    }

    // --- Navigation ---

    pub fn set_mode(&mut self, mode: EditorMode) -> Vec<Action> {
        let change = self.navigator.set_mode(mode);
        self.apply_mode_change(change)
    }

    /// Mode switch from the side menu; expands a collapsed panel first.
    pub fn choose_mode(&mut self, mode: EditorMode) -> Vec<Action> {
        let change = self.navigator.choose_mode(mode);
        self.apply_mode_change(change)
    }

    pub fn set_page(&mut self, page: PreviewPage) -> Vec<Action> {
        self.navigator.set_page(page);
        self.refresh()
    }

    pub fn select_section(&mut self, section: Option<Section>) -> Vec<Action> {
        if self.navigator.select_section(section) {
            vec![Action::RenderNeeded]
        } else {
            Vec::new()
        }
    }

    pub fn hover_section(&mut self, section: Option<Section>) -> Vec<Action> {
        self.navigator.hover_section(section);
        vec![Action::RenderNeeded]
    }

    pub fn set_device(&mut self, device: Device) -> Vec<Action> {
        self.navigator.set_device(device);
        vec![Action::RenderNeeded]
    }

    pub fn toggle_panel(&mut self) -> Vec<Action> {
        self.navigator.toggle_panel();
        vec![Action::RenderNeeded]
    }

    // --- Selection ---

    /// Route a preview click. Element clicks select only in design mode.
    pub fn click(&mut self, target: ClickTarget) -> Vec<Action> {
        if !self.editing("click") {
            return Vec::new();
        }
        match target {
            ClickTarget::Element { id, kind } => {
                if self.navigator.mode() != EditorMode::Design {
                    return Vec::new();
                }
                if !self.selection.select(&mut self.doc, self.theme.active_colors(), id, kind) {
                    return Vec::new();
                }
                let mut actions = vec![Action::RenderNeeded];
                if kind == ElementKind::Text {
                    actions.push(Action::FocusNode(id));
                }
                actions
            }
            ClickTarget::Background => {
                if self.selection.deselect(&mut self.doc) {
                    vec![Action::RenderNeeded]
                } else {
                    Vec::new()
                }
            }
        }
    }

    pub fn update_style(&mut self, property: StyleProperty, value: &str) -> Vec<Action> {
        if !self.editing("update_style") {
            return Vec::new();
        }
        let applied = self.selection.update_style(&mut self.doc, self.theme.active_colors(), property, value);
        render_if(applied)
    }

    /// Point the selected image at `url`. Unusable sources are ignored.
    pub fn update_image_source(&mut self, url: &str) -> Vec<Action> {
        if !self.editing("update_image_source") {
            return Vec::new();
        }
        match asset::validate_image_url(url) {
            Ok(url) => render_if(self.selection.update_image_source(&mut self.doc, url)),
            Err(e) => {
                debug!(error = %e, code = e.error_code(), "image source ignored");
                Vec::new()
            }
        }
    }

    /// Replace the selected icon's markup. Non-SVG markup is ignored.
    pub fn update_icon_markup(&mut self, markup: &str) -> Vec<Action> {
        if !self.editing("update_icon_markup") {
            return Vec::new();
        }
        match asset::validate_icon_markup(markup) {
            Ok(markup) => render_if(self.selection.update_icon_markup(&mut self.doc, markup)),
            Err(e) => {
                debug!(error = %e, code = e.error_code(), "icon markup ignored");
                Vec::new()
            }
        }
    }

    pub fn edit_text(&mut self, text: &str) -> Vec<Action> {
        if !self.editing("edit_text") {
            return Vec::new();
        }
        render_if(self.selection.edit_text(&mut self.doc, text))
    }

    // --- Theme ---

    pub fn select_palette(&mut self, id: &str) -> Vec<Action> {
        if !self.theme.select_palette(id) {
            return Vec::new();
        }
        info!(palette = id, "palette selected");
        self.resnapshot_selection();
        vec![Action::RenderNeeded]
    }

    /// Pick a brand-panel swatch. Swatches do not feed the preview theme.
    pub fn set_brand_swatch(&mut self, component: BrandComponent, color: &str) -> Vec<Action> {
        self.swatches.set(component, color);
        vec![Action::RenderNeeded]
    }

    // --- Conversation ---

    pub fn set_compose(&mut self, channel: Channel, text: &str) {
        self.conversation.set_compose(channel, text);
    }

    /// Post `text` on `channel`. Section channels only accept messages in
    /// controls mode.
    pub fn send(&mut self, channel: Channel, text: &str) -> Vec<Action> {
        if !self.editing("send") {
            return Vec::new();
        }
        if matches!(channel, Channel::Section(_)) && self.navigator.mode() != EditorMode::Controls {
            debug!(%channel, "section send outside controls mode ignored");
            return Vec::new();
        }
        let Some(pending) = self.conversation.send(channel, text) else {
            return Vec::new();
        };

        if channel == Channel::Global && !self.quiz_jazzed && text.to_lowercase().contains(JAZZ_TRIGGER_KEYWORD) {
            info!("quiz title changed from chat");
            self.quiz_jazzed = true;
        }

        let mut actions = self.refresh();
        actions.push(Action::ReplyRequested(pending));
        actions
    }

    /// Send the compose buffer.
    pub fn submit(&mut self, channel: Channel) -> Vec<Action> {
        let text = self.conversation.channel(channel).compose.clone();
        self.send(channel, &text)
    }

    /// Compose-input key handling: Enter sends, Shift+Enter inserts a newline.
    pub fn key_down(&mut self, channel: Channel, key: &str, shift: bool) -> Vec<Action> {
        if key == "Enter" && !shift { self.submit(channel) } else { Vec::new() }
    }

    /// Populate the compose input from a starter prompt. Never sends.
    pub fn prompt_click(&mut self, channel: Channel, preset: &str) -> Vec<Action> {
        if !self.editing("prompt_click") {
            return Vec::new();
        }
        self.conversation.prompt_click(channel, preset);
        vec![Action::RenderNeeded, Action::FocusCompose(channel)]
    }

    pub fn undo(&mut self, channel: Channel, id: MessageId) -> Vec<Action> {
        if !self.editing("undo") {
            return Vec::new();
        }
        let focus_before = self.conversation.channel(channel).focus_seq;
        if !self.conversation.undo(channel, id) {
            return Vec::new();
        }
        let mut actions = vec![Action::RenderNeeded];
        if self.conversation.channel(channel).focus_seq != focus_before {
            actions.push(Action::FocusCompose(channel));
        }
        actions
    }

    /// Deliver a responder result for an earlier `ReplyRequested`.
    pub fn complete_reply(&mut self, pending: &PendingReply, result: Result<Message, ResponderError>) -> Vec<Action> {
        let current = self.conversation.channel(pending.channel).generation() == pending.generation;
        self.conversation.complete(pending, result);
        if current { vec![Action::RenderNeeded] } else { Vec::new() }
    }

    // --- Internals ---

    /// Editing events only apply while the editor is open.
    fn editing(&self, event: &'static str) -> bool {
        let open = self.navigator.view() == AppView::Edit;
        if !open {
            debug!(event, "event ignored in preview view");
        }
        open
    }

    fn apply_mode_change(&mut self, change: ModeChange) -> Vec<Action> {
        if change.changed() {
            debug!(from = ?change.from, to = ?change.to, "mode changed");
        }
        if change.entered(EditorMode::Controls) {
            self.conversation.enter_controls();
        }
        if change.left(EditorMode::Controls) {
            self.conversation.leave_controls();
        }
        if change.left(EditorMode::Design) {
            self.selection.deselect(&mut self.doc);
        }
        self.refresh()
    }

    /// Remount the current page and request a repaint.
    fn refresh(&mut self) -> Vec<Action> {
        self.remount();
        vec![Action::RenderNeeded]
    }

    fn remount(&mut self) {
        let page = self.navigator.page();
        let nodes = templates::build(page, &self.preview_flags());
        let unmounted = self.doc.mount(page, nodes);
        self.selection.forget_unmounted(&unmounted);
        self.resnapshot_selection();
    }

    /// Re-capture the selection snapshot after the theme or template styling
    /// changed under it.
    fn resnapshot_selection(&mut self) {
        let Some(current) = self.selection.current() else {
            return;
        };
        let (id, kind) = (current.node(), current.kind());
        self.selection.select(&mut self.doc, self.theme.active_colors(), id, kind);
    }
}

fn render_if(applied: bool) -> Vec<Action> {
    if applied { vec![Action::RenderNeeded] } else { Vec::new() }
}
