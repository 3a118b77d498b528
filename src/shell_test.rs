use super::*;
use crate::conversation::Role;
use crate::style::FontWeight;
use crate::templates::{HEADER_TITLE, HEADER_TITLE_PROMPTED, LEARN_MORE_LABEL};

const HEADER: Channel = Channel::Section(Section::ResultsHeader);
const TRAITS: Channel = Channel::Section(Section::PersonalityTraits);

fn node(shell: &EditorShell, key: &str) -> NodeId {
    shell.doc().find_key(key).map(crate::doc::MountedNode::id).unwrap()
}

fn editor_shell() -> EditorShell {
    let mut shell = EditorShell::default();
    shell.open_editor();
    shell
}

fn design_shell() -> EditorShell {
    let mut shell = editor_shell();
    shell.set_mode(EditorMode::Design);
    shell
}

fn click_key(shell: &mut EditorShell, key: &str) -> Vec<Action> {
    let id = node(shell, key);
    let kind = shell.doc().get(&id).unwrap().kind();
    shell.click(ClickTarget::Element { id, kind })
}

fn pending_of(actions: Vec<Action>) -> PendingReply {
    actions
        .into_iter()
        .find_map(|a| match a {
            Action::ReplyRequested(p) => Some(p),
            _ => None,
        })
        .unwrap()
}

fn answer(shell: &mut EditorShell, pending: &PendingReply) -> Vec<Action> {
    shell.complete_reply(pending, Ok(Message::assistant("done")))
}

// =============================================================
// Construction
// =============================================================

#[test]
fn default_shell_mounts_initial_page() {
    let shell = EditorShell::default();
    assert_eq!(shell.navigator().view(), AppView::Preview);
    assert_eq!(shell.navigator().mode(), EditorMode::Chat);
    assert_eq!(shell.doc().page(), Some(PreviewPage::DataCapture));
    assert!(shell.doc().find_key("hero-title").is_some());
    assert_eq!(shell.theme().palette_id(), "original");
}

#[test]
fn config_drives_initial_page_and_palette() {
    let config = EditorConfig { palette_id: "ocean-blue".into(), initial_page: PreviewPage::Gate, ..EditorConfig::default() };
    let shell = EditorShell::new(config);
    assert_eq!(shell.render().page, PreviewPage::Gate);
    assert_eq!(shell.theme().active_colors().primary, "#0047AB");
}

// =============================================================
// App view
// =============================================================

#[test]
fn closing_editor_clears_selection() {
    let mut shell = design_shell();
    click_key(&mut shell, "hero-title");
    assert!(shell.selection().current().is_some());

    assert_eq!(shell.open_preview(), [Action::RenderNeeded]);
    assert_eq!(shell.navigator().view(), AppView::Preview);
    assert!(shell.selection().current().is_none());
    assert_eq!(shell.doc().outlined_count(), 0);
}

#[test]
fn preview_view_ignores_edits() {
    let mut shell = design_shell();
    shell.open_preview();
    assert_eq!(shell.navigator().mode(), EditorMode::Design);

    assert!(click_key(&mut shell, "hero-title").is_empty());
    assert!(click_key(&mut shell, "hero-image").is_empty());
    assert!(shell.selection().current().is_none());
    assert_eq!(shell.doc().outlined_count(), 0);

    let before = shell.render();
    assert!(shell.update_style(StyleProperty::TextAlign, "center").is_empty());
    assert!(shell.edit_text("Nope").is_empty());
    assert!(shell.update_image_source("https://cdn.test/star.png").is_empty());
    assert!(shell.update_icon_markup("<svg></svg>").is_empty());
    assert!(shell.send(Channel::Global, "Change the title").is_empty());
    assert!(shell.prompt_click(Channel::Global, "Make it shorter").is_empty());
    assert_eq!(shell.render(), before);
    assert!(shell.conversation().channel(Channel::Global).messages.is_empty());
    assert!(!shell.quiz_jazzed());
}

#[test]
fn reopening_editor_restores_editing() {
    let mut shell = design_shell();
    shell.open_preview();
    shell.open_editor();
    let id = node(&shell, "hero-title");
    assert_eq!(click_key(&mut shell, "hero-title"), [Action::RenderNeeded, Action::FocusNode(id)]);
}

// =============================================================
// Navigation
// =============================================================

#[test]
fn entering_controls_always_previews_results() {
    for page in PreviewPage::ALL {
        let mut shell = editor_shell();
        shell.set_page(page);
        shell.set_mode(EditorMode::Controls);
        assert_eq!(shell.navigator().page(), PreviewPage::Results);
        assert_eq!(shell.render().page, PreviewPage::Results);
        assert!(shell.doc().find_key("header-title").is_some());
    }
}

#[test]
fn controls_round_trip_resets_section_chats() {
    let mut shell = editor_shell();
    shell.set_mode(EditorMode::Controls);
    for section in Section::ALL {
        let pending = pending_of(shell.send(Channel::Section(section), "edit this"));
        answer(&mut shell, &pending);
    }

    shell.set_mode(EditorMode::Chat);
    shell.set_mode(EditorMode::Controls);

    for section in Section::ALL {
        let state = shell.conversation().channel(Channel::Section(section));
        assert!(state.messages.is_empty());
        assert!(state.show_prompts);
        assert!(!state.thinking);
    }
    assert_eq!(shell.preview_flags(), PreviewFlags::default());
}

#[test]
fn choose_mode_expands_collapsed_panel() {
    let mut shell = editor_shell();
    shell.toggle_panel();
    assert!(shell.navigator().panel_collapsed());
    shell.choose_mode(EditorMode::Brand);
    assert!(!shell.navigator().panel_collapsed());
    assert_eq!(shell.navigator().mode(), EditorMode::Brand);
}

#[test]
fn section_selection_and_hover_highlight() {
    let mut shell = editor_shell();
    assert!(shell.select_section(Some(Section::CareTips)).is_empty());

    shell.set_mode(EditorMode::Controls);
    assert_eq!(shell.select_section(Some(Section::CareTips)), [Action::RenderNeeded]);
    shell.hover_section(Some(Section::ResultsHeader));

    let page = shell.render();
    assert!(page.node("tips-title").unwrap().section_highlighted);
    assert!(page.node("header-title").unwrap().section_highlighted);
    assert!(!page.node("traits-title").unwrap().section_highlighted);
    assert!(!page.node("report-title").unwrap().section_highlighted);
}

#[test]
fn device_sets_frame_width() {
    let mut shell = editor_shell();
    shell.set_device(Device::Mobile);
    assert_eq!(shell.render().chrome.frame_width_px, 375);
    shell.set_device(Device::Tablet);
    assert_eq!(shell.render().chrome.frame_width_px, 768);
}

// =============================================================
// Selection
// =============================================================

#[test]
fn clicks_are_inert_outside_design_mode() {
    let mut shell = editor_shell();
    for mode in [EditorMode::Chat, EditorMode::Controls, EditorMode::Brand, EditorMode::Code, EditorMode::Settings] {
        shell.set_mode(mode);
        let first = shell.render().nodes[0].clone();
        assert!(shell.click(ClickTarget::Element { id: first.id, kind: first.kind }).is_empty());
        assert!(shell.selection().current().is_none());
        assert_eq!(shell.doc().outlined_count(), 0);
    }
}

#[test]
fn text_click_selects_and_focuses() {
    let mut shell = design_shell();
    let id = node(&shell, "hero-title");
    let actions = click_key(&mut shell, "hero-title");
    assert_eq!(actions, [Action::RenderNeeded, Action::FocusNode(id)]);

    let marks = shell.render().node("hero-title").unwrap().marks;
    assert!(marks.outlined && marks.editable && marks.focused);
}

#[test]
fn image_click_does_not_focus() {
    let mut shell = design_shell();
    assert_eq!(click_key(&mut shell, "hero-image"), [Action::RenderNeeded]);
    assert_eq!(shell.selection().current().unwrap().kind(), ElementKind::Image);
}

#[test]
fn at_most_one_outline_across_clicks() {
    let mut shell = design_shell();
    for key in ["hero-title", "hero-image", "bullet-care-icon", "form-cta", "hero-title", "brand"] {
        click_key(&mut shell, key);
        assert_eq!(shell.doc().outlined_count(), 1);
    }
}

#[test]
fn background_click_deselects() {
    let mut shell = design_shell();
    assert!(shell.click(ClickTarget::Background).is_empty());
    click_key(&mut shell, "form-title");
    assert_eq!(shell.click(ClickTarget::Background), [Action::RenderNeeded]);
    assert!(shell.selection().current().is_none());
    assert_eq!(shell.doc().outlined_count(), 0);
}

#[test]
fn leaving_design_clears_selection() {
    let mut shell = design_shell();
    click_key(&mut shell, "hero-title");
    shell.set_mode(EditorMode::Chat);
    assert!(shell.selection().current().is_none());
    assert_eq!(shell.doc().outlined_count(), 0);
}

#[test]
fn page_change_drops_selection() {
    let mut shell = design_shell();
    click_key(&mut shell, "brand");
    shell.set_page(PreviewPage::Gate);
    assert!(shell.selection().current().is_none());
    assert_eq!(shell.doc().outlined_count(), 0);
}

#[test]
fn font_weight_updates_stay_bucketed() {
    let mut shell = design_shell();
    click_key(&mut shell, "hero-body");
    for raw in ["650", "bold", "1000", "-3", "heavy", "451", ""] {
        shell.update_style(StyleProperty::FontWeight, raw);
        let weight = shell.selection().current().unwrap().snapshot().font_weight;
        assert!(
            [FontWeight::Normal, FontWeight::Medium, FontWeight::SemiBold, FontWeight::Bold].contains(&weight),
            "{raw}"
        );
    }
    shell.update_style(StyleProperty::FontWeight, "650");
    assert_eq!(shell.selection().current().unwrap().snapshot().font_weight, FontWeight::SemiBold);
    assert_eq!(shell.render().node("hero-body").unwrap().style.font_weight, "600");
}

#[test]
fn edits_survive_same_page_remount() {
    let mut shell = design_shell();
    click_key(&mut shell, "hero-title");
    shell.update_style(StyleProperty::TextAlign, "center");
    shell.edit_text("Find your starfish");

    // A global send remounts the current page with fresh flags.
    shell.send(Channel::Global, "Make it shorter");
    let page = shell.render();
    assert_eq!(page.node("hero-title").unwrap().style.text_align, "center");
    assert_eq!(page.text("hero-title"), Some("Find your starfish"));
    assert_eq!(shell.selection().current().unwrap().node(), node(&shell, "hero-title"));
}

#[test]
fn leaving_the_page_drops_its_edits() {
    let mut shell = design_shell();
    click_key(&mut shell, "hero-title");
    shell.update_style(StyleProperty::TextAlign, "center");
    shell.set_page(PreviewPage::Gate);
    shell.set_page(PreviewPage::DataCapture);
    assert_eq!(shell.render().node("hero-title").unwrap().style.text_align, "left");
}

#[test]
fn invalid_assets_are_ignored() {
    let mut shell = design_shell();
    click_key(&mut shell, "hero-image");
    assert!(shell.update_image_source("ftp://nope").is_empty());
    assert_eq!(shell.update_image_source("https://cdn.test/star.png"), [Action::RenderNeeded]);
    match &shell.render().node("hero-image").unwrap().content {
        crate::doc::NodeContent::Image { src, .. } => assert_eq!(src, "https://cdn.test/star.png"),
        other => panic!("unexpected content {other:?}"),
    }

    click_key(&mut shell, "bullet-care-icon");
    assert!(shell.update_icon_markup("<b>x</b>").is_empty());
    assert_eq!(shell.update_icon_markup("<svg></svg>"), [Action::RenderNeeded]);
}

#[test]
fn edit_text_commits_inline_copy() {
    let mut shell = design_shell();
    click_key(&mut shell, "form-title");
    shell.edit_text("Start the quiz");
    assert_eq!(shell.render().text("form-title"), Some("Start the quiz"));
}

// =============================================================
// Theme
// =============================================================

#[test]
fn select_palette_overwrites_colors() {
    let mut shell = editor_shell();
    assert_eq!(shell.select_palette("ocean-blue"), [Action::RenderNeeded]);
    let colors = shell.theme().active_colors();
    assert_eq!(colors.primary, "#0047AB");
    assert_eq!(colors.secondary, "#4A90E2");
    assert_eq!(colors.accent, "#1E3A8A");
    assert_eq!(colors.text, "#334155");
    assert!(shell.select_palette("no-such-palette").is_empty());
    assert_eq!(shell.theme().palette_id(), "ocean-blue");
}

#[test]
fn palette_change_refreshes_selection_snapshot() {
    let mut shell = design_shell();
    click_key(&mut shell, "hero-title");
    shell.select_palette("ocean-blue");
    assert_eq!(shell.selection().current().unwrap().snapshot().color, "#334155");
    assert_eq!(shell.doc().outlined_count(), 1);
}

#[test]
fn jazzed_quiz_refreshes_selection_snapshot() {
    let mut shell = design_shell();
    shell.set_page(PreviewPage::Gate);
    click_key(&mut shell, "quiz-title");
    assert_eq!(shell.selection().current().unwrap().snapshot().color, "#1F2937");

    shell.send(Channel::Global, "Change the title of the magnet.");
    let rendered = shell.render().node("quiz-title").unwrap().style.color.clone();
    assert_eq!(rendered, "#FFFFFF");
    assert_eq!(shell.selection().current().unwrap().snapshot().color, rendered);
    assert_eq!(shell.doc().outlined_count(), 1);
}

#[test]
fn brand_swatches_stay_panel_local() {
    let mut shell = editor_shell();
    let before = shell.render();
    shell.set_brand_swatch(BrandComponent::Buttons, "#FF0000");
    assert_eq!(shell.swatches().get(BrandComponent::Buttons), "#FF0000");
    assert_eq!(shell.render(), before);
}

// =============================================================
// Conversation
// =============================================================

#[test]
fn blank_send_is_noop() {
    let mut shell = editor_shell();
    assert!(shell.send(Channel::Global, "").is_empty());
    assert!(shell.send(Channel::Global, "   ").is_empty());
    let state = shell.conversation().channel(Channel::Global);
    assert!(state.messages.is_empty());
    assert!(!state.thinking);
}

#[test]
fn make_it_shorter_scenario() {
    let mut shell = editor_shell();
    let pending = pending_of(shell.send(Channel::Global, "Make it shorter"));
    {
        let state = shell.conversation().channel(Channel::Global);
        assert_eq!(state.messages.len(), 1);
        assert_eq!(state.messages[0].content, "Make it shorter");
        assert!(state.thinking);
    }
    assert_eq!(answer(&mut shell, &pending), [Action::RenderNeeded]);
    let state = shell.conversation().channel(Channel::Global);
    let roles: Vec<Role> = state.messages.iter().map(|m| m.role).collect();
    assert_eq!(roles, [Role::User, Role::Assistant]);
    assert!(!state.thinking);
}

#[test]
fn enter_submits_and_shift_enter_does_not() {
    let mut shell = editor_shell();
    shell.set_compose(Channel::Global, "Add a section");
    assert!(shell.key_down(Channel::Global, "Enter", true).is_empty());
    assert!(shell.key_down(Channel::Global, "a", false).is_empty());
    assert_eq!(shell.conversation().channel(Channel::Global).compose, "Add a section");

    let actions = shell.key_down(Channel::Global, "Enter", false);
    assert!(matches!(actions.last(), Some(Action::ReplyRequested(_))));
    assert!(shell.conversation().channel(Channel::Global).compose.is_empty());
}

#[test]
fn prompt_click_populates_without_sending() {
    let mut shell = editor_shell();
    shell.set_mode(EditorMode::Controls);
    let actions = shell.prompt_click(TRAITS, "Simplify the language");
    assert_eq!(actions, [Action::RenderNeeded, Action::FocusCompose(TRAITS)]);
    let state = shell.conversation().channel(TRAITS);
    assert_eq!(state.compose, "Simplify the language");
    assert!(state.messages.is_empty());
}

#[test]
fn starter_prompts_hide_after_send() {
    let mut shell = editor_shell();
    assert_eq!(shell.starter_prompts(Channel::Global).len(), 3);
    assert_eq!(shell.starter_prompts(TRAITS), Section::PersonalityTraits.starter_prompts());
    shell.send(Channel::Global, "hello");
    assert!(shell.starter_prompts(Channel::Global).is_empty());
}

#[test]
fn undo_user_message_focuses_compose() {
    let mut shell = editor_shell();
    let pending = pending_of(shell.send(Channel::Global, "Make it shorter"));
    answer(&mut shell, &pending);
    let first = shell.conversation().channel(Channel::Global).messages[0].id;

    let actions = shell.undo(Channel::Global, first);
    assert_eq!(actions, [Action::RenderNeeded, Action::FocusCompose(Channel::Global)]);
    assert_eq!(shell.conversation().channel(Channel::Global).compose, "Make it shorter");
    assert!(shell.undo(Channel::Global, first).is_empty());
}

#[test]
fn section_sends_require_controls_mode() {
    let mut shell = editor_shell();
    assert!(shell.send(HEADER, "Make it playful").is_empty());
    assert!(shell.conversation().channel(HEADER).messages.is_empty());
}

#[test]
fn stale_section_reply_is_discarded() {
    let mut shell = editor_shell();
    shell.set_mode(EditorMode::Controls);
    let pending = pending_of(shell.send(HEADER, "Make it playful"));
    shell.set_mode(EditorMode::Chat);
    shell.set_mode(EditorMode::Controls);

    assert!(answer(&mut shell, &pending).is_empty());
    assert!(shell.conversation().channel(HEADER).messages.is_empty());
}

#[test]
fn failed_reply_clears_thinking() {
    let mut shell = editor_shell();
    let pending = pending_of(shell.send(Channel::Global, "hello"));
    let actions = shell.complete_reply(&pending, Err(ResponderError::Timeout { after_ms: 10 }));
    assert_eq!(actions, [Action::RenderNeeded]);
    let state = shell.conversation().channel(Channel::Global);
    assert!(!state.thinking);
    assert_eq!(state.messages.len(), 1);
}

// =============================================================
// Conversation-derived preview flags
// =============================================================

#[test]
fn header_prompt_swaps_personality_copy() {
    let mut shell = editor_shell();
    shell.set_mode(EditorMode::Controls);
    assert_eq!(shell.render().text("header-title"), Some(HEADER_TITLE));
    shell.send(HEADER, "Make the personality type more playful.");
    assert_eq!(shell.render().text("header-title"), Some(HEADER_TITLE_PROMPTED));

    shell.set_mode(EditorMode::Chat);
    assert_eq!(shell.render().text("header-title"), Some(HEADER_TITLE));
}

#[test]
fn traits_prompt_reveals_learn_more() {
    let mut shell = editor_shell();
    shell.set_mode(EditorMode::Controls);
    let count = |shell: &EditorShell| shell.render().nodes.iter().filter(|n| n.key.ends_with("-learn-more")).count();
    assert_eq!(count(&shell), 0);
    shell.send(TRAITS, "Add a Learn More button to each trait.");
    assert_eq!(count(&shell), 4);
    let page = shell.render();
    let button = page.nodes.iter().find(|n| n.key.ends_with("-learn-more")).unwrap();
    assert_eq!(page.text(&button.key), Some(LEARN_MORE_LABEL));
}

#[test]
fn title_message_jazzes_quiz_permanently() {
    let mut shell = editor_shell();
    shell.set_page(PreviewPage::Gate);
    assert!(!shell.render().chrome.animated);

    let pending = pending_of(shell.send(Channel::Global, "Change the TITLE of the magnet."));
    assert!(shell.quiz_jazzed());
    let page = shell.render();
    assert!(page.chrome.animated);
    assert_eq!(page.node("quiz-title").unwrap().style.color, "#FFFFFF");

    answer(&mut shell, &pending);
    let first = shell.conversation().channel(Channel::Global).messages[0].id;
    shell.undo(Channel::Global, first);
    shell.set_mode(EditorMode::Controls);
    shell.set_mode(EditorMode::Chat);
    assert!(shell.quiz_jazzed());
}

#[test]
fn code_view_reflects_rendered_page() {
    let mut shell = design_shell();
    click_key(&mut shell, "form-title");
    shell.edit_text("Quiz <now>");
    let code = shell.code_view();
    assert!(code.starts_with("<main data-page=\"dataCapture\""));
    assert!(code.contains("Quiz &lt;now&gt;"));
}
