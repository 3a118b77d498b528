//! Page templates: the marketing copy and layout of each funnel page.
//!
//! Each page is a flat, ordered list of selectable nodes. Keys are stable per
//! page so ids survive re-renders; flag-dependent copy keeps the same key and
//! only changes content.

use crate::doc::{BaseStyle, ColorSource, NodeContent, PreviewNode, node_id};
use crate::navigator::{PreviewPage, Section};
use crate::render::PreviewFlags;
use crate::theme::ColorRole;

const CHECK_ICON: &str = r#"<svg viewBox="0 0 20 20" fill="currentColor"><path d="M16.7 5.3a1 1 0 010 1.4l-8 8a1 1 0 01-1.4 0l-4-4a1 1 0 011.4-1.4L8 12.6l7.3-7.3a1 1 0 011.4 0z"/></svg>"#;
const STAR_ICON: &str = r#"<svg viewBox="0 0 24 24" fill="currentColor"><path d="M12 2l3 7h7l-5.5 4.5 2 7.5L12 17l-6.5 4 2-7.5L2 9h7z"/></svg>"#;
const LEAF_ICON: &str = r#"<svg viewBox="0 0 24 24" fill="none" stroke="currentColor"><path d="M5 21c8 0 14-6 14-16-10 0-16 6-16 14"/></svg>"#;

const HERO_IMAGE_URL: &str = "https://images.unsplash.com/photo-1559827260-dc66d52bef19?w=400&h=400&fit=crop";

/// Personality-type headline before and after the header section was prompted.
pub const HEADER_TITLE: &str = "Your Starfish Profile: The Explorer!";
pub const HEADER_TITLE_PROMPTED: &str = "Your Starfish Profile: The Daring Adventurer!";

/// Label of the per-trait button revealed once the traits section was prompted.
pub const LEARN_MORE_LABEL: &str = "Learn More";

const TRAITS: [(&str, &str, &str); 4] = [
    ("active", "Active", "Your starfish enjoys exploring its environment and is quite energetic."),
    ("social", "Social", "Shows interest in tankmates and interactive feeding sessions."),
    ("curious", "Curious", "Loves to investigate new objects and changes in the habitat."),
    ("healthy", "Healthy", "Displays good appetite and normal regeneration patterns."),
];

const CARE_TIPS: [(&str, &str, &str); 3] = [
    (
        "enrichment",
        "Enrichment Activities",
        "Provide varied textures and objects for exploration. Rotate decorations monthly to keep things interesting.",
    ),
    (
        "feeding",
        "Feeding Schedule",
        "Feed 2-3 times per week with varied diet. Your active starfish may benefit from slightly more frequent feeding.",
    ),
    (
        "tank",
        "Tank Maintenance",
        "Maintain stable water parameters. Explorer personalities thrive with consistent conditions and gentle water flow.",
    ),
];

const QUIZ_ANSWERS: [(&str, &str); 4] = [
    ("answer-1", "Very active and eager"),
    ("answer-2", "Moderately active"),
    ("answer-3", "Calm and patient"),
    ("answer-4", "Not very interested"),
];

/// Build the node templates for `page` under the given flags.
#[must_use]
pub fn build(page: PreviewPage, flags: &PreviewFlags) -> Vec<PreviewNode> {
    let mut b = PageBuilder::new(page);
    match page {
        PreviewPage::DataCapture => data_capture(&mut b),
        PreviewPage::Gate => gate(&mut b, flags),
        PreviewPage::Results => results(&mut b, flags),
    }
    b.nodes
}

fn data_capture(b: &mut PageBuilder) {
    b.text("brand", "ZORVO", eyebrow());
    b.text("hero-title", "Unlock Your Starfish Potential with the Starfish Quiz!", heading("48px", "700", "left"));
    b.text(
        "hero-body",
        "Discover your starfish's hidden talents and needs with our fun and informative quiz. Get personalized insights to ensure a happy and healthy starfish.",
        body("18px"),
    );
    let bullets = [
        ("bullet-personality", "Understand your starfish's unique personality"),
        ("bullet-care", "Get tailored care tips for optimal health"),
        ("bullet-habitat", "Learn how to create the perfect starfish habitat"),
    ];
    for (key, text) in bullets {
        b.icon(&format!("{key}-icon"), CHECK_ICON);
        b.text(key, text, body("14px"));
    }
    b.image("hero-image", HERO_IMAGE_URL, "A vibrant starfish on a sandy seabed");
    b.text("form-title", "Take the Starfish Quiz Now!", heading("30px", "700", "center"));
    b.text("form-cta", "Discover My Starfish's Potential", button());
    b.text("form-privacy", "We respect your privacy. Unsubscribe at any time.", fine_print());
}

fn gate(b: &mut PageBuilder, flags: &PreviewFlags) {
    let title_color = if flags.quiz_jazzed {
        ColorSource::Fixed("#FFFFFF".into())
    } else {
        ColorSource::Theme(ColorRole::Text)
    };

    b.text("brand", "ZORVO", eyebrow());
    b.text("quiz-title", "Starfish Personality Quiz", BaseStyle { color: title_color, ..heading("36px", "700", "center") });
    b.text("quiz-subtitle", "Answer these questions to discover your starfish's unique traits", body("18px"));
    b.text("progress", "Question 3 of 8", BaseStyle { font_weight: "500".into(), ..body("14px") });
    b.text("question", "How active is your starfish during feeding time?", heading("24px", "700", "center"));
    for (key, text) in QUIZ_ANSWERS {
        b.text(key, text, heading("18px", "600", "left"));
    }
    b.text("next", "Next Question", button());
}

fn results(b: &mut PageBuilder, flags: &PreviewFlags) {
    b.section(Some(Section::ResultsHeader));
    b.icon("header-icon", STAR_ICON);
    let title = if flags.header_prompted { HEADER_TITLE_PROMPTED } else { HEADER_TITLE };
    b.text("header-title", title, heading("36px", "700", "center"));
    b.text(
        "header-body",
        "Congratulations! Your starfish has a curious and adventurous personality. Here's what we learned about your marine friend.",
        BaseStyle { text_align: "center".into(), ..body("18px") },
    );

    b.section(Some(Section::PersonalityTraits));
    b.text("traits-title", "Personality Traits", heading("30px", "700", "center"));
    for (key, name, description) in TRAITS {
        b.icon(&format!("trait-{key}-icon"), STAR_ICON);
        b.text(&format!("trait-{key}-name"), name, heading("18px", "700", "left"));
        b.text(&format!("trait-{key}-body"), description, body("14px"));
        if flags.traits_prompted {
            b.text(&format!("trait-{key}-learn-more"), LEARN_MORE_LABEL, button());
        }
    }

    b.section(Some(Section::CareTips));
    b.text("tips-title", "Personalized Care Tips", heading("30px", "700", "center"));
    for (key, name, description) in CARE_TIPS {
        b.icon(&format!("tip-{key}-icon"), LEAF_ICON);
        b.text(&format!("tip-{key}-name"), name, heading("18px", "700", "left"));
        b.text(&format!("tip-{key}-body"), description, body("16px"));
    }

    b.section(None);
    b.text("report-title", "Want Your Full Report?", heading("30px", "700", "center"));
    b.text("report-cta", "Download Full Report (PDF)", button());
}

// --- Style presets ---

fn heading(size: &str, weight: &str, align: &str) -> BaseStyle {
    BaseStyle {
        text_align: align.into(),
        font_weight: weight.into(),
        font_size: size.into(),
        ..BaseStyle::default()
    }
}

fn body(size: &str) -> BaseStyle {
    BaseStyle { color: ColorSource::Fixed("#374151".into()), font_size: size.into(), ..BaseStyle::default() }
}

fn eyebrow() -> BaseStyle {
    BaseStyle {
        color: ColorSource::Fixed("#4B5563".into()),
        font_weight: "600".into(),
        font_size: "12px".into(),
        ..BaseStyle::default()
    }
}

fn button() -> BaseStyle {
    BaseStyle {
        text_align: "center".into(),
        color: ColorSource::Theme(ColorRole::Primary),
        font_weight: "600".into(),
        ..BaseStyle::default()
    }
}

fn fine_print() -> BaseStyle {
    BaseStyle {
        text_align: "center".into(),
        color: ColorSource::Fixed("#6B7280".into()),
        font_size: "12px".into(),
        ..BaseStyle::default()
    }
}

// --- Builder ---

struct PageBuilder {
    page: PreviewPage,
    section: Option<Section>,
    nodes: Vec<PreviewNode>,
}

impl PageBuilder {
    fn new(page: PreviewPage) -> Self {
        Self { page, section: None, nodes: Vec::new() }
    }

    fn section(&mut self, section: Option<Section>) {
        self.section = section;
    }

    fn push(&mut self, key: &str, content: NodeContent, base: BaseStyle) {
        let order = self.nodes.len();
        self.nodes.push(PreviewNode {
            id: node_id(self.page, key),
            key: key.to_string(),
            section: self.section,
            content,
            base,
            order,
        });
    }

    fn text(&mut self, key: &str, text: &str, base: BaseStyle) {
        self.push(key, NodeContent::text(text), base);
    }

    fn image(&mut self, key: &str, src: &str, alt: &str) {
        self.push(key, NodeContent::Image { src: src.into(), alt: alt.into() }, BaseStyle::default());
    }

    fn icon(&mut self, key: &str, markup: &str) {
        let base = BaseStyle { color: ColorSource::Theme(ColorRole::Accent), ..BaseStyle::default() };
        self.push(key, NodeContent::Icon { markup: markup.into() }, base);
    }
}
