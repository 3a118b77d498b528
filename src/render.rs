//! Preview rendering.
//!
//! `render` is a pure mapping from the mounted document, the active page and
//! theme, and the conversation-derived flags to a `RenderedPage` the host can
//! paint. Every rendered node carries its id and element kind so the host can
//! route clicks back to the selection model without knowing about templates.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use serde::{Deserialize, Serialize};

use crate::doc::{Affordance, DocStore, ElementKind, NodeContent, NodeId};
use crate::navigator::{Device, PreviewPage, Section};
use crate::style::ComputedStyle;
use crate::theme::ThemeColors;

/// Conversation-derived switches that change what the preview shows.
#[allow(clippy::struct_excessive_bools)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewFlags {
    /// A prompt was entered for the results header; swaps the personality-type copy.
    pub header_prompted: bool,
    /// A prompt was entered for the traits section; reveals "Learn More" buttons.
    pub traits_prompted: bool,
    /// The quiz title was changed from chat; switches the quiz to its animated theme.
    pub quiz_jazzed: bool,
}

/// Everything besides the document that a render depends on.
#[derive(Clone, Copy, Debug)]
pub struct RenderContext<'a> {
    pub page: PreviewPage,
    pub device: Device,
    pub theme: &'a ThemeColors,
    pub flags: PreviewFlags,
    pub selected_section: Option<Section>,
    pub hovered_section: Option<Section>,
}

/// Page-level visual treatment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageChrome {
    pub background: String,
    pub animated: bool,
    pub frame_width_px: u32,
}

/// A node ready to paint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedNode {
    pub id: NodeId,
    pub key: String,
    pub kind: ElementKind,
    pub section: Option<Section>,
    pub content: NodeContent,
    pub style: ComputedStyle,
    pub marks: Affordance,
    /// The node's section is hovered or selected in controls mode.
    pub section_highlighted: bool,
}

/// Output of one render pass.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedPage {
    pub page: PreviewPage,
    pub device: Device,
    pub chrome: PageChrome,
    pub nodes: Vec<RenderedNode>,
}

impl RenderedPage {
    /// Look up a rendered node by template key.
    #[must_use]
    pub fn node(&self, key: &str) -> Option<&RenderedNode> {
        self.nodes.iter().find(|n| n.key == key)
    }

    /// Text of the node at `key`, if it is a text node.
    #[must_use]
    pub fn text(&self, key: &str) -> Option<&str> {
        match &self.node(key)?.content {
            NodeContent::Text { text } => Some(text),
            _ => None,
        }
    }

    /// Static HTML for the code view.
    #[must_use]
    pub fn markup(&self) -> String {
        let mut out = format!(
            "<main data-page=\"{}\" style=\"background:{};max-width:{}px\">\n",
            self.page.slug(),
            escape(&self.chrome.background),
            self.chrome.frame_width_px
        );
        for node in &self.nodes {
            let style = format!(
                "text-align:{};color:{};font-weight:{};font-size:{};font-family:{}",
                node.style.text_align, node.style.color, node.style.font_weight, node.style.font_size, node.style.font_family
            );
            let line = match &node.content {
                NodeContent::Text { text } => {
                    format!("  <p data-key=\"{}\" style=\"{}\">{}</p>", node.key, escape(&style), escape(text))
                }
                NodeContent::Image { src, alt } => {
                    format!("  <img data-key=\"{}\" src=\"{}\" alt=\"{}\"/>", node.key, escape(src), escape(alt))
                }
                NodeContent::Icon { markup } => format!("  <span data-key=\"{}\">{markup}</span>", node.key),
            };
            out.push_str(&line);
            out.push('\n');
        }
        out.push_str("</main>\n");
        out
    }
}

/// Render the mounted document under `ctx`.
#[must_use]
pub fn render(doc: &DocStore, ctx: &RenderContext<'_>) -> RenderedPage {
    let nodes = doc
        .ordered()
        .into_iter()
        .map(|node| {
            let section = node.template.section;
            let section_highlighted =
                section.is_some() && (section == ctx.hovered_section || section == ctx.selected_section);
            RenderedNode {
                id: node.id(),
                key: node.template.key.clone(),
                kind: node.kind(),
                section,
                content: node.content().clone(),
                style: node.effective_style(ctx.theme),
                marks: node.marks,
                section_highlighted,
            }
        })
        .collect();

    RenderedPage { page: ctx.page, device: ctx.device, chrome: chrome(ctx), nodes }
}

fn chrome(ctx: &RenderContext<'_>) -> PageChrome {
    let theme = ctx.theme;
    let jazzed = ctx.page == PreviewPage::Gate && ctx.flags.quiz_jazzed;
    let background = if jazzed {
        format!("linear-gradient(135deg, {} 0%, {} 50%, {} 100%)", theme.primary, theme.accent, theme.secondary)
    } else if ctx.page == PreviewPage::DataCapture {
        "linear-gradient(to bottom right, #F3E8FF, #FDF2F8, #FFFFFF)".to_string()
    } else {
        "#FFFFFF".to_string()
    };
    PageChrome { background, animated: jazzed, frame_width_px: ctx.device.frame_width_px() }
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
