//! Document model: the arena of preview nodes currently mounted.
//!
//! The renderer decides which nodes exist for a page (`templates`); this store
//! keeps them keyed by a stable `NodeId` together with the edits and
//! selection affordances layered on top. Other models refer to nodes by id
//! only and must tolerate an id disappearing when its page unmounts.
//!
//! Remounting the same page reconciles by id: nodes that survive keep their
//! edits and marks, nodes that vanish are dropped. Mounting a different page
//! drops everything, matching a full unmount of the previous page.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::navigator::{PreviewPage, Section};
use crate::style::{ComputedStyle, InlineStyle, StyleProperty};
use crate::theme::{ColorRole, ThemeColors};

/// Stable identifier for a preview node.
pub type NodeId = Uuid;

/// Derive the stable id of the node at `key` on `page`.
///
/// Ids are name-based so a re-render of the same page yields the same ids.
#[must_use]
pub fn node_id(page: PreviewPage, key: &str) -> NodeId {
    let name = format!("{}/{key}", page.slug());
    Uuid::new_v5(&Uuid::NAMESPACE_OID, name.as_bytes())
}

/// Coarse type of a selectable element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Text,
    Image,
    Icon,
}

/// Content carried by a node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NodeContent {
    Text { text: String },
    Image { src: String, alt: String },
    Icon { markup: String },
}

impl NodeContent {
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    #[must_use]
    pub fn kind(&self) -> ElementKind {
        match self {
            Self::Text { .. } => ElementKind::Text,
            Self::Image { .. } => ElementKind::Image,
            Self::Icon { .. } => ElementKind::Icon,
        }
    }
}

/// Where a node's text color comes from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColorSource {
    /// Follows one of the active theme channels.
    Theme(ColorRole),
    /// Fixed CSS color independent of the theme.
    Fixed(String),
}

/// Template-provided style of a node before theme and inline edits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseStyle {
    pub text_align: String,
    pub color: ColorSource,
    pub font_weight: String,
    pub font_size: String,
    pub font_family: String,
}

impl Default for BaseStyle {
    fn default() -> Self {
        Self {
            text_align: "left".into(),
            color: ColorSource::Theme(ColorRole::Text),
            font_weight: "400".into(),
            font_size: "16px".into(),
            font_family: "Onest, sans-serif".into(),
        }
    }
}

/// A node as produced by a page template.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreviewNode {
    pub id: NodeId,
    /// Template key, unique within the page.
    pub key: String,
    /// Results-page region the node belongs to, if any.
    pub section: Option<Section>,
    pub content: NodeContent,
    pub base: BaseStyle,
    /// Document order within the page.
    pub order: usize,
}

/// Edit-affordance markers shown on a node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Affordance {
    /// Selection outline is drawn.
    pub outlined: bool,
    /// Text content is editable in place.
    pub editable: bool,
    /// Node holds input focus.
    pub focused: bool,
}

/// A mounted node: template plus the edits layered on top.
#[derive(Clone, Debug)]
pub struct MountedNode {
    pub template: PreviewNode,
    pub inline: InlineStyle,
    /// Replacement content from in-place edits or asset updates.
    pub edited: Option<NodeContent>,
    pub marks: Affordance,
}

impl MountedNode {
    fn new(template: PreviewNode) -> Self {
        Self { template, inline: InlineStyle::default(), edited: None, marks: Affordance::default() }
    }

    #[must_use]
    pub fn id(&self) -> NodeId {
        self.template.id
    }

    #[must_use]
    pub fn kind(&self) -> ElementKind {
        self.template.content.kind()
    }

    /// Current content: the edit if present, otherwise the template's.
    #[must_use]
    pub fn content(&self) -> &NodeContent {
        self.edited.as_ref().unwrap_or(&self.template.content)
    }

    /// Effective style after theme resolution and inline overrides.
    #[must_use]
    pub fn effective_style(&self, theme: &ThemeColors) -> ComputedStyle {
        let base = &self.template.base;
        let color = match &base.color {
            ColorSource::Theme(role) => theme.role(*role).to_string(),
            ColorSource::Fixed(c) => c.clone(),
        };
        let mut style = ComputedStyle {
            text_align: base.text_align.clone(),
            color,
            font_weight: base.font_weight.clone(),
            font_size: base.font_size.clone(),
            font_family: base.font_family.clone(),
        };
        self.inline.apply_to(&mut style);
        style
    }
}

/// In-memory store of the nodes mounted for the previewed page.
#[derive(Debug, Default)]
pub struct DocStore {
    page: Option<PreviewPage>,
    nodes: HashMap<NodeId, MountedNode>,
}

impl DocStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount `templates` for `page`, returning the ids that were unmounted.
    pub fn mount(&mut self, page: PreviewPage, templates: Vec<PreviewNode>) -> Vec<NodeId> {
        let mut previous = std::mem::take(&mut self.nodes);
        let mut unmounted = Vec::new();

        if self.page != Some(page) {
            self.page = Some(page);
            unmounted.extend(previous.drain().map(|(id, _)| id));
        }

        for template in templates {
            let node = match previous.remove(&template.id) {
                Some(mut kept) if kept.kind() == template.content.kind() => {
                    kept.template = template;
                    kept
                }
                Some(replaced) => {
                    unmounted.push(replaced.id());
                    MountedNode::new(template)
                }
                None => MountedNode::new(template),
            };
            self.nodes.insert(node.id(), node);
        }

        unmounted.extend(previous.into_keys());
        unmounted.sort();
        unmounted
    }

    /// Page currently mounted, if any.
    #[must_use]
    pub fn page(&self) -> Option<PreviewPage> {
        self.page
    }

    #[must_use]
    pub fn get(&self, id: &NodeId) -> Option<&MountedNode> {
        self.nodes.get(id)
    }

    #[must_use]
    pub fn contains(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Look up a node by its template key.
    #[must_use]
    pub fn find_key(&self, key: &str) -> Option<&MountedNode> {
        self.nodes.values().find(|n| n.template.key == key)
    }

    /// Replace a node's affordance markers. Returns false if the node is not mounted.
    pub fn set_marks(&mut self, id: &NodeId, marks: Affordance) -> bool {
        let Some(node) = self.nodes.get_mut(id) else {
            return false;
        };
        node.marks = marks;
        true
    }

    /// Apply one inline style property. Returns false if the node is not mounted.
    pub fn apply_style(&mut self, id: &NodeId, property: StyleProperty, value: &str) -> bool {
        let Some(node) = self.nodes.get_mut(id) else {
            return false;
        };
        node.inline.set(property, value);
        true
    }

    /// Replace a node's content. The new content must be of the same kind.
    pub fn replace_content(&mut self, id: &NodeId, content: NodeContent) -> bool {
        let Some(node) = self.nodes.get_mut(id) else {
            return false;
        };
        if node.kind() != content.kind() {
            return false;
        }
        node.edited = Some(content);
        true
    }

    /// Mounted nodes in document order.
    #[must_use]
    pub fn ordered(&self) -> Vec<&MountedNode> {
        let mut nodes: Vec<&MountedNode> = self.nodes.values().collect();
        nodes.sort_by(|a, b| a.template.order.cmp(&b.template.order).then_with(|| a.id().cmp(&b.id())));
        nodes
    }

    /// Number of nodes currently showing the selection outline.
    #[must_use]
    pub fn outlined_count(&self) -> usize {
        self.nodes.values().filter(|n| n.marks.outlined).count()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
