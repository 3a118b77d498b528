//! Selection model for design mode.
//!
//! DESIGN
//! ======
//! At most one preview node is selected. The selection stores only the node's
//! id plus a normalized style snapshot; the document owns the node itself and
//! the outline/edit markers drawn on it. Every transition clears the previous
//! node's markers before marking the next one, so no two nodes are ever
//! outlined at once.

#[cfg(test)]
#[path = "selection_test.rs"]
mod selection_test;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::doc::{Affordance, DocStore, ElementKind, NodeContent, NodeId};
use crate::style::{StyleProperty, StyleSnapshot};
use crate::theme::ThemeColors;

/// The active selection, tagged by element kind.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Selection {
    Text { node: NodeId, snapshot: StyleSnapshot },
    Image { node: NodeId, snapshot: StyleSnapshot },
    Icon { node: NodeId, snapshot: StyleSnapshot },
}

impl Selection {
    fn new(kind: ElementKind, node: NodeId, snapshot: StyleSnapshot) -> Self {
        match kind {
            ElementKind::Text => Self::Text { node, snapshot },
            ElementKind::Image => Self::Image { node, snapshot },
            ElementKind::Icon => Self::Icon { node, snapshot },
        }
    }

    #[must_use]
    pub fn node(&self) -> NodeId {
        match self {
            Self::Text { node, .. } | Self::Image { node, .. } | Self::Icon { node, .. } => *node,
        }
    }

    #[must_use]
    pub fn kind(&self) -> ElementKind {
        match self {
            Self::Text { .. } => ElementKind::Text,
            Self::Image { .. } => ElementKind::Image,
            Self::Icon { .. } => ElementKind::Icon,
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> &StyleSnapshot {
        match self {
            Self::Text { snapshot, .. } | Self::Image { snapshot, .. } | Self::Icon { snapshot, .. } => snapshot,
        }
    }

    fn snapshot_mut(&mut self) -> &mut StyleSnapshot {
        match self {
            Self::Text { snapshot, .. } | Self::Image { snapshot, .. } | Self::Icon { snapshot, .. } => snapshot,
        }
    }
}

/// Tracks the selected preview node.
#[derive(Clone, Debug, Default)]
pub struct SelectionModel {
    current: Option<Selection>,
}

impl SelectionModel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn current(&self) -> Option<&Selection> {
        self.current.as_ref()
    }

    /// Select the node `id`, which the renderer reported as `kind`.
    ///
    /// Returns false (and leaves the current selection alone) if the node is
    /// not mounted or its kind does not match.
    pub fn select(&mut self, doc: &mut DocStore, theme: &ThemeColors, id: NodeId, kind: ElementKind) -> bool {
        let Some(node) = doc.get(&id) else {
            return false;
        };
        if node.kind() != kind {
            return false;
        }
        let snapshot = StyleSnapshot::capture(&node.effective_style(theme));

        self.clear_marks(doc);

        let marks = match kind {
            ElementKind::Text => Affordance { outlined: true, editable: true, focused: true },
            ElementKind::Image | ElementKind::Icon => Affordance { outlined: true, ..Affordance::default() },
        };
        doc.set_marks(&id, marks);
        debug!(node = %id, ?kind, "element selected");
        self.current = Some(Selection::new(kind, id, snapshot));
        true
    }

    /// Clear the selection and its markers. Returns false if nothing was selected.
    pub fn deselect(&mut self, doc: &mut DocStore) -> bool {
        if self.current.is_none() {
            return false;
        }
        self.clear_marks(doc);
        self.current = None;
        true
    }

    /// Apply one style property to the selected node and refresh the snapshot.
    pub fn update_style(&mut self, doc: &mut DocStore, theme: &ThemeColors, property: StyleProperty, value: &str) -> bool {
        let Some(selection) = self.current.as_mut() else {
            return false;
        };
        let id = selection.node();
        if !doc.apply_style(&id, property, value) {
            return false;
        }
        if let Some(node) = doc.get(&id) {
            *selection.snapshot_mut() = StyleSnapshot::capture(&node.effective_style(theme));
        }
        true
    }

    /// Point the selected image at a new source. No-op unless an image is selected.
    pub fn update_image_source(&mut self, doc: &mut DocStore, url: &str) -> bool {
        let Some(Selection::Image { node, .. }) = &self.current else {
            return false;
        };
        let alt = match doc.get(node).map(crate::doc::MountedNode::content) {
            Some(NodeContent::Image { alt, .. }) => alt.clone(),
            _ => String::new(),
        };
        doc.replace_content(node, NodeContent::Image { src: url.to_string(), alt })
    }

    /// Replace the selected icon's markup. No-op unless an icon is selected.
    pub fn update_icon_markup(&mut self, doc: &mut DocStore, markup: &str) -> bool {
        let Some(Selection::Icon { node, .. }) = &self.current else {
            return false;
        };
        doc.replace_content(node, NodeContent::Icon { markup: markup.to_string() })
    }

    /// Commit in-place text edits. No-op unless a text node is selected.
    pub fn edit_text(&mut self, doc: &mut DocStore, text: &str) -> bool {
        let Some(Selection::Text { node, .. }) = &self.current else {
            return false;
        };
        doc.replace_content(node, NodeContent::text(text))
    }

    /// Drop the selection if its node was unmounted. Returns true if it was dropped.
    pub fn forget_unmounted(&mut self, unmounted: &[NodeId]) -> bool {
        match &self.current {
            Some(selection) if unmounted.contains(&selection.node()) => {
                debug!(node = %selection.node(), "selected element unmounted");
                self.current = None;
                true
            }
            _ => false,
        }
    }

    fn clear_marks(&self, doc: &mut DocStore) {
        if let Some(selection) = &self.current {
            doc.set_marks(&selection.node(), Affordance::default());
        }
    }
}
