//! Layout pass (Taffy) and text metrics (Parley or fixed advance).

use std::collections::HashMap;

use crate::dom::node::NodeId;
use crate::foundation::core::Rect;

pub(crate) mod taffy_bridge;
pub(crate) mod text;

/// Document-space border boxes of every rendered element.
///
/// Elements with `display: none` (or inside one) have no entry.
#[derive(Debug, Clone, Default)]
pub struct LayoutSnapshot {
    pub(crate) rects: HashMap<NodeId, Rect>,
}

impl LayoutSnapshot {
    pub fn rect(&self, node: NodeId) -> Option<Rect> {
        self.rects.get(&node).copied()
    }

    pub fn width(&self, node: NodeId) -> Option<f64> {
        self.rect(node).map(|r| r.width())
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }
}
