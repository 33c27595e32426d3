use std::collections::HashMap;

use taffy::prelude::{AvailableSpace, Rect as TRect, Size};
use taffy::style::{
    Dimension, Display, FlexDirection, FlexWrap, LengthPercentage, LengthPercentageAuto, Position,
    Style,
};

use crate::dom::cascade::{ComputedStyle, StyleResolver};
use crate::dom::css::Length;
use crate::dom::node::{Document, NodeId, NodeKind};
use crate::foundation::core::{Rect, Viewport};
use crate::foundation::error::TickerResult;
use crate::layout::LayoutSnapshot;
use crate::layout::text::{TextMetrics, collapse_whitespace};

#[derive(Debug, Clone)]
struct TextLeaf {
    text: String,
    font_size_px: f32,
    nowrap: bool,
}

/// One-shot Taffy tree mirroring the rendered part of a [`Document`].
///
/// Absolutely positioned subtrees are laid out as separate roots under max-content space,
/// then placed at their containing element's origin.
struct TaffyBridge<'a> {
    doc: &'a Document,
    styles: &'a StyleResolver,
    taffy: taffy::TaffyTree<TextLeaf>,
    dom_by_taffy: HashMap<taffy::NodeId, NodeId>,
    out_of_flow: Vec<(taffy::NodeId, NodeId)>,
}

struct Built {
    id: taffy::NodeId,
    out_of_flow: bool,
}

impl<'a> TaffyBridge<'a> {
    fn new(doc: &'a Document, styles: &'a StyleResolver) -> Self {
        Self {
            doc,
            styles,
            taffy: taffy::TaffyTree::new(),
            dom_by_taffy: HashMap::new(),
            out_of_flow: Vec::new(),
        }
    }

    fn build(
        &mut self,
        node: NodeId,
        parent: Option<&ComputedStyle>,
        viewport: &Viewport,
    ) -> TickerResult<Option<Built>> {
        let doc = self.doc;
        match doc.kind(node) {
            None => Ok(None),
            Some(NodeKind::Text(t)) => {
                if collapse_whitespace(t).is_empty() {
                    return Ok(None);
                }
                let (font_size_px, nowrap) = parent
                    .map(|s| (s.font_size_px() as f32, s.is_nowrap()))
                    .unwrap_or((16.0, false));
                let id = self.taffy.new_leaf_with_context(
                    Style::default(),
                    TextLeaf {
                        text: t.clone(),
                        font_size_px,
                        nowrap,
                    },
                )?;
                Ok(Some(Built {
                    id,
                    out_of_flow: false,
                }))
            }
            Some(NodeKind::Element(el)) => {
                let style = self.styles.cascade(doc, node, parent);
                let display = style.display(&el.tag).to_string();
                if display == "none" {
                    return Ok(None);
                }
                let mut kids = Vec::new();
                for child in doc.children(node) {
                    let Some(built) = self.build(*child, Some(&style), viewport)? else {
                        continue;
                    };
                    if built.out_of_flow {
                        self.out_of_flow.push((built.id, node));
                    } else {
                        kids.push(built.id);
                    }
                }
                let mut tstyle = taffy_style(&style, &display);
                if node == doc.document_element() {
                    tstyle.size.width = Dimension::length(viewport.width as f32);
                }
                let id = self.taffy.new_with_children(tstyle, &kids)?;
                self.dom_by_taffy.insert(id, node);
                Ok(Some(Built {
                    id,
                    out_of_flow: style.is_absolutely_positioned(),
                }))
            }
        }
    }

    fn solve(
        &mut self,
        root: taffy::NodeId,
        available: Size<AvailableSpace>,
        metrics: &mut dyn TextMetrics,
    ) -> TickerResult<()> {
        self.taffy.compute_layout_with_measure(
            root,
            available,
            |known_dimensions, available_space, _node_id, node_context, _style| {
                let Some(leaf) = node_context else {
                    return known_dimensions.unwrap_or(Size::ZERO);
                };
                if let Size {
                    width: Some(width),
                    height: Some(height),
                } = known_dimensions
                {
                    return Size { width, height };
                }
                let max_width = if leaf.nowrap {
                    None
                } else {
                    match available_space.width {
                        AvailableSpace::Definite(w) => Some(known_dimensions.width.unwrap_or(w)),
                        AvailableSpace::MinContent => Some(0.0),
                        AvailableSpace::MaxContent => None,
                    }
                };
                let extent = metrics.measure(&leaf.text, leaf.font_size_px, max_width);
                Size {
                    width: known_dimensions.width.unwrap_or(extent.width),
                    height: known_dimensions.height.unwrap_or(extent.height),
                }
            },
        )?;
        Ok(())
    }

    fn collect(
        &self,
        root: taffy::NodeId,
        origin: (f64, f64),
        out: &mut HashMap<NodeId, Rect>,
    ) -> TickerResult<()> {
        let mut stack = vec![(root, origin)];
        while let Some((nid, (px, py))) = stack.pop() {
            let l = self.taffy.layout(nid)?;
            let x = px + f64::from(l.location.x);
            let y = py + f64::from(l.location.y);
            if let Some(dom) = self.dom_by_taffy.get(&nid) {
                out.insert(
                    *dom,
                    Rect::new(x, y, x + f64::from(l.size.width), y + f64::from(l.size.height)),
                );
            }
            for child in self.taffy.children(nid)? {
                stack.push((child, (x, y)));
            }
        }
        Ok(())
    }
}

/// Lay out every rendered node of `doc` for `viewport`, returning document-space border boxes.
#[tracing::instrument(level = "trace", skip_all)]
pub fn compute_layout(
    doc: &Document,
    styles: &StyleResolver,
    viewport: &Viewport,
    metrics: &mut dyn TextMetrics,
) -> TickerResult<LayoutSnapshot> {
    let mut bridge = TaffyBridge::new(doc, styles);
    let mut rects = HashMap::new();
    let Some(root) = bridge.build(doc.document_element(), None, viewport)? else {
        return Ok(LayoutSnapshot { rects });
    };

    bridge.solve(
        root.id,
        Size {
            width: AvailableSpace::Definite(viewport.width as f32),
            height: AvailableSpace::MaxContent,
        },
        metrics,
    )?;
    bridge.collect(root.id, (0.0, 0.0), &mut rects)?;

    // Nested out-of-flow boxes were pushed before their out-of-flow ancestors.
    let detached: Vec<(taffy::NodeId, NodeId)> = bridge.out_of_flow.iter().rev().copied().collect();
    for (tid, containing) in detached {
        bridge.solve(
            tid,
            Size {
                width: AvailableSpace::MaxContent,
                height: AvailableSpace::MaxContent,
            },
            metrics,
        )?;
        let origin = rects
            .get(&containing)
            .map(|r| (r.x0, r.y0))
            .unwrap_or((0.0, 0.0));
        bridge.collect(tid, origin, &mut rects)?;
    }

    Ok(LayoutSnapshot { rects })
}

fn taffy_style(style: &ComputedStyle, display: &str) -> Style {
    let (display, flex_direction) = match display {
        "block" | "list-item" | "grid" | "table" => (Display::Block, FlexDirection::Row),
        "flex" | "inline-flex" => (
            Display::Flex,
            match style.get("flex-direction") {
                Some("column") => FlexDirection::Column,
                Some("column-reverse") => FlexDirection::ColumnReverse,
                Some("row-reverse") => FlexDirection::RowReverse,
                _ => FlexDirection::Row,
            },
        ),
        // inline formatting is approximated by a non-wrapping row
        _ => (Display::Flex, FlexDirection::Row),
    };
    let flex_wrap = match style.get("flex-wrap") {
        Some("wrap") | Some("wrap-reverse") => FlexWrap::Wrap,
        _ => FlexWrap::NoWrap,
    };

    let padding = TRect {
        left: length_percentage(style.length("padding-left")),
        right: length_percentage(style.length("padding-right")),
        top: length_percentage(style.length("padding-top")),
        bottom: length_percentage(style.length("padding-bottom")),
    };
    let margin = TRect {
        left: length_percentage_auto(style.length("margin-left")),
        right: length_percentage_auto(style.length("margin-right")),
        top: length_percentage_auto(style.length("margin-top")),
        bottom: length_percentage_auto(style.length("margin-bottom")),
    };
    let gap = Size {
        width: length_percentage(style.length("column-gap")),
        height: length_percentage(style.length("row-gap")),
    };

    Style {
        display,
        position: Position::Relative,
        flex_direction,
        flex_wrap,
        flex_grow: style.number("flex-grow").unwrap_or(0.0).max(0.0) as f32,
        flex_shrink: style.number("flex-shrink").unwrap_or(1.0).max(0.0) as f32,
        size: Size {
            width: dimension(style.length("width")),
            height: dimension(style.length("height")),
        },
        min_size: Size {
            width: dimension(style.length("min-width")),
            height: dimension(style.length("min-height")),
        },
        max_size: Size {
            width: dimension(style.length("max-width")),
            height: dimension(style.length("max-height")),
        },
        padding,
        margin,
        gap,
        ..Style::default()
    }
}

fn dimension(len: Option<Length>) -> Dimension {
    match len {
        Some(Length::Px(v)) => Dimension::length(v.max(0.0) as f32),
        Some(Length::Percent(p)) => Dimension::percent(p.max(0.0) as f32),
        Some(Length::Auto) | None => Dimension::auto(),
    }
}

fn length_percentage(len: Option<Length>) -> LengthPercentage {
    match len {
        Some(Length::Px(v)) => LengthPercentage::length(v.max(0.0) as f32),
        Some(Length::Percent(p)) => LengthPercentage::percent(p.max(0.0) as f32),
        Some(Length::Auto) | None => LengthPercentage::length(0.0),
    }
}

fn length_percentage_auto(len: Option<Length>) -> LengthPercentageAuto {
    match len {
        Some(Length::Px(v)) => LengthPercentageAuto::length(v as f32),
        Some(Length::Percent(p)) => LengthPercentageAuto::percent(p as f32),
        Some(Length::Auto) => LengthPercentageAuto::auto(),
        None => LengthPercentageAuto::length(0.0),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/taffy_bridge.rs"]
mod tests;
