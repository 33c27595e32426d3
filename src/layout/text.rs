use crate::foundation::error::{TickerError, TickerResult};

/// Laid-out extent of a run of text.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextExtent {
    pub width: f32,
    pub height: f32,
}

/// Text shaping hook used by the layout pass.
///
/// `max_width` of `None` lays the text out on a single line.
pub trait TextMetrics: std::fmt::Debug {
    fn measure(&mut self, text: &str, font_size_px: f32, max_width: Option<f32>) -> TextExtent;
}

/// Collapse whitespace runs to one space and trim, as normal-flow text rendering does.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_ascii_whitespace().collect::<Vec<_>>().join(" ")
}

/// Deterministic metrics: every character advances by `advance_em * font_size`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedAdvanceMetrics {
    pub advance_em: f32,
    pub line_height_em: f32,
}

impl Default for FixedAdvanceMetrics {
    fn default() -> Self {
        Self {
            advance_em: 0.5,
            line_height_em: 1.2,
        }
    }
}

impl TextMetrics for FixedAdvanceMetrics {
    fn measure(&mut self, text: &str, font_size_px: f32, max_width: Option<f32>) -> TextExtent {
        let text = collapse_whitespace(text);
        if text.is_empty() {
            return TextExtent::default();
        }
        let advance = self.advance_em * font_size_px;
        let line_height = self.line_height_em * font_size_px;
        let width_of = |chars: usize| chars as f32 * advance;

        let Some(max_width) = max_width else {
            return TextExtent {
                width: width_of(text.chars().count()),
                height: line_height,
            };
        };

        // greedy word wrap
        let mut lines = 1usize;
        let mut widest = 0.0f32;
        let mut current = 0usize;
        for word in text.split(' ') {
            let n = word.chars().count();
            let candidate = if current == 0 { n } else { current + 1 + n };
            if current > 0 && width_of(candidate) > max_width {
                widest = widest.max(width_of(current));
                lines += 1;
                current = n;
            } else {
                current = candidate;
            }
        }
        widest = widest.max(width_of(current));
        TextExtent {
            width: widest,
            height: lines as f32 * line_height,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MeasureBrush;

/// Parley-backed metrics using one registered font family.
pub struct ParleyMetrics {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<MeasureBrush>,
    family_name: String,
}

impl std::fmt::Debug for ParleyMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParleyMetrics")
            .field("family_name", &self.family_name)
            .finish_non_exhaustive()
    }
}

impl ParleyMetrics {
    /// Register `font_bytes` and measure all text with its first family.
    pub fn from_font_bytes(font_bytes: &[u8]) -> TickerResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.to_vec()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            TickerError::validation("no font families registered from font bytes")
        })?;
        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| TickerError::validation("registered font family has no name"))?
            .to_string();
        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
        })
    }

    pub fn family_name(&self) -> &str {
        &self.family_name
    }
}

impl TextMetrics for ParleyMetrics {
    fn measure(&mut self, text: &str, font_size_px: f32, max_width: Option<f32>) -> TextExtent {
        let text = collapse_whitespace(text);
        if text.is_empty() || !font_size_px.is_finite() || font_size_px <= 0.0 {
            return TextExtent::default();
        }
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, &text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(font_size_px));
        builder.push_default(parley::style::StyleProperty::Brush(MeasureBrush));

        let mut layout: parley::Layout<MeasureBrush> = builder.build(&text);
        layout.break_all_lines(max_width);
        TextExtent {
            width: layout.width(),
            height: layout.height(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/text.rs"]
mod tests;
