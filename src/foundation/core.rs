use crate::foundation::error::{TickerError, TickerResult};

pub use kurbo::{Point, Rect, Size, Vec2};

/// Virtual page clock time in milliseconds.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct TimeMs(pub u64);

impl TimeMs {
    pub fn saturating_add(self, ms: u64) -> Self {
        Self(self.0.saturating_add(ms))
    }

    pub fn since(self, earlier: TimeMs) -> u64 {
        self.0.saturating_sub(earlier.0)
    }

    pub fn as_secs_f64(self) -> f64 {
        self.0 as f64 / 1000.0
    }
}

/// Visible page area: size in CSS pixels plus the document scroll offset.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub scroll_x: f64,
    #[serde(default)]
    pub scroll_y: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            scroll_x: 0.0,
            scroll_y: 0.0,
        }
    }
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> TickerResult<Self> {
        let vp = Self {
            width,
            height,
            scroll_x: 0.0,
            scroll_y: 0.0,
        };
        vp.validate()?;
        Ok(vp)
    }

    pub fn validate(&self) -> TickerResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(TickerError::validation("viewport width and height must be > 0"));
        }
        if !self.scroll_x.is_finite() || !self.scroll_y.is_finite() {
            return Err(TickerError::validation("viewport scroll offset must be finite"));
        }
        Ok(())
    }

    /// The visible area in document coordinates.
    pub fn rect(&self) -> Rect {
        Rect::new(
            self.scroll_x,
            self.scroll_y,
            self.scroll_x + f64::from(self.width),
            self.scroll_y + f64::from(self.height),
        )
    }

    /// Portrait/landscape swap, scroll offset kept.
    pub fn rotated(self) -> Self {
        Self {
            width: self.height,
            height: self.width,
            ..self
        }
    }
}

/// Round a laid-out length to whole pixels, clamping negatives and NaN to zero.
pub fn round_px(v: f64) -> u32 {
    if !v.is_finite() || v <= 0.0 {
        return 0;
    }
    v.round().min(f64::from(u32::MAX)) as u32
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
