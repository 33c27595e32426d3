use crate::dom::css::parse_float_prefix;

/// Which way a track scrolls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// `data-dir` value, trimmed and case-insensitive. Anything else is no override.
    pub fn parse_explicit(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "left" => Some(Self::Left),
            "right" => Some(Self::Right),
            _ => None,
        }
    }

    /// Even rows go left, odd rows go right.
    pub fn alternating(index: usize) -> Self {
        if index % 2 == 0 { Self::Left } else { Self::Right }
    }

    pub fn resolve(explicit: Option<&str>, index: usize) -> Self {
        explicit
            .and_then(Self::parse_explicit)
            .unwrap_or_else(|| Self::alternating(index))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// Loop parameters for one row.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct AnimationDescriptor {
    pub direction: Direction,
    pub duration_s: f64,
    pub distance_px: u32,
}

impl AnimationDescriptor {
    pub fn new(direction: Direction, distance_px: u32, speed_px_per_sec: f64, min_duration_secs: f64) -> Self {
        Self {
            direction,
            duration_s: loop_duration_secs(distance_px, speed_px_per_sec, min_duration_secs),
            distance_px,
        }
    }

    /// Start offset: `0` going left, `-distance` going right.
    pub fn from_x(&self) -> i64 {
        match self.direction {
            Direction::Left => 0,
            Direction::Right => -i64::from(self.distance_px),
        }
    }

    pub fn to_x(&self) -> i64 {
        match self.direction {
            Direction::Left => -i64::from(self.distance_px),
            Direction::Right => 0,
        }
    }
}

/// `max(min_duration, distance / speed)`, saturating at `f64::MAX` for tiny speeds.
pub fn loop_duration_secs(distance_px: u32, speed_px_per_sec: f64, min_duration_secs: f64) -> f64 {
    let raw = f64::from(distance_px) / speed_px_per_sec;
    if raw.is_nan() {
        min_duration_secs
    } else {
        raw.min(f64::MAX).max(min_duration_secs)
    }
}

/// Row override, else page default, else `fallback`.
///
/// Values are read with leading-number semantics (`"80px/s"` is 80); zero,
/// negative and unparseable values count as absent.
pub fn resolve_speed(row_value: Option<&str>, page_value: Option<&str>, fallback: f64) -> f64 {
    let positive = |v: Option<&str>| v.and_then(parse_float_prefix).filter(|s| *s > 0.0);
    positive(row_value)
        .or_else(|| positive(page_value))
        .unwrap_or(fallback)
}

/// Width to use when the probe reports nothing: half the duplicated track, at least 1px.
pub fn fallback_width(measured: u32, track_width: Option<f64>) -> u32 {
    let width = if measured > 0 {
        measured
    } else {
        track_width.map_or(0, |w| crate::foundation::core::round_px(w / 2.0))
    };
    width.max(1)
}

#[cfg(test)]
#[path = "../../tests/unit/ticker/descriptor.rs"]
mod tests;
