use crate::foundation::error::{TickerError, TickerResult};
use crate::ticker::backend::BackendKind;

/// Engine settings. Every field has a default, so `{}` is a valid JSON config.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TickerConfig {
    pub row_selector: String,
    pub track_class: String,
    pub pause_class: String,
    pub measure_class: String,
    pub style_element_id: String,
    pub keyframes_prefix: String,
    /// Custom property on the root element holding the page-wide speed.
    pub speed_property: String,
    pub default_speed_px_per_sec: f64,
    pub min_duration_secs: f64,
    pub debounce_ms: u64,
    pub visibility_threshold: f64,
    pub backend: BackendKind,
}

impl Default for TickerConfig {
    fn default() -> Self {
        Self {
            row_selector: ".ticker .row".to_string(),
            track_class: "track".to_string(),
            pause_class: "pause".to_string(),
            measure_class: "ticker-measure".to_string(),
            style_element_id: "ticker-dyn-style".to_string(),
            keyframes_prefix: "ticker_move_".to_string(),
            speed_property: "--px-per-sec".to_string(),
            default_speed_px_per_sec: 40.0,
            min_duration_secs: 6.0,
            debounce_ms: 150,
            visibility_threshold: 0.01,
            backend: BackendKind::default(),
        }
    }
}

impl TickerConfig {
    pub fn from_json(text: &str) -> TickerResult<Self> {
        let cfg: Self = serde_json::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn with_backend(mut self, backend: BackendKind) -> Self {
        self.backend = backend;
        self
    }

    pub fn validate(&self) -> TickerResult<()> {
        if !self.default_speed_px_per_sec.is_finite() || self.default_speed_px_per_sec <= 0.0 {
            return Err(TickerError::validation(
                "default_speed_px_per_sec must be finite and > 0",
            ));
        }
        if !self.min_duration_secs.is_finite() || self.min_duration_secs <= 0.0 {
            return Err(TickerError::validation(
                "min_duration_secs must be finite and > 0",
            ));
        }
        if !(0.0..=1.0).contains(&self.visibility_threshold) {
            return Err(TickerError::validation(
                "visibility_threshold must be in [0, 1]",
            ));
        }
        for (field, value) in [
            ("row_selector", &self.row_selector),
            ("track_class", &self.track_class),
            ("pause_class", &self.pause_class),
            ("measure_class", &self.measure_class),
            ("style_element_id", &self.style_element_id),
            ("keyframes_prefix", &self.keyframes_prefix),
        ] {
            if value.trim().is_empty() {
                return Err(TickerError::validation(format!("{field} must not be empty")));
            }
        }
        if !self.speed_property.starts_with("--") {
            return Err(TickerError::validation(
                "speed_property must be a custom property (`--name`)",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/ticker/config.rs"]
mod tests;
