//! Minimal CSS text handling: declaration blocks, stylesheets with `@keyframes`, and value parsers.

use crate::dom::selector::SelectorList;

/// Ordered `property: value` list. Later writes to the same property replace in place.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Declarations {
    entries: Vec<(String, String)>,
}

impl Declarations {
    /// Parse `a: b; c: d`. Malformed entries are dropped.
    pub fn parse(text: &str) -> Self {
        let mut out = Self::default();
        for part in text.split(';') {
            let Some((name, value)) = part.split_once(':') else {
                continue;
            };
            let name = name.trim();
            let value = value.trim();
            if name.is_empty() || value.is_empty() {
                continue;
            }
            out.set(name, value);
        }
        out
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        let name = normalize_name(name);
        self.entries
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn set(&mut self, name: &str, value: &str) {
        let name = normalize_name(name);
        let value = value.trim().to_string();
        match self.entries.iter_mut().find(|(k, _)| *k == name) {
            Some((_, v)) => *v = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Returns whether the property was present.
    pub fn remove(&mut self, name: &str) -> bool {
        let name = normalize_name(name);
        let before = self.entries.len();
        self.entries.retain(|(k, _)| *k != name);
        self.entries.len() != before
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn to_css_text(&self) -> String {
        self.entries
            .iter()
            .map(|(k, v)| format!("{k}: {v};"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Custom properties (`--x`) are case-sensitive; everything else is not.
fn normalize_name(name: &str) -> String {
    let name = name.trim();
    if name.starts_with("--") {
        name.to_string()
    } else {
        name.to_ascii_lowercase()
    }
}

#[derive(Debug, Clone)]
pub struct StyleRule {
    pub selectors: SelectorList,
    pub declarations: Declarations,
}

/// One `NN% { ... }` stop of a keyframes rule; `offset` is in `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyframeStop {
    pub offset: f64,
    pub declarations: Declarations,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeyframesRule {
    pub name: String,
    pub stops: Vec<KeyframeStop>, // sorted by offset
}

impl KeyframesRule {
    /// Linearly interpolated horizontal translation at `progress` in `[0, 1]`.
    pub fn translate_x_at(&self, progress: f64) -> Option<f64> {
        let stops: Vec<(f64, f64)> = self
            .stops
            .iter()
            .filter_map(|s| {
                let x = parse_translate_x(s.declarations.get("transform")?)?;
                Some((s.offset, x))
            })
            .collect();
        let first = stops.first()?;
        let last = stops.last()?;
        let p = progress.clamp(0.0, 1.0);
        if p <= first.0 {
            return Some(first.1);
        }
        if p >= last.0 {
            return Some(last.1);
        }
        let idx = stops.partition_point(|(o, _)| *o <= p);
        let (a_off, a_x) = stops[idx - 1];
        let (b_off, b_x) = stops[idx];
        let span = b_off - a_off;
        if span <= 0.0 {
            return Some(a_x);
        }
        let t = (p - a_off) / span;
        Some(a_x + (b_x - a_x) * t)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Stylesheet {
    pub rules: Vec<StyleRule>,
    pub keyframes: Vec<KeyframesRule>,
}

impl Stylesheet {
    /// Tolerant parse: comments are stripped, unknown at-rules and bad selectors are skipped.
    pub fn parse(text: &str) -> Self {
        let text = strip_comments(text);
        let mut sheet = Self::default();
        let mut rest = text.as_str();
        loop {
            rest = rest.trim_start();
            if rest.is_empty() {
                break;
            }
            let Some(open) = rest.find('{') else {
                break;
            };
            let prelude = rest[..open].trim();
            let Some(close) = matching_brace(rest, open) else {
                tracing::trace!(prelude, "unterminated css block");
                break;
            };
            let body = &rest[open + 1..close];
            rest = &rest[close + 1..];

            if let Some(name) = prelude
                .strip_prefix("@keyframes")
                .or_else(|| prelude.strip_prefix("@-webkit-keyframes"))
            {
                let name = name.trim();
                if !name.is_empty() {
                    sheet.keyframes.push(parse_keyframes(name, body));
                }
                continue;
            }
            if prelude.starts_with('@') {
                continue;
            }
            match SelectorList::parse(prelude) {
                Ok(selectors) => sheet.rules.push(StyleRule {
                    selectors,
                    declarations: Declarations::parse(body),
                }),
                Err(err) => tracing::trace!(prelude, %err, "skipping css rule"),
            }
        }
        sheet
    }

    /// Later rules with the same name win, as in a browser.
    pub fn find_keyframes(&self, name: &str) -> Option<&KeyframesRule> {
        self.keyframes.iter().rev().find(|k| k.name == name)
    }
}

fn parse_keyframes(name: &str, body: &str) -> KeyframesRule {
    let mut stops = Vec::new();
    let mut rest = body;
    loop {
        rest = rest.trim_start();
        let Some(open) = rest.find('{') else {
            break;
        };
        let Some(close) = matching_brace(rest, open) else {
            break;
        };
        let selector = rest[..open].trim();
        let declarations = Declarations::parse(&rest[open + 1..close]);
        for sel in selector.split(',') {
            let offset = match sel.trim() {
                "from" => Some(0.0),
                "to" => Some(1.0),
                pct => pct
                    .strip_suffix('%')
                    .and_then(|v| v.trim().parse::<f64>().ok())
                    .map(|v| v / 100.0),
            };
            if let Some(offset) = offset.filter(|o| (0.0..=1.0).contains(o)) {
                stops.push(KeyframeStop {
                    offset,
                    declarations: declarations.clone(),
                });
            }
        }
        rest = &rest[close + 1..];
    }
    stops.sort_by(|a, b| a.offset.total_cmp(&b.offset));
    KeyframesRule {
        name: name.to_string(),
        stops,
    }
}

fn strip_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find("/*") {
        out.push_str(&rest[..start]);
        match rest[start + 2..].find("*/") {
            Some(end) => rest = &rest[start + 2 + end + 2..],
            None => {
                rest = "";
                break;
            }
        }
    }
    out.push_str(rest);
    out
}

fn matching_brace(text: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, ch) in text[open..].char_indices() {
        match ch {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Leading-number parse with `parseFloat` semantics: `"40px"` is 40, `"abc"` is `None`.
pub fn parse_float_prefix(text: &str) -> Option<f64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    if end < bytes.len() && (bytes[end] == b'+' || bytes[end] == b'-') {
        end += 1;
    }
    let mut seen_digit = false;
    let mut seen_dot = false;
    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' => seen_digit = true,
            b'.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end += 1;
    }
    if !seen_digit {
        return None;
    }
    // exponent only if followed by digits
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > digits_start {
            end = exp_end;
        }
    }
    s[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

/// A CSS length the layout pass understands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Length {
    Px(f64),
    Percent(f64),
    Auto,
}

/// `12px`, `12`, `50%`, `auto`. Other units are rejected.
pub fn parse_length(value: &str) -> Option<Length> {
    let v = value.trim().to_ascii_lowercase();
    if v == "auto" {
        return Some(Length::Auto);
    }
    if let Some(num) = v.strip_suffix("px") {
        return num.trim().parse::<f64>().ok().map(Length::Px);
    }
    if let Some(num) = v.strip_suffix('%') {
        return num.trim().parse::<f64>().ok().map(|p| Length::Percent(p / 100.0));
    }
    v.parse::<f64>().ok().map(Length::Px)
}

/// Horizontal offset of `translate3d(..)`, `translateX(..)`, `translate(..)`, or `none`.
pub fn parse_translate_x(value: &str) -> Option<f64> {
    let v = value.trim();
    if v.eq_ignore_ascii_case("none") {
        return Some(0.0);
    }
    let open = v.find('(')?;
    let func = v[..open].trim().to_ascii_lowercase();
    let close = v.rfind(')')?;
    let args = &v[open + 1..close];
    let first = args.split(',').next()?.trim();
    match func.as_str() {
        "translate3d" | "translatex" | "translate" => match parse_length(first)? {
            Length::Px(px) => Some(px),
            _ => None,
        },
        _ => None,
    }
}

/// `7.5s` or `150ms` to milliseconds.
pub fn parse_time_ms(value: &str) -> Option<f64> {
    let v = value.trim().to_ascii_lowercase();
    if let Some(ms) = v.strip_suffix("ms") {
        return ms.trim().parse::<f64>().ok();
    }
    if let Some(s) = v.strip_suffix('s') {
        return s.trim().parse::<f64>().ok().map(|s| s * 1000.0);
    }
    None
}

#[cfg(test)]
#[path = "../../tests/unit/dom/css.rs"]
mod tests;
