//! A single count-up from zero to a stat's target.

use crate::easing::ease_out_cubic;
use crate::format::{format_count, NumberFormat};
use folio_fx_core::error::FxError;

/// Every count-up takes at least this long.
pub const BASE_DURATION_MS: f64 = 1400.0;
/// Bigger targets count longer, by `target / 2` ms up to this cap.
pub const MAX_EXTRA_DURATION_MS: f64 = 1200.0;

/// Animation length for a target: `1400ms + min(1200, target / 2)`.
pub fn duration_for(target: u64) -> f64 {
    BASE_DURATION_MS + MAX_EXTRA_DURATION_MS.min(target as f64 / 2.0)
}

/// What a stat element counts to and how it displays the number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatSpec {
    pub target: u64,
    pub format: NumberFormat,
    pub suffix: String,
}

impl StatSpec {
    pub fn new(target: u64, format: NumberFormat, suffix: impl Into<String>) -> Self {
        Self {
            target,
            format,
            suffix: suffix.into(),
        }
    }

    /// Reads a stat from `data-target`, `data-format` and `data-suffix`.
    ///
    /// The target must be a non-negative number; fractional targets are
    /// floored. Returns `FxError::InvalidTarget` when it is missing or
    /// unparsable.
    pub fn from_attributes(
        target: Option<&str>,
        format: Option<&str>,
        suffix: Option<&str>,
    ) -> Result<Self, FxError> {
        let raw = target.ok_or_else(|| FxError::InvalidTarget("missing data-target".into()))?;
        Ok(Self::new(
            parse_target(raw)?,
            NumberFormat::from_attr(format),
            suffix.unwrap_or_default(),
        ))
    }

    /// Text shown for `value`: the formatted number followed by the suffix.
    pub fn render(&self, value: u64) -> String {
        let mut text = format_count(value, self.format);
        text.push_str(&self.suffix);
        text
    }
}

fn parse_target(raw: &str) -> Result<u64, FxError> {
    let trimmed = raw.trim();
    if let Ok(n) = trimmed.parse::<u64>() {
        return Ok(n);
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 && v < u64::MAX as f64 => Ok(v.floor() as u64),
        _ => Err(FxError::InvalidTarget(raw.to_owned())),
    }
}

/// One rendered frame of a count-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterFrame {
    pub text: String,
    pub done: bool,
}

/// A running count-up, timed against the host clock in milliseconds.
#[derive(Debug, Clone, PartialEq)]
pub struct CounterAnimation {
    spec: StatSpec,
    start_ms: f64,
    duration_ms: f64,
}

impl CounterAnimation {
    pub fn new(spec: StatSpec, start_ms: f64) -> Self {
        let duration_ms = duration_for(spec.target);
        Self {
            spec,
            start_ms,
            duration_ms,
        }
    }

    pub fn spec(&self) -> &StatSpec {
        &self.spec
    }

    pub fn duration_ms(&self) -> f64 {
        self.duration_ms
    }

    /// Normalized time in [0, 1].
    pub fn progress(&self, now_ms: f64) -> f64 {
        ((now_ms - self.start_ms) / self.duration_ms).clamp(0.0, 1.0)
    }

    /// Value shown at `now_ms`: `floor(ease(t) * target)`.
    pub fn value_at(&self, now_ms: f64) -> u64 {
        let eased = ease_out_cubic(self.progress(now_ms));
        ((eased * self.spec.target as f64).floor() as u64).min(self.spec.target)
    }

    /// Renders the frame for `now_ms`. Once time is up the exact target is
    /// shown and `done` is set.
    pub fn frame(&self, now_ms: f64) -> CounterFrame {
        if self.progress(now_ms) < 1.0 {
            CounterFrame {
                text: self.spec.render(self.value_at(now_ms)),
                done: false,
            }
        } else {
            CounterFrame {
                text: self.spec.render(self.spec.target),
                done: true,
            }
        }
    }
}
