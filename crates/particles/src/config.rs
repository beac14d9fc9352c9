//! Tunable parameters for the particle background.
//!
//! Grid spacing and cursor reach are tuned per breakpoint (narrow screens
//! get slightly smaller squares and a smaller effect radius); everything else
//! is shared. Every value can be overridden from JSON, with missing keys
//! falling back to the defaults below.

use folio_fx_core::error::FxError;
use folio_fx_core::params::{param_f64, param_section, param_string};
use serde::Serialize;
use serde_json::{json, Value};

/// Fill color used when the stylesheet provides neither `--square` nor `--accent`.
pub const DEFAULT_COLOR: &str = "#f6a623";
/// Viewports narrower than this (logical px) use the mobile tuning.
pub const DEFAULT_BREAKPOINT: f64 = 768.0;

const DEFAULT_MARGIN: f64 = 0.0;
const DEFAULT_REPEL_FORCE: f64 = 0.35;
const DEFAULT_RETURN_SPEED: f64 = 0.06;
const DEFAULT_MAX_OFFSET: f64 = 40.0;
const DEFAULT_CORNER_RADIUS: f64 = 2.0;
const DEFAULT_OPACITY: f64 = 0.9;

/// Breakpoint-dependent grid parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Tuning {
    /// Base edge length of a square (px).
    pub square_size: f64,
    /// Space between neighbouring squares (px).
    pub gap: f64,
    /// Distance within which the cursor pushes squares (px).
    pub cursor_radius: f64,
    /// Grid density multiplier; 2.0 halves the spacing.
    pub density_scale: f64,
}

impl Tuning {
    pub const DESKTOP: Tuning = Tuning {
        square_size: 10.0,
        gap: 8.0,
        cursor_radius: 120.0,
        density_scale: 1.0,
    };

    pub const MOBILE: Tuning = Tuning {
        square_size: 9.0,
        gap: 8.0,
        cursor_radius: 100.0,
        density_scale: 1.0,
    };

    fn from_json(params: &Value, fallback: Tuning) -> Self {
        Self {
            square_size: param_f64(params, "square_size", fallback.square_size),
            gap: param_f64(params, "gap", fallback.gap),
            cursor_radius: param_f64(params, "cursor_radius", fallback.cursor_radius),
            density_scale: param_f64(params, "density_scale", fallback.density_scale),
        }
    }

    /// Distance between neighbouring grid points:
    /// `round(round(square_size + gap) / density_scale)`.
    pub fn grid_increment(&self) -> f64 {
        ((self.square_size + self.gap).round() / self.density_scale).round()
    }

    fn validate(&self, label: &str) -> Result<(), FxError> {
        let inc = self.grid_increment();
        if !inc.is_finite() || inc < 1.0 {
            return Err(FxError::InvalidConfig(format!(
                "{label}: grid increment {inc} must be at least 1px \
                 (square_size + gap = {}, density_scale = {})",
                self.square_size + self.gap,
                self.density_scale
            )));
        }
        if !self.square_size.is_finite() || self.square_size < 0.0 {
            return Err(FxError::InvalidConfig(format!(
                "{label}: square_size must be finite and non-negative"
            )));
        }
        if !self.cursor_radius.is_finite() || self.cursor_radius <= 0.0 {
            return Err(FxError::InvalidConfig(format!(
                "{label}: cursor_radius must be finite and positive"
            )));
        }
        Ok(())
    }

    fn to_json(self) -> Value {
        json!({
            "square_size": self.square_size,
            "gap": self.gap,
            "cursor_radius": self.cursor_radius,
            "density_scale": self.density_scale,
        })
    }
}

/// Full configuration of the particle background.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParticleConfig {
    pub desktop: Tuning,
    pub mobile: Tuning,
    /// Width (logical px) below which `mobile` applies.
    pub breakpoint: f64,
    /// Padding between the viewport edge and the first grid point.
    pub margin: f64,
    /// Strength of the cursor push.
    pub repel_force: f64,
    /// Spring constant pulling squares back to their rest position.
    pub return_speed: f64,
    /// Largest allowed displacement from rest (px).
    pub max_offset: f64,
    /// Corner radius of each square (px).
    pub corner_radius: f64,
    /// Base alpha of every square.
    pub opacity: f64,
    /// CSS fill color.
    pub color: String,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            desktop: Tuning::DESKTOP,
            mobile: Tuning::MOBILE,
            breakpoint: DEFAULT_BREAKPOINT,
            margin: DEFAULT_MARGIN,
            repel_force: DEFAULT_REPEL_FORCE,
            return_speed: DEFAULT_RETURN_SPEED,
            max_offset: DEFAULT_MAX_OFFSET,
            corner_radius: DEFAULT_CORNER_RADIUS,
            opacity: DEFAULT_OPACITY,
            color: DEFAULT_COLOR.to_owned(),
        }
    }
}

impl ParticleConfig {
    /// Extracts a configuration from a JSON object, falling back to defaults.
    ///
    /// Breakpoint tunings live under the nested `"desktop"` and `"mobile"`
    /// objects.
    pub fn from_json(params: &Value) -> Self {
        Self {
            desktop: Tuning::from_json(param_section(params, "desktop"), Tuning::DESKTOP),
            mobile: Tuning::from_json(param_section(params, "mobile"), Tuning::MOBILE),
            breakpoint: param_f64(params, "breakpoint", DEFAULT_BREAKPOINT),
            margin: param_f64(params, "margin", DEFAULT_MARGIN),
            repel_force: param_f64(params, "repel_force", DEFAULT_REPEL_FORCE),
            return_speed: param_f64(params, "return_speed", DEFAULT_RETURN_SPEED),
            max_offset: param_f64(params, "max_offset", DEFAULT_MAX_OFFSET),
            corner_radius: param_f64(params, "corner_radius", DEFAULT_CORNER_RADIUS),
            opacity: param_f64(params, "opacity", DEFAULT_OPACITY),
            color: param_string(params, "color", DEFAULT_COLOR),
        }
    }

    /// Rejects values that would make the grid unbuildable or the physics
    /// produce NaN.
    pub fn validate(&self) -> Result<(), FxError> {
        self.desktop.validate("desktop")?;
        self.mobile.validate("mobile")?;
        let finite = [
            ("breakpoint", self.breakpoint),
            ("margin", self.margin),
            ("repel_force", self.repel_force),
            ("return_speed", self.return_speed),
            ("corner_radius", self.corner_radius),
        ];
        if let Some((name, _)) = finite.iter().find(|(_, v)| !v.is_finite()) {
            return Err(FxError::InvalidConfig(format!("{name} must be finite")));
        }
        if !self.max_offset.is_finite() || self.max_offset < 0.0 {
            return Err(FxError::InvalidConfig(
                "max_offset must be finite and non-negative".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(FxError::InvalidConfig(format!(
                "opacity {} must be within [0, 1]",
                self.opacity
            )));
        }
        Ok(())
    }

    /// Tuning for a viewport of the given logical width.
    pub fn tuning_for(&self, width: f64) -> Tuning {
        if width < self.breakpoint {
            self.mobile
        } else {
            self.desktop
        }
    }

    pub fn to_json(&self) -> Value {
        json!({
            "desktop": self.desktop.to_json(),
            "mobile": self.mobile.to_json(),
            "breakpoint": self.breakpoint,
            "margin": self.margin,
            "repel_force": self.repel_force,
            "return_speed": self.return_speed,
            "max_offset": self.max_offset,
            "corner_radius": self.corner_radius,
            "opacity": self.opacity,
            "color": self.color,
        })
    }

    /// Schema of every parameter accepted by [`ParticleConfig::from_json`].
    pub fn schema() -> Value {
        fn tuning_schema(defaults: Tuning) -> Value {
            json!({
                "type": "object",
                "properties": {
                    "square_size": {
                        "type": "number",
                        "default": defaults.square_size,
                        "min": 0.0,
                        "description": "Base edge length of a square in px"
                    },
                    "gap": {
                        "type": "number",
                        "default": defaults.gap,
                        "min": 0.0,
                        "description": "Space between squares in px"
                    },
                    "cursor_radius": {
                        "type": "number",
                        "default": defaults.cursor_radius,
                        "min": 1.0,
                        "description": "Effect radius of the cursor in px"
                    },
                    "density_scale": {
                        "type": "number",
                        "default": defaults.density_scale,
                        "min": 0.1,
                        "description": "Grid density multiplier"
                    }
                }
            })
        }

        json!({
            "desktop": tuning_schema(Tuning::DESKTOP),
            "mobile": tuning_schema(Tuning::MOBILE),
            "breakpoint": {
                "type": "number",
                "default": DEFAULT_BREAKPOINT,
                "description": "Widths below this use the mobile tuning"
            },
            "margin": {
                "type": "number",
                "default": DEFAULT_MARGIN,
                "min": 0.0,
                "description": "Padding from the viewport edges in px"
            },
            "repel_force": {
                "type": "number",
                "default": DEFAULT_REPEL_FORCE,
                "min": 0.0,
                "max": 2.0,
                "description": "How strongly squares are pushed away from the cursor"
            },
            "return_speed": {
                "type": "number",
                "default": DEFAULT_RETURN_SPEED,
                "min": 0.0,
                "max": 0.5,
                "description": "Spring constant pulling squares back to the grid"
            },
            "max_offset": {
                "type": "number",
                "default": DEFAULT_MAX_OFFSET,
                "min": 0.0,
                "description": "Maximum displacement from rest in px"
            },
            "corner_radius": {
                "type": "number",
                "default": DEFAULT_CORNER_RADIUS,
                "min": 0.0,
                "description": "Corner radius of each square in px"
            },
            "opacity": {
                "type": "number",
                "default": DEFAULT_OPACITY,
                "min": 0.0,
                "max": 1.0,
                "description": "Base opacity of the squares"
            },
            "color": {
                "type": "string",
                "default": DEFAULT_COLOR,
                "description": "CSS fill color; overridden by --square / --accent"
            }
        })
    }
}

/// Picks the fill color from the page's custom properties.
///
/// Values are trimmed; the first non-empty one of `square`, `accent` wins.
/// `None` means neither is set and the current color should be kept.
pub fn resolve_color(square: Option<&str>, accent: Option<&str>) -> Option<String> {
    [square, accent]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|v| !v.is_empty())
        .map(String::from)
}
