//! The particle field: grid construction, resize, and the frame step.

use crate::cell::{Cell, Physics};
use crate::config::{resolve_color, ParticleConfig, Tuning};
use crate::cursor::Cursor;
use folio_fx_core::error::FxError;
use folio_fx_core::prng::Xorshift64;
use folio_fx_core::surface::Sprite;
use folio_fx_core::viewport::Viewport;
use folio_fx_core::Simulation;
use glam::DVec2;
use log::{debug, warn};
use serde::Serialize;
use serde_json::Value;

/// Smallest random size factor applied to a square.
const SIZE_MIN: f64 = 0.8;
/// Range of the random size factor: sizes fall in [0.8, 1.4) x base.
const SIZE_SPREAD: f64 = 0.6;
/// Offset (px) beyond which a square counts as displaced in [`FieldStats`].
const DISPLACED_THRESHOLD: f64 = 0.5;

/// Aggregate motion of the grid, for diagnostics and the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldStats {
    pub cells: usize,
    pub max_offset: f64,
    pub mean_offset: f64,
    pub mean_speed: f64,
    pub displaced: usize,
}

/// Grid of squares repelled by the cursor and sprung back to rest.
///
/// All state that used to be page-global (grid, cursor, colors) lives here.
/// [`ParticleField::resize`] throws the grid away and lays out a new one;
/// nothing but the cursor and color survives it.
pub struct ParticleField {
    config: ParticleConfig,
    viewport: Viewport,
    tuning: Tuning,
    cells: Vec<Cell>,
    sprites: Vec<Sprite>,
    cursor: Cursor,
    rng: Xorshift64,
}

impl ParticleField {
    /// Builds the grid for `viewport`.
    ///
    /// `seed` drives the per-square jitter, size and angle; the layout itself
    /// is deterministic.
    ///
    /// Returns `FxError::InvalidConfig` if the config fails validation.
    pub fn new(viewport: Viewport, config: ParticleConfig, seed: u64) -> Result<Self, FxError> {
        Self::with_rng(viewport, config, Xorshift64::new(seed))
    }

    /// Like [`ParticleField::new`] with a caller-provided generator.
    pub fn with_rng(
        viewport: Viewport,
        config: ParticleConfig,
        rng: Xorshift64,
    ) -> Result<Self, FxError> {
        config.validate()?;
        let mut field = Self {
            tuning: config.tuning_for(viewport.width()),
            config,
            viewport,
            cells: Vec::new(),
            sprites: Vec::new(),
            cursor: Cursor::default(),
            rng,
        };
        field.rebuild();
        Ok(field)
    }

    /// Creates a field from a JSON params object, falling back to defaults.
    pub fn from_json(viewport: Viewport, seed: u64, params: &Value) -> Result<Self, FxError> {
        Self::new(viewport, ParticleConfig::from_json(params), seed)
    }

    /// Re-selects the tuning for the new width and rebuilds the grid.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.tuning = self.config.tuning_for(viewport.width());
        self.rebuild();
    }

    /// Applies the page's `--square` / `--accent` values.
    ///
    /// Keeps the current color when both are empty.
    pub fn apply_styles(&mut self, square: Option<&str>, accent: Option<&str>) {
        match resolve_color(square, accent) {
            Some(color) => self.config.color = color,
            None => debug!("no --square/--accent set, keeping {}", self.config.color),
        }
    }

    /// Overrides the fill color, ignoring blank input.
    pub fn set_color(&mut self, color: &str) {
        let color = color.trim();
        if color.is_empty() {
            warn!("ignoring empty particle color");
            return;
        }
        self.config.color = color.to_owned();
    }

    pub fn config(&self) -> &ParticleConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Tuning currently in effect for the viewport width.
    pub fn tuning(&self) -> Tuning {
        self.tuning
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    /// Input events update the cursor through this; the next step reads it.
    pub fn cursor_mut(&mut self) -> &mut Cursor {
        &mut self.cursor
    }

    /// Grid dimensions (columns, rows) for the current viewport.
    pub fn grid_dims(&self) -> (usize, usize) {
        let inc = self.tuning.grid_increment();
        let margin = self.config.margin;
        let span = |extent: f64| {
            let len = extent - 2.0 * margin;
            if len > 0.0 {
                (len / inc).ceil() as usize
            } else {
                0
            }
        };
        (span(self.viewport.width()), span(self.viewport.height()))
    }

    pub fn stats(&self) -> FieldStats {
        let cells = self.cells.len();
        let (max_offset, sum_offset, sum_speed, displaced) = self.cells.iter().fold(
            (0.0_f64, 0.0, 0.0, 0),
            |(max, sum_off, sum_speed, displaced), cell| {
                let off = cell.offset().length();
                (
                    max.max(off),
                    sum_off + off,
                    sum_speed + cell.velocity().length(),
                    displaced + usize::from(off > DISPLACED_THRESHOLD),
                )
            },
        );
        let n = cells.max(1) as f64;
        FieldStats {
            cells,
            max_offset,
            mean_offset: sum_offset / n,
            mean_speed: sum_speed / n,
            displaced,
        }
    }

    fn physics(&self) -> Physics {
        Physics {
            radius: self.tuning.cursor_radius,
            repel_force: self.config.repel_force,
            return_speed: self.config.return_speed,
            max_offset: self.config.max_offset,
            corner_radius: self.config.corner_radius,
        }
    }

    /// Lays out one cell per grid point, row by row from the top-left margin.
    fn rebuild(&mut self) {
        let (cols, rows) = self.grid_dims();
        let inc = self.tuning.grid_increment();
        let margin = self.config.margin;
        let square_size = self.tuning.square_size;
        let opacity = self.config.opacity;

        self.cells.clear();
        self.cells.reserve(cols * rows);
        for row in 0..rows {
            for col in 0..cols {
                let base = DVec2::new(margin + col as f64 * inc, margin + row as f64 * inc);
                let jitter = DVec2::new(self.rng.next_signed(), self.rng.next_signed());
                let size = square_size * (SIZE_MIN + self.rng.next_f64() * SIZE_SPREAD);
                let angle = self.rng.next_angle();
                self.cells
                    .push(Cell::new(base, jitter, size, opacity, angle));
            }
        }
        self.sprites.clear();
        debug!(
            "particle grid rebuilt: {}x{} cells at {inc}px for {}x{} viewport",
            cols,
            rows,
            self.viewport.width(),
            self.viewport.height()
        );
    }
}

impl Simulation for ParticleField {
    fn step(&mut self) -> Result<(), FxError> {
        let physics = self.physics();
        let cursor = self.cursor.position();
        self.sprites.clear();
        self.sprites.extend(
            self.cells
                .iter_mut()
                .map(|cell| cell.advance(cursor, &physics)),
        );
        Ok(())
    }

    fn sprites(&self) -> &[Sprite] {
        &self.sprites
    }

    fn color(&self) -> &str {
        &self.config.color
    }

    fn params(&self) -> Value {
        self.config.to_json()
    }

    fn param_schema(&self) -> Value {
        ParticleConfig::schema()
    }
}
