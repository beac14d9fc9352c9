//! A single square of the grid and its per-frame physics.

use folio_fx_core::surface::Sprite;
use glam::DVec2;

/// Velocity retained when a square hits the `max_offset` leash.
const CLAMP_DAMPING: f64 = 0.6;
/// Velocity retained every frame.
const VELOCITY_DAMPING: f64 = 0.88;
/// Extra scale at zero distance: squares grow up to 1.6x near the cursor.
const MAX_SCALE_BOOST: f64 = 0.6;
/// Largest fraction of opacity removed by proximity.
const MAX_FADE: f64 = 0.65;
/// Fraction of the effect radius that counts as the highlighted core.
const HOT_CORE: f64 = 0.3;
/// Opacity added inside the hot core.
const HOT_CORE_BOOST: f64 = 0.3;
/// Scales the seed angle into the drawn rotation.
const ROTATION_FACTOR: f64 = 0.02;

/// Per-frame physics constants, resolved from the config and the active tuning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Physics {
    pub radius: f64,
    pub repel_force: f64,
    pub return_speed: f64,
    pub max_offset: f64,
    pub corner_radius: f64,
}

/// One square: a rest position plus a damped, leashed offset from it.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    base: DVec2,
    position: DVec2,
    velocity: DVec2,
    size: f64,
    opacity: f64,
    angle: f64,
}

impl Cell {
    /// A square at rest position `base`, starting displaced by `jitter`.
    pub fn new(base: DVec2, jitter: DVec2, size: f64, opacity: f64, angle: f64) -> Self {
        Self {
            base,
            position: base + jitter,
            velocity: DVec2::ZERO,
            size,
            opacity,
            angle,
        }
    }

    pub fn base(&self) -> DVec2 {
        self.base
    }

    pub fn position(&self) -> DVec2 {
        self.position
    }

    pub fn velocity(&self) -> DVec2 {
        self.velocity
    }

    /// Displacement from the rest position.
    pub fn offset(&self) -> DVec2 {
        self.position - self.base
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Advances one frame against a cursor at `cursor` and returns the
    /// square to draw.
    ///
    /// Order matters: repel, integrate, leash, spring, damp. The visual
    /// scale and alpha use the distance measured before integration.
    pub fn advance(&mut self, cursor: DVec2, physics: &Physics) -> Sprite {
        let r = physics.radius;
        let d = self.position - cursor;
        let dist = d.length();

        if dist < r {
            let push = (1.0 - dist / r) * physics.repel_force * (r / dist.max(1.0));
            // atan2(0, 0) == 0, so a cursor exactly on the square pushes along +x
            self.velocity += DVec2::from_angle(d.y.atan2(d.x)) * push;
        }

        self.position += self.velocity;

        let off = self.position - self.base;
        let off_dist = off.length();
        if off_dist > physics.max_offset {
            self.position = self.base + off * (physics.max_offset / off_dist);
            self.velocity *= CLAMP_DAMPING;
        }

        self.velocity += (self.base - self.position) * physics.return_speed;
        self.velocity *= VELOCITY_DAMPING;

        Sprite {
            center: self.position,
            size: self.size * scale_for(dist, r),
            rotation: self.angle * ROTATION_FACTOR,
            corner_radius: physics.corner_radius,
            alpha: alpha_for(self.opacity, dist, r),
        }
    }
}

/// Closeness to the cursor in [0, 1]: 1 at the cursor, 0 at or beyond `radius`.
pub fn proximity(dist: f64, radius: f64) -> f64 {
    ((radius - dist.min(radius)) / radius).max(0.0)
}

/// Drawn size multiplier in [1.0, 1.6].
pub fn scale_for(dist: f64, radius: f64) -> f64 {
    1.0 + proximity(dist, radius) * MAX_SCALE_BOOST
}

/// Transient alpha: fades up to 65% with proximity, except in the hot core
/// where it jumps to `min(1, opacity + 0.3)`.
pub fn alpha_for(opacity: f64, dist: f64, radius: f64) -> f64 {
    if dist < radius * HOT_CORE {
        return (opacity + HOT_CORE_BOOST).min(1.0);
    }
    opacity * (1.0 - proximity(dist, radius).min(MAX_FADE))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PHYSICS: Physics = Physics {
        radius: 120.0,
        repel_force: 0.35,
        return_speed: 0.06,
        max_offset: 40.0,
        corner_radius: 2.0,
    };

    fn at_rest(x: f64, y: f64) -> Cell {
        Cell::new(DVec2::new(x, y), DVec2::ZERO, 10.0, 0.9, 1.0)
    }

    #[test]
    fn far_cursor_leaves_resting_cell_still() {
        let mut cell = at_rest(50.0, 50.0);
        let sprite = cell.advance(DVec2::new(-9999.0, -9999.0), &PHYSICS);
        assert_eq!(cell.position(), DVec2::new(50.0, 50.0));
        assert_eq!(cell.velocity(), DVec2::ZERO);
        assert_eq!(sprite.size, 10.0);
        assert!((sprite.alpha - 0.9).abs() < 1e-12);
    }

    #[test]
    fn nearby_cursor_pushes_cell_away() {
        let mut cell = at_rest(100.0, 100.0);
        cell.advance(DVec2::new(60.0, 100.0), &PHYSICS);
        assert!(cell.position().x > 100.0, "pushed along +x: {:?}", cell.position());
        assert!((cell.position().y - 100.0).abs() < 1e-9);
    }

    #[test]
    fn first_frame_push_matches_formula() {
        // dist = 60, push = (1 - 0.5) * 0.35 * (120 / 60) = 0.35
        let mut cell = at_rest(100.0, 0.0);
        cell.advance(DVec2::new(40.0, 0.0), &PHYSICS);
        assert!((cell.position().x - 100.35).abs() < 1e-12);
        // v = (0.35 - 0.35 * 0.06) * 0.88
        let expected_v = (0.35 - 0.35 * 0.06) * 0.88;
        assert!((cell.velocity().x - expected_v).abs() < 1e-12);
    }

    #[test]
    fn cursor_on_top_of_cell_pushes_along_positive_x() {
        let mut cell = at_rest(10.0, 10.0);
        cell.advance(DVec2::new(10.0, 10.0), &PHYSICS);
        assert!(cell.offset().x > 0.0);
        assert!(cell.offset().y.abs() < 1e-12);
    }

    #[test]
    fn offset_is_leashed_and_velocity_damped_on_clamp() {
        let mut cell = at_rest(0.0, 0.0);
        cell.velocity = DVec2::new(100.0, 0.0);
        cell.advance(DVec2::new(-9999.0, -9999.0), &PHYSICS);
        assert!((cell.offset().length() - 40.0).abs() < 1e-9);
        // 100 * 0.6, then spring -40 * 0.06, then * 0.88
        let expected = (100.0 * 0.6 - 40.0 * 0.06) * 0.88;
        assert!((cell.velocity().x - expected).abs() < 1e-9);
    }

    #[test]
    fn proximity_is_one_at_cursor_and_zero_beyond_radius() {
        assert_eq!(proximity(0.0, 120.0), 1.0);
        assert_eq!(proximity(120.0, 120.0), 0.0);
        assert_eq!(proximity(500.0, 120.0), 0.0);
        assert!((proximity(60.0, 120.0) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn scale_ramps_from_one_to_one_point_six() {
        assert!((scale_for(0.0, 120.0) - 1.6).abs() < 1e-12);
        assert!((scale_for(60.0, 120.0) - 1.3).abs() < 1e-12);
        assert_eq!(scale_for(1000.0, 120.0), 1.0);
    }

    #[test]
    fn alpha_boosts_inside_hot_core() {
        assert!((alpha_for(0.9, 10.0, 120.0) - 1.0).abs() < 1e-12);
        assert!((alpha_for(0.5, 35.9, 120.0) - 0.8).abs() < 1e-12);
    }

    #[test]
    fn alpha_fades_linearly_outside_core_capped_at_65_percent() {
        // proximity 0.5 -> alpha 0.9 * 0.5
        assert!((alpha_for(0.9, 60.0, 120.0) - 0.45).abs() < 1e-12);
        // just outside the core: proximity 0.7 capped to 0.65
        assert!((alpha_for(0.9, 36.0, 120.0) - 0.9 * 0.35).abs() < 1e-12);
        assert!((alpha_for(0.9, 200.0, 120.0) - 0.9).abs() < 1e-12);
    }

    #[test]
    fn sprite_rotation_is_scaled_seed_angle() {
        let mut cell = Cell::new(DVec2::ZERO, DVec2::ZERO, 10.0, 0.9, 3.0);
        let sprite = cell.advance(DVec2::new(-9999.0, -9999.0), &PHYSICS);
        assert!((sprite.rotation - 0.06).abs() < 1e-12);
        assert_eq!(sprite.corner_radius, 2.0);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn leash_holds_for_any_cursor_path(
                path in proptest::collection::vec((-200.0_f64..200.0, -200.0_f64..200.0), 1..200),
            ) {
                let mut cell = at_rest(0.0, 0.0);
                for (x, y) in path {
                    cell.advance(DVec2::new(x, y), &PHYSICS);
                    prop_assert!(
                        cell.offset().length() <= PHYSICS.max_offset + 1e-9,
                        "offset {} exceeds leash", cell.offset().length()
                    );
                }
            }

            #[test]
            fn visuals_stay_in_range(dist in 0.0_f64..500.0, opacity in 0.0_f64..=1.0) {
                let s = scale_for(dist, 120.0);
                prop_assert!((1.0..=1.6 + 1e-12).contains(&s));
                let a = alpha_for(opacity, dist, 120.0);
                prop_assert!((0.0..=1.0).contains(&a));
            }
        }
    }
}
