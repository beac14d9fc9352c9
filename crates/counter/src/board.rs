//! Tracks every stat on the page and starts each count-up exactly once.

use crate::animation::{CounterAnimation, StatSpec};
use folio_fx_core::error::FxError;
use log::debug;

/// Fraction of a stat that must be on screen before it starts counting.
pub const VISIBILITY_THRESHOLD: f64 = 0.4;

/// Slack for ratios reported at the threshold crossing, which browsers often
/// round just below it (`0.3999`).
const RATIO_TOLERANCE: f64 = 1e-3;

#[derive(Debug, Clone, PartialEq)]
enum Phase {
    Waiting,
    Counting(CounterAnimation),
    Counted,
}

#[derive(Debug, Clone, PartialEq)]
struct Stat {
    spec: StatSpec,
    phase: Phase,
}

/// Text update for one stat, produced by [`CounterBoard::tick`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatUpdate {
    pub index: usize,
    pub text: String,
}

/// All observed stats and their count-up state.
///
/// Stats are addressed by the index returned from [`CounterBoard::add`].
/// The host reports visibility changes and calls [`CounterBoard::tick`] once
/// per frame while [`CounterBoard::is_animating`] holds.
#[derive(Debug, Default)]
pub struct CounterBoard {
    stats: Vec<Stat>,
}

impl CounterBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a stat and returns its index.
    pub fn add(&mut self, spec: StatSpec) -> usize {
        self.stats.push(Stat {
            spec,
            phase: Phase::Waiting,
        });
        self.stats.len() - 1
    }

    pub fn len(&self) -> usize {
        self.stats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    /// Reports that stat `index` is intersecting the viewport by `ratio`.
    ///
    /// Starts its count-up at `now_ms` the first time the ratio reaches
    /// [`VISIBILITY_THRESHOLD`], give or take a rounding tolerance. Returns whether an animation started; later
    /// reports for the same stat never restart it.
    pub fn on_visible(&mut self, index: usize, ratio: f64, now_ms: f64) -> Result<bool, FxError> {
        let len = self.stats.len();
        let stat = self.stats.get_mut(index).ok_or(FxError::OutOfRange {
            kind: "stat",
            index,
            len,
        })?;
        if ratio + RATIO_TOLERANCE < VISIBILITY_THRESHOLD || stat.phase != Phase::Waiting {
            return Ok(false);
        }
        debug!("stat {index} visible at {ratio:.2}, counting to {}", stat.spec.target);
        stat.phase = Phase::Counting(CounterAnimation::new(stat.spec.clone(), now_ms));
        Ok(true)
    }

    /// Whether stat `index` has started (or finished) counting.
    pub fn is_counted(&self, index: usize) -> bool {
        self.stats
            .get(index)
            .is_some_and(|s| s.phase != Phase::Waiting)
    }

    /// Whether any stat still needs frames.
    pub fn is_animating(&self) -> bool {
        self.stats
            .iter()
            .any(|s| matches!(s.phase, Phase::Counting(_)))
    }

    /// Renders the current frame of every running count-up. Finished ones
    /// emit their exact target once and then go quiet.
    pub fn tick(&mut self, now_ms: f64) -> Vec<StatUpdate> {
        let mut updates = Vec::new();
        for (index, stat) in self.stats.iter_mut().enumerate() {
            let Phase::Counting(anim) = &stat.phase else {
                continue;
            };
            let frame = anim.frame(now_ms);
            if frame.done {
                stat.phase = Phase::Counted;
            }
            updates.push(StatUpdate {
                index,
                text: frame.text,
            });
        }
        updates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::NumberFormat;

    fn board_with(targets: &[u64]) -> CounterBoard {
        let mut board = CounterBoard::new();
        for &t in targets {
            board.add(StatSpec::new(t, NumberFormat::Thousands, ""));
        }
        board
    }

    fn finish(board: &mut CounterBoard, mut now: f64) -> Vec<StatUpdate> {
        let mut last = Vec::new();
        while board.is_animating() {
            now += 16.0;
            last.extend(board.tick(now));
        }
        last
    }

    #[test]
    fn below_threshold_does_not_start() {
        let mut board = board_with(&[100]);
        assert!(!board.on_visible(0, 0.39, 0.0).unwrap());
        assert!(!board.is_counted(0));
        assert!(!board.is_animating());
        assert!(board.tick(16.0).is_empty());
    }

    #[test]
    fn threshold_crossing_starts_animation() {
        let mut board = board_with(&[100]);
        assert!(board.on_visible(0, 0.4, 0.0).unwrap());
        assert!(board.is_counted(0));
        assert!(board.is_animating());
    }

    #[test]
    fn crossing_reported_just_under_threshold_still_starts() {
        let mut board = board_with(&[100]);
        assert!(!board.on_visible(0, 0.1, 0.0).unwrap());
        assert!(board.on_visible(0, 0.3999, 20.0).unwrap());
        assert!(board.is_counted(0));
        assert!(board.is_animating());
    }

    #[test]
    fn animation_ends_on_formatted_target() {
        let mut board = board_with(&[1500]);
        board.on_visible(0, 1.0, 0.0).unwrap();
        let updates = finish(&mut board, 0.0);
        assert_eq!(updates.last().unwrap().text, "1.5k");
        assert!(!board.is_animating());
    }

    #[test]
    fn re_entering_view_after_completion_is_a_no_op() {
        let mut board = board_with(&[1000]);
        board.on_visible(0, 0.8, 0.0).unwrap();
        finish(&mut board, 0.0);
        assert!(!board.on_visible(0, 1.0, 50_000.0).unwrap());
        assert!(!board.is_animating());
        assert!(board.tick(50_016.0).is_empty());
    }

    #[test]
    fn re_entering_view_mid_animation_does_not_restart() {
        let mut board = board_with(&[2000]);
        board.on_visible(0, 0.5, 0.0).unwrap();
        let mid = board.tick(1000.0);
        assert!(!board.on_visible(0, 0.9, 1000.0).unwrap());
        let later = board.tick(1016.0);
        assert_ne!(mid[0].text, "0");
        assert_ne!(later[0].text, "0");
    }

    #[test]
    fn stats_animate_independently() {
        let mut board = board_with(&[10, 999]);
        board.on_visible(1, 1.0, 0.0).unwrap();
        let updates = board.tick(100.0);
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].index, 1);
        assert!(!board.is_counted(0));
    }

    #[test]
    fn unknown_index_is_an_error() {
        let mut board = board_with(&[1]);
        assert!(matches!(
            board.on_visible(3, 1.0, 0.0),
            Err(FxError::OutOfRange { index: 3, len: 1, .. })
        ));
        assert!(!board.is_counted(3));
    }

    #[test]
    fn empty_board_reports_empty() {
        let board = CounterBoard::new();
        assert!(board.is_empty());
        assert_eq!(board.len(), 0);
        assert!(!board.is_animating());
    }
}
