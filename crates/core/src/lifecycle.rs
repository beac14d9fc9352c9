//! Start/stop lifecycle for a frame-driven simulation.
//!
//! [`FrameLoop`] owns a [`Simulation`] and only advances it while running.
//! Hosts map `start` onto their frame scheduler (e.g. `requestAnimationFrame`)
//! and call [`FrameLoop::tick`] once per display refresh; `stop` pauses, and
//! [`FrameLoop::teardown`] ends the loop and hands the simulation back.

use crate::error::FxError;
use crate::simulation::Simulation;
use crate::surface::{paint, Surface};
use log::debug;

/// Where a [`FrameLoop`] is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// Constructed, no frame run yet.
    Idle,
    /// Frames advance on every tick.
    Running,
    /// Paused; `start` resumes from the current state.
    Stopped,
}

/// Drives a simulation one frame per tick while running.
pub struct FrameLoop<S> {
    sim: S,
    state: LoopState,
    frames: u64,
}

impl<S: Simulation> FrameLoop<S> {
    pub fn new(sim: S) -> Self {
        Self {
            sim,
            state: LoopState::Idle,
            frames: 0,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    /// Number of frames advanced since construction.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Enters `Running`. Returns `false` if it was already running, so the
    /// host knows not to schedule a second frame callback.
    pub fn start(&mut self) -> bool {
        if self.is_running() {
            return false;
        }
        debug!("frame loop: {:?} -> Running", self.state);
        self.state = LoopState::Running;
        true
    }

    /// Enters `Stopped`. Returns `false` if it was not running.
    pub fn stop(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        debug!("frame loop stopped after {} frames", self.frames);
        self.state = LoopState::Stopped;
        true
    }

    /// Runs one frame: steps the simulation and repaints `surface`.
    ///
    /// Returns `Ok(false)` without touching anything unless running.
    pub fn tick(&mut self, surface: &mut dyn Surface) -> Result<bool, FxError> {
        if !self.is_running() {
            return Ok(false);
        }
        self.sim.step()?;
        paint(surface, self.sim.sprites(), self.sim.color())?;
        self.frames += 1;
        Ok(true)
    }

    pub fn simulation(&self) -> &S {
        &self.sim
    }

    /// Mutable access for input events and rebuilds between frames.
    pub fn simulation_mut(&mut self) -> &mut S {
        &mut self.sim
    }

    /// Ends the loop for good and returns the simulation.
    pub fn teardown(self) -> S {
        debug!("frame loop torn down after {} frames", self.frames);
        self.sim
    }
}
