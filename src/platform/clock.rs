//! Fixed-timestep frame clock
//!
//! Converts host frame timestamps into simulation tick timestamps. The
//! simulation clock only moves forward, in whole steps, and never jumps by
//! more than `MAX_FRAME_GAP_MS` per host frame.

use crate::consts::{MAX_FRAME_GAP_MS, MAX_SUBSTEPS, SIM_STEP_MS};

#[derive(Debug, Clone)]
pub struct FrameClock {
    step_ms: f64,
    accumulator: f64,
    last_host_ms: Option<f64>,
    /// Simulation time of the last emitted tick
    sim_ms: f64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(SIM_STEP_MS)
    }
}

impl FrameClock {
    pub fn new(step_ms: f64) -> Self {
        Self {
            step_ms: step_ms.max(1.0),
            accumulator: 0.0,
            last_host_ms: None,
            sim_ms: 0.0,
        }
    }

    /// Simulation time of the most recent tick (ms)
    pub fn now_ms(&self) -> f64 {
        self.sim_ms
    }

    pub fn step_ms(&self) -> f64 {
        self.step_ms
    }

    /// Feed a host frame timestamp; returns the tick timestamps to simulate
    pub fn advance(&mut self, host_ms: f64) -> Vec<f64> {
        let Some(last) = self.last_host_ms.replace(host_ms) else {
            return Vec::new();
        };

        // Non-monotonic host clocks contribute nothing
        let dt = (host_ms - last).clamp(0.0, MAX_FRAME_GAP_MS);
        self.accumulator += dt;

        let mut ticks = Vec::new();
        while self.accumulator >= self.step_ms && (ticks.len() as u32) < MAX_SUBSTEPS {
            self.accumulator -= self.step_ms;
            self.sim_ms += self.step_ms;
            ticks.push(self.sim_ms);
        }

        // Drop whatever could not be simulated this frame
        if ticks.len() as u32 == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(self.step_ms);
        }
        ticks
    }
}
