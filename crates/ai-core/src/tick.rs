use crate::{rng, AgentId, SplitMix64};

/// Per-tick inputs handed to every system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickContext {
    pub tick: u64,
    pub dt_seconds: f32,
    /// Simulation time at the start of this tick.
    pub now_seconds: f64,
    pub seed: u64,
}

impl TickContext {
    pub fn rng_for_agent<A: AgentId>(&self, agent: A) -> SplitMix64 {
        SplitMix64::new(rng::stream_seed(self.seed, agent.stable_id(), self.tick))
    }
}

/// Fixed-timestep simulation clock.
///
/// The fixed step drives perception and steering; frame time (cooldowns,
/// facing) is fed in separately by the host and only moves `elapsed`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimClock {
    tick: u64,
    elapsed_seconds: f64,
    fixed_dt: f32,
    seed: u64,
}

impl SimClock {
    pub fn new(fixed_dt: f32, seed: u64) -> Self {
        Self {
            tick: 0,
            elapsed_seconds: 0.0,
            fixed_dt: fixed_dt.max(0.0),
            seed,
        }
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed_seconds
    }

    pub fn fixed_dt(&self) -> f32 {
        self.fixed_dt
    }

    /// Context for the next fixed step, then advances the tick counter.
    pub fn step(&mut self) -> TickContext {
        let ctx = TickContext {
            tick: self.tick,
            dt_seconds: self.fixed_dt,
            now_seconds: self.elapsed_seconds,
            seed: self.seed,
        };
        self.tick += 1;
        self.elapsed_seconds += self.fixed_dt as f64;
        ctx
    }
}
