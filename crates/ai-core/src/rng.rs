//! Deterministic RNG helpers.
//!
//! Small and dependency-free; **not** cryptographic. Each agent draws from its
//! own stream derived from the scenario seed, so a replay with the same seed
//! reproduces the same wander jitter regardless of agent count.

pub trait DeterministicRng {
    fn next_u64(&mut self) -> u64;

    /// Uniform in `[0, 1)`.
    fn next_unit(&mut self) -> f32 {
        // Top 24 bits fit the f32 mantissa exactly.
        ((self.next_u64() >> 40) as f32) / ((1u32 << 24) as f32)
    }

    /// Uniform in `[lo, hi)`. Returns `lo` when the range is empty.
    fn next_range(&mut self, lo: f32, hi: f32) -> f32 {
        if hi <= lo {
            return lo;
        }
        lo + (hi - lo) * self.next_unit()
    }
}

/// SplitMix64 generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }
}

impl DeterministicRng for SplitMix64 {
    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E3779B97F4A7C15);
        mix64(self.state)
    }
}

pub fn mix64(mut x: u64) -> u64 {
    x = (x ^ (x >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94D049BB133111EB);
    x ^ (x >> 31)
}

/// Seed for one agent's stream on one tick.
pub fn stream_seed(global_seed: u64, agent_id: u64, tick: u64) -> u64 {
    mix64(global_seed ^ mix64(agent_id.wrapping_add(0x9E3779B97F4A7C15)) ^ mix64(tick))
}
