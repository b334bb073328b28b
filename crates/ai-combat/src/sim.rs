//! Explicit simulation context shared by every agent in a tick.

use ai_core::{EntityId, SimClock};
use ai_nav::NavGrid;

/// Entities waiting to be removed once their linger time has passed.
#[derive(Debug, Clone, Default)]
pub struct DespawnQueue {
    entries: Vec<(EntityId, f64)>,
}

impl DespawnQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, entity: EntityId, at_seconds: f64) {
        self.entries.push((entity, at_seconds));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, entity: EntityId) -> bool {
        self.entries.iter().any(|(e, _)| *e == entity)
    }

    /// Removes and returns every entry due at `now_seconds`, in schedule order.
    pub fn drain_expired(&mut self, now_seconds: f64) -> Vec<EntityId> {
        let mut due = Vec::new();
        self.entries.retain(|&(entity, at)| {
            if at <= now_seconds {
                due.push(entity);
                false
            } else {
                true
            }
        });
        due
    }
}

/// Everything agents share during a tick: the navigation grid, the fallback
/// target, the clock and pending removals.
#[derive(Debug, Clone)]
pub struct SimContext {
    pub navigator: NavGrid,
    pub player: Option<EntityId>,
    pub clock: SimClock,
    pub despawns: DespawnQueue,
}

impl SimContext {
    pub fn new(navigator: NavGrid, player: Option<EntityId>, clock: SimClock) -> Self {
        Self {
            navigator,
            player,
            clock,
            despawns: DespawnQueue::new(),
        }
    }

    pub fn now_seconds(&self) -> f64 {
        self.clock.elapsed_seconds()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drains_only_due_entries_in_order() {
        let mut queue = DespawnQueue::new();
        queue.schedule(EntityId(3), 2.0);
        queue.schedule(EntityId(1), 1.0);
        queue.schedule(EntityId(2), 1.5);

        assert_eq!(queue.drain_expired(1.5), vec![EntityId(1), EntityId(2)]);
        assert_eq!(queue.len(), 1);
        assert!(queue.contains(EntityId(3)));
        assert!(queue.drain_expired(1.9).is_empty());
        assert_eq!(queue.drain_expired(5.0), vec![EntityId(3)]);
        assert!(queue.is_empty());
    }
}
