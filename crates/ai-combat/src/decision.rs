use ai_core::Vec3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CombatState {
    #[default]
    None,
    Wandering,
    Seeking,
    Attacking,
    /// Terminal.
    Dead,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decision<A> {
    pub state: CombatState,
    pub target: Option<A>,
}

/// Closest candidate to `origin` by straight-line distance.
///
/// Candidates without a position are skipped. On equal distances the earlier
/// candidate wins.
pub fn nearest<A, F>(origin: Vec3, candidates: &[A], mut position: F) -> Option<(A, f32)>
where
    A: Copy,
    F: FnMut(A) -> Option<Vec3>,
{
    let mut best: Option<(A, f32)> = None;
    for &candidate in candidates {
        let Some(p) = position(candidate) else {
            continue;
        };
        let distance = origin.distance(p);
        if best.map_or(true, |(_, d)| distance < d) {
            best = Some((candidate, distance));
        }
    }
    best
}

/// Picks the next state from the nearest perceived enemy.
///
/// Strictly inside `attack_range` attacks; anything else, the boundary
/// included, keeps seeking. With nothing perceived the agent seeks `fallback`
/// or, lacking one, goes `idle`.
pub fn decide<A: Copy>(
    nearest: Option<(A, f32)>,
    attack_range: f32,
    fallback: Option<A>,
    idle: CombatState,
) -> Decision<A> {
    match (nearest, fallback) {
        (Some((target, distance)), _) if distance < attack_range => Decision {
            state: CombatState::Attacking,
            target: Some(target),
        },
        (Some((target, _)), _) => Decision {
            state: CombatState::Seeking,
            target: Some(target),
        },
        (None, Some(fallback)) => Decision {
            state: CombatState::Seeking,
            target: Some(fallback),
        },
        (None, None) => Decision {
            state: idle,
            target: None,
        },
    }
}
