//! Behaviors that read or write more than one agent.

use ai_core::Vec3;

use crate::behaviors::{apply_force, arrive_desired, flee_desired, predict_position, seek};
use crate::SteeringAgent;

/// Push-away force from neighbors inside `separation_radius`.
///
/// This is a raw force, not a velocity: callers add it to other forces before
/// the shared force limit. The agent itself is skipped by id, so passing the
/// whole crowd is fine.
pub fn separation(agent: &SteeringAgent, neighbors: &[SteeringAgent]) -> Vec3 {
    let radius = agent.params().separation_radius;
    let mut sum = Vec3::ZERO;
    let mut count = 0u32;

    for other in neighbors {
        if other.id == agent.id {
            continue;
        }
        let offset = agent.offset_to(other.position);
        if offset.length() <= radius {
            sum += offset;
            count += 1;
        }
    }

    if count == 0 {
        return Vec3::ZERO;
    }
    -(sum / count as f32).normalize_or_zero() * agent.params().max_separation
}

/// Trails `leader` from a point behind it, stepping aside when standing in
/// its way, while keeping apart from `neighbors`.
pub fn follow_leader(
    leader: &SteeringAgent,
    follower: &SteeringAgent,
    neighbors: &[SteeringAgent],
) -> Vec3 {
    let params = follower.params();
    let heading = leader
        .locomotion()
        .project(leader.velocity)
        .normalize_or_zero()
        * params.leader_behind_distance;
    let ahead = leader.position + heading;
    let behind = leader.position - heading;

    let mut force = Vec3::ZERO;
    let in_the_way = follower.distance_to(ahead) <= params.leader_sight_radius
        || follower.distance_to(leader.position) <= params.leader_sight_radius;
    if in_the_way {
        let threat = predict_position(follower, leader);
        force += flee_desired(follower, threat) - follower.velocity;
    }

    force += arrive_desired(follower, behind) - follower.velocity;
    force += separation(follower, neighbors);

    apply_force(follower, force)
}

/// Single-file line: the first follower seeks the leader, every later one
/// seeks the follower in front of it.
///
/// Velocities are written straight into `followers`. Targets come from a
/// position snapshot taken before any write, so slice order is the only
/// thing that decides who follows whom.
pub fn queue(leader: &SteeringAgent, followers: &mut [SteeringAgent]) {
    let positions: Vec<Vec3> = followers.iter().map(|f| f.position).collect();
    for (i, follower) in followers.iter_mut().enumerate() {
        let target = if i == 0 {
            leader.position
        } else {
            positions[i - 1]
        };
        follower.velocity = seek(follower, target);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SteeringParams;
    use ai_core::EntityId;

    fn agent(id: u64, x: f32, z: f32) -> SteeringAgent {
        SteeringAgent::new(EntityId(id), Vec3::new(x, 0.0, z), SteeringParams::default())
            .expect("valid params")
    }

    #[test]
    fn separation_ignores_self_and_far_agents() {
        let me = agent(1, 0.0, 0.0);
        let crowd = vec![me.clone(), agent(2, 50.0, 0.0)];
        assert_eq!(separation(&me, &crowd), Vec3::ZERO);
    }

    #[test]
    fn separation_pushes_away_from_the_average_neighbor() {
        let me = agent(1, 0.0, 0.0);
        let crowd = vec![agent(2, 1.0, 0.0), agent(3, 1.0, 2.0)];
        let push = separation(&me, &crowd);
        assert!(push.x < 0.0 && push.z < 0.0);
        assert!((push.length() - me.params().max_separation).abs() < 1e-4);
    }

    #[test]
    fn queue_chains_followers_in_slice_order() {
        let leader = agent(0, 10.0, 0.0);
        let mut line = vec![agent(1, 0.0, 0.0), agent(2, 0.0, -10.0)];
        queue(&leader, &mut line);

        assert!(line[0].velocity.x > 0.0);
        assert!(line[0].velocity.z.abs() < 1e-5);
        // Second follower heads for where the first one stood, not the leader.
        assert!(line[1].velocity.x.abs() < 1e-5);
        assert!(line[1].velocity.z > 0.0);
    }
}
