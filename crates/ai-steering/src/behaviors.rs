//! Single-agent steering behaviors.

use core::f32::consts::TAU;

use ai_core::{clamp_magnitude, DeterministicRng, Vec3};
use ai_nav::Navigator;

use crate::{Locomotion, SteeringAgent};

/// Applies a raw steering force: clamp to `max_force`, divide by mass, add to
/// the current velocity and clamp to `max_speed`.
pub fn apply_force(agent: &SteeringAgent, force: Vec3) -> Vec3 {
    let force = clamp_magnitude(force, agent.max_force()) / agent.mass();
    clamp_magnitude(agent.velocity + force, agent.max_speed())
}

/// Steers from the current velocity toward `desired`.
pub fn apply_desired(agent: &SteeringAgent, desired: Vec3) -> Vec3 {
    apply_force(agent, desired - agent.velocity)
}

/// Full-speed velocity pointing at `target`.
pub fn seek_desired(agent: &SteeringAgent, target: Vec3) -> Vec3 {
    agent.offset_to(target).normalize_or_zero() * agent.max_speed()
}

/// Like [`seek_desired`], but inside `slowing_radius` the speed falls off
/// linearly with distance, reaching zero at the target.
pub fn arrive_desired(agent: &SteeringAgent, target: Vec3) -> Vec3 {
    let offset = agent.offset_to(target);
    let distance = offset.length();
    let slowing_radius = agent.params().slowing_radius;

    let mut speed = agent.max_speed();
    if slowing_radius > 0.0 && distance <= slowing_radius {
        speed *= distance / slowing_radius;
    }
    offset.normalize_or_zero() * speed
}

pub fn seek(agent: &SteeringAgent, target: Vec3) -> Vec3 {
    apply_desired(agent, seek_desired(agent, target))
}

/// Seek with arrival.
pub fn arrive(agent: &SteeringAgent, target: Vec3) -> Vec3 {
    apply_desired(agent, arrive_desired(agent, target))
}

pub fn flee(agent: &SteeringAgent, threat: Vec3) -> Vec3 {
    apply_desired(agent, flee_desired(agent, threat))
}

pub(crate) fn flee_desired(agent: &SteeringAgent, threat: Vec3) -> Vec3 {
    -agent.offset_to(threat).normalize_or_zero() * agent.max_speed()
}

/// Where `other` will be by the time `agent` could cover the distance to it
/// at full speed.
pub fn predict_position(agent: &SteeringAgent, other: &SteeringAgent) -> Vec3 {
    let distance = agent.distance_to(other.position);
    let lookahead = if agent.max_speed() > 0.0 {
        distance / agent.max_speed()
    } else {
        0.0
    };
    other.position + other.velocity * lookahead
}

pub fn pursuit(agent: &SteeringAgent, quarry: &SteeringAgent) -> Vec3 {
    seek(agent, predict_position(agent, quarry))
}

pub fn evade(agent: &SteeringAgent, threat: &SteeringAgent) -> Vec3 {
    flee(agent, predict_position(agent, threat))
}

/// Patrols the agent's waypoint list back and forth.
///
/// Resolves the route through `navigator` on first use. Reaching the current
/// waypoint (closer than `path_radius`) moves the cursor before seeking, with
/// arrival, whatever waypoint is current afterwards. With no route the agent
/// brakes toward a standstill.
pub fn path_following(agent: &mut SteeringAgent, navigator: &dyn Navigator) -> Vec3 {
    let position = agent.position;
    agent.path.resolve(position, navigator);

    let Some(target) = agent.path.current_target() else {
        return apply_desired(agent, Vec3::ZERO);
    };
    if agent.distance_to(target) < agent.params().path_radius {
        agent.path.advance();
    }

    match agent.path.current_target() {
        Some(target) => arrive(agent, target),
        None => apply_desired(agent, Vec3::ZERO),
    }
}

/// Meanders by steering toward a point on a circle projected ahead of the
/// agent, nudging that point's angle randomly every call.
pub fn wander<R>(agent: &mut SteeringAgent, rng: &mut R) -> Vec3
where
    R: DeterministicRng + ?Sized,
{
    let params = *agent.params();
    let heading = params.locomotion.project(agent.velocity).normalize_or_zero();
    let circle_center = heading * params.circle_distance;

    let (sin, cos) = agent.wander_angle.sin_cos();
    let displacement = match params.locomotion {
        Locomotion::Ground => Vec3::new(cos, 0.0, sin),
        Locomotion::Free => Vec3::new(cos, sin, 0.0),
    } * params.circle_radius;

    let half = params.angle_change * 0.5;
    agent.wander_angle = (agent.wander_angle + rng.next_range(-half, half)).rem_euclid(TAU);

    let wander_force = clamp_magnitude(circle_center + displacement, params.max_speed);
    apply_force(agent, wander_force)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SteeringParams;
    use ai_core::{EntityId, SplitMix64};

    fn agent_at(position: Vec3, params: SteeringParams) -> SteeringAgent {
        SteeringAgent::new(EntityId(1), position, params).expect("valid params")
    }

    #[test]
    fn seek_from_rest_accelerates_by_max_force_over_mass() {
        let params = SteeringParams {
            mass: 2.0,
            ..SteeringParams::new(10.0, 4.0)
        };
        let agent = agent_at(Vec3::ZERO, params);
        let v = seek(&agent, Vec3::new(10.0, 0.0, 0.0));
        assert!((v - Vec3::new(2.0, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn flee_points_away() {
        let agent = agent_at(Vec3::ZERO, SteeringParams::new(5.0, 100.0));
        let v = flee(&agent, Vec3::new(3.0, 0.0, 0.0));
        assert!(v.x < 0.0);
        assert!((v.length() - 5.0).abs() < 1e-5);
    }

    #[test]
    fn seek_at_target_is_a_no_op_from_rest() {
        let agent = agent_at(Vec3::ONE, SteeringParams::default());
        assert_eq!(seek(&agent, Vec3::ONE), Vec3::ZERO);
        assert_eq!(arrive(&agent, Vec3::ONE), Vec3::ZERO);
    }

    #[test]
    fn arrival_scales_speed_inside_slowing_radius() {
        let params = SteeringParams {
            slowing_radius: 4.0,
            ..SteeringParams::new(8.0, 100.0)
        };
        let agent = agent_at(Vec3::ZERO, params);
        let desired = arrive_desired(&agent, Vec3::new(1.0, 0.0, 0.0));
        assert!((desired.length() - 2.0).abs() < 1e-5);

        let far = arrive_desired(&agent, Vec3::new(100.0, 0.0, 0.0));
        assert!((far.length() - 8.0).abs() < 1e-5);
    }

    #[test]
    fn ground_seek_ignores_height_difference() {
        let agent = agent_at(Vec3::ZERO, SteeringParams::new(5.0, 100.0));
        let v = seek(&agent, Vec3::new(0.0, 50.0, 1.0));
        assert_eq!(v.y, 0.0);
        assert!(v.z > 0.0);
    }

    #[test]
    fn pursuit_leads_a_moving_target() {
        let hunter = agent_at(Vec3::ZERO, SteeringParams::new(5.0, 100.0));
        let mut quarry = agent_at(Vec3::new(10.0, 0.0, 0.0), SteeringParams::default());
        quarry.velocity = Vec3::new(0.0, 0.0, 5.0);

        assert_eq!(predict_position(&hunter, &quarry), Vec3::new(10.0, 0.0, 10.0));
        let v = pursuit(&hunter, &quarry);
        assert!(v.x > 0.0 && v.z > 0.0);

        let away = evade(&hunter, &quarry);
        assert!(away.x < 0.0 && away.z < 0.0);
    }

    #[test]
    fn prediction_survives_zero_max_speed() {
        let hunter = agent_at(Vec3::ZERO, SteeringParams::new(0.0, 1.0));
        let mut quarry = agent_at(Vec3::X, SteeringParams::default());
        quarry.velocity = Vec3::Z;
        assert_eq!(predict_position(&hunter, &quarry), Vec3::X);
        assert_eq!(pursuit(&hunter, &quarry), Vec3::ZERO);
    }

    #[test]
    fn wander_perturbs_angle_within_half_change() {
        let params = SteeringParams {
            angle_change: 1.0,
            ..SteeringParams::default()
        };
        let mut agent = agent_at(Vec3::ZERO, params);
        agent.wander_angle = 2.0;
        let mut rng = SplitMix64::new(3);

        let v = wander(&mut agent, &mut rng);

        assert!((agent.wander_angle - 2.0).abs() <= 0.5);
        assert!(v.length() <= agent.max_speed() + 1e-5);
        assert_eq!(v.y, 0.0);
    }
}
