//! Waypoint patrol state for path following.

use ai_core::Vec3;
use ai_nav::Navigator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PathDirection {
    #[default]
    Forward,
    Backward,
}

impl PathDirection {
    pub fn step(self) -> isize {
        match self {
            PathDirection::Forward => 1,
            PathDirection::Backward => -1,
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            PathDirection::Forward => PathDirection::Backward,
            PathDirection::Backward => PathDirection::Forward,
        }
    }
}

/// Cached waypoint list plus patrol cursor.
///
/// When a goal is set the waypoints are resolved lazily, on first access,
/// from the agent's position at that moment. The result (including an empty
/// "no path" result) is cached until the goal or the waypoints change.
#[derive(Debug, Clone, Default)]
pub struct PathFollower {
    waypoints: Vec<Vec3>,
    current: usize,
    direction: PathDirection,
    goal: Option<Vec3>,
    resolved: bool,
}

impl PathFollower {
    pub fn new() -> Self {
        Self::default()
    }

    /// A follower with a fixed patrol route and no goal.
    pub fn with_waypoints(waypoints: Vec<Vec3>) -> Self {
        let mut follower = Self::default();
        follower.set_waypoints(waypoints);
        follower
    }

    pub fn set_waypoints(&mut self, waypoints: Vec<Vec3>) {
        self.waypoints = waypoints;
        self.goal = None;
        self.resolved = true;
        self.rewind();
    }

    /// Requests a new route to `goal`; the search runs on next access.
    pub fn set_goal(&mut self, goal: Vec3) {
        self.waypoints.clear();
        self.goal = Some(goal);
        self.resolved = false;
        self.rewind();
    }

    pub fn goal(&self) -> Option<Vec3> {
        self.goal
    }

    pub fn waypoints(&self) -> &[Vec3] {
        &self.waypoints
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn direction(&self) -> PathDirection {
        self.direction
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved
    }

    pub fn current_target(&self) -> Option<Vec3> {
        self.waypoints.get(self.current).copied()
    }

    /// Resolves the route to the stored goal if that hasn't happened yet.
    pub fn resolve(&mut self, from: Vec3, navigator: &dyn Navigator) -> &[Vec3] {
        if !self.resolved {
            if let Some(goal) = self.goal {
                let path = navigator.find_path(from, goal);
                if path.is_empty() {
                    tracing::warn!(?from, ?goal, "no route to goal");
                }
                self.waypoints = path.points;
            }
            self.resolved = true;
            self.rewind();
        }
        &self.waypoints
    }

    /// Moves the cursor one step along the patrol, bouncing at either end.
    ///
    /// Walking off the end reverses direction and steps back, so a three-point
    /// route visits 0, 1, 2, 1, 0, 1, ... rather than wrapping around.
    pub fn advance(&mut self) {
        let len = self.waypoints.len();
        if len == 0 {
            return;
        }
        let next = self.current as isize + self.direction.step();
        if next < 0 || next >= len as isize {
            self.direction = self.direction.reversed();
            let back = self.current as isize + self.direction.step();
            self.current = back.clamp(0, len as isize - 1) as usize;
        } else {
            self.current = next as usize;
        }
    }

    fn rewind(&mut self) {
        self.current = 0;
        self.direction = PathDirection::Forward;
    }
}
