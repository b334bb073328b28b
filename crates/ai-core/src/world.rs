use crate::AgentId;

/// Read-only world access.
///
/// The core crate does not prescribe which queries a world must expose;
/// subsystems (combat sensing, bodies) define extension traits on top.
pub trait WorldView {
    type Agent: AgentId;

    /// False once the host has despawned `agent`.
    fn exists(&self, agent: Self::Agent) -> bool;
}

/// Write access / effect sink.
pub trait WorldMut: WorldView {}
