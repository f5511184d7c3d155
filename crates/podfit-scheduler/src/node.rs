use crate::demand::compute_pod_demand;
use podfit_core::{Node, Pod, ResourceVector};
use tracing::debug;

/// Snapshot of a node's capacity and what is already committed on it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeState {
    /// Node name
    pub name: String,
    /// Total capacity available for scheduling
    pub allocatable: ResourceVector,
    /// Capacity taken by pods already assigned to the node
    pub requested: ResourceVector,
}

impl NodeState {
    /// Create a node snapshot from precomputed vectors
    pub fn new(
        name: impl Into<String>,
        allocatable: ResourceVector,
        requested: ResourceVector,
    ) -> Self {
        Self {
            name: name.into(),
            allocatable,
            requested,
        }
    }

    /// Build a snapshot from a Node and the pods assigned to it.
    ///
    /// `requested` is the sum of every assigned pod's demand.
    pub fn from_node(node: &Node, pods: &[Pod]) -> Self {
        let name = node
            .metadata
            .name
            .clone()
            .unwrap_or_else(|| "unknown".to_string());

        let allocatable = node
            .status
            .as_ref()
            .and_then(|s| s.allocatable.as_ref())
            .map(ResourceVector::from_resource_list)
            .unwrap_or_default();

        let mut requested = ResourceVector::new();
        for pod in pods {
            requested.add(&compute_pod_demand(pod));
        }

        debug!(
            "Node {} allocatable CPU: {} milli, Memory: {} bytes; requested by {} pods CPU: {} milli, Memory: {} bytes",
            name,
            allocatable.cpu_millis,
            allocatable.memory_bytes,
            pods.len(),
            requested.cpu_millis,
            requested.memory_bytes
        );

        Self {
            name,
            allocatable,
            requested,
        }
    }
}
