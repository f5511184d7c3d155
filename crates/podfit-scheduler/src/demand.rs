use crate::types::pod_key;
use podfit_core::{Container, Pod, ResourceVector};
use tracing::debug;

/// Request vector of a single container; no resources or requests means zero
pub fn container_requests(container: &Container) -> ResourceVector {
    container
        .resources
        .as_ref()
        .and_then(|r| r.requests.as_ref())
        .map(ResourceVector::from_resource_list)
        .unwrap_or_default()
}

/// Compute the resources a pod needs on a node at its peak.
///
/// Regular containers run together, so their requests are summed. Init
/// containers run one at a time before them, so each is compared on its own
/// against that sum and the larger value is kept per dimension. Pod overhead
/// is added once on top.
///
/// Example:
///
/// ```text
/// InitContainers
///   IC1: cpu 2, memory 1G
///   IC2: cpu 2, memory 3G
/// Containers
///   C1:  cpu 2, memory 1G
///   C2:  cpu 1, memory 1G
///
/// Result: cpu 3, memory 3G
/// ```
pub fn compute_pod_demand(pod: &Pod) -> ResourceVector {
    let mut demand = ResourceVector::new();

    let spec = match &pod.spec {
        Some(spec) => spec,
        None => return demand,
    };

    for container in &spec.containers {
        demand.add(&container_requests(container));
    }

    for container in spec.init_containers.iter().flatten() {
        demand.set_max(&container_requests(container));
    }

    if let Some(overhead) = &spec.overhead {
        demand.add(&ResourceVector::from_resource_list(overhead));
    }

    debug!(
        "Pod {} demand: CPU {} milli, memory {} bytes, ephemeral storage {} bytes, {} scalar resources",
        pod_key(pod),
        demand.cpu_millis,
        demand.memory_bytes,
        demand.ephemeral_storage_bytes,
        demand.scalar_resources.len()
    );

    demand
}
