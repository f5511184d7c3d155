use podfit_core::resources::{is_huge_page_resource_name, RESOURCE_CPU, RESOURCE_EPHEMERAL_STORAGE, RESOURCE_MEMORY};
use podfit_core::{HumanBytes, HumanCpu, Pod};
use serde::Serialize;

/// How the amounts of a resource dimension are measured and rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceUnit {
    /// Millicores, rendered with the whole-core equivalent
    MilliCpu,
    /// Bytes, rendered with the IEC human form
    Bytes,
    /// Plain integer count
    Count,
}

impl ResourceUnit {
    /// Unit for a resource name: cpu, memory-like (memory, storage, huge pages), or a count
    pub fn for_resource(name: &str) -> Self {
        match name {
            RESOURCE_CPU => Self::MilliCpu,
            RESOURCE_MEMORY | RESOURCE_EPHEMERAL_STORAGE => Self::Bytes,
            _ if is_huge_page_resource_name(name) => Self::Bytes,
            _ => Self::Count,
        }
    }

    /// Render an amount in this unit
    pub fn render(&self, amount: i64) -> String {
        match self {
            Self::MilliCpu => HumanCpu(amount).to_string(),
            Self::Bytes => HumanBytes(amount).to_string(),
            Self::Count => amount.to_string(),
        }
    }
}

/// Comparison of one resource dimension between a pod and a node
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DimensionReport {
    /// Resource name ("cpu", "memory", or the scalar resource name)
    pub resource: String,
    /// Unit of `requested` and `available`
    pub unit: ResourceUnit,
    /// Amount the pod requests
    pub requested: i64,
    /// Node allocatable minus node requested; negative when over-committed
    pub available: i64,
}

impl DimensionReport {
    /// Create a report, deriving the unit from the resource name
    pub fn new(resource: impl Into<String>, requested: i64, available: i64) -> Self {
        let resource = resource.into();
        Self {
            unit: ResourceUnit::for_resource(&resource),
            resource,
            requested,
            available,
        }
    }

    /// Whether the node has room for the request on this dimension
    pub fn fits(&self) -> bool {
        self.requested <= self.available
    }

    /// Requested amount rendered in the dimension's unit
    pub fn requested_display(&self) -> String {
        self.unit.render(self.requested)
    }

    /// Available amount rendered in the dimension's unit
    pub fn available_display(&self) -> String {
        self.unit.render(self.available)
    }
}

/// Result of filtering a node
#[derive(Debug, Clone)]
pub struct FilterResult {
    /// Node name
    pub node_name: String,
    /// Whether the node passed the filter
    pub passed: bool,
    /// Reason for failure (if any)
    pub reason: Option<String>,
}

impl FilterResult {
    /// Create a passing filter result
    pub fn pass(node_name: String) -> Self {
        Self {
            node_name,
            passed: true,
            reason: None,
        }
    }

    /// Create a failing filter result
    pub fn fail(node_name: String, reason: String) -> Self {
        Self {
            node_name,
            passed: false,
            reason: Some(reason),
        }
    }
}

/// `namespace/name` of a pod, for log lines and errors
pub fn pod_key(pod: &Pod) -> String {
    let name = pod.metadata.name.as_deref().unwrap_or("unknown");
    match pod.metadata.namespace.as_deref() {
        Some(namespace) => format!("{}/{}", namespace, name),
        None => name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_for_resource() {
        assert_eq!(ResourceUnit::for_resource("cpu"), ResourceUnit::MilliCpu);
        assert_eq!(ResourceUnit::for_resource("memory"), ResourceUnit::Bytes);
        assert_eq!(ResourceUnit::for_resource("hugepages-2Mi"), ResourceUnit::Bytes);
        assert_eq!(ResourceUnit::for_resource("nvidia.com/gpu"), ResourceUnit::Count);
    }

    #[test]
    fn test_dimension_report_rendering() {
        let cpu = DimensionReport::new("cpu", 3000, 1000);
        assert_eq!(cpu.requested_display(), "3000 (3)");
        assert_eq!(cpu.available_display(), "1000 (1)");
        assert!(!cpu.fits());

        let pages = DimensionReport::new("hugepages-2Mi", 2 * 1024 * 1024, 0);
        assert_eq!(pages.unit, ResourceUnit::Bytes);
        assert_eq!(pages.requested_display(), "2097152 (2.0 MiB)");

        let foo = DimensionReport::new("example.com/foo", 2097152, -3);
        assert_eq!(foo.requested_display(), "2097152");
        assert_eq!(foo.available_display(), "-3");
    }

    #[test]
    fn test_dimension_report_json() {
        let report = DimensionReport::new("cpu", 3000, 1000);
        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["resource"], "cpu");
        assert_eq!(value["unit"], "milli_cpu");
        assert_eq!(value["requested"], 3000);
        assert_eq!(value["available"], 1000);
    }

    #[test]
    fn test_filter_result() {
        let pass = FilterResult::pass("node1".to_string());
        assert!(pass.passed);
        assert!(pass.reason.is_none());

        let fail = FilterResult::fail("unknown".to_string(), "node not found".to_string());
        assert!(!fail.passed);
        assert_eq!(fail.reason, Some("node not found".to_string()));
    }

    #[test]
    fn test_pod_key() {
        let mut pod = Pod::default();
        assert_eq!(pod_key(&pod), "unknown");

        pod.metadata.name = Some("nginx".to_string());
        assert_eq!(pod_key(&pod), "nginx");

        pod.metadata.namespace = Some("default".to_string());
        assert_eq!(pod_key(&pod), "default/nginx");
    }
}
