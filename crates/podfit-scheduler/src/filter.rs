use crate::demand::compute_pod_demand;
use crate::node::NodeState;
use crate::report::report_availability;
use crate::sink::{ReportSink, TracingSink};
use crate::types::{pod_key, DimensionReport, FilterResult};
use crate::{Result, SchedulerError};
use podfit_core::Pod;
use std::sync::Arc;
use tracing::{debug, error};

/// Filter predicate trait
pub trait FilterPredicate: Send + Sync {
    /// Filter a node for the given pod
    fn filter(&self, pod: &Pod, node: Option<&NodeState>) -> FilterResult;

    /// Name of the filter
    fn name(&self) -> &str;
}

/// Advisory evaluation of a pod against a node.
///
/// The host scheduler owns registration and lifecycle; an advisor only
/// reports and never vetoes a placement.
pub trait AdmissionAdvisor: Send + Sync {
    /// Compare the pod's demand with the node's remaining capacity
    fn evaluate(&self, pod: &Pod, node: Option<&NodeState>) -> Result<Vec<DimensionReport>>;

    /// Name of the advisor
    fn name(&self) -> &str;
}

/// Reports per-resource availability for a pod on a node without ever
/// failing the pod
pub struct NodeResourcesReport {
    sink: Arc<dyn ReportSink>,
}

impl NodeResourcesReport {
    /// Name used in logs and plugin configuration
    pub const NAME: &'static str = "NodeResourcesReport";

    /// Create an advisor emitting to the given sink
    pub fn new(sink: Arc<dyn ReportSink>) -> Self {
        Self { sink }
    }
}

impl Default for NodeResourcesReport {
    fn default() -> Self {
        Self::new(Arc::new(TracingSink))
    }
}

impl AdmissionAdvisor for NodeResourcesReport {
    fn evaluate(&self, pod: &Pod, node: Option<&NodeState>) -> Result<Vec<DimensionReport>> {
        let node = node.ok_or_else(|| SchedulerError::missing_node(pod_key(pod)))?;

        let demand = compute_pod_demand(pod);
        Ok(report_availability(&demand, node, self.sink.as_ref()))
    }

    fn name(&self) -> &str {
        Self::NAME
    }
}

impl FilterPredicate for NodeResourcesReport {
    fn filter(&self, pod: &Pod, node: Option<&NodeState>) -> FilterResult {
        match self.evaluate(pod, node) {
            Ok(reports) => {
                // Shortfalls are only reported; the pod still passes
                let short: Vec<&str> = reports
                    .iter()
                    .filter(|r| !r.fits())
                    .map(|r| r.resource.as_str())
                    .collect();
                let node_name = node.map(|n| n.name.clone()).unwrap_or_default();

                if !short.is_empty() {
                    debug!(
                        "Pod {} exceeds available {} on node {}",
                        pod_key(pod),
                        short.join(", "),
                        node_name
                    );
                }

                FilterResult::pass(node_name)
            }
            Err(e) => {
                error!("{} filter error: {}", FilterPredicate::name(self), e);
                FilterResult::fail("unknown".to_string(), e.to_string())
            }
        }
    }

    fn name(&self) -> &str {
        Self::NAME
    }
}

/// Get default filter predicates
pub fn default_filters() -> Vec<Box<dyn FilterPredicate>> {
    vec![Box::new(NodeResourcesReport::default())]
}
