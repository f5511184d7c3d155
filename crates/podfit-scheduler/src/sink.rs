use crate::types::{DimensionReport, ResourceUnit};
use podfit_core::{HumanBytes, HumanCpu, ResourceVector};
use std::sync::Mutex;
use tracing::info;

/// Something the availability reporter wants observed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportEvent {
    /// The pod requests nothing; no per-node records follow
    NoDemand,
    /// The pod's full demand, emitted before the per-dimension records
    Demand(ResourceVector),
    /// One dimension compared against one node
    Dimension {
        node: String,
        report: DimensionReport,
    },
}

/// Observability sink for report events
pub trait ReportSink: Send + Sync {
    /// Record one event
    fn record(&self, event: &ReportEvent);
}

/// Sink writing each event as a structured `tracing` record
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl ReportSink for TracingSink {
    fn record(&self, event: &ReportEvent) {
        match event {
            ReportEvent::NoDemand => info!("target resource requests none"),
            ReportEvent::Demand(demand) => {
                info!(
                    cpu = %HumanCpu(demand.cpu_millis),
                    memory = %HumanBytes(demand.memory_bytes),
                    scalar = %render_scalars(demand),
                    "target resource requests"
                );
            }
            ReportEvent::Dimension { node, report } => {
                info!(
                    node = %node,
                    resource = %report.resource,
                    request = %report.requested_display(),
                    available = %report.available_display(),
                    "node resources"
                );
            }
        }
    }
}

/// Scalar resources as `name=amount` pairs in name order, huge pages in bytes form
fn render_scalars(demand: &ResourceVector) -> String {
    demand
        .scalar_resources
        .iter()
        .map(|(name, amount)| {
            format!("{}={}", name, ResourceUnit::for_resource(name).render(*amount))
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Sink keeping every event in memory, in arrival order
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<ReportEvent>>,
}

impl MemorySink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded events
    pub fn events(&self) -> Vec<ReportEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Per-dimension records only
    pub fn reports(&self) -> Vec<DimensionReport> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                ReportEvent::Dimension { report, .. } => Some(report),
                _ => None,
            })
            .collect()
    }
}

impl ReportSink for MemorySink {
    fn record(&self, event: &ReportEvent) {
        let mut events = match self.events.lock() {
            Ok(events) => events,
            Err(poisoned) => poisoned.into_inner(),
        };
        events.push(event.clone());
    }
}
