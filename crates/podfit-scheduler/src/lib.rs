//! Podfit Scheduler - Pod resource demand and node availability reporting
//!
//! This crate provides:
//! - Pod demand aggregation (regular containers, init containers, overhead)
//! - Per-resource availability reports against a node snapshot
//! - Observability sinks for report events
//! - An advisory filter plugin that never rejects a pod

pub mod error;
pub mod types;
pub mod demand;
pub mod node;
pub mod report;
pub mod sink;
pub mod filter;

// Re-export commonly used types
pub use error::{SchedulerError, Result};
pub use demand::compute_pod_demand;
pub use filter::{AdmissionAdvisor, FilterPredicate, NodeResourcesReport};
pub use node::NodeState;
pub use report::report_availability;
pub use sink::{MemorySink, ReportEvent, ReportSink, TracingSink};
pub use types::{DimensionReport, FilterResult, ResourceUnit};
