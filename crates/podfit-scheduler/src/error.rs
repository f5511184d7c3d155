// Allow unused assignments for diagnostic fields - they're used by the macros
#![allow(unused_assignments)]

use miette::Diagnostic;
use thiserror::Error;

/// Scheduler error type
#[derive(Error, Debug, Diagnostic)]
pub enum SchedulerError {
    /// The scheduling attempt carried no node to compare against
    #[error("Node not found while evaluating pod {pod_name}")]
    #[diagnostic(
        code(scheduler::missing_node),
        help("Resolve the candidate node before asking for a resource report")
    )]
    MissingNode {
        pod_name: String,
    },
}

/// Result type for scheduler operations
pub type Result<T> = std::result::Result<T, SchedulerError>;

impl SchedulerError {
    /// Create a MissingNode error
    pub fn missing_node(pod_name: impl Into<String>) -> Self {
        Self::MissingNode {
            pod_name: pod_name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_node_message() {
        let err = SchedulerError::missing_node("default/nginx");
        assert!(matches!(err, SchedulerError::MissingNode { .. }));
        assert_eq!(
            err.to_string(),
            "Node not found while evaluating pod default/nginx"
        );
    }
}
