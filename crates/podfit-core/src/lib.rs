//! Podfit Core - Resource accounting primitives for pod placement reports
//!
//! This crate provides:
//! - Kubernetes quantity parsing and unit-aware rendering
//! - Resource name classification (huge pages, extended resources)
//! - The `ResourceVector` used to compare pod demand with node capacity
//! - Error types with miette diagnostics
//! - Manifest (de)serialization helpers

pub mod error;
pub mod resources;

// Re-export commonly used types
pub use error::{PodfitError, Result};
pub use resources::{
    is_huge_page_resource_name, is_scalar_resource_name, HumanBytes, HumanCpu, ResourceVector,
};

// Re-export k8s-openapi types for convenience
pub use k8s_openapi;
pub use k8s_openapi::api::core::v1::{Container, Node, Pod};
pub use k8s_openapi::apimachinery::pkg::api::resource::Quantity;

/// Serialize a value to pretty JSON
pub fn to_json_pretty<T: serde::Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| {
        PodfitError::serialization_error(
            format!("Failed to serialize to JSON: {}", e),
            Some(Box::new(e)),
        )
    })
}

/// Deserialize a manifest from YAML (JSON documents are valid YAML)
pub fn from_yaml<T: for<'de> serde::Deserialize<'de>>(data: &str) -> Result<T> {
    serde_yaml::from_str(data).map_err(|e| {
        PodfitError::serialization_error(
            format!("Failed to deserialize manifest: {}", e),
            Some(Box::new(e)),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pod_from_yaml() {
        let yaml = r#"
apiVersion: v1
kind: Pod
metadata:
  name: nginx
spec:
  containers:
    - name: web
      image: nginx
      resources:
        requests:
          cpu: 500m
          memory: 128Mi
"#;
        let pod: Pod = from_yaml(yaml).unwrap();
        assert_eq!(pod.metadata.name, Some("nginx".to_string()));

        let requests = pod.spec.unwrap().containers[0]
            .resources
            .clone()
            .unwrap()
            .requests
            .unwrap();
        assert_eq!(requests.get("cpu"), Some(&Quantity("500m".to_string())));
    }

    #[test]
    fn test_pod_from_json() {
        let json = r#"{"apiVersion":"v1","kind":"Pod","metadata":{"name":"nginx"}}"#;
        let pod: Pod = from_yaml(json).unwrap();
        assert_eq!(pod.metadata.name, Some("nginx".to_string()));
    }

    #[test]
    fn test_from_yaml_rejects_garbage() {
        let result: Result<Pod> = from_yaml("metadata: [unterminated");
        assert!(matches!(result, Err(PodfitError::SerializationError { .. })));
    }

    #[test]
    fn test_vector_to_json() {
        let mut vector = ResourceVector::default();
        vector.cpu_millis = 1500;
        vector
            .scalar_resources
            .insert("nvidia.com/gpu".to_string(), 1);

        let json = to_json_pretty(&vector).unwrap();
        assert!(json.contains("\"cpu_millis\": 1500"));
        assert!(json.contains("nvidia.com/gpu"));
    }
}
