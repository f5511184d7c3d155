use super::quantities::{quantity_milli_value, quantity_value};
use super::{
    is_scalar_resource_name, RESOURCE_CPU, RESOURCE_EPHEMERAL_STORAGE, RESOURCE_MEMORY,
};
use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::warn;

/// Resource amounts along every dimension the scheduler accounts for
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResourceVector {
    /// CPU in millicores (1000 = 1 core)
    pub cpu_millis: i64,
    /// Memory in bytes
    pub memory_bytes: i64,
    /// Local ephemeral storage in bytes
    pub ephemeral_storage_bytes: i64,
    /// Extended resources, huge pages and other scalar resources, keyed by name
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub scalar_resources: BTreeMap<String, i64>,
}

impl ResourceVector {
    /// Create an all-zero vector
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a vector from a Kubernetes resource list (requests, overhead, allocatable).
    ///
    /// Names that are neither cpu, memory, ephemeral-storage nor a scalar
    /// resource (e.g. `pods`) are ignored. Malformed quantities count as zero.
    pub fn from_resource_list(list: &BTreeMap<String, Quantity>) -> Self {
        let mut vector = Self::default();

        for (name, quantity) in list {
            let parsed = match name.as_str() {
                RESOURCE_CPU => quantity_milli_value(quantity),
                RESOURCE_MEMORY | RESOURCE_EPHEMERAL_STORAGE => quantity_value(quantity),
                _ if is_scalar_resource_name(name) => quantity_value(quantity),
                _ => continue,
            };
            let amount = match parsed {
                Ok(amount) => amount,
                Err(e) => {
                    warn!(resource = %name, error = %e, "Ignoring malformed resource quantity");
                    continue;
                }
            };

            match name.as_str() {
                RESOURCE_CPU => vector.cpu_millis = amount,
                RESOURCE_MEMORY => vector.memory_bytes = amount,
                RESOURCE_EPHEMERAL_STORAGE => vector.ephemeral_storage_bytes = amount,
                _ => {
                    vector.scalar_resources.insert(name.clone(), amount);
                }
            }
        }

        vector
    }

    /// Component-wise sum. Scalar keys missing on either side count as zero.
    pub fn add(&mut self, other: &ResourceVector) {
        self.cpu_millis = self.cpu_millis.saturating_add(other.cpu_millis);
        self.memory_bytes = self.memory_bytes.saturating_add(other.memory_bytes);
        self.ephemeral_storage_bytes = self
            .ephemeral_storage_bytes
            .saturating_add(other.ephemeral_storage_bytes);

        for (name, quantity) in &other.scalar_resources {
            let entry = self.scalar_resources.entry(name.clone()).or_insert(0);
            *entry = entry.saturating_add(*quantity);
        }
    }

    /// Component-wise maximum. A scalar key is only written when `other`
    /// strictly exceeds the current amount, so a zero-valued key in `other`
    /// never introduces a new key.
    pub fn set_max(&mut self, other: &ResourceVector) {
        self.cpu_millis = self.cpu_millis.max(other.cpu_millis);
        self.memory_bytes = self.memory_bytes.max(other.memory_bytes);
        self.ephemeral_storage_bytes = self
            .ephemeral_storage_bytes
            .max(other.ephemeral_storage_bytes);

        for (name, quantity) in &other.scalar_resources {
            if *quantity > self.scalar(name) {
                self.scalar_resources.insert(name.clone(), *quantity);
            }
        }
    }

    /// True when nothing is requested: no cpu, memory or storage and no scalar keys
    pub fn is_zero(&self) -> bool {
        self.cpu_millis == 0
            && self.memory_bytes == 0
            && self.ephemeral_storage_bytes == 0
            && self.scalar_resources.is_empty()
    }

    /// Amount of a scalar resource, zero when absent
    pub fn scalar(&self, name: &str) -> i64 {
        self.scalar_resources.get(name).copied().unwrap_or(0)
    }
}
