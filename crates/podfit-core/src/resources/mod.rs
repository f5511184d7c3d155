pub mod quantities;
pub mod vector;

pub use quantities::{format_iec_bytes, quantity_milli_value, quantity_value, HumanBytes, HumanCpu};
pub use vector::ResourceVector;

/// CPU resource name
pub const RESOURCE_CPU: &str = "cpu";
/// Memory resource name
pub const RESOURCE_MEMORY: &str = "memory";
/// Local ephemeral storage resource name
pub const RESOURCE_EPHEMERAL_STORAGE: &str = "ephemeral-storage";

const HUGE_PAGES_PREFIX: &str = "hugepages-";
const ATTACHABLE_VOLUMES_PREFIX: &str = "attachable-volumes-";
const NATIVE_NAMESPACE: &str = "kubernetes.io/";
const REQUESTS_PREFIX: &str = "requests.";

/// Huge page resources (`hugepages-2Mi`, `hugepages-1Gi`) are measured in bytes
pub fn is_huge_page_resource_name(name: &str) -> bool {
    name.starts_with(HUGE_PAGES_PREFIX)
}

/// Native resources living under the `kubernetes.io/` namespace
pub fn is_prefixed_native_resource(name: &str) -> bool {
    name.contains(NATIVE_NAMESPACE)
}

/// Per-driver volume attach limits
pub fn is_attachable_volume_resource_name(name: &str) -> bool {
    name.starts_with(ATTACHABLE_VOLUMES_PREFIX)
}

/// Extended resources are domain-qualified names outside `kubernetes.io/`,
/// e.g. `nvidia.com/gpu`.
pub fn is_extended_resource_name(name: &str) -> bool {
    let native = !name.contains('/') || is_prefixed_native_resource(name);
    if native || name.starts_with(REQUESTS_PREFIX) {
        return false;
    }

    // Must stay a qualified name once used as a quota key
    is_qualified_name(&format!("{}{}", REQUESTS_PREFIX, name))
}

/// Whether a resource name is tracked in `ResourceVector::scalar_resources`
pub fn is_scalar_resource_name(name: &str) -> bool {
    is_extended_resource_name(name)
        || is_huge_page_resource_name(name)
        || is_prefixed_native_resource(name)
        || is_attachable_volume_resource_name(name)
}

/// Qualified name: `[dns-subdomain/]name`, name at most 63 characters
fn is_qualified_name(value: &str) -> bool {
    let (prefix, name) = match value.split_once('/') {
        Some((prefix, name)) => (Some(prefix), name),
        None => (None, value),
    };

    if let Some(prefix) = prefix {
        if !is_dns_subdomain(prefix) {
            return false;
        }
    }

    if name.is_empty() || name.len() > 63 {
        return false;
    }

    let chars: Vec<char> = name.chars().collect();
    if !chars[0].is_ascii_alphanumeric() || !chars[chars.len() - 1].is_ascii_alphanumeric() {
        return false;
    }

    chars
        .iter()
        .all(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_' || *c == '.')
}

/// DNS-1123 subdomain
fn is_dns_subdomain(name: &str) -> bool {
    if name.is_empty() || name.len() > 253 {
        return false;
    }

    name.split('.').all(is_dns_label)
}

/// DNS-1123 label: lowercase alphanumeric or '-', starting and ending with alphanumeric
fn is_dns_label(label: &str) -> bool {
    let bytes = label.as_bytes();
    let (Some(first), Some(last)) = (bytes.first(), bytes.last()) else {
        return false;
    };

    let alnum = |b: &u8| b.is_ascii_lowercase() || b.is_ascii_digit();
    bytes.len() <= 63
        && alnum(first)
        && alnum(last)
        && bytes.iter().all(|b| alnum(b) || *b == b'-')
}
