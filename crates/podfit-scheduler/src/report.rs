use crate::node::NodeState;
use crate::sink::{ReportEvent, ReportSink};
use crate::types::DimensionReport;
use podfit_core::resources::{RESOURCE_CPU, RESOURCE_MEMORY};
use podfit_core::ResourceVector;

/// Compare a pod's demand with what the node has left, one record per dimension.
///
/// Only reports; nothing here decides whether the pod fits. A zero demand
/// records `NoDemand` and yields no records. Otherwise cpu and memory are
/// always reported, followed by every scalar resource of the demand in name
/// order. Node-side entries that are absent count as zero and availability
/// is never clamped.
pub fn report_availability(
    demand: &ResourceVector,
    node: &NodeState,
    sink: &dyn ReportSink,
) -> Vec<DimensionReport> {
    if demand.is_zero() {
        sink.record(&ReportEvent::NoDemand);
        return Vec::new();
    }

    sink.record(&ReportEvent::Demand(demand.clone()));

    let allocatable = &node.allocatable;
    let requested = &node.requested;

    let mut reports = vec![
        DimensionReport::new(
            RESOURCE_CPU,
            demand.cpu_millis,
            allocatable.cpu_millis.saturating_sub(requested.cpu_millis),
        ),
        DimensionReport::new(
            RESOURCE_MEMORY,
            demand.memory_bytes,
            allocatable.memory_bytes.saturating_sub(requested.memory_bytes),
        ),
    ];

    // BTreeMap iteration is sorted by name
    for (name, quantity) in &demand.scalar_resources {
        reports.push(DimensionReport::new(
            name.as_str(),
            *quantity,
            allocatable.scalar(name).saturating_sub(requested.scalar(name)),
        ));
    }

    for report in &reports {
        sink.record(&ReportEvent::Dimension {
            node: node.name.clone(),
            report: report.clone(),
        });
    }

    reports
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemorySink;
    use crate::types::ResourceUnit;

    const MIB: i64 = 1024 * 1024;
    const GIB: i64 = 1024 * MIB;

    fn vector(cpu: i64, memory: i64, scalars: &[(&str, i64)]) -> ResourceVector {
        let mut vector = ResourceVector::new();
        vector.cpu_millis = cpu;
        vector.memory_bytes = memory;
        for (name, amount) in scalars {
            vector.scalar_resources.insert(name.to_string(), *amount);
        }
        vector
    }

    fn create_test_node(allocatable: ResourceVector, requested: ResourceVector) -> NodeState {
        NodeState::new("node1", allocatable, requested)
    }

    #[test]
    fn test_zero_demand_short_circuits() {
        let sink = MemorySink::new();
        let node = create_test_node(vector(4000, 8 * GIB, &[]), ResourceVector::new());

        let reports = report_availability(&ResourceVector::new(), &node, &sink);

        assert!(reports.is_empty());
        assert_eq!(sink.events(), vec![ReportEvent::NoDemand]);
    }

    #[test]
    fn test_storage_only_demand_still_reports_cpu_and_memory() {
        let sink = MemorySink::new();
        let node = create_test_node(vector(4000, 8 * GIB, &[]), ResourceVector::new());
        let mut demand = ResourceVector::new();
        demand.ephemeral_storage_bytes = GIB;

        let reports = report_availability(&demand, &node, &sink);

        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0], DimensionReport::new("cpu", 0, 4000));
        assert_eq!(reports[1], DimensionReport::new("memory", 0, 8 * GIB));
    }

    #[test]
    fn test_cpu_deficit_is_reported_not_rejected() {
        let sink = MemorySink::new();
        let node = create_test_node(vector(4000, 8 * GIB, &[]), vector(3000, 2 * GIB, &[]));
        let demand = vector(3000, GIB, &[]);

        let reports = report_availability(&demand, &node, &sink);

        let cpu = &reports[0];
        assert_eq!(cpu.resource, "cpu");
        assert_eq!(cpu.unit, ResourceUnit::MilliCpu);
        assert_eq!(cpu.requested, 3000);
        assert_eq!(cpu.available, 1000);
        assert!(!cpu.fits());

        let memory = &reports[1];
        assert_eq!(memory.available, 6 * GIB);
        assert!(memory.fits());
    }

    #[test]
    fn test_over_committed_node_goes_negative() {
        let sink = MemorySink::new();
        let node = create_test_node(vector(2000, GIB, &[]), vector(2500, 2 * GIB, &[]));

        let reports = report_availability(&vector(100, MIB, &[]), &node, &sink);

        assert_eq!(reports[0].available, -500);
        assert_eq!(reports[1].available, -GIB);
    }

    #[test]
    fn test_scalar_resources_sorted_and_missing_node_entries_read_as_zero() {
        let sink = MemorySink::new();
        let node = create_test_node(
            vector(4000, 8 * GIB, &[("nvidia.com/gpu", 4), ("hugepages-2Mi", 64 * MIB)]),
            vector(0, 0, &[("nvidia.com/gpu", 1)]),
        );
        let demand = vector(
            1000,
            GIB,
            &[
                ("nvidia.com/gpu", 2),
                ("example.com/foo", 3),
                ("hugepages-2Mi", 2 * MIB),
            ],
        );

        let reports = report_availability(&demand, &node, &sink);

        let names: Vec<&str> = reports.iter().map(|r| r.resource.as_str()).collect();
        assert_eq!(
            names,
            vec!["cpu", "memory", "example.com/foo", "hugepages-2Mi", "nvidia.com/gpu"]
        );

        // Absent on the node: 0 - 0
        assert_eq!(reports[2].available, 0);
        assert_eq!(reports[2].unit, ResourceUnit::Count);
        assert_eq!(reports[2].requested_display(), "3");

        assert_eq!(reports[3].available, 64 * MIB);
        assert_eq!(reports[3].unit, ResourceUnit::Bytes);
        assert_eq!(reports[3].requested_display(), "2097152 (2.0 MiB)");

        assert_eq!(reports[4].available, 3);
    }

    #[test]
    fn test_scalar_requested_without_allocatable_goes_negative() {
        let sink = MemorySink::new();
        let node = create_test_node(
            vector(4000, 8 * GIB, &[]),
            vector(0, 0, &[("example.com/foo", 2)]),
        );

        let reports = report_availability(&vector(0, 0, &[("example.com/foo", 1)]), &node, &sink);

        assert_eq!(reports[2].resource, "example.com/foo");
        assert_eq!(reports[2].requested, 1);
        assert_eq!(reports[2].available, -2);
        assert!(!reports[2].fits());
    }

    #[test]
    fn test_sink_receives_demand_then_dimensions() {
        let sink = MemorySink::new();
        let node = create_test_node(vector(4000, 8 * GIB, &[]), ResourceVector::new());
        let demand = vector(500, GIB, &[("example.com/foo", 1)]);

        let reports = report_availability(&demand, &node, &sink);

        let events = sink.events();
        assert_eq!(events.len(), 4);
        assert_eq!(events[0], ReportEvent::Demand(demand));
        assert_eq!(
            events[1],
            ReportEvent::Dimension {
                node: "node1".to_string(),
                report: reports[0].clone(),
            }
        );
        assert_eq!(sink.reports(), reports);
    }
}
