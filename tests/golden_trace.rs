#[path = "common/mod.rs"]
mod common;
use common::assert_snapshot;
use ringwalk::{CyclicSequenceSimulator, SimulationConfig, StepRecord};

fn format_record(record: &StepRecord) -> String {
    format!(
        "{:?} trigger={} position={} operand={} pointer={} len={}\n",
        record.kind, record.trigger, record.position, record.operand, record.pointer, record.len
    )
}

#[test]
fn step_trace_matches_golden() {
    let config = SimulationConfig {
        record_trace: true,
        ..SimulationConfig::default()
    };
    let mut sim = CyclicSequenceSimulator::with_config([3, 6, 1, 4, 5, 8, 11, 2], config);
    let summary = sim.run(7).expect("run succeeds");

    assert_eq!(summary.adds, 3);
    assert_eq!(summary.deletes, 4);
    assert_eq!(summary.final_len, 7);
    assert_eq!(summary.final_pointer, 1);

    let actual: String = summary.trace.iter().map(format_record).collect();
    assert_snapshot("trace/mixed.txt", &actual);
}
