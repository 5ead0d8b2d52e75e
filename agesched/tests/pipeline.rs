//! End-to-end: workload file → simulation → report files.

use std::fs;

use agesched::config::SimulationConfig;
use agesched::input::{read_workload, InputFormat};
use agesched::report::{write_json, write_summary};
use agesched::scheduler::{ScheduleError, ScheduleInput, Simulator};
use tempfile::tempdir;

const TEXT_WORKLOAD: &str = "\
4
compile 5 4 10
lint    2 1 0
test    8 3 12
package 1 2 9
3
compile test
lint test
test package
";

#[test]
fn text_workload_produces_reports() {
    let dir = tempdir().unwrap();
    let input_path = dir.path().join("input.txt");
    let output_path = dir.path().join("taskoutput.txt");
    let summary_path = dir.path().join("task_summary.txt");
    fs::write(&input_path, TEXT_WORKLOAD).unwrap();

    let workload = read_workload(&input_path, InputFormat::from_path(&input_path)).unwrap();
    let input = ScheduleInput::load(workload.tasks, workload.dependencies).unwrap();
    let result = Simulator::new(SimulationConfig::default()).run(&input).unwrap();

    // t=0: compile(5) vs lint(2)           → compile 0..4
    // t=4: lint(2+2=4), test still blocked → lint 4..5
    // t=5: test                            → test 5..8
    // t=8: package                         → package 8..10
    assert_eq!(result.execution_order, vec!["compile", "lint", "test", "package"]);
    assert_eq!(result.makespan, 10);
    assert_eq!(result.missed_deadlines, vec!["package"]);

    write_json(&output_path, &result).unwrap();
    write_summary(&summary_path, &result).unwrap();

    let doc: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output_path).unwrap()).unwrap();
    assert_eq!(doc["taskDetails"][2]["name"], "test");
    assert_eq!(doc["taskDetails"][2]["waitingTime"], 5);
    assert_eq!(doc["averageWaitingTime"], 4.25);

    let summary = fs::read_to_string(&summary_path).unwrap();
    assert!(summary.contains("3. test"));
    assert!(summary.contains("package: finished at 10, deadline 9"));
}

#[test]
fn yaml_workload_with_cycle_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("workload.yaml");
    fs::write(
        &path,
        r#"
tasks:
  - { name: A, priority: 1, burst_time: 1 }
  - { name: B, priority: 1, burst_time: 1 }
dependencies:
  - { from: A, to: B }
  - { from: B, to: A }
"#,
    )
    .unwrap();

    let workload = read_workload(&path, InputFormat::from_path(&path)).unwrap();
    let input = ScheduleInput::load(workload.tasks, workload.dependencies).unwrap();
    let err = Simulator::default().run(&input).unwrap_err();

    assert!(matches!(err, ScheduleError::DeadlockDetected { .. }));
}

#[test]
fn duplicate_names_in_file_fail_to_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("input.txt");
    fs::write(&path, "2\nA 1 1 0\nA 2 2 0\n0\n").unwrap();

    let workload = read_workload(&path, InputFormat::Text).unwrap();
    let err = ScheduleInput::load(workload.tasks, workload.dependencies).unwrap_err();
    assert_eq!(err, ScheduleError::DuplicateTaskName { name: "A".into() });
}
