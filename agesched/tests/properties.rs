use std::collections::{HashMap, HashSet};

use proptest::prelude::*;

use agesched::scheduler::{run, ScheduleError, ScheduleInput, ScheduleResult};
use agesched::task::{Dependency, TaskSpec};

// Strategy for an acyclic workload.
//
// Every task gets a random rank; an edge a → b is only kept when
// rank[a] < rank[b], which rules out cycles while letting edges point both
// forwards and backwards in input order.  A few dangling edges are mixed in.
fn dag_workload(max_tasks: usize) -> impl Strategy<Value = (Vec<TaskSpec>, Vec<Dependency>)> {
    (1..=max_tasks).prop_flat_map(|n| {
        let tasks = proptest::collection::vec((-5i32..10, 1u64..6, 0i64..30), n);
        let ranks = Just((0..n).collect::<Vec<usize>>()).prop_shuffle();
        let edges = proptest::collection::vec((0..n, 0..n), 0..n * 2);
        let dangling = proptest::collection::vec((0..n, any::<bool>()), 0..3);

        (tasks, ranks, edges, dangling).prop_map(move |(raw, rank, edges, dangling)| {
            let tasks: Vec<TaskSpec> = raw
                .into_iter()
                .enumerate()
                .map(|(i, (p, b, d))| TaskSpec::new(format!("t{i}"), p, b, d))
                .collect();

            let mut deps: Vec<Dependency> = edges
                .into_iter()
                .filter(|&(a, b)| rank[a] < rank[b])
                .map(|(a, b)| Dependency::new(format!("t{a}"), format!("t{b}")))
                .collect();

            for (i, outgoing) in dangling {
                if outgoing {
                    deps.push(Dependency::new(format!("t{i}"), "ghost"));
                } else {
                    deps.push(Dependency::new("ghost", format!("t{i}")));
                }
            }
            (tasks, deps)
        })
    })
}

/// Straightforward model of the selection loop: re-scans every dependency by
/// name at every decision point.
fn reference_order(tasks: &[TaskSpec], deps: &[Dependency]) -> Vec<String> {
    let index: HashMap<&str, usize> = tasks
        .iter()
        .enumerate()
        .map(|(i, t)| (t.name.as_str(), i))
        .collect();
    let mut done = vec![false; tasks.len()];
    let mut order = Vec::new();
    let mut now = 0u64;

    while order.len() < tasks.len() {
        let mut best: Option<(usize, f64)> = None;
        for (i, t) in tasks.iter().enumerate() {
            if done[i] {
                continue;
            }
            let blocked = deps.iter().any(|d| {
                d.to == t.name && index.get(d.from.as_str()).is_some_and(|&f| !done[f])
            });
            if blocked {
                continue;
            }
            let aged = t.priority as f64 + now as f64 * 0.5;
            if best.map_or(true, |(_, b)| aged > b) {
                best = Some((i, aged));
            }
        }
        match best {
            Some((i, _)) => {
                done[i] = true;
                now += tasks[i].burst_time;
                order.push(tasks[i].name.clone());
            }
            None => now += 1,
        }
    }
    order
}

fn simulate(tasks: &[TaskSpec], deps: &[Dependency]) -> ScheduleResult {
    let input = ScheduleInput::load(tasks.to_vec(), deps.to_vec()).unwrap();
    run(&input).unwrap()
}

proptest! {
    #[test]
    fn execution_order_is_a_permutation((tasks, deps) in dag_workload(12)) {
        let result = simulate(&tasks, &deps);

        let mut got = result.execution_order.clone();
        let mut want: Vec<String> = tasks.iter().map(|t| t.name.clone()).collect();
        got.sort();
        want.sort();
        prop_assert_eq!(got, want);
        prop_assert_eq!(result.per_task_metrics.len(), tasks.len());
    }

    #[test]
    fn prerequisites_run_first((tasks, deps) in dag_workload(12)) {
        let result = simulate(&tasks, &deps);
        let pos: HashMap<&str, usize> = result
            .execution_order
            .iter()
            .enumerate()
            .map(|(i, n)| (n.as_str(), i))
            .collect();

        for d in &deps {
            if let (Some(f), Some(t)) = (pos.get(d.from.as_str()), pos.get(d.to.as_str())) {
                prop_assert!(f < t, "{} must run before {}", d.from, d.to);
            }
        }
    }

    #[test]
    fn turnaround_is_start_plus_burst((tasks, deps) in dag_workload(12)) {
        let result = simulate(&tasks, &deps);
        for t in &tasks {
            let m = &result.per_task_metrics[&t.name];
            prop_assert_eq!(m.turnaround_time, m.waiting_time + t.burst_time);
        }
    }

    #[test]
    fn runs_never_overlap((tasks, deps) in dag_workload(12)) {
        let result = simulate(&tasks, &deps);
        let mut clock = 0;
        for m in result.ordered_metrics() {
            prop_assert!(m.waiting_time >= clock);
            clock = m.turnaround_time;
        }
        prop_assert_eq!(clock, result.makespan);
    }

    #[test]
    fn averages_are_means((tasks, deps) in dag_workload(12)) {
        let result = simulate(&tasks, &deps);
        let n = tasks.len() as f64;
        let w: f64 = result.per_task_metrics.values().map(|m| m.waiting_time as f64).sum::<f64>() / n;
        let t: f64 = result.per_task_metrics.values().map(|m| m.turnaround_time as f64).sum::<f64>() / n;
        prop_assert!((result.average_waiting_time - w).abs() < 1e-9);
        prop_assert!((result.average_turnaround_time - t).abs() < 1e-9);
    }

    #[test]
    fn repeated_runs_are_identical((tasks, deps) in dag_workload(12)) {
        prop_assert_eq!(simulate(&tasks, &deps), simulate(&tasks, &deps));
    }

    #[test]
    fn matches_full_rescan_model((tasks, deps) in dag_workload(12)) {
        let result = simulate(&tasks, &deps);
        prop_assert_eq!(result.execution_order, reference_order(&tasks, &deps));
    }

    #[test]
    fn acyclic_workloads_never_idle((tasks, deps) in dag_workload(12)) {
        let result = simulate(&tasks, &deps);
        let total: u64 = tasks.iter().map(|t| t.burst_time).sum();
        prop_assert_eq!(result.idle_time, 0);
        prop_assert_eq!(result.makespan, total);
    }

    #[test]
    fn closing_a_chain_into_a_ring_deadlocks(n in 2usize..8) {
        let tasks: Vec<TaskSpec> = (0..n).map(|i| TaskSpec::new(format!("t{i}"), 1, 1, 0)).collect();
        let deps: Vec<Dependency> = (0..n)
            .map(|i| Dependency::new(format!("t{i}"), format!("t{}", (i + 1) % n)))
            .collect();

        let input = ScheduleInput::load(tasks, deps).unwrap();
        match run(&input) {
            Err(ScheduleError::DeadlockDetected { tasks, at_time }) => {
                prop_assert_eq!(at_time, 0);
                let names: HashSet<String> = tasks.into_iter().collect();
                prop_assert_eq!(names.len(), n);
            }
            other => prop_assert!(false, "expected deadlock, got {:?}", other),
        }
    }
}
