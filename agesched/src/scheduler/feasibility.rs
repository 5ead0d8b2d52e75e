/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Dependency-graph feasibility analysis.
//!
//! A task set can only be simulated to completion if its resolved dependency
//! graph is acyclic: every task on a cycle waits on another task of the same
//! cycle and is never eligible.  Without this check the engine would idle
//! until its tick bound trips; with it the failure is reported before the
//! first tick and names exactly the tasks involved.
//!
//! # Theory
//! A directed graph is acyclic iff every strongly connected component is a
//! single vertex without a self-loop.  Components are computed with Tarjan's
//! algorithm in `O(V + E)`.
//!
//! Tasks that merely depend on a cycle (downstream of it) are not reported;
//! they are blocked as a consequence, not a cause.

use petgraph::algo::{is_cyclic_directed, tarjan_scc};
use petgraph::graph::{DiGraph, NodeIndex};

use super::resolver::DependencyResolver;

/// Build the task graph: one node per task index, one edge per resolved
/// `from → to` dependency.
fn build_graph(resolver: &DependencyResolver) -> DiGraph<usize, ()> {
    let mut graph = DiGraph::with_capacity(resolver.task_count(), 0);
    for i in 0..resolver.task_count() {
        graph.add_node(i);
    }
    for (from, to) in resolver.edges() {
        graph.update_edge(NodeIndex::new(from), NodeIndex::new(to), ());
    }
    graph
}

/// Return the indices of every task that sits on a dependency cycle, sorted
/// ascending.
///
/// Returns `None` if the graph is acyclic (the task set is schedulable).
pub fn find_cyclic_tasks(resolver: &DependencyResolver) -> Option<Vec<usize>> {
    let graph = build_graph(resolver);

    if !is_cyclic_directed(&graph) {
        return None;
    }

    let mut on_cycle: Vec<usize> = tarjan_scc(&graph)
        .into_iter()
        .filter(|scc| {
            scc.len() > 1 || scc.iter().any(|&n| graph.contains_edge(n, n))
        })
        .flatten()
        .map(|n| graph[n])
        .collect();

    on_cycle.sort_unstable();
    Some(on_cycle)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{Dependency, TaskSpec};

    fn resolver(names: &[&str], edges: &[(&str, &str)]) -> DependencyResolver {
        let tasks: Vec<TaskSpec> = names.iter().map(|n| TaskSpec::new(*n, 1, 1, 0)).collect();
        let deps: Vec<Dependency> = edges.iter().map(|(f, t)| Dependency::new(*f, *t)).collect();
        DependencyResolver::new(&tasks, &deps)
    }

    #[test]
    fn empty_graph_is_feasible() {
        assert_eq!(find_cyclic_tasks(&resolver(&[], &[])), None);
    }

    #[test]
    fn chain_is_feasible() {
        let r = resolver(&["a", "b", "c"], &[("a", "b"), ("b", "c")]);
        assert_eq!(find_cyclic_tasks(&r), None);
    }

    #[test]
    fn diamond_is_feasible() {
        let r = resolver(
            &["a", "b", "c", "d"],
            &[("a", "b"), ("a", "c"), ("b", "d"), ("c", "d")],
        );
        assert_eq!(find_cyclic_tasks(&r), None);
    }

    #[test]
    fn two_task_cycle_reports_both_members() {
        let r = resolver(&["a", "b"], &[("a", "b"), ("b", "a")]);
        assert_eq!(find_cyclic_tasks(&r), Some(vec![0, 1]));
    }

    #[test]
    fn self_loop_is_a_cycle() {
        let r = resolver(&["a", "b"], &[("b", "b")]);
        assert_eq!(find_cyclic_tasks(&r), Some(vec![1]));
    }

    #[test]
    fn downstream_tasks_are_not_reported() {
        // a ⇄ b, b → c, d independent
        let r = resolver(
            &["a", "b", "c", "d"],
            &[("a", "b"), ("b", "a"), ("b", "c")],
        );
        assert_eq!(find_cyclic_tasks(&r), Some(vec![0, 1]));
    }

    #[test]
    fn cycle_through_dangling_name_is_not_a_cycle() {
        // The edge via "ghost" is dropped by the resolver.
        let r = resolver(&["a"], &[("a", "ghost"), ("ghost", "a")]);
        assert_eq!(find_cyclic_tasks(&r), None);
    }

    #[test]
    fn disjoint_cycles_are_all_reported() {
        let r = resolver(
            &["a", "b", "c", "d", "e"],
            &[("a", "b"), ("b", "a"), ("c", "d"), ("d", "e"), ("e", "c")],
        );
        assert_eq!(find_cyclic_tasks(&r), Some(vec![0, 1, 2, 3, 4]));
    }
}
