/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Dependency resolution: is a task allowed to start yet?
//!
//! Edges are resolved from names to task indices once, when the resolver is
//! built.  Each query then only walks the task's own prerequisite list instead
//! of re-scanning every edge, but answers exactly what a full scan would:
//! a task is blocked iff one of its *known* prerequisites is not completed.

use std::collections::HashMap;

use tracing::warn;

use crate::task::{Dependency, TaskSpec};

/// Read-only prerequisite table for one task set.
///
/// Holds no completion state of its own; callers pass a lookup into their
/// completion flags with every query.
#[derive(Debug, Clone, Default)]
pub struct DependencyResolver {
    /// `prerequisites[i]` = indices of tasks that must finish before task `i`.
    prerequisites: Vec<Vec<usize>>,
}

impl DependencyResolver {
    /// Resolve `deps` against `tasks`.
    ///
    /// Edges naming an unknown task on either side are dropped with a
    /// warning.  Duplicate edges are kept; they do not change any answer.
    pub fn new(tasks: &[TaskSpec], deps: &[Dependency]) -> Self {
        let index: HashMap<&str, usize> = tasks
            .iter()
            .enumerate()
            .map(|(i, t)| (t.name.as_str(), i))
            .collect();

        let mut prerequisites = vec![Vec::new(); tasks.len()];

        for dep in deps {
            match (index.get(dep.from.as_str()), index.get(dep.to.as_str())) {
                (Some(&from), Some(&to)) => prerequisites[to].push(from),
                _ => {
                    warn!(
                        from = %dep.from,
                        to   = %dep.to,
                        "dependency references an unknown task, ignored"
                    );
                }
            }
        }

        Self { prerequisites }
    }

    /// Returns `true` if `task` has at least one known prerequisite that is
    /// not yet completed.
    ///
    /// `is_completed(i)` reports the completion flag of task `i`.  An
    /// out-of-range `task` has no prerequisites and is never blocked.
    pub fn is_blocked(&self, task: usize, is_completed: impl Fn(usize) -> bool) -> bool {
        self.prerequisites
            .get(task)
            .map(|pre| pre.iter().any(|&p| !is_completed(p)))
            .unwrap_or(false)
    }

    /// Prerequisite indices of `task`, in edge order.
    pub fn prerequisites_of(&self, task: usize) -> &[usize] {
        self.prerequisites
            .get(task)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// All resolved edges as `(from, to)` index pairs.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.prerequisites
            .iter()
            .enumerate()
            .flat_map(|(to, pre)| pre.iter().map(move |&from| (from, to)))
    }

    /// Number of tasks this resolver was built for.
    pub fn task_count(&self) -> usize {
        self.prerequisites.len()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
