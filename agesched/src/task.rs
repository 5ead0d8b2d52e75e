/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Core task data structures for the batch scheduler simulator.
//!
//! Three types model the three stages of one simulation run:
//!
//! ```text
//! input adapter ──► TaskSpec ──(load)──► Task ──(engine)──► TaskMetrics ──► report
//!                   ↑ descriptor          ↑ working copy      ↑ output, read-only
//! ```
//!
//! # Ownership model
//! `TaskSpec`s are **moved** into a [`ScheduleInput`](crate::scheduler::ScheduleInput)
//! by `load` and never change afterwards.  Every run builds its own
//! `Vec<Task>` from the immutable specs, mutates it while simulating, and
//! finally converts each task into a [`TaskMetrics`] row.  The input set is
//! never reordered in place.

use serde::{Deserialize, Serialize};

// ── TaskSpec (input descriptor) ───────────────────────────────────────────────

/// Caller-supplied description of one task.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TaskSpec {
    /// Unique, non-empty task name.
    pub name: String,

    /// Base urgency.  Higher is more urgent; negative values are allowed.
    pub priority: i32,

    /// Simulated execution time once started.  Must be positive.
    pub burst_time: u64,

    /// Informational deadline.  Values `<= 0` mean "no deadline".
    #[serde(default)]
    pub deadline: i64,
}

impl TaskSpec {
    pub fn new(name: impl Into<String>, priority: i32, burst_time: u64, deadline: i64) -> Self {
        Self {
            name: name.into(),
            priority,
            burst_time,
            deadline,
        }
    }

    /// Returns `true` if the task carries a deadline that can be checked.
    pub fn has_deadline(&self) -> bool {
        self.deadline > 0
    }
}

// ── Dependency ────────────────────────────────────────────────────────────────

/// Ordering constraint: `to` may not start until `from` has completed.
///
/// Names that do not resolve to a known task make the edge inert.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dependency {
    pub from: String,
    pub to: String,
}

impl Dependency {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

// ── Task (working copy) ───────────────────────────────────────────────────────

/// Per-run mutable task state owned by the scheduling engine.
///
/// # Lifecycle
/// Created from a [`TaskSpec`] at the start of a run with `completed = false`.
/// [`Task::dispatch`] is called exactly once when the engine selects it,
/// which sets both timing fields and the completion flag together.
#[derive(Debug, Clone)]
pub struct Task {
    pub spec: TaskSpec,

    /// Position in the caller's original task list.
    pub input_index: usize,

    /// Simulated time at which the task started running.
    pub waiting_time: u64,

    /// Simulated time at which the task finished.
    pub turnaround_time: u64,

    pub completed: bool,
}

impl Task {
    pub fn from_spec(spec: &TaskSpec, input_index: usize) -> Self {
        Self {
            spec: spec.clone(),
            input_index,
            waiting_time: 0,
            turnaround_time: 0,
            completed: false,
        }
    }

    /// Commit the task to run at `start`, returning the completion time.
    ///
    /// Completion is recorded immediately: other tasks observe this task as
    /// finished from the next decision point on.  Returns `None` and leaves
    /// the task pending if the completion time does not fit in a `u64`.
    pub fn dispatch(&mut self, start: u64) -> Option<u64> {
        debug_assert!(!self.completed, "task '{}' dispatched twice", self.spec.name);

        let finish = start.checked_add(self.spec.burst_time)?;
        self.waiting_time = start;
        self.turnaround_time = finish;
        self.completed = true;
        Some(finish)
    }

    /// `true` if the task has a deadline and finished after it.
    pub fn missed_deadline(&self) -> bool {
        self.completed
            && self.spec.has_deadline()
            && self.turnaround_time > self.spec.deadline as u64
    }
}

// ── TaskMetrics (output) ──────────────────────────────────────────────────────

/// Final per-task figures of a completed run.
///
/// Produced from a dispatched [`Task`] via [`TaskMetrics::from_task`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskMetrics {
    pub name: String,
    pub input_index: usize,
    pub priority: i32,
    pub burst_time: u64,
    pub deadline: i64,
    pub waiting_time: u64,
    pub turnaround_time: u64,
}

impl TaskMetrics {
    /// # Panics
    /// Panics in debug builds if the task was never dispatched.
    pub fn from_task(task: &Task) -> Self {
        debug_assert!(
            task.completed,
            "TaskMetrics::from_task called on pending task '{}'",
            task.spec.name
        );

        TaskMetrics {
            name: task.spec.name.clone(),
            input_index: task.input_index,
            priority: task.spec.priority,
            burst_time: task.spec.burst_time,
            deadline: task.spec.deadline,
            waiting_time: task.waiting_time,
            turnaround_time: task.turnaround_time,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
