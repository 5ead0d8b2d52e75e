/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Structured error type for loading and running a simulation.
//!
//! Load-time variants reject a malformed task set before any state is built;
//! run-time variants abort a simulation without producing a partial schedule.
//!
//! | Variant | Raised by |
//! |---|---|
//! | `EmptyTaskName` / `DuplicateTaskName` / `ZeroBurstTime` | `ScheduleInput::load` |
//! | `EmptyTaskSet` / `DeadlockDetected` / `TimeOverflow` | `Simulator::run` |
//!
//! Dangling dependency names are deliberately absent: they make the edge
//! inert and are only logged.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    /// Two tasks in one load call share a name.
    #[error("duplicate task name '{name}'; task names must be unique")]
    DuplicateTaskName { name: String },

    /// The task at `index` (0-based position in the input) has an empty name.
    #[error("task #{index} has an empty name")]
    EmptyTaskName { index: usize },

    /// A task declared a burst time of zero.
    #[error("task '{task}' has a burst time of 0; durations must be positive")]
    ZeroBurstTime { task: String },

    /// `run()` was called on an input with no tasks; averages are undefined.
    #[error("no tasks provided: task set is empty")]
    EmptyTaskSet,

    /// The listed tasks can never become eligible.
    ///
    /// Raised either by the up-front cycle check (`tasks` are the members of
    /// every dependency cycle) or by the idle-tick bound inside the loop
    /// (`tasks` are all tasks still pending at `at_time`).
    #[error("deadlock detected at t={at_time}: tasks {tasks:?} can never run")]
    DeadlockDetected { tasks: Vec<String>, at_time: u64 },

    /// The simulated clock would pass `u64::MAX`.
    ///
    /// `task` is the task whose completion time overflowed, or `None` if an
    /// idle tick did.
    #[error(
        "simulated clock overflows at t={at_time}{}",
        .task.as_ref().map(|t| format!(" while dispatching '{t}'")).unwrap_or_default()
    )]
    TimeOverflow { task: Option<String>, at_time: u64 },
}
