//! Aging-priority batch scheduler.
//!
//! [`Simulator`] runs a discrete-time, single-processor simulation over a
//! loaded [`ScheduleInput`].  At each decision point it asks the
//! [`DependencyResolver`] which pending tasks may start, picks the one with
//! the highest *aged* priority, runs it to completion and records its start
//! and finish times.  The result is a [`ScheduleResult`]: the execution order
//! plus per-task and average metrics.
//!
//! # Selection rule
//! ```text
//! aged(task, t) = task.priority + t × AGING_FACTOR      (f64)
//! ```
//! Candidates are scanned in input order and a candidate only replaces the
//! current best if its aged priority is **strictly** greater, so exact ties
//! go to the lower input index.
//!
//! # Design decisions
//!
//! | Topic | Approach |
//! |---|---|
//! | State | `ScheduleInput` is immutable; all per-run state is local to `run()` |
//! | Result order | Separate `execution_order` view; the input set is never reordered |
//! | Eligibility | Prerequisites resolved to indices once, checked per candidate |
//! | Cycles | Tarjan SCC check up front + bounded idle ticks → `DeadlockDetected` |
//! | Errors | `Result<ScheduleResult, ScheduleError>`; no partial schedules |
//! | Thread safety | `ScheduleInput` and `Simulator` are `Send + Sync` |
//!
//! # Example
//! ```rust
//! use agesched::scheduler::{run, ScheduleInput};
//! use agesched::task::TaskSpec;
//!
//! let input = ScheduleInput::load(
//!     vec![TaskSpec::new("A", 1, 5, 0), TaskSpec::new("B", 5, 3, 0)],
//!     vec![],
//! ).unwrap();
//! let result = run(&input).unwrap();
//! assert_eq!(result.execution_order, vec!["B", "A"]);
//! ```

pub mod error;
pub mod feasibility;
pub mod resolver;

pub use error::ScheduleError;
pub use resolver::DependencyResolver;

use std::collections::{BTreeMap, HashSet};

use tracing::{debug, info, warn};

use crate::config::SimulationConfig;
use crate::task::{Dependency, Task, TaskMetrics, TaskSpec};

use feasibility::find_cyclic_tasks;

// ── Constants ─────────────────────────────────────────────────────────────────

/// Priority gained per unit of simulated time by every eligible task.
pub const AGING_FACTOR: f64 = 0.5;

// ── ScheduleInput ─────────────────────────────────────────────────────────────

/// A validated, immutable task set ready to be simulated any number of times.
#[derive(Debug, Clone)]
pub struct ScheduleInput {
    tasks: Vec<TaskSpec>,
    dependencies: Vec<Dependency>,
    resolver: DependencyResolver,
}

impl ScheduleInput {
    /// Validate `tasks` and build the task/dependency set.
    ///
    /// Checks, in input order: non-empty name, positive burst time, unique
    /// name.  Dependencies are not validated: unknown names make an edge
    /// inert.
    ///
    /// # Errors
    /// [`ScheduleError::EmptyTaskName`], [`ScheduleError::ZeroBurstTime`] or
    /// [`ScheduleError::DuplicateTaskName`] for the first offending task.
    pub fn load(tasks: Vec<TaskSpec>, dependencies: Vec<Dependency>) -> Result<Self, ScheduleError> {
        let mut seen: HashSet<&str> = HashSet::with_capacity(tasks.len());

        for (index, task) in tasks.iter().enumerate() {
            if task.name.is_empty() {
                return Err(ScheduleError::EmptyTaskName { index });
            }
            if task.burst_time == 0 {
                return Err(ScheduleError::ZeroBurstTime {
                    task: task.name.clone(),
                });
            }
            if !seen.insert(task.name.as_str()) {
                return Err(ScheduleError::DuplicateTaskName {
                    name: task.name.clone(),
                });
            }
        }

        let resolver = DependencyResolver::new(&tasks, &dependencies);

        debug!(
            task_count = tasks.len(),
            dependency_count = dependencies.len(),
            "task set loaded"
        );

        Ok(Self {
            tasks,
            dependencies,
            resolver,
        })
    }

    pub fn tasks(&self) -> &[TaskSpec] {
        &self.tasks
    }

    pub fn dependencies(&self) -> &[Dependency] {
        &self.dependencies
    }

    pub fn resolver(&self) -> &DependencyResolver {
        &self.resolver
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

// ── ScheduleResult ────────────────────────────────────────────────────────────

/// Outcome of one complete simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleResult {
    /// Task names in the order they ran.
    pub execution_order: Vec<String>,

    /// Final figures for every task, keyed by name.
    pub per_task_metrics: BTreeMap<String, TaskMetrics>,

    /// Mean of all `waiting_time`s.
    pub average_waiting_time: f64,

    /// Mean of all `turnaround_time`s.
    pub average_turnaround_time: f64,

    /// Simulated clock when the last task finished.
    pub makespan: u64,

    /// Total idle ticks spent waiting for dependencies.
    pub idle_time: u64,

    /// Tasks that finished after their (positive) deadline, in execution order.
    pub missed_deadlines: Vec<String>,
}

/// One row of the execution timeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimelineSlot<'a> {
    /// The processor ran `task` over `[start, end)`.
    Run { task: &'a str, start: u64, end: u64 },
    /// The processor waited on dependencies over `[start, end)`.
    Idle { start: u64, end: u64 },
}

impl ScheduleResult {
    /// Metrics rows in execution order.
    pub fn ordered_metrics(&self) -> impl Iterator<Item = &TaskMetrics> + '_ {
        self.execution_order
            .iter()
            .filter_map(move |name| self.per_task_metrics.get(name))
    }

    /// Gantt-style view of the run, including idle gaps between tasks.
    pub fn timeline(&self) -> Vec<TimelineSlot<'_>> {
        let mut slots = Vec::with_capacity(self.execution_order.len());
        let mut clock = 0u64;

        for m in self.ordered_metrics() {
            if m.waiting_time > clock {
                slots.push(TimelineSlot::Idle {
                    start: clock,
                    end: m.waiting_time,
                });
            }
            slots.push(TimelineSlot::Run {
                task: &m.name,
                start: m.waiting_time,
                end: m.turnaround_time,
            });
            clock = m.turnaround_time;
        }
        slots
    }
}

// ── Simulator ─────────────────────────────────────────────────────────────────

/// The scheduling engine.
///
/// Holds only its settings; every run allocates its own working state, so one
/// `Simulator` can serve any number of (concurrent) runs.
#[derive(Debug, Clone, Default)]
pub struct Simulator {
    config: SimulationConfig,
}

/// Run `input` with default settings.
pub fn run(input: &ScheduleInput) -> Result<ScheduleResult, ScheduleError> {
    Simulator::default().run(input)
}

impl Simulator {
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    // ── Public entry point ────────────────────────────────────────────────────

    /// Simulate `input` to completion.
    ///
    /// # Errors
    /// * [`ScheduleError::EmptyTaskSet`] if `input` has no tasks.
    /// * [`ScheduleError::DeadlockDetected`] if some tasks can never become
    ///   eligible.
    /// * [`ScheduleError::TimeOverflow`] if the simulated clock would pass
    ///   `u64::MAX`.
    pub fn run(&self, input: &ScheduleInput) -> Result<ScheduleResult, ScheduleError> {
        // ── Preconditions ─────────────────────────────────────────────────────
        if input.is_empty() {
            return Err(ScheduleError::EmptyTaskSet);
        }

        if self.config.check_cycles {
            if let Some(cyclic) = find_cyclic_tasks(input.resolver()) {
                let tasks: Vec<String> = cyclic
                    .iter()
                    .map(|&i| input.tasks()[i].name.clone())
                    .collect();
                warn!(tasks = ?tasks, "dependency cycle detected, refusing to simulate");
                return Err(ScheduleError::DeadlockDetected { tasks, at_time: 0 });
            }
        }

        info!(
            task_count = input.len(),
            dependency_count = input.dependencies().len(),
            "=== Simulator::run() ==="
        );

        // ── Per-run state ─────────────────────────────────────────────────────
        let mut tasks: Vec<Task> = input
            .tasks()
            .iter()
            .enumerate()
            .map(|(i, spec)| Task::from_spec(spec, i))
            .collect();
        let mut order: Vec<usize> = Vec::with_capacity(tasks.len());

        let mut current_time = 0u64;
        let mut idle_time = 0u64;
        let mut idle_streak = 0u64;

        // ── Simulation loop ───────────────────────────────────────────────────
        while order.len() < tasks.len() {
            let Some(selected) = Self::select_task(&tasks, input.resolver(), current_time) else {
                let remaining = (tasks.len() - order.len()) as u64;
                idle_streak += 1;
                if idle_streak > remaining.saturating_mul(self.config.idle_tick_margin.max(1)) {
                    let pending: Vec<String> = tasks
                        .iter()
                        .filter(|t| !t.completed)
                        .map(|t| t.spec.name.clone())
                        .collect();
                    warn!(
                        time = current_time,
                        idle_ticks = idle_streak,
                        pending = ?pending,
                        "no task became eligible within the idle bound"
                    );
                    return Err(ScheduleError::DeadlockDetected {
                        tasks: pending,
                        at_time: current_time,
                    });
                }
                current_time = current_time
                    .checked_add(1)
                    .ok_or(ScheduleError::TimeOverflow { task: None, at_time: current_time })?;
                idle_time += 1;
                continue;
            };

            idle_streak = 0;
            let task = &mut tasks[selected];
            let start = current_time;
            current_time = task.dispatch(start).ok_or_else(|| ScheduleError::TimeOverflow {
                task: Some(task.spec.name.clone()),
                at_time: start,
            })?;
            order.push(selected);

            debug!(
                task       = %task.spec.name,
                start      = start,
                finish     = current_time,
                priority   = task.spec.priority,
                "✓ dispatched"
            );
        }

        // ── Collect results ───────────────────────────────────────────────────
        let result = self.build_result(&tasks, &order, current_time, idle_time);

        info!(
            makespan = result.makespan,
            avg_waiting = result.average_waiting_time,
            avg_turnaround = result.average_turnaround_time,
            "=== Simulation complete ==="
        );

        Ok(result)
    }

    // ── Helpers ───────────────────────────────────────────────────────────────

    /// Aged priority of `task` at simulated time `now`.
    pub fn aged_priority(task: &TaskSpec, now: u64) -> f64 {
        f64::from(task.priority) + now as f64 * AGING_FACTOR
    }

    /// Pick the eligible task with the highest aged priority.
    ///
    /// Returns `None` if every pending task is blocked.  Only a strictly
    /// greater aged priority replaces the current best.
    fn select_task(
        tasks: &[Task],
        resolver: &DependencyResolver,
        now: u64,
    ) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;

        for (i, task) in tasks.iter().enumerate() {
            if task.completed || resolver.is_blocked(i, |p| tasks[p].completed) {
                continue;
            }
            let aged = Self::aged_priority(&task.spec, now);
            match best {
                Some((_, best_aged)) if aged <= best_aged => {}
                _ => best = Some((i, aged)),
            }
        }

        best.map(|(i, _)| i)
    }

    /// Turn the finished working set into a [`ScheduleResult`].
    fn build_result(&self, tasks: &[Task], order: &[usize], makespan: u64, idle_time: u64) -> ScheduleResult {
        let n = tasks.len() as f64;
        let total_waiting: f64 = tasks.iter().map(|t| t.waiting_time as f64).sum();
        let total_turnaround: f64 = tasks.iter().map(|t| t.turnaround_time as f64).sum();

        let mut missed_deadlines = Vec::new();
        for &i in order {
            let task = &tasks[i];
            if task.missed_deadline() {
                if self.config.warn_missed_deadlines {
                    warn!(
                        task     = %task.spec.name,
                        deadline = task.spec.deadline,
                        finish   = task.turnaround_time,
                        "task finished after its deadline"
                    );
                }
                missed_deadlines.push(task.spec.name.clone());
            }
        }

        ScheduleResult {
            execution_order: order.iter().map(|&i| tasks[i].spec.name.clone()).collect(),
            per_task_metrics: tasks
                .iter()
                .map(|t| (t.spec.name.clone(), TaskMetrics::from_task(t)))
                .collect(),
            average_waiting_time: total_waiting / n,
            average_turnaround_time: total_turnaround / n,
            makespan,
            idle_time,
            missed_deadlines,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
