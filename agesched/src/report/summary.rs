/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Human-readable scheduling summary.

use std::fmt::Write;

use crate::scheduler::{ScheduleResult, TimelineSlot};

/// Render the full summary report.
pub fn render(result: &ScheduleResult) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_report(&mut out, result);
    out
}

fn write_report(out: &mut String, result: &ScheduleResult) -> std::fmt::Result {
    writeln!(out, "Scheduling Summary")?;
    writeln!(out, "====================")?;
    writeln!(out)?;
    writeln!(
        out,
        "Average Waiting Time: {:.2} minutes",
        result.average_waiting_time
    )?;
    writeln!(
        out,
        "Average Turnaround Time: {:.2} minutes",
        result.average_turnaround_time
    )?;
    writeln!(out)?;

    writeln!(out, "Execution Order:")?;
    for (i, name) in result.execution_order.iter().enumerate() {
        writeln!(out, "{}. {}", i + 1, name)?;
    }

    writeln!(out)?;
    writeln!(out, "Task Details:")?;
    for m in result.ordered_metrics() {
        writeln!(out, "{}:", m.name)?;
        writeln!(out, "  Priority: {}", m.priority)?;
        writeln!(out, "  Duration: {} minutes", m.burst_time)?;
        writeln!(out, "  Waiting Time: {} minutes", m.waiting_time)?;
        writeln!(out, "  Turnaround Time: {} minutes", m.turnaround_time)?;
        writeln!(out)?;
    }

    writeln!(out, "Timeline:")?;
    for slot in result.timeline() {
        match slot {
            TimelineSlot::Run { task, start, end } => {
                writeln!(out, "  [{start:>4}, {end:>4})  {task}")?
            }
            TimelineSlot::Idle { start, end } => {
                writeln!(out, "  [{start:>4}, {end:>4})  (idle)")?
            }
        }
    }

    if !result.missed_deadlines.is_empty() {
        writeln!(out)?;
        writeln!(out, "Missed Deadlines:")?;
        for name in &result.missed_deadlines {
            let m = &result.per_task_metrics[name];
            writeln!(
                out,
                "  {}: finished at {}, deadline {}",
                name, m.turnaround_time, m.deadline
            )?;
        }
    }

    Ok(())
}
