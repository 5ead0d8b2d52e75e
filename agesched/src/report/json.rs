/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! JSON `taskoutput` document.
//!
//! ```json
//! {
//!   "averageWaitingTime": 1.5,
//!   "averageTurnaroundTime": 5.5,
//!   "executionOrder": ["B", "A"],
//!   "taskDetails": [
//!     {"name": "B", "priority": 5, "burst_time": 3, "waitingTime": 0, "turnaroundTime": 3},
//!     {"name": "A", "priority": 1, "burst_time": 5, "waitingTime": 3, "turnaroundTime": 8}
//!   ]
//! }
//! ```
//!
//! Averages are rounded to two decimals; `taskDetails` follows execution
//! order.  The mixed key casing is part of the document format consumed by
//! existing front-ends.

use serde::{Serialize, Serializer};

use crate::scheduler::ScheduleResult;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TaskOutput<'a> {
    #[serde(serialize_with = "two_decimals")]
    average_waiting_time: f64,
    #[serde(serialize_with = "two_decimals")]
    average_turnaround_time: f64,
    execution_order: &'a [String],
    task_details: Vec<TaskDetail<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TaskDetail<'a> {
    name: &'a str,
    priority: i32,
    #[serde(rename = "burst_time")]
    burst_time: u64,
    waiting_time: u64,
    turnaround_time: u64,
}

fn two_decimals<S: Serializer>(v: &f64, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64((v * 100.0).round() / 100.0)
}

/// Render `result` as a pretty-printed JSON document.
pub fn to_json_string(result: &ScheduleResult) -> serde_json::Result<String> {
    let doc = TaskOutput {
        average_waiting_time: result.average_waiting_time,
        average_turnaround_time: result.average_turnaround_time,
        execution_order: &result.execution_order,
        task_details: result
            .ordered_metrics()
            .map(|m| TaskDetail {
                name: &m.name,
                priority: m.priority,
                burst_time: m.burst_time,
                waiting_time: m.waiting_time,
                turnaround_time: m.turnaround_time,
            })
            .collect(),
    };
    serde_json::to_string_pretty(&doc)
}
