/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! agesched – dependency-aware batch scheduler simulator
//!
//! Module layout:
//!
//! ```text
//! lib.rs
//! ├── task.rs         – TaskSpec / Dependency / Task / TaskMetrics
//! ├── scheduler/      – load + aging-priority simulation loop
//! │   ├── resolver    – "is this task blocked?" queries
//! │   ├── feasibility – dependency cycle detection
//! │   └── error       – ScheduleError
//! ├── config/         – YAML simulation settings
//! ├── input/          – text and YAML workload readers
//! └── report/         – JSON document and text summary writers
//! ```

pub mod config;
pub mod input;
pub mod report;
pub mod scheduler;
pub mod task;
