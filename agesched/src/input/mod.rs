/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Workload readers.
//!
//! Both formats produce a [`Workload`] (the raw task and dependency lists)
//! which the caller then hands to
//! [`ScheduleInput::load`](crate::scheduler::ScheduleInput::load) for
//! validation.  Readers check syntax only.

pub mod text;
pub mod yaml;

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::task::{Dependency, TaskSpec};

/// Unvalidated task and dependency lists as read from a file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Workload {
    pub tasks: Vec<TaskSpec>,
    pub dependencies: Vec<Dependency>,
}

/// Supported on-disk workload formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// Whitespace-delimited counts and records.
    Text,
    /// `tasks:` / `dependencies:` YAML document.
    Yaml,
}

impl InputFormat {
    /// Guess the format from the file extension: `.yaml` / `.yml` are YAML,
    /// everything else is the text format.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                InputFormat::Yaml
            }
            _ => InputFormat::Text,
        }
    }
}

/// Read and parse `path` in the given `format`.
///
/// # Errors
/// Returns an error if the file cannot be read or does not parse.
pub fn read_workload(path: &Path, format: InputFormat) -> Result<Workload> {
    info!(path = %path.display(), format = ?format, "Reading workload");

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot open input file: {}", path.display()))?;

    let workload = match format {
        InputFormat::Text => text::parse(&content)
            .with_context(|| format!("Failed to parse text workload: {}", path.display()))?,
        InputFormat::Yaml => yaml::parse(&content)
            .with_context(|| format!("Failed to parse YAML workload: {}", path.display()))?,
    };

    info!(
        tasks = workload.tasks.len(),
        dependencies = workload.dependencies.len(),
        "Workload read"
    );
    Ok(workload)
}
