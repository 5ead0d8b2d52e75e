/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Result writers.
//!
//! * [`json`]: machine-readable `taskoutput` document.
//! * [`summary`]: human-readable report with averages, order, per-task
//!   details and the execution timeline.

pub mod json;
pub mod summary;

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::scheduler::ScheduleResult;

/// Write the JSON document to `path`.
pub fn write_json(path: &Path, result: &ScheduleResult) -> Result<()> {
    let doc = json::to_json_string(result).context("Failed to serialise schedule as JSON")?;
    std::fs::write(path, doc)
        .with_context(|| format!("Cannot write output file: {}", path.display()))?;
    info!("{} written successfully", path.display());
    Ok(())
}

/// Write the text summary to `path`.
pub fn write_summary(path: &Path, result: &ScheduleResult) -> Result<()> {
    std::fs::write(path, summary::render(result))
        .with_context(|| format!("Cannot write summary file: {}", path.display()))?;
    info!("{} written successfully", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::{run, ScheduleInput};
    use crate::task::TaskSpec;
    use tempfile::tempdir;

    fn sample() -> ScheduleResult {
        let input = ScheduleInput::load(
            vec![TaskSpec::new("A", 1, 5, 0), TaskSpec::new("B", 5, 3, 0)],
            vec![],
        )
        .unwrap();
        run(&input).unwrap()
    }

    #[test]
    fn writes_both_files() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("taskoutput.txt");
        let sum = dir.path().join("task_summary.txt");

        write_json(&out, &sample()).unwrap();
        write_summary(&sum, &sample()).unwrap();

        let doc: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(doc["executionOrder"][0], "B");
        assert!(std::fs::read_to_string(&sum).unwrap().contains("Execution Order:"));
    }

    #[test]
    fn unwritable_path_returns_error() {
        let result = write_json(Path::new("/nonexistent/dir/out.json"), &sample());
        assert!(result.is_err());
    }
}
