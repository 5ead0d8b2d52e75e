//! YAML workload reader.
//!
//! The expected structure is:
//! ```yaml
//! tasks:
//!   - name: build
//!     priority: 5
//!     burst_time: 4
//!     deadline: 20        # optional, 0 = none
//!   - name: test
//!     priority: 3
//!     burst_time: 2
//! dependencies:           # optional
//!   - from: build
//!     to: test
//! ```

use serde::Deserialize;

use super::Workload;
use crate::task::{Dependency, TaskSpec};

/// Top-level wrapper that maps directly onto the YAML file layout.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct WorkloadFile {
    #[serde(default)]
    tasks: Vec<TaskSpec>,
    #[serde(default)]
    dependencies: Vec<Dependency>,
}

/// Parse a YAML workload document.
pub fn parse(content: &str) -> Result<Workload, serde_yaml::Error> {
    let file: WorkloadFile = serde_yaml::from_str(content)?;
    Ok(Workload {
        tasks: file.tasks,
        dependencies: file.dependencies,
    })
}
