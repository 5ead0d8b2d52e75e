//! Simulation settings loading.
//!
//! Settings tune the hardening checks around the scheduling loop; they never
//! change which task is selected.  Every field is optional:
//!
//! ```yaml
//! idle_tick_margin: 2          # idle ticks allowed per pending task
//! check_cycles: true           # reject cyclic dependency graphs up front
//! warn_missed_deadlines: true  # log tasks finishing after their deadline
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, info, warn};

/// Default idle ticks allowed per still-pending task before the engine
/// declares a deadlock.
pub const DEFAULT_IDLE_TICK_MARGIN: u64 = 2;

// ── Private YAML deserialization type ─────────────────────────────────────────

/// Maps directly onto the YAML file layout.  Absent keys stay `None` and fall
/// back to the defaults in [`SimulationConfig::default`].
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SimulationConfigFile {
    idle_tick_margin: Option<u64>,
    check_cycles: Option<bool>,
    warn_missed_deadlines: Option<bool>,
}

// ── Public data structure ─────────────────────────────────────────────────────

/// Knobs for one [`Simulator`](crate::scheduler::Simulator).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationConfig {
    /// Consecutive idle ticks allowed per pending task.  Clamped to at least 1.
    pub idle_tick_margin: u64,

    /// Run the cycle check before simulating.
    pub check_cycles: bool,

    /// Emit a `warn!` for each task that finishes after its deadline.
    pub warn_missed_deadlines: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            idle_tick_margin: DEFAULT_IDLE_TICK_MARGIN,
            check_cycles: true,
            warn_missed_deadlines: true,
        }
    }
}

impl SimulationConfig {
    /// Parses `path` as YAML settings.
    ///
    /// An empty file yields the defaults.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, is not valid YAML, or
    /// contains unknown keys.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        info!("Loading simulation settings from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot open settings file: {}", path.display()))?;

        let cfg = Self::from_yaml_str(&content)
            .with_context(|| format!("Failed to parse YAML file: {}", path.display()))?;

        debug!(
            idle_tick_margin = cfg.idle_tick_margin,
            check_cycles = cfg.check_cycles,
            warn_missed_deadlines = cfg.warn_missed_deadlines,
            "settings loaded"
        );
        Ok(cfg)
    }

    /// Parses settings from an in-memory YAML document.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let file: SimulationConfigFile = if content.trim().is_empty() {
            SimulationConfigFile::default()
        } else {
            serde_yaml::from_str(content)?
        };

        let defaults = Self::default();
        let mut idle_tick_margin = file.idle_tick_margin.unwrap_or(defaults.idle_tick_margin);
        if idle_tick_margin == 0 {
            warn!("idle_tick_margin = 0 is not usable, clamping to 1");
            idle_tick_margin = 1;
        }

        Ok(Self {
            idle_tick_margin,
            check_cycles: file.check_cycles.unwrap_or(defaults.check_cycles),
            warn_missed_deadlines: file
                .warn_missed_deadlines
                .unwrap_or(defaults.warn_missed_deadlines),
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
