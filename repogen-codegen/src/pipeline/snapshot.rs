//! Pipeline snapshot plugin for visualization and debugging.
//!
//! This module provides a plugin that captures the pipeline state after each phase,
//! enabling inspection of what extraction and analysis produced.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::{RwLock, RwLockReadGuard},
};

use eyre::{Result, eyre};
use repogen_ir::{ContractPlan, RepositoryDescriptor};
use serde::Serialize;

use super::{CompilationContext, Diagnostic, Plugin};

/// A snapshot of the pipeline state at a specific phase.
#[derive(Debug, Clone, Serialize)]
pub struct PhaseSnapshot {
    /// The phase that just completed.
    pub phase: String,

    /// Described contracts (available after "extract").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repositories: Option<Vec<RepositoryDescriptor>>,

    /// Contract plans (available after "analyze").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plans: Option<Vec<ContractPlan>>,

    /// Diagnostics collected so far.
    pub diagnostics: Vec<Diagnostic>,
}

/// A plugin that captures pipeline state after each phase.
///
/// Used by `repogen generate --visualize <dir>`.
///
/// # Example
///
/// ```ignore
/// let snapshots = Arc::new(SnapshotPlugin::new());
/// let pipeline = Pipeline::new().plugin(snapshots.clone());
/// let ctx = pipeline.run(manifest, registry)?;
///
/// snapshots.write_to_dir(".repogen/debug")?;
/// ```
pub struct SnapshotPlugin {
    /// Collected snapshots.
    snapshots: RwLock<Vec<PhaseSnapshot>>,
    /// Output directory for snapshots.
    output_dir: Option<PathBuf>,
}

impl SnapshotPlugin {
    /// Create a new snapshot plugin.
    pub fn new() -> Self {
        Self {
            snapshots: RwLock::new(Vec::new()),
            output_dir: None,
        }
    }

    /// Create a new snapshot plugin that writes each snapshot as it is taken.
    pub fn with_output_dir(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            snapshots: RwLock::new(Vec::new()),
            output_dir: Some(output_dir.into()),
        }
    }

    /// Get all collected snapshots.
    pub fn snapshots(&self) -> Result<Vec<PhaseSnapshot>> {
        Ok(self.read()?.clone())
    }

    /// Write all snapshots to `dir`, one `<phase>.json` per phase.
    pub fn write_to_dir(&self, dir: impl AsRef<Path>) -> Result<()> {
        let dir = dir.as_ref();
        for snapshot in self.read()?.iter() {
            write_snapshot(dir, snapshot)?;
        }
        Ok(())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<PhaseSnapshot>>> {
        self.snapshots
            .read()
            .map_err(|_| eyre!("snapshot store poisoned"))
    }

    fn capture_snapshot(&self, phase: &str, ctx: &CompilationContext) -> Result<PhaseSnapshot> {
        let snapshot = PhaseSnapshot {
            phase: phase.to_string(),
            repositories: ctx.repositories.clone(),
            plans: ctx.plans.clone(),
            diagnostics: ctx.diagnostics.clone(),
        };
        self.snapshots
            .write()
            .map_err(|_| eyre!("snapshot store poisoned"))?
            .push(snapshot.clone());
        Ok(snapshot)
    }
}

fn write_snapshot(dir: &Path, snapshot: &PhaseSnapshot) -> Result<()> {
    fs::create_dir_all(dir)?;
    let path = dir.join(format!("{}.json", snapshot.phase));
    let json = serde_json::to_string_pretty(snapshot)?;
    fs::write(&path, json)?;
    Ok(())
}

impl Default for SnapshotPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for SnapshotPlugin {
    fn name(&self) -> &'static str {
        "snapshot"
    }

    fn on_after_phase(&self, phase: &str, ctx: &mut CompilationContext) -> Result<()> {
        let snapshot = self.capture_snapshot(phase, ctx)?;

        if let Some(ref dir) = self.output_dir {
            write_snapshot(dir, &snapshot)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use repogen_ir::TypeRegistry;
    use repogen_manifest::Manifest;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_snapshot_plugin_creation() {
        let plugin = SnapshotPlugin::new();
        assert!(plugin.snapshots().unwrap().is_empty());
    }

    #[test]
    fn test_snapshot_written_per_phase() {
        let temp = TempDir::new().unwrap();
        let plugin = SnapshotPlugin::with_output_dir(temp.path());
        let mut ctx = CompilationContext::new(Manifest::new("t"), TypeRegistry::new());

        ctx.repositories = Some(Vec::new());
        plugin.on_after_phase("extract", &mut ctx).unwrap();

        let json = fs::read_to_string(temp.path().join("extract.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["phase"], "extract");
        assert!(value["repositories"].as_array().unwrap().is_empty());
        assert!(value.get("plans").is_none());
        assert_eq!(plugin.snapshots().unwrap().len(), 1);
    }
}
