//! Sync orchestrator.
//!
//! Drives one run end-to-end: fetch -> synthesize -> materialize, with
//! console reporting at each stage. The flow is linear with no retries:
//! a fetch or validation failure aborts before anything is written; a
//! filesystem failure mid-materialization leaves already-written files in
//! place and the next run converges the package again.

use crate::codegen;
use crate::config;
use crate::error::Result;
use crate::project_identity;
use crate::registry::{RegistryClient, RegistrySnapshot};
use crate::ui as output;
use chrono::{SecondsFormat, Utc};
use std::path::PathBuf;

#[derive(Debug, Default)]
pub struct SyncOptions {
    /// Root directory the package probe starts from. Defaults to cwd.
    pub root: Option<PathBuf>,
    /// Fetch and synthesize but write nothing.
    pub dry_run: bool,
}

pub fn run(options: SyncOptions) -> Result<()> {
    let cfg = config::load()?;
    let client = RegistryClient::new(&cfg)?;

    output::info(&format!("Fetching registry from {}", client.endpoint()));
    let snapshot = client.fetch_snapshot()?;

    apply_snapshot(&snapshot, &options)
}

/// Everything after the fetch: empty-check, package probing, synthesis,
/// materialization. Split from `run` so the write policies can be exercised
/// against an in-memory snapshot without a live registry.
pub fn apply_snapshot(snapshot: &RegistrySnapshot, options: &SyncOptions) -> Result<()> {
    if snapshot.is_empty() {
        output::success("Registry is empty - nothing to sync");
        return Ok(());
    }
    report_snapshot(snapshot);

    let root = match &options.root {
        Some(path) => path.clone(),
        None => std::env::current_dir()?,
    };
    let Some(pkg_dir) = codegen::locate_package(&root) else {
        output::warning(&format!(
            "No {} package found under {}",
            project_identity::TARGET_PACKAGE_NAME,
            root.display()
        ));
        output::success("Sync finished (code generation skipped)");
        return Ok(());
    };
    output::verbose(&format!("Target package: {}", pkg_dir.display()));

    // The timestamp is the one intentionally volatile piece of output.
    let generated_at = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
    let generated = codegen::synthesize(snapshot, &generated_at)?;

    if options.dry_run {
        output::info(&format!(
            "Dry-run: would write {} author module(s) and the global exports module to {}",
            generated.authors.len(),
            pkg_dir.display()
        ));
        output::success("Dry-run completed - no files were written");
        return Ok(());
    }

    let summary = codegen::materialize(&pkg_dir, &generated)?;

    output::success(&format!(
        "Synced {} component(s) across {} author(s) into {}",
        generated.component_count,
        generated.author_count,
        pkg_dir.display()
    ));
    if summary.entry_patched {
        output::info(&format!(
            "Added generated re-export to {}",
            summary.entry_path.display()
        ));
    } else {
        output::verbose(&format!(
            "Entry point {} already re-exports generated blocks",
            summary.entry_path.display()
        ));
    }

    Ok(())
}

fn report_snapshot(snapshot: &RegistrySnapshot) {
    output::keyval("Blocks", &snapshot.meta.total_blocks.to_string());
    output::keyval("Components", &snapshot.registry.len().to_string());
    output::keyval("Authors", &snapshot.author_registry.len().to_string());
    if !snapshot.meta.last_updated.is_empty() {
        output::verbose(&format!("Registry updated: {}", snapshot.meta.last_updated));
    }
}
