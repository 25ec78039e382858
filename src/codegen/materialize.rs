//! File materializer.
//!
//! Applies synthesized content to the target package with three write
//! disciplines:
//! - author modules: purge-and-recreate, the directory *is* the snapshot;
//! - global module: unconditional overwrite;
//! - package entry point: additive patch, append the re-export line at most
//!   once and never touch hand-written content.
//!
//! Writes happen in a fixed order (purge, author files, global file, entry
//! patch) and are not rolled back on failure; re-running the sync converges
//! the package to the latest snapshot.

use crate::codegen::synth::SynthesizedOutput;
use crate::error::{BlockforgeError, Result};
use crate::project_identity;
use regex::Regex;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Relative directories probed for the target package, in order.
const CANDIDATE_DIRS: &[&str] = &[
    ".",
    "package",
    "packages/blocks",
    "node_modules/@blockforge/blocks",
];

/// Module path the entry point re-exports, relative to the entry file.
const GENERATED_MODULE_PATH: &str = "./generated/index.js";

const GENERATED_DIR: &str = "src/generated";
const AUTHORS_DIR: &str = "src/generated/authors";
const DEFAULT_ENTRY: &str = "src/index.js";

#[derive(Debug, Deserialize)]
struct PackageDescriptor {
    name: Option<String>,
    module: Option<String>,
    main: Option<String>,
}

#[derive(Debug, Default)]
pub struct MaterializeSummary {
    pub author_files: usize,
    pub entry_patched: bool,
    pub entry_path: PathBuf,
}

/// Probe the fixed candidate directories under `root` for a package.json
/// whose name matches the published blocks package. `None` means codegen is
/// skipped for this run; that is not an error.
pub fn locate_package(root: &Path) -> Option<PathBuf> {
    for candidate in CANDIDATE_DIRS {
        let dir = root.join(candidate);
        if let Some(descriptor) = read_descriptor(&dir)
            && descriptor.name.as_deref() == Some(project_identity::TARGET_PACKAGE_NAME)
        {
            return Some(dir);
        }
    }
    None
}

fn read_descriptor(dir: &Path) -> Option<PackageDescriptor> {
    let data = fs::read_to_string(dir.join("package.json")).ok()?;
    serde_json::from_str(&data).ok()
}

/// Write the synthesized output into `pkg_dir`.
pub fn materialize(pkg_dir: &Path, output: &SynthesizedOutput) -> Result<MaterializeSummary> {
    let mut summary = MaterializeSummary::default();

    replace_author_modules(pkg_dir, output, &mut summary)?;
    write_global_module(pkg_dir, output)?;

    let entry_path = resolve_entry_path(pkg_dir);
    summary.entry_patched = patch_entry_point(&entry_path)?;
    summary.entry_path = entry_path;

    Ok(summary)
}

/// Full-replace discipline: an author absent from the latest snapshot loses
/// their generated module because the whole directory is rebuilt.
fn replace_author_modules(
    pkg_dir: &Path,
    output: &SynthesizedOutput,
    summary: &mut MaterializeSummary,
) -> Result<()> {
    let authors_dir = pkg_dir.join(AUTHORS_DIR);
    match fs::remove_dir_all(&authors_dir) {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => {
            return Err(BlockforgeError::IoError {
                path: authors_dir,
                source: e,
            });
        }
    }

    for file in &output.authors {
        let dir = authors_dir.join(&file.author);
        fs::create_dir_all(&dir).map_err(|e| BlockforgeError::IoError {
            path: dir.clone(),
            source: e,
        })?;
        let path = dir.join("index.js");
        fs::write(&path, &file.content).map_err(|e| BlockforgeError::IoError {
            path: path.clone(),
            source: e,
        })?;
        summary.author_files += 1;
    }

    Ok(())
}

/// Overwrite discipline: the global module is entirely generated, no merge.
fn write_global_module(pkg_dir: &Path, output: &SynthesizedOutput) -> Result<()> {
    let generated_dir = pkg_dir.join(GENERATED_DIR);
    fs::create_dir_all(&generated_dir).map_err(|e| BlockforgeError::IoError {
        path: generated_dir.clone(),
        source: e,
    })?;
    let path = generated_dir.join("index.js");
    fs::write(&path, &output.global).map_err(|e| BlockforgeError::IoError {
        path,
        source: e,
    })
}

fn resolve_entry_path(pkg_dir: &Path) -> PathBuf {
    let entry = read_descriptor(pkg_dir)
        .and_then(|d| d.module.or(d.main))
        .unwrap_or_else(|| DEFAULT_ENTRY.to_string());
    pkg_dir.join(entry)
}

/// Additive-patch discipline: append the re-export line only when no
/// re-export of the generated module path exists yet. Detection is
/// structural (any quote style, any spacing) rather than an exact string
/// match, so a hand-reformatted line does not get double-appended.
fn patch_entry_point(entry_path: &Path) -> Result<bool> {
    let existing = match fs::read_to_string(entry_path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(e) => {
            return Err(BlockforgeError::IoError {
                path: entry_path.to_path_buf(),
                source: e,
            });
        }
    };

    if has_reexport(&existing, GENERATED_MODULE_PATH) {
        return Ok(false);
    }

    if let Some(parent) = entry_path.parent() {
        fs::create_dir_all(parent).map_err(|e| BlockforgeError::IoError {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let mut patched = existing;
    if !patched.is_empty() && !patched.ends_with('\n') {
        patched.push('\n');
    }
    patched.push_str(&format!("export * from '{}';\n", GENERATED_MODULE_PATH));

    fs::write(entry_path, patched).map_err(|e| BlockforgeError::IoError {
        path: entry_path.to_path_buf(),
        source: e,
    })?;
    Ok(true)
}

fn has_reexport(source: &str, module_path: &str) -> bool {
    let pattern = format!(
        r#"export\s+\*\s+from\s+['"]{}['"]"#,
        regex::escape(module_path)
    );
    Regex::new(&pattern)
        .map(|re| re.is_match(source))
        .unwrap_or(false)
}
