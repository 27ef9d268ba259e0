//! Manifest asset verification (made by Kotype)
//!
//! The synthesizer trusts file references; this command is where they get
//! checked. Every local reference must resolve to a file under the assets
//! root, and the root can be swept for font files nothing references.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use clap::{ArgAction, Args, ValueHint};
use rayon::prelude::*;
use walkdir::WalkDir;

use typecase_core::manifest::{load_manifest_path, normalize, FontDescriptor};
use typecase_core::synthesis::is_remote;

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Path to the font manifest JSON
    #[arg(value_hint = ValueHint::FilePath)]
    pub manifest: PathBuf,

    /// Directory that local file references resolve against
    #[arg(long = "assets-root", value_hint = ValueHint::DirPath)]
    pub assets_root: PathBuf,

    /// Also list font files on disk that no manifest entry references
    #[arg(long = "orphans", action = ArgAction::SetTrue)]
    pub orphans: bool,
}

pub fn run_check(args: CheckArgs) -> Result<()> {
    let records = load_manifest_path(&args.manifest)?;
    let descriptors = normalize(&records);
    let references = local_references(&descriptors);

    let missing: Vec<&String> = references
        .par_iter()
        .filter(|reference| !resolve(&args.assets_root, reference.as_str()).is_file())
        .collect();

    for reference in &missing {
        eprintln!("missing: {reference}");
    }

    if args.orphans {
        for orphan in orphaned_files(&args.assets_root, &references)? {
            println!("orphan: {}", orphan.display());
        }
    }

    if !missing.is_empty() {
        bail!(
            "{} of {} file references missing under {}",
            missing.len(),
            references.len(),
            args.assets_root.display()
        );
    }

    println!("{} file references resolved", references.len());
    Ok(())
}

/// Every distinct local file reference, manifest order preserved. Remote
/// URLs are the browser's problem, not the filesystem's.
fn local_references(descriptors: &[FontDescriptor]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut references = Vec::new();

    let sources = descriptors.iter().flat_map(|descriptor| {
        descriptor
            .styles
            .iter()
            .map(|s| &s.source)
            .chain(descriptor.variable.iter().map(|v| &v.source))
    });

    for source in sources {
        for path in source.paths() {
            if path.trim().is_empty() || is_remote(path) {
                continue;
            }
            if seen.insert(path.to_string()) {
                references.push(path.to_string());
            }
        }
    }

    references
}

/// Web-style references lead with a slash; strip it before joining.
fn resolve(root: &Path, reference: &str) -> PathBuf {
    root.join(reference.trim_start_matches('/'))
}

fn orphaned_files(root: &Path, references: &[String]) -> Result<Vec<PathBuf>> {
    let referenced: HashSet<PathBuf> =
        references.iter().map(|r| resolve(root, r)).collect();

    let mut orphans = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = entry?;
        if entry.file_type().is_file()
            && is_font_file(entry.path())
            && !referenced.contains(entry.path())
        {
            orphans.push(entry.path().to_path_buf());
        }
    }

    Ok(orphans)
}

fn is_font_file(path: &Path) -> bool {
    let ext = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => ext.to_ascii_lowercase(),
        None => return false,
    };

    matches!(
        ext.as_str(),
        "ttf" | "otf" | "woff" | "woff2" | "eot" | "svg"
    )
}
