//! One-shot registration pipeline (made by Kotype)
//!
//! Normalize, synthesize, inject, catalog: in that order, exactly once per
//! document. Running it twice against the same sinks duplicates the injected
//! blocks and entries; single invocation is the caller's contract.

use tracing::info;

use crate::catalog::{derive_entry, Catalog};
use crate::head::DocumentHead;
use crate::manifest::{normalize, RawFontRecord};
use crate::synthesis::{synthesize, SkippedSource};

/// Summary of one pipeline run.
#[derive(Debug, Clone, Default)]
pub struct RegisterReport {
    pub families: usize,
    pub rules: usize,
    pub imports: usize,
    pub skipped: Vec<SkippedSource>,
}

/// Run the whole pipeline: every family in the manifest ends up in the
/// catalog, every usable source in the head sink. An empty manifest
/// completes with an empty catalog and no injections.
pub fn register_manifest(
    records: &[RawFontRecord],
    catalog: &mut Catalog,
    head: &mut DocumentHead,
) -> RegisterReport {
    let descriptors = normalize(records);
    let synthesis = synthesize(&descriptors);

    if !synthesis.rules.is_empty() {
        head.inject_style(synthesis.stylesheet());
    }
    for url in &synthesis.imports {
        head.inject_link(url.clone());
    }
    for descriptor in &descriptors {
        catalog.add(derive_entry(descriptor));
    }

    info!(
        families = descriptors.len(),
        rules = synthesis.rules.len(),
        imports = synthesis.imports.len(),
        skipped = synthesis.skipped.len(),
        "registered font manifest"
    );

    RegisterReport {
        families: descriptors.len(),
        rules: synthesis.rules.len(),
        imports: synthesis.imports.len(),
        skipped: synthesis.skipped,
    }
}
