//! Stylesheet synthesis over normalized descriptors (made by Kotype)
//!
//! Every style variant and variable source dispatches one of three ways:
//! local files become an `@font-face` rule, remote URLs join a deduplicated
//! import list, and broken references are skipped with a recorded reason.
//! A missing glyph file must never block the rest of the catalog.

use std::fmt;
use std::fmt::Write as _;

use tracing::warn;

use crate::manifest::{FontDescriptor, FontSource, StyleVariant, VariableFontSource};
use crate::styling::{css_quote, FaceStyle, FontFormat};

/// Weight axis span assumed for a variable source that declares none.
pub const DEFAULT_VARIABLE_RANGE: (u16, u16) = (100, 900);

/// `font-weight` value: a single weight for static faces, a `min max` span
/// for variable ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightSpec {
    Static(u16),
    Range(u16, u16),
}

impl fmt::Display for WeightSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeightSpec::Static(weight) => write!(f, "{weight}"),
            WeightSpec::Range(lo, hi) => write!(f, "{lo} {hi}"),
        }
    }
}

/// One `url(...) format(...)` pair in a rule's source list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSource {
    pub url: String,
    pub format: FontFormat,
}

/// One synthesized `@font-face` rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaceRule {
    pub font_family: String,
    pub sources: Vec<RuleSource>,
    pub weight: WeightSpec,
    pub style: FaceStyle,
    pub variation_settings: Option<String>,
}

impl FaceRule {
    pub fn to_css(&self) -> String {
        let mut css = String::new();
        let _ = writeln!(css, "@font-face {{");
        let _ = writeln!(css, "  font-family: {};", css_quote(&self.font_family));

        let sources: Vec<String> = self
            .sources
            .iter()
            .map(|s| format!("url('{}') format('{}')", s.url, s.format.css_name()))
            .collect();
        let _ = writeln!(css, "  src: {};", sources.join(",\n       "));

        let _ = writeln!(css, "  font-weight: {};", self.weight);
        let _ = writeln!(css, "  font-style: {};", self.style);
        if let Some(settings) = &self.variation_settings {
            let _ = writeln!(css, "  font-variation-settings: {settings};");
        }
        let _ = writeln!(css, "  font-display: swap;");
        css.push_str("}\n");
        css
    }
}

/// A source that produced no rule, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedSource {
    pub family: String,
    pub face: String,
    pub reason: String,
}

/// Per-source dispatch result. Skips are data, not errors: the report keeps
/// them observable without failing the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceOutcome {
    Rule(FaceRule),
    Remote(Vec<String>),
    Skipped(SkippedSource),
}

/// Everything the synthesizer produced for one manifest.
#[derive(Debug, Clone, Default)]
pub struct SynthesisReport {
    pub rules: Vec<FaceRule>,
    pub imports: Vec<String>,
    pub skipped: Vec<SkippedSource>,
}

impl SynthesisReport {
    /// Concatenate every rule into one stylesheet block.
    pub fn stylesheet(&self) -> String {
        let mut css = String::new();
        for rule in &self.rules {
            if !css.is_empty() {
                css.push('\n');
            }
            css.push_str(&rule.to_css());
        }
        css
    }
}

/// Synthesize rules and imports for every descriptor, declaration order
/// matching manifest order.
pub fn synthesize(descriptors: &[FontDescriptor]) -> SynthesisReport {
    let mut report = SynthesisReport::default();

    for descriptor in descriptors {
        for style in &descriptor.styles {
            record(&mut report, static_face(descriptor, style));
        }
        for variable in &descriptor.variable {
            record(&mut report, variable_face(descriptor, variable));
        }
    }

    report
}

/// Classify one source and build its outcome without touching the report.
pub fn dispatch_source(
    family: &str,
    face: &str,
    source: &FontSource,
    font_family: String,
    weight: WeightSpec,
    style: FaceStyle,
    variation_settings: Option<String>,
) -> SourceOutcome {
    if let Some(urls) = remote_urls(source) {
        return SourceOutcome::Remote(urls);
    }

    match local_sources(source) {
        Ok(sources) => SourceOutcome::Rule(FaceRule {
            font_family,
            sources,
            weight,
            style,
            variation_settings,
        }),
        Err(reason) => SourceOutcome::Skipped(SkippedSource {
            family: family.to_string(),
            face: face.to_string(),
            reason,
        }),
    }
}

/// Scheme-based remote test: any absolute HTTP(S) URL counts, no host
/// allow-list.
pub fn is_remote(path: &str) -> bool {
    path.starts_with("http://") || path.starts_with("https://")
}

fn static_face(owner: &FontDescriptor, style: &StyleVariant) -> SourceOutcome {
    dispatch_source(
        &owner.name,
        &style.name,
        &style.source,
        style.font_family.clone(),
        WeightSpec::Static(style.weight),
        style.style,
        style.variation_settings.clone(),
    )
}

fn variable_face(owner: &FontDescriptor, variable: &VariableFontSource) -> SourceOutcome {
    let (lo, hi) = variable.weight_range.unwrap_or(DEFAULT_VARIABLE_RANGE);
    dispatch_source(
        &owner.name,
        "variable",
        &variable.source,
        variable.font_family.clone(),
        WeightSpec::Range(lo, hi),
        variable.style,
        variable.variation_settings.clone(),
    )
}

fn record(report: &mut SynthesisReport, outcome: SourceOutcome) {
    match outcome {
        SourceOutcome::Rule(rule) => report.rules.push(rule),
        SourceOutcome::Remote(urls) => {
            for url in urls {
                if !report.imports.contains(&url) {
                    report.imports.push(url);
                }
            }
        }
        SourceOutcome::Skipped(skip) => {
            warn!(
                family = %skip.family,
                face = %skip.face,
                reason = %skip.reason,
                "skipping font source"
            );
            report.skipped.push(skip);
        }
    }
}

/// A single remote file, or any remote file in a chain, makes the whole
/// source remote. Only the remote URLs are worth importing.
fn remote_urls(source: &FontSource) -> Option<Vec<String>> {
    match source {
        FontSource::Single(path) => {
            is_remote(path).then(|| vec![path.clone()])
        }
        FontSource::FallbackChain(files) => {
            if files.iter().any(|f| is_remote(&f.path)) {
                Some(
                    files
                        .iter()
                        .filter(|f| is_remote(&f.path))
                        .map(|f| f.path.clone())
                        .collect(),
                )
            } else {
                None
            }
        }
    }
}

/// Build the ordered `url()/format()` list for a local source. Declared
/// formats win over extension sniffing.
fn local_sources(source: &FontSource) -> Result<Vec<RuleSource>, String> {
    let sources: Vec<RuleSource> = match source {
        FontSource::Single(path) => {
            if path.trim().is_empty() {
                return Err("empty file reference".to_string());
            }
            vec![RuleSource {
                url: path.clone(),
                format: FontFormat::from_path(path),
            }]
        }
        FontSource::FallbackChain(files) => files
            .iter()
            .filter(|f| !f.path.trim().is_empty())
            .map(|f| RuleSource {
                url: f.path.clone(),
                format: f
                    .format
                    .as_deref()
                    .and_then(FontFormat::from_declared)
                    .unwrap_or_else(|| FontFormat::from_path(&f.path)),
            })
            .collect(),
    };

    if sources.is_empty() {
        return Err("no file references".to_string());
    }
    Ok(sources)
}
