//! Manifest records and normalization (made by Kotype)
//!
//! The manifest format has drifted across releases: styles carry either one
//! `file` or parallel `files`/`formats` lists, family names live on the font
//! or on individual styles, and the `variable` block is often absent.
//! Normalization reshapes all of that into one canonical form, once, so the
//! synthesizer never branches on input shape again.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::styling::FaceStyle;

/// Weight assumed when a style omits one.
pub const DEFAULT_WEIGHT: u16 = 400;

/// One font family as it appears in the manifest JSON. Every field is
/// defaultable: normalization is validate-free and absent collections are
/// not errors.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawFontRecord {
    pub id: u32,
    pub name: String,
    pub font_family: Option<String>,
    pub category: String,
    pub designer: Option<String>,
    pub image_url: Option<String>,
    pub is_premium: bool,
    pub styles: Vec<RawFaceRecord>,
    pub variable: Vec<RawFaceRecord>,
}

/// One style or variable entry in its raw manifest shape. Static styles and
/// variable sources share the same record; fields the other kind never uses
/// simply stay `None`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawFaceRecord {
    pub file: Option<String>,
    pub files: Vec<String>,
    pub formats: Vec<String>,
    pub name: Option<String>,
    pub weight: Option<u16>,
    pub weight_range: Option<[u16; 2]>,
    pub style: Option<String>,
    pub font_family: Option<String>,
    pub variation_settings: Option<String>,
}

/// One file reference in a fallback chain, with its declared format when the
/// manifest named one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FallbackFile {
    pub path: String,
    pub format: Option<String>,
}

/// Canonical source shape: a single file, or an ordered fallback chain with
/// the most preferred format first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum FontSource {
    Single(String),
    FallbackChain(Vec<FallbackFile>),
}

impl FontSource {
    /// All file references in fallback order.
    pub fn paths(&self) -> Vec<&str> {
        match self {
            FontSource::Single(path) => vec![path.as_str()],
            FontSource::FallbackChain(files) => {
                files.iter().map(|f| f.path.as_str()).collect()
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            FontSource::Single(path) => path.trim().is_empty(),
            FontSource::FallbackChain(files) => files.is_empty(),
        }
    }
}

/// One static face within a family, fully resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyleVariant {
    pub source: FontSource,
    pub name: String,
    pub weight: u16,
    pub style: FaceStyle,
    pub font_family: String,
    pub variation_settings: Option<String>,
}

/// One variable-font resource within a family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariableFontSource {
    pub source: FontSource,
    pub font_family: String,
    pub style: FaceStyle,
    pub weight_range: Option<(u16, u16)>,
    pub variation_settings: Option<String>,
}

/// One typeface family in canonical form. Built once at startup, never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FontDescriptor {
    pub id: u32,
    pub name: String,
    pub category: String,
    pub designer: Option<String>,
    pub image_url: Option<String>,
    pub is_premium: bool,
    pub font_family: String,
    pub styles: Vec<StyleVariant>,
    pub variable: Vec<VariableFontSource>,
}

impl FontDescriptor {
    pub fn is_variable(&self) -> bool {
        !self.variable.is_empty()
    }
}

/// Normalize every record, input order preserved.
pub fn normalize(records: &[RawFontRecord]) -> Vec<FontDescriptor> {
    records.iter().map(normalize_record).collect()
}

/// Reshape one raw record. Pure: no I/O, no failure path.
pub fn normalize_record(raw: &RawFontRecord) -> FontDescriptor {
    // Family default resolves first so per-style overrides can fall back to it.
    let family_default = raw
        .font_family
        .clone()
        .unwrap_or_else(|| raw.name.clone());

    let styles = raw
        .styles
        .iter()
        .map(|face| StyleVariant {
            source: normalize_source(face),
            name: face.name.clone().unwrap_or_default(),
            weight: face.weight.unwrap_or(DEFAULT_WEIGHT),
            style: parse_style(face.style.as_deref()),
            font_family: face
                .font_family
                .clone()
                .unwrap_or_else(|| family_default.clone()),
            variation_settings: face.variation_settings.clone(),
        })
        .collect();

    let variable = raw
        .variable
        .iter()
        .map(|face| VariableFontSource {
            source: normalize_source(face),
            font_family: face
                .font_family
                .clone()
                .unwrap_or_else(|| family_default.clone()),
            style: parse_style(face.style.as_deref()),
            weight_range: face.weight_range.map(|[lo, hi]| (lo, hi)),
            variation_settings: face.variation_settings.clone(),
        })
        .collect();

    FontDescriptor {
        id: raw.id,
        name: raw.name.clone(),
        category: raw.category.clone(),
        designer: raw.designer.clone(),
        image_url: raw.image_url.clone(),
        is_premium: raw.is_premium,
        font_family: family_default,
        styles,
        variable,
    }
}

/// Resolve the file/files union into the tagged source shape. A record with
/// neither becomes an empty chain the synthesizer will skip.
fn normalize_source(face: &RawFaceRecord) -> FontSource {
    if let Some(file) = &face.file {
        return FontSource::Single(file.clone());
    }

    let chain = face
        .files
        .iter()
        .enumerate()
        .map(|(idx, path)| FallbackFile {
            path: path.clone(),
            format: face.formats.get(idx).cloned(),
        })
        .collect();

    FontSource::FallbackChain(chain)
}

fn parse_style(raw: Option<&str>) -> FaceStyle {
    raw.map(FaceStyle::parse).unwrap_or_default()
}

/// Parse a manifest from any reader.
pub fn load_manifest(reader: impl Read) -> Result<Vec<RawFontRecord>> {
    serde_json::from_reader(BufReader::new(reader)).context("parsing font manifest JSON")
}

/// Parse a manifest from a file on disk.
pub fn load_manifest_path(path: impl AsRef<Path>) -> Result<Vec<RawFontRecord>> {
    let path = path.as_ref();
    let file =
        File::open(path).with_context(|| format!("opening manifest {}", path.display()))?;
    load_manifest(file).with_context(|| format!("reading manifest {}", path.display()))
}
