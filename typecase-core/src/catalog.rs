//! Catalog store and the UI-facing projection (made by Kotype)

use serde::{Deserialize, Serialize};

use crate::manifest::FontDescriptor;
use crate::query::CatalogQuery;
use crate::styling::FaceStyle;

/// One `{name, weight, style}` triple on a catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStyle {
    pub name: String,
    pub weight: u16,
    pub style: FaceStyle,
}

/// Reduced projection of a [`FontDescriptor`] for the UI layer. Always
/// derived via [`derive_entry`], never hand-authored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub id: u32,
    pub name: String,
    pub category: String,
    pub style: String,
    pub variable: bool,
    pub designer: Option<String>,
    pub image_url: Option<String>,
    pub is_premium: bool,
    pub style_count: usize,
    pub font_family: String,
    pub styles: Vec<CatalogStyle>,
}

/// Reduce a descriptor to its catalog projection. Pure: the same descriptor
/// always yields an identical entry.
pub fn derive_entry(descriptor: &FontDescriptor) -> CatalogEntry {
    CatalogEntry {
        id: descriptor.id,
        name: descriptor.name.clone(),
        category: descriptor.category.clone(),
        style: descriptor
            .styles
            .first()
            .map(|s| s.name.clone())
            .unwrap_or_default(),
        variable: descriptor.is_variable(),
        designer: descriptor.designer.clone(),
        image_url: descriptor.image_url.clone(),
        is_premium: descriptor.is_premium,
        style_count: descriptor.styles.len(),
        font_family: descriptor.font_family.clone(),
        styles: descriptor
            .styles
            .iter()
            .map(|s| CatalogStyle {
                name: s.name.clone(),
                weight: s.weight,
                style: s.style,
            })
            .collect(),
    }
}

/// Owned registry of catalog entries. Constructed explicitly and passed by
/// reference to whoever needs read access; favorites ownership stays with
/// the caller.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    fonts: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry, preserving registration order.
    pub fn add(&mut self, entry: CatalogEntry) {
        self.fonts.push(entry);
    }

    pub fn all(&self) -> &[CatalogEntry] {
        &self.fonts
    }

    pub fn by_id(&self, id: u32) -> Option<&CatalogEntry> {
        self.fonts.iter().find(|font| font.id == id)
    }

    /// Entries whose id appears in the caller-owned favorites list, catalog
    /// order preserved.
    pub fn favorites(&self, ids: &[u32]) -> Vec<&CatalogEntry> {
        self.fonts
            .iter()
            .filter(|font| ids.contains(&font.id))
            .collect()
    }

    /// Entries satisfying every present filter key.
    pub fn filter(&self, query: &CatalogQuery) -> Vec<&CatalogEntry> {
        self.fonts
            .iter()
            .filter(|font| query.matches(font))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }
}
