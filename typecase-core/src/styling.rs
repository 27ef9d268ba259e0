//! CSS-facing vocabulary: face styles, source formats, inline directives (made by Kotype)

use std::fmt;

use serde::{Deserialize, Serialize};

/// Slant posture of a face.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FaceStyle {
    #[default]
    Normal,
    Italic,
    Oblique,
}

impl FaceStyle {
    /// Parse a manifest style string. Unknown values fall back to normal;
    /// normalization never rejects a record over a typo here.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "italic" => FaceStyle::Italic,
            "oblique" => FaceStyle::Oblique,
            _ => FaceStyle::Normal,
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            FaceStyle::Normal => "normal",
            FaceStyle::Italic => "italic",
            FaceStyle::Oblique => "oblique",
        }
    }
}

impl fmt::Display for FaceStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Source format named in a `format()` hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FontFormat {
    Opentype,
    Truetype,
    Woff,
    Woff2,
    EmbeddedOpentype,
    Svg,
}

impl FontFormat {
    /// Resolve a format from a file extension. Unrecognized extensions get
    /// truetype, the renderer's most forgiving guess.
    pub fn from_path(path: &str) -> Self {
        let ext = path
            .rsplit('.')
            .next()
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "otf" => FontFormat::Opentype,
            "ttf" => FontFormat::Truetype,
            "woff" => FontFormat::Woff,
            "woff2" => FontFormat::Woff2,
            "eot" => FontFormat::EmbeddedOpentype,
            "svg" => FontFormat::Svg,
            _ => FontFormat::Truetype,
        }
    }

    /// Resolve a format declared by name in the manifest. Accepts both the
    /// CSS format names and the bare extensions.
    pub fn from_declared(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "opentype" | "otf" => Some(FontFormat::Opentype),
            "truetype" | "ttf" => Some(FontFormat::Truetype),
            "woff" => Some(FontFormat::Woff),
            "woff2" => Some(FontFormat::Woff2),
            "embedded-opentype" | "eot" => Some(FontFormat::EmbeddedOpentype),
            "svg" => Some(FontFormat::Svg),
            _ => None,
        }
    }

    pub fn css_name(self) -> &'static str {
        match self {
            FontFormat::Opentype => "opentype",
            FontFormat::Truetype => "truetype",
            FontFormat::Woff => "woff",
            FontFormat::Woff2 => "woff2",
            FontFormat::EmbeddedOpentype => "embedded-opentype",
            FontFormat::Svg => "svg",
        }
    }
}

impl fmt::Display for FontFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.css_name())
    }
}

/// Single-quote a family name for CSS output.
pub fn css_quote(family: &str) -> String {
    format!("'{family}'")
}

/// Inline style directives for applying a registered face to an element:
/// family always, weight and style only when the caller asked for them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleDirectives {
    pub font_family: String,
    pub font_weight: Option<u16>,
    pub font_style: Option<FaceStyle>,
}

impl StyleDirectives {
    /// Property/value pairs in declaration order.
    pub fn declarations(&self) -> Vec<(&'static str, String)> {
        let mut decls = vec![("font-family", css_quote(&self.font_family))];
        if let Some(weight) = self.font_weight {
            decls.push(("font-weight", weight.to_string()));
        }
        if let Some(style) = self.font_style {
            decls.push(("font-style", style.keyword().to_string()));
        }
        decls
    }
}

impl fmt::Display for StyleDirectives {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (property, value) in self.declarations() {
            if !first {
                f.write_str(" ")?;
            }
            write!(f, "{property}: {value};")?;
            first = false;
        }
        Ok(())
    }
}

/// Build the directives for a family with optional weight/style overrides.
pub fn font_style(
    family: &str,
    weight: Option<u16>,
    style: Option<FaceStyle>,
) -> StyleDirectives {
    StyleDirectives {
        font_family: family.to_string(),
        font_weight: weight,
        font_style: style,
    }
}
