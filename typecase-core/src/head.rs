//! Document head sink (made by Kotype)
//!
//! The pipeline's only side effects land here: one inline style block for the
//! synthesized rules and one stylesheet link per remote import. The sink is
//! an owned value handed to the pipeline, not an ambient global, so tests and
//! servers can each keep their own.

/// Ordered record of everything injected into a document head.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentHead {
    styles: Vec<String>,
    links: Vec<String>,
}

impl DocumentHead {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an inline style block.
    pub fn inject_style(&mut self, css: impl Into<String>) {
        self.styles.push(css.into());
    }

    /// Append an external stylesheet link.
    pub fn inject_link(&mut self, href: impl Into<String>) {
        self.links.push(href.into());
    }

    pub fn styles(&self) -> &[String] {
        &self.styles
    }

    pub fn links(&self) -> &[String] {
        &self.links
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty() && self.links.is_empty()
    }

    /// Serialize as an HTML head fragment, injection order preserved.
    pub fn render_html(&self) -> String {
        let mut html = String::new();
        for css in &self.styles {
            html.push_str("<style>\n");
            html.push_str(css);
            html.push_str("</style>\n");
        }
        for href in &self.links {
            html.push_str(&format!("<link rel=\"stylesheet\" href=\"{href}\">\n"));
        }
        html
    }

    /// Serialize as one CSS document. `@import` must precede every rule, so
    /// the links render first here regardless of injection order.
    pub fn render_css(&self) -> String {
        let mut css = String::new();
        for href in &self.links {
            css.push_str(&format!("@import url('{href}');\n"));
        }
        if !self.links.is_empty() && !self.styles.is_empty() {
            css.push('\n');
        }
        for block in &self.styles {
            css.push_str(block);
        }
        css
    }
}
