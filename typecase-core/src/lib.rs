//! typecase-core: the patient registrar of font catalogs
//!
//! Like a stage manager who has every costume pressed and hanging before the
//! curtain rises, this library takes a declarative font manifest and makes
//! sure every face is dressed, announced, and findable before the first
//! glyph is drawn.
//!
//! ## Three Acts of Font Registration
//!
//! **Normalization**: smoothing out the manifest's many dialects
//! - Single files and fallback chains become one canonical source shape
//! - Missing weights settle at 400, missing styles at normal
//! - Family names resolve once (variant override, family default, then name)
//!
//! **Synthesis**: turning descriptors into stylesheet rules
//! - Local sources become `@font-face` blocks with ordered `url()/format()`
//!   fallbacks and a swap display policy
//! - Remote sources become deduplicated stylesheet imports instead
//! - Broken references are skipped and reported, never fatal
//!
//! **Registration**: filing every family where the UI can find it
//! - One inline style block and the import links land in a document-head sink
//! - Each family is reduced to a catalog entry, input order preserved
//! - The catalog answers read-all, read-by-id, favorites, and filter queries
//!
//! ## A Sample Evening
//!
//! ```rust,no_run
//! use typecase_core::catalog::Catalog;
//! use typecase_core::head::DocumentHead;
//! use typecase_core::manifest::load_manifest_path;
//! use typecase_core::register::register_manifest;
//!
//! let records = load_manifest_path("public/fonts.json")?;
//!
//! let mut catalog = Catalog::new();
//! let mut head = DocumentHead::new();
//! let report = register_manifest(&records, &mut catalog, &mut head);
//!
//! println!(
//!     "{} families registered, {} rules, {} imports, {} skipped",
//!     report.families,
//!     report.rules,
//!     report.imports,
//!     report.skipped.len()
//! );
//! println!("{}", head.render_css());
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## House Rules
//!
//! The pipeline is synchronous and runs once per document: running it twice
//! against the same sink duplicates the injected blocks and catalog entries.
//! Fetching and parsing the font binaries themselves is someone else's job;
//! we only write the rules and keep the ledger.
//!
//! ---
//!
//! Made by Kotype

pub mod catalog;
pub mod head;
pub mod manifest;
pub mod output;
pub mod query;
pub mod register;
pub mod styling;
pub mod synthesis;
