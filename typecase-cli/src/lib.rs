//! typecase CLI (made by Kotype)

use std::fs;
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum, ValueHint};
use regex::Regex;

use typecase_core::catalog::{Catalog, CatalogEntry};
use typecase_core::head::DocumentHead;
use typecase_core::manifest::load_manifest_path;
use typecase_core::output::{write_json_pretty, write_ndjson};
use typecase_core::query::CatalogQuery;
use typecase_core::register::register_manifest;

mod check;
pub mod server;

/// CLI entrypoint for typecase.
#[derive(Debug, Parser)]
#[command(
    name = "typecase",
    about = "Font-catalog registration and stylesheet synthesis (made by Kotype)"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Synthesize the stylesheet and head fragment from a manifest
    Build(BuildArgs),
    /// List catalog entries, optionally filtered
    List(ListArgs),
    /// Verify that manifest file references resolve on disk
    Check(check::CheckArgs),
    /// Serve the catalog and stylesheet over HTTP
    Serve(ServeArgs),
}

#[derive(Debug, Args)]
struct BuildArgs {
    /// Path to the font manifest JSON
    #[arg(value_hint = ValueHint::FilePath)]
    manifest: PathBuf,

    /// Write the synthesized stylesheet here instead of stdout
    #[arg(long = "css", value_hint = ValueHint::FilePath)]
    css: Option<PathBuf>,

    /// Write the rendered HTML head fragment here
    #[arg(long = "head", value_hint = ValueHint::FilePath)]
    head: Option<PathBuf>,

    /// Print a registration summary to stderr
    #[arg(long = "summary", action = ArgAction::SetTrue)]
    summary: bool,
}

#[derive(Debug, Args)]
struct ListArgs {
    /// Path to the font manifest JSON
    #[arg(value_hint = ValueHint::FilePath)]
    manifest: PathBuf,

    /// Only include fonts in this category ("All" imposes no constraint)
    #[arg(short = 'c', long = "category")]
    category: Option<String>,

    /// Case-insensitive substring match on the family name
    #[arg(short = 's', long = "search")]
    search: Option<String>,

    /// Exact match on the lead style name
    #[arg(long = "style")]
    style: Option<String>,

    /// Regex patterns of which at least one must match the family name
    #[arg(short = 'n', long = "name", value_hint = ValueHint::Other)]
    name_patterns: Vec<String>,

    /// Only premium fonts
    #[arg(long = "premium", action = ArgAction::SetTrue, conflicts_with = "free")]
    premium: bool,

    /// Only free fonts
    #[arg(long = "free", action = ArgAction::SetTrue)]
    free: bool,

    /// Only variable fonts
    #[arg(short = 'v', long = "variable", action = ArgAction::SetTrue, conflicts_with = "static_only")]
    variable: bool,

    /// Only static fonts
    #[arg(long = "static", action = ArgAction::SetTrue)]
    static_only: bool,

    /// Emit a single JSON array
    #[arg(long = "json", action = ArgAction::SetTrue, conflicts_with = "ndjson")]
    json: bool,

    /// Emit newline-delimited JSON
    #[arg(long = "ndjson", action = ArgAction::SetTrue)]
    ndjson: bool,

    /// Format output as padded columns
    #[arg(long = "columns", action = ArgAction::SetTrue)]
    columns: bool,

    /// Control colorized output (auto|always|never)
    #[arg(long = "color", default_value_t = ColorChoice::Auto, value_enum)]
    color: ColorChoice,
}

#[derive(Debug, Args)]
struct ServeArgs {
    /// Path to the font manifest JSON
    #[arg(value_hint = ValueHint::FilePath)]
    manifest: PathBuf,

    /// Address to bind the HTTP server to
    #[arg(long = "bind", default_value = "127.0.0.1:8750")]
    bind: String,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum ColorChoice {
    Auto,
    Always,
    Never,
}

/// Parse CLI args and execute the selected command.
pub fn run() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Build(args) => run_build(args),
        Command::List(args) => run_list(args),
        Command::Check(args) => check::run_check(args),
        Command::Serve(args) => run_serve(args),
    }
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn register(manifest: &PathBuf) -> Result<(Catalog, DocumentHead, typecase_core::register::RegisterReport)> {
    let records = load_manifest_path(manifest)?;
    let mut catalog = Catalog::new();
    let mut head = DocumentHead::new();
    let report = register_manifest(&records, &mut catalog, &mut head);
    Ok((catalog, head, report))
}

fn run_build(args: BuildArgs) -> Result<()> {
    let (_, head, report) = register(&args.manifest)?;

    let css = head.render_css();
    match &args.css {
        Some(path) => fs::write(path, &css)
            .with_context(|| format!("writing stylesheet {}", path.display()))?,
        None if args.head.is_none() => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(css.as_bytes())?;
        }
        None => {}
    }

    if let Some(path) = &args.head {
        fs::write(path, head.render_html())
            .with_context(|| format!("writing head fragment {}", path.display()))?;
    }

    if args.summary {
        eprintln!(
            "{} families, {} rules, {} imports, {} skipped",
            report.families,
            report.rules,
            report.imports,
            report.skipped.len()
        );
        for skip in &report.skipped {
            eprintln!("  skipped {}/{}: {}", skip.family, skip.face, skip.reason);
        }
    }

    Ok(())
}

fn run_list(args: ListArgs) -> Result<()> {
    let (catalog, _, _) = register(&args.manifest)?;
    let query = build_query(&args)?;
    let entries: Vec<CatalogEntry> = catalog.filter(&query).into_iter().cloned().collect();

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let use_color = match args.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => handle.is_terminal(),
    };

    if args.ndjson {
        write_ndjson(&entries, &mut handle)?;
    } else if args.json {
        write_json_pretty(&entries, &mut handle)?;
    } else if args.columns {
        write_columns(&entries, &mut handle, use_color)?;
    } else {
        write_plain(&entries, &mut handle, use_color)?;
    }

    Ok(())
}

fn run_serve(args: ServeArgs) -> Result<()> {
    let records = load_manifest_path(&args.manifest)?;
    let runtime = tokio::runtime::Runtime::new().context("starting async runtime")?;
    runtime.block_on(server::serve(&records, &args.bind))
}

fn build_query(args: &ListArgs) -> Result<CatalogQuery> {
    build_query_from_parts(
        &args.category,
        &args.search,
        &args.style,
        &args.name_patterns,
        tri_state(args.premium, args.free),
        tri_state(args.variable, args.static_only),
    )
}

/// Assemble a catalog query from optional parts; shared by `list` and the
/// HTTP server.
pub fn build_query_from_parts(
    category: &Option<String>,
    search: &Option<String>,
    style: &Option<String>,
    name_patterns: &[String],
    premium: Option<bool>,
    variable: Option<bool>,
) -> Result<CatalogQuery> {
    let mut query = CatalogQuery::new().with_name_patterns(compile_patterns(name_patterns)?);

    if let Some(category) = category {
        query = query.with_category(category.clone());
    }
    if let Some(search) = search {
        query = query.with_search(search.clone());
    }
    if let Some(style) = style {
        query = query.with_style(style.clone());
    }
    if let Some(premium) = premium {
        query = query.with_premium(premium);
    }
    if let Some(variable) = variable {
        query = query.with_variable(variable);
    }

    Ok(query)
}

fn tri_state(yes: bool, no: bool) -> Option<bool> {
    match (yes, no) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

fn compile_patterns(patterns: &[String]) -> Result<Vec<Regex>> {
    patterns
        .iter()
        .map(|p| Regex::new(p).with_context(|| format!("invalid regex: {p}")))
        .collect()
}

fn write_plain(entries: &[CatalogEntry], mut w: impl Write, color: bool) -> Result<()> {
    for entry in entries {
        let rendered = apply_color(&entry.name, color, AnsiColor::Cyan);
        writeln!(w, "{rendered}")?;
    }
    Ok(())
}

fn write_columns(entries: &[CatalogEntry], mut w: impl Write, color: bool) -> Result<()> {
    let mut rows: Vec<(String, String, String)> = entries
        .iter()
        .map(|entry| {
            let name = entry.name.clone();
            let category = entry.category.clone();
            let tags = format!(
                "styles:{:<3}{}{}",
                entry.style_count,
                if entry.variable { " var" } else { "" },
                if entry.is_premium { " premium" } else { "" },
            );
            (name, category, tags)
        })
        .collect();

    let name_width = rows
        .iter()
        .map(|r| r.0.len())
        .max()
        .unwrap_or(0)
        .clamp(0, 80);
    let category_width = rows
        .iter()
        .map(|r| r.1.len())
        .max()
        .unwrap_or(0)
        .clamp(0, 40);

    for (name, category, tags) in rows.drain(..) {
        let padded_name = format!("{:<name_width$}", name);
        let padded_category = format!("{:<category_width$}", category);
        let rendered_name = apply_color(&padded_name, color, AnsiColor::Cyan);
        let rendered_category = apply_color(&padded_category, color, AnsiColor::Yellow);
        let rendered_tags = apply_color(&tags, color, AnsiColor::Green);

        writeln!(w, "{rendered_name}  {rendered_category}  {rendered_tags}")?;
    }

    Ok(())
}

#[derive(Copy, Clone)]
enum AnsiColor {
    Cyan,
    Yellow,
    Green,
}

fn apply_color(text: &str, color: bool, code: AnsiColor) -> String {
    if !color {
        return text.to_string();
    }

    let code_str = match code {
        AnsiColor::Cyan => "36",
        AnsiColor::Yellow => "33",
        AnsiColor::Green => "32",
    };

    format!("\u{1b}[{}m{}\u{1b}[0m", code_str, text)
}
