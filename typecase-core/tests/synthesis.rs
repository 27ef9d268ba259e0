use typecase_core::manifest::{load_manifest, normalize};
use typecase_core::synthesis::synthesize;

fn synthesize_json(json: &str) -> typecase_core::synthesis::SynthesisReport {
    let records = load_manifest(json.as_bytes()).expect("parse manifest");
    synthesize(&normalize(&records))
}

#[test]
fn single_local_style_emits_one_rule() {
    let report = synthesize_json(
        r#"[{
            "id": 1,
            "name": "Test",
            "fontFamily": "Test",
            "category": "Serif",
            "styles": [{"file": "/a.woff2", "name": "Bold", "weight": 700}]
        }]"#,
    );

    assert_eq!(report.rules.len(), 1);
    assert!(report.imports.is_empty());
    assert!(report.skipped.is_empty());

    let css = report.stylesheet();
    assert!(css.contains("font-family: 'Test';"));
    assert!(css.contains("font-weight: 700;"));
    assert!(css.contains("font-style: normal;"));
    assert!(css.contains("url('/a.woff2') format('woff2')"));
    assert!(css.contains("font-display: swap;"));
}

#[test]
fn fallback_chain_preserves_order_and_declared_formats() {
    let report = synthesize_json(
        r#"[{
            "id": 9,
            "name": "Satoshi",
            "fontFamily": "Satoshi",
            "category": "Sans-serif",
            "styles": [{
                "files": ["/fonts/Satoshi-Black.woff2", "/fonts/Satoshi-Black.woff"],
                "formats": ["woff2", "woff"],
                "name": "Black",
                "weight": 900
            }]
        }]"#,
    );

    let css = report.stylesheet();
    let woff2_at = css.find("format('woff2')").expect("woff2 source");
    let woff_at = css.find("format('woff')").expect("woff source");
    assert!(woff2_at < woff_at, "most preferred format first");
}

#[test]
fn declared_format_wins_over_extension() {
    let report = synthesize_json(
        r#"[{
            "id": 1,
            "name": "Odd",
            "category": "Display",
            "styles": [{
                "files": ["/fonts/Odd.bin"],
                "formats": ["woff2"],
                "name": "Regular"
            }]
        }]"#,
    );

    assert!(report.stylesheet().contains("url('/fonts/Odd.bin') format('woff2')"));
}

#[test]
fn unknown_extension_defaults_to_truetype() {
    let report = synthesize_json(
        r#"[{
            "id": 1,
            "name": "Mystery",
            "category": "Display",
            "styles": [{"file": "/fonts/Mystery.font", "name": "Regular"}]
        }]"#,
    );

    assert_eq!(report.rules.len(), 1);
    assert!(report.stylesheet().contains("format('truetype')"));
    assert!(report.skipped.is_empty(), "unknown format is a guess, not an error");
}

#[test]
fn remote_source_becomes_import_not_rule() {
    let report = synthesize_json(
        r#"[{
            "id": 1,
            "name": "Hosted",
            "category": "Sans-serif",
            "styles": [{"file": "https://fonts.example.com/x.css", "name": "Regular"}]
        }]"#,
    );

    assert!(report.rules.is_empty(), "no @font-face for remote sources");
    assert_eq!(report.imports, vec!["https://fonts.example.com/x.css".to_string()]);
}

#[test]
fn repeated_remote_urls_deduplicate_first_seen() {
    let report = synthesize_json(
        r#"[
            {"id": 1, "name": "A", "category": "Serif",
             "styles": [{"file": "https://cdn.example.com/shared.css", "name": "Regular"}]},
            {"id": 2, "name": "B", "category": "Serif",
             "styles": [{"file": "https://cdn.example.com/shared.css", "name": "Regular"},
                        {"file": "https://cdn.example.com/other.css", "name": "Bold"}]}
        ]"#,
    );

    assert_eq!(
        report.imports,
        vec![
            "https://cdn.example.com/shared.css".to_string(),
            "https://cdn.example.com/other.css".to_string()
        ]
    );
}

#[test]
fn mixed_chain_is_treated_as_remote() {
    let report = synthesize_json(
        r#"[{
            "id": 1,
            "name": "Mixed",
            "category": "Serif",
            "styles": [{
                "files": ["/local/a.woff2", "https://cdn.example.com/a.css"],
                "formats": ["woff2", "css"],
                "name": "Regular"
            }]
        }]"#,
    );

    assert!(report.rules.is_empty(), "no partial @font-face for a mixed chain");
    assert_eq!(report.imports, vec!["https://cdn.example.com/a.css".to_string()]);
}

#[test]
fn missing_file_skips_source_but_not_family() {
    let report = synthesize_json(
        r#"[{
            "id": 1,
            "name": "Partial",
            "category": "Serif",
            "styles": [
                {"name": "Ghost"},
                {"file": "/fonts/Partial-Regular.otf", "name": "Regular"}
            ]
        }]"#,
    );

    assert_eq!(report.rules.len(), 1, "valid sibling source still emits");
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].family, "Partial");
    assert_eq!(report.skipped[0].face, "Ghost");
}

#[test]
fn variable_sources_emit_weight_ranges() {
    let report = synthesize_json(
        r#"[{
            "id": 5,
            "name": "KoKhalaya",
            "fontFamily": "KoKhalaya",
            "category": "Sans-serif",
            "variable": [
                {"file": "/fonts/KoKhalayaVF.ttf", "fontFamily": "KoKhalaya-Variable"},
                {"file": "/fonts/SatoshiVF.woff2", "fontFamily": "Satoshi-Variable",
                 "weightRange": [300, 900], "style": "italic"}
            ]
        }]"#,
    );

    let css = report.stylesheet();
    assert!(css.contains("font-weight: 100 900;"), "default span when undeclared");
    assert!(css.contains("font-weight: 300 900;"), "declared span wins");
    assert!(css.contains("font-style: italic;"));
}

#[test]
fn variation_settings_render_verbatim() {
    let report = synthesize_json(
        r#"[{
            "id": 1,
            "name": "Ko_Banzeen",
            "fontFamily": "Ko_Banzeen",
            "category": "Display",
            "styles": [{
                "file": "/fonts/Ko_Banzeen-SlantedR.otf",
                "name": "Slanted Right",
                "style": "oblique",
                "variationSettings": "'slnt' 15"
            }]
        }]"#,
    );

    let css = report.stylesheet();
    assert!(css.contains("font-variation-settings: 'slnt' 15;"));
    assert!(css.contains("font-style: oblique;"));
}

#[test]
fn empty_manifest_completes_empty() {
    let report = synthesize_json("[]");
    assert!(report.rules.is_empty());
    assert!(report.imports.is_empty());
    assert!(report.skipped.is_empty());
    assert_eq!(report.stylesheet(), "");
}
