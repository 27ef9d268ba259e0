use std::fs;

use tempfile::tempdir;
use typecase_core::manifest::{load_manifest, load_manifest_path, normalize, FontSource};
use typecase_core::styling::FaceStyle;

fn manifest(json: &str) -> Vec<typecase_core::manifest::RawFontRecord> {
    load_manifest(json.as_bytes()).expect("parse manifest")
}

#[test]
fn legacy_single_file_records_normalize() {
    let records = manifest(
        r#"[{
            "id": 3,
            "name": "KoDongol",
            "fontFamily": "KoDongol",
            "category": "Serif",
            "styles": [{"file": "/fonts/KoDongol-Regular.otf", "name": "Regular"}],
            "designer": "Kotype",
            "isPremium": false
        }]"#,
    );

    let descriptors = normalize(&records);
    assert_eq!(descriptors.len(), 1);

    let style = &descriptors[0].styles[0];
    assert_eq!(
        style.source,
        FontSource::Single("/fonts/KoDongol-Regular.otf".to_string())
    );
    assert_eq!(style.weight, 400, "weight defaults to 400");
    assert_eq!(style.style, FaceStyle::Normal, "style defaults to normal");
    assert_eq!(style.font_family, "KoDongol");
}

#[test]
fn multi_file_records_pair_formats_positionally() {
    let records = manifest(
        r#"[{
            "id": 9,
            "name": "Satoshi",
            "fontFamily": "Satoshi",
            "category": "Sans-serif",
            "styles": [{
                "files": ["/fonts/Satoshi-Bold.woff2", "/fonts/Satoshi-Bold.woff"],
                "formats": ["woff2", "woff"],
                "name": "Bold",
                "weight": 700
            }]
        }]"#,
    );

    let descriptors = normalize(&records);
    match &descriptors[0].styles[0].source {
        FontSource::FallbackChain(files) => {
            assert_eq!(files.len(), 2);
            assert_eq!(files[0].path, "/fonts/Satoshi-Bold.woff2");
            assert_eq!(files[0].format.as_deref(), Some("woff2"));
            assert_eq!(files[1].format.as_deref(), Some("woff"));
        }
        other => panic!("expected fallback chain, got {other:?}"),
    }
}

#[test]
fn per_style_family_overrides_survive() {
    let records = manifest(
        r#"[{
            "id": 2,
            "name": "KOAynama",
            "category": "Sans-serif",
            "styles": [
                {"file": "/fonts/KOAynama-Sharp.ttf", "name": "Sharp", "fontFamily": "KOAynama-Sharp"},
                {"file": "/fonts/KOAynama-Curved.ttf", "name": "Curved", "fontFamily": "KOAynama-Curved"}
            ]
        }]"#,
    );

    let descriptor = &normalize(&records)[0];
    assert_eq!(descriptor.font_family, "KOAynama", "family default is the name");
    assert_eq!(descriptor.styles[0].font_family, "KOAynama-Sharp");
    assert_eq!(descriptor.styles[1].font_family, "KOAynama-Curved");
}

#[test]
fn variable_block_normalizes_with_optional_range() {
    let records = manifest(
        r#"[{
            "id": 5,
            "name": "KoKhalaya",
            "fontFamily": "KoKhalaya",
            "category": "Sans-serif",
            "styles": [{"file": "/fonts/KoKhalaya-5-5.otf", "name": "55", "weight": 600}],
            "variable": [
                {"file": "/fonts/KoKhalayaVF.ttf", "style": "normal", "fontFamily": "KoKhalaya-Variable"},
                {"file": "/fonts/KoKhalayaVF-Italic.ttf", "style": "italic",
                 "fontFamily": "KoKhalaya-Variable", "weightRange": [300, 900]}
            ]
        }]"#,
    );

    let descriptor = &normalize(&records)[0];
    assert!(descriptor.is_variable());
    assert_eq!(descriptor.variable[0].font_family, "KoKhalaya-Variable");
    assert_eq!(descriptor.variable[0].weight_range, None);
    assert_eq!(descriptor.variable[1].style, FaceStyle::Italic);
    assert_eq!(descriptor.variable[1].weight_range, Some((300, 900)));
}

#[test]
fn absent_collections_and_files_do_not_fail() {
    let records = manifest(
        r#"[
            {"id": 1, "name": "NoStyles", "category": "Display"},
            {"id": 2, "name": "NoFile", "category": "Display", "styles": [{"name": "Ghost"}]}
        ]"#,
    );

    let descriptors = normalize(&records);
    assert!(descriptors[0].styles.is_empty());
    assert!(descriptors[1].styles[0].source.is_empty());
}

#[test]
fn order_is_preserved() {
    let records = manifest(
        r#"[
            {"id": 10, "name": "First", "category": "Serif"},
            {"id": 11, "name": "Second", "category": "Serif"},
            {"id": 12, "name": "Third", "category": "Serif"}
        ]"#,
    );

    let names: Vec<String> = normalize(&records).iter().map(|d| d.name.clone()).collect();
    assert_eq!(names, vec!["First", "Second", "Third"]);
}

#[test]
fn manifest_loads_from_disk_with_context_on_failure() {
    let tmp = tempdir().expect("tempdir");
    let path = tmp.path().join("fonts.json");
    fs::write(
        &path,
        r#"[{"id": 1, "name": "OnDisk", "category": "Serif"}]"#,
    )
    .expect("write manifest");

    let records = load_manifest_path(&path).expect("load manifest");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "OnDisk");

    let err = load_manifest_path(tmp.path().join("absent.json"))
        .expect_err("missing file should error");
    assert!(err.to_string().contains("absent.json"));
}

#[test]
fn variation_settings_pass_through_verbatim() {
    let records = manifest(
        r#"[{
            "id": 1,
            "name": "Ko_Banzeen",
            "fontFamily": "Ko_Banzeen",
            "category": "Display",
            "styles": [{
                "file": "/fonts/Ko_Banzeen-SlantedL.otf",
                "name": "Slanted Left",
                "style": "italic",
                "weight": 400,
                "variationSettings": "'slnt' -15"
            }]
        }]"#,
    );

    let style = &normalize(&records)[0].styles[0];
    assert_eq!(style.variation_settings.as_deref(), Some("'slnt' -15"));
    assert_eq!(style.style, FaceStyle::Italic);
}
