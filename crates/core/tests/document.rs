//! Full document reconstruction.

use pretty_assertions::assert_eq;
use sculpt_core::model::{AttrValue, ModuleVariant};
use sculpt_core::{
    parse_as_opaque_code, parse_to_document, DemoteReason, Diagnostic, Document, DropReason,
    ImportConfig, Importer,
};
use serde_json::json;

fn seeded() -> Importer {
    Importer::new(ImportConfig::default().with_seed(42))
}

fn ratios(document: &Document) -> Vec<String> {
    document.content[0]
        .children
        .iter()
        .map(|row| row.ratio().to_string())
        .collect()
}

#[test]
fn test_empty_input_gives_empty_document() {
    for input in ["", "   \n  ", "<script>alert(1)</script>", "<!-- only a comment -->"] {
        let document = parse_to_document(input, None);
        assert!(document.is_empty(), "input {input:?}");
        assert_eq!(
            serde_json::to_value(&document).unwrap(),
            json!({"version": "1.0", "content": []})
        );
    }
}

#[test]
fn test_single_heading_document_shape() {
    let document = parse_to_document("<h1>Hello</h1>", None);
    assert_eq!(document.version, "1.0");
    assert_eq!(document.content.len(), 1);

    let section = &document.content[0];
    assert_eq!(section.attrs.get("fullwidth"), Some(&AttrValue::Bool(false)));
    assert_eq!(section.attrs.get("inner_width"), Some(&AttrValue::Int(1200)));

    let row = &section.children[0];
    assert_eq!(row.ratio(), "1");
    assert_eq!(row.attrs().get("column_gap"), Some(&AttrValue::Int(30)));
    assert_eq!(row.attrs().get("equal_heights"), Some(&AttrValue::Bool(true)));

    let column = &row.columns()[0];
    assert_eq!(column.attrs.get("width"), Some(&AttrValue::Text("1".into())));

    let heading = &column.children[0];
    assert_eq!(heading.variant, ModuleVariant::Heading);
    assert_eq!(heading.text_attr("text"), Some("Hello"));
    assert_eq!(heading.text_attr("level"), Some("h1"));
}

#[test]
fn test_serialized_node_types() {
    let document = parse_to_document("<h1>Hello</h1>", None);
    let value = serde_json::to_value(&document).unwrap();
    let section = &value["content"][0];
    assert_eq!(section["type"], "section");
    assert_eq!(section["children"][0]["type"], "row");
    assert_eq!(section["children"][0]["attrs"]["columns"], "1");
    let column = &section["children"][0]["children"][0];
    assert_eq!(column["type"], "column");
    assert_eq!(column["attrs"]["width"], "1");
    assert_eq!(column["children"][0]["type"], "heading");
    assert_eq!(column["children"][0]["attrs"]["level"], "h1");
    assert_eq!(column["children"][0]["children"], json!([]));
}

#[test]
fn test_ids_follow_the_naming_scheme_and_are_unique() {
    let document = parse_to_document("<h1>Hello</h1><p>World</p>", None);
    let section = &document.content[0];
    let row = &section.children[0];
    let column = &row.columns()[0];

    let mut ids = vec![section.id.clone(), row.id().to_string(), column.id.clone()];
    ids.extend(column.children.iter().map(|m| m.id.clone()));

    for (id, kind) in ids.iter().zip(["section", "row", "column", "heading", "text"]) {
        let parts: Vec<&str> = id.split('_').collect();
        assert_eq!(parts.len(), 4, "{id}");
        assert_eq!(parts[0], kind);
        assert_eq!(parts[1], "import");
        assert!(parts[2].parse::<u64>().is_ok(), "{id}");
        assert_eq!(parts[3].len(), 8, "{id}");
        assert!(parts[3].chars().all(|c| c.is_ascii_hexdigit()), "{id}");
    }

    let mut unique = ids.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), ids.len());
}

#[test]
fn test_seeded_imports_are_deterministic() {
    let html = r#"
        <section class="hero">
            <h1>Launch faster</h1>
            <p>Everything you need.</p>
            <a class="btn" href="/start">Start</a>
        </section>
    "#;
    let first = seeded().parse_to_document(html, Some("https://cdn.example.com/hero.png"));
    let second = seeded().parse_to_document(html, Some("https://cdn.example.com/hero.png"));
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );

    let other = Importer::new(ImportConfig::default().with_seed(7)).parse_to_document(html, None);
    assert_ne!(first.content[0].id, other.content[0].id);
}

#[test]
fn test_feature_cards_become_three_columns() {
    let html = r#"
        <div class="features">
            <div class="feature-card"><h3>Fast</h3><p>Quick builds.</p></div>
            <div class="feature-card"><h3>Safe</h3><p>No surprises.</p></div>
            <div class="feature-card"><h3>Small</h3><p>Tiny output.</p></div>
        </div>
    "#;
    let document = parse_to_document(html, None);
    assert_eq!(ratios(&document), vec!["1_3,1_3,1_3"]);

    let row = &document.content[0].children[0];
    for (column, title) in row.columns().iter().zip(["Fast", "Safe", "Small"]) {
        assert_eq!(column.attrs.get("width"), Some(&AttrValue::Text("1_3".into())));
        assert_eq!(column.children.len(), 2);
        assert_eq!(column.children[0].text_attr("text"), Some(title));
        assert_eq!(column.children[1].variant, ModuleVariant::Text);
    }
}

#[test]
fn test_content_around_columns_gets_its_own_rows() {
    let html = r#"
        <div class="block">
            <h2>Intro</h2>
            <div class="col">Left</div>
            <div class="col">Right</div>
            <p>Outro</p>
        </div>
    "#;
    let document = parse_to_document(html, None);
    assert_eq!(ratios(&document), vec!["1", "1_2,1_2", "1"]);

    let rows = &document.content[0].children;
    assert_eq!(rows[0].columns()[0].children[0].text_attr("text"), Some("Intro"));
    assert_eq!(
        rows[1].columns()[1].children[0].text_attr("content"),
        Some("<p>Right</p>")
    );
    assert_eq!(
        rows[2].columns()[0].children[0].text_attr("content"),
        Some("<p>Outro</p>")
    );
}

#[test]
fn test_content_between_columns_joins_preceding_column() {
    let html = r#"<div class="col"><h3>A</h3></div><hr><div class="col"><h3>B</h3></div>"#;
    let document = parse_to_document(html, None);
    assert_eq!(ratios(&document), vec!["1_2,1_2"]);
    let first = &document.content[0].children[0].columns()[0];
    let variants: Vec<ModuleVariant> = first.children.iter().map(|m| m.variant).collect();
    assert_eq!(variants, vec![ModuleVariant::Heading, ModuleVariant::Divider]);
}

#[test]
fn test_empty_detected_column_is_dropped() {
    let html = r#"<div class="col"><h3>A</h3></div><div class="col"><p></p></div><div class="col"><h3>C</h3></div>"#;
    let document = parse_to_document(html, None);
    assert_eq!(ratios(&document), vec!["1_2,1_2"]);
}

#[test]
fn test_featured_image_leads_single_column_row() {
    let document = parse_to_document("<h1>Post</h1>", Some(" https://x.test/f.jpg "));
    let modules = document.modules();
    assert_eq!(modules.len(), 2);
    assert_eq!(modules[0].variant, ModuleVariant::Image);
    assert_eq!(modules[0].text_attr("src"), Some("https://x.test/f.jpg"));
    assert_eq!(modules[0].text_attr("alt"), Some("Featured Image"));
    assert_eq!(ratios(&document), vec!["1"]);
}

#[test]
fn test_featured_image_gets_own_row_before_columns() {
    let html = r#"<div class="col">A</div><div class="col">B</div>"#;
    let document = parse_to_document(html, Some("https://x.test/f.jpg"));
    assert_eq!(ratios(&document), vec!["1", "1_2,1_2"]);
    assert_eq!(document.modules()[0].variant, ModuleVariant::Image);
}

#[test]
fn test_featured_image_alone() {
    let document = parse_to_document("<p></p>", Some("https://x.test/f.jpg"));
    assert_eq!(document.modules().len(), 1);

    let ignored = parse_to_document("<h1>Hi</h1>", Some("   "));
    assert_eq!(ignored.modules().len(), 1);
}

#[test]
fn test_wrapper_styles_reach_the_section() {
    let html = r#"<div style="background-color: #0f172a; padding: 40px 0"><h1>Dark</h1></div>"#;
    let document = parse_to_document(html, None);
    let attrs = &document.content[0].attrs;
    assert_eq!(
        attrs.get("background_color"),
        Some(&AttrValue::Text("#0f172a".into()))
    );
    assert_eq!(
        attrs.get("background_type"),
        Some(&AttrValue::Text("color".into()))
    );
    assert!(attrs.contains_key("padding"));
}

#[test]
fn test_structured_markup_is_kept_opaque() {
    let html = r#"<div class="jtb-section"><h1>Saved layout</h1></div>"#;
    let document = seeded().parse_to_document(html, None);
    let modules = document.modules();
    assert_eq!(modules.len(), 1);
    assert_eq!(modules[0].variant, ModuleVariant::Code);

    let notes = seeded().diagnose(html);
    assert!(notes.contains(&Diagnostic::demoted("body", DemoteReason::AlreadyStructured)));
}

#[test]
fn test_opaque_code_document() {
    let document = parse_as_opaque_code("<h1>Keep me</h1><script>track()</script>");
    let modules = document.modules();
    assert_eq!(modules.len(), 1);
    assert_eq!(modules[0].variant, ModuleVariant::Code);
    assert_eq!(modules[0].text_attr("raw_content"), Some("<h1>Keep me</h1>"));

    assert!(parse_as_opaque_code("  ").is_empty());
}

#[test]
fn test_diagnose_explains_lossy_decisions() {
    let html = r#"
        <style>a:hover { color: red; }</style>
        <p></p>
        <img alt="no source">
        <iframe src="https://maps.example.com/embed"></iframe>
        <h1>Kept</h1>
    "#;
    let notes = Importer::default().diagnose(html);
    assert_eq!(
        notes,
        vec![
            Diagnostic::SkippedRule {
                selector: "a:hover".to_string()
            },
            Diagnostic::dropped("p", DropReason::EmptyParagraph),
            Diagnostic::dropped("img", DropReason::MissingImageSource),
            Diagnostic::demoted("iframe", DemoteReason::UnrecognizedVideoHost),
        ]
    );
    assert_eq!(
        notes[1].to_string(),
        "dropped <p>: paragraph without text"
    );
    assert_eq!(notes[3].tag(), Some("iframe"));
}

#[test]
fn test_importer_is_shareable_across_threads() {
    let importer = std::sync::Arc::new(seeded());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let importer = importer.clone();
            std::thread::spawn(move || importer.parse_to_document("<h2>Same</h2>", None))
        })
        .collect();
    let results: Vec<Document> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(results.windows(2).all(|w| w[0] == w[1]));
}
