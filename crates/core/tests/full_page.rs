//! Whole-page import: regions, body sections and theme data.

use pretty_assertions::assert_eq;
use sculpt_core::model::{AttrValue, MenuItem, ModuleVariant, Spacing};
use sculpt_core::page::google_font_families;
use sculpt_core::{parse_full_page, ThemeColors, ThemeFonts};

const LANDING: &str = r#"
<!DOCTYPE html>
<html>
<head>
    <style>
        :root { --primary-color: #ff0000; --spacing: 8px; --gap: var(--spacing); }
        body { color: #333333; font-family: 'Roboto', sans-serif; }
        .site-header { background-color: #ffffff; }
    </style>
</head>
<body>
    <header class="site-header">
        <div class="logo">Acme</div>
        <nav>
            <a href="/">Home</a>
            <a href="/pricing">Pricing</a>
            <a href="/this-link-has-a-title-that-is-way-too-long">This link has a title that is way too long</a>
        </nav>
        <a class="btn" href="/signup">Sign up</a>
    </header>
    <main>
        <section class="hero">
            <h1>Welcome</h1>
            <p>Build pages in minutes.</p>
        </section>
        <section class="section features">
            <div class="feature">A</div>
            <div class="feature">B</div>
        </section>
    </main>
    <footer>
        <p>&copy; 2024 Acme</p>
    </footer>
</body>
</html>
"#;

#[test]
fn test_header_gets_logo_menu_and_cta_columns() {
    let page = parse_full_page(LANDING);
    let header = page.header.expect("header");
    let section = &header.content[0];
    assert_eq!(section.attrs.get("_pattern"), Some(&AttrValue::Text("header".into())));
    assert_eq!(section.attrs.get("fullwidth"), Some(&AttrValue::Bool(true)));
    assert_eq!(
        section.attrs.get("background_color"),
        Some(&AttrValue::Text("#ffffff".into()))
    );

    let row = &section.children[0];
    assert_eq!(row.ratio(), "1_4,1_2,1_4");

    let logo = &row.columns()[0].children[0];
    assert_eq!(logo.variant, ModuleVariant::SiteLogo);
    assert_eq!(logo.text_attr("logo_alt"), Some("Acme"));
    assert_eq!(logo.attr("text_only"), Some(&AttrValue::Bool(true)));

    let menu = &row.columns()[1].children[0];
    assert_eq!(menu.variant, ModuleVariant::Menu);
    assert_eq!(
        menu.attr("menu_items"),
        Some(&AttrValue::MenuItems(vec![
            MenuItem {
                title: "Home".into(),
                url: "/".into()
            },
            MenuItem {
                title: "Pricing".into(),
                url: "/pricing".into()
            },
        ]))
    );

    let cta = &row.columns()[2].children[0];
    assert_eq!(cta.variant, ModuleVariant::Button);
    assert_eq!(cta.text_attr("text"), Some("Sign up"));
    assert_eq!(cta.text_attr("link_url"), Some("/signup"));
}

#[test]
fn test_body_sections_come_from_main() {
    let page = parse_full_page(LANDING);
    assert_eq!(page.sections.len(), 2);

    let hero = &page.sections[0];
    assert_eq!(hero.attrs.get("_pattern"), Some(&AttrValue::Text("hero".into())));
    assert_eq!(
        hero.attrs.get("padding"),
        Some(&AttrValue::Spacing(Spacing::vertical("80px")))
    );
    assert_eq!(hero.children[0].ratio(), "1");

    // Generic class names are skipped when naming the pattern
    let features = &page.sections[1];
    assert_eq!(
        features.attrs.get("_pattern"),
        Some(&AttrValue::Text("features".into()))
    );
    assert_eq!(features.children[0].ratio(), "1_2,1_2");
}

#[test]
fn test_footer_falls_back_to_its_content() {
    let page = parse_full_page(LANDING);
    let footer = page.footer.expect("footer");
    let section = &footer.content[0];
    assert_eq!(section.attrs.get("_pattern"), Some(&AttrValue::Text("footer".into())));
    let modules = footer.modules();
    assert_eq!(modules.len(), 1);
    assert_eq!(modules[0].text_attr("content"), Some("<p>© 2024 Acme</p>"));
}

#[test]
fn test_footer_columns_are_detected() {
    let html = r#"
        <footer>
            <div class="footer-col"><h4>Company</h4><p>About</p></div>
            <div class="footer-col"><h4>Legal</h4><p>Terms</p></div>
            <div class="footer-col"><h4>Social</h4><p>Blog</p></div>
        </footer>
    "#;
    let page = parse_full_page(html);
    let footer = page.footer.expect("footer");
    assert_eq!(footer.content[0].children[0].ratio(), "1_3,1_3,1_3");
}

#[test]
fn test_theme_colors_prefer_custom_properties() {
    let page = parse_full_page(LANDING);
    assert_eq!(page.colors.primary, "#ff0000");
    assert_eq!(page.colors.text, "#333333");
    assert_eq!(page.colors.background, "#ffffff");
}

#[test]
fn test_theme_colors_rank_hex_usage() {
    let html = r#"
        <style>
            .a { color: #0000ff; }
            .b { background: #00ff00; }
            .c { background-color: #0000FF; }
            body { background: #fafafa; }
        </style>
        <p>x</p>
    "#;
    let page = parse_full_page(html);
    assert_eq!(page.colors.primary, "#0000ff");
    assert_eq!(page.colors.secondary, "#00ff00");
    assert_eq!(page.colors.background, "#fafafa");
}

#[test]
fn test_css_variables_are_resolved() {
    let page = parse_full_page(LANDING);
    assert_eq!(
        page.css_variables.get("gap").map(String::as_str),
        Some("8px")
    );
    assert_eq!(
        page.css_variables.get("primary-color").map(String::as_str),
        Some("#ff0000")
    );
}

#[test]
fn test_fonts_from_body_rule() {
    let page = parse_full_page(LANDING);
    assert_eq!(
        page.fonts,
        ThemeFonts {
            heading: "Roboto".into(),
            body: "Roboto".into()
        }
    );
}

#[test]
fn test_fonts_from_google_fonts_link() {
    let html = r#"
        <link href="https://fonts.googleapis.com/css2?family=Poppins:wght@400;700&amp;family=Open+Sans&amp;display=swap" rel="stylesheet">
        <h1>Hi</h1>
    "#;
    assert_eq!(
        google_font_families(html),
        vec!["Poppins".to_string(), "Open Sans".to_string()]
    );
    let page = parse_full_page(html);
    assert_eq!(page.fonts.heading, "Poppins");
    assert_eq!(page.fonts.body, "Open Sans");
}

#[test]
fn test_legacy_google_fonts_family_list() {
    let html = r#"<link href="//fonts.googleapis.com/css?family=Lato:400,700|Merriweather">"#;
    assert_eq!(
        google_font_families(html),
        vec!["Lato".to_string(), "Merriweather".to_string()]
    );
}

#[test]
fn test_nav_without_header_is_the_header() {
    let html = r#"
        <nav class="navbar"><a class="brand" href="/"><img src="/logo.svg" alt="Acme"></a><a href="/docs">Docs</a></nav>
        <section><h2>Body</h2></section>
    "#;
    let page = parse_full_page(html);
    let header = page.header.expect("header from nav");
    let row = &header.content[0].children[0];
    assert_eq!(row.ratio(), "1_2,1_2");

    let logo = &row.columns()[0].children[0];
    assert_eq!(logo.text_attr("logo"), Some("/logo.svg"));
    assert_eq!(logo.text_attr("logo_alt"), Some("Acme"));

    let menu = &row.columns()[1].children[0];
    assert_eq!(
        menu.attr("menu_items"),
        Some(&AttrValue::MenuItems(vec![MenuItem {
            title: "Docs".into(),
            url: "/docs".into()
        }]))
    );

    assert_eq!(page.sections.len(), 1);
    assert!(page.footer.is_none());
}

#[test]
fn test_loose_elements_share_a_section() {
    let page = parse_full_page("<h1>Title</h1><p>Intro</p><div><p>Block</p></div><p>Tail</p>");
    assert_eq!(page.sections.len(), 3);
    assert_eq!(page.sections[0].children[0].columns()[0].children.len(), 2);
}

#[test]
fn test_blank_page_keeps_theme_defaults() {
    let page = parse_full_page("");
    assert!(page.header.is_none());
    assert!(page.footer.is_none());
    assert!(page.sections.is_empty());
    assert_eq!(page.colors, ThemeColors::default());
    assert_eq!(page.fonts, ThemeFonts::default());
    assert!(page.css_variables.is_empty());
}

#[test]
fn test_universal_reset_keeps_section_padding() {
    let html = r#"
        <style>* { margin: 0; padding: 0; box-sizing: border-box; }</style>
        <main><section class="hero"><h1>Hi</h1></section></main>
    "#;
    let page = parse_full_page(html);
    let hero = &page.sections[0];
    assert_eq!(
        hero.attrs.get("padding"),
        Some(&AttrValue::Spacing(Spacing::vertical("80px")))
    );
    let heading = &hero.children[0].columns()[0].children[0];
    assert!(heading.attr("margin").is_none());
    assert!(heading.attr("padding").is_none());
}
