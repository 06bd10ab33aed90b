//! Element classification through the flat module list.

use pretty_assertions::assert_eq;
use sculpt_core::classify::{looks_like_button, strip_markdown, video_source};
use sculpt_core::dom::parse_html;
use sculpt_core::model::{AttrValue, ModuleVariant};
use sculpt_core::parse_to_module_list;

fn variants(html: &str) -> Vec<ModuleVariant> {
    parse_to_module_list(html)
        .iter()
        .map(|m| m.variant)
        .collect()
}

#[test]
fn test_heading_strips_markdown_markers() {
    let modules = parse_to_module_list("<h2>**Bold** and *italic*</h2>");
    assert_eq!(modules.len(), 1);
    assert_eq!(modules[0].variant, ModuleVariant::Heading);
    assert_eq!(modules[0].text_attr("text"), Some("Bold and italic"));
    assert_eq!(modules[0].text_attr("level"), Some("h2"));
}

#[test]
fn test_strip_markdown_underscores() {
    assert_eq!(strip_markdown("__Big__ _news_ today"), "Big news today");
    assert_eq!(strip_markdown("plain * star"), "plain * star");
}

#[test]
fn test_adjacent_paragraphs_merge_into_one_text() {
    let modules = parse_to_module_list("<p>A</p><p>B</p>");
    assert_eq!(modules.len(), 1);
    assert_eq!(modules[0].variant, ModuleVariant::Text);
    assert_eq!(modules[0].text_attr("content"), Some("<p>A</p><p>B</p>"));
}

#[test]
fn test_text_runs_split_by_other_modules() {
    assert_eq!(
        variants(r#"<p>A</p><img src="a.png" alt="A"><p>B</p><p>C</p>"#),
        vec![ModuleVariant::Text, ModuleVariant::Image, ModuleVariant::Text]
    );
}

#[test]
fn test_image_without_src_is_dropped() {
    assert!(parse_to_module_list("<img src='' alt='x'>").is_empty());
    assert!(parse_to_module_list("<img alt='x'>").is_empty());
}

#[test]
fn test_image_attributes() {
    let modules = parse_to_module_list(r#"<img src=" /hero.jpg " alt="Hero">"#);
    assert_eq!(modules[0].variant, ModuleVariant::Image);
    assert_eq!(modules[0].text_attr("src"), Some("/hero.jpg"));
    assert_eq!(modules[0].text_attr("alt"), Some("Hero"));
    assert_eq!(modules[0].text_attr("align"), Some("center"));
}

#[test]
fn test_youtube_iframe_becomes_video() {
    let modules =
        parse_to_module_list(r#"<iframe src="https://www.youtube.com/embed/abc123"></iframe>"#);
    assert_eq!(modules.len(), 1);
    assert_eq!(modules[0].variant, ModuleVariant::Video);
    assert_eq!(modules[0].text_attr("video_type"), Some("youtube"));
    assert_eq!(
        modules[0].text_attr("video_url"),
        Some("https://www.youtube.com/watch?v=abc123")
    );
}

#[test]
fn test_video_source_hosts() {
    assert_eq!(
        video_source("https://youtu.be/xyz_9"),
        Some(("youtube", "https://www.youtube.com/watch?v=xyz_9".to_string()))
    );
    assert_eq!(
        video_source("https://player.vimeo.com/video/76979871"),
        Some(("vimeo", "https://vimeo.com/76979871".to_string()))
    );
    assert_eq!(video_source("https://maps.example.com/embed?q=1"), None);
}

#[test]
fn test_unknown_iframe_is_kept_as_code() {
    let modules = parse_to_module_list(r#"<iframe src="https://maps.example.com/embed"></iframe>"#);
    assert_eq!(modules[0].variant, ModuleVariant::Code);
    assert!(modules[0]
        .text_attr("raw_content")
        .unwrap()
        .starts_with("<iframe"));
}

#[test]
fn test_links_become_buttons_or_text() {
    let modules = parse_to_module_list(
        r#"<a class="btn btn-primary" href="/go" target="_blank">Go now</a>"#,
    );
    assert_eq!(modules[0].variant, ModuleVariant::Button);
    assert_eq!(modules[0].text_attr("text"), Some("Go now"));
    assert_eq!(modules[0].text_attr("link_url"), Some("/go"));
    assert_eq!(modules[0].attr("link_target"), Some(&AttrValue::Bool(true)));

    let modules = parse_to_module_list(r#"<a href="/about">About us</a>"#);
    assert_eq!(modules[0].variant, ModuleVariant::Text);
    assert_eq!(
        modules[0].text_attr("content"),
        Some(r#"<p><a href="/about">About us</a></p>"#)
    );
}

#[test]
fn test_styled_link_looks_like_button() {
    let root = parse_html(
        r##"<a style="background: #000; padding: 12px 24px" href="#">Buy</a><a href="#">Plain</a>"##,
    );
    let links: Vec<_> = root.element_children().collect();
    assert!(looks_like_button(links[0]));
    assert!(!looks_like_button(links[1]));
}

#[test]
fn test_button_href_defaults_to_hash() {
    let modules = parse_to_module_list(r#"<a class="cta">Start</a>"#);
    assert_eq!(modules[0].text_attr("link_url"), Some("#"));
    assert_eq!(modules[0].attr("link_target"), Some(&AttrValue::Bool(false)));
}

#[test]
fn test_lists_and_quotes_keep_their_markup() {
    let modules = parse_to_module_list("<ul><li>One</li><li>Two</li></ul>");
    assert_eq!(modules[0].variant, ModuleVariant::Text);
    assert_eq!(
        modules[0].text_attr("content"),
        Some("<ul><li>One</li><li>Two</li></ul>")
    );
}

#[test]
fn test_rules_code_and_complex_structures() {
    assert_eq!(variants("<hr>"), vec![ModuleVariant::Divider]);
    assert_eq!(variants("<pre>let x = 1;</pre>"), vec![ModuleVariant::Code]);
    assert_eq!(
        variants("<table><tr><td>1</td></tr></table>"),
        vec![ModuleVariant::Code]
    );
    assert_eq!(
        variants(r#"<form action="/s"><input name="q"></form>"#),
        vec![ModuleVariant::Code]
    );
}

#[test]
fn test_inline_elements_wrap_in_paragraph() {
    let modules = parse_to_module_list("<strong>Loud</strong>");
    assert_eq!(
        modules[0].text_attr("content"),
        Some("<p><strong>Loud</strong></p>")
    );
}

#[test]
fn test_loose_text_is_escaped() {
    let modules = parse_to_module_list("Fish &amp; chips");
    assert_eq!(
        modules[0].text_attr("content"),
        Some("<p>Fish &amp; chips</p>")
    );
}

#[test]
fn test_containers_flatten_and_drop_noise() {
    let html = r#"
        <div class="wrap">
            <figure>
                <img src="a.png" alt="">
                <figcaption>Caption text</figcaption>
            </figure>
            <p></p>
            <br>
            <div>   </div>
            <h3>Title</h3>
        </div>
    "#;
    assert_eq!(
        variants(html),
        vec![ModuleVariant::Image, ModuleVariant::Heading]
    );
}

#[test]
fn test_icon_markup_survives_as_text() {
    let modules = parse_to_module_list(r#"<p>Rated</p><i class="fa fa-star"></i>"#);
    assert_eq!(modules.len(), 1);
    assert_eq!(
        modules[0].text_attr("content"),
        Some(r#"<p>Rated</p><p><i class="fa fa-star"></i></p>"#)
    );
}

#[test]
fn test_unknown_tags_with_text_are_demoted() {
    let modules = parse_to_module_list("<details><summary>More</summary>Hidden</details>");
    assert_eq!(modules[0].variant, ModuleVariant::Code);
    assert!(modules[0]
        .text_attr("raw_content")
        .unwrap()
        .contains("<summary>More</summary>"));
}

#[test]
fn test_styles_flow_into_modules() {
    let html = r#"
        <style>.title { font-size: 40px; color: #101010; }</style>
        <h1 class="title" style="color: #ff0000">Styled</h1>
    "#;
    let modules = parse_to_module_list(html);
    assert_eq!(modules.len(), 1);
    let heading = &modules[0];
    assert_eq!(heading.text_attr("font_size"), Some("40px"));
    assert_eq!(heading.text_attr("text_color"), Some("#ff0000"));
    assert_eq!(heading.text_attr("text"), Some("Styled"));
}

#[test]
fn test_structured_markup_becomes_single_code_module() {
    let modules = parse_to_module_list(r#"<div class="tb-section"><h1>Saved</h1></div>"#);
    assert_eq!(modules.len(), 1);
    assert_eq!(modules[0].variant, ModuleVariant::Code);
    assert_eq!(
        modules[0].text_attr("raw_content"),
        Some(r#"<div class="tb-section"><h1>Saved</h1></div>"#)
    );
}
