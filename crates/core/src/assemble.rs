//! Builds `Section > Row > Column` structure around classified modules.

use crate::classify::{classify, classify_children, code};
use crate::context::ParseContext;
use crate::dom::DomNode;
use crate::layout::ColumnLayout;
use crate::model::{
    AttrValue, Attrs, Column, Document, Fraction, LayoutRatio, Module, ModuleVariant, Row, Section,
};
use crate::style_map::StyleTarget;

/// Alt text of the image module created for a featured image.
pub const FEATURED_IMAGE_ALT: &str = "Featured Image";

/// Collapse every run of adjacent `text` modules into one. Runs of one are
/// kept as they are; longer runs become a new module with a fresh id, the
/// concatenated content and the union of the other attributes (the first
/// module wins on conflicts).
pub fn merge_text_modules(ctx: &mut ParseContext<'_>, modules: Vec<Module>) -> Vec<Module> {
    let mut out = Vec::with_capacity(modules.len());
    let mut run: Vec<Module> = Vec::new();

    for module in modules {
        if module.variant == ModuleVariant::Text {
            run.push(module);
        } else {
            flush_text_run(ctx, &mut run, &mut out);
            out.push(module);
        }
    }
    flush_text_run(ctx, &mut run, &mut out);
    out
}

fn flush_text_run(ctx: &mut ParseContext<'_>, run: &mut Vec<Module>, out: &mut Vec<Module>) {
    match run.len() {
        0 => {}
        1 => out.extend(run.drain(..)),
        _ => {
            let mut merged = ctx.module(ModuleVariant::Text);
            let mut content = String::new();
            for module in run.drain(..) {
                for (key, value) in module.attrs {
                    if key == "content" {
                        if let AttrValue::Text(part) = value {
                            content.push_str(&part);
                        }
                    } else {
                        merged.attrs.entry(key).or_insert(value);
                    }
                }
            }
            merged.set_attr("content", content);
            out.push(merged);
        }
    }
}

/// Whether sanitized markup was produced by the builder itself.
pub fn is_structured(ctx: &ParseContext<'_>, markup: &str) -> bool {
    ctx.config
        .structured_markers
        .iter()
        .any(|marker| !marker.is_empty() && markup.contains(marker.as_str()))
}

/// A row holding `modules` in one full-width column, or nothing when there
/// are no modules.
pub fn single_row(ctx: &mut ParseContext<'_>, modules: Vec<Module>) -> Option<Row> {
    let modules = merge_text_modules(ctx, modules);
    if modules.is_empty() {
        return None;
    }
    let column_id = ctx.next_id("column");
    let column = Column::new(column_id, Fraction::FULL, modules);
    let row_id = ctx.next_id("row");
    Some(Row::new(row_id, vec![column], ctx.config.column_gap))
}

/// A row with one column per non-empty group. Groups outside the supported
/// column counts collapse into a single column.
pub fn column_row(ctx: &mut ParseContext<'_>, groups: Vec<Vec<Module>>) -> Option<Row> {
    let groups: Vec<Vec<Module>> = groups
        .into_iter()
        .map(|g| merge_text_modules(ctx, g))
        .filter(|g| !g.is_empty())
        .collect();

    let Some(ratio) = LayoutRatio::equal(groups.len()) else {
        return single_row(ctx, groups.into_iter().flatten().collect());
    };
    widths_row(ctx, ratio.0.into_iter().zip(groups).collect())
}

/// A row from explicit `(width, modules)` columns.
pub fn widths_row(ctx: &mut ParseContext<'_>, columns: Vec<(Fraction, Vec<Module>)>) -> Option<Row> {
    if columns.is_empty() {
        return None;
    }
    let columns = columns
        .into_iter()
        .map(|(width, modules)| {
            let id = ctx.next_id("column");
            Column::new(id, width, modules)
        })
        .collect();
    let row_id = ctx.next_id("row");
    Some(Row::new(row_id, columns, ctx.config.column_gap))
}

/// Rows for the content of `node`: detected column groups become
/// multi-column rows, everything around them single-column rows.
pub fn rows_for(ctx: &mut ParseContext<'_>, node: &DomNode) -> Vec<Row> {
    if let Some(layout) = ctx.detect_columns(node) {
        return rows_toward(ctx, node, &layout);
    }
    if let Some(inner) = node.sole_container_child() {
        return rows_for(ctx, inner);
    }
    let modules = classify_children(ctx, node);
    single_row(ctx, modules).into_iter().collect()
}

/// Walk from `node` down to the layout's host, turning the content passed on
/// the way into single-column rows.
fn rows_toward(ctx: &mut ParseContext<'_>, node: &DomNode, layout: &ColumnLayout<'_>) -> Vec<Row> {
    if layout.is_hosted_by(node) {
        return rows_around_columns(ctx, node, layout);
    }

    let mut rows = Vec::new();
    let mut pending = Vec::new();
    for child in &node.children {
        if child.contains(layout.host) {
            rows.extend(single_row(ctx, std::mem::take(&mut pending)));
            rows.extend(rows_toward(ctx, child, layout));
        } else {
            pending.extend(classify(ctx, child).into_modules());
        }
    }
    rows.extend(single_row(ctx, pending));
    rows
}

fn rows_around_columns(ctx: &mut ParseContext<'_>, host: &DomNode, layout: &ColumnLayout<'_>) -> Vec<Row> {
    let column_index =
        |child: &DomNode| layout.columns.iter().position(|c| std::ptr::eq(*c, child));
    let last_column_at = host
        .children
        .iter()
        .rposition(|child| column_index(child).is_some());

    let mut before = Vec::new();
    let mut groups: Vec<Vec<Module>> = vec![Vec::new(); layout.columns.len()];
    let mut after = Vec::new();
    let mut current: Option<usize> = None;

    for (position, child) in host.children.iter().enumerate() {
        if let Some(index) = column_index(child) {
            groups[index].extend(classify(ctx, child).into_modules());
            current = Some(index);
            continue;
        }
        let modules = classify(ctx, child).into_modules();
        match current {
            None => before.extend(modules),
            Some(_) if last_column_at.is_some_and(|last| position > last) => after.extend(modules),
            Some(index) => groups[index].extend(modules),
        }
    }

    let mut rows = Vec::new();
    rows.extend(single_row(ctx, before));
    rows.extend(column_row(ctx, groups));
    rows.extend(single_row(ctx, after));
    rows
}

/// Section attributes shared by every generated content section.
pub fn base_section_attrs(ctx: &ParseContext<'_>) -> Attrs {
    let mut attrs = Attrs::new();
    attrs.insert("fullwidth".into(), false.into());
    attrs.insert("inner_width".into(), ctx.config.section_inner_width.into());
    attrs
}

pub fn section(ctx: &mut ParseContext<'_>, attrs: Attrs, rows: Vec<Row>) -> Section {
    let id = ctx.next_id("section");
    Section::new(id, attrs, rows)
}

/// One section holding `rows`, or the empty document when there are none.
pub fn document_from_rows(ctx: &mut ParseContext<'_>, attrs: Attrs, rows: Vec<Row>) -> Document {
    if rows.is_empty() {
        return Document::empty();
    }
    let section = section(ctx, attrs, rows);
    Document::new(vec![section])
}

/// The whole sanitized markup as a single `code` module.
pub fn opaque_document(ctx: &mut ParseContext<'_>, markup: &str) -> Document {
    let module = code(ctx, markup.to_string());
    let rows = single_row(ctx, vec![module]).into_iter().collect();
    let attrs = base_section_attrs(ctx);
    document_from_rows(ctx, attrs, rows)
}

/// Full reconstruction of a loaded tree.
pub fn build_document(ctx: &mut ParseContext<'_>, root: &DomNode, featured_image: Option<&str>) -> Document {
    let mut rows = rows_for(ctx, root);

    if let Some(src) = featured_image.map(str::trim).filter(|s| !s.is_empty()) {
        let image = ctx
            .module(ModuleVariant::Image)
            .with_attr("src", src)
            .with_attr("alt", FEATURED_IMAGE_ALT)
            .with_attr("align", "center");
        let first_is_single = rows.first().is_some_and(|r| r.columns().len() == 1);
        if first_is_single {
            rows[0].prepend_to_first_column(vec![image]);
        } else if let Some(row) = single_row(ctx, vec![image]) {
            rows.insert(0, row);
        }
    }

    let mut attrs = base_section_attrs(ctx);
    if let Some(wrapper) = root.sole_container_child() {
        attrs.extend(ctx.styles(wrapper, StyleTarget::Section));
    }
    document_from_rows(ctx, attrs, rows)
}
