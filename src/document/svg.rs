use std::fmt::Write as _;

use anyhow::Context as _;

use crate::{
    document::model::Document,
    foundation::core::{BezPath, PathEl, Point},
    foundation::error::RidgeResult,
    foundation::math::{fixed2, shortest},
    synth::row::NUM_POINTS,
};

/// Serialize `doc` to a standalone SVG document.
///
/// Layout: XML declaration, `<svg>` root sized to the canvas, one background `<rect>`, then a
/// mask `<path>` and a stroke `<path>` per row in paint order, then `</svg>`. The output ends
/// without a trailing newline and is byte-identical for identical documents.
pub fn serialize(doc: &Document) -> String {
    let mut out = String::with_capacity(capacity_hint(doc.pairs.len()));
    let w = shortest(doc.canvas.width);
    let h = shortest(doc.canvas.height);

    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    let _ = writeln!(
        out,
        "<svg width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\" xmlns=\"http://www.w3.org/2000/svg\">"
    );
    let _ = writeln!(
        out,
        "  <rect width=\"{w}\" height=\"{h}\" fill=\"{}\"/>",
        doc.background
    );

    let stroke_width = shortest(doc.stroke.width);
    for pair in &doc.pairs {
        let _ = writeln!(
            out,
            "  <path d=\"{}\" fill=\"{}\" stroke=\"none\"/>",
            path_data(&pair.mask),
            doc.background
        );
        let _ = writeln!(
            out,
            "  <path d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{stroke_width}\" stroke-linecap=\"round\" stroke-linejoin=\"round\"/>",
            path_data(&pair.stroke),
            doc.stroke.color
        );
    }
    out.push_str("</svg>");
    out
}

/// Byte estimate for a document of `rows` rows.
fn capacity_hint(rows: usize) -> usize {
    // ~16 bytes per point (`L 123.45,678.90 `) plus attributes, two paths per row.
    256 + rows * (2 * 16 * NUM_POINTS + 256)
}

/// SVG path data with fixed two-decimal coordinates (`M x,y L x,y ... Z`).
pub fn path_data(path: &BezPath) -> String {
    let mut d = String::new();
    for el in path.elements() {
        if !d.is_empty() {
            d.push(' ');
        }
        match *el {
            PathEl::MoveTo(p) => push_cmd(&mut d, 'M', &[p]),
            PathEl::LineTo(p) => push_cmd(&mut d, 'L', &[p]),
            PathEl::QuadTo(p1, p2) => push_cmd(&mut d, 'Q', &[p1, p2]),
            PathEl::CurveTo(p1, p2, p3) => push_cmd(&mut d, 'C', &[p1, p2, p3]),
            PathEl::ClosePath => d.push('Z'),
        }
    }
    d
}

fn push_cmd(d: &mut String, cmd: char, points: &[Point]) {
    d.push(cmd);
    for p in points {
        d.push(' ');
        d.push_str(&fixed2(p.x));
        d.push(',');
        d.push_str(&fixed2(p.y));
    }
}

/// Stable 64-bit fingerprint (xxh3) of serialized markup.
pub fn fingerprint(markup: &str) -> u64 {
    xxhash_rust::xxh3::xxh3_64(markup.as_bytes())
}

/// Parse markup back with `usvg`, the way an external renderer would read it.
pub fn parse_markup(markup: &str) -> RidgeResult<usvg::Tree> {
    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_str(markup, &opts).context("parse svg tree")?;
    Ok(tree)
}

/// Count path nodes in a parsed tree, descending into groups.
pub fn count_path_nodes(group: &usvg::Group) -> usize {
    let mut n = 0usize;
    for child in group.children() {
        match child {
            usvg::Node::Group(g) => n += count_path_nodes(g.as_ref()),
            usvg::Node::Path(_) => n += 1,
            _ => {}
        }
    }
    n
}

#[cfg(test)]
#[path = "../../tests/unit/document/svg.rs"]
mod tests;
