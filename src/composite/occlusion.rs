//! Row compositing.
//!
//! Each row becomes a mask (filled with the background color) followed by its stroke. A
//! renderer paints in document order, so row `i`'s mask covers whatever rows `0..i` drew inside
//! row `i`'s band before row `i`'s own stroke lands on top. Mask and stroke must stay adjacent
//! and in that order.

use crate::{
    foundation::core::{BezPath, Point},
    synth::row::Row,
};

/// How far below its baseline a mask extends, in multiples of the row spacing.
///
/// Not derived from amplitude: a following row that rises more than half a spacing above its
/// own baseline can leave a seam.
pub const MASK_DEPTH_FACTOR: f64 = 1.5;

/// The two paths emitted for one row.
#[derive(Clone, Debug)]
pub struct PathPair {
    /// Row index this pair was built from.
    pub index: u32,
    /// Closed occlusion polygon: the curve, then down to the mask floor and back.
    pub mask: BezPath,
    /// Open polyline through every sampled point.
    pub stroke: BezPath,
}

/// Build the mask and stroke paths for `row`.
pub fn composite_row(row: &Row, row_spacing: f64) -> PathPair {
    let stroke = polyline(&row.points);

    let mut mask = stroke.clone();
    if let (Some(first), Some(last)) = (row.points.first(), row.points.last()) {
        let floor = row.baseline + row_spacing * MASK_DEPTH_FACTOR;
        mask.line_to(Point::new(last.x, floor));
        mask.line_to(Point::new(first.x, floor));
        mask.close_path();
    }

    PathPair {
        index: row.index,
        mask,
        stroke,
    }
}

/// Composite every row, preserving row order.
pub fn composite_rows(rows: &[Row], row_spacing: f64) -> Vec<PathPair> {
    rows.iter().map(|r| composite_row(r, row_spacing)).collect()
}

fn polyline(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    let mut it = points.iter();
    if let Some(first) = it.next() {
        path.move_to(*first);
        for p in it {
            path.line_to(*p);
        }
    }
    path
}

#[cfg(test)]
#[path = "../../tests/unit/composite/occlusion.rs"]
mod tests;
