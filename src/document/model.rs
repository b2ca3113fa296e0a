use crate::{
    composite::occlusion::PathPair,
    foundation::core::{BACKGROUND_FILL, Canvas, INK_COLOR},
    synth::stream::StreamMode,
};

/// Paint applied to every visible row.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeStyle {
    /// Stroke color keyword.
    pub color: &'static str,
    /// Stroke width in user units.
    pub width: f64,
}

/// A fully assembled drawing: background plus one mask/stroke pair per row, top row first.
#[derive(Clone, Debug)]
pub struct Document {
    /// Canvas dimensions.
    pub canvas: Canvas,
    /// Fill for the background rectangle and every mask.
    pub background: &'static str,
    /// Paint for the visible rows.
    pub stroke: StrokeStyle,
    /// Seed the document was generated from (resolved when the configuration had none).
    pub seed: u64,
    /// Stream layout used while drawing.
    pub stream: StreamMode,
    /// Row path pairs in paint order.
    pub pairs: Vec<PathPair>,
}

impl Document {
    pub(crate) fn new(
        canvas: Canvas,
        stroke_width: f64,
        seed: u64,
        stream: StreamMode,
        pairs: Vec<PathPair>,
    ) -> Self {
        Self {
            canvas,
            background: BACKGROUND_FILL,
            stroke: StrokeStyle {
                color: INK_COLOR,
                width: stroke_width,
            },
            seed,
            stream,
            pairs,
        }
    }

    /// Number of rows in the drawing.
    pub fn row_count(&self) -> usize {
        self.pairs.len()
    }

    /// Number of drawable elements: the background plus two paths per row.
    pub fn element_count(&self) -> usize {
        1 + 2 * self.pairs.len()
    }

    /// Serialize to SVG markup. See [`crate::serialize`].
    pub fn to_svg(&self) -> String {
        crate::document::svg::serialize(self)
    }
}
