//! ridgeplot generates seeded ridge-plot line drawings as plotter-ready SVG.
//!
//! A drawing is a stack of horizontal rows. Each row is a sampled curve made of a few broad
//! waves, a handful of Gaussian peaks clustered around the middle, and fine noise. Every row is
//! emitted as an opaque mask followed by its stroke, so rows lower on the page hide the parts of
//! the rows above that fall behind them.
//!
//! # Pipeline overview
//!
//! 1. **Configure**: build or load a [`Configuration`] and [`validate`](Configuration::validate) it
//! 2. **Synthesize**: one [`Row`] per index from a seeded ChaCha8 stream ([`RowSynthesizer`])
//! 3. **Composite**: each row becomes a mask/stroke [`PathPair`] ([`composite_row`])
//! 4. **Assemble**: [`serialize`] the [`Document`] to SVG text, optionally through a
//!    [`DocumentSink`]
//!
//! Output is byte-identical for a given configuration and seed.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod composite;
mod config;
mod document;
mod encode;
mod foundation;
mod pipeline;
mod synth;

pub use composite::occlusion::{MASK_DEPTH_FACTOR, PathPair, composite_row, composite_rows};
pub use config::model::{Configuration, REFERENCE_SIGMA, ShapeParams, WaveStyle};
pub use config::presets::{CANVAS_PRESET_NAMES, CanvasPreset};
pub use document::model::{Document, StrokeStyle};
pub use document::svg::{count_path_nodes, fingerprint, parse_markup, path_data, serialize};
pub use encode::sink::{
    DirSink, DocumentSink, FileSink, InMemorySink, SavePayload, SaveReceipt, SaveRequest,
    SaveResponse, SavedDocument, TIMESTAMP_FORMAT, ensure_parent_dir,
};
pub use foundation::core::{
    BACKGROUND_FILL, Band, BezPath, Canvas, CountRange, INK_COLOR, PathEl, Point, Rect,
};
pub use foundation::error::{RidgeError, RidgeResult};
pub use pipeline::{
    GenerateOpts, RenderOutcome, generate, generate_with_opts, generate_with_rng, render_to_sink,
};
pub use synth::profile::{Peak, RowProfile, Wave};
pub use synth::row::{NUM_POINTS, Row, RowSynthesizer};
pub use synth::stream::{StreamMode, resolve_seed, row_substream, run_stream};
