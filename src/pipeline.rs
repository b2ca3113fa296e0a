use chrono::NaiveDateTime;
use rand::Rng;
use rayon::prelude::*;

use crate::{
    composite::occlusion::composite_rows,
    config::model::Configuration,
    document::model::Document,
    document::svg::{fingerprint, serialize},
    encode::sink::{DocumentSink, SaveReceipt, SaveRequest},
    foundation::error::{RidgeError, RidgeResult},
    synth::row::{Row, RowSynthesizer},
    synth::stream::{StreamMode, resolve_seed, row_substream, run_stream},
};

#[derive(Clone, Debug, Default)]
/// Stream layout and threading controls for one generation run.
pub struct GenerateOpts {
    /// How random draws are distributed over rows.
    pub stream: StreamMode,
    /// Synthesize rows on a rayon pool. Requires [`StreamMode::PerRow`].
    pub parallel: bool,
    /// Optional explicit worker thread count (parallel mode only).
    pub threads: Option<usize>,
}

/// Generate a document from `config` with the reference single-stream layout.
///
/// Pipeline:
/// 1. validate the configuration (nothing is sampled when it is invalid)
/// 2. synthesize every row from one stream seeded with `config.seed`
/// 3. composite each row into a mask/stroke pair
pub fn generate(config: &Configuration) -> RidgeResult<Document> {
    generate_with_opts(config, &GenerateOpts::default())
}

/// Generate a document with explicit stream/threading options.
#[tracing::instrument(skip(config), fields(rows = config.row_count))]
pub fn generate_with_opts(config: &Configuration, opts: &GenerateOpts) -> RidgeResult<Document> {
    config.validate()?;
    if opts.parallel && opts.stream != StreamMode::PerRow {
        return Err(RidgeError::invalid(
            "parallel",
            "requires per-row streams (StreamMode::PerRow)",
        ));
    }

    let seed = resolve_seed(config.seed);
    tracing::debug!(seed, stream = ?opts.stream, parallel = opts.parallel, "generating");

    let rows = match opts.stream {
        StreamMode::Shared => {
            let mut rng = run_stream(seed);
            synthesize_shared(config, &mut rng)?
        }
        StreamMode::PerRow if opts.parallel => {
            let pool = build_thread_pool(opts.threads)?;
            synthesize_per_row_parallel(config, seed, &pool)?
        }
        StreamMode::PerRow => synthesize_per_row(config, seed)?,
    };

    Ok(assemble(config, seed, opts.stream, rows))
}

/// Generate a document by consuming `rng` row after row.
///
/// `seed_label` is only recorded on the document; the caller owns how `rng` was seeded.
pub fn generate_with_rng<R: Rng + ?Sized>(
    config: &Configuration,
    seed_label: u64,
    rng: &mut R,
) -> RidgeResult<Document> {
    let rows = synthesize_shared(config, rng)?;
    Ok(assemble(config, seed_label, StreamMode::Shared, rows))
}

/// Result of [`render_to_sink`].
#[derive(Clone, Debug)]
pub struct RenderOutcome {
    /// The generated document.
    pub document: Document,
    /// xxh3 fingerprint of the serialized markup.
    pub fingerprint: u64,
    /// Where the sink put it.
    pub receipt: SaveReceipt,
}

/// Generate, serialize and hand the markup to `sink`, labelled with the resolved seed.
///
/// Invalid configurations fail before the sink is touched.
#[tracing::instrument(skip(config, opts, sink))]
pub fn render_to_sink(
    config: &Configuration,
    opts: &GenerateOpts,
    sink: &mut dyn DocumentSink,
    timestamp: NaiveDateTime,
) -> RidgeResult<RenderOutcome> {
    let document = generate_with_opts(config, opts)?;
    let markup = serialize(&document);
    let receipt = sink.save(&SaveRequest {
        markup: &markup,
        label: document.seed.to_string(),
        timestamp,
    })?;
    Ok(RenderOutcome {
        fingerprint: fingerprint(&markup),
        document,
        receipt,
    })
}

fn synthesize_shared<R: Rng + ?Sized>(config: &Configuration, rng: &mut R) -> RidgeResult<Vec<Row>> {
    let synth = RowSynthesizer::new(config)?;
    warn_on_overflow(config);
    Ok((0..config.row_count)
        .map(|i| synth.synthesize(i, rng))
        .collect())
}

fn synthesize_per_row(config: &Configuration, seed: u64) -> RidgeResult<Vec<Row>> {
    let synth = RowSynthesizer::new(config)?;
    warn_on_overflow(config);
    Ok((0..config.row_count)
        .map(|i| synth.synthesize(i, &mut row_substream(seed, i)))
        .collect())
}

fn synthesize_per_row_parallel(
    config: &Configuration,
    seed: u64,
    pool: &rayon::ThreadPool,
) -> RidgeResult<Vec<Row>> {
    let synth = RowSynthesizer::new(config)?;
    warn_on_overflow(config);
    Ok(pool.install(|| {
        (0..config.row_count)
            .into_par_iter()
            .map(|i| synth.synthesize(i, &mut row_substream(seed, i)))
            .collect()
    }))
}

fn assemble(config: &Configuration, seed: u64, stream: StreamMode, rows: Vec<Row>) -> Document {
    let pairs = composite_rows(&rows, config.row_spacing);
    Document::new(config.canvas(), config.stroke_width, seed, stream, pairs)
}

fn warn_on_overflow(config: &Configuration) {
    if config.overflows_canvas() {
        tracing::warn!(
            rows = config.row_count,
            spacing = config.row_spacing,
            height = config.height,
            "row stack is taller than the canvas; outer rows will be clipped"
        );
    }
}

fn build_thread_pool(threads: Option<usize>) -> RidgeResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(RidgeError::invalid("threads", "must be >= 1 when set"));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| RidgeError::Other(anyhow::anyhow!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../tests/unit/pipeline.rs"]
mod tests;
