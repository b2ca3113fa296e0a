use std::{
    fs::{self, File},
    io::{self, Write as _},
    path::{Path, PathBuf},
};

use chrono::NaiveDateTime;

use crate::foundation::error::{RidgeError, RidgeResult};

/// Filename timestamp layout used by [`DirSink`].
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H-%M-%S";

/// One serialized document handed to a sink.
#[derive(Debug, Clone)]
pub struct SaveRequest<'a> {
    /// Serialized SVG markup.
    pub markup: &'a str,
    /// Opaque label, usually the seed.
    pub label: String,
    /// Wall-clock time the save was requested.
    pub timestamp: NaiveDateTime,
}

/// Where a sink put a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveReceipt {
    /// Filename or other sink-specific location.
    pub location: String,
    /// Bytes written.
    pub bytes: usize,
}

/// Sink contract for persisting serialized documents.
///
/// A sink makes a single attempt per request. On failure nothing is left at the target
/// location.
pub trait DocumentSink: Send {
    /// Persist one document.
    fn save(&mut self, req: &SaveRequest<'_>) -> RidgeResult<SaveReceipt>;
}

/// A document captured by [`InMemorySink`].
#[derive(Debug, Clone)]
pub struct SavedDocument {
    /// Label from the request.
    pub label: String,
    /// Timestamp from the request.
    pub timestamp: NaiveDateTime,
    /// Full markup.
    pub markup: String,
}

/// In-memory sink for tests and embedding.
#[derive(Debug, Default)]
pub struct InMemorySink {
    pub(crate) saved: Vec<SavedDocument>,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrow the captured documents, oldest first.
    pub fn saved(&self) -> &[SavedDocument] {
        &self.saved
    }
}

impl DocumentSink for InMemorySink {
    fn save(&mut self, req: &SaveRequest<'_>) -> RidgeResult<SaveReceipt> {
        self.saved.push(SavedDocument {
            label: req.label.clone(),
            timestamp: req.timestamp,
            markup: req.markup.to_string(),
        });
        Ok(SaveReceipt {
            location: format!("memory:{}", self.saved.len() - 1),
            bytes: req.markup.len(),
        })
    }
}

/// Writes every document to one fixed path.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
    overwrite: bool,
}

impl FileSink {
    /// Sink targeting `path`, replacing any existing file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            overwrite: true,
        }
    }

    /// Refuse to replace an existing file when `overwrite` is false.
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Target path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DocumentSink for FileSink {
    fn save(&mut self, req: &SaveRequest<'_>) -> RidgeResult<SaveReceipt> {
        write_atomic(&self.path, req.markup.as_bytes(), self.overwrite)?;
        tracing::info!(path = %self.path.display(), bytes = req.markup.len(), "saved document");
        Ok(SaveReceipt {
            location: self.path.display().to_string(),
            bytes: req.markup.len(),
        })
    }
}

/// Writes each document into a directory as `<prefix>_seed<label>_<timestamp>.svg`.
#[derive(Debug, Clone)]
pub struct DirSink {
    dir: PathBuf,
    prefix: String,
}

impl DirSink {
    /// Sink writing into `dir` (created on first save) with the `ridgeplot` prefix.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            prefix: "ridgeplot".to_string(),
        }
    }

    /// Replace the filename prefix.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Path a request would be written to.
    pub fn target_for(&self, label: &str, timestamp: NaiveDateTime) -> PathBuf {
        let name = format!(
            "{}_seed{}_{}.svg",
            self.prefix,
            sanitize_label(label),
            timestamp.format(TIMESTAMP_FORMAT)
        );
        self.dir.join(name)
    }
}

impl DocumentSink for DirSink {
    fn save(&mut self, req: &SaveRequest<'_>) -> RidgeResult<SaveReceipt> {
        let path = self.target_for(&req.label, req.timestamp);
        write_atomic(&path, req.markup.as_bytes(), true)?;
        tracing::info!(path = %path.display(), label = %req.label, "saved document");
        Ok(SaveReceipt {
            location: path.display().to_string(),
            bytes: req.markup.len(),
        })
    }
}

/// JSON body accepted by the save endpoint: `{ "svg": "...", "seed": 42 }`.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SavePayload {
    /// Serialized SVG markup.
    pub svg: String,
    /// Seed label; a number or string. Missing seeds are labelled `unknown`.
    #[serde(default)]
    pub seed: Option<serde_json::Value>,
}

impl SavePayload {
    /// Parse a JSON payload.
    pub fn from_json_str(s: &str) -> RidgeResult<Self> {
        serde_json::from_str(s).map_err(|e| RidgeError::serde(format!("parse save payload: {e}")))
    }

    /// Label derived from the seed field.
    pub fn label(&self) -> String {
        match &self.seed {
            None | Some(serde_json::Value::Null) => "unknown".to_string(),
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }

    /// Build a sink request for this payload.
    pub fn request(&self, timestamp: NaiveDateTime) -> SaveRequest<'_> {
        SaveRequest {
            markup: &self.svg,
            label: self.label(),
            timestamp,
        }
    }
}

/// Response body reported after persisting a [`SavePayload`].
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SaveResponse {
    /// Always `true` when produced; failures surface as errors instead.
    pub success: bool,
    /// Where the document was written.
    pub filename: String,
}

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> RidgeResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| RidgeError::io(parent, e))?;
    }
    Ok(())
}

/// Write `bytes` to a `.partial` sibling, then rename it over `path`.
fn write_atomic(path: &Path, bytes: &[u8], overwrite: bool) -> RidgeResult<()> {
    ensure_parent_dir(path)?;
    if !overwrite && path.exists() {
        return Err(RidgeError::io(
            path,
            io::Error::new(io::ErrorKind::AlreadyExists, "refusing to overwrite"),
        ));
    }

    let tmp = partial_path(path);
    let written = File::create(&tmp).and_then(|mut f| {
        f.write_all(bytes)?;
        f.sync_all()
    });
    if let Err(e) = written {
        let _ = fs::remove_file(&tmp);
        return Err(RidgeError::io(&tmp, e));
    }
    fs::rename(&tmp, path).map_err(|e| {
        let _ = fs::remove_file(&tmp);
        RidgeError::io(path, e)
    })
}

fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".partial");
    path.with_file_name(name)
}

fn sanitize_label(label: &str) -> String {
    let s: String = label
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if s.is_empty() { "unknown".to_string() } else { s }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
