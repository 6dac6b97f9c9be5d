use crate::{Document, Index};
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{create_dir_all, File};
use std::io::{BufRead, BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

pub const META_VERSION: u32 = 1;

/// Operator-facing summary written next to an index snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaFile {
    pub num_docs: u32,
    pub num_terms: u32,
    pub created_at: String,
    pub version: u32,
}

impl MetaFile {
    /// `num_docs` comes from the builder: documents without a single term
    /// still count even though no posting list mentions them.
    pub fn new(num_docs: usize, num_terms: usize) -> Self {
        Self {
            num_docs: u32::try_from(num_docs).unwrap_or(u32::MAX),
            num_terms: u32::try_from(num_terms).unwrap_or(u32::MAX),
            created_at: time::OffsetDateTime::now_utc()
                .format(&time::format_description::well_known::Rfc3339)
                .unwrap_or_default(),
            version: META_VERSION,
        }
    }
}

/// What to do when a snapshot file does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingSnapshot {
    /// Log a warning and continue with an empty value.
    #[default]
    Empty,
    /// Treat the missing file as an error.
    Fail,
}

/// `inverted_index.json` -> `inverted_index.meta.json`
pub fn meta_path_for(index_path: &Path) -> PathBuf {
    let stem = index_path.file_stem().and_then(|s| s.to_str()).unwrap_or("index");
    index_path.with_file_name(format!("{stem}.meta.json"))
}

fn create_parent(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    Ok(())
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T, pretty: bool) -> Result<()> {
    create_parent(path)?;
    let f = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut w = BufWriter::new(f);
    if pretty {
        serde_json::to_writer_pretty(&mut w, value)?;
    } else {
        serde_json::to_writer(&mut w, value)?;
    }
    w.flush()?;
    Ok(())
}

/// Opens a snapshot, mapping "not found" to `None` unless `missing` says to fail.
fn open_snapshot(path: &Path, missing: MissingSnapshot, what: &str) -> Result<Option<File>> {
    match File::open(path) {
        Ok(f) => Ok(Some(f)),
        Err(e) if e.kind() == ErrorKind::NotFound => match missing {
            MissingSnapshot::Empty => {
                tracing::warn!(path = %path.display(), "{what} snapshot not found, continuing empty");
                Ok(None)
            }
            MissingSnapshot::Fail => bail!("{what} snapshot {} does not exist", path.display()),
        },
        Err(e) => Err(e).with_context(|| format!("opening {}", path.display())),
    }
}

pub fn save_corpus(path: &Path, docs: &[Document]) -> Result<()> {
    write_json(path, docs, true)
}

/// Load a corpus snapshot: a JSON array of documents, or one document per
/// line when the file extension is `jsonl`.
pub fn load_corpus(path: &Path, missing: MissingSnapshot) -> Result<Vec<Document>> {
    let Some(f) = open_snapshot(path, missing, "corpus")? else {
        return Ok(Vec::new());
    };
    let reader = BufReader::new(f);
    if path.extension().and_then(|s| s.to_str()) == Some("jsonl") {
        let mut docs = Vec::new();
        for (lineno, line) in reader.lines().enumerate() {
            let line = line.with_context(|| format!("reading {} line {}", path.display(), lineno + 1))?;
            if line.trim().is_empty() { continue; }
            let doc: Document = serde_json::from_str(&line)
                .with_context(|| format!("parsing {} line {}", path.display(), lineno + 1))?;
            docs.push(doc);
        }
        Ok(docs)
    } else {
        serde_json::from_reader(reader).with_context(|| format!("parsing corpus {}", path.display()))
    }
}

/// Write the index as a JSON object with keys in sorted order.
pub fn save_index(path: &Path, index: &Index) -> Result<()> {
    let sorted: BTreeMap<&str, &[String]> = index.terms().collect();
    write_json(path, &sorted, false)
}

pub fn load_index(path: &Path, missing: MissingSnapshot) -> Result<Index> {
    let Some(f) = open_snapshot(path, missing, "index")? else {
        return Ok(Index::new());
    };
    serde_json::from_reader(BufReader::new(f)).with_context(|| format!("parsing index {}", path.display()))
}

pub fn save_meta(path: &Path, meta: &MetaFile) -> Result<()> {
    write_json(path, meta, true)
}

/// The sidecar is informational, so a missing file is simply `None`.
pub fn load_meta(path: &Path) -> Result<Option<MetaFile>> {
    let f = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e).with_context(|| format!("opening {}", path.display())),
    };
    let meta = serde_json::from_reader(BufReader::new(f)).with_context(|| format!("parsing {}", path.display()))?;
    Ok(Some(meta))
}
