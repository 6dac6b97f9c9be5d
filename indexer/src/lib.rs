use anyhow::Result;
use minisearch_core::persist::{load_corpus, meta_path_for, save_index, save_meta, MetaFile, MissingSnapshot};
use minisearch_core::IndexBuilder;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Corpus files under `input`: the file itself, or every `.json`/`.jsonl`
/// file below a directory in path order. Index snapshots and their
/// sidecars are never mistaken for corpus files.
pub fn corpus_files(input: &Path, output: &Path) -> Vec<PathBuf> {
    if !input.is_dir() {
        return vec![input.to_path_buf()];
    }
    let mut files: Vec<PathBuf> = WalkDir::new(input)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|p| p.is_file())
        .filter(|p| matches!(p.extension().and_then(|s| s.to_str()), Some("json" | "jsonl")))
        .filter(|p| !p.to_string_lossy().ends_with(".meta.json"))
        .collect();
    let meta = meta_path_for(output);
    files.retain(|p| !same_file(p, output) && !same_file(p, &meta));
    files
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Read corpus snapshot(s), build the inverted index and write the index
/// snapshot plus its metadata sidecar.
pub fn build_index(input: &Path, output: &Path, missing: MissingSnapshot) -> Result<MetaFile> {
    let mut builder = IndexBuilder::new();
    for file in corpus_files(input, output) {
        let docs = load_corpus(&file, missing)?;
        tracing::info!(file = %file.display(), docs = docs.len(), "indexing corpus file");
        builder.extend(&docs);
    }
    if builder.duplicate_docs() > 0 {
        tracing::warn!(duplicates = builder.duplicate_docs(), "corpus contained repeated urls");
    }

    let num_docs = builder.num_docs();
    let index = builder.finish();
    let meta = MetaFile::new(num_docs, index.num_terms());
    tracing::info!(num_docs = meta.num_docs, num_terms = meta.num_terms, "built index");

    save_index(output, &index)?;
    save_meta(&meta_path_for(output), &meta)?;
    tracing::info!(output = %output.display(), "index build complete");
    Ok(meta)
}
