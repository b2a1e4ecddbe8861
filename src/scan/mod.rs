pub mod filesystem;

use crate::error::{Result, ShaftError};
use crate::normalize::{self, RejectReason};
use crate::record::Official;
use crate::taxonomy::Taxonomy;
use crate::types::config::RunConfig;
use crate::workbook::WorkbookReader;
use chrono::NaiveDate;
use filesystem::{file_name, list_files};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Output files of this tool start with an underscore.
pub const OUTPUT_PREFIX: char = '_';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub source: String,
    pub reason: RejectReason,
}

#[derive(Debug, Clone, Default)]
pub struct BatchLoad {
    pub loaded: Vec<Official>,
    pub rejected: Vec<Rejection>,
}

/// Files in `dir` that look like history documents.
pub fn candidate_files(dir: &Path, run: &RunConfig) -> Vec<PathBuf> {
    let suffix = format!(".{}", run.extension.trim_start_matches('.'));
    list_files(dir)
        .into_iter()
        .filter(|path| {
            let name = file_name(path);
            !name.starts_with(OUTPUT_PREFIX)
                && name.chars().count() >= run.min_filename_len
                && name.ends_with(&suffix)
        })
        .collect()
}

/// Loads every candidate document in `dir`, one at a time.
pub fn load_directory(
    dir: &Path,
    reader: &dyn WorkbookReader,
    freeze: NaiveDate,
    taxonomy: &Taxonomy,
    run: &RunConfig,
) -> Result<BatchLoad> {
    if !dir.exists() {
        return Err(ShaftError::PathNotFound(dir.display().to_string()));
    }
    if !dir.is_dir() {
        return Err(ShaftError::NotADirectory(dir.display().to_string()));
    }

    let mut batch = BatchLoad::default();
    for path in candidate_files(dir, run) {
        debug!(file = %path.display(), "loading history document");
        match normalize::load_document(reader, &path, freeze, taxonomy) {
            Ok(official) => batch.loaded.push(official),
            Err(reason) => {
                warn!(file = %path.display(), %reason, "rejected history document");
                batch.rejected.push(Rejection {
                    source: file_name(&path),
                    reason,
                });
            }
        }
    }
    info!(
        loaded = batch.loaded.len(),
        rejected = batch.rejected.len(),
        "finished loading {}",
        dir.display()
    );
    Ok(batch)
}
