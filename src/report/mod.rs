pub mod export;
pub mod json;
pub mod md;
pub mod sheets;
pub mod table;

use crate::aggregate::sort_by_role;
use crate::error::ShaftError;
use crate::scan::BatchLoad;
use crate::taxonomy::Taxonomy;
use crate::types::summary::{ModelSummary, RejectedDocument, RoleLeaders, RunSummary};
use crate::weight::WeightModel;
use chrono::NaiveDate;
use std::path::Path;

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Md,
}

pub fn render(summary: &RunSummary<'_>, format: OutputFormat) -> Result<String, ShaftError> {
    match format {
        OutputFormat::Json => json::to_json(summary).map_err(ShaftError::Json),
        OutputFormat::Md => Ok(md::to_markdown(summary)),
    }
}

/// Export name for `dir`: `_<dir name>-<suffix>`.
pub fn export_name(dir: &Path, suffix: &str) -> String {
    let base = dir
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "history".to_string());
    format!("_{base}-{suffix}")
}

/// Builds the console summary: the top `top` officials of every crew-head
/// role and every family, per model.
pub fn summarize<'a>(
    directory: &Path,
    freeze_date: NaiveDate,
    batch: &'a BatchLoad,
    models: &[WeightModel],
    taxonomy: &Taxonomy,
    top: usize,
    exports: Vec<String>,
) -> RunSummary<'a> {
    let featured: Vec<&str> = taxonomy
        .crew_heads()
        .iter()
        .map(String::as_str)
        .chain(taxonomy.families().iter().map(|family| family.name.as_str()))
        .collect();

    let models = models
        .iter()
        .map(|model| ModelSummary {
            name: model.name.clone(),
            leaders: featured
                .iter()
                .map(|role| RoleLeaders {
                    role: (*role).to_string(),
                    officials: sort_by_role(&batch.loaded, role, &model.name, taxonomy, true)
                        .into_iter()
                        .take(top)
                        .collect(),
                })
                .collect(),
        })
        .collect();

    RunSummary {
        directory: directory.display().to_string(),
        freeze_date,
        loaded: batch.loaded.len(),
        rejected: batch
            .rejected
            .iter()
            .map(|rejection| RejectedDocument {
                source: rejection.source.clone(),
                reason: rejection.reason.to_string(),
            })
            .collect(),
        models,
        exports,
    }
}
