use crate::types::summary::RunSummary;

pub fn to_json(summary: &RunSummary<'_>) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(summary)
}
