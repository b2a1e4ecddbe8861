use crate::aggregate::RoleRanking;
use chrono::NaiveDate;
use serde::Serialize;

/// What one `rank` run loaded, rejected, wrote and ranked.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary<'a> {
    pub directory: String,
    pub freeze_date: NaiveDate,
    pub loaded: usize,
    pub rejected: Vec<RejectedDocument>,
    pub models: Vec<ModelSummary<'a>>,
    pub exports: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedDocument {
    pub source: String,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModelSummary<'a> {
    pub name: String,
    pub leaders: Vec<RoleLeaders<'a>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RoleLeaders<'a> {
    pub role: String,
    pub officials: Vec<RoleRanking<'a>>,
}
