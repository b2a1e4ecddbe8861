use super::{Cell, Sheet, Workbook, WorkbookReader};
use crate::error::{Result, ShaftError};
use chrono::NaiveDate;
use serde::Deserialize;
use std::path::Path;

/// Reads workbook exports of the form
/// `{"sheets": [{"name": "Summary", "rows": [[null, "text", 3, {"date": "2019-05-06"}]]}]}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonWorkbookReader;

#[derive(Debug, Deserialize)]
struct RawWorkbook {
    sheets: Vec<RawSheet>,
}

#[derive(Debug, Deserialize)]
struct RawSheet {
    name: String,
    #[serde(default)]
    rows: Vec<Vec<Option<RawCell>>>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawCell {
    Date { date: String },
    Number(f64),
    Text(String),
    Bool(bool),
}

impl From<Option<RawCell>> for Cell {
    fn from(raw: Option<RawCell>) -> Self {
        match raw {
            None => Cell::Empty,
            Some(RawCell::Number(number)) => Cell::Number(number),
            Some(RawCell::Text(text)) => Cell::Text(text),
            Some(RawCell::Bool(flag)) => Cell::Text(flag.to_string()),
            Some(RawCell::Date { date }) => match NaiveDate::parse_from_str(&date, "%Y-%m-%d") {
                Ok(date) => Cell::Date(date),
                Err(e) => Cell::Error(format!("bad date {date:?}: {e}")),
            },
        }
    }
}

pub fn parse_workbook(identifier: &str, content: &str) -> Result<Workbook> {
    let raw: RawWorkbook = serde_json::from_str(content)?;
    let sheets = raw
        .sheets
        .into_iter()
        .map(|sheet| {
            let rows = sheet
                .rows
                .into_iter()
                .map(|row| row.into_iter().map(Cell::from).collect())
                .collect();
            Sheet::new(sheet.name, rows)
        })
        .collect();
    Ok(Workbook {
        identifier: identifier.to_string(),
        sheets,
    })
}

impl WorkbookReader for JsonWorkbookReader {
    fn read(&self, path: &Path) -> Result<Workbook> {
        let identifier = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let content = std::fs::read_to_string(path)?;
        parse_workbook(&identifier, &content).map_err(|e| ShaftError::UnreadableDocument {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }
}
