//! In-memory view of a spreadsheet: named tabs of rows of typed cells.

pub mod json;

use crate::error::Result;
use chrono::NaiveDate;
use std::path::Path;

static EMPTY_CELL: Cell = Cell::Empty;

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    Date(NaiveDate),
    /// A value that could not be read; treated as no value.
    Error(String),
}

impl Cell {
    /// Trimmed text for string and numeric cells; `None` for anything blank.
    pub fn text(&self) -> Option<String> {
        let value = match self {
            Self::Text(text) => text.trim().to_string(),
            Self::Number(number) => number.to_string(),
            Self::Date(date) => date.to_string(),
            Self::Empty | Self::Error(_) => return None,
        };
        (!value.is_empty()).then_some(value)
    }

    pub fn is_blank(&self) -> bool {
        self.text().is_none()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<Vec<Cell>>,
}

impl Sheet {
    pub fn new(name: impl Into<String>, rows: Vec<Vec<Cell>>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    pub fn cell(&self, row: usize, column: usize) -> &Cell {
        self.rows
            .get(row)
            .map_or(&EMPTY_CELL, |cells| cell_at(cells, column))
    }

    /// Looks up an A1-style reference such as `C4`.
    pub fn cell_a1(&self, reference: &str) -> &Cell {
        match parse_a1(reference) {
            Some((row, column)) => self.cell(row, column),
            None => &EMPTY_CELL,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Workbook {
    /// File name the workbook was read from; used as the last-resort name.
    pub identifier: String,
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|sheet| sheet.name.as_str()).collect()
    }

    pub fn has_sheet(&self, name: &str) -> bool {
        self.sheets.iter().any(|sheet| sheet.name == name)
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|sheet| sheet.name == name)
    }

    /// `Empty` when the tab or cell is missing.
    pub fn cell(&self, sheet: &str, reference: &str) -> &Cell {
        self.sheet(sheet)
            .map(|sheet| sheet.cell_a1(reference))
            .unwrap_or(&EMPTY_CELL)
    }
}

/// `Empty` past the end of a short row.
pub fn cell_at(row: &[Cell], column: usize) -> &Cell {
    row.get(column).unwrap_or(&EMPTY_CELL)
}

/// Source of workbooks; one implementation per on-disk format.
pub trait WorkbookReader {
    fn read(&self, path: &Path) -> Result<Workbook>;
}

/// Zero-based (row, column) for a reference like `AB12`.
pub fn parse_a1(reference: &str) -> Option<(usize, usize)> {
    let reference = reference.trim();
    let split = reference.find(|c: char| c.is_ascii_digit())?;
    let (letters, digits) = reference.split_at(split);
    if letters.is_empty() || !letters.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    let column = letters.chars().try_fold(0usize, |acc, c| {
        let value = (c.to_ascii_uppercase() as usize) - ('A' as usize) + 1;
        acc.checked_mul(26)?.checked_add(value)
    })?;
    let row: usize = digits.parse().ok()?;
    if row == 0 {
        return None;
    }
    Some((row - 1, column - 1))
}
