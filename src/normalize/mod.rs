//! Officiating history documents in, canonical officials out.
//!
//! Each document is classified into one of a closed set of layouts; the layout
//! decides where the header metadata lives, while the history tabs share one
//! row format. Bad rows are skipped, bad documents are rejected.

pub mod date;
pub mod header;
pub mod rows;
pub mod version;

use crate::error::ShaftError;
use crate::record::Official;
use crate::taxonomy::Taxonomy;
use crate::workbook::{Workbook, WorkbookReader};
use chrono::NaiveDate;
use rows::HistoryTab;
use std::fmt;
use std::path::Path;
use tracing::debug;
use version::{GAME_HISTORY_TAB, OTHER_HISTORY_TAB, SUMMARY_TAB};

/// Why a whole document contributed no official.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    /// Unknown layout, the legacy layout, or no game history tab.
    UnsupportedVersion,
    Unreadable(String),
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedVersion => f.write_str("unsupported document version"),
            Self::Unreadable(reason) => write!(f, "unreadable document: {reason}"),
        }
    }
}

/// Builds an official from an already-read workbook.
pub fn load_workbook(
    workbook: &Workbook,
    freeze: NaiveDate,
    taxonomy: &Taxonomy,
) -> Result<Official, RejectReason> {
    let version = version::detect(workbook).ok_or(RejectReason::UnsupportedVersion)?;
    let layout = version
        .header_layout()
        .filter(|_| version.is_supported())
        .ok_or(RejectReason::UnsupportedVersion)?;
    let Some(history) = workbook.sheet(GAME_HISTORY_TAB) else {
        debug!(
            document = %workbook.identifier,
            sheets = ?workbook.sheet_names(),
            "no game history tab"
        );
        return Err(RejectReason::UnsupportedVersion);
    };

    let mut official = Official::new(header::official_name(workbook, &layout));
    official.ref_certification =
        header::normalize_certification(workbook.cell(SUMMARY_TAB, layout.ref_cert_cell));
    official.nso_certification =
        header::normalize_certification(workbook.cell(SUMMARY_TAB, layout.nso_cert_cell));

    debug!(
        document = %workbook.identifier,
        official = %official.name,
        ?version,
        "processing games"
    );
    rows::load_tab(&mut official, history, HistoryTab::Games, freeze, taxonomy);
    if let Some(other) = workbook.sheet(OTHER_HISTORY_TAB) {
        rows::load_tab(&mut official, other, HistoryTab::Other, freeze, taxonomy);
    }

    Ok(official)
}

/// Reads and normalizes one file. Read failures become rejections so that a
/// single broken file never stops a batch.
pub fn load_document(
    reader: &dyn WorkbookReader,
    path: &Path,
    freeze: NaiveDate,
    taxonomy: &Taxonomy,
) -> Result<Official, RejectReason> {
    let workbook = reader.read(path).map_err(|e| match e {
        ShaftError::UnreadableDocument { reason, .. } => RejectReason::Unreadable(reason),
        other => RejectReason::Unreadable(other.to_string()),
    })?;
    load_workbook(&workbook, freeze, taxonomy)
}
