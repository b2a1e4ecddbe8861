//! Layout detection for the historical officiating history documents.

use crate::workbook::Workbook;

pub const SUMMARY_TAB: &str = "Summary";
pub const INSTRUCTIONS_TAB: &str = "Instructions";
pub const GAME_HISTORY_TAB: &str = "Game History";
pub const OTHER_HISTORY_TAB: &str = "Other History";

const LEGACY_SUMMARY_TAB: &str = "WFTDA Summary";
const LEGACY_REFEREE_TAB: &str = "WFTDA Referee";
const LEGACY_NSO_TAB: &str = "WFTDA NSO";
const LEARN_MORE_TAB: &str = "Learn More";

/// Known document layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentVersion {
    /// Separate WFTDA referee/NSO tabs. Recognized but not supported.
    Legacy,
    Revised2015,
    Revised2016,
    Revised2017,
    /// Third-generation document with a "Learn More" tab.
    Ohd3,
}

/// Cells holding the header metadata for one layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderLayout {
    /// Tried in order; the document identifier is the final fallback.
    pub name_cells: &'static [&'static str],
    pub ref_cert_cell: &'static str,
    pub nso_cert_cell: &'static str,
}

impl DocumentVersion {
    pub fn is_supported(self) -> bool {
        !matches!(self, Self::Legacy)
    }

    pub fn header_layout(self) -> Option<HeaderLayout> {
        match self {
            Self::Legacy => None,
            Self::Revised2015 | Self::Revised2016 | Self::Revised2017 => Some(HeaderLayout {
                name_cells: &["C4", "C3"],
                ref_cert_cell: "C7",
                nso_cert_cell: "C8",
            }),
            Self::Ohd3 => Some(HeaderLayout {
                name_cells: &["C3", "C2", "D3"],
                ref_cert_cell: "C5",
                nso_cert_cell: "C6",
            }),
        }
    }
}

/// Everything the classifier looks at, pulled out of a workbook.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionMarkers {
    pub has_summary: bool,
    pub has_legacy_summary: bool,
    pub has_legacy_role_tabs: bool,
    pub has_learn_more: bool,
    pub has_instructions: bool,
    pub instructions_a1: Option<String>,
    pub instructions_a104: Option<String>,
}

impl VersionMarkers {
    pub fn sniff(workbook: &Workbook) -> Self {
        Self {
            has_summary: workbook.has_sheet(SUMMARY_TAB),
            has_legacy_summary: workbook.has_sheet(LEGACY_SUMMARY_TAB),
            has_legacy_role_tabs: workbook.has_sheet(LEGACY_REFEREE_TAB)
                || workbook.has_sheet(LEGACY_NSO_TAB),
            has_learn_more: workbook.has_sheet(LEARN_MORE_TAB),
            has_instructions: workbook.has_sheet(INSTRUCTIONS_TAB),
            instructions_a1: workbook.cell(INSTRUCTIONS_TAB, "A1").text(),
            instructions_a104: workbook.cell(INSTRUCTIONS_TAB, "A104").text(),
        }
    }
}

/// `None` means the layout is not recognized.
pub fn classify(markers: &VersionMarkers) -> Option<DocumentVersion> {
    if !markers.has_summary {
        return markers
            .has_legacy_summary
            .then_some(DocumentVersion::Legacy);
    }
    // An old document whose summary tab was renamed.
    if markers.has_legacy_role_tabs {
        return None;
    }
    if markers.has_learn_more {
        return Some(DocumentVersion::Ohd3);
    }
    if !markers.has_instructions {
        return None;
    }
    if markers.instructions_a1.as_deref() == Some("Loading...") {
        return Some(DocumentVersion::Revised2015);
    }
    let revision = markers.instructions_a104.as_deref()?;
    if revision.contains("Last Revised 2015") {
        Some(DocumentVersion::Revised2015)
    } else if revision.contains("Last Revised 2016") {
        Some(DocumentVersion::Revised2016)
    } else if revision.contains("Last Revised 2017-01-05") {
        Some(DocumentVersion::Revised2017)
    } else {
        None
    }
}

pub fn detect(workbook: &Workbook) -> Option<DocumentVersion> {
    classify(&VersionMarkers::sniff(workbook))
}
