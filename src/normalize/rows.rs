//! Turns history-tab rows into games.

use super::date::{cell_date, whole_years};
use crate::record::{Game, Official, Primacy};
use crate::taxonomy::Taxonomy;
use crate::workbook::{cell_at as cell, Cell, Sheet};
use chrono::NaiveDate;
use tracing::warn;

const DATE_COLUMN: usize = 0;
const EVENT_COLUMN: usize = 1;
const ASSOCIATION_COLUMN: usize = 6;
const GAME_TYPE_COLUMN: usize = 7;
const ROLE_COLUMN: usize = 8;
const SECONDARY_ROLE_COLUMN: usize = 9;

/// Which history tab a row came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryTab {
    /// The main "Game History" tab.
    Games,
    /// The "Other History" tab. Roles are taken as written: no alias remap and
    /// no warning for unknown roles.
    Other,
}

impl HistoryTab {
    fn applies_aliases(self) -> bool {
        matches!(self, Self::Games)
    }
}

/// Everything one row contributes, before it is attached to an official.
#[derive(Debug, Clone, PartialEq)]
pub struct RowGames {
    pub primary: Game,
    pub secondary: Option<Game>,
}

/// Parses one row. `None` means the row is skipped.
pub fn parse_row(
    row: &[Cell],
    tab: HistoryTab,
    freeze: NaiveDate,
    taxonomy: &Taxonomy,
    official: &str,
) -> Option<RowGames> {
    if row.iter().all(Cell::is_blank) {
        return None;
    }
    let date = cell_date(cell(row, DATE_COLUMN))?;
    let age = whole_years(freeze, date)?;

    let association = taxonomy.normalize_association(
        &cell(row, ASSOCIATION_COLUMN).text().unwrap_or_default(),
    );
    let event = cell(row, EVENT_COLUMN).text();
    let game_type = taxonomy.normalize_game_type(&cell(row, GAME_TYPE_COLUMN).text()?)?;

    let raw_role = cell(row, ROLE_COLUMN).text()?;
    let role = taxonomy.normalize_role(&raw_role, tab.applies_aliases());
    let primary = match Game::new(
        taxonomy,
        &association,
        &game_type,
        Some(&role),
        age,
        Primacy::Primary,
    ) {
        Ok(game) => game,
        Err(e) => {
            if tab == HistoryTab::Games {
                warn!(official, role = %role, "skipping history row: {e}");
            }
            return None;
        }
    };

    let secondary_role = cell(row, SECONDARY_ROLE_COLUMN)
        .text()
        .map(|raw| taxonomy.normalize_role(&raw, false));
    // Blank or unknown secondary roles fail validation and are dropped.
    let secondary = Game::new(
        taxonomy,
        &association,
        &game_type,
        secondary_role.as_deref(),
        age,
        Primacy::Secondary,
    )
    .ok()
    .map(|game| game.with_date(date).with_event(event.clone()));

    Some(RowGames {
        primary: primary.with_date(date).with_event(event),
        secondary,
    })
}

/// Appends every usable row of `sheet` to `official` in row order.
pub fn load_tab(
    official: &mut Official,
    sheet: &Sheet,
    tab: HistoryTab,
    freeze: NaiveDate,
    taxonomy: &Taxonomy,
) {
    for row in &sheet.rows {
        let Some(games) = parse_row(row, tab, freeze, taxonomy, &official.name) else {
            continue;
        };
        official.add_game(games.primary);
        if let Some(secondary) = games.secondary {
            official.add_game(secondary);
        }
    }
}
