use super::version::{HeaderLayout, SUMMARY_TAB};
use crate::workbook::{Cell, Workbook};

const SPELLED: [(&str, u8); 5] = [("ONE", 1), ("TWO", 2), ("THREE", 3), ("FOUR", 4), ("FIVE", 5)];

fn in_range(level: u64) -> u8 {
    match u8::try_from(level) {
        Ok(level @ 1..=5) => level,
        _ => 0,
    }
}

/// Maps the free-form certification cell to 1-5, or 0 for uncertified or
/// unreadable values.
pub fn normalize_certification(cell: &Cell) -> u8 {
    match cell {
        Cell::Number(level) if (1.0..=5.0).contains(level) => *level as u8,
        Cell::Number(_) => 0,
        Cell::Text(text) => {
            let digits: String = text
                .chars()
                .skip_while(|c| !c.is_ascii_digit())
                .take_while(char::is_ascii_digit)
                .collect();
            if !digits.is_empty() {
                return digits.parse().map(in_range).unwrap_or(0);
            }
            let word = text.trim().to_uppercase();
            SPELLED
                .iter()
                .find(|(spelled, _)| *spelled == word)
                .map_or(0, |(_, level)| *level)
        }
        _ => 0,
    }
}

/// A name cell is unusable when empty, blank, or a lone dash placeholder.
fn usable_name(cell: &Cell) -> Option<String> {
    cell.text().filter(|name| name != "-")
}

/// First usable name cell from the layout, else the document identifier.
pub fn official_name(workbook: &Workbook, layout: &HeaderLayout) -> String {
    layout
        .name_cells
        .iter()
        .find_map(|reference| usable_name(workbook.cell(SUMMARY_TAB, reference)))
        .unwrap_or_else(|| workbook.identifier.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workbook::Sheet;

    #[test]
    fn numeric_certifications_are_bounded() {
        assert_eq!(normalize_certification(&Cell::Number(3.0)), 3);
        assert_eq!(normalize_certification(&Cell::Number(4.7)), 4);
        assert_eq!(normalize_certification(&Cell::Number(0.0)), 0);
        assert_eq!(normalize_certification(&Cell::Number(6.0)), 0);
        assert_eq!(normalize_certification(&Cell::Empty), 0);
    }

    #[test]
    fn text_certifications_use_first_number_or_word() {
        assert_eq!(normalize_certification(&Cell::Text("Level 2".to_string())), 2);
        assert_eq!(normalize_certification(&Cell::Text("3 (2016)".to_string())), 3);
        assert_eq!(normalize_certification(&Cell::Text("Level 12".to_string())), 0);
        assert_eq!(normalize_certification(&Cell::Text(" three ".to_string())), 3);
        assert_eq!(normalize_certification(&Cell::Text("Five".to_string())), 5);
        assert_eq!(normalize_certification(&Cell::Text("Recognized".to_string())), 0);
        assert_eq!(normalize_certification(&Cell::Text("-".to_string())), 0);
    }

    fn summary(rows: Vec<Vec<Cell>>) -> Workbook {
        Workbook {
            identifier: "fallback.json".to_string(),
            sheets: vec![Sheet::new(SUMMARY_TAB, rows)],
        }
    }

    fn text(value: &str) -> Cell {
        Cell::Text(value.to_string())
    }

    const LAYOUT: HeaderLayout = HeaderLayout {
        name_cells: &["C4", "C3"],
        ref_cert_cell: "C7",
        nso_cert_cell: "C8",
    };

    #[test]
    fn name_falls_back_through_cells() {
        let empty = || vec![Cell::Empty, Cell::Empty, Cell::Empty];
        let workbook = summary(vec![
            empty(),
            empty(),
            vec![Cell::Empty, Cell::Empty, text("Legal Name")],
            vec![Cell::Empty, Cell::Empty, text("Derby Name")],
        ]);
        assert_eq!(official_name(&workbook, &LAYOUT), "Derby Name");

        let workbook = summary(vec![
            empty(),
            empty(),
            vec![Cell::Empty, Cell::Empty, text("Legal Name")],
            vec![Cell::Empty, Cell::Empty, text(" - ")],
        ]);
        assert_eq!(official_name(&workbook, &LAYOUT), "Legal Name");

        let workbook = summary(vec![]);
        assert_eq!(official_name(&workbook, &LAYOUT), "fallback.json");
    }
}
