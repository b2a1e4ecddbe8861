use super::table::Table;
use crate::error::{Result, ShaftError};
use std::fs;
use std::path::{Path, PathBuf};

fn sheet_file_name(sheet: &str) -> String {
    let safe: String = sheet
        .chars()
        .map(|c| if matches!(c, '/' | '\\' | ':') { '-' } else { c })
        .collect();
    format!("{safe}.csv")
}

/// Writes each table as `<dir>/<sheet>.csv`, replacing any previous export.
pub fn write_workbook(dir: &Path, tables: &[Table]) -> Result<PathBuf> {
    fs::create_dir_all(dir).map_err(ShaftError::Io)?;
    for table in tables {
        let path = dir.join(sheet_file_name(&table.name));
        let mut writer = csv::WriterBuilder::new().flexible(true).from_path(&path)?;
        for row in &table.rows {
            writer.write_record(row.iter().map(ToString::to_string))?;
        }
        writer.flush()?;
    }
    Ok(dir.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::table::Field;
    use tempfile::TempDir;

    #[test]
    fn writes_one_csv_per_sheet() {
        let dir = TempDir::new().expect("temp dir should be created");
        let mut rejects = Table::new("Rejects");
        rejects.push(["File", "Reason"]);
        rejects.push(["a, b.json", "unsupported document version"]);
        let mut ranks = Table::new("Score Tracking");
        ranks.rows.push(vec![Field::from("Amy"), Field::from(1.5f64)]);
        ranks.rows.push(vec![Field::from("Bo")]);

        let out = dir.path().join("_history-rejects");
        let written = write_workbook(&out, &[rejects, ranks]).expect("export should write");
        assert_eq!(written, out);

        let rejects = fs::read_to_string(out.join("Rejects.csv")).expect("csv should exist");
        assert_eq!(
            rejects,
            "File,Reason\n\"a, b.json\",unsupported document version\n"
        );
        let ranks = fs::read_to_string(out.join("Score Tracking.csv")).expect("csv should exist");
        assert_eq!(ranks, "Amy,1.5\nBo\n");
    }

    #[test]
    fn sheet_names_are_made_file_safe() {
        assert_eq!(sheet_file_name("A/B"), "A-B.csv");
        assert_eq!(sheet_file_name("CHR"), "CHR.csv");
    }
}
