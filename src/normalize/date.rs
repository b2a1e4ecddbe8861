use crate::workbook::Cell;
use chrono::{Datelike, Duration, NaiveDate};

/// Spreadsheet serial day 0.
fn serial_epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1899, 12, 30).unwrap_or_default()
}

/// Converts a spreadsheet serial date. The time-of-day fraction is dropped and
/// serials below 60 are shifted for the phantom 1900-02-29.
pub fn from_serial(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }
    let mut days = serial.trunc();
    if days > i32::MAX as f64 {
        return None;
    }
    if days > 0.0 && days < 60.0 {
        days += 1.0;
    }
    serial_epoch().checked_add_signed(Duration::try_days(days as i64)?)
}

/// A calendar date from a date cell or a numeric serial; anything else is none.
pub fn cell_date(cell: &Cell) -> Option<NaiveDate> {
    match cell {
        Cell::Date(date) => Some(*date),
        Cell::Number(serial) => from_serial(*serial),
        _ => None,
    }
}

/// Whole years from `date` to `freeze`; `None` when `date` is after `freeze`.
pub fn whole_years(freeze: NaiveDate, date: NaiveDate) -> Option<u32> {
    if date > freeze {
        return None;
    }
    let mut years = freeze.year() - date.year();
    if (freeze.month(), freeze.day()) < (date.month(), date.day()) {
        years -= 1;
    }
    u32::try_from(years).ok()
}
