// Cell value coercion. Uploaded fleet sheets carry currency and date cells
// in whatever shape the author's locale produced, so every coercion here is
// total: bad input degrades to 0 / None instead of failing the parse.

use calamine::{Data, DataType};
use chrono::{Duration, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

/// Day-first date pattern (`D/M/YYYY` or `DD/MM/YYYY`), matched anywhere in
/// the cell text. UK fleet sheets write dates day-first.
static DAY_FIRST: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{1,2})/(\d{1,2})/(\d{4})").expect("valid date pattern"));

/// Text date formats tried when the day-first pattern does not match.
/// Ambiguous numeric forms are interpreted day-first throughout.
const FALLBACK_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%d %b %Y",
    "%d %B %Y",
];

fn excel_epoch() -> NaiveDate {
    // 1899-12-30, the serial-number epoch used by spreadsheet files. The
    // conversion below inherits the historical pre-March-1900 leap-year
    // quirk: serials from that window land one day off.
    NaiveDate::from_ymd_opt(1899, 12, 30).expect("static date")
}

/// Converts a currency cell into an amount. Numeric cells pass through; text
/// is stripped down to digits, `.` and `-` before parsing; anything else
/// (including parse failures) is `0`.
pub fn coerce_currency(cell: &Data) -> f64 {
    match cell {
        Data::Float(f) => *f,
        Data::Int(i) => *i as f64,
        Data::DateTime(dt) => dt.as_f64(),
        Data::String(s) => {
            let cleaned: String = s
                .chars()
                .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
                .collect();
            cleaned.parse::<f64>().unwrap_or(0.0)
        }
        _ => 0.0,
    }
}

/// Converts a date cell into a calendar date, or `None` if nothing matches.
///
/// Native date cells pass through; numeric cells are spreadsheet serial
/// numbers counted from 1899-12-30; text tries the day-first pattern first
/// and the fixed fallback format list second.
pub fn coerce_date(cell: &Data) -> Option<NaiveDate> {
    match cell {
        Data::DateTime(_) | Data::DateTimeIso(_) => cell.as_datetime().map(|dt| dt.date()),
        Data::Float(f) => serial_to_date(*f),
        Data::Int(i) => serial_to_date(*i as f64),
        Data::String(s) => parse_date_text(s),
        _ => None,
    }
}

fn serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() {
        return None;
    }
    let millis = (serial * 86_400_000.0).round();
    if millis.abs() > i64::MAX as f64 {
        return None;
    }
    excel_epoch()
        .and_hms_opt(0, 0, 0)?
        .checked_add_signed(Duration::milliseconds(millis as i64))
        .map(|dt| dt.date())
}

fn parse_date_text(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Some(caps) = DAY_FIRST.captures(text) {
        let day: u32 = caps[1].parse().ok()?;
        let month: u32 = caps[2].parse().ok()?;
        let year: i32 = caps[3].parse().ok()?;
        if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
            return Some(date);
        }
        // Captured components form no real date (e.g. 31/02/2023); fall
        // through to the generic formats.
    }

    FALLBACK_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
}

/// Renders a cell as trimmed display text; empty string for blank cells.
/// Whole-number floats print without a fractional part so van numbers stored
/// as numbers read back as `"379"`, not `"379.0"`.
pub fn cell_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) => {
            if f.fract() == 0.0 && f.is_finite() {
                format!("{}", *f as i64)
            } else {
                f.to_string()
            }
        }
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt.as_f64().to_string(),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.trim().to_string(),
        Data::Error(_) | Data::Empty => String::new(),
    }
}
