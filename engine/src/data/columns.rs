// Header location and column resolution. Uploaded sheets have no fixed
// schema: the header row can sit anywhere in the first rows of the sheet and
// column names vary per file, so both are found heuristically.

use calamine::Data;

use crate::config::ParserSettings;
use crate::data::cell::cell_text;
use std::collections::HashMap;

/// Logical fields a header column can resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FleetField {
    VanNumber,
    RegNo,
    Status,
    VehicleType,
    TradeGroup,
    MotDueDate,
    ServiceCost,
    MaintenanceCost,
    TaxCost,
    UlezCost,
    CongestionCost,
    DartChargeCost,
    MotCost,
    InsuranceCost,
    RentingBuyingCost,
    OtherPayments,
    Transmission,
    VehicleOwnership,
    RegistrationDate,
}

/// Header aliases per logical field, in priority order. Matching is
/// substring-based over canonicalized header text, so the order of aliases
/// within a field decides which column wins when several could match
/// (e.g. "MOT Due" must be tried before the bare "MOT", or the MOT cost
/// column would claim the due date). The table order is the fixed field
/// resolution order.
pub const FIELD_ALIASES: &[(FleetField, &[&str])] = &[
    (FleetField::VanNumber, &["Van Number", "VAN", "VEH"]),
    (FleetField::RegNo, &["Reg No", "Registration", "Reg"]),
    (FleetField::Status, &["Status"]),
    (FleetField::VehicleType, &["Vehicle Type", "VehicleType"]),
    (FleetField::TradeGroup, &["Trade Group", "TradeGroup"]),
    (FleetField::MotDueDate, &["MOT Due", "MOTDue", "MOT"]),
    (FleetField::ServiceCost, &["Service Cost", "ServiceCost"]),
    (
        FleetField::MaintenanceCost,
        &["Maintenance Cost", "MaintenanceCost"],
    ),
    (FleetField::TaxCost, &["Tax Cost", "TaxCost"]),
    (FleetField::UlezCost, &["ULEZ Cost", "ULEZCost"]),
    (
        FleetField::CongestionCost,
        &["Congestion Cost", "CongestionCost"],
    ),
    (
        FleetField::DartChargeCost,
        &["Dart Charge Cost", "DartChargeCost"],
    ),
    (FleetField::MotCost, &["MOT Cost", "MOTCost"]),
    (FleetField::InsuranceCost, &["Insurance Cost", "InsuranceCost"]),
    (
        FleetField::RentingBuyingCost,
        &["Renting/Buying Cost", "RentingBuyingCost"],
    ),
    (FleetField::OtherPayments, &["Other Payments", "OtherPayments"]),
    (FleetField::Transmission, &["Transmission"]),
    (
        FleetField::VehicleOwnership,
        &["Vehicle Ownership", "VehicleOwnership"],
    ),
    (
        FleetField::RegistrationDate,
        &["Registration Date", "RegistrationDate"],
    ),
];

/// The located header row: its index in the sheet plus its cell texts.
#[derive(Debug, Clone)]
pub struct HeaderRow {
    pub index: usize,
    pub cells: Vec<String>,
}

/// Lower-case, alphanumeric-only form used for header/alias comparison.
fn canonicalize(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}

/// Scans the leading rows of a sheet for the header row.
///
/// A row wins if its lower-cased cells, joined, contain any configured
/// signature substring; otherwise the first row with enough non-empty cells
/// is used. `None` means the sheet has no recognizable header at all and the
/// scan will degrade to an empty dataset.
pub fn locate_header(rows: &[Vec<Data>], settings: &ParserSettings) -> Option<HeaderRow> {
    for (index, row) in rows.iter().take(settings.header_scan_rows).enumerate() {
        if row.is_empty() {
            continue;
        }
        let joined = row
            .iter()
            .map(|c| cell_text(c).to_lowercase())
            .collect::<Vec<_>>()
            .join(" ");
        if settings
            .header_signatures
            .iter()
            .any(|sig| joined.contains(sig.as_str()))
        {
            return Some(header_row(index, row));
        }
    }

    // Fallback: first row with enough non-empty cells, anywhere in the sheet.
    rows.iter()
        .enumerate()
        .find(|(_, row)| {
            row.iter().filter(|c| !matches!(c, Data::Empty)).count()
                > settings.header_fallback_min_cells
        })
        .map(|(index, row)| header_row(index, row))
}

fn header_row(index: usize, row: &[Data]) -> HeaderRow {
    HeaderRow {
        index,
        cells: row.iter().map(cell_text).collect(),
    }
}

/// Mapping from logical field to column index in the located header row.
#[derive(Debug, Clone, Default)]
pub struct ColumnMap {
    indices: HashMap<FleetField, usize>,
}

impl ColumnMap {
    /// Resolves every logical field against the header cells, walking
    /// `FIELD_ALIASES` in its fixed order. Fields the header does not cover
    /// stay unresolved; two fields may legitimately land on the same column
    /// when a sheet only carries an ambiguous header for both.
    pub fn resolve(headers: &[String]) -> Self {
        let canonical: Vec<String> = headers.iter().map(|h| canonicalize(h)).collect();
        let mut indices = HashMap::new();
        for (field, aliases) in FIELD_ALIASES {
            if let Some(index) = find_column(&canonical, aliases) {
                indices.insert(*field, index);
            }
        }
        ColumnMap { indices }
    }

    pub fn get(&self, field: FleetField) -> Option<usize> {
        self.indices.get(&field).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

fn find_column(canonical_headers: &[String], aliases: &[&str]) -> Option<usize> {
    for alias in aliases {
        let needle = canonicalize(alias);
        if let Some(index) = canonical_headers
            .iter()
            .position(|header| header.contains(&needle))
        {
            return Some(index);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Data {
        Data::String(s.to_string())
    }

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn canonicalize_strips_everything_but_alphanumerics() {
        assert_eq!(canonicalize("Renting/Buying Cost"), "rentingbuyingcost");
        assert_eq!(canonicalize("MOT Due "), "motdue");
        assert_eq!(canonicalize("Reg. No"), "regno");
    }

    #[test]
    fn header_found_by_signature_not_position() {
        let rows = vec![
            vec![text("Fleet report Q3")],
            vec![],
            vec![Data::Empty, Data::Empty],
            vec![text("prepared by ops")],
            vec![text("Van Number"), text("Reg No"), text("Status")],
            vec![text("379"), text("AB1"), text("Allocated")],
        ];
        let header = locate_header(&rows, &ParserSettings::default()).unwrap();
        assert_eq!(header.index, 4);
        assert_eq!(header.cells[0], "Van Number");
    }

    #[test]
    fn first_matching_row_wins() {
        let rows = vec![
            vec![text("Status summary")],
            vec![text("Van Number"), text("Status")],
        ];
        // Row 0 contains the "status" signature, so it wins even though the
        // real header sits below it. This mirrors the dashboard's behavior.
        let header = locate_header(&rows, &ParserSettings::default()).unwrap();
        assert_eq!(header.index, 0);
    }

    #[test]
    fn fallback_uses_first_wide_enough_row() {
        let rows = vec![
            vec![text("a"), text("b")],
            vec![text("Col1"), text("Col2"), text("Col3"), text("Col4")],
        ];
        let header = locate_header(&rows, &ParserSettings::default()).unwrap();
        assert_eq!(header.index, 1);
    }

    #[test]
    fn no_header_at_all_yields_none() {
        let rows = vec![vec![text("just a note")], vec![text("x"), text("y")]];
        assert!(locate_header(&rows, &ParserSettings::default()).is_none());
    }

    #[test]
    fn resolves_by_alias_priority() {
        let cols = ColumnMap::resolve(&headers(&[
            "MOT Cost",
            "MOT Due Date",
            "VEH No",
            "Reg No",
        ]));
        // "MOT Due" is tried before the bare "MOT", so the due date column
        // does not get captured by the cost column.
        assert_eq!(cols.get(FleetField::MotDueDate), Some(1));
        assert_eq!(cols.get(FleetField::MotCost), Some(0));
        assert_eq!(cols.get(FleetField::VanNumber), Some(2));
        assert_eq!(cols.get(FleetField::RegNo), Some(3));
    }

    #[test]
    fn bare_mot_header_claims_the_due_date() {
        let cols = ColumnMap::resolve(&headers(&["Van Number", "MOT"]));
        assert_eq!(cols.get(FleetField::MotDueDate), Some(1));
        // The cost alias list also reaches the same column via "MOT"-ish
        // substrings only when a cost header exists; here it stays unresolved.
        assert_eq!(cols.get(FleetField::MotCost), None);
    }

    #[test]
    fn unmatched_fields_stay_unresolved() {
        let cols = ColumnMap::resolve(&headers(&["Van Number", "Status"]));
        assert_eq!(cols.get(FleetField::ServiceCost), None);
        assert_eq!(cols.get(FleetField::TradeGroup), None);
        assert!(!cols.is_empty());
    }
}
