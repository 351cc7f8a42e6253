// Row classifier & scanner: walks the data rows below the header, extracts
// one typed vehicle record per usable row and tallies it into the running
// aggregates. All per-cell failures degrade locally; nothing in here errors.

use std::collections::HashMap;

use calamine::Data;
use chrono::{Duration, NaiveDate};

use fleet_shared::models::{ParsedFleetData, VehicleRecord, VehicleTypeBreakdown};
use fleet_shared::utils::{classify_status, StatusBucket};

use crate::config::ParserSettings;
use crate::data::cell::{cell_text, coerce_currency, coerce_date};
use crate::data::columns::{ColumnMap, FleetField};

pub(crate) fn scan_rows(
    rows: &[Vec<Data>],
    first_data_row: usize,
    columns: &ColumnMap,
    settings: &ParserSettings,
    today: NaiveDate,
) -> ParsedFleetData {
    let mut agg = Aggregates::default();
    let window_end = today + Duration::days(settings.mot_due_window_days);

    for row in rows.iter().skip(first_data_row) {
        if row.iter().all(|c| matches!(c, Data::Empty)) {
            continue;
        }

        // Summary rows injected by the sheet author are skipped before any
        // tallying, so they stay invisible to every counter.
        let first_cell = row.first().map(cell_text).unwrap_or_default().to_lowercase();
        if settings
            .summary_row_markers
            .iter()
            .any(|marker| first_cell.contains(marker.as_str()))
        {
            continue;
        }

        let reg_no = field_text(row, columns, FleetField::RegNo);
        let van_number = field_text(row, columns, FleetField::VanNumber);
        // A row with neither identifier is not a vehicle.
        if reg_no.is_empty() && van_number.is_empty() {
            continue;
        }

        let status = non_empty_or(field_text(row, columns, FleetField::Status), "Unknown");
        let vehicle_type =
            non_empty_or(field_text(row, columns, FleetField::VehicleType), "Unknown");
        let trade_group =
            non_empty_or(field_text(row, columns, FleetField::TradeGroup), "Unassigned");

        // Written-off and sold vehicles stay visible in the status counts
        // but are excluded from the vehicle list and every other counter.
        if classify_status(&status) == Some(StatusBucket::WrittenOff) {
            *agg.status_counts.entry(status).or_default() += 1;
            continue;
        }

        let mot_due_date = field_cell(row, columns, FleetField::MotDueDate).and_then(coerce_date);
        if let Some(due) = mot_due_date {
            // Inclusive on both ends. This is a row count, not a
            // deduplicated-vehicle count.
            if due >= today && due <= window_end {
                agg.mot_due_in_30_days += 1;
            }
        }

        agg.tally(VehicleRecord {
            van_number,
            reg_no,
            status,
            vehicle_type,
            trade_group,
            mot_due_date,
            service_cost: field_currency(row, columns, FleetField::ServiceCost),
            maintenance_cost: field_currency(row, columns, FleetField::MaintenanceCost),
            tax_cost: field_currency(row, columns, FleetField::TaxCost),
            ulez_cost: field_currency(row, columns, FleetField::UlezCost),
            congestion_cost: field_currency(row, columns, FleetField::CongestionCost),
            dart_charge_cost: field_currency(row, columns, FleetField::DartChargeCost),
            mot_cost: field_currency(row, columns, FleetField::MotCost),
            insurance_cost: field_currency(row, columns, FleetField::InsuranceCost),
            renting_buying_cost: field_currency(row, columns, FleetField::RentingBuyingCost),
            other_payments: field_currency(row, columns, FleetField::OtherPayments),
            transmission: optional_text(field_text(row, columns, FleetField::Transmission)),
            vehicle_ownership: optional_text(field_text(
                row,
                columns,
                FleetField::VehicleOwnership,
            )),
            registration_date: field_cell(row, columns, FleetField::RegistrationDate)
                .and_then(coerce_date),
        });
    }

    agg.finish()
}

/// Running aggregates for one scan. Folded into a [`ParsedFleetData`] once
/// the scan completes.
#[derive(Default)]
struct Aggregates {
    vehicles: Vec<VehicleRecord>,
    status_counts: HashMap<String, u64>,
    trade_group_counts: HashMap<String, u64>,
    vehicle_type_counts: HashMap<String, VehicleTypeBreakdown>,
    mot_due_in_30_days: u64,
}

impl Aggregates {
    fn tally(&mut self, record: VehicleRecord) {
        *self
            .status_counts
            .entry(record.status.clone())
            .or_default() += 1;

        if record.trade_group != "Unknown" {
            *self
                .trade_group_counts
                .entry(record.trade_group.clone())
                .or_default() += 1;
        }

        if record.vehicle_type != "Unknown" {
            // Unmatched statuses fall into the allocated bucket, the
            // historical catch-all the dashboard charts rely on.
            let bucket = classify_status(&record.status).unwrap_or(StatusBucket::Allocated);
            self.vehicle_type_counts
                .entry(record.vehicle_type.clone())
                .or_default()
                .bump(bucket);
        }

        self.vehicles.push(record);
    }

    fn finish(self) -> ParsedFleetData {
        let mut data = ParsedFleetData {
            total_vehicles: self.vehicles.len() as u64,
            vehicles: self.vehicles,
            status_counts: self.status_counts,
            trade_group_counts: self.trade_group_counts,
            vehicle_type_counts: self.vehicle_type_counts,
            mot_due_in_30_days: self.mot_due_in_30_days,
            ..ParsedFleetData::default()
        };

        // Fleet-wide totals come from the status counts so that written-off
        // rows, which never entered `vehicles`, still reach their total.
        for (status, count) in &data.status_counts {
            match classify_status(status) {
                Some(StatusBucket::Allocated) => data.allocated_vehicles += count,
                Some(StatusBucket::Spare) => data.spare_vehicles += count,
                Some(StatusBucket::Garage) => data.garage_vehicles += count,
                Some(StatusBucket::Reserved) => data.reserved_vehicles += count,
                Some(StatusBucket::WrittenOff) => data.written_off_vehicles += count,
                None => {}
            }
        }
        data
    }
}

fn field_cell<'a>(row: &'a [Data], columns: &ColumnMap, field: FleetField) -> Option<&'a Data> {
    columns.get(field).and_then(|index| row.get(index))
}

fn field_text(row: &[Data], columns: &ColumnMap, field: FleetField) -> String {
    field_cell(row, columns, field)
        .map(cell_text)
        .unwrap_or_default()
}

fn field_currency(row: &[Data], columns: &ColumnMap, field: FleetField) -> f64 {
    field_cell(row, columns, field)
        .map(coerce_currency)
        .unwrap_or(0.0)
}

fn non_empty_or(value: String, default: &str) -> String {
    if value.is_empty() {
        default.to_string()
    } else {
        value
    }
}

fn optional_text(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
