use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::utils::StatusBucket;

/// One parsed spreadsheet data row. Built once during row scanning and never
/// mutated by later stages; the merger clones records as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleRecord {
    pub van_number: String,
    pub reg_no: String,
    pub status: String,
    pub vehicle_type: String,
    pub trade_group: String,
    pub mot_due_date: Option<NaiveDate>,
    pub service_cost: f64,
    pub maintenance_cost: f64,
    pub tax_cost: f64,
    pub ulez_cost: f64,
    pub congestion_cost: f64,
    pub dart_charge_cost: f64,
    pub mot_cost: f64,
    pub insurance_cost: f64,
    pub renting_buying_cost: f64,
    pub other_payments: f64,
    pub transmission: Option<String>,
    pub vehicle_ownership: Option<String>,
    pub registration_date: Option<NaiveDate>,
}

impl VehicleRecord {
    /// Natural key identifying the same vehicle across uploads:
    /// registration number if non-empty, otherwise van number.
    pub fn dedup_key(&self) -> &str {
        if !self.reg_no.is_empty() {
            &self.reg_no
        } else {
            &self.van_number
        }
    }
}

/// Per-vehicle-type breakdown of active statuses.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct VehicleTypeBreakdown {
    pub allocated: u64,
    pub spare: u64,
    pub garage: u64,
    pub reserved: u64,
}

impl VehicleTypeBreakdown {
    /// Tallies one vehicle into exactly one sub-count. Written-off rows are
    /// excluded before per-type tallying, so that bucket folds into the
    /// allocated catch-all here.
    pub fn bump(&mut self, bucket: StatusBucket) {
        match bucket {
            StatusBucket::Spare => self.spare += 1,
            StatusBucket::Garage => self.garage += 1,
            StatusBucket::Reserved => self.reserved += 1,
            StatusBucket::Allocated | StatusBucket::WrittenOff => self.allocated += 1,
        }
    }

    pub fn add(&mut self, other: &VehicleTypeBreakdown) {
        self.allocated += other.allocated;
        self.spare += other.spare;
        self.garage += other.garage;
        self.reserved += other.reserved;
    }
}

/// The per-file output aggregate: accepted vehicles in row order plus the
/// running counters produced during the scan.
///
/// `status_counts` may sum to more than `vehicles.len()` because written-off
/// and sold rows are tallied there but never appended to `vehicles`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedFleetData {
    pub vehicles: Vec<VehicleRecord>,
    pub status_counts: HashMap<String, u64>,
    pub trade_group_counts: HashMap<String, u64>,
    pub vehicle_type_counts: HashMap<String, VehicleTypeBreakdown>,
    pub mot_due_in_30_days: u64,
    pub total_vehicles: u64,
    pub allocated_vehicles: u64,
    pub spare_vehicles: u64,
    pub garage_vehicles: u64,
    pub written_off_vehicles: u64,
    pub reserved_vehicles: u64,
}
