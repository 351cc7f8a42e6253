// Multi-source merger: folds several independently parsed uploads into one
// fleet view. Upload order is significant — the first file to mention a
// vehicle wins on conflict — so this reduction is not commutative.

use std::collections::HashSet;

use fleet_shared::models::ParsedFleetData;
use fleet_shared::utils::{classify_status, StatusBucket};

pub fn merge_fleet_data(datasets: &[ParsedFleetData]) -> ParsedFleetData {
    let mut merged = ParsedFleetData::default();
    let mut seen: HashSet<String> = HashSet::new();

    for data in datasets {
        for vehicle in &data.vehicles {
            let key = vehicle.dedup_key();
            if !key.is_empty() && seen.insert(key.to_string()) {
                merged.vehicles.push(vehicle.clone());
            }
        }

        // Map-based counters merge by per-key addition. Vehicles appearing
        // in more than one upload are counted once per upload here; only the
        // summary totals below are dedup-consistent.
        for (status, count) in &data.status_counts {
            *merged.status_counts.entry(status.clone()).or_default() += count;
        }
        for (group, count) in &data.trade_group_counts {
            *merged.trade_group_counts.entry(group.clone()).or_default() += count;
        }
        for (vehicle_type, counts) in &data.vehicle_type_counts {
            merged
                .vehicle_type_counts
                .entry(vehicle_type.clone())
                .or_default()
                .add(counts);
        }
        merged.mot_due_in_30_days += data.mot_due_in_30_days;
    }

    // The summary totals are recomputed from the deduplicated vehicle list,
    // never summed from the inputs, so they cannot drift from `vehicles`.
    // Written-off rows never enter `vehicles`, so that total is zero after a
    // merge; the written-off detail survives in `status_counts`.
    merged.total_vehicles = merged.vehicles.len() as u64;
    for vehicle in &merged.vehicles {
        match classify_status(&vehicle.status) {
            Some(StatusBucket::Allocated) => merged.allocated_vehicles += 1,
            Some(StatusBucket::Spare) => merged.spare_vehicles += 1,
            Some(StatusBucket::Garage) => merged.garage_vehicles += 1,
            Some(StatusBucket::Reserved) => merged.reserved_vehicles += 1,
            Some(StatusBucket::WrittenOff) | None => {}
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use fleet_shared::models::VehicleRecord;

    fn vehicle(van: &str, reg: &str, status: &str) -> VehicleRecord {
        VehicleRecord {
            van_number: van.to_string(),
            reg_no: reg.to_string(),
            status: status.to_string(),
            vehicle_type: "LWB".to_string(),
            trade_group: "Unassigned".to_string(),
            mot_due_date: None,
            service_cost: 0.0,
            maintenance_cost: 0.0,
            tax_cost: 0.0,
            ulez_cost: 0.0,
            congestion_cost: 0.0,
            dart_charge_cost: 0.0,
            mot_cost: 0.0,
            insurance_cost: 0.0,
            renting_buying_cost: 0.0,
            other_payments: 0.0,
            transmission: None,
            vehicle_ownership: None,
            registration_date: None,
        }
    }

    fn dataset(vehicles: Vec<VehicleRecord>) -> ParsedFleetData {
        let mut data = ParsedFleetData::default();
        for v in &vehicles {
            *data.status_counts.entry(v.status.clone()).or_default() += 1;
            match classify_status(&v.status) {
                Some(StatusBucket::Allocated) => data.allocated_vehicles += 1,
                Some(StatusBucket::Spare) => data.spare_vehicles += 1,
                _ => {}
            }
        }
        data.total_vehicles = vehicles.len() as u64;
        data.vehicles = vehicles;
        data
    }

    #[test]
    fn dedup_keeps_first_upload_of_a_registration() {
        let first = dataset(vec![vehicle("379", "AB1", "Allocated")]);
        let second = dataset(vec![
            vehicle("999", "AB1", "Spare"),
            vehicle("380", "CD2", "Spare"),
        ]);

        let merged = merge_fleet_data(&[first, second]);

        assert_eq!(merged.vehicles.len(), 2);
        assert_eq!(merged.total_vehicles, 2);
        let winner = merged.vehicles.iter().find(|v| v.reg_no == "AB1").unwrap();
        assert_eq!(winner.van_number, "379");
        assert_eq!(winner.status, "Allocated");
    }

    #[test]
    fn dedup_falls_back_to_van_number() {
        let first = dataset(vec![vehicle("379", "", "Allocated")]);
        let second = dataset(vec![vehicle("379", "", "Spare")]);

        let merged = merge_fleet_data(&[first, second]);
        assert_eq!(merged.vehicles.len(), 1);
        assert_eq!(merged.vehicles[0].status, "Allocated");
    }

    #[test]
    fn summary_totals_are_recomputed_not_summed() {
        // The same allocated vehicle appears in both uploads: the additive
        // path would report 2 allocated, the recomputed path must report 1.
        let first = dataset(vec![vehicle("379", "AB1", "Allocated")]);
        let second = dataset(vec![vehicle("379", "AB1", "Allocated")]);

        let merged = merge_fleet_data(&[first, second]);

        assert_eq!(merged.allocated_vehicles, 1);
        assert_eq!(merged.total_vehicles, 1);
        // The map-based counter keeps the additive (over-counted) view.
        assert_eq!(merged.status_counts["Allocated"], 2);
    }

    #[test]
    fn scalar_maps_merge_by_addition() {
        let mut first = dataset(vec![vehicle("1", "A", "Allocated")]);
        first.trade_group_counts.insert("North".to_string(), 3);
        first.mot_due_in_30_days = 2;
        let mut second = dataset(vec![vehicle("2", "B", "Spare")]);
        second.trade_group_counts.insert("North".to_string(), 1);
        second.mot_due_in_30_days = 1;

        let merged = merge_fleet_data(&[first, second]);

        assert_eq!(merged.trade_group_counts["North"], 4);
        assert_eq!(merged.mot_due_in_30_days, 3);
        assert_eq!(merged.spare_vehicles, 1);
    }

    #[test]
    fn written_off_total_is_zero_after_merge() {
        let mut first = dataset(vec![vehicle("1", "A", "Allocated")]);
        first.status_counts.insert("Written Off".to_string(), 2);
        first.written_off_vehicles = 2;

        let merged = merge_fleet_data(&[first]);

        // The detail survives in the status map; the recomputed total does
        // not, because written-off rows never reach `vehicles`.
        assert_eq!(merged.status_counts["Written Off"], 2);
        assert_eq!(merged.written_off_vehicles, 0);
    }

    #[test]
    fn merge_of_nothing_is_empty() {
        let merged = merge_fleet_data(&[]);
        assert!(merged.vehicles.is_empty());
        assert_eq!(merged.total_vehicles, 0);
    }
}
