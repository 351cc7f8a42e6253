// Status classification shared by the per-type bucketing done during a scan
// and the fleet-wide summary recomputation done after a merge. Both paths
// must agree on what counts as allocated/spare/garage/reserved, so the
// substring rules live in exactly one place.

/// Fleet status bucket derived from the free-text status column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusBucket {
    Allocated,
    Spare,
    Garage,
    Reserved,
    WrittenOff,
}

/// Classifies a free-text status by case-insensitive substring match.
///
/// Returns `None` when no rule matches. Call sites decide what an unmatched
/// status means: the per-type aggregator treats it as allocated (the
/// historical catch-all), the summary totals count it nowhere.
pub fn classify_status(status: &str) -> Option<StatusBucket> {
    let s = status.to_lowercase();
    if s.contains("written off") || s.contains("sold") {
        Some(StatusBucket::WrittenOff)
    } else if s.contains("allocated") {
        Some(StatusBucket::Allocated)
    } else if s.contains("spare") || s.contains("available") {
        Some(StatusBucket::Spare)
    } else if s.contains("garage") || s.contains("repair") {
        Some(StatusBucket::Garage)
    } else if s.contains("reserved") {
        Some(StatusBucket::Reserved)
    } else {
        None
    }
}
