use crate::domain::model::{AgencyListing, AgencyProfile, JoinRow};
use std::collections::HashSet;

/// Distinct (id, name) pairs in first-seen order.
pub fn list_agencies(rows: &[JoinRow]) -> Vec<AgencyListing> {
    let mut seen: HashSet<(&str, &str)> = HashSet::new();
    rows.iter()
        .filter(|row| seen.insert((row.agency_id.as_str(), row.name.as_str())))
        .map(|row| AgencyListing {
            id: row.agency_id.clone(),
            name: row.name.clone(),
        })
        .collect()
}

/// Contact card built from the first row carrying `agency_id`.
pub fn find_agency(rows: &[JoinRow], agency_id: &str) -> Option<AgencyProfile> {
    let agency_id = agency_id.trim();
    rows.iter()
        .find(|row| row.agency_id == agency_id)
        .map(|row| AgencyProfile {
            agency_id: row.agency_id.clone(),
            name: row.name.clone(),
            agency_type: row.agency_type,
            address: row.address.clone(),
            phone: row.phone.clone(),
        })
}
