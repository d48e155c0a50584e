use crate::domain::model::AS_NEEDED_DAY;

pub const HOME_DELIVERY_MARKER: &str = "Home Delivery";

/// How a raw "As Needed" day value is recognised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseSensitivity {
    /// Raw day must equal "As Needed" exactly.
    Exact,
    /// Raw day may differ from "As Needed" in case only.
    Insensitive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayFilter<'a> {
    requested: &'a str,
    as_needed: CaseSensitivity,
}

impl<'a> DayFilter<'a> {
    pub fn new(requested: &'a str, as_needed: CaseSensitivity) -> Self {
        Self {
            requested,
            as_needed,
        }
    }

    pub fn matches(&self, raw_day: &str) -> bool {
        raw_day.to_lowercase() == self.requested.to_lowercase() || self.is_as_needed(raw_day)
    }

    fn is_as_needed(&self, raw_day: &str) -> bool {
        match self.as_needed {
            CaseSensitivity::Exact => raw_day == AS_NEEDED_DAY,
            CaseSensitivity::Insensitive => raw_day.eq_ignore_ascii_case(AS_NEEDED_DAY),
        }
    }
}

pub fn within_radius(distance: f64, radius_miles: f64) -> bool {
    distance <= radius_miles
}

pub fn offers_home_delivery(distribution_model: Option<&str>) -> bool {
    distribution_model.is_some_and(|model| model.contains(HOME_DELIVERY_MARKER))
}

/// Passes everything unless the requester opted into home delivery.
pub fn passes_home_delivery(requested: bool, distribution_model: Option<&str>) -> bool {
    !requested || offers_home_delivery(distribution_model)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_match_ignores_case() {
        let filter = DayFilter::new("monday", CaseSensitivity::Exact);
        assert!(filter.matches("Monday"));
        assert!(filter.matches("MONDAY"));
        assert!(!filter.matches("Tuesday"));
    }

    #[test]
    fn test_as_needed_matches_any_day() {
        let filter = DayFilter::new("monday", CaseSensitivity::Exact);
        assert!(filter.matches("As Needed"));
        assert!(!filter.matches("as needed"));

        let filter = DayFilter::new("friday", CaseSensitivity::Insensitive);
        assert!(filter.matches("As Needed"));
        assert!(filter.matches("as needed"));
    }

    #[test]
    fn test_null_day_never_matches_a_real_day() {
        for day in ["monday", "sunday"] {
            let filter = DayFilter::new(day, CaseSensitivity::Insensitive);
            assert!(!filter.matches("Null"));
        }
    }

    #[test]
    fn test_radius_is_inclusive() {
        assert!(within_radius(5.0, 5.0));
        assert!(!within_radius(5.01, 5.0));
    }

    #[test]
    fn test_home_delivery_predicate() {
        assert!(passes_home_delivery(false, None));
        assert!(!passes_home_delivery(true, None));
        assert!(!passes_home_delivery(true, Some("Client Choice")));
        assert!(passes_home_delivery(true, Some("Client Choice, Home Delivery")));
    }
}
