use crate::core::normalize::{display_address, display_name, format_time_12hr, non_blank};
use crate::domain::model::{AppointmentOnly, FilteredAgency};

const CLOSING: &str = "Would you like directions or to hear more options?";

/// Renders ranked agencies into one spoken paragraph for `day_label`.
pub fn summarize(agencies: &[FilteredAgency], day_label: &str) -> String {
    if agencies.is_empty() {
        return format!(
            "I couldn't find any food sites open on {}. Would you like to try a different day?",
            day_label
        );
    }

    let mut sentences = vec![format!(
        "I found {} food site{} near you for {}.",
        agencies.len(),
        if agencies.len() == 1 { "" } else { "s" },
        day_label
    )];

    for agency in agencies {
        sentences.extend(agency_sentences(agency));
    }

    sentences.push(CLOSING.to_string());
    sentences.join(" ")
}

fn agency_sentences(agency: &FilteredAgency) -> Vec<String> {
    let start = format_time_12hr(agency.start_time.as_deref());
    let end = format_time_12hr(agency.end_time.as_deref());
    let time_phrase = match (start, end) {
        (Some(start), Some(end)) => format!("open from {} to {}", start, end),
        _ => "operating hours are currently not available".to_string(),
    };

    let appointment = match agency.appointment_only {
        AppointmentOnly::Yes => "Appointments are required.",
        AppointmentOnly::No | AppointmentOnly::Unknown => "Walk-ins are welcome.",
    };

    let name = display_name(&agency.name);
    let address = display_address(agency.address.as_deref());
    let opening = match address.trim() {
        "" => format!("{} is {}.", name, time_phrase),
        address => format!("{}, located at {}, is {}.", name, address, time_phrase),
    };

    let mut sentences = vec![opening, appointment.to_string()];

    // zero distance means the requester is at the site
    if agency.distance > 0.0 {
        sentences.push(format!("It's about {:.2} miles away.", agency.distance));
    }

    if let Some(model) = non_blank(agency.distribution_model.as_deref()) {
        sentences.push(format!("It's a {} site.", model.to_lowercase()));
    }
    if let Some(format) = non_blank(agency.food_format.as_deref()) {
        sentences.push(format!("They offer {}.", format.to_lowercase()));
    }
    if let Some(frequency) = non_blank(agency.frequency.as_deref()) {
        sentences.push(format!("This site operates {}.", frequency.to_lowercase()));
    }
    if non_blank(agency.pantry_requirements.as_deref()).is_some() {
        sentences.push("You may need an ID or meet other requirements.".to_string());
    }
    if !agency.cultures_served.is_empty() {
        let cultures: Vec<&str> = agency.cultures_served.iter().map(String::as_str).collect();
        sentences.push(format!(
            "This site serves communities including {}.",
            cultures.join(", ")
        ));
    }
    if !agency.wraparound_services.is_empty() {
        sentences.push("Wraparound services are also available.".to_string());
    }
    if let Some(phone) = non_blank(agency.phone.as_deref()) {
        sentences.push(format!("If you have questions, you can call them at {}.", phone));
    }

    sentences
}

/// `"monday"` becomes `"Monday"`; each word is capitalised.
pub fn title_case_day(day: &str) -> String {
    day.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::AgencyType;
    use std::collections::BTreeSet;

    fn bare_agency() -> FilteredAgency {
        FilteredAgency {
            id: "A1".to_string(),
            name: "Partner: Downtown Pantry".to_string(),
            agency_type: AgencyType::ShoppingPartner,
            address: Some("Attn: 123 Main St".to_string()),
            phone: None,
            latitude: 38.9,
            longitude: -77.0,
            distance: 1.25,
            day_of_week: "Monday".to_string(),
            start_time: None,
            end_time: None,
            frequency: None,
            distribution_model: None,
            food_format: None,
            appointment_only: AppointmentOnly::Unknown,
            pantry_requirements: None,
            wraparound_services: BTreeSet::new(),
            cultures_served: BTreeSet::new(),
        }
    }

    #[test]
    fn test_empty_result_apologises_with_day() {
        let text = summarize(&[], "Tuesday");
        assert_eq!(
            text,
            "I couldn't find any food sites open on Tuesday. Would you like to try a different day?"
        );
    }

    #[test]
    fn test_minimal_agency_skips_absent_clauses() {
        let text = summarize(&[bare_agency()], "Monday");
        assert_eq!(
            text,
            "I found 1 food site near you for Monday. \
             Downtown Pantry, located at 123 Main St, is operating hours are currently not available. \
             Walk-ins are welcome. It's about 1.25 miles away. \
             Would you like directions or to hear more options?"
        );
    }

    #[test]
    fn test_full_agency_renders_clauses_in_order() {
        let mut agency = bare_agency();
        agency.start_time = Some("09:00:00".to_string());
        agency.end_time = Some("13:30:00".to_string());
        agency.appointment_only = AppointmentOnly::Yes;
        agency.distribution_model = Some("Home Delivery".to_string());
        agency.food_format = Some("Prepared Meals".to_string());
        agency.frequency = Some("Weekly".to_string());
        agency.pantry_requirements = Some("Photo ID".to_string());
        agency.cultures_served = ["Latino", "Ethiopian"].iter().map(|s| s.to_string()).collect();
        agency.wraparound_services.insert("Clothing".to_string());
        agency.phone = Some("202-555-0100".to_string());

        let text = summarize(&[agency.clone(), agency], "Monday");

        assert!(text.starts_with("I found 2 food sites near you for Monday."));
        assert!(text.contains("is open from 9:00 AM to 1:30 PM. Appointments are required."));
        let ordered = [
            "It's about 1.25 miles away.",
            "It's a home delivery site.",
            "They offer prepared meals.",
            "This site operates weekly.",
            "You may need an ID or meet other requirements.",
            "This site serves communities including Ethiopian, Latino.",
            "Wraparound services are also available.",
            "If you have questions, you can call them at 202-555-0100.",
        ];
        let positions: Vec<usize> = ordered.iter().map(|s| text.find(s).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(text.ends_with(CLOSING));
        assert!(!text.contains(".."));
    }

    #[test]
    fn test_missing_address_drops_location_phrase() {
        let mut agency = bare_agency();
        agency.address = None;
        agency.name = "Pantry".to_string();
        agency.distance = 0.0;

        let text = summarize(&[agency.clone()], "Monday");
        assert_eq!(
            text,
            "I found 1 food site near you for Monday. \
             Pantry is operating hours are currently not available. \
             Walk-ins are welcome. \
             Would you like directions or to hear more options?"
        );

        agency.address = Some("Attn:  ".to_string());
        let text = summarize(&[agency], "Monday");
        assert!(!text.contains("located at"));
    }

    #[test]
    fn test_whole_mile_distance_keeps_decimals() {
        let mut agency = bare_agency();
        agency.distance = 1.0;
        let text = summarize(&[agency], "Monday");
        assert!(text.contains("It's about 1.00 miles away."));
    }

    #[test]
    fn test_partial_hours_fall_back() {
        let mut agency = bare_agency();
        agency.start_time = Some("09:00:00".to_string());
        let text = summarize(&[agency], "Monday");
        assert!(text.contains("operating hours are currently not available"));
    }

    #[test]
    fn test_title_case_day() {
        assert_eq!(title_case_day("monday"), "Monday");
        assert_eq!(title_case_day("WEDNESDAY"), "Wednesday");
        assert_eq!(title_case_day("as needed"), "As Needed");
    }
}
