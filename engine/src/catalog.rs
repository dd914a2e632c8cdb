//! Zone catalog - curated city suggestions and IANA database search for the
//! add-zone picker. The engine itself never validates through this list;
//! conversions fail soft on their own.

use chrono_tz::Tz;

/// A suggested city with its backing IANA zone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CitySuggestion {
    pub iana_name: &'static str,
    pub label: &'static str,
}

/// Popular cities offered before any search, alphabetical by label.
/// Several share a zone (e.g. Bangalore and Mumbai) on purpose.
pub const COMMON_CITIES: &[CitySuggestion] = &[
    CitySuggestion { iana_name: "Pacific/Auckland", label: "Auckland" },
    CitySuggestion { iana_name: "Asia/Kolkata", label: "Bangalore" },
    CitySuggestion { iana_name: "Europe/Berlin", label: "Berlin" },
    CitySuggestion { iana_name: "America/Chicago", label: "Chicago" },
    CitySuggestion { iana_name: "America/Denver", label: "Denver" },
    CitySuggestion { iana_name: "Asia/Dubai", label: "Dubai" },
    CitySuggestion { iana_name: "Asia/Hong_Kong", label: "Hong Kong" },
    CitySuggestion { iana_name: "Europe/London", label: "London" },
    CitySuggestion { iana_name: "America/Los_Angeles", label: "Los Angeles" },
    CitySuggestion { iana_name: "Europe/Moscow", label: "Moscow" },
    CitySuggestion { iana_name: "Asia/Kolkata", label: "Mumbai" },
    CitySuggestion { iana_name: "America/New_York", label: "New York" },
    CitySuggestion { iana_name: "Europe/Paris", label: "Paris" },
    CitySuggestion { iana_name: "America/New_York", label: "Philadelphia" },
    CitySuggestion { iana_name: "America/Los_Angeles", label: "San Francisco" },
    CitySuggestion { iana_name: "America/Sao_Paulo", label: "São Paulo" },
    CitySuggestion { iana_name: "Asia/Shanghai", label: "Shanghai" },
    CitySuggestion { iana_name: "Asia/Singapore", label: "Singapore" },
    CitySuggestion { iana_name: "Australia/Sydney", label: "Sydney" },
    CitySuggestion { iana_name: "Asia/Jerusalem", label: "Tel Aviv" },
    CitySuggestion { iana_name: "Asia/Tokyo", label: "Tokyo" },
    CitySuggestion { iana_name: "America/Toronto", label: "Toronto" },
];

/// Case-insensitive substring match over a city's label or zone name.
pub fn search_cities(query: &str) -> Vec<CitySuggestion> {
    let query_lower = query.to_lowercase();
    COMMON_CITIES
        .iter()
        .filter(|city| {
            city.label.to_lowercase().contains(&query_lower)
                || city.iana_name.to_lowercase().contains(&query_lower)
        })
        .copied()
        .collect()
}

/// Search the IANA database by name (case-insensitive partial match).
pub fn search_timezones(query: &str) -> Vec<Tz> {
    let query_lower = query.to_lowercase();
    chrono_tz::TZ_VARIANTS
        .iter()
        .filter(|tz| tz.name().to_lowercase().contains(&query_lower))
        .copied()
        .collect()
}

/// Derive a display label from an IANA name: the last path segment with
/// underscores spaced ("America/New_York" -> "New York").
pub fn default_label(iana_name: &str) -> String {
    iana_name
        .rsplit('/')
        .next()
        .unwrap_or(iana_name)
        .replace('_', " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn common_cities_resolve_to_real_zones() {
        for city in COMMON_CITIES {
            assert!(
                city.iana_name.parse::<Tz>().is_ok(),
                "unknown zone {}",
                city.iana_name
            );
        }
    }

    #[test]
    fn city_search_matches_label_and_zone() {
        let by_label = search_cities("tokyo");
        assert!(by_label.iter().any(|c| c.label == "Tokyo"));
        let by_zone = search_cities("kolkata");
        assert!(by_zone.iter().any(|c| c.label == "Mumbai"));
    }

    #[test]
    fn timezone_search_finds_new_york() {
        let results = search_timezones("New_York");
        assert!(results.iter().any(|tz| tz.name() == "America/New_York"));
    }

    #[test]
    fn default_label_spaces_the_city_segment() {
        assert_eq!(default_label("America/New_York"), "New York");
        assert_eq!(default_label("UTC"), "UTC");
        assert_eq!(default_label("America/Argentina/Buenos_Aires"), "Buenos Aires");
    }
}
