//! Three-letter race codes and regions derived from free-text race names.
//!
//! The table is kept by hand and must follow the calendar from season to
//! season. Entries are tested in order and the first one with a matching
//! needle wins, so `"spanish"` has to stay ahead of the `"spa"` needle used
//! for Belgium.

use crate::data_fetcher::models::Region;

/// Code returned for a race name no entry matches.
pub const FALLBACK_CODE: &str = "GP";

struct RaceIdentity {
    needles: &'static [&'static str],
    code: &'static str,
    region: Region,
}

const RACE_TABLE: &[RaceIdentity] = &[
    RaceIdentity { needles: &["australian"], code: "AUS", region: Region::AsiaPacific },
    RaceIdentity { needles: &["bahrain"], code: "BHR", region: Region::MiddleEast },
    RaceIdentity { needles: &["saudi"], code: "SAU", region: Region::MiddleEast },
    RaceIdentity { needles: &["japanese"], code: "JPN", region: Region::AsiaPacific },
    RaceIdentity { needles: &["chinese"], code: "CHN", region: Region::AsiaPacific },
    RaceIdentity { needles: &["miami"], code: "MIA", region: Region::Americas },
    RaceIdentity { needles: &["emilia", "imola"], code: "EMI", region: Region::Europe },
    RaceIdentity { needles: &["monaco"], code: "MCO", region: Region::Europe },
    RaceIdentity {
        needles: &["spanish", "spain", "catalunya", "barcelona"],
        code: "ESP",
        region: Region::Europe,
    },
    RaceIdentity { needles: &["canadian", "canada"], code: "CAN", region: Region::Americas },
    RaceIdentity { needles: &["austrian", "austria"], code: "AUT", region: Region::Europe },
    RaceIdentity { needles: &["british", "silverstone"], code: "GBR", region: Region::Europe },
    RaceIdentity { needles: &["hungarian", "hungary"], code: "HUN", region: Region::Europe },
    RaceIdentity { needles: &["belgian", "spa"], code: "BEL", region: Region::Europe },
    RaceIdentity { needles: &["dutch", "netherlands"], code: "NED", region: Region::Europe },
    RaceIdentity { needles: &["italian", "monza"], code: "ITA", region: Region::Europe },
    RaceIdentity { needles: &["madrid"], code: "MAD", region: Region::Europe },
    RaceIdentity { needles: &["azerbaijan", "baku"], code: "AZE", region: Region::Europe },
    RaceIdentity { needles: &["singapore"], code: "SGP", region: Region::AsiaPacific },
    RaceIdentity {
        needles: &["united states", "austin"],
        code: "USA",
        region: Region::Americas,
    },
    RaceIdentity { needles: &["mexico"], code: "MEX", region: Region::Americas },
    RaceIdentity {
        needles: &["brazil", "são paulo", "sao paulo"],
        code: "BRA",
        region: Region::Americas,
    },
    RaceIdentity { needles: &["las vegas"], code: "LVS", region: Region::Americas },
    RaceIdentity { needles: &["qatar"], code: "QAT", region: Region::MiddleEast },
    RaceIdentity { needles: &["abu dhabi"], code: "ABU", region: Region::MiddleEast },
];

fn lookup(name: &str) -> Option<&'static RaceIdentity> {
    let lowered = name.to_lowercase();
    RACE_TABLE
        .iter()
        .find(|entry| entry.needles.iter().any(|needle| lowered.contains(needle)))
}

/// Code and region for a race name, `("GP", Region::Other)` when unknown.
pub fn race_identity(name: &str) -> (&'static str, Region) {
    lookup(name)
        .map(|entry| (entry.code, entry.region))
        .unwrap_or((FALLBACK_CODE, Region::Other))
}

/// Three-letter code for a race name.
///
/// # Example
/// ```
/// use f1_race_data::data_fetcher::processors::race_code;
///
/// assert_eq!(race_code("Japanese Grand Prix"), "JPN");
/// assert_eq!(race_code("Grand Prix of the Moon"), "GP");
/// ```
pub fn race_code(name: &str) -> &'static str {
    race_identity(name).0
}

/// Calendar region for a race name.
pub fn race_region(name: &str) -> Region {
    race_identity(name).1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_names() {
        let cases = [
            ("Australian Grand Prix", "AUS", Region::AsiaPacific),
            ("Bahrain Grand Prix", "BHR", Region::MiddleEast),
            ("Saudi Arabian Grand Prix", "SAU", Region::MiddleEast),
            ("Japanese Grand Prix", "JPN", Region::AsiaPacific),
            ("Chinese Grand Prix", "CHN", Region::AsiaPacific),
            ("Miami Grand Prix", "MIA", Region::Americas),
            ("Emilia Romagna Grand Prix", "EMI", Region::Europe),
            ("Monaco Grand Prix", "MCO", Region::Europe),
            ("Spanish Grand Prix", "ESP", Region::Europe),
            ("Barcelona-Catalunya Grand Prix", "ESP", Region::Europe),
            ("Canadian Grand Prix", "CAN", Region::Americas),
            ("Austrian Grand Prix", "AUT", Region::Europe),
            ("British Grand Prix", "GBR", Region::Europe),
            ("Hungarian Grand Prix", "HUN", Region::Europe),
            ("Belgian Grand Prix", "BEL", Region::Europe),
            ("Dutch Grand Prix", "NED", Region::Europe),
            ("Italian Grand Prix", "ITA", Region::Europe),
            ("Madrid Grand Prix", "MAD", Region::Europe),
            ("Azerbaijan Grand Prix", "AZE", Region::Europe),
            ("Singapore Grand Prix", "SGP", Region::AsiaPacific),
            ("United States Grand Prix", "USA", Region::Americas),
            ("Mexico City Grand Prix", "MEX", Region::Americas),
            ("São Paulo Grand Prix", "BRA", Region::Americas),
            ("Las Vegas Grand Prix", "LVS", Region::Americas),
            ("Qatar Grand Prix", "QAT", Region::MiddleEast),
            ("Abu Dhabi Grand Prix", "ABU", Region::MiddleEast),
        ];

        for (name, code, region) in cases {
            assert_eq!(race_identity(name), (code, region), "{name}");
        }
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        assert_eq!(race_identity("MONACO GRAND PRIX"), ("MCO", Region::Europe));
        assert_eq!(race_identity("las VEGAS grand prix"), ("LVS", Region::Americas));
        assert_eq!(race_identity("SÃO PAULO GRAND PRIX"), ("BRA", Region::Americas));
    }

    #[test]
    fn test_unknown_names_fall_back() {
        for name in ["", "Grand Prix", "Portuguese Grand Prix", "70th Anniversary"] {
            assert_eq!(race_identity(name), ("GP", Region::Other), "{name}");
        }
    }

    #[test]
    fn test_spanish_is_not_belgian() {
        // "spanish" contains "spa"; table order keeps it Spanish
        assert_eq!(race_code("Spanish Grand Prix"), "ESP");
        assert_eq!(race_code("Spa 24h"), "BEL");
    }

    #[test]
    fn test_derivation_is_deterministic() {
        for entry in RACE_TABLE {
            let name = format!("{} Grand Prix", entry.needles[0]);
            assert_eq!(race_identity(&name), race_identity(&name));
            assert_eq!(race_code(&name), entry.code, "{name}");
            assert_eq!(race_region(&name), entry.region, "{name}");
        }
    }
}
