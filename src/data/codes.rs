//! Static recoding tables: code maps, display orders and source headers.
//!
//! Everything here is fixed configuration of the survey export. Keep the
//! tables in sync with the questionnaire codebook when it changes.

// ---------------------------------------------------------------------------
// Source column headers
// ---------------------------------------------------------------------------

pub const HOST_SITE_COLUMN: &str = "Host Site";
pub const AGE_COLUMN: &str = "Age";
pub const EDU_LEVEL_COLUMN: &str = "EduLevel";
pub const MILESTONE_COLUMN: &str = "Milestone Link";
pub const INDUSTRY_COLUMN: &str = "Interest_primary_proper";
pub const SALARY_COLUMN: &str = "A14 Salary Expectation OpenTextLink";
pub const CAREER_GOAL_COLUMN: &str = "Career_goal_label";

/// Every header the loader requires, in the order errors are reported.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    HOST_SITE_COLUMN,
    AGE_COLUMN,
    EDU_LEVEL_COLUMN,
    MILESTONE_COLUMN,
    INDUSTRY_COLUMN,
    SALARY_COLUMN,
    CAREER_GOAL_COLUMN,
];

// ---------------------------------------------------------------------------
// Code maps
// ---------------------------------------------------------------------------

/// Raw Host Site code → organization name.
pub const HOST_SITE_CODES: [(&str, &str); 22] = [
    ("1.0", "Chelan-Douglas Community Action Council"),
    ("4.0", "City Year, Inc. - City Year Seattle"),
    ("5.0", "CivicWell - CivicSpark WA"),
    ("6.0", "College Possible - College Possible WA"),
    ("7.0", "College Success Foundation"),
    ("8.0", "Common Threads Farm"),
    ("9.0", "EarthCorps"),
    ("10.0", "ESD - Washington Service Corps"),
    ("12.0", "ESD. - Washington Reading Corps"),
    ("11.0", "ESD. - Public Health AmeriCorps"),
    ("13.0", "iFoster - TAY AmeriCorps WA"),
    ("14.0", "NEW ESD 101 - Spokane Service Team"),
    ("15.0", "Pasco School District 1 - Serve Tri-Cities"),
    ("16.0", "Port Angeles School District"),
    ("17.0", "Sea Mar Community Health Center"),
    ("18.0", "Tacoma Boat Builders - Imagine Justice"),
    ("19.0", "United Way of Benton and Franklin Counties"),
    ("20.0", "United Way of King County"),
    ("24.0", "Vista"),
    ("21.0", "WA State Dept. of Veteran Affairs - Vet Corps"),
    ("22.0", "Washington Association of Child Advocate Programs"),
    ("23.0", "Washington Conservation Corps"),
];

/// Raw EduLevel code → education label.
pub const EDUCATION_CODES: [(&str, &str); 8] = [
    ("1.0", "No diploma or GED"),
    ("2.0", "HS Diploma"),
    ("3.0", "GED"),
    ("4.0", "Some College"),
    ("5.0", "Associate's Degree"),
    ("6.0", "Technical or vocational certificate"),
    ("7.0", "Bachelor's Degree"),
    ("8.0", "Master's Degree or PhD"),
];

/// Exact-match lookup in a code map. Unknown codes yield `None`.
pub fn recode(map: &[(&str, &'static str)], raw: &str) -> Option<&'static str> {
    map.iter()
        .find(|(code, _)| *code == raw)
        .map(|(_, label)| *label)
}

// ---------------------------------------------------------------------------
// Display orders
// ---------------------------------------------------------------------------

pub const MILESTONE_ORDER: [&str; 6] = [
    "Clarity",
    "Alignment",
    "Search Strategy",
    "Interviewing & Advancing",
    "Clarity Path",
    "Path",
];

pub const SALARY_ORDER: [&str; 6] = [
    "Honestly, I haven't thought about this",
    "Less than $40,000",
    "Between $40,000 and $59,999",
    "Between $60,000 and $79,999",
    "Between $80,000 and $99,999",
    "$100,000 +",
];

/// Same labels as [`EDUCATION_CODES`], in ascending attainment.
pub const EDUCATION_ORDER: [&str; 8] = [
    "No diploma or GED",
    "HS Diploma",
    "GED",
    "Some College",
    "Associate's Degree",
    "Technical or vocational certificate",
    "Bachelor's Degree",
    "Master's Degree or PhD",
];

// ---------------------------------------------------------------------------
// Fixed colours
// ---------------------------------------------------------------------------

/// Milestone label → RGB. "Clarity Path" and "Path" reuse two stage colours.
pub const MILESTONE_COLORS: [(&str, [u8; 3]); 6] = [
    ("Clarity", [0x00, 0xA3, 0xE1]),
    ("Alignment", [0x85, 0xC5, 0x40]),
    ("Search Strategy", [0xD0, 0x4D, 0x9D]),
    ("Interviewing & Advancing", [0xFF, 0xC5, 0x07]),
    ("Clarity Path", [0x00, 0xA3, 0xE1]),
    ("Path", [0xD0, 0x4D, 0x9D]),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_site_recoding_is_exact_match() {
        assert_eq!(
            recode(&HOST_SITE_CODES, "1.0"),
            Some("Chelan-Douglas Community Action Council")
        );
        assert_eq!(recode(&HOST_SITE_CODES, "24.0"), Some("Vista"));
        assert_eq!(recode(&HOST_SITE_CODES, "1"), None);
        assert_eq!(recode(&HOST_SITE_CODES, "99.0"), None);
        assert_eq!(recode(&HOST_SITE_CODES, ""), None);
    }

    #[test]
    fn code_maps_have_unique_codes() {
        for map in [&HOST_SITE_CODES[..], &EDUCATION_CODES[..]] {
            for (i, (code, _)) in map.iter().enumerate() {
                assert!(
                    map[i + 1..].iter().all(|(other, _)| other != code),
                    "duplicate code {code}"
                );
            }
        }
    }

    #[test]
    fn education_order_covers_every_label() {
        for (_, label) in EDUCATION_CODES {
            assert!(EDUCATION_ORDER.contains(&label), "{label} missing from order");
        }
        assert_eq!(EDUCATION_ORDER.len(), EDUCATION_CODES.len());
    }

    #[test]
    fn milestone_colors_follow_order() {
        let labels: Vec<&str> = MILESTONE_COLORS.iter().map(|(l, _)| *l).collect();
        assert_eq!(labels, MILESTONE_ORDER);
    }
}
