use std::collections::HashSet;
use std::fmt;

use super::codes::{EDUCATION_ORDER, MILESTONE_ORDER, SALARY_ORDER};

// ---------------------------------------------------------------------------
// Record – one survey respondent
// ---------------------------------------------------------------------------

/// A single respondent after recoding. Every categorical answer other than
/// the Host Site may be missing.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Organization label. Rows without a recognised Host Site never make it
    /// into a [`Dataset`].
    pub host_site: String,
    pub age: Option<f64>,
    /// `None` when the raw code was absent or not in the code map.
    pub education_level: Option<String>,
    pub milestone: Option<String>,
    pub industry_interest: Option<String>,
    pub salary_expectation: Option<String>,
    pub career_goal: Option<String>,
}

impl Record {
    /// Value of one aggregated dimension for this respondent.
    pub fn value(&self, dimension: Dimension) -> Option<&str> {
        let field = match dimension {
            Dimension::Milestone => &self.milestone,
            Dimension::IndustryInterest => &self.industry_interest,
            Dimension::SalaryExpectation => &self.salary_expectation,
            Dimension::EducationLevel => &self.education_level,
            Dimension::CareerGoal => &self.career_goal,
        };
        field.as_deref()
    }
}

// ---------------------------------------------------------------------------
// Dimension – the five aggregated target columns
// ---------------------------------------------------------------------------

/// One of the survey answers the dashboard charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Dimension {
    Milestone,
    IndustryInterest,
    SalaryExpectation,
    EducationLevel,
    CareerGoal,
}

impl Dimension {
    /// Dashboard order.
    pub const ALL: [Dimension; 5] = [
        Dimension::Milestone,
        Dimension::IndustryInterest,
        Dimension::SalaryExpectation,
        Dimension::EducationLevel,
        Dimension::CareerGoal,
    ];

    /// Declared display order, if the answer is ordinal.
    pub fn order(self) -> Option<&'static [&'static str]> {
        match self {
            Dimension::Milestone => Some(&MILESTONE_ORDER[..]),
            Dimension::SalaryExpectation => Some(&SALARY_ORDER[..]),
            Dimension::EducationLevel => Some(&EDUCATION_ORDER[..]),
            Dimension::IndustryInterest | Dimension::CareerGoal => None,
        }
    }

    /// Axis label for the category values.
    pub fn category_label(self) -> &'static str {
        match self {
            Dimension::Milestone => "Milestone Score",
            Dimension::IndustryInterest => "Industry of Interest",
            Dimension::SalaryExpectation => "Salary Expectation",
            Dimension::EducationLevel => "Education Level",
            Dimension::CareerGoal => "Next Career Goal",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.category_label())
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded survey
// ---------------------------------------------------------------------------

/// The recoded survey plus the Host Site labels in first-seen order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub records: Vec<Record>,
    /// Distinct Host Site labels, in the order they first appear.
    pub host_sites: Vec<String>,
}

impl Dataset {
    /// Build the Host Site index from the loaded records.
    pub fn from_records(records: Vec<Record>) -> Self {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut host_sites = Vec::new();
        for rec in &records {
            if seen.insert(rec.host_site.as_str()) {
                host_sites.push(rec.host_site.clone());
            }
        }
        Dataset {
            records,
            host_sites,
        }
    }

    /// Number of respondents.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Respondent with only the Host Site and Milestone filled in.
    pub(crate) fn respondent(host_site: &str, milestone: Option<&str>) -> Record {
        Record {
            host_site: host_site.to_string(),
            age: None,
            education_level: None,
            milestone: milestone.map(str::to_string),
            industry_interest: None,
            salary_expectation: None,
            career_goal: None,
        }
    }

    #[test]
    fn host_sites_keep_first_seen_order() {
        let ds = Dataset::from_records(vec![
            respondent("Vista", None),
            respondent("EarthCorps", None),
            respondent("Vista", None),
            respondent("Common Threads Farm", None),
        ]);
        assert_eq!(ds.host_sites, ["Vista", "EarthCorps", "Common Threads Farm"]);
        assert_eq!(ds.len(), 4);
    }

    #[test]
    fn value_reads_matching_field() {
        let mut rec = respondent("Vista", Some("Path"));
        rec.career_goal = Some("Go to college".to_string());
        assert_eq!(rec.value(Dimension::Milestone), Some("Path"));
        assert_eq!(rec.value(Dimension::CareerGoal), Some("Go to college"));
        assert_eq!(rec.value(Dimension::EducationLevel), None);
    }

    #[test]
    fn only_nominal_dimensions_lack_an_order() {
        let unordered: Vec<Dimension> = Dimension::ALL
            .into_iter()
            .filter(|d| d.order().is_none())
            .collect();
        assert_eq!(
            unordered,
            [Dimension::IndustryInterest, Dimension::CareerGoal]
        );
    }
}
