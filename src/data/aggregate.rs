use std::collections::BTreeMap;

use super::model::{Dimension, Record};

/// One bar of an aggregate: a category label and how many respondents gave it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCount {
    pub label: String,
    pub count: usize,
}

/// Value counts of one dimension, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateTable {
    pub dimension: Dimension,
    pub rows: Vec<CategoryCount>,
}

impl AggregateTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.rows.iter().map(|r| r.count).sum()
    }

    /// `(label, count)` pairs, handy for assertions.
    #[cfg(test)]
    pub fn pairs(&self) -> Vec<(&str, usize)> {
        self.rows.iter().map(|r| (r.label.as_str(), r.count)).collect()
    }
}

/// Count the non-missing values of `dimension`.
///
/// Ordinal dimensions follow their declared order and drop labels outside
/// it; nominal dimensions are sorted by label.
pub fn aggregate<'a>(
    records: impl IntoIterator<Item = &'a Record>,
    dimension: Dimension,
) -> AggregateTable {
    let mut counts: BTreeMap<&'a str, usize> = BTreeMap::new();
    for rec in records {
        if let Some(value) = rec.value(dimension) {
            *counts.entry(value).or_default() += 1;
        }
    }

    let rows = match dimension.order() {
        Some(order) => order
            .iter()
            .filter_map(|label| {
                counts.get(*label).map(|&count| CategoryCount {
                    label: (*label).to_string(),
                    count,
                })
            })
            .collect(),
        None => counts
            .into_iter()
            .map(|(label, count)| CategoryCount {
                label: label.to_string(),
                count,
            })
            .collect(),
    };

    AggregateTable { dimension, rows }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::data::model::tests::respondent;

    fn with_milestones(values: &[Option<&str>]) -> Vec<Record> {
        values.iter().map(|m| respondent("Vista", *m)).collect()
    }

    #[test]
    fn milestones_follow_declared_order() {
        let records = with_milestones(&[Some("Path"), Some("Clarity"), Some("Path"), Some("Alignment")]);
        let table = aggregate(&records, Dimension::Milestone);
        assert_eq!(
            table.pairs(),
            vec![("Clarity", 1), ("Alignment", 1), ("Path", 2)]
        );
    }

    #[test]
    fn order_is_independent_of_row_order() {
        let mut records = with_milestones(&[
            Some("Interviewing & Advancing"),
            Some("Clarity"),
            Some("Search Strategy"),
            Some("Clarity"),
        ]);
        let forward = aggregate(&records, Dimension::Milestone);
        records.reverse();
        assert_eq!(aggregate(&records, Dimension::Milestone), forward);
    }

    #[test]
    fn labels_outside_the_order_are_dropped() {
        let records = with_milestones(&[Some("Path"), Some("Unknown stage"), None]);
        let table = aggregate(&records, Dimension::Milestone);
        assert_eq!(table.pairs(), vec![("Path", 1)]);
    }

    #[test]
    fn milestone_total_counts_non_missing_values() {
        let records = with_milestones(&[Some("Path"), None, Some("Clarity Path"), None]);
        let table = aggregate(&records, Dimension::Milestone);
        assert_eq!(table.total(), 2);
    }

    #[test]
    fn education_levels_sort_by_attainment() {
        let records: Vec<Record> = ["No diploma or GED", "Bachelor's Degree", "No diploma or GED"]
            .into_iter()
            .map(|edu| Record {
                education_level: Some(edu.to_string()),
                ..respondent("Vista", None)
            })
            .collect();
        let table = aggregate(&records, Dimension::EducationLevel);
        assert_eq!(
            table.pairs(),
            vec![("No diploma or GED", 2), ("Bachelor's Degree", 1)]
        );
    }

    #[test]
    fn nominal_dimensions_sort_by_label() {
        let records: Vec<Record> = ["Tech", "Arts", "Tech", "Healthcare"]
            .into_iter()
            .map(|interest| Record {
                industry_interest: Some(interest.to_string()),
                ..respondent("Vista", None)
            })
            .collect();
        let table = aggregate(&records, Dimension::IndustryInterest);
        assert_eq!(
            table.pairs(),
            vec![("Arts", 1), ("Healthcare", 1), ("Tech", 2)]
        );
    }

    #[test]
    fn no_records_no_rows() {
        let records: Vec<Record> = Vec::new();
        for dimension in Dimension::ALL {
            let table = aggregate(&records, dimension);
            assert!(table.is_empty());
            assert_eq!(table.total(), 0);
        }
    }

    #[test]
    fn salary_follows_declared_bands() {
        let records: Vec<Record> = [
            "$100,000 +",
            "Less than $40,000",
            "Honestly, I haven't thought about this",
            "$100,000 +",
            "Between $60,000 and $79,999",
        ]
        .into_iter()
        .map(|salary| Record {
            salary_expectation: Some(salary.to_string()),
            ..respondent("Vista", None)
        })
        .collect();
        let table = aggregate(&records, Dimension::SalaryExpectation);
        assert_eq!(
            table.pairs(),
            vec![
                ("Honestly, I haven't thought about this", 1),
                ("Less than $40,000", 1),
                ("Between $60,000 and $79,999", 1),
                ("$100,000 +", 2),
            ]
        );
    }

    #[test]
    fn career_goals_sort_by_label() {
        let records: Vec<Record> = ["Go to college", "Get a job", "Travel", "Get a job"]
            .into_iter()
            .map(|goal| Record {
                career_goal: Some(goal.to_string()),
                ..respondent("Vista", None)
            })
            .collect();
        let table = aggregate(&records, Dimension::CareerGoal);
        assert_eq!(
            table.pairs(),
            vec![("Get a job", 2), ("Go to college", 1), ("Travel", 1)]
        );
    }
}
