use eframe::egui::Color32;

use crate::color::ColorMap;
use crate::data::aggregate::AggregateTable;
use crate::data::model::Dimension;

pub const VALUE_AXIS_LABEL: &str = "Number of Members";

/// Which axis carries the categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Categories on the y axis, bars grow to the right.
    Horizontal,
    /// Categories on the x axis, bars grow upwards.
    Vertical,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartBar {
    pub label: String,
    pub count: usize,
    pub color: Color32,
}

/// A fully resolved bar chart, ready to be drawn by any plotting backend.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartArtifact {
    pub dimension: Dimension,
    pub title: &'static str,
    pub category_axis: &'static str,
    pub value_axis: &'static str,
    pub orientation: Orientation,
    pub show_legend: bool,
    /// Same order as the aggregate rows.
    pub bars: Vec<ChartBar>,
}

impl ChartArtifact {
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Largest count, for sizing the value axis.
    pub fn max_count(&self) -> usize {
        self.bars.iter().map(|b| b.count).max().unwrap_or(0)
    }
}

fn title(dimension: Dimension) -> &'static str {
    match dimension {
        Dimension::Milestone => "Milestone Distribution",
        Dimension::IndustryInterest => "Industry Interest Distribution",
        Dimension::SalaryExpectation => "Salary Expectations",
        Dimension::EducationLevel => "Education Level",
        Dimension::CareerGoal => "Next Career Goal",
    }
}

fn orientation(dimension: Dimension) -> Orientation {
    match dimension {
        Dimension::Milestone | Dimension::IndustryInterest => Orientation::Horizontal,
        _ => Orientation::Vertical,
    }
}

/// Turn an aggregate into a bar chart coloured by category, legend off.
pub fn render(table: &AggregateTable) -> ChartArtifact {
    let colors = ColorMap::for_dimension(
        table.dimension,
        table.rows.iter().map(|r| r.label.as_str()),
    );

    let bars = table
        .rows
        .iter()
        .map(|r| ChartBar {
            label: r.label.clone(),
            count: r.count,
            color: colors.color_for(&r.label),
        })
        .collect();

    ChartArtifact {
        dimension: table.dimension,
        title: title(table.dimension),
        category_axis: table.dimension.category_label(),
        value_axis: VALUE_AXIS_LABEL,
        orientation: orientation(table.dimension),
        show_legend: false,
        bars,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::aggregate::CategoryCount;

    fn table(dimension: Dimension, rows: &[(&str, usize)]) -> AggregateTable {
        AggregateTable {
            dimension,
            rows: rows
                .iter()
                .map(|(label, count)| CategoryCount {
                    label: label.to_string(),
                    count: *count,
                })
                .collect(),
        }
    }

    #[test]
    fn bars_follow_table_order() {
        let chart = render(&table(
            Dimension::SalaryExpectation,
            &[("Less than $40,000", 3), ("$100,000 +", 1)],
        ));
        let labels: Vec<&str> = chart.bars.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, ["Less than $40,000", "$100,000 +"]);
        assert_eq!(chart.max_count(), 3);
        assert_eq!(chart.orientation, Orientation::Vertical);
        assert_eq!(chart.category_axis, "Salary Expectation");
        assert_eq!(chart.value_axis, "Number of Members");
    }

    #[test]
    fn milestone_chart_uses_fixed_colours_and_no_legend() {
        let chart = render(&table(Dimension::Milestone, &[("Clarity", 2), ("Path", 1)]));
        assert_eq!(chart.title, "Milestone Distribution");
        assert_eq!(chart.orientation, Orientation::Horizontal);
        assert!(!chart.show_legend);
        assert_eq!(chart.bars[0].color, Color32::from_rgb(0x00, 0xA3, 0xE1));
        assert_eq!(chart.bars[1].color, Color32::from_rgb(0xD0, 0x4D, 0x9D));
    }

    #[test]
    fn legend_is_off_everywhere() {
        for dimension in Dimension::ALL {
            let chart = render(&table(dimension, &[]));
            assert!(!chart.show_legend);
            assert!(chart.is_empty());
            assert_eq!(chart.max_count(), 0);
        }
    }
}
