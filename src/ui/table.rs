use eframe::egui::{Align, Layout, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::codes::REQUIRED_COLUMNS;
use crate::data::filter::filter;
use crate::data::model::Record;
use crate::state::AppState;

/// Cells in `REQUIRED_COLUMNS` order.
fn cells(rec: &Record) -> [String; 7] {
    let text = |v: &Option<String>| v.clone().unwrap_or_default();
    [
        rec.host_site.clone(),
        rec.age.map(|a| a.to_string()).unwrap_or_default(),
        text(&rec.education_level),
        text(&rec.milestone),
        text(&rec.industry_interest),
        text(&rec.salary_expectation),
        text(&rec.career_goal),
    ]
}

/// Filtered respondents as a scrollable table.
pub fn records_table(ui: &mut Ui, state: &AppState) {
    let Some(ds) = &state.dataset else {
        return;
    };
    let view = filter(ds, &state.selection);
    let indices = view.indices();

    ui.heading("Respondents");
    if view.is_empty() {
        ui.weak("No respondents for the current selection");
        return;
    }
    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(Layout::left_to_right(Align::Center))
        .columns(Column::auto().at_least(80.0), REQUIRED_COLUMNS.len())
        .min_scrolled_height(0.0)
        .max_scroll_height(360.0)
        .header(20.0, |mut header| {
            for name in REQUIRED_COLUMNS {
                header.col(|ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, indices.len(), |mut row| {
                let rec = &ds.records[indices[row.index()]];
                for cell in cells(rec) {
                    row.col(|ui| {
                        ui.label(cell);
                    });
                }
            });
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::respondent;

    #[test]
    fn missing_values_render_blank() {
        let mut rec = respondent("Vista", Some("Path"));
        rec.age = Some(23.0);
        let row = cells(&rec);
        assert_eq!(row[0], "Vista");
        assert_eq!(row[1], "23");
        assert_eq!(row[2], "");
        assert_eq!(row[3], "Path");
    }

    #[test]
    fn fractional_age_is_shown_as_parsed() {
        let mut rec = respondent("Vista", None);
        rec.age = Some(22.5);
        assert_eq!(cells(&rec)[1], "22.5");
    }
}
