use eframe::egui::{self, ScrollArea, Ui};

use crate::chart::ChartArtifact;
use crate::data::model::Dimension;
use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct SurveyDashApp {
    pub state: AppState,
}

impl SurveyDashApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

fn chart_for(state: &AppState, dimension: Dimension) -> Option<&ChartArtifact> {
    state.charts.iter().find(|c| c.dimension == dimension)
}

fn draw_chart(ui: &mut Ui, state: &AppState, dimension: Dimension) {
    if let Some(chart) = chart_for(state, dimension) {
        plot::bar_chart(ui, &format!("{dimension:?}_chart"), chart);
    }
}

/// Metric and milestones on top, then industry, salary, and the
/// education / career goal pair.
fn dashboard(ui: &mut Ui, state: &AppState) {
    ui.heading(egui::RichText::new(&state.config.title).size(28.0));
    ui.add_space(8.0);

    let width = ui.available_width();
    ui.horizontal_top(|ui: &mut Ui| {
        ui.allocate_ui(egui::vec2(width / 3.0, plot::CHART_HEIGHT), |ui: &mut Ui| {
            ui.vertical(|ui: &mut Ui| {
                ui.heading("Number of Diagnostic Takers");
                plot::metric(ui, "Number of Diagnostic Takers", state.record_count());
            });
        });
        let rest = ui.available_width();
        ui.allocate_ui(egui::vec2(rest, plot::CHART_HEIGHT), |ui: &mut Ui| {
            ui.vertical(|ui: &mut Ui| draw_chart(ui, state, Dimension::Milestone));
        });
    });

    ui.separator();
    draw_chart(ui, state, Dimension::IndustryInterest);
    ui.separator();
    draw_chart(ui, state, Dimension::SalaryExpectation);
    ui.separator();

    ui.columns(2, |cols: &mut [Ui]| {
        draw_chart(&mut cols[0], state, Dimension::EducationLevel);
        draw_chart(&mut cols[1], state, Dimension::CareerGoal);
    });

    if state.show_records {
        ui.separator();
        table::records_table(ui, state);
    }
}

impl eframe::App for SurveyDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: Host Site filter ----
        egui::SidePanel::left("filter_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: metric and charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| dashboard(ui, &self.state));
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DashboardConfig;

    #[test]
    fn charts_are_looked_up_by_dimension() {
        let mut state = AppState::new(DashboardConfig::default());
        assert!(chart_for(&state, Dimension::Milestone).is_none());

        state.set_dataset("mem.csv".into(), Default::default());
        let chart = chart_for(&state, Dimension::CareerGoal).unwrap();
        assert_eq!(chart.title, "Next Career Goal");
        assert!(chart.is_empty());
    }
}
