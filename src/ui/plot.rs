use std::ops::RangeInclusive;

use eframe::egui::{RichText, Ui};
use egui_plot::{Bar, BarChart, GridMark, Plot};

use crate::chart::{ChartArtifact, Orientation};

pub const CHART_HEIGHT: f32 = 320.0;

// ---------------------------------------------------------------------------
// Bar chart
// ---------------------------------------------------------------------------

/// Axis formatter printing the category name at each integer position.
fn category_formatter(
    labels: Vec<String>,
) -> impl Fn(GridMark, &RangeInclusive<f64>) -> String + 'static {
    move |mark, _range| {
        let idx = mark.value.round();
        if idx < 0.0 || (mark.value - idx).abs() > 1e-6 {
            return String::new();
        }
        labels.get(idx as usize).cloned().unwrap_or_default()
    }
}

/// Draw one aggregate chart. `id` must be unique per chart on screen.
pub fn bar_chart(ui: &mut Ui, id: &str, chart: &ChartArtifact) {
    ui.heading(chart.title);
    if chart.is_empty() {
        ui.weak("No data for the current selection");
    }

    let bars: Vec<Bar> = chart
        .bars
        .iter()
        .enumerate()
        .map(|(i, b)| {
            Bar::new(i as f64, b.count as f64)
                .name(&b.label)
                .fill(b.color)
                .width(0.7)
        })
        .collect();

    let mut series = BarChart::new(bars)
        .name(chart.value_axis)
        .element_formatter(Box::new(|bar: &Bar, _chart: &BarChart| {
            format!("{}: {}", bar.name, bar.value)
        }));
    if chart.orientation == Orientation::Horizontal {
        series = series.horizontal();
    }

    let labels: Vec<String> = chart.bars.iter().map(|b| b.label.clone()).collect();
    let top = chart.max_count().max(1) as f64;

    let mut plot = Plot::new(id)
        .height(CHART_HEIGHT)
        .allow_boxed_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false);
    if chart.show_legend {
        plot = plot.legend(egui_plot::Legend::default());
    }

    plot = match chart.orientation {
        Orientation::Horizontal => plot
            .x_axis_label(chart.value_axis)
            .y_axis_label(chart.category_axis)
            .y_axis_formatter(category_formatter(labels))
            .include_x(0.0)
            .include_x(top)
            .include_y(-0.5)
            .include_y(chart.bars.len() as f64 - 0.5),
        Orientation::Vertical => plot
            .x_axis_label(chart.category_axis)
            .y_axis_label(chart.value_axis)
            .x_axis_formatter(category_formatter(labels))
            .include_y(0.0)
            .include_y(top)
            .include_x(-0.5)
            .include_x(chart.bars.len() as f64 - 0.5),
    };

    plot.show(ui, |plot_ui| {
        plot_ui.bar_chart(series);
    });
}

// ---------------------------------------------------------------------------
// Metric
// ---------------------------------------------------------------------------

/// Big single number with a caption, like a KPI tile.
pub fn metric(ui: &mut Ui, label: &str, value: usize) {
    ui.vertical(|ui: &mut Ui| {
        ui.label(RichText::new(label).small());
        ui.label(RichText::new(value.to_string()).size(40.0).strong());
    });
}
