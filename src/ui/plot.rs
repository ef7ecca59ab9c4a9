use chrono::{Datelike, NaiveDate};
use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_plot::{Bar, BarChart, GridMark, Legend, Line, LineStyle, Plot, PlotPoints, Points};

use crate::data::model::Metric;
use crate::state::AppState;
use crate::ui::treemap;

const CHART_HEIGHT: f32 = 360.0;

// ---------------------------------------------------------------------------
// Central panel: the three charts
// ---------------------------------------------------------------------------

/// Render the three charts stacked in the central panel.
pub fn charts(ui: &mut Ui, state: &AppState) {
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            chart_section(ui, "Evolución Financiera a lo largo del Tiempo", state, series_plot);
            chart_section(
                ui,
                "Distribución de Inversiones por Sector y Entidad",
                state,
                |ui, state| treemap::treemap(ui, &state.charts, CHART_HEIGHT),
            );
            chart_section(ui, "Comparación de Avance Físico por Entidad", state, progress_plot);
        });
}

fn chart_section(ui: &mut Ui, title: &str, state: &AppState, body: impl FnOnce(&mut Ui, &AppState)) {
    ui.heading(title);
    if state.charts.is_empty() {
        placeholder(ui);
    } else {
        body(ui, state);
    }
    ui.add_space(24.0);
}

/// Empty chart shown when no record matches the filters.
fn placeholder(ui: &mut Ui) {
    let size = egui::vec2(ui.available_width(), CHART_HEIGHT);
    ui.allocate_ui(size, |ui: &mut Ui| {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label(RichText::new("Sin datos para los filtros seleccionados").color(Color32::GRAY));
        });
    });
}

// ---------------------------------------------------------------------------
// Financial evolution (multi-line time chart)
// ---------------------------------------------------------------------------

fn series_plot(ui: &mut Ui, state: &AppState) {
    Plot::new("evolucion_financiera")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label("Fecha")
        .y_axis_label("Monto (SOLES)")
        .x_axis_formatter(|mark: GridMark, _range| format_day(mark.value))
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(false)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for line in &state.charts.series {
                let color = state.entity_color(&line.entity);
                let name = format!("{} · {}", line.entity, line.metric);
                let coords = || -> PlotPoints {
                    line.points
                        .iter()
                        .map(|&(date, value)| [day_number(date), value])
                        .collect()
                };

                let mut plotted = Line::new(coords()).name(&name).color(color).width(1.5);
                if line.metric == Metric::UpdatedCost {
                    plotted = plotted.style(LineStyle::dashed_loose());
                }
                plot_ui.line(plotted);
                plot_ui.points(Points::new(coords()).name(&name).color(color).radius(2.5));
            }
        });
}

/// Dates are plotted as days since the common era.
pub fn day_number(date: NaiveDate) -> f64 {
    date.num_days_from_ce() as f64
}

/// Axis label for a day number; empty when it is not a representable date.
pub fn format_day(value: f64) -> String {
    if !value.is_finite() || value.abs() > i32::MAX as f64 {
        return String::new();
    }
    NaiveDate::from_num_days_from_ce_opt(value.round() as i32)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Physical progress (horizontal bars)
// ---------------------------------------------------------------------------

fn progress_plot(ui: &mut Ui, state: &AppState) {
    let labels: Vec<String> = state.charts.bars.iter().map(|b| b.entity.clone()).collect();
    let bars: Vec<Bar> = state
        .charts
        .bars
        .iter()
        .enumerate()
        .map(|(i, b)| {
            Bar::new(i as f64, b.progress)
                .name(&b.entity)
                .fill(state.entity_color(&b.entity))
                .width(0.7)
        })
        .collect();

    Plot::new("avance_fisico")
        .height(CHART_HEIGHT)
        .x_axis_label("Avance Físico")
        .y_axis_formatter(move |mark: GridMark, _range| bar_label(&labels, mark.value))
        .include_x(0.0)
        .include_x(100.0)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).horizontal());
        });
}

/// Entity label for a bar position; only whole positions carry a label.
fn bar_label(labels: &[String], value: f64) -> String {
    let idx = value.round();
    if (value - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    labels.get(idx as usize).cloned().unwrap_or_default()
}

/// Format an amount with thousands separators and no decimals.
pub fn format_amount(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let rounded = value.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if rounded < 0 {
        grouped.insert(0, '-');
    }
    grouped
}
