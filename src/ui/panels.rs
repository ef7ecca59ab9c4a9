use std::collections::BTreeSet;
use std::sync::Arc;

use eframe::egui::{self, Align2, Color32, RichText, ScrollArea, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filtros");
    ui.separator();

    // The table is immutable; hold our own handle so widgets can mutate state.
    let table = Arc::clone(&state.table);

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Year range ----
            ui.strong("Seleccionar rango de años");
            match table.year_bounds() {
                Some((lo, hi)) => {
                    let (mut from, mut to) = (state.years.min, state.years.max);
                    // Years given on the command line may lie outside the data.
                    ui.add(
                        egui::Slider::new(&mut from, lo..=hi)
                            .clamping(egui::SliderClamping::Never)
                            .text("desde"),
                    );
                    ui.add(
                        egui::Slider::new(&mut to, lo..=hi)
                            .clamping(egui::SliderClamping::Never)
                            .text("hasta"),
                    );
                    state.set_years(from, to);
                }
                None => {
                    ui.label("Sin años disponibles");
                }
            }
            ui.separator();

            // ---- Sectors ----
            let header = format!(
                "Sector  ({}/{})",
                state.selected_sectors.len(),
                table.sectors().len()
            );
            egui::CollapsingHeader::new(RichText::new(header).strong())
                .id_salt("sector_filter")
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    ui.horizontal(|ui: &mut Ui| {
                        if ui.small_button("Todos").clicked() {
                            state.select_all_sectors();
                        }
                        if ui.small_button("Ninguno").clicked() {
                            state.select_no_sectors();
                        }
                    });
                    for sector in table.sectors() {
                        let mut checked = state.selected_sectors.contains(sector);
                        if ui.checkbox(&mut checked, sector).changed() {
                            state.set_sector(sector, checked);
                        }
                    }
                });
            ui.separator();

            // ---- Departments ----
            let header = if state.all_departments {
                "Departamento  (todos)".to_string()
            } else {
                format!(
                    "Departamento  ({}/{})",
                    state.selected_departments.len(),
                    table.departments().len()
                )
            };
            egui::CollapsingHeader::new(RichText::new(header).strong())
                .id_salt("department_filter")
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    ui.checkbox(
                        &mut state.all_departments,
                        "Seleccionar todos los departamentos",
                    );
                    let enabled = !state.all_departments;
                    ui.add_enabled_ui(enabled, |ui: &mut Ui| {
                        department_checklist(ui, state, table.departments());
                    });
                });
        });

    // Recompute charts after any widget changes.
    state.refresh();
}

fn department_checklist(ui: &mut Ui, state: &mut AppState, departments: &BTreeSet<String>) {
    for department in departments {
        let mut checked = state.selected_departments.contains(department);
        if ui.checkbox(&mut checked, department).changed() {
            state.set_department(department, checked);
        }
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("Ayuda", |ui: &mut Ui| {
            if ui.button("Acerca del dashboard…").clicked() {
                state.show_welcome = true;
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} registros cargados, {} coinciden con los filtros",
            state.table.len(),
            state.charts.matched
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Welcome window
// ---------------------------------------------------------------------------

/// Closable introduction to the three charts, shown on start.
pub fn welcome_window(ctx: &egui::Context, state: &mut AppState) {
    if !state.show_welcome {
        return;
    }

    let mut close = false;
    egui::Window::new("Dashboard de Inversión Pública del Perú")
        .collapsible(false)
        .resizable(false)
        .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui: &mut Ui| {
            ui.label(
                "Explora y analiza datos sobre inversión pública en el Perú \
                 a través de tres gráficos principales:",
            );
            ui.add_space(4.0);
            bullet(ui, "Evolución Financiera:", "evolución de la inversión a lo largo del tiempo.");
            bullet(
                ui,
                "Distribución de Inversiones por Sector y Entidad:",
                "cómo se distribuyen las inversiones entre sectores y entidades.",
            );
            bullet(
                ui,
                "Comparación de Avance Físico por Entidad:",
                "avance físico de las inversiones de cada entidad.",
            );
            ui.add_space(8.0);
            if ui.button("Cerrar").clicked() {
                close = true;
            }
        });

    if close {
        state.show_welcome = false;
    }
}

fn bullet(ui: &mut Ui, title: &str, text: &str) {
    ui.horizontal_wrapped(|ui: &mut Ui| {
        ui.label("•");
        ui.label(RichText::new(title).strong());
        ui.label(text);
    });
}
