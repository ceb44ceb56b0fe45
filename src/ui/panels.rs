use std::collections::BTreeSet;
use std::fmt;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::color::ColorScheme;
use crate::state::AppState;
use crate::ui::charts;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel and re-run the pipeline on any change.
pub fn filter_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("⚓ Titanic Dashboard");
    ui.label("Passenger survival analysis");
    ui.separator();
    ui.strong("Filters");

    // Clone the domains so we can mutate the selection inside the loop.
    let domains = state.table.domains.clone();
    let mut changed = false;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            changed |= filter_section(ui, "Sex", &domains.sexes, &mut state.selection.sexes);
            changed |= filter_section(ui, "Class", &domains.classes, &mut state.selection.classes);
            changed |= filter_section(ui, "Embarked", &domains.ports, &mut state.selection.ports);

            ui.separator();

            // ---- Color scheme selector ----
            ui.strong("Color scheme");
            egui::ComboBox::from_id_salt("color_scheme")
                .selected_text(state.color_scheme.name())
                .show_ui(ui, |ui: &mut Ui| {
                    for scheme in ColorScheme::ALL {
                        ui.selectable_value(&mut state.color_scheme, scheme, scheme.name());
                    }
                });

            ui.separator();

            // ---- Age bucketing toggle ----
            if ui
                .checkbox(
                    &mut state.bucket_ages,
                    "Bucket ages (0–12, 13–18, 19–30, 31–50, 51+)",
                )
                .changed()
            {
                changed = true;
            }
        });

    if changed {
        state.recompute();
    }
}

/// One collapsible filter section: All/None buttons plus a checkbox per
/// domain value. Returns whether the selection changed.
fn filter_section<T>(ui: &mut Ui, label: &str, all_values: &[T], selected: &mut BTreeSet<T>) -> bool
where
    T: Ord + Clone + fmt::Display,
{
    let mut changed = false;

    let header_text = format!("{label}  ({}/{})", selected.len(), all_values.len());
    egui::CollapsingHeader::new(RichText::new(header_text).strong())
        .id_salt(label)
        .default_open(true)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    *selected = all_values.iter().cloned().collect();
                    changed = true;
                }
                if ui.small_button("None").clicked() {
                    selected.clear();
                    changed = true;
                }
            });

            for val in all_values {
                let mut checked = selected.contains(val);
                if ui.checkbox(&mut checked, val.to_string()).changed() {
                    if checked {
                        selected.insert(val.clone());
                    } else {
                        selected.remove(val);
                    }
                    changed = true;
                }
            }
        });

    changed
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top title bar with row counts.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.heading("Titanic Survival Dashboard");
        ui.separator();
        ui.label(format!(
            "{} passengers loaded, {} matching filters",
            state.table.len(),
            state.dashboard.summary.total
        ));
    });
}

// ---------------------------------------------------------------------------
// Summary column – metric cards
// ---------------------------------------------------------------------------

const METRIC_VALUE: Color32 = Color32::from_rgb(0, 255, 127);
const METRIC_LABEL: Color32 = Color32::GOLD;

/// Render the key-metric cards for the current filter result.
pub fn summary_panel(ui: &mut Ui, state: &AppState) {
    let summary = &state.dashboard.summary;

    ui.heading("Key Metrics");
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            metric(ui, "Passengers", summary.total.to_string());
            metric(ui, "Survivors", summary.survived.to_string());
            metric(ui, "Survival rate", format!("{:.1}%", summary.rate_percent));

            ui.separator();
            ui.label(RichText::new("Survival by sex").color(METRIC_LABEL).strong());
            for group in &summary.by_sex {
                metric(ui, &group.key, format!("{:.1}%", group.rate_percent));
            }

            ui.separator();
            ui.label(RichText::new("Survival by class").color(METRIC_LABEL).strong());
            for group in &summary.by_class {
                metric(
                    ui,
                    &format!("Class {}", group.key),
                    format!("{:.1}%", group.rate_percent),
                );
            }
        });
}

fn metric(ui: &mut Ui, label: &str, value: String) {
    ui.label(label);
    ui.label(RichText::new(value).size(22.0).strong().color(METRIC_VALUE));
    ui.add_space(6.0);
}

// ---------------------------------------------------------------------------
// Detail column – port chart + insights
// ---------------------------------------------------------------------------

/// Render the right detail column.
pub fn detail_panel(ui: &mut Ui, state: &AppState) {
    ui.heading("Detail");
    ui.separator();

    ui.strong("Passengers by port & survival");
    charts::embarked_bar_chart(ui, &state.dashboard.embarked_bars, state.color_scheme);

    ui.separator();
    ui.strong("Top insights");
    ui.label("• Sex: women survived at a far higher rate than men");
    ui.label("• Class: first-class passengers fared best");
    ui.label("• Age: children (0–12) show elevated survival");

    ui.separator();
    ui.strong("About");
    ui.label(
        "Titanic passenger dataset (Kaggle). Key columns: Pclass, Sex, Age, \
         Embarked, Survived. Every filter change re-runs the whole pipeline \
         against the loaded table.",
    );
}

// ---------------------------------------------------------------------------
// Central panel – main charts
// ---------------------------------------------------------------------------

/// Render the heatmap and the age histogram, stacked.
pub fn main_charts(ui: &mut Ui, state: &AppState) {
    ui.heading("Age × Sex survival heatmap");
    charts::heatmap(ui, &state.dashboard.heatmap, state.color_scheme);

    ui.add_space(12.0);
    ui.heading("Age distribution by survival");
    charts::age_histogram(ui, &state.dashboard.age_histogram, state.color_scheme);
}
