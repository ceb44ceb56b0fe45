use eframe::egui::{self, pos2, vec2, Align2, Color32, FontId, Rect, Ui};
use egui_plot::{Bar, BarChart, Legend, Plot};

use crate::chart::{EmbarkedBarSeries, HistogramSeries};
use crate::color::ColorScheme;
use crate::data::aggregate::{round1, HeatmapMatrix};

// ---------------------------------------------------------------------------
// Age × Sex heatmap (central panel)
// ---------------------------------------------------------------------------

/// Paint the survival heatmap as a cell grid with axis labels. Cells without
/// observations stay blank so a 0% rate is never faked.
pub fn heatmap(ui: &mut Ui, matrix: &HeatmapMatrix, scheme: ColorScheme) {
    if matrix.cells.is_empty() {
        ui.label("No rows with a known age match the current filters.");
        return;
    }

    const LABEL_W: f32 = 64.0;
    const LABEL_H: f32 = 18.0;
    const HEIGHT: f32 = 260.0;

    let (rect, _response) = ui.allocate_exact_size(
        vec2(ui.available_width(), HEIGHT),
        egui::Sense::hover(),
    );
    let painter = ui.painter_at(rect);

    let n_cols = matrix.age_labels.len();
    let n_rows = matrix.sexes.len();
    let grid = Rect::from_min_max(
        pos2(rect.left() + LABEL_W, rect.top()),
        pos2(rect.right(), rect.bottom() - LABEL_H),
    );
    let cell_w = grid.width() / n_cols as f32;
    let cell_h = grid.height() / n_rows as f32;

    for (row, sex) in matrix.sexes.iter().enumerate() {
        painter.text(
            pos2(rect.left(), grid.top() + (row as f32 + 0.5) * cell_h),
            Align2::LEFT_CENTER,
            sex,
            FontId::proportional(12.0),
            ui.visuals().text_color(),
        );

        for (col, cell) in matrix.cells[row].iter().enumerate() {
            let cell_rect = Rect::from_min_size(
                pos2(
                    grid.left() + col as f32 * cell_w,
                    grid.top() + row as f32 * cell_h,
                ),
                vec2(cell_w, cell_h),
            )
            .shrink(1.0);

            match cell {
                Some(c) => {
                    let fill = scheme.sample(c.mean_survived);
                    painter.rect_filled(cell_rect, egui::CornerRadius::same(2), fill);
                    if cell_w > 34.0 {
                        let pct = round1(100.0 * c.mean_survived);
                        painter.text(
                            cell_rect.center(),
                            Align2::CENTER_CENTER,
                            format!("{pct}% ({})", c.count),
                            FontId::proportional(10.0),
                            contrast_text(fill),
                        );
                    }
                }
                None => {
                    painter.rect_filled(
                        cell_rect,
                        egui::CornerRadius::same(2),
                        ui.visuals().faint_bg_color,
                    );
                }
            }
        }
    }

    // Age-axis labels; thin them out when the continuous axis gets crowded.
    for (col, label) in matrix.age_labels.iter().enumerate() {
        if n_cols > 10 && col % 2 == 1 {
            continue;
        }
        painter.text(
            pos2(grid.left() + (col as f32 + 0.5) * cell_w, rect.bottom()),
            Align2::CENTER_BOTTOM,
            label,
            FontId::proportional(10.0),
            ui.visuals().text_color(),
        );
    }
}

/// Black or white, whichever reads better on the given fill.
fn contrast_text(fill: Color32) -> Color32 {
    let luma = 0.299 * fill.r() as f32 + 0.587 * fill.g() as f32 + 0.114 * fill.b() as f32;
    if luma < 140.0 {
        Color32::WHITE
    } else {
        Color32::BLACK
    }
}

// ---------------------------------------------------------------------------
// Age histogram (central panel)
// ---------------------------------------------------------------------------

/// Overlaid per-outcome age histogram.
pub fn age_histogram(ui: &mut Ui, series: &[HistogramSeries], scheme: ColorScheme) {
    if series.is_empty() {
        ui.label("No rows with a known age match the current filters.");
        return;
    }

    Plot::new("age_histogram")
        .legend(Legend::default())
        .x_axis_label("Age")
        .y_axis_label("Passengers")
        .height(ui.available_height().max(180.0))
        .show(ui, |plot_ui| {
            for s in series {
                let bars: Vec<Bar> = s
                    .bars
                    .iter()
                    .map(|&(center, n)| Bar::new(center, n as f64).width(s.bar_width))
                    .collect();
                // Translucent fills so the overlaid series stay readable.
                let color = scheme.series_color(s.label).gamma_multiply(0.75);
                plot_ui.bar_chart(BarChart::new(bars).name(s.label.to_string()).color(color));
            }
        });
}

// ---------------------------------------------------------------------------
// Embarkation-port bars (detail panel)
// ---------------------------------------------------------------------------

/// Grouped bars: passenger counts per port, one bar per survival outcome.
pub fn embarked_bar_chart(ui: &mut Ui, data: &EmbarkedBarSeries, scheme: ColorScheme) {
    if data.ports.is_empty() {
        ui.label("No matching passengers.");
        return;
    }

    let ports = data.ports.clone();
    let group_w = 0.8 / data.groups.len().max(1) as f64;

    Plot::new("embarked_bars")
        .legend(Legend::default())
        .height(220.0)
        .y_axis_label("Passengers")
        .x_axis_formatter(move |mark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() < 1e-3 && idx >= 0.0 && (idx as usize) < ports.len() {
                ports[idx as usize].clone()
            } else {
                String::new()
            }
        })
        .show(ui, |plot_ui| {
            for (g, (label, values)) in data.groups.iter().enumerate() {
                let bars: Vec<Bar> = values
                    .iter()
                    .enumerate()
                    .map(|(i, &n)| {
                        // Offset each outcome's bar within its port slot.
                        let x = i as f64 - 0.4 + (g as f64 + 0.5) * group_w;
                        Bar::new(x, n as f64).width(group_w * 0.9)
                    })
                    .collect();
                plot_ui.bar_chart(
                    BarChart::new(bars)
                        .name(label.to_string())
                        .color(scheme.series_color(*label)),
                );
            }
        });
}
