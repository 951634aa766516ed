use std::f64::consts::{FRAC_PI_2, TAU};

use eframe::egui::{Color32, RichText, Stroke, Ui};
use egui_plot::{Legend, MarkerShape, Plot, PlotPoint, Points, Polygon, Text};

use crate::color::ColorMap;
use crate::data::aggregate::SliceLabel;
use crate::figure::{PieFigure, ScatterFigure};

const FAILURE_COLOR: Color32 = Color32::from_rgb(220, 60, 60);
const SUCCESS_COLOR: Color32 = Color32::from_rgb(60, 170, 90);

/// Segments used for a full circle.
const PIE_RESOLUTION: f64 = 96.0;

// ---------------------------------------------------------------------------
// Pie chart
// ---------------------------------------------------------------------------

/// Pie with wedges starting at 12 o'clock, running clockwise. Zero-valued
/// slices keep their legend entry.
pub fn success_pie(ui: &mut Ui, figure: &PieFigure, site_colors: &ColorMap, height: f32) {
    ui.strong(&figure.title);

    let total = figure.total();

    Plot::new("success_pie")
        .height(height)
        .data_aspect(1.0)
        .legend(Legend::default())
        .show_axes(false)
        .show_grid(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .include_x(-1.3)
        .include_x(1.3)
        .include_y(-1.1)
        .include_y(1.1)
        .show(ui, |plot_ui| {
            if total == 0 {
                plot_ui.text(Text::new(PlotPoint::new(0.0, 0.0), "No launches"));
            }

            let mut start = FRAC_PI_2;
            for slice in &figure.slices {
                let fraction = if total == 0 {
                    0.0
                } else {
                    slice.value as f64 / total as f64
                };
                let sweep = fraction * TAU;

                let color = match &slice.label {
                    SliceLabel::Site(site) => site_colors.color_for(site),
                    SliceLabel::Outcome(true) => SUCCESS_COLOR,
                    SliceLabel::Outcome(false) => FAILURE_COLOR,
                };
                let name = format!("{} ({})", slice.label, slice.value);

                plot_ui.polygon(
                    Polygon::new(wedge(start, sweep))
                        .name(name)
                        .fill_color(color)
                        .stroke(Stroke::new(1.0, Color32::WHITE)),
                );

                if slice.value > 0 {
                    let mid = start - sweep / 2.0;
                    plot_ui.text(Text::new(
                        PlotPoint::new(0.65 * mid.cos(), 0.65 * mid.sin()),
                        RichText::new(format!("{:.1}%", fraction * 100.0)).strong(),
                    ));
                }

                start -= sweep;
            }
        });
}

/// Closed wedge outline: centre, then the arc from `start` clockwise by `sweep`.
fn wedge(start: f64, sweep: f64) -> Vec<[f64; 2]> {
    let steps = ((sweep / TAU) * PIE_RESOLUTION).ceil().max(1.0) as usize;
    let mut points = Vec::with_capacity(steps + 2);
    points.push([0.0, 0.0]);
    for i in 0..=steps {
        let angle = start - sweep * (i as f64 / steps as f64);
        points.push([angle.cos(), angle.sin()]);
    }
    points
}

// ---------------------------------------------------------------------------
// Scatter chart
// ---------------------------------------------------------------------------

/// Payload (x) against outcome flag (y), one series per booster category.
pub fn payload_scatter(
    ui: &mut Ui,
    figure: &ScatterFigure,
    categories: &[String],
    booster_colors: &ColorMap,
) {
    ui.strong(&figure.title);
    ui.label(format!("colour: {}", booster_colors.column));

    Plot::new("payload_scatter")
        .legend(Legend::default())
        .x_axis_label("Payload Mass (kg)")
        .y_axis_label("class")
        .include_x(0.0)
        .include_x(10_000.0)
        .include_y(-0.25)
        .include_y(1.25)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for category in categories {
                let series: Vec<[f64; 2]> = figure
                    .points
                    .iter()
                    .filter(|p| &p.booster_category == category)
                    .map(|p| [p.payload_mass_kg, if p.success { 1.0 } else { 0.0 }])
                    .collect();
                if series.is_empty() {
                    continue;
                }

                plot_ui.points(
                    Points::new(series)
                        .name(category)
                        .color(booster_colors.color_for(category))
                        .shape(MarkerShape::Circle)
                        .filled(true)
                        .radius(5.0),
                );
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wedge_starts_at_centre_and_spans_sweep() {
        let pts = wedge(FRAC_PI_2, TAU / 4.0);
        assert_eq!(pts[0], [0.0, 0.0]);
        assert!(pts[1][0].abs() < 1e-9 && (pts[1][1] - 1.0).abs() < 1e-9);
        let last = pts[pts.len() - 1];
        assert!((last[0] - 1.0).abs() < 1e-9 && last[1].abs() < 1e-9);
    }

    #[test]
    fn zero_sweep_wedge_is_degenerate() {
        assert_eq!(wedge(FRAC_PI_2, 0.0).len(), 3);
    }
}
