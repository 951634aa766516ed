use eframe::egui::{self, RichText, Ui};

use crate::data::model::{PayloadRange, SiteSelection};
use crate::state::AppState;

/// Dropdown label for [`SiteSelection::All`].
const ALL_SITES_LABEL: &str = "All Sites";

// ---------------------------------------------------------------------------
// Left side panel – input widgets
// ---------------------------------------------------------------------------

/// Render the left control panel: site dropdown and payload range.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    site_dropdown(ui, state);
    ui.add_space(8.0);
    payload_slider(ui, state);
}

fn site_dropdown(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Launch site");

    let selected_text = match &state.site {
        SiteSelection::All => ALL_SITES_LABEL.to_string(),
        SiteSelection::Site(s) => s.clone(),
    };

    let mut choice: Option<SiteSelection> = None;
    egui::ComboBox::from_id_salt("site_dropdown")
        .selected_text(selected_text)
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            if ui
                .selectable_label(state.site == SiteSelection::All, ALL_SITES_LABEL)
                .clicked()
            {
                choice = Some(SiteSelection::All);
            }
            for site in state.table.sites() {
                let is_selected = matches!(&state.site, SiteSelection::Site(s) if s == site);
                let text = RichText::new(site).color(state.site_colors.color_for(site));
                if ui.selectable_label(is_selected, text).clicked() {
                    choice = Some(SiteSelection::Site(site.clone()));
                }
            }
        });

    if let Some(site) = choice {
        state.set_site(site);
    }
}

/// Two-handle range over the fixed slider bounds. Moving one handle past the
/// other drags it along so `min <= max` always holds.
///
/// The sliders edit local copies and only user input is forwarded to the
/// state: egui's own write-back (clamping, step snapping) must never move an
/// initial range that is off the step grid.
fn payload_slider(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Payload range (kg)");

    let bounds = PayloadRange::SLIDER;
    let current = state.payload_range;
    let mut lo = current.min;
    let mut hi = current.max;

    let lo_response = ui.add(
        egui::Slider::new(&mut lo, bounds.min..=bounds.max)
            .clamping(egui::SliderClamping::Never)
            .text("min"),
    );
    let hi_response = ui.add(
        egui::Slider::new(&mut hi, bounds.min..=bounds.max)
            .clamping(egui::SliderClamping::Never)
            .text("max"),
    );

    let lo_edit = user_edited(&lo_response).then_some(lo);
    let hi_edit = user_edited(&hi_response).then_some(hi);
    let mut next = edit_range(current, lo_edit, hi_edit);

    if ui.small_button("Reset to observed").clicked() {
        next = state.table.default_payload_range();
    }

    state.set_payload_range(next);
}

fn user_edited(response: &egui::Response) -> bool {
    response.changed()
        && (response.dragged()
            || response.drag_stopped()
            || response.clicked()
            || response.has_focus())
}

/// Apply handle edits: snap the moved handle to the slider step and push the
/// other handle along when they cross. Untouched handles keep their value.
fn edit_range(current: PayloadRange, lo_edit: Option<f64>, hi_edit: Option<f64>) -> PayloadRange {
    let mut range = current;
    if let Some(lo) = lo_edit {
        range.min = snap(lo);
        if range.min > range.max {
            range.max = range.min;
        }
    }
    if let Some(hi) = hi_edit {
        range.max = snap(hi);
        if range.max < range.min {
            range.min = range.max;
        }
    }
    range
}

fn snap(value: f64) -> f64 {
    let bounds = PayloadRange::SLIDER;
    let step = PayloadRange::SLIDER_STEP;
    ((value / step).round() * step).clamp(bounds.min, bounds.max)
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the title bar with dataset summary.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.heading("Launch Records Dashboard");
        ui.separator();

        let table = &state.table;
        ui.label(format!(
            "{} launches from {} sites",
            table.len(),
            table.sites().len()
        ));

        if let Some(bounds) = table.payload_bounds() {
            ui.separator();
            ui.label(format!("observed payload {bounds}"));
        }

        if let Some(scatter) = &state.scatter {
            ui.separator();
            ui.label(format!("{} in view", scatter.points.len()));
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::launch;
    use crate::data::model::LaunchTable;

    fn off_grid_state() -> AppState {
        let table = LaunchTable::from_records(vec![
            launch("A", 525.0, "v1.0", false),
            launch("B", 9600.0, "B4", true),
        ]);
        AppState::new(table, SiteSelection::All, None).unwrap()
    }

    fn render_frame(ctx: &egui::Context, state: &mut AppState) {
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::SidePanel::left("filter_panel").show(ctx, |ui| {
                side_panel(ui, state);
            });
        });
    }

    #[test]
    fn first_frames_keep_observed_range() {
        let mut state = off_grid_state();
        assert_eq!(state.payload_range, PayloadRange::new(525.0, 9600.0));

        let ctx = egui::Context::default();
        render_frame(&ctx, &mut state);
        render_frame(&ctx, &mut state);

        assert_eq!(state.payload_range, PayloadRange::new(525.0, 9600.0));
        assert_eq!(state.scatter.as_ref().unwrap().points.len(), 2);
    }

    #[test]
    fn explicit_off_grid_range_survives_rendering() {
        let table = LaunchTable::from_records(vec![launch("A", 525.0, "v1.0", false)]);
        let range = PayloadRange::new(250.0, 12_500.0);
        let mut state = AppState::new(table, SiteSelection::All, Some(range)).unwrap();

        render_frame(&egui::Context::default(), &mut state);
        assert_eq!(state.payload_range, range);
    }

    #[test]
    fn no_edit_keeps_current_range() {
        let current = PayloadRange::new(525.0, 9600.0);
        assert_eq!(edit_range(current, None, None), current);
    }

    #[test]
    fn edited_handle_snaps_to_step() {
        let current = PayloadRange::new(525.0, 9600.0);
        assert_eq!(
            edit_range(current, Some(1400.0), None),
            PayloadRange::new(1000.0, 9600.0)
        );
        assert_eq!(
            edit_range(current, None, Some(7600.0)),
            PayloadRange::new(525.0, 8000.0)
        );
    }

    #[test]
    fn crossing_handles_push_the_other_along() {
        let current = PayloadRange::new(2000.0, 4000.0);
        assert_eq!(
            edit_range(current, Some(6000.0), None),
            PayloadRange::new(6000.0, 6000.0)
        );
        assert_eq!(
            edit_range(current, None, Some(1000.0)),
            PayloadRange::new(1000.0, 1000.0)
        );
    }

    #[test]
    fn snapping_stays_inside_slider_bounds() {
        assert_eq!(snap(-300.0), 0.0);
        assert_eq!(snap(12_000.0), 10_000.0);
    }
}
