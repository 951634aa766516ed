use crate::color::ColorMap;
use crate::data::model::{FilterCriteria, LaunchTable, PayloadRange, SiteSelection};
use crate::figure::{Figure, PieFigure, ScatterFigure};
use crate::reactive::{CallbackRegistry, OutputId, RegistryError, Signal, dashboard_registry};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Table loaded at startup, never replaced.
    pub table: LaunchTable,

    /// Current dropdown value.
    pub site: SiteSelection,

    /// Current slider handles.
    pub payload_range: PayloadRange,

    /// Latest success pie.
    pub pie: Option<PieFigure>,

    /// Latest payload scatter.
    pub scatter: Option<ScatterFigure>,

    /// Colours for pie slices, keyed by slice label.
    pub site_colors: ColorMap,

    /// Colours for scatter series, keyed by booster category.
    pub booster_colors: ColorMap,

    registry: CallbackRegistry,
}

impl AppState {
    /// Wire the bindings and render the first frame's figures.
    pub fn new(
        table: LaunchTable,
        site: SiteSelection,
        payload_range: Option<PayloadRange>,
    ) -> Result<Self, RegistryError> {
        let payload_range = payload_range.unwrap_or_else(|| table.default_payload_range());
        let site_colors = ColorMap::new("Launch Site", table.sites());
        let booster_colors = ColorMap::new("Booster Version Category", table.booster_categories());

        let mut state = Self {
            table,
            site,
            payload_range,
            pie: None,
            scatter: None,
            site_colors,
            booster_colors,
            registry: dashboard_registry()?,
        };
        let criteria = state.criteria();
        let figures = state.registry.recompute_all(&state.table, &criteria);
        state.apply(figures);
        Ok(state)
    }

    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            site: self.site.clone(),
            payload_range: self.payload_range,
        }
    }

    /// Dropdown changed.
    pub fn set_site(&mut self, site: SiteSelection) {
        if site == self.site {
            return;
        }
        self.site = site;
        self.on_change(Signal::Site);
    }

    /// Slider changed. Handles are expected in order; the widget keeps them so.
    pub fn set_payload_range(&mut self, range: PayloadRange) {
        if range == self.payload_range {
            return;
        }
        self.payload_range = range;
        self.on_change(Signal::PayloadRange);
    }

    fn on_change(&mut self, signal: Signal) {
        log::debug!(
            "{signal:?} changed, refreshing {:?}",
            self.registry.dependents(signal)
        );
        let criteria = self.criteria();
        let figures = self.registry.dispatch(signal, &self.table, &criteria);
        self.apply(figures);
    }

    fn apply(&mut self, figures: Vec<(OutputId, Figure)>) {
        for (output, figure) in figures {
            match (output, figure) {
                (OutputId::SuccessPie, Figure::Pie(pie)) => self.pie = Some(pie),
                (OutputId::PayloadScatter, Figure::Scatter(scatter)) => {
                    self.scatter = Some(scatter)
                }
                (output, figure) => {
                    log::warn!("{output:?} produced a mismatched figure: {figure:?}")
                }
            }
        }
    }
}
