use serde::Serialize;

use crate::data::aggregate::{PieSlice, ScatterPoint, project_for_scatter, summarize_outcomes};
use crate::data::filter::{filter_by_site, filter_launches};
use crate::data::model::{FilterCriteria, LaunchTable, SiteSelection};

// ---------------------------------------------------------------------------
// Chart-ready figures handed to the plot layer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieFigure {
    pub title: String,
    pub slices: Vec<PieSlice>,
}

impl PieFigure {
    pub fn total(&self) -> u64 {
        self.slices.iter().map(|s| s.value).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterFigure {
    pub title: String,
    pub points: Vec<ScatterPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Figure {
    Pie(PieFigure),
    Scatter(ScatterFigure),
}

/// Success pie. Depends on the site selection only; the payload range has
/// no effect on it.
pub fn pie_figure(table: &LaunchTable, criteria: &FilterCriteria) -> Figure {
    let subset = filter_by_site(table.records(), &criteria.site);
    let title = match &criteria.site {
        SiteSelection::All => "Total successful launches by site".to_string(),
        SiteSelection::Site(site) => format!("Success vs. failure for site {site}"),
    };
    Figure::Pie(PieFigure {
        title,
        slices: summarize_outcomes(&subset, &criteria.site),
    })
}

/// Payload vs. outcome scatter over the range- and site-filtered launches.
pub fn scatter_figure(table: &LaunchTable, criteria: &FilterCriteria) -> Figure {
    let subset = filter_launches(table, criteria);
    let title = match &criteria.site {
        SiteSelection::All => "Payload vs. launch outcome for all sites".to_string(),
        SiteSelection::Site(site) => format!("Payload vs. launch outcome for site {site}"),
    };
    Figure::Scatter(ScatterFigure {
        title,
        points: project_for_scatter(&subset),
    })
}
