use std::fmt;

use serde::Serialize;

use super::model::{LaunchRecord, SiteSelection};

// ---------------------------------------------------------------------------
// Pie view: (label, count) pairs
// ---------------------------------------------------------------------------

/// Name of a pie slice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SliceLabel {
    /// One slice per site in the all-sites view.
    Site(String),
    /// Success flag value in the single-site view.
    Outcome(bool),
}

impl fmt::Display for SliceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SliceLabel::Site(s) => write!(f, "{s}"),
            SliceLabel::Outcome(true) => write!(f, "Success (1)"),
            SliceLabel::Outcome(false) => write!(f, "Failure (0)"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PieSlice {
    pub label: SliceLabel,
    pub value: u64,
}

/// Reshape a subset into pie slices.
///
/// * [`SiteSelection::All`]: one slice per site (first-appearance order)
///   holding that site's number of successful launches. Sites without a
///   success keep a zero slice.
/// * a single site: failure count then success count, both always present.
///
/// The two branches measure different things (total successes vs. outcome
/// breakdown) and are kept that way.
pub fn summarize_outcomes(subset: &[&LaunchRecord], site: &SiteSelection) -> Vec<PieSlice> {
    match site {
        SiteSelection::All => {
            let mut slices: Vec<PieSlice> = Vec::new();
            for record in subset {
                let idx = match slices
                    .iter()
                    .position(|s| matches!(&s.label, SliceLabel::Site(name) if *name == record.site))
                {
                    Some(idx) => idx,
                    None => {
                        slices.push(PieSlice {
                            label: SliceLabel::Site(record.site.clone()),
                            value: 0,
                        });
                        slices.len() - 1
                    }
                };
                slices[idx].value += u64::from(record.success);
            }
            slices
        }
        SiteSelection::Site(_) => {
            let successes = subset.iter().filter(|r| r.success).count() as u64;
            let failures = subset.len() as u64 - successes;
            vec![
                PieSlice {
                    label: SliceLabel::Outcome(false),
                    value: failures,
                },
                PieSlice {
                    label: SliceLabel::Outcome(true),
                    value: successes,
                },
            ]
        }
    }
}

// ---------------------------------------------------------------------------
// Scatter view: one point per launch
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub payload_mass_kg: f64,
    pub success: bool,
    pub booster_category: String,
}

/// One point per surviving launch, in table order.
pub fn project_for_scatter(subset: &[&LaunchRecord]) -> Vec<ScatterPoint> {
    subset
        .iter()
        .map(|r| ScatterPoint {
            payload_mass_kg: r.payload_mass_kg,
            success: r.success,
            booster_category: r.booster_category.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::filter_by_site;
    use crate::data::fixtures::sample_table;

    #[test]
    fn all_sites_sums_successes_per_site() {
        let table = sample_table();
        let subset: Vec<&LaunchRecord> = table.records().iter().collect();
        let slices = summarize_outcomes(&subset, &SiteSelection::All);

        let pairs: Vec<(String, u64)> = slices
            .iter()
            .map(|s| (s.label.to_string(), s.value))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("A".to_string(), 2),
                ("B".to_string(), 1),
                ("C".to_string(), 2),
                ("D".to_string(), 0),
            ]
        );
    }

    #[test]
    fn single_site_breakdown_partitions_the_subset() {
        let table = sample_table();
        for site in table.sites() {
            let selection = SiteSelection::Site(site.clone());
            let subset = filter_by_site(table.records(), &selection);
            let slices = summarize_outcomes(&subset, &selection);

            assert_eq!(slices.len(), 2);
            assert_eq!(slices[0].label, SliceLabel::Outcome(false));
            assert_eq!(slices[1].label, SliceLabel::Outcome(true));
            let total: u64 = slices.iter().map(|s| s.value).sum();
            assert_eq!(total, subset.len() as u64);
        }
    }

    #[test]
    fn zero_count_outcome_is_kept() {
        let table = sample_table();
        let selection = SiteSelection::Site("D".into());
        let subset = filter_by_site(table.records(), &selection);
        let slices = summarize_outcomes(&subset, &selection);
        assert_eq!(slices[0].value, 1);
        assert_eq!(slices[1].value, 0);
    }

    #[test]
    fn empty_subset_gives_empty_or_zero_slices() {
        assert!(summarize_outcomes(&[], &SiteSelection::All).is_empty());
        let slices = summarize_outcomes(&[], &SiteSelection::Site("Z".into()));
        assert!(slices.iter().all(|s| s.value == 0));
    }

    #[test]
    fn scatter_projection_is_one_to_one() {
        let table = sample_table();
        let subset: Vec<&LaunchRecord> = table.records().iter().collect();
        let points = project_for_scatter(&subset);
        assert_eq!(points.len(), table.len());
        for (point, record) in points.iter().zip(table.records()) {
            assert_eq!(point.payload_mass_kg, record.payload_mass_kg);
            assert_eq!(point.success, record.success);
            assert_eq!(point.booster_category, record.booster_category);
        }
    }

    #[test]
    fn slice_labels_serialize_as_plain_values() {
        let slices = vec![
            PieSlice {
                label: SliceLabel::Site("A".into()),
                value: 2,
            },
            PieSlice {
                label: SliceLabel::Outcome(true),
                value: 1,
            },
        ];
        let json = serde_json::to_string(&slices).unwrap();
        assert_eq!(
            json,
            r#"[{"label":"A","value":2},{"label":true,"value":1}]"#
        );
    }
}
