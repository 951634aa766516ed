use std::collections::BTreeSet;
use std::fmt;

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the source table
// ---------------------------------------------------------------------------

/// A single launch (one row of the source table).
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchRecord {
    /// `Launch Site` column.
    pub site: String,
    /// `Payload Mass (kg)` column.
    pub payload_mass_kg: f64,
    /// `Booster Version Category` column, only used for colouring.
    pub booster_category: String,
    /// `class` column (1 = success).
    pub success: bool,
}

// ---------------------------------------------------------------------------
// Filter inputs
// ---------------------------------------------------------------------------

/// Literal used by the dropdown / CLI for "every site".
pub const ALL_SITES: &str = "ALL";

/// Current value of the site dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum SiteSelection {
    #[default]
    All,
    Site(String),
}

impl SiteSelection {
    /// Parse the dropdown value, treating the `ALL` literal as [`SiteSelection::All`].
    pub fn parse(value: &str) -> Self {
        if value == ALL_SITES {
            SiteSelection::All
        } else {
            SiteSelection::Site(value.to_string())
        }
    }

    pub fn matches(&self, site: &str) -> bool {
        match self {
            SiteSelection::All => true,
            SiteSelection::Site(s) => s == site,
        }
    }
}

impl fmt::Display for SiteSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteSelection::All => write!(f, "{ALL_SITES}"),
            SiteSelection::Site(s) => write!(f, "{s}"),
        }
    }
}

/// Inclusive payload bounds in kg.
///
/// `min <= max` is maintained by the range widget; an inverted range is
/// still accepted here and simply matches nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayloadRange {
    pub min: f64,
    pub max: f64,
}

impl PayloadRange {
    /// Bounds of the payload slider.
    pub const SLIDER: PayloadRange = PayloadRange {
        min: 0.0,
        max: 10_000.0,
    };
    /// Slider step in kg.
    pub const SLIDER_STEP: f64 = 1_000.0;

    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, payload_mass_kg: f64) -> bool {
        self.min <= payload_mass_kg && payload_mass_kg <= self.max
    }
}

impl fmt::Display for PayloadRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}] kg", self.min, self.max)
    }
}

/// Widget values for one recomputation.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    pub site: SiteSelection,
    pub payload_range: PayloadRange,
}

// ---------------------------------------------------------------------------
// LaunchTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The loaded table with its derived constants. Read-only after construction.
#[derive(Debug, Clone)]
pub struct LaunchTable {
    records: Vec<LaunchRecord>,
    /// Distinct site labels in first-appearance order.
    sites: Vec<String>,
    /// Distinct booster categories in first-appearance order.
    booster_categories: Vec<String>,
    /// Observed payload bounds, `None` for an empty table.
    payload_bounds: Option<PayloadRange>,
}

impl LaunchTable {
    /// Build the derived constants from the loaded records.
    pub fn from_records(records: Vec<LaunchRecord>) -> Self {
        let sites = distinct_in_order(records.iter().map(|r| r.site.as_str()));
        let booster_categories =
            distinct_in_order(records.iter().map(|r| r.booster_category.as_str()));

        let payload_bounds = records.iter().fold(None, |acc: Option<PayloadRange>, r| {
            let p = r.payload_mass_kg;
            Some(match acc {
                None => PayloadRange::new(p, p),
                Some(b) => PayloadRange::new(b.min.min(p), b.max.max(p)),
            })
        });

        LaunchTable {
            records,
            sites,
            booster_categories,
            payload_bounds,
        }
    }

    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    pub fn sites(&self) -> &[String] {
        &self.sites
    }

    pub fn booster_categories(&self) -> &[String] {
        &self.booster_categories
    }

    pub fn payload_bounds(&self) -> Option<PayloadRange> {
        self.payload_bounds
    }

    /// Initial slider position: observed bounds, or the full slider for an
    /// empty table.
    pub fn default_payload_range(&self) -> PayloadRange {
        self.payload_bounds.unwrap_or(PayloadRange::SLIDER)
    }

    /// Number of launches.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn distinct_in_order<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = BTreeSet::new();
    values
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::{launch, sample_table};

    #[test]
    fn derived_constants_follow_first_appearance() {
        let table = sample_table();
        assert_eq!(table.sites(), ["A", "B", "C", "D"]);
        assert_eq!(table.booster_categories(), ["v1.0", "FT", "B4"]);
        assert_eq!(
            table.payload_bounds(),
            Some(PayloadRange::new(0.0, 9600.0))
        );
    }

    #[test]
    fn empty_table_falls_back_to_slider_bounds() {
        let table = LaunchTable::from_records(Vec::new());
        assert!(table.is_empty());
        assert_eq!(table.payload_bounds(), None);
        assert_eq!(table.default_payload_range(), PayloadRange::SLIDER);
    }

    #[test]
    fn single_record_bounds_are_degenerate() {
        let table = LaunchTable::from_records(vec![launch("X", 525.0, "v1.1", true)]);
        assert_eq!(table.default_payload_range(), PayloadRange::new(525.0, 525.0));
    }

    #[test]
    fn site_selection_parses_all_literal() {
        assert_eq!(SiteSelection::parse("ALL"), SiteSelection::All);
        assert_eq!(
            SiteSelection::parse("KSC LC-39A"),
            SiteSelection::Site("KSC LC-39A".into())
        );
        assert_eq!(SiteSelection::All.to_string(), "ALL");
    }

    #[test]
    fn payload_range_is_inclusive() {
        let range = PayloadRange::new(500.0, 2000.0);
        assert!(range.contains(500.0));
        assert!(range.contains(2000.0));
        assert!(!range.contains(499.9));
        assert!(!range.contains(2000.1));
        assert!(!PayloadRange::new(2000.0, 500.0).contains(1000.0));
    }
}
