use super::model::{FilterCriteria, LaunchRecord, LaunchTable, PayloadRange, SiteSelection};

// ---------------------------------------------------------------------------
// Row predicates: narrow a sequence of launches to a subsequence
// ---------------------------------------------------------------------------

/// Keep launches from `site`, or every launch (same order) for
/// [`SiteSelection::All`].
///
/// An unknown site label is not an error, it just matches nothing.
pub fn filter_by_site<'a, I>(rows: I, site: &SiteSelection) -> Vec<&'a LaunchRecord>
where
    I: IntoIterator<Item = &'a LaunchRecord>,
{
    rows.into_iter().filter(|r| site.matches(&r.site)).collect()
}

/// Keep launches whose payload lies in `range`, both ends inclusive.
/// An inverted range yields an empty result.
pub fn filter_by_payload_range<'a, I>(rows: I, range: PayloadRange) -> Vec<&'a LaunchRecord>
where
    I: IntoIterator<Item = &'a LaunchRecord>,
{
    rows.into_iter()
        .filter(|r| range.contains(r.payload_mass_kg))
        .collect()
}

/// Scatter view subset: payload range first, then site, always starting from
/// the full table.
pub fn filter_launches<'a>(table: &'a LaunchTable, criteria: &FilterCriteria) -> Vec<&'a LaunchRecord> {
    let in_range = filter_by_payload_range(table.records(), criteria.payload_range);
    filter_by_site(in_range, &criteria.site)
}
