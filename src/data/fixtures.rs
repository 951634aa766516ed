//! Shared test tables.

use super::model::{LaunchRecord, LaunchTable};

pub fn launch(site: &str, payload_mass_kg: f64, booster: &str, success: bool) -> LaunchRecord {
    LaunchRecord {
        site: site.to_string(),
        payload_mass_kg,
        booster_category: booster.to_string(),
        success,
    }
}

/// Ten launches over four sites. Site `D` never succeeds.
///
/// | site | launches | successes | payloads in [500, 2000] |
/// |------|----------|-----------|-------------------------|
/// | A    | 5        | 2         | 3                       |
/// | B    | 2        | 1         | 1                       |
/// | C    | 2        | 2         | 1                       |
/// | D    | 1        | 0         | 0                       |
pub fn sample_table() -> LaunchTable {
    LaunchTable::from_records(vec![
        launch("A", 0.0, "v1.0", false),
        launch("A", 525.0, "v1.0", false),
        launch("B", 500.0, "FT", true),
        launch("A", 1500.0, "FT", true),
        launch("C", 2000.0, "FT", true),
        launch("D", 3000.0, "B4", false),
        launch("A", 2000.0, "B4", true),
        launch("B", 9600.0, "B4", false),
        launch("C", 4700.0, "FT", true),
        launch("A", 2500.0, "FT", false),
    ])
}
