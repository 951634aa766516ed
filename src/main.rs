mod app;
mod color;
mod data;
mod figure;
mod reactive;
mod state;
mod ui;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use app::LaunchDashApp;
use clap::Parser;
use eframe::egui;
use serde::Serialize;

use data::model::{PayloadRange, SiteSelection};
use figure::{PieFigure, ScatterFigure};
use state::AppState;

#[derive(Parser)]
#[command(name = "launch-dash", about = "Launch records dashboard")]
#[command(version)]
struct Cli {
    /// Launch table to load (.csv, .json or .parquet)
    #[arg(long, default_value = "spacex_launch_dash.csv", env = "LAUNCH_DASH_DATA")]
    data: PathBuf,

    /// Initially selected site, or ALL
    #[arg(long, default_value = "ALL")]
    site: String,

    /// Initial lower payload bound in kg (defaults to the observed minimum)
    #[arg(long)]
    payload_min: Option<f64>,

    /// Initial upper payload bound in kg (defaults to the observed maximum)
    #[arg(long)]
    payload_max: Option<f64>,

    /// Write both figures as JSON to this path and exit without opening a window
    #[arg(long)]
    export: Option<PathBuf>,
}

#[derive(Serialize)]
struct Export<'a> {
    site: String,
    payload_range: [f64; 2],
    pie: &'a Option<PieFigure>,
    scatter: &'a Option<ScatterFigure>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let state = build_state(&cli)?;

    if let Some(path) = &cli.export {
        return export(&state, path);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 900.0])
            .with_min_inner_size([600.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Launch Records Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(LaunchDashApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("running UI: {e}"))
}

fn build_state(cli: &Cli) -> Result<AppState> {
    let table = data::loader::load_file(&cli.data)?;
    log::info!(
        "Loaded {} launches from {} with sites {:?}",
        table.len(),
        cli.data.display(),
        table.sites()
    );
    if table.is_empty() {
        log::warn!("{} contains no launches, charts will be empty", cli.data.display());
    }

    let payload_range = match (cli.payload_min, cli.payload_max) {
        (None, None) => None,
        (min, max) => {
            let observed = table.default_payload_range();
            Some(PayloadRange::new(
                min.unwrap_or(observed.min),
                max.unwrap_or(observed.max),
            ))
        }
    };

    let state = AppState::new(table, SiteSelection::parse(&cli.site), payload_range)
        .context("wiring dashboard callbacks")?;
    Ok(state)
}

fn export(state: &AppState, path: &Path) -> Result<()> {
    let doc = Export {
        site: state.site.to_string(),
        payload_range: [state.payload_range.min, state.payload_range.max],
        pie: &state.pie,
        scatter: &state.scatter,
    };
    let json = serde_json::to_string_pretty(&doc).context("serializing figures")?;
    std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    log::info!("Wrote figures to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    const CSV: &str = "\
Launch Site,class,Payload Mass (kg),Booster Version Category
A,0,525,v1.0
A,1,3000,FT
B,1,9600,B4
";

    fn csv_file() -> NamedTempFile {
        let mut tmp = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        write!(tmp, "{}", CSV).unwrap();
        tmp
    }

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("launch-dash").chain(args.iter().copied()))
    }

    #[test]
    fn data_path_is_a_named_option() {
        let tmp = csv_file();
        let path = tmp.path().to_str().unwrap();
        let cli = cli(&["--data", path]);
        assert_eq!(cli.data, tmp.path());
        assert!(Cli::try_parse_from(["launch-dash", path]).is_err());
    }

    #[test]
    fn no_override_uses_observed_bounds() {
        let tmp = csv_file();
        let state = build_state(&cli(&["--data", tmp.path().to_str().unwrap()])).unwrap();
        assert_eq!(state.payload_range, PayloadRange::new(525.0, 9600.0));
        assert_eq!(state.site, SiteSelection::All);
    }

    #[test]
    fn partial_override_keeps_other_observed_bound() {
        let tmp = csv_file();
        let path = tmp.path().to_str().unwrap();

        let state = build_state(&cli(&["--data", path, "--payload-min", "1000"])).unwrap();
        assert_eq!(state.payload_range, PayloadRange::new(1000.0, 9600.0));

        let state = build_state(&cli(&["--data", path, "--payload-max", "5000"])).unwrap();
        assert_eq!(state.payload_range, PayloadRange::new(525.0, 5000.0));
        assert_eq!(state.scatter.as_ref().unwrap().points.len(), 2);
    }

    #[test]
    fn missing_data_file_fails_startup() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.csv");
        assert!(build_state(&cli(&["--data", missing.to_str().unwrap()])).is_err());
    }

    #[test]
    fn export_writes_criteria_and_both_figures() {
        let tmp = csv_file();
        let out = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        let state = build_state(&cli(&[
            "--data",
            tmp.path().to_str().unwrap(),
            "--site",
            "A",
            "--payload-min",
            "1000",
        ]))
        .unwrap();

        export(&state, out.path()).unwrap();

        let text = std::fs::read_to_string(out.path()).unwrap();
        let doc: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(doc["site"], "A");
        assert_eq!(doc["payload_range"], serde_json::json!([1000.0, 9600.0]));
        assert_eq!(doc["pie"]["title"], "Success vs. failure for site A");
        assert_eq!(doc["pie"]["slices"][0]["value"], 1);
        assert_eq!(doc["pie"]["slices"][1]["value"], 1);
        let points = doc["scatter"]["points"].as_array().unwrap();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0]["payload_mass_kg"], 3000.0);
        assert_eq!(points[0]["booster_category"], "FT");
    }
}
