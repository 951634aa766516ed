use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use clap::Parser;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

/// Write a synthetic launch table for trying out the dashboard.
#[derive(Parser)]
#[command(name = "generate_sample")]
struct Cli {
    /// Output file; `.parquet` writes Parquet, anything else CSV
    #[arg(default_value = "spacex_launch_dash.csv")]
    output: PathBuf,

    /// Number of launches
    #[arg(long, default_value = "56")]
    rows: usize,

    /// PRNG seed
    #[arg(long, default_value = "42")]
    seed: u64,
}

#[derive(Serialize)]
struct LaunchRow {
    #[serde(rename = "Flight Number")]
    flight_number: i64,
    #[serde(rename = "Launch Site")]
    site: &'static str,
    #[serde(rename = "class")]
    class: i64,
    #[serde(rename = "Payload Mass (kg)")]
    payload_mass_kg: f64,
    #[serde(rename = "Booster Version")]
    booster_version: String,
    #[serde(rename = "Booster Version Category")]
    booster_category: &'static str,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

const SITES: [&str; 4] = ["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A", "CCAFS SLC-40"];

/// Booster category, its payload ceiling in kg, and its success rate.
/// Later categories fly heavier and fail less.
const BOOSTERS: [(&str, f64, f64); 5] = [
    ("v1.0", 1_000.0, 0.2),
    ("v1.1", 4_500.0, 0.35),
    ("FT", 6_500.0, 0.7),
    ("B4", 9_600.0, 0.6),
    ("B5", 7_000.0, 0.95),
];

fn generate(rows: usize, rng: &mut SimpleRng) -> Vec<LaunchRow> {
    (0..rows)
        .map(|i| {
            // Booster generations follow flight order.
            let era = (i * BOOSTERS.len() / rows.max(1)).min(BOOSTERS.len() - 1);
            let (category, ceiling, success_rate) = BOOSTERS[era];
            let payload = (rng.next_f64() * ceiling).round();
            LaunchRow {
                flight_number: i as i64 + 1,
                site: *rng.pick(&SITES),
                class: (rng.next_f64() < success_rate) as i64,
                payload_mass_kg: payload,
                booster_version: format!("F9 {category} B{:04}", 1000 + i),
                booster_category: category,
            }
        })
        .collect()
}

fn write_csv(path: &Path, rows: &[LaunchRow]) {
    let mut writer = csv::Writer::from_path(path).expect("Failed to create output file");
    for row in rows {
        writer.serialize(row).expect("Failed to write row");
    }
    writer.flush().expect("Failed to flush writer");
}

fn write_parquet(path: &Path, rows: &[LaunchRow]) {
    let schema = Arc::new(Schema::new(vec![
        Field::new("Flight Number", DataType::Int64, false),
        Field::new("Launch Site", DataType::Utf8, false),
        Field::new("class", DataType::Int64, false),
        Field::new("Payload Mass (kg)", DataType::Float64, false),
        Field::new("Booster Version", DataType::Utf8, false),
        Field::new("Booster Version Category", DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.flight_number))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.site))),
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.class))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.payload_mass_kg))),
            Arc::new(StringArray::from_iter_values(
                rows.iter().map(|r| r.booster_version.as_str()),
            )),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.booster_category))),
        ],
    )
    .expect("Failed to create RecordBatch");

    let file = std::fs::File::create(path).expect("Failed to create output file");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("Failed to create writer");
    writer.write(&batch).expect("Failed to write batch");
    writer.close().expect("Failed to close writer");
}

fn main() {
    let cli = Cli::parse();
    let mut rng = SimpleRng::new(cli.seed);
    let rows = generate(cli.rows, &mut rng);

    let is_parquet = cli
        .output
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("parquet"));
    if is_parquet {
        write_parquet(&cli.output, &rows);
    } else {
        write_csv(&cli.output, &rows);
    }

    let successes = rows.iter().filter(|r| r.class == 1).count();
    println!(
        "Wrote {} launches ({successes} successful) to {}",
        rows.len(),
        cli.output.display()
    );
}
