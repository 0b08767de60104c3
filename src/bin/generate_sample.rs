use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use clap::Parser;
use parquet::arrow::ArrowWriter;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;

/// Write a synthetic Melbourne-style housing dataset.
#[derive(Parser, Debug)]
#[command(name = "generate_sample")]
struct Args {
    /// Output file; the extension picks the format (.csv, .json, .parquet)
    #[arg(default_value = "melb_data.csv")]
    out: PathBuf,

    /// Number of properties to generate
    #[arg(long, default_value_t = 500)]
    rows: usize,

    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Probability that a property's Car count is left blank
    #[arg(long, default_value_t = 0.05)]
    missing_rate: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct House {
    suburb: &'static str,
    rooms: i64,
    #[serde(rename = "Type")]
    kind: &'static str,
    price: f64,
    distance: f64,
    bedroom2: i64,
    bathroom: i64,
    car: Option<i64>,
    landsize: f64,
    building_area: Option<f64>,
    year_built: Option<i64>,
}

// (name, distance to CBD in km)
const SUBURBS: &[(&str, f64)] = &[
    ("Abbotsford", 2.5),
    ("Richmond", 2.6),
    ("Brunswick", 5.2),
    ("Essendon", 8.0),
    ("Reservoir", 11.2),
    ("Glen Waverley", 16.7),
    ("Frankston", 38.0),
];

/// Box-Muller transform for normal distribution
fn gauss(rng: &mut StdRng, mean: f64, std_dev: f64) -> f64 {
    let u1: f64 = rng.gen::<f64>().max(1e-15);
    let u2: f64 = rng.gen();
    let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
    mean + std_dev * z
}

fn generate_house(rng: &mut StdRng, missing_rate: f64) -> House {
    let &(suburb, distance) = SUBURBS.choose(rng).unwrap_or(&SUBURBS[0]);
    let kind = *["h", "u", "t"].choose(rng).unwrap_or(&"h");

    let rooms: i64 = rng.gen_range(1..=5);
    let bedroom2 = (rooms + rng.gen_range(-1..=1)).max(0);
    let bathroom: i64 = rng.gen_range(1..=rooms.clamp(1, 3));
    let car = (!rng.gen_bool(missing_rate)).then(|| rng.gen_range(0..=3));

    let landsize = match kind {
        "u" => gauss(rng, 80.0, 60.0),
        _ => gauss(rng, 550.0, 200.0),
    }
    .max(0.0)
    .round();

    let building_area =
        (!rng.gen_bool(0.45)).then(|| gauss(rng, 40.0 * rooms as f64, 15.0).max(20.0).round());
    let year_built = (!rng.gen_bool(0.4)).then(|| rng.gen_range(1880..=2017));

    let price = 250_000.0
        + 160_000.0 * rooms as f64
        + 90_000.0 * bathroom as f64
        + 25_000.0 * car.unwrap_or(1) as f64
        + 350.0 * landsize
        - 18_000.0 * distance
        + gauss(rng, 0.0, 90_000.0);

    House {
        suburb,
        rooms,
        kind,
        price: (price.max(120_000.0) / 1000.0).round() * 1000.0,
        distance,
        bedroom2,
        bathroom,
        car,
        landsize,
        building_area,
        year_built,
    }
}

fn write_csv(path: &Path, houses: &[House]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;
    for house in houses {
        writer.serialize(house).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV file")?;
    Ok(())
}

fn write_json(path: &Path, houses: &[House]) -> Result<()> {
    let file = std::fs::File::create(path).context("creating JSON file")?;
    serde_json::to_writer_pretty(file, houses).context("writing JSON")?;
    Ok(())
}

fn write_parquet(path: &Path, houses: &[House]) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("Suburb", DataType::Utf8, false),
        Field::new("Rooms", DataType::Int64, false),
        Field::new("Type", DataType::Utf8, false),
        Field::new("Price", DataType::Float64, false),
        Field::new("Distance", DataType::Float64, false),
        Field::new("Bedroom2", DataType::Int64, false),
        Field::new("Bathroom", DataType::Int64, false),
        Field::new("Car", DataType::Int64, true),
        Field::new("Landsize", DataType::Float64, false),
        Field::new("BuildingArea", DataType::Float64, true),
        Field::new("YearBuilt", DataType::Int64, true),
    ]));

    let columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from_iter_values(houses.iter().map(|h| h.suburb))),
        Arc::new(Int64Array::from_iter_values(houses.iter().map(|h| h.rooms))),
        Arc::new(StringArray::from_iter_values(houses.iter().map(|h| h.kind))),
        Arc::new(Float64Array::from_iter_values(houses.iter().map(|h| h.price))),
        Arc::new(Float64Array::from_iter_values(houses.iter().map(|h| h.distance))),
        Arc::new(Int64Array::from_iter_values(houses.iter().map(|h| h.bedroom2))),
        Arc::new(Int64Array::from_iter_values(houses.iter().map(|h| h.bathroom))),
        Arc::new(Int64Array::from(houses.iter().map(|h| h.car).collect::<Vec<_>>())),
        Arc::new(Float64Array::from_iter_values(houses.iter().map(|h| h.landsize))),
        Arc::new(Float64Array::from(
            houses.iter().map(|h| h.building_area).collect::<Vec<_>>(),
        )),
        Arc::new(Int64Array::from(
            houses.iter().map(|h| h.year_built).collect::<Vec<_>>(),
        )),
    ];

    let batch = RecordBatch::try_new(schema.clone(), columns).context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if !(0.0..=1.0).contains(&args.missing_rate) {
        bail!("--missing-rate must be between 0 and 1, got {}", args.missing_rate);
    }

    let mut rng = StdRng::seed_from_u64(args.seed);
    let houses: Vec<House> = (0..args.rows)
        .map(|_| generate_house(&mut rng, args.missing_rate))
        .collect();

    let ext = args
        .out
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "parquet" | "pq" => write_parquet(&args.out, &houses)?,
        "json" => write_json(&args.out, &houses)?,
        _ => write_csv(&args.out, &houses)?,
    }

    log::info!("Wrote {} properties to {}", houses.len(), args.out.display());
    println!("Wrote {} properties to {}", houses.len(), args.out.display());
    Ok(())
}
