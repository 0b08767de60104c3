use std::io::Write;
use std::path::{Path, PathBuf};

use melb_price::{pipeline, PipelineConfig, PipelineError, PricePredictor};

const HEADER: &str = "Suburb,Rooms,Type,Price,Distance,Bedroom2,Bathroom,Car,Landsize,BuildingArea,YearBuilt";

/// Ten complete properties: every selected column is filled in.
const TEN_ROWS: &[&str] = &[
    "Abbotsford,2,h,1480000,2.5,2,1,1,202,,",
    "Abbotsford,2,h,1035000,2.5,2,1,0,156,79,1900",
    "Abbotsford,3,h,1465000,2.5,3,2,0,134,150,1900",
    "Abbotsford,3,h,850000,2.5,3,2,1,94,,",
    "Abbotsford,4,h,1600000,2.5,3,1,2,120,142,2014",
    "Richmond,2,u,941000,2.6,2,1,0,181,,",
    "Richmond,3,h,1876000,2.6,4,2,0,245,210,1910",
    "Richmond,2,h,1636000,2.6,2,1,2,256,107,1890",
    "Brunswick,1,u,300000,5.2,1,1,1,0,,",
    "Brunswick,3,t,1097000,5.2,3,2,1,220,75,2003",
];

fn write_csv(dir: &tempfile::TempDir, name: &str, header: &str, rows: &[&str]) -> PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "{header}").unwrap();
    for row in rows {
        writeln!(file, "{row}").unwrap();
    }
    path
}

fn run_steps(path: &Path, test_fraction: f64) -> melb_price::Result<melb_price::Evaluation> {
    let mut predictor = PricePredictor::default();
    predictor.load_and_clean(path)?;
    predictor.prepare_split(test_fraction)?;
    predictor.train()?;
    predictor.evaluate()
}

#[test]
fn ten_row_dataset_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(&dir, "melb_data.csv", HEADER, TEN_ROWS);

    let evaluation = run_steps(&path, 0.3).unwrap();
    let metrics = evaluation.to_map();
    assert!(metrics.contains_key("MSE"));
    assert!(metrics.contains_key("R2"));
    assert!(metrics["MSE"] >= 0.0);
    assert!(metrics["MSE"].is_finite());
    assert!(metrics["R2"].is_finite());
}

#[test]
fn repeated_runs_are_bit_identical() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(&dir, "melb_data.csv", HEADER, TEN_ROWS);

    let first = run_steps(&path, 0.25).unwrap();
    let second = run_steps(&path, 0.25).unwrap();
    assert_eq!(first.mse.to_bits(), second.mse.to_bits());
    assert_eq!(first.r2.to_bits(), second.r2.to_bits());

    let staged = pipeline::run(&path, &PipelineConfig::default()).unwrap();
    assert_eq!(staged.mse.to_bits(), first.mse.to_bits());
    assert_eq!(staged.r2.to_bits(), first.r2.to_bits());
}

#[test]
fn cleaned_data_has_no_gaps_and_aligned_lengths() {
    let dir = tempfile::tempdir().unwrap();
    let mut rows = TEN_ROWS.to_vec();
    rows.push("Reservoir,3,h,,11.2,3,1,1,500,,");
    rows.push("Reservoir,3,h,700000,11.2,3,1,,500,,");
    rows.push("Reservoir,3,h,720000,11.2,3,NA,1,500,,");
    let path = write_csv(&dir, "melb_data.csv", HEADER, &rows);

    let mut predictor = PricePredictor::default();
    predictor.load_and_clean(&path).unwrap();
    let data = predictor.data().unwrap();
    assert_eq!(data.features.len(), data.targets.len());
    assert_eq!(data.len(), 10);
    assert_eq!(data.dropped_rows, 3);
    assert!(data.features.iter().flatten().all(|v| v.is_finite()));
    assert_eq!(
        data.feature_names,
        vec!["Rooms", "Bathroom", "Bedroom2", "Car", "Landsize"]
    );
}

#[test]
fn short_trailing_record_is_kept_when_only_dropped_columns_are_absent() {
    let dir = tempfile::tempdir().unwrap();
    let mut rows = TEN_ROWS.to_vec();
    // Stops before BuildingArea and YearBuilt.
    rows.push("Reservoir,3,h,500000,11.2,3,1,2,100");
    let path = write_csv(&dir, "melb_data.csv", HEADER, &rows);

    let mut predictor = PricePredictor::default();
    predictor.load_and_clean(&path).unwrap();
    let data = predictor.data().unwrap();
    assert_eq!(data.len(), 11);
    assert_eq!(data.dropped_rows, 0);
    assert_eq!(data.targets[10], 500_000.0);

    assert!(pipeline::run(&path, &PipelineConfig::default()).is_ok());
}

#[test]
fn split_sizes_match_requested_fraction() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(&dir, "melb_data.csv", HEADER, TEN_ROWS);

    let mut predictor = PricePredictor::default();
    predictor.load_and_clean(&path).unwrap();
    predictor.prepare_split(0.3).unwrap();

    let total = predictor.data().unwrap().len();
    let split = predictor.split().unwrap();
    assert_eq!(split.x_train.len() + split.x_test.len(), total);
    assert_eq!(split.x_test.len(), 3);
    assert_eq!(split.y_train.len(), split.x_train.len());
    assert_eq!(split.y_test.len(), split.x_test.len());
}

#[test]
fn missing_price_column_is_named() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(
        &dir,
        "no_price.csv",
        "Rooms,Bathroom,Bedroom2,Car,Landsize",
        &["2,1,2,1,202", "3,2,3,0,134"],
    );

    let mut predictor = PricePredictor::default();
    match predictor.load_and_clean(&path) {
        Err(PipelineError::MissingColumns(cols)) => assert_eq!(cols, vec!["Price".to_string()]),
        other => panic!("expected MissingColumns, got {other:?}"),
    }
}

#[test]
fn nonexistent_path_is_file_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.csv");

    let mut predictor = PricePredictor::default();
    let err = predictor.load_and_clean(&path).unwrap_err();
    assert!(matches!(err, PipelineError::FileNotFound(ref p) if p == &path));
    assert!(err.to_string().contains("absent.csv"));

    assert!(matches!(
        pipeline::run(&path, &PipelineConfig::default()),
        Err(PipelineError::FileNotFound(_))
    ));
}

#[test]
fn steps_out_of_order_report_what_is_missing() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(&dir, "melb_data.csv", HEADER, TEN_ROWS);
    let mut predictor = PricePredictor::default();

    assert!(matches!(predictor.prepare_split(0.25), Err(PipelineError::NotLoaded)));
    assert!(matches!(predictor.train(), Err(PipelineError::NotPrepared)));
    assert!(matches!(predictor.evaluate(), Err(PipelineError::NoTestData)));

    predictor.load_and_clean(&path).unwrap();
    assert!(matches!(predictor.train(), Err(PipelineError::NotPrepared)));

    predictor.prepare_split(0.25).unwrap();
    assert!(matches!(predictor.evaluate(), Err(PipelineError::NotTrained)));

    predictor.train().unwrap();
    assert!(predictor.evaluate().is_ok());

    // Reloading invalidates the downstream stages.
    predictor.load_and_clean(&path).unwrap();
    assert!(predictor.split().is_none());
    assert!(!predictor.is_trained());
}

#[test]
fn json_input_matches_csv_input() {
    let dir = tempfile::tempdir().unwrap();
    let csv_path = write_csv(&dir, "melb_data.csv", HEADER, TEN_ROWS);

    let headers: Vec<&str> = HEADER.split(',').collect();
    let records: Vec<serde_json::Value> = TEN_ROWS
        .iter()
        .map(|row| {
            let obj: serde_json::Map<String, serde_json::Value> = headers
                .iter()
                .zip(row.split(','))
                .map(|(h, v)| {
                    let value = match v.parse::<f64>() {
                        Ok(n) => serde_json::json!(n),
                        Err(_) if v.is_empty() => serde_json::Value::Null,
                        Err(_) => serde_json::json!(v),
                    };
                    (h.to_string(), value)
                })
                .collect();
            serde_json::Value::Object(obj)
        })
        .collect();
    let json_path = dir.path().join("melb_data.json");
    std::fs::write(&json_path, serde_json::to_string(&records).unwrap()).unwrap();

    let config = PipelineConfig::default();
    let from_csv = pipeline::run(&csv_path, &config).unwrap();
    let from_json = pipeline::run(&json_path, &config).unwrap();
    assert_eq!(from_csv, from_json);
}

#[test]
fn config_file_drives_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(&dir, "melb_data.csv", HEADER, TEN_ROWS);
    let config_path = dir.path().join("pipeline.json");
    std::fs::write(
        &config_path,
        r#"{ "seed": 7, "test_fraction": 0.4, "tree": { "max_depth": 2 } }"#,
    )
    .unwrap();

    let config = PipelineConfig::from_file(&config_path).unwrap();
    assert_eq!(config.seed, 7);

    let mut predictor = PricePredictor::new(config.clone());
    predictor.load_and_clean(&path).unwrap();
    predictor.prepare_split(config.test_fraction).unwrap();
    assert_eq!(predictor.split().unwrap().x_test.len(), 4);
    predictor.train().unwrap();
    let stepwise = predictor.evaluate().unwrap();

    assert_eq!(pipeline::run(&path, &config).unwrap(), stepwise);
}
