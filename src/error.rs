use std::path::PathBuf;

use thiserror::Error;

/// Everything that can stop the pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("file {} was not found", .0.display())]
    FileNotFound(PathBuf),

    #[error("dataset is missing columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// `record` is the zero-based index of the data record, header excluded.
    #[error("column '{column}', data record {record}: '{value}' is not numeric")]
    NonNumeric {
        column: String,
        record: usize,
        value: String,
    },

    #[error("test fraction must be strictly between 0 and 1, got {0}")]
    InvalidTestFraction(f64),

    #[error(
        "cannot split {samples} samples with test fraction {test_fraction}: \
         train and test sets must both be non-empty"
    )]
    InsufficientData { samples: usize, test_fraction: f64 },

    #[error("data must be loaded before the train/test split")]
    NotLoaded,

    #[error("training data has not been prepared")]
    NotPrepared,

    #[error("there is no test data to evaluate")]
    NoTestData,

    #[error("the model must be trained before it can be evaluated")]
    NotTrained,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("model error: {0}")]
    Model(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error(transparent)]
    Arrow(#[from] arrow::error::ArrowError),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
