use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, Result};

// ---------------------------------------------------------------------------
// Column schema
// ---------------------------------------------------------------------------

/// Declarative description of which columns the pipeline consumes.
///
/// Columns in `drop_if_present` are removed when they exist and silently
/// ignored otherwise. The target and every feature must exist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnSchema {
    pub target: String,
    pub features: Vec<String>,
    pub drop_if_present: Vec<String>,
}

impl Default for ColumnSchema {
    fn default() -> Self {
        Self {
            target: "Price".to_string(),
            features: ["Rooms", "Bathroom", "Bedroom2", "Car", "Landsize"]
                .into_iter()
                .map(String::from)
                .collect(),
            drop_if_present: vec!["BuildingArea".to_string(), "YearBuilt".to_string()],
        }
    }
}

impl ColumnSchema {
    /// Target first, then features: the order missing columns are reported in.
    pub fn selected_columns(&self) -> Vec<&str> {
        std::iter::once(self.target.as_str())
            .chain(self.features.iter().map(String::as_str))
            .collect()
    }

    pub fn validate(&self) -> Result<()> {
        if self.target.is_empty() {
            return Err(PipelineError::InvalidConfig("target column is empty".into()));
        }
        if self.features.is_empty() {
            return Err(PipelineError::InvalidConfig(
                "at least one feature column is required".into(),
            ));
        }
        let mut seen = BTreeSet::new();
        for name in self.selected_columns() {
            if !seen.insert(name) {
                return Err(PipelineError::InvalidConfig(format!(
                    "column '{name}' is selected more than once"
                )));
            }
        }
        if let Some(col) = self
            .drop_if_present
            .iter()
            .find(|c| seen.contains(c.as_str()))
        {
            return Err(PipelineError::InvalidConfig(format!(
                "column '{col}' is both selected and dropped"
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tree parameters
// ---------------------------------------------------------------------------

/// Decision-tree settings. The defaults grow an unconstrained tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeParams {
    pub max_depth: Option<u16>,
    pub min_samples_split: usize,
    pub min_samples_leaf: usize,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self {
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
        }
    }
}

// ---------------------------------------------------------------------------
// Pipeline configuration
// ---------------------------------------------------------------------------

/// Everything a pipeline run needs besides the input path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Seed for the train/test shuffle.
    pub seed: u64,
    /// Share of rows held out for evaluation.
    pub test_fraction: f64,
    pub schema: ColumnSchema,
    pub tree: TreeParams,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            test_fraction: 0.25,
            schema: ColumnSchema::default(),
            tree: TreeParams::default(),
        }
    }
}

impl PipelineConfig {
    /// Read a JSON config file. Missing fields take their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(PipelineError::FileNotFound(path.to_path_buf()));
        }
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.test_fraction > 0.0 && self.test_fraction < 1.0) {
            return Err(PipelineError::InvalidTestFraction(self.test_fraction));
        }
        if self.tree.min_samples_split < 2 {
            return Err(PipelineError::InvalidConfig(
                "min_samples_split must be at least 2".into(),
            ));
        }
        if self.tree.min_samples_leaf < 1 {
            return Err(PipelineError::InvalidConfig(
                "min_samples_leaf must be at least 1".into(),
            ));
        }
        self.schema.validate()
    }
}
