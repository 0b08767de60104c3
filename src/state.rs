use std::path::Path;

use crate::config::PipelineConfig;
use crate::data::loader::load_table;
use crate::data::schema::PreparedData;
use crate::data::split::TrainTestSplit;
use crate::error::{PipelineError, Result};
use crate::regressor::{Evaluation, PriceModel};

// ---------------------------------------------------------------------------
// Predictor state
// ---------------------------------------------------------------------------

/// Step-by-step driver over the pipeline stages.
///
/// Each stage's output is kept until the next call needs it; calling a step
/// before its prerequisite returns the matching not-ready error.
#[derive(Debug)]
pub struct PricePredictor {
    config: PipelineConfig,

    /// Cleaned X / Y (None until data is loaded).
    data: Option<PreparedData>,

    /// Train / test partition (None until the split is prepared).
    split: Option<TrainTestSplit>,

    /// Fitted model (None until trained).
    model: Option<PriceModel>,
}

impl Default for PricePredictor {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}

impl PricePredictor {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            data: None,
            split: None,
            model: None,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Read `path`, apply the column schema and keep the cleaned X / Y.
    /// Any previous split or model is discarded.
    pub fn load_and_clean(&mut self, path: &Path) -> Result<()> {
        let table = load_table(path)?;
        let data = PreparedData::from_table(table, &self.config.schema)?;

        self.data = Some(data);
        self.split = None;
        self.model = None;
        Ok(())
    }

    /// Partition the loaded data, holding out `test_fraction` of the rows.
    pub fn prepare_split(&mut self, test_fraction: f64) -> Result<()> {
        let data = self.data.as_ref().ok_or(PipelineError::NotLoaded)?;
        let split = data.split(test_fraction, self.config.seed)?;

        self.split = Some(split);
        self.model = None;
        Ok(())
    }

    /// Fit the regressor on the training partition.
    pub fn train(&mut self) -> Result<()> {
        let split = self.split.as_ref().ok_or(PipelineError::NotPrepared)?;
        self.model = Some(PriceModel::fit(split, &self.config.tree)?);
        Ok(())
    }

    /// Score the fitted model on the test partition.
    pub fn evaluate(&self) -> Result<Evaluation> {
        let split = self.split.as_ref().ok_or(PipelineError::NoTestData)?;
        let model = self.model.as_ref().ok_or(PipelineError::NotTrained)?;
        model.evaluate(split)
    }

    pub fn data(&self) -> Option<&PreparedData> {
        self.data.as_ref()
    }

    pub fn split(&self) -> Option<&TrainTestSplit> {
        self.split.as_ref()
    }

    pub fn is_trained(&self) -> bool {
        self.model.is_some()
    }
}
