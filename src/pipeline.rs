use std::path::Path;

use crate::config::PipelineConfig;
use crate::data::loader::load_table;
use crate::data::schema::PreparedData;
use crate::error::Result;
use crate::regressor::{Evaluation, PriceModel};

/// Load `path`, then clean, split, fit and score it in one pass.
///
/// Each stage takes the previous stage's output directly, so there is no
/// ordering to get wrong.
pub fn run(path: &Path, config: &PipelineConfig) -> Result<Evaluation> {
    config.validate()?;

    let table = load_table(path)?;
    let data = PreparedData::from_table(table, &config.schema)?;
    let split = data.split(config.test_fraction, config.seed)?;
    let model = PriceModel::fit(&split, &config.tree)?;
    model.evaluate(&split)
}
