//! Decision-tree price model.
//!
//! Thin wrapper around smartcore's CART regressor plus the holdout metrics
//! the pipeline reports.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::metrics::{mean_squared_error, r2};
use smartcore::tree::decision_tree_regressor::{
    DecisionTreeRegressor, DecisionTreeRegressorParameters,
};

use crate::config::TreeParams;
use crate::data::split::TrainTestSplit;
use crate::error::{PipelineError, Result};

type Tree = DecisionTreeRegressor<f64, f64, DenseMatrix<f64>, Vec<f64>>;

// ---------------------------------------------------------------------------
// Evaluation
// ---------------------------------------------------------------------------

/// Holdout metrics of a fitted model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    #[serde(rename = "MSE")]
    pub mse: f64,
    #[serde(rename = "R2")]
    pub r2: f64,
}

impl Evaluation {
    /// Compare predictions against the true targets.
    pub fn from_predictions(y_true: &Vec<f64>, y_pred: &Vec<f64>) -> Result<Self> {
        if y_true.is_empty() || y_true.len() != y_pred.len() {
            return Err(PipelineError::Model(format!(
                "cannot score {} predictions against {} targets",
                y_pred.len(),
                y_true.len()
            )));
        }

        let mse = mean_squared_error(y_true, y_pred);

        let mean = y_true.iter().sum::<f64>() / y_true.len() as f64;
        let ss_tot: f64 = y_true.iter().map(|y| (y - mean).powi(2)).sum();
        let score = if ss_tot == 0.0 {
            // Constant targets: R2 is undefined, score as sklearn does.
            if mse == 0.0 {
                1.0
            } else {
                0.0
            }
        } else {
            r2(y_true, y_pred)
        };

        Ok(Evaluation { mse, r2: score })
    }

    /// The metrics keyed by their display names.
    pub fn to_map(&self) -> BTreeMap<&'static str, f64> {
        BTreeMap::from([("MSE", self.mse), ("R2", self.r2)])
    }
}

// ---------------------------------------------------------------------------
// PriceModel
// ---------------------------------------------------------------------------

/// A fitted regression tree and the feature order it expects.
pub struct PriceModel {
    tree: Tree,
    feature_names: Vec<String>,
}

impl fmt::Debug for PriceModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PriceModel")
            .field("feature_names", &self.feature_names)
            .finish_non_exhaustive()
    }
}

impl PriceModel {
    /// Fit a tree on the training half of `split`.
    pub fn fit(split: &TrainTestSplit, params: &TreeParams) -> Result<Self> {
        if split.x_train.is_empty() {
            return Err(PipelineError::NotPrepared);
        }

        let x = to_matrix(&split.x_train)?;
        let y = split.y_train.clone();

        let mut parameters = DecisionTreeRegressorParameters::default()
            .with_min_samples_split(params.min_samples_split)
            .with_min_samples_leaf(params.min_samples_leaf);
        if let Some(depth) = params.max_depth {
            parameters = parameters.with_max_depth(depth);
        }

        log::info!(
            "Training decision tree on {} samples x {} features",
            split.x_train.len(),
            split.feature_names.len()
        );
        log::debug!("Parameters: {params:?}");

        let tree = Tree::fit(&x, &y, parameters).map_err(|e| PipelineError::Model(e.to_string()))?;

        Ok(PriceModel {
            tree,
            feature_names: split.feature_names.clone(),
        })
    }

    /// Predict a price for every feature row.
    pub fn predict(&self, features: &[Vec<f64>]) -> Result<Vec<f64>> {
        if features.is_empty() {
            return Ok(Vec::new());
        }
        if let Some(row) = features.iter().find(|r| r.len() != self.feature_names.len()) {
            return Err(PipelineError::Model(format!(
                "expected {} features per row, got {}",
                self.feature_names.len(),
                row.len()
            )));
        }
        let x = to_matrix(features)?;
        self.tree
            .predict(&x)
            .map_err(|e| PipelineError::Model(e.to_string()))
    }

    /// Score the model on the holdout half of `split`.
    pub fn evaluate(&self, split: &TrainTestSplit) -> Result<Evaluation> {
        if split.x_test.is_empty() {
            return Err(PipelineError::NoTestData);
        }
        let predictions = self.predict(&split.x_test)?;
        let evaluation = Evaluation::from_predictions(&split.y_test, &predictions)?;
        log::info!(
            "Evaluated on {} rows: MSE {:.2}, R2 {:.4}",
            split.y_test.len(),
            evaluation.mse,
            evaluation.r2
        );
        Ok(evaluation)
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }
}

fn to_matrix(rows: &[Vec<f64>]) -> Result<DenseMatrix<f64>> {
    DenseMatrix::from_2d_vec(&rows.to_vec())
        .map_err(|e| PipelineError::Model(format!("failed to build feature matrix: {e}")))
}
