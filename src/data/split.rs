use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::schema::PreparedData;
use crate::error::{PipelineError, Result};

/// Train and holdout partitions of a [`PreparedData`].
#[derive(Debug, Clone, PartialEq)]
pub struct TrainTestSplit {
    pub feature_names: Vec<String>,
    pub x_train: Vec<Vec<f64>>,
    pub x_test: Vec<Vec<f64>>,
    pub y_train: Vec<f64>,
    pub y_test: Vec<f64>,
}

impl PreparedData {
    /// Shuffle rows with a seeded RNG and hold out `ceil(test_fraction * n)`
    /// of them. The same seed and fraction always give the same partition.
    pub fn split(&self, test_fraction: f64, seed: u64) -> Result<TrainTestSplit> {
        if !(test_fraction > 0.0 && test_fraction < 1.0) {
            return Err(PipelineError::InvalidTestFraction(test_fraction));
        }

        let n = self.len();
        let n_test = (test_fraction * n as f64).ceil() as usize;
        let n_train = n.saturating_sub(n_test);
        if n_test == 0 || n_train == 0 {
            return Err(PipelineError::InsufficientData {
                samples: n,
                test_fraction,
            });
        }

        let mut indices: Vec<usize> = (0..n).collect();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        indices.shuffle(&mut rng);
        let (test_idx, train_idx) = indices.split_at(n_test);

        let rows = |idx: &[usize]| -> Vec<Vec<f64>> {
            idx.iter().map(|&i| self.features[i].clone()).collect()
        };
        let targets = |idx: &[usize]| -> Vec<f64> { idx.iter().map(|&i| self.targets[i]).collect() };

        log::info!("Split {n} rows into {n_train} train / {n_test} test (seed {seed})");

        Ok(TrainTestSplit {
            feature_names: self.feature_names.clone(),
            x_train: rows(train_idx),
            x_test: rows(test_idx),
            y_train: targets(train_idx),
            y_test: targets(test_idx),
        })
    }
}
