//! Decision-tree price regression over Melbourne housing data.
//!
//! ```text
//!  path ─▶ load_table ─▶ PreparedData ─▶ TrainTestSplit ─▶ PriceModel ─▶ Evaluation
//! ```
//!
//! [`pipeline::run`] chains the stages in one call; [`PricePredictor`]
//! exposes them as separate steps.

pub mod config;
pub mod data;
pub mod error;
pub mod pipeline;
pub mod regressor;
pub mod report;
pub mod state;

pub use config::{ColumnSchema, PipelineConfig, TreeParams};
pub use data::schema::PreparedData;
pub use data::split::TrainTestSplit;
pub use error::{PipelineError, Result};
pub use regressor::{Evaluation, PriceModel};
pub use state::PricePredictor;
