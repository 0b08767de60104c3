use super::model::Table;
use crate::config::ColumnSchema;
use crate::error::{PipelineError, Result};

// ---------------------------------------------------------------------------
// PreparedData – numeric X / Y after cleaning
// ---------------------------------------------------------------------------

/// Feature matrix and target vector, row-aligned, with no missing values.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedData {
    pub feature_names: Vec<String>,
    pub target_name: String,
    /// Row-major feature matrix (X).
    pub features: Vec<Vec<f64>>,
    /// Target vector (Y), `targets[i]` belongs to `features[i]`.
    pub targets: Vec<f64>,
    /// Rows discarded because a selected column was missing.
    pub dropped_rows: usize,
}

impl PreparedData {
    /// Apply `schema` to a loaded table.
    ///
    /// Optional columns are dropped, required columns checked (every absent
    /// one is reported), and any row with a missing selected value removed.
    pub fn from_table(mut table: Table, schema: &ColumnSchema) -> Result<Self> {
        schema.validate()?;

        let removed = table.drop_columns(&schema.drop_if_present);
        if !removed.is_empty() {
            log::debug!("Dropped columns: {}", removed.join(", "));
        }

        let selected = schema.selected_columns();
        let missing: Vec<String> = selected
            .iter()
            .filter(|name| !table.has_column(name))
            .map(|name| name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(PipelineError::MissingColumns(missing));
        }

        let columns: Vec<_> = selected
            .iter()
            .filter_map(|name| table.column(name))
            .collect();

        let mut features = Vec::with_capacity(table.n_rows());
        let mut targets = Vec::with_capacity(table.n_rows());
        let mut dropped_rows = 0;

        'rows: for row in 0..table.n_rows() {
            let mut values = Vec::with_capacity(columns.len());
            for col in &columns {
                let cell = &col.values[row];
                if cell.is_missing() {
                    dropped_rows += 1;
                    continue 'rows;
                }
                let value = cell.as_f64().ok_or_else(|| PipelineError::NonNumeric {
                    column: col.name.clone(),
                    record: row,
                    value: cell.to_string(),
                })?;
                values.push(value);
            }
            // Column 0 is the target.
            targets.push(values.remove(0));
            features.push(values);
        }

        log::debug!(
            "Kept {} rows, dropped {dropped_rows} with missing values",
            targets.len()
        );

        Ok(PreparedData {
            feature_names: schema.features.clone(),
            target_name: schema.target.clone(),
            features,
            targets,
            dropped_rows,
        })
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}
