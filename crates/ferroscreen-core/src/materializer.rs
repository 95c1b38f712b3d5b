//! Turns raw scanner rows into a [`ResultTable`].
//!
//! Values are zipped positionally against the compiled column list, which is
//! the order the columns were sent in.

use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::compiler::{CompiledColumn, WireQuery};
use crate::domain::{ScreenerKind, UtcDateTime};
use crate::error::MaterializeError;
use crate::rating::RatingSignal;
use crate::transport::RawResponse;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRow {
    pub symbol: String,
    pub values: Vec<Value>,
}

/// One fetched page of screener results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultTable {
    pub request_id: Uuid,
    pub kind: ScreenerKind,
    pub fetched_at: UtcDateTime,
    pub total_count: u64,
    pub columns: Vec<CompiledColumn>,
    pub rows: Vec<ResultRow>,
}

impl ResultTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of the column with the given wire token.
    pub fn column_index(&self, token: &str) -> Option<usize> {
        self.columns.iter().position(|column| column.token == token)
    }

    pub fn get(&self, row: usize, token: &str) -> Option<&Value> {
        let index = self.column_index(token)?;
        self.rows.get(row)?.values.get(index)
    }

    /// Reads a rating column of `row` as a [`RatingSignal`].
    pub fn rating_signal(&self, row: usize, token: &str) -> Option<RatingSignal> {
        self.get(row, token)
            .and_then(Value::as_f64)
            .and_then(RatingSignal::from_value)
    }
}

pub fn materialize(query: &WireQuery, raw: RawResponse) -> Result<ResultTable, MaterializeError> {
    let expected = query.columns().len();
    let rows = raw
        .rows
        .into_iter()
        .map(|row| {
            if row.values.len() != expected {
                return Err(MaterializeError::RowWidthMismatch {
                    symbol: row.symbol,
                    expected,
                    actual: row.values.len(),
                });
            }
            Ok(ResultRow {
                symbol: row.symbol,
                values: row.values,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ResultTable {
        request_id: Uuid::new_v4(),
        kind: query.kind(),
        fetched_at: UtcDateTime::now(),
        total_count: raw.total_count,
        columns: query.columns().to_vec(),
        rows,
    })
}
