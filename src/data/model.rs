use std::sync::Arc;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Record – one row of a CSV dataset
// ---------------------------------------------------------------------------

/// A single source row: column name → raw string value, in header order.
///
/// Values are never coerced at load time; numeric interpretation happens
/// in the aggregator, at the point of use.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Header row shared by every record of the same dataset.
    columns: Arc<[String]>,
    values: Vec<String>,
}

impl Record {
    pub fn new(columns: Arc<[String]>, values: Vec<String>) -> Self {
        Record { columns, values }
    }

    /// Build a record from `(column, value)` pairs.
    #[cfg(test)]
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let (columns, values): (Vec<String>, Vec<String>) = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .unzip();
        Record {
            columns: columns.into(),
            values,
        }
    }

    /// Raw value of `column`, or `None` if the dataset has no such column.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.columns
            .iter()
            .position(|c| c == column)
            .and_then(|i| self.values.get(i))
            .map(String::as_str)
    }
}

// ---------------------------------------------------------------------------
// Dataset – a fully loaded CSV file
// ---------------------------------------------------------------------------

/// The parsed contents of one CSV source.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Locator the dataset was loaded from (for diagnostics).
    pub source: String,
    /// Column names from the header row.
    pub column_names: Vec<String>,
    /// All rows, in file order.
    pub records: Vec<Record>,
}

impl Dataset {
    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ---------------------------------------------------------------------------
// BucketRule / AggregateEntry
// ---------------------------------------------------------------------------

/// An inclusive `[min, max]` range mapped to a display label.
#[derive(Debug, Clone, PartialEq)]
pub struct BucketRule {
    pub min: f64,
    pub max: f64,
    pub label: String,
}

impl BucketRule {
    pub fn new(min: f64, max: f64, label: impl Into<String>) -> Self {
        BucketRule {
            min,
            max,
            label: label.into(),
        }
    }

    /// Inclusive on both ends. `NaN` is never contained.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// One slice of a donut chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregateEntry {
    pub label: String,
    pub count: usize,
    /// Share of the aggregation total, formatted with two decimals.
    pub percentage: String,
}

impl AggregateEntry {
    /// Legend text; an empty key renders as `Unknown`.
    pub fn legend_label(&self) -> String {
        let label = if self.label.is_empty() {
            "Unknown"
        } else {
            self.label.as_str()
        };
        format!("{label}: {}%", self.percentage)
    }
}
