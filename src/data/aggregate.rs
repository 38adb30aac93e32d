use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use super::error::QueryError;
use super::filter::{Choice, Predicate};
use super::model::{ColumnKind, DatasetView, Value};

// ---------------------------------------------------------------------------
// Aggregation specification
// ---------------------------------------------------------------------------

/// What to compute for each group.
#[derive(Debug, Clone, PartialEq)]
pub enum Aggregation {
    /// Arithmetic mean of a column, skipping missing and NaN cells.
    Mean(String),
    /// Sum of a column, skipping missing and NaN cells.
    Sum(String),
    /// Number of rows in the group.
    Count,
    /// Share of the group's rows matching the predicate, in percent.
    Percent(Predicate),
}

/// How group keys are ordered in the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyOrder {
    /// Numeric for numeric or mixed key columns, lexical otherwise.
    #[default]
    Auto,
    Numeric,
    Lexical,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AggSpec {
    pub group_by: String,
    pub aggregation: Aggregation,
    pub order: KeyOrder,
}

impl AggSpec {
    pub fn new(group_by: &str, aggregation: Aggregation) -> Self {
        AggSpec {
            group_by: group_by.to_string(),
            aggregation,
            order: KeyOrder::Auto,
        }
    }

    pub fn mean(group_by: &str, column: &str) -> Self {
        Self::new(group_by, Aggregation::Mean(column.to_string()))
    }

    pub fn sum(group_by: &str, column: &str) -> Self {
        Self::new(group_by, Aggregation::Sum(column.to_string()))
    }

    pub fn count(group_by: &str) -> Self {
        Self::new(group_by, Aggregation::Count)
    }

    pub fn percent(group_by: &str, predicate: Predicate) -> Self {
        Self::new(group_by, Aggregation::Percent(predicate))
    }

    pub fn ordered(mut self, order: KeyOrder) -> Self {
        self.order = order;
        self
    }

    /// Short human label for the aggregated value, e.g. `mean pts`.
    pub fn label(&self) -> String {
        match &self.aggregation {
            Aggregation::Mean(c) => format!("mean {c}"),
            Aggregation::Sum(c) => format!("total {c}"),
            Aggregation::Count => "rows".to_string(),
            Aggregation::Percent(p) => format!("% {p}"),
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::Equals { column, choice } => match choice {
                Choice::All => write!(f, "{column} == *"),
                Choice::Only(v) => write!(f, "{column} == {v}"),
            },
            Predicate::Excludes { column, value } => write!(f, "{column} != {value}"),
            Predicate::Between { column, lo, hi } => write!(f, "{lo} <= {column} <= {hi}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Query result
// ---------------------------------------------------------------------------

/// Ordered `(key, value)` series, one entry per group, keys unique.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResult {
    /// Column the rows were grouped by.
    pub key: String,
    /// What the values measure.
    pub label: String,
    pub points: Vec<(Value, f64)>,
}

impl QueryResult {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &Value> {
        self.points.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|(_, v)| *v)
    }

    pub fn get(&self, key: &Value) -> Option<f64> {
        self.points.iter().find(|(k, _)| k == key).map(|(_, v)| *v)
    }
}

// ---------------------------------------------------------------------------
// Grouping
// ---------------------------------------------------------------------------

#[derive(Default)]
struct Accumulator {
    rows: usize,
    counted: usize,
    matched: usize,
    sum: f64,
}

impl Accumulator {
    fn add_number(&mut self, x: Option<f64>) {
        if let Some(x) = x.filter(|x| !x.is_nan()) {
            self.sum += x;
            self.counted += 1;
        }
    }

    /// `None` drops the group: a zero denominator is never reported.
    fn finish(&self, aggregation: &Aggregation) -> Option<f64> {
        match aggregation {
            Aggregation::Mean(_) => (self.counted > 0).then(|| self.sum / self.counted as f64),
            Aggregation::Sum(_) => Some(self.sum),
            Aggregation::Count => Some(self.rows as f64),
            Aggregation::Percent(_) => {
                (self.rows > 0).then(|| self.matched as f64 / self.rows as f64 * 100.0)
            }
        }
    }
}

/// Group the rows of `view` by `spec.group_by` and aggregate each group.
///
/// Groups exist only where rows exist, so an empty view yields an empty
/// result. Numeric ordering of a key column that still holds text fails with
/// [`QueryError::TypeMismatch`].
pub fn aggregate(view: &DatasetView<'_>, spec: &AggSpec) -> Result<QueryResult, QueryError> {
    let dataset = view.dataset();
    let key_col = dataset.column(&spec.group_by)?;
    let target = match &spec.aggregation {
        Aggregation::Mean(c) | Aggregation::Sum(c) => Some(dataset.column(c)?),
        Aggregation::Percent(p) => Some(dataset.column(p.column())?),
        Aggregation::Count => None,
    };

    let mut groups: BTreeMap<&Value, Accumulator> = BTreeMap::new();
    for &row in view.rows() {
        let acc = groups.entry(&key_col.values()[row]).or_default();
        acc.rows += 1;
        let Some(target) = target else {
            continue;
        };
        let cell = &target.values()[row];
        match &spec.aggregation {
            Aggregation::Mean(c) | Aggregation::Sum(c) => acc.add_number(cell.to_number(c)?),
            Aggregation::Percent(p) => {
                if p.matches(cell)? {
                    acc.matched += 1;
                }
            }
            Aggregation::Count => {}
        }
    }

    let numeric_keys = match spec.order {
        KeyOrder::Numeric => true,
        KeyOrder::Lexical => false,
        KeyOrder::Auto => matches!(key_col.kind(), ColumnKind::Numeric | ColumnKind::Mixed),
    };

    let mut points: Vec<(Value, f64)> = groups
        .iter()
        .filter_map(|(key, acc)| Some(((*key).clone(), acc.finish(&spec.aggregation)?)))
        .collect();

    if numeric_keys {
        let mut keyed = points
            .into_iter()
            .map(|(key, value)| Ok((key.to_number(&spec.group_by)?, key, value)))
            .collect::<Result<Vec<_>, QueryError>>()?;
        keyed.sort_by(|a, b| match (a.0, b.0) {
            (Some(x), Some(y)) => x.total_cmp(&y),
            (x, y) => x.is_some().cmp(&y.is_some()),
        });
        points = keyed.into_iter().map(|(_, key, value)| (key, value)).collect();
    } else {
        // Null displays as "" and so sorts first.
        points.sort_by(|(a, _), (b, _)| a.text().cmp(&b.text()));
    }

    log::debug!(
        "aggregated {} rows into {} groups by {}",
        view.len(),
        points.len(),
        spec.group_by
    );

    Ok(QueryResult {
        key: spec.group_by.clone(),
        label: spec.label(),
        points,
    })
}
