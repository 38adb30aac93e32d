use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::Serialize;

use super::error::{LoadError, QueryError};

// ---------------------------------------------------------------------------
// Value – a single cell
// ---------------------------------------------------------------------------

/// A dynamically-typed cell, guessed per cell at load time.
///
/// Columns such as `draft_number` mix `Integer` cells with the `"Undrafted"`
/// text sentinel, so the type lives on the cell rather than on the column.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Integer(i64),
    Float(f64),
    String(String),
}

// -- Manual Eq/Ord so Value can key BTreeSet / BTreeMap --
//
// Numbers compare by value across `Integer` and `Float`, so `1` and `1.0`
// are one key. Order: Null, then numbers, then text.

fn rank(v: &Value) -> u8 {
    match v {
        Value::Null => 0,
        Value::Integer(_) | Value::Float(_) => 1,
        Value::String(_) => 2,
    }
}

/// Numeric order with `-0.0 == 0.0`; NaN falls back to `total_cmp`.
fn float_cmp(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or_else(|| a.total_cmp(&b))
}

/// Exact comparison of an integer with a float.
fn int_float_cmp(a: i64, b: f64) -> Ordering {
    if b.is_nan() {
        return 0.0_f64.total_cmp(&b);
    }
    let whole = b.trunc();
    if whole < i64::MIN as f64 {
        return Ordering::Greater;
    }
    if whole >= i64::MAX as f64 {
        return Ordering::Less;
    }
    a.cmp(&(whole as i64))
        .then_with(|| float_cmp(0.0, b - whole))
}

/// The float as an exact integer, when it is one.
fn integral(f: f64) -> Option<i64> {
    (f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64).then_some(f as i64)
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        use Value::*;
        match (self, other) {
            (Null, Null) => Ordering::Equal,
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => float_cmp(*a, *b),
            (Integer(a), Float(b)) => int_float_cmp(*a, *b),
            (Float(a), Integer(b)) => int_float_cmp(*b, *a).reverse(),
            (String(a), String(b)) => a.cmp(b),
            _ => rank(self).cmp(&rank(other)),
        }
    }
}

impl std::hash::Hash for Value {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        rank(self).hash(state);
        match self {
            Value::String(s) => s.hash(state),
            Value::Integer(i) => i.hash(state),
            Value::Float(f) => match integral(*f) {
                Some(i) => i.hash(state),
                None => f.to_bits().hash(state),
            },
            Value::Null => {}
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{s}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Null => write!(f, ""),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl Value {
    /// Guess the cell type from its text: empty → Null, then integer, float, text.
    ///
    /// Only text containing a digit can be a float, so words such as `nan`
    /// or `Infinity` stay text.
    pub fn guess(s: &str) -> Value {
        if s.is_empty() {
            return Value::Null;
        }
        if let Ok(i) = s.parse::<i64>() {
            return Value::Integer(i);
        }
        if s.bytes().any(|b| b.is_ascii_digit()) {
            if let Ok(f) = s.parse::<f64>() {
                return Value::Float(f);
            }
        }
        Value::String(s.to_string())
    }

    /// Display text, borrowed for strings. Null is the empty string.
    pub fn text(&self) -> Cow<'_, str> {
        match self {
            Value::String(s) => Cow::Borrowed(s.as_str()),
            other => Cow::Owned(other.to_string()),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Integer(_) | Value::Float(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Lenient numeric view, `None` for anything that is not a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Strict numeric coercion: missing stays missing, text is a type error.
    pub fn to_number(&self, column: &str) -> Result<Option<f64>, QueryError> {
        match self {
            Value::Null => Ok(None),
            Value::Integer(i) => Ok(Some(*i as f64)),
            Value::Float(v) => Ok(Some(*v)),
            Value::String(s) => Err(QueryError::TypeMismatch {
                column: column.to_string(),
                value: s.clone(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Column
// ---------------------------------------------------------------------------

/// What the non-null cells of a column hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Every cell is null.
    Empty,
    Numeric,
    Text,
    /// Numbers and text side by side (e.g. draft picks plus "Undrafted").
    Mixed,
}

#[derive(Debug, Clone)]
pub struct Column {
    name: String,
    values: Vec<Value>,
    kind: ColumnKind,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<Value>) -> Self {
        let mut has_number = false;
        let mut has_text = false;
        for v in &values {
            match v {
                Value::Integer(_) | Value::Float(_) => has_number = true,
                Value::String(_) => has_text = true,
                Value::Null => {}
            }
        }
        let kind = match (has_number, has_text) {
            (false, false) => ColumnKind::Empty,
            (true, false) => ColumnKind::Numeric,
            (false, true) => ColumnKind::Text,
            (true, true) => ColumnKind::Mixed,
        };
        Column {
            name: name.into(),
            values,
            kind,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ColumnKind {
        self.kind
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn get(&self, row: usize) -> Option<&Value> {
        self.values.get(row)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The loaded table, column-major and immutable after construction.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Columns in source header order.
    columns: Vec<Column>,
    /// column name → position in `columns`.
    index: BTreeMap<String, usize>,
    n_rows: usize,
}

impl Dataset {
    /// Assemble a dataset, checking that every column has the same length
    /// and that names are unique.
    pub fn from_columns(columns: Vec<Column>) -> Result<Self, LoadError> {
        let n_rows = columns.first().map(Column::len).unwrap_or(0);
        let mut index = BTreeMap::new();

        for (i, col) in columns.iter().enumerate() {
            if col.len() != n_rows {
                return Err(LoadError::Malformed(format!(
                    "column `{}` has {} values but `{}` has {n_rows}",
                    col.name(),
                    col.len(),
                    columns[0].name(),
                )));
            }
            if index.insert(col.name().to_string(), i).is_some() {
                return Err(LoadError::Malformed(format!(
                    "duplicate column `{}`",
                    col.name()
                )));
            }
        }

        Ok(Dataset {
            columns,
            index,
            n_rows,
        })
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.n_rows
    }

    pub fn is_empty(&self) -> bool {
        self.n_rows == 0
    }

    /// Column names in header order.
    pub fn columns(&self) -> Vec<&str> {
        self.columns.iter().map(Column::name).collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn column(&self, name: &str) -> Result<&Column, QueryError> {
        self.index
            .get(name)
            .map(|&i| &self.columns[i])
            .ok_or_else(|| QueryError::UnknownColumn(name.to_string()))
    }

    pub fn iter_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter()
    }

    /// A view selecting every row.
    pub fn view(&self) -> DatasetView<'_> {
        DatasetView {
            dataset: self,
            rows: (0..self.n_rows).collect(),
        }
    }

    /// Sorted unique values of a column, for populating option lists.
    pub fn distinct_values(&self, column: &str) -> Result<BTreeSet<Value>, QueryError> {
        Ok(self.column(column)?.values().iter().cloned().collect())
    }
}

// ---------------------------------------------------------------------------
// DatasetView – an ordered row subset
// ---------------------------------------------------------------------------

/// Rows of a [`Dataset`] selected by a filter, in their original order.
#[derive(Debug, Clone)]
pub struct DatasetView<'a> {
    dataset: &'a Dataset,
    rows: Vec<usize>,
}

impl PartialEq for DatasetView<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.dataset, other.dataset) && self.rows == other.rows
    }
}

impl<'a> DatasetView<'a> {
    pub(crate) fn with_rows(dataset: &'a Dataset, rows: Vec<usize>) -> Self {
        DatasetView { dataset, rows }
    }

    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    /// Indices into the underlying dataset.
    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cells of one column for the selected rows.
    pub fn values(&self, column: &str) -> Result<Vec<&'a Value>, QueryError> {
        let col = self.dataset.column(column)?;
        Ok(self.rows.iter().map(|&r| &col.values()[r]).collect())
    }

    pub fn distinct_values(&self, column: &str) -> Result<BTreeSet<Value>, QueryError> {
        Ok(self.values(column)?.into_iter().cloned().collect())
    }

    /// Coerce a column of the selected rows to numbers. Missing cells become
    /// NaN; any text cell is a type error.
    pub fn numeric(&self, column: &str) -> Result<Vec<f64>, QueryError> {
        self.values(column)?
            .into_iter()
            .map(|v| Ok(v.to_number(column)?.unwrap_or(f64::NAN)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft_dataset() -> Dataset {
        Dataset::from_columns(vec![
            Column::new(
                "draft_number",
                vec![
                    Value::Integer(1),
                    Value::Integer(5),
                    Value::from("Undrafted"),
                    Value::Integer(12),
                ],
            ),
            Column::new(
                "pts",
                vec![
                    Value::Float(20.5),
                    Value::Null,
                    Value::Float(3.0),
                    Value::Integer(8),
                ],
            ),
        ])
        .unwrap()
    }

    #[test]
    fn test_guess_cell_types() {
        assert_eq!(Value::guess(""), Value::Null);
        assert_eq!(Value::guess("12"), Value::Integer(12));
        assert_eq!(Value::guess("0.561"), Value::Float(0.561));
        assert_eq!(Value::guess("Undrafted"), Value::from("Undrafted"));
        assert_eq!(Value::guess("1996-97"), Value::from("1996-97"));
    }

    #[test]
    fn test_value_order_is_total() {
        let set: BTreeSet<Value> = [
            Value::from("b"),
            Value::Integer(3),
            Value::Null,
            Value::Float(f64::NAN),
            Value::from("a"),
            Value::Integer(1),
        ]
        .into_iter()
        .collect();
        let ordered: Vec<Value> = set.into_iter().collect();
        assert_eq!(ordered[0], Value::Null);
        assert_eq!(ordered[1], Value::Integer(1));
        assert_eq!(ordered[2], Value::Integer(3));
        assert!(matches!(ordered[3], Value::Float(f) if f.is_nan()));
        assert_eq!(ordered[4], Value::from("a"));
        assert_eq!(ordered[5], Value::from("b"));
    }

    #[test]
    fn test_words_that_parse_as_floats_stay_text() {
        for word in ["nan", "NaN", "inf", "-Infinity", "infinity"] {
            assert_eq!(Value::guess(word), Value::from(word), "{word}");
        }
        assert_eq!(Value::guess("1e3"), Value::Float(1000.0));
        assert_eq!(Value::guess("-0.5"), Value::Float(-0.5));
    }

    #[test]
    fn test_numbers_compare_by_value_across_types() {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        fn hash(v: &Value) -> u64 {
            let mut h = DefaultHasher::new();
            v.hash(&mut h);
            h.finish()
        }

        assert_eq!(Value::Integer(1), Value::Float(1.0));
        assert_eq!(hash(&Value::Integer(1)), hash(&Value::Float(1.0)));
        assert_eq!(Value::Float(0.0), Value::Float(-0.0));
        assert_eq!(hash(&Value::Float(0.0)), hash(&Value::Float(-0.0)));
        assert!(Value::Integer(1) < Value::Float(1.5));
        assert!(Value::Float(1.5) < Value::Integer(2));
        assert!(Value::Integer(-2) < Value::Float(-1.5));
        assert!(Value::Integer(i64::MAX) < Value::Float(f64::INFINITY));
        assert!(Value::Float(f64::NEG_INFINITY) < Value::Integer(i64::MIN));
        assert!(Value::Integer(5) < Value::Float(f64::NAN));
        assert!(Value::Float(f64::NAN) < Value::from("a"));

        let set: BTreeSet<Value> = [Value::Integer(2), Value::Float(2.0), Value::Float(2.5)]
            .into_iter()
            .collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_column_kinds() {
        let ds = draft_dataset();
        assert_eq!(ds.column("draft_number").unwrap().kind(), ColumnKind::Mixed);
        assert_eq!(ds.column("pts").unwrap().kind(), ColumnKind::Numeric);
        assert_eq!(Column::new("x", vec![Value::Null]).kind(), ColumnKind::Empty);
        assert_eq!(Column::new("x", vec![Value::from("a")]).kind(), ColumnKind::Text);
    }

    #[test]
    fn test_ragged_columns_rejected() {
        let err = Dataset::from_columns(vec![
            Column::new("a", vec![Value::Integer(1), Value::Integer(2)]),
            Column::new("b", vec![Value::Integer(1)]),
        ])
        .unwrap_err();
        assert!(matches!(err, LoadError::Malformed(_)));
    }

    #[test]
    fn test_duplicate_columns_rejected() {
        let err = Dataset::from_columns(vec![
            Column::new("a", vec![Value::Integer(1)]),
            Column::new("a", vec![Value::Integer(2)]),
        ])
        .unwrap_err();
        assert!(matches!(err, LoadError::Malformed(_)));
    }

    #[test]
    fn test_columns_and_distinct_values() {
        let ds = draft_dataset();
        assert_eq!(ds.columns(), vec!["draft_number", "pts"]);
        let distinct = ds.distinct_values("draft_number").unwrap();
        assert_eq!(distinct.len(), 4);
        assert!(distinct.contains(&Value::from("Undrafted")));
        assert_eq!(
            ds.distinct_values("nope").unwrap_err(),
            QueryError::UnknownColumn("nope".into())
        );
    }

    #[test]
    fn test_numeric_coercion_fails_on_sentinel() {
        let ds = draft_dataset();
        let err = ds.view().numeric("draft_number").unwrap_err();
        assert_eq!(
            err,
            QueryError::TypeMismatch {
                column: "draft_number".into(),
                value: "Undrafted".into(),
            }
        );
    }

    #[test]
    fn test_numeric_coercion_maps_missing_to_nan() {
        let ds = draft_dataset();
        let pts = ds.view().numeric("pts").unwrap();
        assert_eq!(pts[0], 20.5);
        assert!(pts[1].is_nan());
        assert_eq!(pts[3], 8.0);
    }

    #[test]
    fn test_views_compare_by_dataset_and_rows() {
        let a = draft_dataset();
        let b = draft_dataset();
        assert_eq!(a.view(), a.view());
        assert_ne!(a.view(), b.view());
        assert_ne!(a.view(), DatasetView::with_rows(&a, vec![0, 1]));
    }
}
