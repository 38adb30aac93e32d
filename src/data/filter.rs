use super::error::QueryError;
use super::model::{Column, Dataset, DatasetView, Value};
use super::schema::ALL;

// ---------------------------------------------------------------------------
// Choice – a dropdown selection
// ---------------------------------------------------------------------------

/// A categorical selection: everything, or exactly one value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice {
    All,
    Only(Value),
}

impl Choice {
    /// Map a dropdown label back to a selection; `"All"` is the wildcard.
    pub fn from_label(label: &str) -> Self {
        if label == ALL {
            Choice::All
        } else {
            Choice::Only(Value::guess(label))
        }
    }

    pub fn label(&self) -> String {
        match self {
            Choice::All => ALL.to_string(),
            Choice::Only(v) => v.to_string(),
        }
    }
}

impl From<&str> for Choice {
    fn from(label: &str) -> Self {
        Choice::from_label(label)
    }
}

// ---------------------------------------------------------------------------
// Predicate
// ---------------------------------------------------------------------------

/// A single row test against one column.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// `column == value`, or always true for [`Choice::All`].
    Equals { column: String, choice: Choice },
    /// `column != value`. Missing cells pass.
    Excludes { column: String, value: Value },
    /// Inclusive `lo <= column <= hi`. Numeric when both bounds are numbers,
    /// lexical otherwise. Missing cells never match.
    Between { column: String, lo: Value, hi: Value },
}

impl Predicate {
    pub fn column(&self) -> &str {
        match self {
            Predicate::Equals { column, .. }
            | Predicate::Excludes { column, .. }
            | Predicate::Between { column, .. } => column,
        }
    }

    /// Whether evaluating this predicate coerces cells to numbers.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Predicate::Between { lo, hi, .. } if lo.is_numeric() && hi.is_numeric())
    }

    pub fn matches(&self, cell: &Value) -> Result<bool, QueryError> {
        match self {
            Predicate::Equals { choice, .. } => Ok(match choice {
                Choice::All => true,
                Choice::Only(v) => cell == v,
            }),
            Predicate::Excludes { value, .. } => Ok(cell != value),
            Predicate::Between { column, lo, hi } => {
                if self.is_numeric() {
                    let (Some(lo), Some(hi)) = (lo.as_f64(), hi.as_f64()) else {
                        return Ok(false);
                    };
                    Ok(cell
                        .to_number(column)?
                        .is_some_and(|x| lo <= x && x <= hi))
                } else {
                    if cell.is_null() {
                        return Ok(false);
                    }
                    let text = cell.text();
                    Ok(lo.text() <= text && text <= hi.text())
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// FilterSpec – predicates composed by AND
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSpec {
    predicates: Vec<Predicate>,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    pub fn equals(self, column: &str, choice: impl Into<Choice>) -> Self {
        self.with(Predicate::Equals {
            column: column.to_string(),
            choice: choice.into(),
        })
    }

    pub fn excluding(self, column: &str, value: impl Into<Value>) -> Self {
        self.with(Predicate::Excludes {
            column: column.to_string(),
            value: value.into(),
        })
    }

    pub fn between(self, column: &str, lo: impl Into<Value>, hi: impl Into<Value>) -> Self {
        self.with(Predicate::Between {
            column: column.to_string(),
            lo: lo.into(),
            hi: hi.into(),
        })
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    /// Narrow `view` to the rows passing every predicate, keeping their order.
    ///
    /// Non-numeric predicates run before numeric ranges on each row, so an
    /// exclusion of a text sentinel shields a numeric range on the same
    /// column regardless of the order they were added in.
    pub fn apply<'a>(&self, view: &DatasetView<'a>) -> Result<DatasetView<'a>, QueryError> {
        let dataset = view.dataset();
        let mut resolved: Vec<(&Predicate, &Column)> = self
            .predicates
            .iter()
            .map(|p| Ok((p, dataset.column(p.column())?)))
            .collect::<Result<_, QueryError>>()?;
        resolved.sort_by_key(|(p, _)| p.is_numeric());

        let mut rows = Vec::with_capacity(view.len());
        'rows: for &row in view.rows() {
            for (predicate, column) in &resolved {
                if !predicate.matches(&column.values()[row])? {
                    continue 'rows;
                }
            }
            rows.push(row);
        }

        log::debug!("filter kept {} of {} rows", rows.len(), view.len());
        Ok(DatasetView::with_rows(dataset, rows))
    }
}

/// Select the rows of `dataset` matching `spec`.
pub fn apply<'a>(dataset: &'a Dataset, spec: &FilterSpec) -> Result<DatasetView<'a>, QueryError> {
    spec.apply(&dataset.view())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::schema::{COUNTRY, DRAFT_NUMBER, SEASON, TEAM, UNDRAFTED};
    use crate::data::testing::seasons;

    fn draft_only() -> Dataset {
        crate::data::loader::read_csv(
            "player_name,team_abbreviation,season,country,draft_number,gp,pts,reb,ast,ts_pct,net_rating\n\
             A,BOS,1996-97,USA,1,1,1,1,1,0.5,0\n\
             B,BOS,1996-97,USA,5,1,1,1,1,0.5,0\n\
             C,BOS,1996-97,USA,Undrafted,1,1,1,1,0.5,0\n\
             D,BOS,1996-97,USA,12,1,1,1,1,0.5,0\n"
                .as_bytes(),
        )
        .unwrap()
    }

    #[test]
    fn test_equals_matches_integer_and_float_spellings() {
        let ds = crate::data::loader::read_csv(
            "player_name,team_abbreviation,season,country,draft_number,gp,pts,reb,ast,ts_pct,net_rating\n\
             A,BOS,1996-97,USA,1,1,1,1,1,0.5,0\n\
             B,BOS,1996-97,USA,1.0,1,1,1,1,0.5,0\n\
             C,BOS,1996-97,USA,2,1,1,1,1,0.5,0\n"
                .as_bytes(),
        )
        .unwrap();
        let by_float = apply(&ds, &FilterSpec::new().equals(DRAFT_NUMBER, "1.0")).unwrap();
        assert_eq!(by_float.rows(), &[0, 1]);
        let by_int = apply(&ds, &FilterSpec::new().equals(DRAFT_NUMBER, "1")).unwrap();
        assert_eq!(by_int.rows(), &[0, 1]);
    }

    #[test]
    fn test_filter_is_ordered_subset() {
        let ds = seasons();
        let spec = FilterSpec::new().equals(TEAM, "SAS");
        let view = apply(&ds, &spec).unwrap();
        assert_eq!(view.rows(), &[0, 1, 4, 6]);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let ds = seasons();
        let spec = FilterSpec::new()
            .equals(TEAM, "LAL")
            .between(SEASON, "1996-97", "1997-98");
        let once = apply(&ds, &spec).unwrap();
        let twice = spec.apply(&once).unwrap();
        assert_eq!(once, twice);
        assert_eq!(once.rows(), &[2, 3]);
    }

    #[test]
    fn test_wildcard_keeps_everything() {
        let ds = seasons();
        let spec = FilterSpec::new()
            .equals(TEAM, Choice::All)
            .equals(COUNTRY, "All");
        assert_eq!(apply(&ds, &spec).unwrap(), ds.view());
        assert_eq!(apply(&ds, &FilterSpec::new()).unwrap(), ds.view());
    }

    #[test]
    fn test_season_range_is_inclusive() {
        let ds = seasons();
        let spec = FilterSpec::new().between(SEASON, "1996-97", "1997-98");
        let view = apply(&ds, &spec).unwrap();
        let kept = view.distinct_values(SEASON).unwrap();
        assert_eq!(
            kept.into_iter().collect::<Vec<_>>(),
            vec![Value::from("1996-97"), Value::from("1997-98")]
        );
        assert_eq!(view.len(), 6);
    }

    #[test]
    fn test_inverted_range_matches_nothing() {
        let ds = seasons();
        let spec = FilterSpec::new().between(SEASON, "1998-99", "1996-97");
        assert!(apply(&ds, &spec).unwrap().is_empty());
    }

    #[test]
    fn test_unknown_team_is_empty_not_error() {
        let ds = seasons();
        let view = apply(&ds, &FilterSpec::new().equals(TEAM, "ZZZ")).unwrap();
        assert!(view.is_empty());
    }

    #[test]
    fn test_undrafted_exclusion_then_coercion() {
        let ds = draft_only();
        let drafted = apply(&ds, &FilterSpec::new().excluding(DRAFT_NUMBER, UNDRAFTED)).unwrap();
        assert_eq!(drafted.numeric(DRAFT_NUMBER).unwrap(), vec![1.0, 5.0, 12.0]);

        let err = ds.view().numeric(DRAFT_NUMBER).unwrap_err();
        assert!(matches!(err, QueryError::TypeMismatch { .. }));
    }

    #[test]
    fn test_numeric_range_without_exclusion_fails() {
        let ds = draft_only();
        let spec = FilterSpec::new().between(DRAFT_NUMBER, 1_i64, 60_i64);
        assert_eq!(
            apply(&ds, &spec).unwrap_err(),
            QueryError::TypeMismatch {
                column: DRAFT_NUMBER.into(),
                value: UNDRAFTED.into(),
            }
        );
    }

    #[test]
    fn test_exclusion_shields_range_in_any_order() {
        let ds = draft_only();
        let range_first = FilterSpec::new()
            .between(DRAFT_NUMBER, 2_i64, 12_i64)
            .excluding(DRAFT_NUMBER, UNDRAFTED);
        let exclusion_first = FilterSpec::new()
            .excluding(DRAFT_NUMBER, UNDRAFTED)
            .between(DRAFT_NUMBER, 2_i64, 12_i64);
        let a = apply(&ds, &range_first).unwrap();
        let b = apply(&ds, &exclusion_first).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.rows(), &[1, 3]);
    }

    #[test]
    fn test_unknown_column_is_error_even_for_wildcard() {
        let ds = seasons();
        let err = apply(&ds, &FilterSpec::new().equals("franchise", Choice::All)).unwrap_err();
        assert_eq!(err, QueryError::UnknownColumn("franchise".into()));
    }

    #[test]
    fn test_missing_cells_never_match_a_range() {
        let ds = seasons();
        let spec = FilterSpec::new().between("ts_pct", 0.0, 1.0);
        let view = apply(&ds, &spec).unwrap();
        assert_eq!(view.len(), 7);
        assert!(!view.rows().contains(&5));
    }

    #[test]
    fn test_choice_labels() {
        assert_eq!(Choice::from_label("All"), Choice::All);
        assert_eq!(Choice::from_label("GSW"), Choice::Only(Value::from("GSW")));
        assert_eq!(Choice::from_label("GSW").label(), "GSW");
        assert_eq!(Choice::All.label(), "All");
    }
}
