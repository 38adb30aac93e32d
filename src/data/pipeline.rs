use super::aggregate::{aggregate, AggSpec, QueryResult};
use super::error::QueryError;
use super::filter::{apply, FilterSpec};
use super::model::Dataset;

/// Which rows to keep, then how to summarise them. One per dashboard panel.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub filter: FilterSpec,
    pub agg: AggSpec,
}

impl Query {
    pub fn new(filter: FilterSpec, agg: AggSpec) -> Self {
        Query { filter, agg }
    }

    pub fn run(&self, dataset: &Dataset) -> Result<QueryResult, QueryError> {
        run_pipeline(dataset, &self.filter, &self.agg)
    }
}

/// Filter then aggregate. Pure: the dataset is only read.
pub fn run_pipeline(
    dataset: &Dataset,
    filter: &FilterSpec,
    agg: &AggSpec,
) -> Result<QueryResult, QueryError> {
    let view = apply(dataset, filter)?;
    aggregate(&view, agg)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::data::filter::{Choice, Predicate};
    use crate::data::schema::{
        COUNTRY, DRAFT_NUMBER, NET_RATING, POINTS, SEASON, TEAM, TRUE_SHOOTING, UNDRAFTED,
    };
    use crate::data::testing::seasons;

    fn specs() -> Vec<(FilterSpec, AggSpec)> {
        vec![
            (FilterSpec::new(), AggSpec::count(SEASON)),
            (
                FilterSpec::new().equals(TEAM, "SAS"),
                AggSpec::mean(SEASON, TRUE_SHOOTING),
            ),
            (
                FilterSpec::new()
                    .excluding(DRAFT_NUMBER, UNDRAFTED)
                    .between(DRAFT_NUMBER, 1_i64, 10_i64),
                AggSpec::mean(DRAFT_NUMBER, NET_RATING),
            ),
            (
                FilterSpec::new().between(SEASON, "1997-98", "1998-99"),
                AggSpec::percent(
                    TEAM,
                    Predicate::Equals {
                        column: COUNTRY.into(),
                        choice: Choice::from_label("USA"),
                    },
                ),
            ),
            (
                FilterSpec::new().equals(TEAM, "ZZZ"),
                AggSpec::sum(SEASON, POINTS),
            ),
        ]
    }

    #[test]
    fn test_pipeline_is_filter_then_aggregate() {
        let ds = seasons();
        for (filter, agg) in specs() {
            let direct = run_pipeline(&ds, &filter, &agg).unwrap();
            let composed = aggregate(&apply(&ds, &filter).unwrap(), &agg).unwrap();
            assert_eq!(direct, composed);
        }
    }

    #[test]
    fn test_query_runs_are_repeatable() {
        let ds = seasons();
        for (filter, agg) in specs() {
            let query = Query::new(filter, agg);
            assert_eq!(query.run(&ds).unwrap(), query.run(&ds).unwrap());
        }
    }

    #[test]
    fn test_shared_dataset_across_threads() {
        let ds = Arc::new(seasons());
        let expected: Vec<QueryResult> = specs()
            .iter()
            .map(|(f, a)| run_pipeline(&ds, f, a).unwrap())
            .collect();

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    let ds = Arc::clone(&ds);
                    scope.spawn(move || {
                        specs()
                            .iter()
                            .map(|(f, a)| run_pipeline(&ds, f, a).unwrap())
                            .collect::<Vec<_>>()
                    })
                })
                .collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap(), expected);
            }
        });
    }

    #[test]
    fn test_filter_errors_propagate() {
        let ds = seasons();
        let filter = FilterSpec::new().between(DRAFT_NUMBER, 1_i64, 60_i64);
        let err = run_pipeline(&ds, &filter, &AggSpec::count(SEASON)).unwrap_err();
        assert!(matches!(err, QueryError::TypeMismatch { .. }));
    }
}
