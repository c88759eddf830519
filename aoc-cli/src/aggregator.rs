//! Reorders results from parallel workers so output follows (year, day, part)

use crate::executor::{SolverResult, WorkItem};
use std::collections::{BTreeMap, BTreeSet};

/// Key for ordering results (year, day, part) - ordered ascending
#[derive(Debug, Ord, PartialOrd, Eq, PartialEq, Clone, Copy)]
pub struct ResultKey {
    pub year: u16,
    pub day: u8,
    pub part: u8,
}

impl From<&SolverResult> for ResultKey {
    fn from(r: &SolverResult) -> Self {
        Self {
            year: r.year,
            day: r.day,
            part: r.part,
        }
    }
}

/// Every key a set of work items will produce
pub fn expected_keys(work_items: &[WorkItem]) -> Vec<ResultKey> {
    work_items
        .iter()
        .flat_map(|w| {
            w.parts.clone().map(move |part| ResultKey {
                year: w.year,
                day: w.day,
                part,
            })
        })
        .collect()
}

/// Buffers results until every smaller expected key has been emitted
pub struct ResultAggregator {
    expected: BTreeSet<ResultKey>,
    pending: BTreeMap<ResultKey, SolverResult>,
}

impl ResultAggregator {
    pub fn new(expected_keys: impl IntoIterator<Item = ResultKey>) -> Self {
        Self {
            expected: expected_keys.into_iter().collect(),
            pending: BTreeMap::new(),
        }
    }

    /// Add a result and return any results ready for output (in order)
    pub fn add(&mut self, result: SolverResult) -> Vec<SolverResult> {
        self.pending.insert(ResultKey::from(&result), result);

        let mut ready = Vec::new();
        while let Some(&next) = self.expected.first()
            && let Some(result) = self.pending.remove(&next)
        {
            self.expected.pop_first();
            ready.push(result);
        }
        ready
    }

    /// Remaining buffered results in order, for results nobody was waiting on
    /// or when an expected result never arrived
    pub fn drain(&mut self) -> Vec<SolverResult> {
        let drained = std::mem::take(&mut self.pending);
        for key in drained.keys() {
            self.expected.remove(key);
        }
        drained.into_values().collect()
    }

    /// Check if all expected results have been received
    pub fn is_complete(&self) -> bool {
        self.expected.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;
    use proptest::prelude::*;

    fn make_result(year: u16, day: u8, part: u8) -> SolverResult {
        SolverResult {
            year,
            day,
            part,
            answer: Ok(format!("{}_{}_{}", year, day, part)),
            solve_duration: TimeDelta::milliseconds(10),
            parse_duration: Some(TimeDelta::milliseconds(5)),
        }
    }

    fn keys(triples: &[(u16, u8, u8)]) -> Vec<ResultKey> {
        triples
            .iter()
            .map(|&(year, day, part)| ResultKey { year, day, part })
            .collect()
    }

    fn order(results: &[SolverResult]) -> Vec<(u16, u8, u8)> {
        results.iter().map(|r| (r.year, r.day, r.part)).collect()
    }

    #[test]
    fn test_expected_keys_from_work_items() {
        let items = vec![
            WorkItem {
                year: 2021,
                day: 4,
                parts: 1..=2,
            },
            WorkItem {
                year: 2021,
                day: 5,
                parts: 2..=2,
            },
        ];
        assert_eq!(
            expected_keys(&items),
            keys(&[(2021, 4, 1), (2021, 4, 2), (2021, 5, 2)])
        );
    }

    #[test]
    fn test_in_order_results() {
        let mut agg = ResultAggregator::new(keys(&[(2021, 4, 1), (2021, 4, 2)]));

        assert_eq!(order(&agg.add(make_result(2021, 4, 1))), vec![(2021, 4, 1)]);
        assert_eq!(order(&agg.add(make_result(2021, 4, 2))), vec![(2021, 4, 2)]);
        assert!(agg.is_complete());
    }

    #[test]
    fn test_out_of_order_results() {
        let mut agg =
            ResultAggregator::new(keys(&[(2021, 4, 1), (2021, 4, 2), (2021, 5, 1)]));

        assert!(agg.add(make_result(2021, 4, 2)).is_empty());
        assert!(agg.add(make_result(2021, 5, 1)).is_empty());

        let ready = agg.add(make_result(2021, 4, 1));
        assert_eq!(
            order(&ready),
            vec![(2021, 4, 1), (2021, 4, 2), (2021, 5, 1)]
        );
        assert!(agg.is_complete());
        assert!(agg.drain().is_empty());
    }

    #[test]
    fn test_drain_when_a_result_never_arrives() {
        let mut agg =
            ResultAggregator::new(keys(&[(2021, 4, 1), (2021, 4, 2), (2021, 5, 1)]));
        agg.add(make_result(2021, 5, 1));
        agg.add(make_result(2021, 4, 2));

        assert_eq!(order(&agg.drain()), vec![(2021, 4, 2), (2021, 5, 1)]);
        assert!(!agg.is_complete());
    }

    proptest! {
        /// Whatever order workers finish in, output is sorted and complete
        #[test]
        fn prop_any_arrival_order_is_emitted_sorted(
            arrival in Just((1u8..=6).flat_map(|day| [(2021u16, day, 1u8), (2021, day, 2)]).collect::<Vec<_>>())
                .prop_shuffle()
        ) {
            let mut agg = ResultAggregator::new(keys(&arrival));
            let mut emitted = Vec::new();
            for (year, day, part) in arrival.iter().copied() {
                emitted.extend(order(&agg.add(make_result(year, day, part))));
            }

            let mut sorted = arrival.clone();
            sorted.sort();
            prop_assert_eq!(emitted, sorted);
            prop_assert!(agg.is_complete());
        }
    }
}
