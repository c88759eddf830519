//! Property tests for solvers built with `#[derive(AocSolver)]`

use aoc_solver::{AocParser, AocSolver, ParseError, PartSolver, SolveError, Solver};
use proptest::prelude::*;

fn parse_numbers(input: &str) -> Result<Vec<i64>, ParseError> {
    input
        .lines()
        .filter(|l| !l.is_empty())
        .map(|l| {
            l.trim()
                .parse()
                .map_err(|_| ParseError::InvalidFormat(format!("not a number: {}", l)))
        })
        .collect()
}

fn to_input(numbers: &[i64]) -> String {
    numbers
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(AocSolver)]
#[aoc_solver(max_parts = 2)]
struct SumProduct;

impl AocParser for SumProduct {
    type SharedData<'a> = Vec<i64>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        parse_numbers(input)
    }
}

impl PartSolver<1> for SumProduct {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().sum::<i64>().to_string())
    }
}

impl PartSolver<2> for SumProduct {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().product::<i64>().to_string())
    }
}

mod part_dispatch {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// `solve_part(n)` answers exactly what `PartSolver<n>` answers
        #[test]
        fn solve_part_dispatches_to_part_solver(
            numbers in prop::collection::vec(1i64..10, 1..5),
            part in 1u8..=2
        ) {
            let input = to_input(&numbers);
            let mut shared1 = SumProduct::parse(&input).unwrap();
            let mut shared2 = SumProduct::parse(&input).unwrap();

            let via_selector = SumProduct::solve_part(&mut shared1, part).unwrap();
            let direct = match part {
                1 => <SumProduct as PartSolver<1>>::solve(&mut shared2),
                2 => <SumProduct as PartSolver<2>>::solve(&mut shared2),
                _ => unreachable!(),
            };

            prop_assert_eq!(via_selector, direct.unwrap());
        }

        /// Parts outside `1..=max_parts` are reported as not implemented
        #[test]
        fn invalid_part_returns_not_implemented(invalid_part in prop_oneof![Just(0u8), 3u8..=255]) {
            let mut shared = SumProduct::parse("1\n2\n3").unwrap();
            match SumProduct::solve_part(&mut shared, invalid_part) {
                Err(SolveError::PartNotImplemented(p)) => prop_assert_eq!(p, invalid_part),
                other => prop_assert!(false, "Expected PartNotImplemented, got {:?}", other),
            }
        }
    }

    #[test]
    fn parts_constant_matches_attribute() {
        assert_eq!(SumProduct::PARTS, 2);
    }
}

mod shared_state {
    use super::*;

    /// Part 2 reuses work cached by part 1
    #[derive(Debug, Clone)]
    struct Cached {
        numbers: Vec<i64>,
        sum: Option<i64>,
    }

    #[derive(AocSolver)]
    #[aoc_solver(max_parts = 2)]
    struct CachingSolver;

    impl AocParser for CachingSolver {
        type SharedData<'a> = Cached;

        fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
            Ok(Cached {
                numbers: parse_numbers(input)?,
                sum: None,
            })
        }
    }

    impl PartSolver<1> for CachingSolver {
        fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
            let sum = match shared.sum {
                Some(sum) => sum,
                None => {
                    let sum = shared.numbers.iter().sum();
                    shared.sum = Some(sum);
                    sum
                }
            };
            Ok(sum.to_string())
        }
    }

    impl PartSolver<2> for CachingSolver {
        fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
            let sum = shared.sum.unwrap_or(0);
            Ok((sum * 2).to_string())
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn mutation_is_visible_to_later_parts(numbers in prop::collection::vec(1i64..100, 1..5)) {
            let input = to_input(&numbers);
            let expected: i64 = numbers.iter().sum();

            let mut shared = CachingSolver::parse(&input).unwrap();
            prop_assert_eq!(CachingSolver::solve_part(&mut shared, 1).unwrap(), expected.to_string());
            prop_assert_eq!(shared.sum, Some(expected));
            prop_assert_eq!(
                CachingSolver::solve_part(&mut shared, 2).unwrap(),
                (expected * 2).to_string()
            );
        }
    }
}
