//! Parsed solver instances and the type-erased [`DynSolver`] interface

use crate::error::{ParseError, SolveError};
use crate::solver::{Solver, SolverExt};
use chrono::{DateTime, TimeDelta, Utc};

/// Answer for one part together with when it was computed
#[derive(Debug, Clone)]
pub struct SolveResult {
    /// The answer string
    pub answer: String,
    /// When solving started (UTC)
    pub solve_start: DateTime<Utc>,
    /// When solving completed (UTC)
    pub solve_end: DateTime<Utc>,
}

impl SolveResult {
    /// Get the solve duration as TimeDelta
    pub fn duration(&self) -> TimeDelta {
        self.solve_end - self.solve_start
    }
}

/// One parsed puzzle input bound to solver `S`.
///
/// Parsing happens once in [`SolverInstance::new`]; every part then works on
/// the same shared data.
pub struct SolverInstance<'a, S: Solver> {
    year: u16,
    day: u8,
    shared: S::SharedData<'a>,
    parse_start: DateTime<Utc>,
    parse_end: DateTime<Utc>,
}

impl<'a, S: Solver> SolverInstance<'a, S> {
    /// Parse `input` for the given puzzle, recording parse timing.
    pub fn new(year: u16, day: u8, input: &'a str) -> Result<Self, ParseError> {
        let parse_start = Utc::now();
        let shared = S::parse(input)?;
        let parse_end = Utc::now();

        Ok(Self {
            year,
            day,
            shared,
            parse_start,
            parse_end,
        })
    }

    /// Shared data produced by the parser
    pub fn shared(&self) -> &S::SharedData<'a> {
        &self.shared
    }
}

/// Type-erased interface over any [`SolverInstance`].
///
/// The registry hands these out so callers can drive solvers for different
/// days without knowing their concrete types.
///
/// ```no_run
/// use aoc_solver::DynSolver;
///
/// fn run_both(mut solver: Box<dyn DynSolver + '_>) -> Result<(), aoc_solver::SolveError> {
///     for part in 1..=solver.parts() {
///         let result = solver.solve(part)?;
///         println!("Part {}: {} (took {})", part, result.answer, result.duration());
///     }
///     println!("Parse took {}", solver.parse_duration());
///     Ok(())
/// }
/// ```
pub trait DynSolver {
    /// Solve the specified part, recording timing
    fn solve(&mut self, part: u8) -> Result<SolveResult, SolveError>;

    /// Get the parse start time (UTC)
    fn parse_start(&self) -> DateTime<Utc>;

    /// Get the parse end time (UTC)
    fn parse_end(&self) -> DateTime<Utc>;

    /// Get the year for this solver
    fn year(&self) -> u16;

    /// Get the day for this solver
    fn day(&self) -> u8;

    /// Get the number of parts this solver supports
    fn parts(&self) -> u8;

    /// Convenience: get parse duration as TimeDelta
    fn parse_duration(&self) -> TimeDelta {
        self.parse_end() - self.parse_start()
    }
}

impl<S: SolverExt> DynSolver for SolverInstance<'_, S> {
    fn solve(&mut self, part: u8) -> Result<SolveResult, SolveError> {
        let solve_start = Utc::now();
        let answer = S::solve_part_checked_range(&mut self.shared, part)?;
        let solve_end = Utc::now();

        Ok(SolveResult {
            answer,
            solve_start,
            solve_end,
        })
    }

    fn parse_start(&self) -> DateTime<Utc> {
        self.parse_start
    }

    fn parse_end(&self) -> DateTime<Utc> {
        self.parse_end
    }

    fn year(&self) -> u16 {
        self.year
    }

    fn day(&self) -> u8 {
        self.day
    }

    fn parts(&self) -> u8 {
        S::PARTS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::AocParser;

    struct Doubler;

    impl AocParser for Doubler {
        type SharedData<'a> = i64;

        fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
            input
                .trim()
                .parse()
                .map_err(|_| ParseError::InvalidFormat(input.to_string()))
        }
    }

    impl Solver for Doubler {
        const PARTS: u8 = 1;

        fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError> {
            match part {
                1 => Ok((*shared * 2).to_string()),
                _ => Err(SolveError::PartNotImplemented(part)),
            }
        }
    }

    #[test]
    fn test_instance_parses_once_and_solves() {
        let mut instance = SolverInstance::<Doubler>::new(2021, 1, "21").unwrap();
        assert_eq!(*instance.shared(), 21);
        assert_eq!(instance.year(), 2021);
        assert_eq!(instance.day(), 1);
        assert_eq!(instance.parts(), 1);
        assert!(instance.parse_duration() >= TimeDelta::zero());

        let result = instance.solve(1).unwrap();
        assert_eq!(result.answer, "42");
        assert!(result.duration() >= TimeDelta::zero());
    }

    #[test]
    fn test_instance_rejects_part_beyond_parts() {
        let mut instance = SolverInstance::<Doubler>::new(2021, 1, "21").unwrap();
        assert!(matches!(instance.solve(2), Err(SolveError::PartOutOfRange(2))));
    }

    #[test]
    fn test_instance_parse_failure() {
        let err = SolverInstance::<Doubler>::new(2021, 1, "twenty").err();
        assert_eq!(err, Some(ParseError::InvalidFormat("twenty".into())));
    }
}
