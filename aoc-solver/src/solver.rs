//! Parser and solver traits implemented by every puzzle

use crate::error::{ParseError, SolveError};

/// Turns raw puzzle input into the data every part works on.
///
/// # Example
///
/// ```
/// use aoc_solver::{AocParser, ParseError};
///
/// struct SonarSweep;
///
/// impl AocParser for SonarSweep {
///     type SharedData<'a> = Vec<u32>;
///
///     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         input
///             .lines()
///             .map(|l| l.trim().parse().map_err(|_| ParseError::InvalidFormat(l.to_string())))
///             .collect()
///     }
/// }
///
/// assert_eq!(SonarSweep::parse("199\n200\n208").unwrap(), vec![199, 200, 208]);
/// ```
pub trait AocParser {
    /// Parsed input shared by all parts of one solver instance.
    ///
    /// Owned types work for most puzzles; the lifetime allows borrowing
    /// straight from the input when no transformation is needed.
    type SharedData<'a>;

    /// Parse the input string into the shared data structure.
    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError>;
}

/// Solves part `N` of a puzzle.
///
/// Implementing one of these per part and deriving [`AocSolver`](crate::AocSolver)
/// gives a [`Solver`] whose part selector is checked at compile time.
///
/// # Example
///
/// ```
/// use aoc_solver::{AocParser, PartSolver, ParseError, SolveError};
///
/// struct SonarSweep;
///
/// impl AocParser for SonarSweep {
///     type SharedData<'a> = Vec<u32>;
///
///     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         input
///             .lines()
///             .map(|l| l.parse().map_err(|_| ParseError::InvalidFormat(l.to_string())))
///             .collect()
///     }
/// }
///
/// impl PartSolver<1> for SonarSweep {
///     fn solve(depths: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
///         Ok(depths.windows(2).filter(|w| w[1] > w[0]).count().to_string())
///     }
/// }
///
/// let mut depths = SonarSweep::parse("199\n200\n208\n210\n200").unwrap();
/// assert_eq!(<SonarSweep as PartSolver<1>>::solve(&mut depths).unwrap(), "3");
/// ```
pub trait PartSolver<const N: u8>: AocParser {
    /// Solve this part of the puzzle, returning the answer as text.
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError>;
}

/// A complete puzzle solver: parsing plus a selector over its parts.
///
/// # Example
///
/// ```
/// use aoc_solver::{AocParser, ParseError, SolveError, Solver};
///
/// struct Dive;
///
/// impl AocParser for Dive {
///     type SharedData<'a> = Vec<(&'a str, i64)>;
///
///     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         input
///             .lines()
///             .map(|line| {
///                 let (dir, n) = line
///                     .split_once(' ')
///                     .ok_or_else(|| ParseError::MissingData(line.to_string()))?;
///                 let n = n.parse().map_err(|_| ParseError::InvalidFormat(line.to_string()))?;
///                 Ok((dir, n))
///             })
///             .collect()
///     }
/// }
///
/// impl Solver for Dive {
///     const PARTS: u8 = 1;
///
///     fn solve_part(moves: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError> {
///         match part {
///             1 => {
///                 let (mut x, mut depth) = (0, 0);
///                 for &(dir, n) in moves.iter() {
///                     match dir {
///                         "forward" => x += n,
///                         "down" => depth += n,
///                         _ => depth -= n,
///                     }
///                 }
///                 Ok((x * depth).to_string())
///             }
///             _ => Err(SolveError::PartNotImplemented(part)),
///         }
///     }
/// }
///
/// let mut moves = Dive::parse("forward 5\ndown 5\nforward 8\nup 3\ndown 8\nforward 2").unwrap();
/// assert_eq!(Dive::solve_part(&mut moves, 1).unwrap(), "150");
/// ```
pub trait Solver: AocParser {
    /// Number of parts this solver implements
    const PARTS: u8;

    /// Solve a specific part of the problem
    ///
    /// # Returns
    /// * `Ok(String)` - The answer for this part
    /// * `Err(SolveError::PartNotImplemented)` - The part is not implemented
    /// * `Err(SolveError::SolveFailed)` - The puzzle logic failed
    fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError>;
}

/// Range-checked access to [`Solver::solve_part`].
pub trait SolverExt: Solver {
    /// Rejects part 0 and parts above `PARTS` before dispatching.
    fn solve_part_checked_range(
        shared: &mut Self::SharedData<'_>,
        part: u8,
    ) -> Result<String, SolveError> {
        if (1..=Self::PARTS).contains(&part) {
            Self::solve_part(shared, part)
        } else {
            Err(SolveError::PartOutOfRange(part))
        }
    }
}

impl<T: Solver + ?Sized> SolverExt for T {}
