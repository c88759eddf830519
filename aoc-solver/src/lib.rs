//! Advent of Code Solver Library
//!
//! A small, type-safe framework for running Advent of Code solutions. Each
//! puzzle parses its input once and answers any number of parts from the
//! parsed data.
//!
//! # Overview
//!
//! - [`AocParser`] turns input text into shared data
//! - [`PartSolver<N>`] answers part `N`; [`Solver`] selects a part at runtime
//! - [`SolverInstance`] / [`DynSolver`] wrap a parsed input with timing
//! - [`SolverRegistry`] maps (year, day) to a factory, replacing any kind of
//!   name-based lookup with an explicit table
//!
//! # Quick Example
//!
//! ```
//! use aoc_solver::{AocParser, AocSolver, ParseError, PartSolver, SolveError, SolverRegistryBuilder};
//! use aoc_solver::RegisterableSolver;
//!
//! #[derive(AocSolver)]
//! #[aoc_solver(max_parts = 2)]
//! struct SonarSweep;
//!
//! impl AocParser for SonarSweep {
//!     type SharedData<'a> = Vec<u32>;
//!
//!     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
//!         input
//!             .lines()
//!             .map(|l| l.parse().map_err(|_| ParseError::InvalidFormat(l.to_string())))
//!             .collect()
//!     }
//! }
//!
//! fn increases(depths: &[u32], gap: usize) -> String {
//!     depths.windows(gap + 1).filter(|w| w[gap] > w[0]).count().to_string()
//! }
//!
//! impl PartSolver<1> for SonarSweep {
//!     fn solve(depths: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
//!         Ok(increases(depths, 1))
//!     }
//! }
//!
//! impl PartSolver<2> for SonarSweep {
//!     fn solve(depths: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
//!         Ok(increases(depths, 3))
//!     }
//! }
//!
//! let registry = SonarSweep
//!     .register_with(SolverRegistryBuilder::new(), 2021, 1)
//!     .unwrap()
//!     .build();
//!
//! let input = "199\n200\n208\n210\n200\n207\n240\n269\n260\n263";
//! let mut solver = registry.create_solver(2021, 1, input).unwrap();
//! assert_eq!(solver.solve(1).unwrap().answer, "7");
//! assert_eq!(solver.solve(2).unwrap().answer, "5");
//! ```
//!
//! # Plugins
//!
//! `#[derive(AutoRegisterSolver)]` with `#[aoc(year = .., day = .., tags = [..])]`
//! submits a [`SolverPlugin`]; [`SolverRegistryBuilder::register_all_plugins`]
//! picks up every plugin linked into the binary.

mod error;
mod instance;
mod registry;
mod solver;

pub use error::{ParseError, RegistrationError, SolveError, SolverError};
pub use instance::{DynSolver, SolveResult, SolverInstance};
pub use registry::{
    FactoryInfo, RegisterableSolver, SolverFactory, SolverFactoryStorage, SolverPlugin,
    SolverRegistry, SolverRegistryBuilder, BASE_YEAR, CAPACITY, DAYS_PER_YEAR, MAX_YEARS,
};
pub use solver::{AocParser, PartSolver, Solver, SolverExt};

// Re-export inventory for use by the derive macro
pub use inventory;

pub use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
