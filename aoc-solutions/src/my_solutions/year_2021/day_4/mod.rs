//! 2021 day 4: Giant Squid
//!
//! Part 1 scores the first board to win, part 2 the last one.

mod bingo;
mod parse;


pub use bingo::{Bingo, BingoError, Board, Cell, Number, Position, Win, WinPolicy};
pub use parse::parse_input;

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2021, day = 4, tags = ["2021", "grid", "simulation"])]
pub struct Day4;

impl AocParser for Day4 {
    type SharedData<'a> = Bingo;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_input(input).map_err(|e| ParseError::InvalidFormat(format!("{:#}", e)))
    }
}

impl PartSolver<1> for Day4 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        play(shared, WinPolicy::First)
    }
}

impl PartSolver<2> for Day4 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        play(shared, WinPolicy::Last)
    }
}

/// Each part plays its own copy so the parsed boards stay unmarked.
fn play(game: &Bingo, policy: WinPolicy) -> Result<String, SolveError> {
    game.clone()
        .play(policy)
        .map(|win| win.score.to_string())
        .map_err(SolveError::failed)
}
