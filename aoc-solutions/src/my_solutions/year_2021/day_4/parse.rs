//! Text format: one comma-separated draw line, a blank line, then boards of
//! whitespace-separated numbers separated by blank lines.

use super::bingo::{Bingo, Board, Number};
use anyhow::{anyhow, bail, Context};
use std::path::Path;
use std::str::FromStr;

pub fn parse_input(input: &str) -> anyhow::Result<Bingo> {
    let mut lines = input.lines().enumerate();

    let (_, draw_line) = lines.next().ok_or_else(|| anyhow!("input is empty"))?;
    let draws = parse_draws(draw_line).context("(line 1) draw sequence")?;

    if let Some((idx, line)) = lines.next()
        && !line.trim().is_empty()
    {
        bail!(
            "(line {}) expected a blank line after the draw sequence, found {:?}",
            idx + 1,
            line
        );
    }

    let mut boards = Vec::new();
    let mut rows: Vec<Vec<Number>> = Vec::new();
    let mut first_line = 0;
    for (idx, line) in lines {
        if line.trim().is_empty() {
            if !rows.is_empty() {
                boards.push(finish_board(std::mem::take(&mut rows), first_line, boards.len())?);
            }
            continue;
        }
        if rows.is_empty() {
            first_line = idx + 1;
        }
        rows.push(parse_row(line).with_context(|| format!("(line {})", idx + 1))?);
    }
    if !rows.is_empty() {
        boards.push(finish_board(rows, first_line, boards.len())?);
    }

    Ok(Bingo::new(draws, boards)?)
}

impl Bingo {
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let input = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        parse_input(&input).with_context(|| format!("failed to parse {}", path.display()))
    }
}

impl FromStr for Bingo {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_input(s)
    }
}

fn parse_draws(line: &str) -> anyhow::Result<Vec<Number>> {
    if line.trim().is_empty() {
        bail!("no numbers drawn");
    }
    line.split(',')
        .map(|token| {
            let token = token.trim();
            token
                .parse()
                .with_context(|| format!("invalid number {:?}", token))
        })
        .collect()
}

fn parse_row(line: &str) -> anyhow::Result<Vec<Number>> {
    line.split_whitespace()
        .map(|token| {
            token
                .parse()
                .with_context(|| format!("invalid number {:?}", token))
        })
        .collect()
}

fn finish_board(rows: Vec<Vec<Number>>, first_line: usize, index: usize) -> anyhow::Result<Board> {
    Board::new(rows).with_context(|| format!("(line {}) board {}", first_line, index))
}
