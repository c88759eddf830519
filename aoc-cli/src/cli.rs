//! CLI argument parsing using clap

use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;

/// Parallelization level for solver execution
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum ParallelizeBy {
    /// No parallelization; execute all solvers sequentially in order
    Sequential,
    /// Parallelize across years; days and parts run sequentially within each year
    Year,
    /// Parallelize across year/day combinations; parts run sequentially (default)
    #[default]
    Day,
    /// Parallelize across all year/day/part combinations
    Part,
}

/// Advent of Code solver runner
#[derive(Parser, Debug)]
#[command(name = "aoc", about = "Run Advent of Code solvers", version)]
pub struct Args {
    /// Year to run (runs all years if omitted)
    #[arg(short, long)]
    pub year: Option<u16>,

    /// Day to run (runs all days if omitted)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=25))]
    pub day: Option<u8>,

    /// Part to run (runs all parts if omitted)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=2))]
    pub part: Option<u8>,

    /// Tags to filter solvers (comma-separated, all must match)
    #[arg(short, long, value_delimiter = ',')]
    pub tags: Vec<String>,

    /// Directory holding puzzle inputs as day_<N>.txt or <year>/day_<N>.txt
    #[arg(short, long, default_value = "data")]
    pub input_dir: PathBuf,

    /// Number of threads for parallel execution
    #[arg(long)]
    pub threads: Option<usize>,

    /// Parallelization level: sequential, year, day, or part
    #[arg(long, value_enum, default_value = "day")]
    pub parallelize_by: ParallelizeBy,

    /// Quiet mode - only output answers
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["aoc"]).unwrap();
        assert_eq!(args.year, None);
        assert_eq!(args.day, None);
        assert_eq!(args.part, None);
        assert!(args.tags.is_empty());
        assert_eq!(args.input_dir, PathBuf::from("data"));
        assert_eq!(args.parallelize_by, ParallelizeBy::Day);
        assert!(!args.quiet);
        assert_eq!(args.verbose, 0);
    }

    #[test]
    fn test_day_and_part() {
        let args = Args::try_parse_from(["aoc", "-d", "4", "-p", "2", "-q", "-vv"]).unwrap();
        assert_eq!(args.day, Some(4));
        assert_eq!(args.part, Some(2));
        assert!(args.quiet);
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn test_tags_and_parallelism() {
        let args = Args::try_parse_from([
            "aoc",
            "--tags",
            "grid,2021",
            "--parallelize-by",
            "sequential",
            "--threads",
            "3",
        ])
        .unwrap();
        assert_eq!(args.tags, vec!["grid", "2021"]);
        assert_eq!(args.parallelize_by, ParallelizeBy::Sequential);
        assert_eq!(args.threads, Some(3));
    }

    #[test]
    fn test_rejects_out_of_range_day_and_part() {
        assert!(Args::try_parse_from(["aoc", "--day", "26"]).is_err());
        assert!(Args::try_parse_from(["aoc", "--day", "0"]).is_err());
        assert!(Args::try_parse_from(["aoc", "--part", "3"]).is_err());
    }
}
