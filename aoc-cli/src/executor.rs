//! Parallel executor for running solvers

use crate::cli::ParallelizeBy;
use crate::config::Config;
use crate::error::{ArcExecutorError, ExecutorError};
use crate::input::InputStore;
use aoc_solver::{DynSolver, SolverError, SolverRegistry};
use chrono::TimeDelta;
use itertools::Itertools;
use rayon::prelude::*;
use std::ops::RangeInclusive;
use std::sync::mpsc::Sender;
use tracing::{debug, warn};

/// Outcome of one part
pub struct SolverResult {
    pub year: u16,
    pub day: u8,
    pub part: u8,
    pub answer: Result<String, String>,
    /// None when the input never made it through the parser
    pub parse_duration: Option<TimeDelta>,
    pub solve_duration: TimeDelta,
}

impl SolverResult {
    fn failed(year: u16, day: u8, part: u8, error: String) -> Self {
        Self {
            year,
            day,
            part,
            answer: Err(error),
            parse_duration: None,
            solve_duration: TimeDelta::zero(),
        }
    }
}

/// A solver to execute and the parts to run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    pub year: u16,
    pub day: u8,
    pub parts: RangeInclusive<u8>,
}

/// Runs solvers from a registry against inputs from an [`InputStore`]
pub struct Executor {
    settings: ExecutorSettings,
    thread_pool: rayon::ThreadPool,
}

/// Everything worker threads need, shared by reference
struct ExecutorSettings {
    registry: SolverRegistry,
    inputs: InputStore,
    parallelize_by: ParallelizeBy,
    year_filter: Option<u16>,
    day_filter: Option<u8>,
    part_filter: Option<u8>,
}

impl Executor {
    pub fn new(registry: SolverRegistry, config: &Config) -> Result<Self, ExecutorError> {
        let thread_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.thread_count)
            .build()
            .map_err(|e| ExecutorError::ThreadPool(e.to_string()))?;

        Ok(Self {
            settings: ExecutorSettings {
                registry,
                inputs: InputStore::new(config.input_dir.clone()),
                parallelize_by: config.parallelize_by,
                year_filter: config.year_filter,
                day_filter: config.day_filter,
                part_filter: config.part_filter,
            },
            thread_pool,
        })
    }

    pub fn inputs(&self) -> &InputStore {
        &self.settings.inputs
    }

    /// Registered solvers that pass the year/day/part filters, in (year, day) order
    pub fn collect_work_items(&self) -> Vec<WorkItem> {
        let cfg = &self.settings;
        cfg.registry
            .storage()
            .iter_info()
            .filter(|info| cfg.year_filter.is_none_or(|y| info.year == y))
            .filter(|info| cfg.day_filter.is_none_or(|d| info.day == d))
            .map(|info| WorkItem {
                year: info.year,
                day: info.day,
                parts: filter_parts(cfg.part_filter, info.parts),
            })
            .filter(|w| !w.parts.is_empty())
            .collect()
    }

    /// Execute all work items, sending one result per part to `tx`
    pub fn execute(&self, tx: Sender<SolverResult>) -> Result<(), ArcExecutorError> {
        let work_items = self.collect_work_items();
        let settings = &self.settings;

        match settings.parallelize_by {
            ParallelizeBy::Sequential => {
                let mut collected: Option<ArcExecutorError> = None;
                for work in &work_items {
                    if let Err(e) = run_work_item(work, &tx, settings) {
                        collected = Some(ArcExecutorError::combine_opt(collected, e));
                    }
                }
                collected.map_or(Ok(()), Err)
            }
            ParallelizeBy::Year => {
                let by_year: Vec<Vec<WorkItem>> = work_items
                    .into_iter()
                    .chunk_by(|w| w.year)
                    .into_iter()
                    .map(|(_, group)| group.collect())
                    .collect();

                self.thread_pool.install(|| {
                    by_year
                        .into_par_iter()
                        .filter_map(|items| {
                            items.iter().fold(None, |err, work| {
                                match run_work_item(work, &tx, settings) {
                                    Ok(()) => err,
                                    Err(e) => Some(ArcExecutorError::combine_opt(err, e)),
                                }
                            })
                        })
                        .reduce_with(ArcExecutorError::combine)
                        .map_or(Ok(()), Err)
                })
            }
            ParallelizeBy::Day | ParallelizeBy::Part => self.thread_pool.install(|| {
                work_items
                    .par_iter()
                    .filter_map(|work| run_work_item(work, &tx, settings).err())
                    .reduce_with(ArcExecutorError::combine)
                    .map_or(Ok(()), Err)
            }),
        }
    }
}

/// Restrict a solver's parts to the requested one, if any
#[allow(clippy::reversed_empty_ranges)]
fn filter_parts(part_filter: Option<u8>, max_parts: u8) -> RangeInclusive<u8> {
    match part_filter {
        Some(p) if p <= max_parts => p..=p,
        Some(_) => 1..=0,
        None => 1..=max_parts,
    }
}

fn run_work_item(
    work: &WorkItem,
    tx: &Sender<SolverResult>,
    settings: &ExecutorSettings,
) -> Result<(), ArcExecutorError> {
    let input = match settings.inputs.read(work.year, work.day) {
        Ok(input) => input,
        Err(e) => {
            warn!(year = work.year, day = work.day, "{}", e);
            let message = e.to_string();
            for part in work.parts.clone() {
                send(
                    tx,
                    SolverResult::failed(work.year, work.day, part, message.clone()),
                )?;
            }
            return Ok(());
        }
    };

    if matches!(settings.parallelize_by, ParallelizeBy::Part) {
        run_parts_parallel(work, &input, tx, &settings.registry)
    } else {
        run_parts_sequential(work, &input, tx, &settings.registry)
    }
}

/// One solver instance, parts in order
fn run_parts_sequential(
    work: &WorkItem,
    input: &str,
    tx: &Sender<SolverResult>,
    registry: &SolverRegistry,
) -> Result<(), ArcExecutorError> {
    match registry.create_solver(work.year, work.day, input) {
        Ok(mut solver) => {
            for part in work.parts.clone() {
                send(tx, solve_part(&mut *solver, part))?;
            }
            Ok(())
        }
        Err(e) => send_creation_failure(work, e, tx),
    }
}

/// One solver instance per part, results re-ordered by part before sending
fn run_parts_parallel(
    work: &WorkItem,
    input: &str,
    tx: &Sender<SolverResult>,
    registry: &SolverRegistry,
) -> Result<(), ArcExecutorError> {
    let mut results: Vec<SolverResult> = work
        .parts
        .clone()
        .into_par_iter()
        .map(|part| match registry.create_solver(work.year, work.day, input) {
            Ok(mut solver) => solve_part(&mut *solver, part),
            Err(e) => SolverResult::failed(work.year, work.day, part, e.to_string()),
        })
        .collect();
    results.sort_by_key(|r| r.part);

    for result in results {
        send(tx, result)?;
    }
    Ok(())
}

fn send_creation_failure(
    work: &WorkItem,
    error: SolverError,
    tx: &Sender<SolverResult>,
) -> Result<(), ArcExecutorError> {
    warn!(year = work.year, day = work.day, "{}", error);
    let message = error.to_string();
    for part in work.parts.clone() {
        send(tx, SolverResult::failed(work.year, work.day, part, message.clone()))?;
    }
    Ok(())
}

fn send(tx: &Sender<SolverResult>, result: SolverResult) -> Result<(), ArcExecutorError> {
    tx.send(result)
        .map_err(|_| ExecutorError::ChannelSend.into())
}

fn solve_part(solver: &mut dyn DynSolver, part: u8) -> SolverResult {
    let (year, day) = (solver.year(), solver.day());
    let answer = solver.solve(part);
    debug!(year, day, part, ok = answer.is_ok(), "part finished");

    match answer {
        Ok(result) => SolverResult {
            year,
            day,
            part,
            solve_duration: result.duration(),
            answer: Ok(result.answer),
            parse_duration: Some(solver.parse_duration()),
        },
        Err(e) => SolverResult {
            year,
            day,
            part,
            answer: Err(SolverError::from(e).to_string()),
            parse_duration: Some(solver.parse_duration()),
            solve_duration: TimeDelta::zero(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Args;
    use aoc_solver::SolverRegistryBuilder;
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    const EXAMPLE: &str = "\
7,4,9,5,11,17,23,2,0,14,21,24,10,16,13,6,15,25,12,22,18,20,8,19,3,26,1

22 13 17 11  0
 8  2 23  4 24
21  9 14 16  7
 6 10  3 18  5
 1 12 20 15 19

 3 15  0  2 22
 9 18 13 17  5
19  8  7 25 23
20 11 10 24  4
14 21 16 12  6

14 21 17 24  4
10 16 15  9 19
18  8 23 26 20
22 11 13  6  5
 2  0 12  3  7
";

    fn executor(dir: &TempDir, extra: &[&str]) -> Executor {
        let input_dir = dir.path().to_str().unwrap();
        let argv = ["aoc", "-y", "2021", "-d", "4", "-i", input_dir]
            .into_iter()
            .chain(extra.iter().copied());
        let config = Config::from_args(Args::try_parse_from(argv).unwrap()).unwrap();
        let registry = SolverRegistryBuilder::new()
            .register_all_plugins()
            .unwrap()
            .build();
        Executor::new(registry, &config).unwrap()
    }

    fn run(executor: &Executor) -> Vec<SolverResult> {
        let (tx, rx) = std::sync::mpsc::channel();
        executor.execute(tx).unwrap();
        let mut results: Vec<_> = rx.into_iter().collect();
        results.sort_by_key(|r| (r.year, r.day, r.part));
        results
    }

    #[test]
    fn test_filter_parts() {
        assert_eq!(filter_parts(None, 2), 1..=2);
        assert_eq!(filter_parts(Some(2), 2), 2..=2);
        assert!(filter_parts(Some(2), 1).is_empty());
    }

    #[test]
    fn test_collect_work_items_for_day_4() {
        let dir = TempDir::new().unwrap();
        let items = executor(&dir, &["-p", "2"]).collect_work_items();
        assert_eq!(
            items,
            vec![WorkItem {
                year: 2021,
                day: 4,
                parts: 2..=2
            }]
        );
    }

    #[test]
    fn test_runs_day_4_in_every_mode() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("day_4.txt"), EXAMPLE).unwrap();

        for mode in ["sequential", "year", "day", "part"] {
            let results = run(&executor(&dir, &["--parallelize-by", mode]));
            let answers: Vec<_> = results.iter().map(|r| r.answer.clone()).collect();
            assert_eq!(
                answers,
                vec![Ok("4512".to_string()), Ok("1924".to_string())],
                "mode {}",
                mode
            );
            assert!(results.iter().all(|r| r.parse_duration.is_some()));
        }
    }

    #[test]
    fn test_missing_input_reports_each_part() {
        let dir = TempDir::new().unwrap();
        let results = run(&executor(&dir, &[]));
        assert_eq!(results.len(), 2);
        for result in results {
            let error = result.answer.unwrap_err();
            assert!(error.contains("No input for 2021/day 4"), "{}", error);
            assert!(result.parse_duration.is_none());
        }
    }

    #[test]
    fn test_bad_input_reports_parse_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("day_4.txt"), "1,2\n\n1 2\n3").unwrap();
        let results = run(&executor(&dir, &["-p", "1"]));
        assert_eq!(results.len(), 1);
        let error = results[0].answer.as_ref().unwrap_err();
        assert!(error.contains("not square"), "{}", error);
    }
}
