//! Example demonstrating derive-based solvers found through the plugin system
//!
//! Run with: cargo run --example plugin_system

use aoc_solver::{
    AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError,
    SolverRegistryBuilder,
};

/// Counts depth increases in a sonar sweep
#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2021, day = 1, tags = ["example", "window"])]
struct SonarSweep;

impl AocParser for SonarSweep {
    type SharedData<'a> = Vec<u32>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        input
            .lines()
            .map(|line| {
                line.trim().parse().map_err(|_| {
                    ParseError::InvalidFormat(format!("Expected integer, got: {}", line))
                })
            })
            .collect()
    }
}

impl PartSolver<1> for SonarSweep {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.windows(2).filter(|w| w[1] > w[0]).count().to_string())
    }
}

impl PartSolver<2> for SonarSweep {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        // Sums of adjacent windows share two terms
        Ok(shared.windows(4).filter(|w| w[3] > w[0]).count().to_string())
    }
}

fn main() {
    println!("=== Plugin System Example ===\n");

    let registry = SolverRegistryBuilder::new()
        .register_solver_plugins(|plugin| plugin.tags.contains(&"example"))
        .expect("Failed to register plugins")
        .build();

    for info in registry.storage().iter_info() {
        println!("Registered {}/day {} ({} parts)", info.year, info.day, info.parts);
    }

    let input = "199\n200\n208\n210\n200\n207\n240\n269\n260\n263";
    let mut solver = registry
        .create_solver(2021, 1, input)
        .expect("Failed to create solver");

    for part in 1..=solver.parts() {
        match solver.solve(part) {
            Ok(result) => println!("Part {}: {} ({})", part, result.answer, result.duration()),
            Err(e) => eprintln!("Part {}: {}", part, e),
        }
    }
}
