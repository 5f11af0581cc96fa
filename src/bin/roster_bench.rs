//! Benchmark/demo harness for the ward roster solver.
//!
//! Run with: cargo run --release --bin roster_bench -- --size pilot

use anyhow::Result;
use clap::Parser;

use ward_roster_core::demo_data::{self, DemoSize};

#[derive(Parser, Debug)]
#[command(about = "Generates a demo roster request and solves it")]
struct Args {
    /// Demo data size: small or pilot.
    #[arg(long, default_value = "small")]
    size: String,

    /// Overrides the generated request's time limit, in seconds.
    #[arg(long)]
    time_limit_seconds: Option<u64>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let size: DemoSize = args
        .size
        .parse()
        .map_err(|_| anyhow::anyhow!("unknown demo size {:?}, expected one of {:?}", args.size, demo_data::list_demo_sizes()))?;

    let mut request = demo_data::generate(size);
    if let Some(limit) = args.time_limit_seconds {
        request.time_limit_seconds = limit;
    }

    tracing::info!(
        size = size.as_str(),
        num_employees = request.employees.len(),
        "solving demo roster"
    );

    match ward_roster_core::solve(request)? {
        Some(result) => {
            println!("status: {:?}", result.stats.status);
            println!("solve_time_ms: {}", result.stats.solve_time_ms);
            println!("objective_value: {}", result.stats.objective_value);
            println!("num_assignments: {}", result.stats.num_assignments);
        }
        None => println!("no feasible roster found within the time budget"),
    }

    Ok(())
}
