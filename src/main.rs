//! Ripple Pareto CLI - Solve a problem from JSON configuration.

#[cfg(feature = "dhat-heap")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

use std::path::PathBuf;
use std::time::Instant;

use ripple_pareto::{NetworkConfig, ParetoSolution, ProblemConfig, SearchConfig, solve};

fn main() {
    #[cfg(feature = "dhat-heap")]
    let _profiler = dhat::Profiler::new_heap();

    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <problem.json>", args[0]);
        eprintln!("       {} --random <nodes> [seed]", args[0]);
        eprintln!("       {} --example", args[0]);
        eprintln!();
        eprintln!("Find all Pareto-optimal paths with the ripple-spreading algorithm.");
        eprintln!();
        eprintln!("Arguments:");
        eprintln!("  problem.json  Network, source, destination and search settings");
        eprintln!("  --random      Solve a generated network from node 0 to node N-1");
        eprintln!("  --example     Print an example problem file");
        std::process::exit(1);
    }

    if args[1] == "--example" {
        print_example_problem();
        return;
    }

    let problem = if args[1] == "--random" {
        let nodes: usize = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(20);
        let seed: u64 = args.get(3).and_then(|s| s.parse().ok()).unwrap_or(42);
        let nodes = nodes.max(2);
        ProblemConfig {
            network: NetworkConfig::random(nodes, 0.2, 2, 100, seed),
            source: 0,
            destination: nodes - 1,
            search: SearchConfig::default(),
        }
    } else {
        let path = PathBuf::from(&args[1]);
        ProblemConfig::load(&path).unwrap_or_else(|e| {
            eprintln!("Error loading problem: {}", e);
            std::process::exit(1);
        })
    };

    println!("Ripple Pareto Search");
    println!("====================");
    println!(
        "Network: {} nodes, {} edges",
        problem.network.node_count(),
        problem.network.edge_count()
    );
    println!("Route: {} -> {}", problem.source, problem.destination);
    println!();

    let start = Instant::now();
    let solution = solve(
        &problem.network,
        problem.source,
        problem.destination,
        problem.search.clone(),
    )
    .unwrap_or_else(|e| {
        eprintln!("Search failed: {}", e);
        std::process::exit(1);
    });
    let elapsed = start.elapsed();

    print_solution(&solution);
    println!();
    println!("Time: {:.3}s", elapsed.as_secs_f32());
}

fn print_solution(solution: &ParetoSolution) {
    if solution.paths.is_empty() {
        println!("Destination is unreachable.");
    } else {
        println!("Pareto-optimal paths ({}):", solution.paths.len());
        for (i, p) in solution.paths.iter().enumerate() {
            println!("  {:>3}. {:?} cost {:?}", i + 1, p.path, p.objective);
        }
    }

    let stats = &solution.stats;
    println!();
    println!("Statistics:");
    println!(
        "  Reference dimension: {} (speed {})",
        stats.reference_dimension, stats.speed
    );
    println!("  Ticks: {}", stats.ticks);
    println!("  Ripples created: {}", stats.ripples_created);
    println!("  Peak active: {}", stats.peak_active);
    println!(
        "  Crossings: {} emitted, {} pruned",
        stats.candidates_emitted, stats.candidates_pruned
    );
}

fn print_example_problem() {
    let problem = ProblemConfig::example();
    match serde_json::to_string_pretty(&problem) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing example: {}", e);
            std::process::exit(1);
        }
    }
}
