//! Batch runner: drive each search strategy step by step over a grid and
//! print what it explored.
//!
//! Run: cargo run --bin pathfind -- [SCENARIO.json] [--random 20x12] [-s astar]
//! Set `RUST_LOG=debug` (or `trace`) to see the engine's own log lines.

use std::path::PathBuf;

use clap::Parser;
use gridpath_core::Point;
use gridpath_demos::{Scenario, random_grid, render_map, run_strategy};
use gridpath_search::{Graph, SearchConfig, StrategyKind};
use rand::SeedableRng;
use rand::rngs::StdRng;

#[derive(Parser)]
#[command(version, about = "Compare Dijkstra, greedy and A* on an obstacle grid")]
struct Cli {
    #[arg(help = "JSON scenario file ({\"grid\": [[...]], \"config\": {...}})")]
    scenario: Option<PathBuf>,
    #[arg(
        long,
        value_name = "WxH",
        value_parser = parse_size,
        conflicts_with = "scenario",
        help = "Generate a random grid of this size instead"
    )]
    random: Option<(i32, i32)>,
    #[arg(long, default_value_t = 0.3, help = "Obstacle probability for --random")]
    density: f64,
    #[arg(long, help = "RNG seed for --random")]
    seed: Option<u64>,
    #[arg(
        short,
        long = "strategy",
        value_name = "STRATEGY",
        help = "Strategy to run (repeatable; default: all three)"
    )]
    strategies: Vec<StrategyKind>,
    #[arg(long, value_parser = parse_point, help = "Start cell as x,y")]
    start: Option<Point>,
    #[arg(long, value_parser = parse_point, help = "Goal cell as x,y")]
    goal: Option<Point>,
    #[arg(long, help = "Maximum number of steps per strategy")]
    budget: Option<usize>,
    #[arg(long, help = "Print the map after every step")]
    watch: bool,
    #[arg(long, help = "Print the final cost table")]
    costs: bool,
}

fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected x,y, got \u{201c}{s}\u{201d}"))?;
    let x = x.trim().parse().map_err(|e| format!("bad x: {e}"))?;
    let y = y.trim().parse().map_err(|e| format!("bad y: {e}"))?;
    Ok(Point::new(x, y))
}

fn parse_size(s: &str) -> Result<(i32, i32), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WxH, got \u{201c}{s}\u{201d}"))?;
    let w: i32 = w.trim().parse().map_err(|e| format!("bad width: {e}"))?;
    let h: i32 = h.trim().parse().map_err(|e| format!("bad height: {e}"))?;
    if w <= 0 || h <= 0 {
        return Err("size must be positive".to_string());
    }
    Ok((w, h))
}

fn load_scenario(cli: &Cli) -> Result<Scenario, Box<dyn std::error::Error>> {
    if let Some(path) = &cli.scenario {
        let text = std::fs::read_to_string(path)?;
        let mut scenario = Scenario::from_json(&text)?;
        override_endpoints(&mut scenario.config, cli);
        return Ok(scenario);
    }
    if let Some((w, h)) = cli.random {
        let start = cli.start.unwrap_or(Point::ZERO);
        let goal = cli.goal.unwrap_or(Point::new(w - 1, h - 1));
        let mut rng = match cli.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let grid = random_grid(&mut rng, w, h, cli.density, &[start, goal])?;
        return Ok(Scenario {
            grid,
            config: SearchConfig::new(StrategyKind::Dijkstra, start, Some(goal)),
        });
    }
    let mut scenario = Scenario::sample();
    override_endpoints(&mut scenario.config, cli);
    Ok(scenario)
}

fn override_endpoints(config: &mut SearchConfig, cli: &Cli) {
    if let Some(start) = cli.start {
        config.start = start;
    }
    if cli.goal.is_some() {
        config.goal = cli.goal;
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let mut scenario = load_scenario(&cli)?;
    if cli.budget.is_some() {
        scenario.config.step_budget = cli.budget;
    }
    let graph = Graph::build(&scenario.grid)?;
    log::info!(
        "grid {}x{}, {} free cells",
        graph.width(),
        graph.height(),
        scenario.grid.count_free()
    );

    let strategies = if cli.strategies.is_empty() {
        StrategyKind::ALL.to_vec()
    } else {
        cli.strategies.clone()
    };

    let mut summaries = Vec::with_capacity(strategies.len());
    for kind in strategies {
        let config = SearchConfig {
            strategy: kind,
            ..scenario.config
        };
        if kind.needs_goal() && config.goal.is_none() {
            eprintln!("skipping {kind}: no goal given");
            continue;
        }

        println!("== {kind}");
        let report = run_strategy(&graph, &config, |search| {
            if cli.watch {
                println!("step {}", search.steps());
                println!("{}", render_map(&graph, search, &[]));
            }
        })?;
        print!("{}", report.map);
        println!("{}", report.summary());
        println!();
        if cli.costs {
            println!("{}", report.status);
            println!();
        }
        summaries.push(report.summary());
    }

    for s in summaries {
        println!("{s}");
    }
    Ok(())
}
