//! Tuning example for the UCT optimizer
//!
//! Tunes a parameter `k` over [0, 1000] against a noisy objective whose win
//! probability peaks at k = 250. Pass a program (and its leading arguments) to
//! evaluate against an external process instead:
//!
//! ```bash
//! cargo run --example tune_quadratic
//! cargo run --example tune_quadratic -- ./my_evaluator --games 10
//! ```

use std::env;

use interval_uct::{
    CommandEvaluator, Evaluator, FnEvaluator, OptimizerConfig, Outcome, ParameterRange,
    UctOptimizer,
};
use rand::Rng;

fn win_probability(k: f64) -> f64 {
    if k <= 500.0 {
        -k * (k - 500.0) / 62_500.0
    } else {
        -(k - 500.0) * (k - 1000.0) / 125_000.0
    }
}

fn run<E: Evaluator>(evaluator: E) {
    let config = OptimizerConfig::default()
        .with_iterations(1000)
        .with_exploration_constant(0.3)
        .with_branching_factor(10);

    let mut optimizer = UctOptimizer::new(config, evaluator);

    match optimizer.tune_params(&[ParameterRange::new("k", 0.0, 1000.0)]) {
        Ok(best) => {
            println!("Best interval for {}: [{:.5}, {:.5}]", best.name, best.low, best.high);
            println!();
            println!("{}", optimizer.get_statistics().summary());
        }
        Err(err) => {
            eprintln!("Tuning failed: {}", err);
            std::process::exit(1);
        }
    }

    if env::var_os("SHOW_TREE").is_some() {
        println!();
        print!("{}", optimizer.visualize_tree());
    }
    if env::var_os("SHOW_SAMPLES").is_some() {
        println!();
        print!("{}", optimizer.render_samples());
    }
}

fn main() {
    // Initialize logging
    env_logger::init();

    println!("UCT Interval Tuning Example");
    println!("===========================");
    println!();

    let mut args = env::args().skip(1);

    match args.next() {
        Some(program) => run(CommandEvaluator::new(program).args(args)),
        None => {
            let mut rng = rand::thread_rng();
            run(FnEvaluator::new(move |_: &str, k: f64| {
                if rng.gen::<f64>() < win_probability(k) {
                    Outcome::Win
                } else {
                    Outcome::Loss
                }
            }))
        }
    }
}
