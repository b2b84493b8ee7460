//! Lay out a seeded random graph on a background thread and print the
//! recentred positions as `node,x,y` rows.
//!
//! ```text
//! RUST_LOG=edamame_engine=debug cargo run -p edamame-engine --example headless -- 500 0.02 400
//! ```
//!
//! Arguments (all optional): node count, edge probability, iterations.

use std::thread;
use std::time::Duration;

use edamame_engine::{BackgroundLayout, ForceVariant, LayoutConfig, LayoutSession};
use edamame_graph::random_graph;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing_subscriber::EnvFilter;

fn arg<T: std::str::FromStr>(index: usize, default: T) -> T {
    std::env::args()
        .nth(index)
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let nodes: u32 = arg(1, 300);
    let edge_probability: f64 = arg(2, 0.02);
    let iterations: u64 = arg(3, 200);

    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let mut graph = random_graph(nodes, edge_probability, &mut rng);
    graph.scatter(&mut rng, 50.0);

    let config = LayoutConfig {
        max_iterations: Some(iterations),
        force_variant: ForceVariant::Binned { bin_size: 25.0 },
        ..LayoutConfig::default()
    };
    let layout = BackgroundLayout::spawn(LayoutSession::new(graph, config)?)?;

    let mut last = 0;
    while !layout.is_done() {
        let done = layout.progress();
        if done != last && done % 50 == 0 {
            tracing::info!(step = done, of = iterations, "progress");
        }
        last = done;
        thread::sleep(Duration::from_millis(5));
    }

    let session = layout.join();
    println!("node,x,y");
    for (name, p, _radius) in session.snapshot().recentered() {
        println!("{name},{:.4},{:.4}", p.x, p.y);
    }
    Ok(())
}
