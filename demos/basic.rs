//! Basic Example - render an element tree in idle slices
//!
//! This example demonstrates the full render cycle:
//! - Building an element tree with `element!`
//! - Driving the build phase through an idle host, one slice per tick
//! - Presenting the committed tree on the terminal
//!
//! Run with: cargo run --example basic
//! Set RUST_LOG=spark_fiber=trace to watch every unit of work.

use std::error::Error;

use spark_fiber::{
    element, IdleHost, Phase, RendererConfig, Renderer, SliceStatus, TerminalSurface,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== spark-fiber Basic Example ===\n");

    let config = match std::env::args().nth(1) {
        Some(path) => RendererConfig::load(path)?,
        None => RendererConfig::default(),
    };

    let (surface, container) = TerminalSurface::with_container("root")?;
    let mut renderer = Renderer::with_config(surface, config.clone());
    let host = IdleHost::new(config.scheduler);

    let tree = element!("div", { "id" => "foo" },
        element!("a", {}, "bar"),
        element!("b"),
        element!("br"),
    );
    println!("Rendering {} elements", tree.count());
    renderer.render(tree, container);

    let mut ticks = 0;
    loop {
        let report = host.tick(&mut renderer)?;
        ticks += 1;
        println!("tick {ticks}: visited {} ({:?})", report.visited, report.status);
        if report.status != SliceStatus::Yielded {
            break;
        }
    }
    assert_eq!(renderer.phase(), Phase::Idle);

    println!();
    renderer.surface().present(container)?;

    let stats = renderer.stats();
    println!("\n{} units in {} slices, {} commit(s)", stats.units, stats.slices, stats.commits);
    Ok(())
}
