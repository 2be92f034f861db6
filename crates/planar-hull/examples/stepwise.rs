//! Drive both algorithms one step at a time, the way a visualizer would.
//!
//! Usage:
//!   cargo run -p planar-hull --example stepwise -- [seed]
//!
//! Prints the sub-problem trace of the divide-and-conquer run and the vertex
//! commits of the gift-wrap run, then both final hulls.

use planar_hull::prelude::*;

fn main() {
    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(2025);
    let pts = match sample_points(SampleCfg::default(), ReplayToken::new(seed)) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("sampling failed: {e}");
            return;
        }
    };
    println!("{} points (seed {seed})", pts.len());

    let mut dc = DcStepper::new(&pts);
    let mut tick = 0;
    loop {
        let more = dc.step();
        tick += 1;
        let a = dc.active();
        println!(
            "dc tick {tick}: {} chain, split {:?}, {} edges, {} pending",
            a.chain(),
            a.current_split().map(|p| p.x),
            a.edges().len(),
            a.pending()
        );
        if !more {
            break;
        }
    }
    match dc.finish().to_shape() {
        Ok(shape) => println!("divide and conquer: {} vertices", shape.vertices().len()),
        Err(e) => eprintln!("divide and conquer: {e}"),
    }

    let mut gw = GiftWrapper::new(&pts);
    let mut committed = 1;
    while gw.step() {
        if gw.hull().len() > committed {
            committed = gw.hull().len();
            println!(
                "gift wrap: vertex {committed} at {:?}, {} candidates left, {} retired",
                gw.current(),
                gw.remaining().len(),
                gw.pruned().len()
            );
        }
    }
    println!("gift wrap: {} vertices", gw.finish().vertices().len());
}
