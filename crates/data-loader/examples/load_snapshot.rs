//! Example: load a marketplace snapshot and print what it contains
//!
//! Run with: cargo run --package data-loader --example load_snapshot -- data/sample

use data_loader::DataIndex;
use std::path::PathBuf;
use std::time::Instant;

fn main() -> anyhow::Result<()> {
    let data_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data/sample"));

    println!("Loading snapshot from {}...\n", data_dir.display());

    let start = Instant::now();
    let index = DataIndex::load_from_dir(&data_dir)?;
    let elapsed = start.elapsed();

    let (candidates, jobs, entries, pools) = index.counts();

    println!("=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Candidates: {}", candidates);
    println!("Jobs: {}", jobs);
    println!("Pipeline entries: {}", entries);
    println!("Talent pools: {}", pools);

    let hidden = index.candidates().iter().filter(|c| !c.profile_visible).count();
    println!("Hidden profiles: {}", hidden);
    Ok(())
}
