//! CLI entry point for the seeded shortest-path segmentation tool

use clap::Parser;
use seedpath::io::cli::{Cli, SegmentationRunner};

fn main() -> seedpath::Result<()> {
    let cli = Cli::parse();
    let mut runner = SegmentationRunner::new(cli);
    runner.run()
}
