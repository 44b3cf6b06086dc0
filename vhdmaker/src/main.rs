use anyhow::Context;
use clap::Parser;
use vhd::{FooterOptions, Geometry};

mod cli;
mod tracing_init;

fn main() -> anyhow::Result<()> {
    let args = cli::Args::parse();
    tracing_init::enable_tracing()?;

    let geometry =
        Geometry::new(args.cylinders, args.heads, args.sectors).context("invalid disk geometry")?;
    let options = FooterOptions {
        unique_id: args.identity().into_bytes(),
        timestamp: args.timestamp,
    };

    let footer = vhd::stamp_path(&args.file, geometry, &options)
        .with_context(|| format!("failed to stamp {}", args.file.display()))?;

    if !args.quiet {
        print!("{footer}");
    }

    Ok(())
}
