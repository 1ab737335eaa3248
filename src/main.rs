use anyhow::{Context, Result};
use clap::Parser;
use nodereset::process::reset::{
    reset_column, DEFAULT_COLUMN, DEFAULT_INPUT, DEFAULT_OUTPUT, DEFAULT_VALUE,
};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

/// Force one CSV column to a constant value.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// CSV file to read
    #[arg(long, default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Where to write the result
    #[arg(long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Column whose values are replaced
    #[arg(long, default_value = DEFAULT_COLUMN)]
    column: String,

    /// Value written into every row of `column`
    #[arg(long, default_value = DEFAULT_VALUE)]
    value: String,
}

fn main() -> Result<()> {
    // stdout carries only the confirmation line; logs go to stderr
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let args = Args::parse();
    info!(?args, "startup");

    let summary = reset_column(&args.input, &args.output, &args.column, &args.value)
        .with_context(|| {
            format!(
                "resetting column `{}` from {} into {}",
                args.column,
                args.input.display(),
                args.output.display()
            )
        })?;

    info!(rows = summary.rows, columns = summary.columns, "all done");
    println!("Success! Check out '{}' file.", summary.output.display());
    Ok(())
}
