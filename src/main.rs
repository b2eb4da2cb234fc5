//! Command-line compiler from a word list to a packed DAWG edge table.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use dawgc::dawg::{compile_file, CompileOptions};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dawgc")]
#[command(about = "Compile a word list into a minimized DAWG edge table", long_about = None)]
struct Cli {
    /// Word list, one word per line
    words: PathBuf,

    /// Where to write the edge table
    #[arg(short, long, default_value = "dawg.bin")]
    output: PathBuf,

    /// Treat lines starting with '#' as words instead of comments
    #[arg(long)]
    keep_comments: bool,

    /// Log every build stage
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let options = CompileOptions {
        skip_comments: !cli.keep_comments,
    };
    compile_file(&cli.words, &cli.output, &options).with_context(|| {
        format!(
            "failed to compile {} into {}",
            cli.words.display(),
            cli.output.display()
        )
    })?;
    Ok(())
}
