use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use fallback_core::Options;

/// Create proxy directories by `exports` field in `package.json` for older environments
#[derive(Parser, Debug)]
#[command(name = "create-fallback", version)]
struct Args {
    /// Add created directories to .gitignore
    #[arg(short = 'g', long)]
    gitignore: bool,

    /// Write names of created directories to `files` section in `package.json`
    #[arg(short = 'f', long)]
    files: bool,

    /// Run as if started in DIR
    #[arg(short = 'C', long, value_name = "DIR", default_value = ".")]
    cwd: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // stdout carries the report only
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let options = Options {
        gitignore: args.gitignore,
        files: args.files,
    };

    let Some(report) = fallback_core::run(&args.cwd, options)? else {
        return Ok(());
    };

    print!("{}", report);
    Ok(())
}
