use adocommits::cli::Cli;
use anyhow::{Context, Result};
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

fn configure_tracing(cli: &Cli) -> Result<()> {
    let level_filter = if cli.quiet {
        LevelFilter::ERROR
    } else {
        match cli.verbose {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    };

    let env_filter = EnvFilter::builder()
        .with_default_directive(level_filter.into())
        .with_env_var("ADOCOMMITS_LOG")
        .from_env()
        .context("Failed to parse filters from ADOCOMMITS_LOG environment variable")?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
        .context("Failed to install tracing subscriber")?;

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    configure_tracing(&cli)?;
    cli.execute()
}
