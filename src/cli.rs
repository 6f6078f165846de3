use crate::azure::ClientBuilder;
use crate::config::{collect_interactive, ConfigFile, Overrides, Settings};
use crate::report::OutputFormat;
use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "adocommits")]
#[command(about = "Generate a report of Azure DevOps commits grouped by date, repository, and branch")]
#[command(version)]
pub struct Cli {
    #[arg(long, help = "JSON config file with repositories and tokens")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Number of days back to fetch commits [default: 30]")]
    pub days: Option<u32>,

    #[arg(long, help = "Filter commits by author email or name")]
    pub author: Option<String>,

    #[arg(long, help = "Skip branch detection for faster processing")]
    pub no_branches: bool,

    #[arg(long, help = "Output filename [default: azure_devops_commits_report.pdf]")]
    pub output: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Pdf, help = "Report format")]
    pub format: OutputFormat,

    #[arg(
        long,
        value_parser = humantime::parse_duration,
        default_value = "30s",
        help = "Timeout for each API request (e.g. 30s, 1m)"
    )]
    pub timeout: Duration,

    #[arg(
        long,
        env = "ADOCOMMITS_API_BASE",
        default_value = ClientBuilder::DEFAULT_BASE_URL,
        help = "Base URL of the Azure DevOps REST API"
    )]
    pub api_base: String,

    #[arg(short, long, action = ArgAction::Count, help = "Enable verbose output (repeat for more)")]
    pub verbose: u8,

    #[arg(short, long, help = "Only print errors")]
    pub quiet: bool,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> Result<()> {
        let file = match &self.config {
            Some(path) => ConfigFile::load(path).context("Failed to load configuration")?,
            None => {
                let stdin = std::io::stdin();
                let mut input = stdin.lock();
                let mut output = std::io::stdout();
                collect_interactive(&mut input, &mut output, self.author.is_none())
                    .context("Failed to collect repositories")?
            }
        };

        let overrides = Overrides {
            days: self.days,
            author: self.author,
            no_branches: self.no_branches,
            output: self.output,
        };
        let settings = Settings::resolve(file, overrides, self.format, self.timeout, self.api_base)
            .context("Invalid configuration")?;

        crate::report::exec(settings)
    }
}
