use crate::azure::window_start;
use crate::error::{ReportError, Result};
use crate::report::OutputFormat;
use chrono::Utc;
use secrecy::SecretString;
use serde::Deserialize;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_DAYS: u32 = 30;
pub const DEFAULT_OUTPUT: &str = "azure_devops_commits_report.pdf";

#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryConfig {
    pub url: String,
    pub token: String,
}

/// The JSON configuration file. Every filter is optional; command-line flags take precedence.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub repositories: Vec<RepositoryConfig>,
    pub days: Option<u32>,
    pub author: Option<String>,
    pub no_branches: Option<bool>,
    pub output: Option<PathBuf>,
}

impl ConfigFile {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ReportError::config(path, "file not found")
            } else {
                ReportError::config(path, e.to_string())
            }
        })?;
        Self::parse(&raw).map_err(|e| ReportError::config(path, format!("invalid JSON: {e}")))
    }

    pub fn parse(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }
}

/// One repository to report on, with the credential used only for its requests.
pub struct Repository {
    pub url: String,
    pub token: SecretString,
}

impl From<RepositoryConfig> for Repository {
    fn from(config: RepositoryConfig) -> Self {
        Self {
            url: config.url,
            token: SecretString::new(config.token),
        }
    }
}

impl std::fmt::Debug for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository")
            .field("url", &self.url)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

/// Fully resolved run settings.
#[derive(Debug)]
pub struct Settings {
    pub repositories: Vec<Repository>,
    pub days: u32,
    pub author: Option<String>,
    pub skip_branches: bool,
    pub output: PathBuf,
    pub format: OutputFormat,
    pub timeout: Duration,
    pub api_base: String,
}

fn normalize_author(author: Option<String>) -> Option<String> {
    author
        .map(|a| a.trim().to_string())
        .filter(|a| !a.is_empty())
}

/// Values the command line may supply on top of the configuration file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub days: Option<u32>,
    pub author: Option<String>,
    pub no_branches: bool,
    pub output: Option<PathBuf>,
}

impl Settings {
    pub fn resolve(
        file: ConfigFile,
        overrides: Overrides,
        format: OutputFormat,
        timeout: Duration,
        api_base: String,
    ) -> Result<Self> {
        let repositories: Vec<Repository> =
            file.repositories.into_iter().map(Repository::from).collect();
        if repositories.is_empty() {
            return Err(ReportError::config("<repositories>", "no repositories configured"));
        }

        let days = overrides.days.or(file.days).unwrap_or(DEFAULT_DAYS);
        window_start(Utc::now(), days)?;

        Ok(Self {
            repositories,
            days,
            author: normalize_author(overrides.author.or(file.author)),
            skip_branches: overrides.no_branches || file.no_branches.unwrap_or(false),
            output: overrides
                .output
                .or(file.output)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT)),
            format,
            timeout,
            api_base,
        })
    }
}

fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W, message: &str) -> Result<Option<String>> {
    write!(output, "{message}")?;
    output.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Ask for repositories on `input` until `done` (or end of input), then, when `ask_author` is
/// set, for an optional author filter.
pub fn collect_interactive<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    ask_author: bool,
) -> Result<ConfigFile> {
    writeln!(output, "No config file provided. Please enter repository details manually.")?;
    let mut config = ConfigFile::default();

    loop {
        let Some(url) = prompt(
            input,
            output,
            "\nEnter Azure DevOps repository URL (or 'done' to finish): ",
        )?
        else {
            break;
        };
        if url.eq_ignore_ascii_case("done") {
            break;
        }
        if url.is_empty() {
            continue;
        }
        let token = prompt(input, output, "Enter Personal Access Token for this repository: ")?
            .unwrap_or_default();
        config.repositories.push(RepositoryConfig { url, token });
    }

    if config.repositories.is_empty() {
        return Err(ReportError::config("<stdin>", "no repositories configured"));
    }

    if ask_author {
        config.author = prompt(
            input,
            output,
            "\nEnter your email or name to filter commits (leave empty for all commits): ",
        )?
        .filter(|a| !a.is_empty());
    }

    Ok(config)
}
