use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const SCHEMA_VERSION: u32 = 1;

/// Branch recorded for every commit when branch detection is skipped.
pub const SKIPPED_BRANCH: &str = "main";

/// Branch recorded when no probed branch confirmed containment.
pub const UNRESOLVED_BRANCH: &str = "main/master";

/// Organization, project and repository name of one Azure DevOps repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepoRef {
    pub organization: String,
    pub project: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Commit {
    pub id: String,
    pub author_name: String,
    pub author_email: String,
    pub timestamp: DateTime<FixedOffset>,
    pub message: String,
    pub repository: String,
    pub organization: String,
    pub project: String,
    pub branches: Vec<String>,
}

impl Commit {
    pub fn short_id(&self) -> String {
        self.id.chars().take(8).collect()
    }

    /// Calendar date of the author timestamp, in the offset the timestamp was recorded with.
    pub fn date_key(&self) -> String {
        self.timestamp.format("%Y-%m-%d").to_string()
    }
}

/// date -> repository -> branch -> commits
pub type GroupedReport = BTreeMap<String, BTreeMap<String, BTreeMap<String, Vec<Commit>>>>;

/// Commits fetched from a single repository.
#[derive(Debug, Clone, Default)]
pub struct RepoFetch {
    pub commits: Vec<Commit>,
    /// The listing hit the per-request cap, so older commits in the window may be missing.
    pub truncated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total_commits: usize,
    pub first_date: Option<String>,
    pub last_date: Option<String>,
    pub repositories: usize,
}

impl ReportSummary {
    pub fn date_range(&self) -> String {
        match (&self.first_date, &self.last_date) {
            (Some(first), Some(last)) => format!("{first} to {last}"),
            _ => "No commits".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitEntry {
    pub time: String,
    pub message: String,
    pub author_name: String,
    pub author_email: String,
    pub short_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BranchSection {
    pub name: String,
    pub commits: Vec<CommitEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoSection {
    pub name: String,
    pub branches: Vec<BranchSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateSection {
    pub date: String,
    pub repositories: Vec<RepoSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub author_filter: Option<String>,
    pub truncated_repositories: Vec<String>,
    pub summary: ReportSummary,
    pub dates: Vec<DateSection>,
}
