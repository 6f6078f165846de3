mod client;
mod client_builder;
mod models;
mod url;

pub use client::Client;
pub use client_builder::ClientBuilder;
pub use models::{GitCommitRef, GitRef, GitUserDate, ListResponse};
pub use url::parse_repo_url;

use crate::error::{ReportError, Result};
use crate::model::RepoRef;
use chrono::{DateTime, Duration, Utc};

/// Upper bound on commits returned by one listing request. The API drops anything past it.
pub const MAX_COMMITS: usize = 1000;

/// Time window and author hint for one commit listing request.
#[derive(Debug, Clone, PartialEq)]
pub struct CommitQuery {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
    pub author: Option<String>,
    pub top: usize,
}

impl CommitQuery {
    /// `[now - days, now]`, evaluated against the wall clock at call time.
    pub fn lookback(days: u32, author: Option<&str>) -> Result<Self> {
        let to = Utc::now();
        Ok(Self::window(window_start(to, days)?, to, author))
    }

    pub fn window(from: DateTime<Utc>, to: DateTime<Utc>, author: Option<&str>) -> Self {
        Self {
            from,
            to,
            author: author
                .map(str::trim)
                .filter(|a| !a.is_empty())
                .map(str::to_string),
            top: MAX_COMMITS,
        }
    }
}

/// `to` minus `days` whole days. Fails when the result is before the earliest representable
/// date.
pub fn window_start(to: DateTime<Utc>, days: u32) -> Result<DateTime<Utc>> {
    to.checked_sub_signed(Duration::days(i64::from(days)))
        .ok_or(ReportError::DaysOutOfRange(days))
}

/// The subset of the Azure DevOps Git REST API the report needs.
pub trait AzureApi {
    /// Commits authored inside the query window, newest first, capped at `query.top`.
    fn list_commits(&self, repo: &RepoRef, query: &CommitQuery) -> Result<Vec<GitCommitRef>>;

    /// Names of all branch heads, without the `refs/heads/` prefix.
    fn list_branches(&self, repo: &RepoRef) -> Result<Vec<String>>;

    /// Whether the commit can be found when the repository is viewed at the tip of `branch`.
    fn commit_on_branch(&self, repo: &RepoRef, commit_id: &str, branch: &str) -> Result<bool>;
}
