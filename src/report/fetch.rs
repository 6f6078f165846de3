use super::branches::BranchResolver;
use crate::azure::{AzureApi, CommitQuery, GitCommitRef};
use crate::error::Result;
use crate::model::{Commit, RepoFetch, RepoRef};
use crate::util::parse_timestamp;
use indicatif::ProgressBar;
use tracing::{info, warn};

/// Case-insensitive substring match of `filter` against the author email or name.
pub fn matches_author(commit: &GitCommitRef, filter: &str) -> bool {
    let filter = filter.to_lowercase();
    let email = commit.author.email.to_lowercase();
    let name = commit.author.name.to_lowercase();
    email.contains(&filter) || name.contains(&filter)
}

pub fn fetch_commits(
    api: &dyn AzureApi,
    resolver: &dyn BranchResolver,
    repo: &RepoRef,
    query: &CommitQuery,
) -> Result<RepoFetch> {
    fetch_commits_with_progress(api, resolver, repo, query, None)
}

/// List the commits of `repo` inside the query window and resolve their branches.
///
/// The author hint is sent to the server and applied again locally, since the server-side
/// match is not guaranteed.
pub fn fetch_commits_with_progress(
    api: &dyn AzureApi,
    resolver: &dyn BranchResolver,
    repo: &RepoRef,
    query: &CommitQuery,
    progress: Option<&ProgressBar>,
) -> Result<RepoFetch> {
    info!("Fetching commits from {}...", repo.name);
    let listed = api.list_commits(repo, query)?;

    let truncated = listed.len() >= query.top;
    if truncated {
        warn!(
            "{} returned {} commits, the per-request cap; older commits in the window may be missing",
            repo.name,
            listed.len()
        );
    }

    let retained: Vec<GitCommitRef> = match &query.author {
        Some(author) => listed
            .into_iter()
            .filter(|c| matches_author(c, author))
            .collect(),
        None => listed,
    };

    if let Some(pb) = progress {
        pb.set_length(retained.len() as u64);
        pb.set_position(0);
    }

    let mut commits = Vec::with_capacity(retained.len());
    for raw in retained {
        let timestamp = parse_timestamp(&raw.author.date)?;

        let branches = resolver.resolve_branches(&raw.commit_id);
        commits.push(Commit {
            id: raw.commit_id,
            author_name: raw.author.name,
            author_email: raw.author.email,
            timestamp,
            message: raw.comment,
            repository: repo.name.clone(),
            organization: repo.organization.clone(),
            project: repo.project.clone(),
            branches,
        });

        if let Some(pb) = progress {
            pb.inc(1);
        }
    }

    info!("Found {} commits in {}", commits.len(), repo.name);
    Ok(RepoFetch { commits, truncated })
}

/// Like [`fetch_commits_with_progress`], but a failure anywhere in the repository is logged
/// and yields an empty result. Commits gathered before the failure are dropped.
pub fn fetch_or_empty(
    api: &dyn AzureApi,
    resolver: &dyn BranchResolver,
    repo: &RepoRef,
    query: &CommitQuery,
    progress: Option<&ProgressBar>,
) -> RepoFetch {
    match fetch_commits_with_progress(api, resolver, repo, query, progress) {
        Ok(fetched) => fetched,
        Err(e) => {
            warn!("Error fetching commits from {}: {e}", repo.name);
            RepoFetch::default()
        }
    }
}
