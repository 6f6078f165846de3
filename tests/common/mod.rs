#![allow(dead_code)]

use adocommits::azure::{AzureApi, CommitQuery, GitCommitRef, GitUserDate};
use adocommits::error::{ReportError, Result};
use adocommits::model::{Commit, RepoRef};
use adocommits::util::parse_timestamp;
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};

pub fn repo_ref(name: &str) -> RepoRef {
    RepoRef {
        organization: "contoso".to_string(),
        project: "platform".to_string(),
        name: name.to_string(),
    }
}

pub fn raw_commit(id: &str, name: &str, email: &str, date: &str, comment: &str) -> GitCommitRef {
    GitCommitRef {
        commit_id: id.to_string(),
        author: GitUserDate {
            name: name.to_string(),
            email: email.to_string(),
            date: date.to_string(),
        },
        comment: comment.to_string(),
    }
}

pub fn commit(id: &str, repo: &str, date: &str, branches: &[&str]) -> Commit {
    Commit {
        id: id.to_string(),
        author_name: "Alice".to_string(),
        author_email: "alice@example.com".to_string(),
        timestamp: parse_timestamp(date).unwrap(),
        message: format!("commit {id}"),
        repository: repo.to_string(),
        organization: "contoso".to_string(),
        project: "platform".to_string(),
        branches: branches.iter().map(|b| b.to_string()).collect(),
    }
}

fn api_failure() -> ReportError {
    ReportError::Api {
        status: 500,
        url: "https://fake.invalid".to_string(),
    }
}

/// In-memory stand-in for the Azure DevOps API that records the calls made against it.
#[derive(Default)]
pub struct FakeApi {
    pub commits: Vec<GitCommitRef>,
    pub fail_listing: bool,
    /// `None` makes the branch listing fail.
    pub branches: Option<Vec<String>>,
    /// commit id -> branches that contain it
    pub containing: HashMap<String, Vec<String>>,
    /// Branches whose probe returns an error.
    pub failing_probes: HashSet<String>,
    pub probes: RefCell<Vec<(String, String)>>,
    pub branch_listings: Cell<usize>,
    pub last_query: RefCell<Option<CommitQuery>>,
}

impl FakeApi {
    pub fn with_branches(branches: &[&str]) -> Self {
        Self {
            branches: Some(branches.iter().map(|b| b.to_string()).collect()),
            ..Self::default()
        }
    }

    pub fn contains(mut self, commit_id: &str, branches: &[&str]) -> Self {
        self.containing.insert(
            commit_id.to_string(),
            branches.iter().map(|b| b.to_string()).collect(),
        );
        self
    }

    pub fn probed_branches(&self) -> Vec<String> {
        self.probes.borrow().iter().map(|(_, b)| b.clone()).collect()
    }
}

impl AzureApi for FakeApi {
    fn list_commits(&self, _repo: &RepoRef, query: &CommitQuery) -> Result<Vec<GitCommitRef>> {
        *self.last_query.borrow_mut() = Some(query.clone());
        if self.fail_listing {
            return Err(api_failure());
        }
        Ok(self.commits.iter().take(query.top).cloned().collect())
    }

    fn list_branches(&self, _repo: &RepoRef) -> Result<Vec<String>> {
        self.branch_listings.set(self.branch_listings.get() + 1);
        self.branches.clone().ok_or_else(api_failure)
    }

    fn commit_on_branch(&self, _repo: &RepoRef, commit_id: &str, branch: &str) -> Result<bool> {
        self.probes
            .borrow_mut()
            .push((commit_id.to_string(), branch.to_string()));
        if self.failing_probes.contains(branch) {
            return Err(api_failure());
        }
        Ok(self
            .containing
            .get(commit_id)
            .map(|branches| branches.iter().any(|b| b == branch))
            .unwrap_or(false))
    }
}
