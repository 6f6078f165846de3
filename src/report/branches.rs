use crate::azure::AzureApi;
use crate::model::{RepoRef, SKIPPED_BRANCH, UNRESOLVED_BRANCH};
use std::cell::RefCell;
use tracing::{debug, warn};

/// Branches probed first, in this order, when they exist in the repository.
pub const PREFERRED_BRANCHES: [&str; 5] = ["main", "master", "develop", "dev", "feature"];

/// How many leading entries of the branch listing are considered after the preferred names.
pub const EXTRA_CANDIDATES: usize = 3;

/// Probing stops once this many branches have confirmed the commit.
pub const MAX_CONFIRMED: usize = 2;

/// Answers "which branches contain this commit" for one repository.
pub trait BranchResolver {
    /// A non-empty, ordered list of branch names.
    fn resolve_branches(&self, commit_id: &str) -> Vec<String>;
}

// -------------------------------------------------------------------------------------------------
// FixedResolver
// -------------------------------------------------------------------------------------------------
/// Assigns the same branch to every commit without calling the API.
#[derive(Debug, Clone)]
pub struct FixedResolver {
    branch: String,
}

impl FixedResolver {
    pub fn new(branch: impl Into<String>) -> Self {
        Self { branch: branch.into() }
    }

    pub fn skipped() -> Self {
        Self::new(SKIPPED_BRANCH)
    }
}

impl BranchResolver for FixedResolver {
    fn resolve_branches(&self, _commit_id: &str) -> Vec<String> {
        vec![self.branch.clone()]
    }
}

// -------------------------------------------------------------------------------------------------
// ProbeResolver
// -------------------------------------------------------------------------------------------------
/// Heuristic containment check: look the commit up at the tip of a short list of likely
/// branches and keep the ones where it is found.
///
/// At most `PREFERRED_BRANCHES.len() + EXTRA_CANDIDATES` probes are made per commit, and fewer
/// once [`MAX_CONFIRMED`] branches have matched. This is an approximation of ancestry, not an
/// exact answer; every failure degrades to [`UNRESOLVED_BRANCH`].
pub struct ProbeResolver<'a> {
    api: &'a dyn AzureApi,
    repo: RepoRef,
    branches: RefCell<Option<Vec<String>>>,
}

impl<'a> ProbeResolver<'a> {
    pub fn new(api: &'a dyn AzureApi, repo: RepoRef) -> Self {
        Self {
            api,
            repo,
            branches: RefCell::new(None),
        }
    }

    /// The repository's branch list, fetched on first use. A failed listing is retried on the
    /// next call.
    fn branches(&self) -> Option<Vec<String>> {
        if let Some(branches) = self.branches.borrow().as_ref() {
            return Some(branches.clone());
        }

        match self.api.list_branches(&self.repo) {
            Ok(branches) => {
                debug!("{} has {} branches", self.repo.name, branches.len());
                *self.branches.borrow_mut() = Some(branches.clone());
                Some(branches)
            }
            Err(e) => {
                warn!("Could not list branches of {}: {e}", self.repo.name);
                None
            }
        }
    }
}

/// Preferred names that exist, in preference order, then whichever of the first
/// [`EXTRA_CANDIDATES`] listed branches are not already included.
pub fn candidate_branches(all_branches: &[String]) -> Vec<String> {
    let mut candidates: Vec<String> = PREFERRED_BRANCHES
        .iter()
        .filter(|name| all_branches.iter().any(|b| b == *name))
        .map(|name| name.to_string())
        .collect();

    for branch in all_branches.iter().take(EXTRA_CANDIDATES) {
        if !candidates.contains(branch) {
            candidates.push(branch.clone());
        }
    }
    candidates
}

impl BranchResolver for ProbeResolver<'_> {
    fn resolve_branches(&self, commit_id: &str) -> Vec<String> {
        let Some(all_branches) = self.branches() else {
            return vec![UNRESOLVED_BRANCH.to_string()];
        };

        let mut found = Vec::new();
        for branch in candidate_branches(&all_branches) {
            match self.api.commit_on_branch(&self.repo, commit_id, &branch) {
                Ok(true) => found.push(branch),
                Ok(false) => {}
                Err(e) => debug!("Probe of {branch} for {commit_id} failed: {e}"),
            }
            if found.len() >= MAX_CONFIRMED {
                break;
            }
        }

        if found.is_empty() {
            vec![UNRESOLVED_BRANCH.to_string()]
        } else {
            found
        }
    }
}
