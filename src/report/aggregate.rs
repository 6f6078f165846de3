use crate::model::{Commit, GroupedReport, ReportSummary, UNRESOLVED_BRANCH};
use std::collections::HashSet;

/// Group commits by date, repository and branch.
///
/// A commit listed on several branches is added to each of their lists. Nothing is
/// deduplicated. Keys are ordered maps, so the grouping does not depend on input order.
pub fn group_commits(commits: &[Commit]) -> GroupedReport {
    let mut grouped = GroupedReport::new();

    for commit in commits {
        let by_repo = grouped.entry(commit.date_key()).or_default();
        let by_branch = by_repo.entry(commit.repository.clone()).or_default();

        if commit.branches.is_empty() {
            by_branch
                .entry(UNRESOLVED_BRANCH.to_string())
                .or_default()
                .push(commit.clone());
            continue;
        }

        for branch in &commit.branches {
            by_branch.entry(branch.clone()).or_default().push(commit.clone());
        }
    }

    grouped
}

/// Totals over a grouped report. Commits count once per branch they appear under.
pub fn summarize(report: &GroupedReport) -> ReportSummary {
    let total_commits = report
        .values()
        .flat_map(|repos| repos.values())
        .flat_map(|branches| branches.values())
        .map(Vec::len)
        .sum();

    let repositories: HashSet<&String> = report.values().flat_map(|repos| repos.keys()).collect();

    ReportSummary {
        total_commits,
        first_date: report.keys().next().cloned(),
        last_date: report.keys().next_back().cloned(),
        repositories: repositories.len(),
    }
}

