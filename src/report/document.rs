use super::aggregate::summarize;
use crate::model::{
    BranchSection, Commit, CommitEntry, DateSection, GroupedReport, RepoSection, ReportSummary,
};
use crate::util::truncate_message;
use chrono::{DateTime, Local, Utc};

pub const REPORT_TITLE: &str = "Azure DevOps Commits Report";

/// Context printed above the summary.
#[derive(Debug, Clone)]
pub struct ReportMeta {
    pub generated_at: DateTime<Utc>,
    pub author_filter: Option<String>,
    pub truncated_repositories: Vec<String>,
}

impl ReportMeta {
    pub fn new(author_filter: Option<String>) -> Self {
        Self {
            generated_at: Utc::now(),
            author_filter,
            truncated_repositories: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Title(String),
    Paragraph(String),
    Summary(Vec<(String, String)>),
    Date(String),
    Repository(String),
    Branch { name: String, count: usize },
    Commit(CommitLine),
    Gap,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CommitLine {
    pub headline: String,
    pub author: String,
    pub commit_id: String,
}

impl From<&CommitEntry> for CommitLine {
    fn from(entry: &CommitEntry) -> Self {
        Self {
            headline: format!("{} - {}", entry.time, entry.message),
            author: format!("Author: {} <{}>", entry.author_name, entry.author_email),
            commit_id: format!("Commit ID: {}", entry.short_id),
        }
    }
}

/// Layout-independent report content, in reading order.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub title: String,
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn commit_lines(&self) -> impl Iterator<Item = &CommitLine> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Commit(line) => Some(line),
            _ => None,
        })
    }

    pub fn date_headings(&self) -> impl Iterator<Item = &str> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Date(date) => Some(date.as_str()),
            _ => None,
        })
    }
}

pub fn commit_entry(commit: &Commit) -> CommitEntry {
    CommitEntry {
        time: commit.timestamp.format("%H:%M:%S").to_string(),
        message: truncate_message(&commit.message),
        author_name: commit.author_name.clone(),
        author_email: commit.author_email.clone(),
        short_id: commit.short_id(),
    }
}

/// Walk the grouping in report order: dates newest first, repositories and branches
/// alphabetically, commits newest first.
pub fn sorted_sections(report: &GroupedReport) -> Vec<DateSection> {
    report
        .iter()
        .rev()
        .map(|(date, repos)| DateSection {
            date: date.clone(),
            repositories: repos
                .iter()
                .map(|(repo, branches)| RepoSection {
                    name: repo.clone(),
                    branches: branches
                        .iter()
                        .map(|(branch, commits)| {
                            let mut sorted: Vec<&Commit> = commits.iter().collect();
                            sorted.sort_by(|a, b| {
                                b.timestamp.cmp(&a.timestamp).then_with(|| a.id.cmp(&b.id))
                            });
                            BranchSection {
                                name: branch.clone(),
                                commits: sorted.into_iter().map(commit_entry).collect(),
                            }
                        })
                        .collect(),
                })
                .collect(),
        })
        .collect()
}

pub fn summary_rows(summary: &ReportSummary) -> Vec<(String, String)> {
    vec![
        ("Total Commits".to_string(), summary.total_commits.to_string()),
        ("Date Range".to_string(), summary.date_range()),
        ("Repositories".to_string(), summary.repositories.to_string()),
    ]
}

pub fn build_document(report: &GroupedReport, meta: &ReportMeta) -> Document {
    let summary = summarize(report);
    let mut blocks = vec![
        Block::Title(REPORT_TITLE.to_string()),
        Block::Paragraph(format!(
            "Generated on {}",
            meta.generated_at
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S")
        )),
    ];
    if let Some(author) = &meta.author_filter {
        blocks.push(Block::Paragraph(format!("Filtered by author: {author}")));
    }
    for repo in &meta.truncated_repositories {
        blocks.push(Block::Paragraph(format!(
            "Note: {repo} reached the {}-commit listing cap; older commits may be missing",
            crate::azure::MAX_COMMITS
        )));
    }
    blocks.push(Block::Gap);
    blocks.push(Block::Summary(summary_rows(&summary)));
    blocks.push(Block::Gap);

    for section in sorted_sections(report) {
        blocks.push(Block::Date(section.date));
        for repo in section.repositories {
            blocks.push(Block::Repository(repo.name));
            for branch in repo.branches {
                blocks.push(Block::Branch {
                    name: branch.name,
                    count: branch.commits.len(),
                });
                blocks.extend(branch.commits.iter().map(|c| Block::Commit(c.into())));
            }
            blocks.push(Block::Gap);
        }
        blocks.push(Block::Gap);
    }

    Document {
        title: REPORT_TITLE.to_string(),
        blocks,
    }
}
