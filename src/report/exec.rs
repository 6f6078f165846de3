use super::branches::{FixedResolver, ProbeResolver};
use super::document::{build_document, ReportMeta};
use super::fetch::fetch_or_empty;
use super::output::write_report;
use super::aggregate::group_commits;
use crate::azure::{parse_repo_url, Client, CommitQuery};
use crate::config::Settings;
use crate::error::ReportError;
use anyhow::Context;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::warn;

fn spinner(repo: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg} {pos}/{len}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(format!("Fetching commits from {repo}..."));
    pb
}

/// Fetch every configured repository in turn, then group and write the report.
pub fn exec(settings: Settings) -> anyhow::Result<()> {
    let query = CommitQuery::lookback(settings.days, settings.author.as_deref())?;
    let mut meta = ReportMeta::new(settings.author.clone());
    let mut all_commits = Vec::new();

    for repository in settings.repositories {
        let repo = match parse_repo_url(&repository.url) {
            Ok(repo) => repo,
            Err(e) => {
                warn!("Error processing repository {}: {e}", repository.url);
                continue;
            }
        };

        let client = match Client::builder()
            .base_url(&settings.api_base)
            .token(repository.token)
            .timeout(settings.timeout)
            .build()
        {
            Ok(client) => client,
            Err(e) => {
                warn!("Error processing repository {}: {e}", repository.url);
                continue;
            }
        };

        let pb = spinner(&repo.name);
        let fetched = if settings.skip_branches {
            fetch_or_empty(&client, &FixedResolver::skipped(), &repo, &query, Some(&pb))
        } else {
            let resolver = ProbeResolver::new(&client, repo.clone());
            fetch_or_empty(&client, &resolver, &repo, &query, Some(&pb))
        };
        pb.finish_and_clear();

        if fetched.truncated {
            meta.truncated_repositories.push(repo.name.clone());
        }
        all_commits.extend(fetched.commits);
    }

    if all_commits.is_empty() {
        return Err(ReportError::NoData.into());
    }

    let grouped = group_commits(&all_commits);
    let document = build_document(&grouped, &meta);
    write_report(&grouped, &document, &meta, settings.format, &settings.output)
        .with_context(|| format!("Failed to write report to {}", settings.output.display()))?;

    println!("\n{}", style("Report generated successfully!").green().bold());
    println!("Total commits processed: {}", style(all_commits.len()).cyan());
    println!("Output file: {}", style(settings.output.display()).dim());

    Ok(())
}
