use chrono::SecondsFormat;
use reqwest::blocking::Response;
use reqwest::{header, Url};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::models::{GitCommitRef, GitRef, ListResponse};
use super::{AzureApi, ClientBuilder, CommitQuery};
use crate::error::{ReportError, Result};
use crate::model::RepoRef;

// -------------------------------------------------------------------------------------------------
// Client
// -------------------------------------------------------------------------------------------------
/// Blocking Azure DevOps REST client bound to a single credential.
pub struct Client {
    pub(super) base_url: Url,
    pub(super) inner: reqwest::blocking::Client,
    pub(super) token: Option<SecretString>,
}

const API_VERSION: (&str, &str) = ("api-version", "7.0");

impl Client {
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }
}

impl AzureApi for Client {
    fn list_commits(&self, repo: &RepoRef, query: &CommitQuery) -> Result<Vec<GitCommitRef>> {
        let mut params = vec![
            (
                "searchCriteria.fromDate",
                query.from.to_rfc3339_opts(SecondsFormat::Secs, true),
            ),
            (
                "searchCriteria.toDate",
                query.to.to_rfc3339_opts(SecondsFormat::Secs, true),
            ),
            ("$top", query.top.to_string()),
        ];
        if let Some(author) = &query.author {
            params.push(("searchCriteria.author", author.clone()));
        }

        let url = self.repository_url(repo, &["commits"])?;
        let body: ListResponse<GitCommitRef> = self.get_json(url, &params)?;
        Ok(body.value)
    }

    fn list_branches(&self, repo: &RepoRef) -> Result<Vec<String>> {
        let url = self.repository_url(repo, &["refs"])?;
        let body: ListResponse<GitRef> = self.get_json(url, &[("filter", "heads/".to_string())])?;
        Ok(body
            .value
            .iter()
            .filter_map(GitRef::branch_name)
            .map(str::to_string)
            .collect())
    }

    fn commit_on_branch(&self, repo: &RepoRef, commit_id: &str, branch: &str) -> Result<bool> {
        let url = self.repository_url(repo, &["commits", commit_id])?;
        let params = [
            ("searchCriteria.itemVersion.version", branch.to_string()),
            ("searchCriteria.itemVersion.versionType", "branch".to_string()),
        ];
        let response = self.get(url, &params)?;
        debug!("Probe {branch} for {commit_id}: {}", response.status());
        Ok(response.status().is_success())
    }
}

// private implementation
impl Client {
    /// `{base}/{organization}/{project}/_apis/git/repositories/{name}/{tail...}`
    fn repository_url(&self, repo: &RepoRef, tail: &[&str]) -> Result<Url> {
        let mut buf = format!(
            "{}/{}/{}/_apis/git/repositories/{}",
            self.base_url.as_str().trim_end_matches('/'),
            repo.organization,
            repo.project,
            repo.name
        );
        for part in tail {
            buf.push('/');
            buf.push_str(part);
        }
        Url::parse(&buf).map_err(|e| ReportError::InvalidUrl(format!("{buf}: {e}")))
    }

    fn get(&self, url: Url, params: &[(&str, String)]) -> Result<Response> {
        debug!("GET {url}");
        let request = self
            .inner
            .get(url)
            .query(&[API_VERSION])
            .query(params)
            .header(header::ACCEPT, "application/json");
        let request = match &self.token {
            Some(token) => request.basic_auth("", Some(token.expose_secret())),
            None => request,
        };
        Ok(request.send()?)
    }

    fn get_json<T: DeserializeOwned>(&self, url: Url, params: &[(&str, String)]) -> Result<T> {
        let response = self.get(url, params)?;
        let status = response.status();
        if !status.is_success() {
            return Err(ReportError::Api {
                status: status.as_u16(),
                url: response.url().to_string(),
            });
        }
        Ok(response.json()?)
    }
}
