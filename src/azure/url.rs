use crate::error::{ReportError, Result};
use crate::model::RepoRef;

const DEV_AZURE_HOST: &str = "dev.azure.com";
const VISUALSTUDIO_HOST: &str = ".visualstudio.com";
const GIT_SEGMENT: &str = "_git";

/// Split an Azure DevOps repository URL into organization, project and repository name.
///
/// Two shapes are recognized:
///
/// - `https://dev.azure.com/{organization}/{project}/_git/{repository}`
/// - `https://{organization}.visualstudio.com/{project}/_git/{repository}`
///
/// Clone URLs with a `user@` prefix, a trailing slash, a query string, or a fragment are
/// accepted. When the `_git` segment is missing, the repository is taken from the segment
/// right after the project.
pub fn parse_repo_url(url: &str) -> Result<RepoRef> {
    let unsupported = || ReportError::UnsupportedFormat(url.to_string());

    let trimmed = url.trim();
    let without_query = trimmed
        .split(|c: char| c == '?' || c == '#')
        .next()
        .unwrap_or_default();
    let without_scheme = without_query
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or(without_query);

    let (authority, path) = without_scheme
        .split_once('/')
        .unwrap_or((without_scheme, ""));
    let host = authority
        .rsplit_once('@')
        .map(|(_, host)| host)
        .unwrap_or(authority)
        .to_ascii_lowercase();

    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    let (organization, rest) = if host == DEV_AZURE_HOST {
        match segments.split_first() {
            Some((org, rest)) => (org.to_string(), rest),
            None => return Err(unsupported()),
        }
    } else if let Some(org) = host.strip_suffix(VISUALSTUDIO_HOST) {
        (org.to_string(), segments.as_slice())
    } else {
        return Err(unsupported());
    };

    let (project, name) = match rest.iter().position(|s| *s == GIT_SEGMENT) {
        Some(pos) if pos >= 1 && pos + 1 < rest.len() => (rest[pos - 1], rest[pos + 1]),
        Some(_) => return Err(unsupported()),
        None if rest.len() == 2 => (rest[0], rest[1]),
        None => return Err(unsupported()),
    };

    if organization.is_empty() || project.is_empty() || name.is_empty() {
        return Err(unsupported());
    }

    Ok(RepoRef {
        organization,
        project: project.to_string(),
        name: name.to_string(),
    })
}
