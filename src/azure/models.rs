use serde::Deserialize;

// -------------------------------------------------------------------------------------------------
// ListResponse
// -------------------------------------------------------------------------------------------------
/// Envelope shared by the Azure DevOps collection endpoints.
#[derive(Debug, Deserialize)]
pub struct ListResponse<T> {
    #[serde(default = "Vec::new")]
    pub value: Vec<T>,
}

// -------------------------------------------------------------------------------------------------
// GitCommitRef
// -------------------------------------------------------------------------------------------------
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitCommitRef {
    pub commit_id: String,
    #[serde(default)]
    pub author: GitUserDate,
    #[serde(default)]
    pub comment: String,
}

// -------------------------------------------------------------------------------------------------
// GitUserDate
// -------------------------------------------------------------------------------------------------
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GitUserDate {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub date: String,
}

// -------------------------------------------------------------------------------------------------
// GitRef
// -------------------------------------------------------------------------------------------------
#[derive(Debug, Clone, Deserialize)]
pub struct GitRef {
    pub name: String,
}

impl GitRef {
    const HEADS_PREFIX: &'static str = "refs/heads/";

    /// The branch name, if this ref is a branch head.
    pub fn branch_name(&self) -> Option<&str> {
        self.name.strip_prefix(Self::HEADS_PREFIX)
    }
}
