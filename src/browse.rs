use crate::git::DEFAULT_BRANCH;
use crate::remote::RepoInfo;

/// Assembles a `.../projects/<project>/repos/<repo>/browse` URL.
#[derive(Debug, Clone)]
pub struct BrowseUrl {
    base: String,
    path: String,
    branch: Option<String>,
}

impl BrowseUrl {
    pub fn new(info: &RepoInfo) -> Self {
        BrowseUrl {
            base: format!(
                "https://{}/projects/{}/repos/{}/browse",
                info.host, info.project, info.repo
            ),
            path: String::new(),
            branch: None,
        }
    }

    /// Appended verbatim, so it must already be URL safe.
    pub fn path(mut self, relative_path: impl Into<String>) -> Self {
        self.path = relative_path.into();
        self
    }

    pub fn branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }

    pub fn build(&self) -> String {
        match self.branch.as_deref() {
            Some(branch) if branch != DEFAULT_BRANCH => format!(
                "{}{}?at={}",
                self.base,
                self.path,
                urlencoding::encode(branch)
            ),
            _ => format!("{}{}", self.base, self.path),
        }
    }
}
