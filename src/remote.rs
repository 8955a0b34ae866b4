use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use crate::error::{Error, Result};

static REPO_PATH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^/([^/]+)/([^/.]+)(?:\.git)?$").unwrap());

/// Host, project key and repository slug of an origin remote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoInfo {
    pub host: String,
    pub project: String,
    pub repo: String,
}

impl RepoInfo {
    /// Parses `ssh://[user@]<host>[:<port>]/<project>/<repo>[.git]`.
    ///
    /// The port is optional and never part of the result, since the web UI is
    /// served from the bare host.
    pub fn parse(remote_url: &str) -> Result<Self> {
        let parsed = Url::parse(remote_url).map_err(|source| Error::InvalidRemoteUrl {
            url: remote_url.to_string(),
            source,
        })?;

        if parsed.scheme() != "ssh" {
            return Err(Error::UnsupportedRemoteFormat(remote_url.to_string()));
        }

        let host = parsed
            .host_str()
            .filter(|host| !host.is_empty())
            .ok_or_else(|| Error::UnsupportedRemoteFormat(remote_url.to_string()))?;

        let captures = REPO_PATH
            .captures(parsed.path())
            .ok_or_else(|| Error::UnsupportedRemoteFormat(remote_url.to_string()))?;

        let info = RepoInfo {
            host: host.to_string(),
            project: captures[1].to_string(),
            repo: captures[2].to_string(),
        };
        log::debug!(
            "remote points at project {} repo {} on {}",
            info.project,
            info.repo,
            info.host
        );
        Ok(info)
    }
}
