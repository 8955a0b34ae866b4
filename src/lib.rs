use std::path::{Path, PathBuf};

pub mod browse;
pub mod browser;
pub mod error;
pub mod git;
pub mod remote;

pub use error::{Error, Result};

use crate::browse::BrowseUrl;
use crate::git::{GitDir, Target};
use crate::remote::RepoInfo;

#[derive(Debug, Clone, Default)]
pub struct Options {
    /// File or directory to open instead of the working directory.
    pub target: Option<PathBuf>,
    /// Browse `refs/heads/master` instead of the checked out branch.
    pub use_default_branch: bool,
    /// Browse the repository root, ignoring `target`.
    pub root: bool,
}

/// Resolves the browse URL for `options` as seen from `cwd`.
pub fn browse_url(cwd: &Path, options: &Options) -> Result<String> {
    let git_dir = GitDir::discover(cwd)?;
    let info = RepoInfo::parse(&git_dir.origin_url()?)?;
    let branch = git_dir.branch(options.use_default_branch)?;

    let target = match (options.root, options.target.as_deref()) {
        (true, _) => Target::Root,
        (false, Some(path)) => Target::Path(path),
        (false, None) => Target::WorkingDir,
    };
    let relative_path = git_dir.relative_path(cwd, target)?;
    log::debug!("relative path is {:?}", relative_path);

    Ok(BrowseUrl::new(&info)
        .path(relative_path)
        .branch(branch)
        .build())
}
