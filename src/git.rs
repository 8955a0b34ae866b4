use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

pub const DEFAULT_BRANCH: &str = "refs/heads/master";

const METADATA_DIR: &str = ".git";
const ORIGIN_SECTION: &str = "[remote \"origin\"]";
const HEAD_PREFIX: &str = "ref: ";

/// What the browse page should point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target<'a> {
    /// The repository root, whatever the arguments say.
    Root,
    /// An explicit file or directory, relative paths resolved against the working directory.
    Path(&'a Path),
    /// The working directory itself.
    WorkingDir,
}

/// A discovered `.git` metadata directory.
#[derive(Debug, Clone)]
pub struct GitDir {
    path: PathBuf,
}

impl GitDir {
    /// Walks up from `start` (inclusive) until a directory containing `.git` is found.
    pub fn discover<P: AsRef<Path>>(start: P) -> Result<Self> {
        let start = start.as_ref();
        let mut dir = fs::canonicalize(start).map_err(|source| Error::Io {
            path: start.to_path_buf(),
            source,
        })?;

        loop {
            let candidate = dir.join(METADATA_DIR);
            if candidate.is_dir() {
                log::debug!("found git metadata directory at {}", candidate.display());
                return Ok(GitDir { path: candidate });
            }

            match dir.parent() {
                Some(parent) => dir = parent.to_path_buf(),
                None => return Err(Error::NotARepository(start.to_path_buf())),
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The working tree root, i.e. the parent of the metadata directory.
    pub fn root(&self) -> &Path {
        self.path.parent().unwrap_or(&self.path)
    }

    pub fn origin_url(&self) -> Result<String> {
        let config = self.path.join("config");
        let text = fs::read_to_string(&config).map_err(|source| Error::NoOriginRemote {
            path: config.clone(),
            source: Some(source),
        })?;

        let url = parse_origin_url(&text).ok_or_else(|| Error::NoOriginRemote {
            path: config,
            source: None,
        })?;
        log::debug!("origin remote URL is {}", url);
        Ok(url.to_string())
    }

    /// Resolves the checked out branch ref, or [`DEFAULT_BRANCH`] without reading
    /// anything when `use_default` is set.
    pub fn branch(&self, use_default: bool) -> Result<String> {
        if use_default {
            return Ok(DEFAULT_BRANCH.to_string());
        }

        let head = self.path.join("HEAD");
        let text = fs::read_to_string(&head).map_err(|source| Error::Io { path: head, source })?;
        let branch = parse_head(&text)?;
        log::debug!("current branch is {}", branch);
        Ok(branch.to_string())
    }

    /// Path of `target` relative to the repository root, as it appears in a browse URL:
    /// empty for the root itself, otherwise `/`-separated with a leading `/`.
    pub fn relative_path(&self, cwd: &Path, target: Target<'_>) -> Result<String> {
        let root = self.root();
        let absolute = match target {
            Target::Root => return Ok(String::new()),
            Target::Path(path) => {
                let candidate = cwd.join(path);
                if let Err(source) = fs::metadata(&candidate) {
                    return Err(match source.kind() {
                        ErrorKind::NotFound => Error::PathNotFound(path.to_path_buf()),
                        _ => Error::Io {
                            path: path.to_path_buf(),
                            source,
                        },
                    });
                }
                resolve_argument(path, &candidate, root)?
            }
            Target::WorkingDir => canonicalize(cwd)?,
        };

        let relative = absolute
            .strip_prefix(root)
            .map_err(|_| Error::PathOutsideRepository {
                path: absolute.clone(),
                root: root.to_path_buf(),
            })?;

        let segments = relative
            .components()
            .filter_map(|component| match component {
                Component::Normal(segment) => Some(segment),
                _ => None,
            })
            .map(|segment| {
                segment
                    .to_str()
                    .ok_or_else(|| Error::NonUtf8Path(absolute.clone()))
            })
            .collect::<Result<Vec<_>>>()?;

        if segments.is_empty() {
            Ok(String::new())
        } else {
            Ok(format!("/{}", segments.join("/")))
        }
    }
}

/// Absolute form of an explicit path argument. A trailing symlink is kept as
/// named, only its parent directory is resolved. Arguments ending in `.` or `..`,
/// or that would only land inside `root` once fully resolved, are canonicalized.
fn resolve_argument(argument: &Path, candidate: &Path, root: &Path) -> Result<PathBuf> {
    if let Some(Component::Normal(name)) = argument.components().next_back()
        && let Some(parent) = candidate.parent()
    {
        let named = canonicalize(parent)?.join(name);
        if named.starts_with(root) {
            return Ok(named);
        }
    }

    canonicalize(candidate)
}

fn canonicalize(path: &Path) -> Result<PathBuf> {
    fs::canonicalize(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Finds the first `url` entry of the `[remote "origin"]` section.
///
/// This is a line scanner, not a config parser: quoting, continuation lines and
/// comments after the value are not understood.
pub fn parse_origin_url(config: &str) -> Option<&str> {
    let mut in_origin = false;

    for line in config.lines().map(str::trim) {
        if line.starts_with(ORIGIN_SECTION) {
            in_origin = true;
        } else if line.starts_with('[') {
            in_origin = false;
        } else if in_origin
            && let Some(value) = line
                .strip_prefix("url")
                .and_then(|rest| rest.trim_start().strip_prefix('='))
        {
            return Some(value.trim());
        }
    }

    None
}

/// Extracts the ref a symbolic HEAD points to.
pub fn parse_head(head: &str) -> Result<&str> {
    let head = head.trim();
    head.strip_prefix(HEAD_PREFIX)
        .map(str::trim)
        .filter(|reference| !reference.is_empty())
        .ok_or_else(|| Error::DetachedOrUnparseableHead(head.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_url_from_origin_section() {
        let config = r#"[core]
	repositoryformatversion = 0
	bare = false
[remote "origin"]
	url = ssh://git@host:7999/PROJ/repo.git
	fetch = +refs/heads/*:refs/remotes/origin/*
"#;
        assert_eq!(
            parse_origin_url(config),
            Some("ssh://git@host:7999/PROJ/repo.git")
        );
    }

    #[test]
    fn ignores_url_of_other_remotes() {
        let config = r#"[remote "upstream"]
	url = ssh://host:7999/UP/repo.git
[remote "origin"]
	url = ssh://host:7999/PROJ/repo.git
"#;
        assert_eq!(parse_origin_url(config), Some("ssh://host:7999/PROJ/repo.git"));
    }

    #[test]
    fn stops_at_next_section() {
        let config = r#"[remote "origin"]
	fetch = +refs/heads/*:refs/remotes/origin/*
[branch "master"]
	url = ssh://host:7999/PROJ/repo.git
"#;
        assert_eq!(parse_origin_url(config), None);
    }

    #[test]
    fn takes_first_url_in_section() {
        let config = "[remote \"origin\"]\n url=ssh://a:1/P/one.git\n url = ssh://a:1/P/two.git\n";
        assert_eq!(parse_origin_url(config), Some("ssh://a:1/P/one.git"));
    }

    #[test]
    fn does_not_confuse_keys_starting_with_url() {
        let config = "[remote \"origin\"]\n urlfoo = nope\n";
        assert_eq!(parse_origin_url(config), None);
    }

    #[test]
    fn parses_symbolic_head() {
        assert_eq!(
            parse_head("ref: refs/heads/feature/x\n").unwrap(),
            "refs/heads/feature/x"
        );
    }

    #[test]
    fn rejects_detached_head() {
        let err = parse_head("4b825dc642cb6eb9a060e54bf8d69288fbee4904\n").unwrap_err();
        assert!(matches!(err, Error::DetachedOrUnparseableHead(_)));
    }

    #[test]
    fn rejects_empty_ref() {
        assert!(parse_head("ref: \n").is_err());
    }
}
