use std::path::PathBuf;

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("not inside a git repository (searched upwards from {})", .0.display())]
    NotARepository(PathBuf),
    #[error("could not read origin URL from {}", .path.display())]
    NoOriginRemote {
        path: PathBuf,
        #[source]
        source: Option<std::io::Error>,
    },
    #[error("invalid remote URL `{url}`")]
    InvalidRemoteUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("unsupported remote URL format `{0}`, expected ssh://<host>[:<port>]/<project>/<repo>[.git]")]
    UnsupportedRemoteFormat(String),
    #[error("could not determine current branch from `{0}` (detached HEAD is not supported)")]
    DetachedOrUnparseableHead(String),
    #[error("path does not exist locally: {}", .0.display())]
    PathNotFound(PathBuf),
    #[error("path {} is outside of the repository root {}", .path.display(), .root.display())]
    PathOutsideRepository { path: PathBuf, root: PathBuf },
    #[error("path {} is not valid UTF-8 and cannot be put in a URL", .0.display())]
    NonUtf8Path(PathBuf),
    #[error("unsupported platform `{0}`")]
    UnsupportedPlatform(String),
    #[error("failed to launch `{program}`")]
    BrowserLaunchFailed {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
