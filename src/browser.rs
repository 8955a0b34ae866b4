use std::io::{self, Write};
use std::process::{Command, Stdio};

use crate::error::{Error, Result};

/// A command that opens a URL in the default browser, with the URL appended as
/// its final argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opener {
    pub program: &'static str,
    pub args: &'static [&'static str],
}

const OPENERS: &[(&str, Opener)] = &[
    (
        "linux",
        Opener {
            program: "xdg-open",
            args: &[],
        },
    ),
    (
        "macos",
        Opener {
            program: "open",
            args: &[],
        },
    ),
    (
        "windows",
        Opener {
            program: "rundll32",
            args: &["url.dll,FileProtocolHandler"],
        },
    ),
];

/// Looks up the opener for an operating system as named by [`std::env::consts::OS`].
pub fn opener_for(os: &str) -> Option<Opener> {
    OPENERS
        .iter()
        .find(|(name, _)| *name == os)
        .map(|(_, opener)| *opener)
}

impl Opener {
    /// Spawns the opener for `url` and returns without waiting on it.
    pub fn launch(&self, url: &str) -> Result<()> {
        log::debug!("opening {} with {}", url, self.program);

        Command::new(self.program)
            .args(self.args)
            .arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| Error::BrowserLaunchFailed {
                program: self.program.to_string(),
                source,
            })?;

        Ok(())
    }
}

/// Like [`opener_for`], but an unmapped operating system is an error.
pub fn opener_on(os: &str) -> Result<Opener> {
    opener_for(os).ok_or_else(|| Error::UnsupportedPlatform(os.to_string()))
}

/// Prints `url` and, unless `no_open` is set, launches it with `opener`.
///
/// A failed launch is reported on `err` and the URL is repeated on `out` for
/// opening by hand; it is not an error.
pub fn deliver<O: Write, E: Write>(
    url: &str,
    no_open: bool,
    opener: Result<Opener>,
    out: &mut O,
    err: &mut E,
) -> io::Result<()> {
    if no_open {
        return writeln!(out, "URL: {url}");
    }

    writeln!(out, "Opening: {url}")?;
    if let Err(failure) = opener.and_then(|opener| opener.launch(url)) {
        log::debug!("browser launch failed: {:?}", failure);
        write!(err, "Failed to open browser: {failure}")?;
        let mut cause = std::error::Error::source(&failure);
        while let Some(source) = cause {
            write!(err, ": {source}")?;
            cause = source.source();
        }
        writeln!(err)?;

        writeln!(out, "Please open the following URL manually:")?;
        writeln!(out, "{url}")?;
    }
    Ok(())
}
