use anyhow::{Context, Result};
use clap::Parser;
use std::io;
use std::path::PathBuf;

use git_open::{Options, browser};

pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None, disable_version_flag = true, disable_help_subcommand = true)]
struct Args {
    /// A file or directory within the repository to open. Defaults to the current directory.
    #[arg(value_name = "PATH", required = false)]
    target: Option<PathBuf>,

    /// Open the master branch instead of the checked out branch
    #[arg(short = 'm', long)]
    master: bool,

    /// Open the root of the repository, ignoring PATH
    #[arg(short = 'r', long)]
    root: bool,

    /// Do not open a browser, just print the link
    #[arg(short = 'n', long)]
    no_open: bool,

    /// Run as if started in DIR
    #[arg(value_name = "DIR", long, default_value = ".")]
    path: PathBuf,

    /// Print build time version information
    #[arg(short = 'V', long)]
    version: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    if args.version {
        print_version_info();
        return Ok(());
    }

    let cwd = std::env::current_dir()
        .context("failed to get current directory")?
        .join(&args.path);

    let options = Options {
        target: args.target,
        use_default_branch: args.master,
        root: args.root,
    };
    let url = git_open::browse_url(&cwd, &options)?;

    browser::deliver(
        &url,
        args.no_open,
        browser::opener_on(std::env::consts::OS),
        &mut io::stdout().lock(),
        &mut io::stderr().lock(),
    )?;
    Ok(())
}

fn print_version_info() {
    println!("version:    {}", built_info::PKG_VERSION);
    println!("rustc:      {}", built_info::RUSTC_VERSION);
    println!("target:     {}", built_info::TARGET);

    if let Some(git_ref) = built_info::GIT_HEAD_REF {
        println!(
            "git_branch: {}",
            git_ref.strip_prefix("refs/heads/").unwrap_or(git_ref)
        );
    }

    if let Some(commit_hash) = built_info::GIT_COMMIT_HASH {
        println!("git_commit: {commit_hash}");
    }
    println!("build_date: {}", built_info::BUILT_TIME_UTC);
}
