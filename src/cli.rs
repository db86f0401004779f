//! Command-line parsing.

use std::path::PathBuf;

use anyhow::{bail, Context};
use directories::ProjectDirs;

/// Text printed by `--help`.
pub const USAGE: &str = "Usage: quadtile [OPTIONS...]

Options:
  -d, --data PATH     Change the data folder
  -u, --user PATH     Change the folder levels are saved to
  -h, --help          Show this help text and exit
  -v, --version       Show version info and exit
";

/// Directories chosen on the command line. `None` means use the default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    /// Value of `--data`.
    pub data_dir: Option<PathBuf>,
    /// Value of `--user`.
    pub user_dir: Option<PathBuf>,
}

impl Options {
    /// `--data`, or `data` next to the directory holding the executable.
    pub fn data_dir(&self) -> anyhow::Result<PathBuf> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        let exe = std::env::current_exe().context("can't locate the executable")?;
        let bin_dir = exe
            .parent()
            .context("executable path has no parent directory")?;
        Ok(bin_dir.join("..").join("data"))
    }

    /// `--user`, or the platform's per-user data directory for quadtile.
    pub fn user_dir(&self) -> anyhow::Result<PathBuf> {
        if let Some(dir) = &self.user_dir {
            return Ok(dir.clone());
        }
        ProjectDirs::from("", "", "quadtile")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .context("can't determine the user data directory; pass --user")
    }
}

/// What the command line asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    /// Start the editor.
    Run(Options),
    /// Print usage and exit.
    Help,
    /// Print the version and exit.
    Version,
}

/// Parses arguments, not including the program name.
pub fn parse<I, A>(args: I) -> anyhow::Result<CliCommand>
where
    I: IntoIterator<Item = A>,
    A: Into<String>,
{
    let mut opts = Options::default();
    let mut args = args.into_iter().map(Into::into);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-d" | "--data" => {
                let path = args.next().with_context(|| format!("{} expects a path", arg))?;
                opts.data_dir = Some(PathBuf::from(path));
            }
            "-u" | "--user" => {
                let path = args.next().with_context(|| format!("{} expects a path", arg))?;
                opts.user_dir = Some(PathBuf::from(path));
            }
            "-h" | "--help" => return Ok(CliCommand::Help),
            "-v" | "--version" => return Ok(CliCommand::Version),
            other => bail!("Unknown option '{}'", other),
        }
    }

    Ok(CliCommand::Run(opts))
}
