//! Input selection and mode dispatch.

use std::fmt;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::debug;

use crate::config::{ScanConfig, ScanMode};
use crate::error::{AggregateError, Result};
use crate::mapped::run_mapped_file;
use crate::pipeline::run_streaming;
use crate::stats::StatTable;

/// Where the records come from.
///
/// Parses from a command-line argument: `-` is standard input, anything
/// else is a file path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Standard input; always streamed.
    Stdin,
    /// A file on disk.
    File(PathBuf),
}

impl Input {
    /// Returns the path for [`Input::File`].
    pub fn path(&self) -> Option<&Path> {
        match self {
            Input::Stdin => None,
            Input::File(path) => Some(path),
        }
    }
}

impl FromStr for Input {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "-" => Input::Stdin,
            path => Input::File(PathBuf::from(path)),
        })
    }
}

impl From<PathBuf> for Input {
    fn from(path: PathBuf) -> Self {
        Input::File(path)
    }
}

impl fmt::Display for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Input::Stdin => f.write_str("<stdin>"),
            Input::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Aggregates `input` in the requested mode.
///
/// [`ScanMode::Auto`] maps regular files and streams everything else
/// (stdin, pipes, character devices). [`ScanMode::Mapped`] on standard
/// input is rejected as [`AggregateError::InvalidConfig`].
///
/// # Example
///
/// ```no_run
/// use linefold::{run, format_summary, Input, ScanConfig, ScanMode};
///
/// let input: Input = "measurements.txt".parse().unwrap();
/// let table = run(&input, ScanMode::Auto, &ScanConfig::default())?;
/// println!("{}", format_summary(&table));
/// # Ok::<(), linefold::AggregateError>(())
/// ```
pub fn run(input: &Input, mode: ScanMode, config: &ScanConfig) -> Result<StatTable> {
    config.validate()?;
    let mode = resolve(input, mode)?;
    debug!("aggregating {} in {:?} mode", input, mode);

    match (input, mode) {
        (Input::File(path), ScanMode::Mapped) => run_mapped_file(path, config),
        (Input::File(path), _) => run_streaming(File::open(path)?, config),
        (Input::Stdin, _) => run_streaming(io::stdin(), config),
    }
}

/// Turns `Auto` into a concrete mode for `input`.
fn resolve(input: &Input, mode: ScanMode) -> Result<ScanMode> {
    match (input, mode) {
        (Input::Stdin, ScanMode::Mapped) => Err(AggregateError::InvalidConfig {
            message: "standard input cannot be memory-mapped",
        }),
        (Input::Stdin, ScanMode::Auto) => Ok(ScanMode::Stream),
        (Input::File(path), ScanMode::Auto) => {
            let meta = std::fs::metadata(path)?;
            Ok(if meta.is_file() {
                ScanMode::Mapped
            } else {
                ScanMode::Stream
            })
        }
        (_, mode) => Ok(mode),
    }
}
