//! Run configuration for each subcommand
//!
//! Built from parsed [`ArgMatches`], or directly in tests.

use clap::ArgMatches;
use std::fmt;
use std::path::{Path, PathBuf};
use taco_merge::TableFormat;

/// Where a table is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Standard input (`-` or no path)
    Stdin,
    /// A file on disk
    Path(PathBuf),
}

impl Input {
    /// Map a command-line path, treating `-` as standard input
    #[must_use]
    pub fn from_arg(path: &Path) -> Self {
        if path.as_os_str() == "-" {
            Self::Stdin
        } else {
            Self::Path(path.to_path_buf())
        }
    }

    fn optional(path: Option<&PathBuf>) -> Self {
        path.map_or(Self::Stdin, |path| Self::from_arg(path))
    }
}

impl fmt::Display for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdin => f.write_str("<stdin>"),
            Self::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

/// `taco combine` settings
#[derive(Debug, Clone)]
pub struct CombineConfig {
    /// Constraint maps, in source-index order
    pub inputs: Vec<Input>,
    /// Output file; standard output if `None`
    pub output: Option<PathBuf>,
    /// Line format shared by inputs and output
    pub format: TableFormat,
}

impl CombineConfig {
    /// Read settings from the `combine` subcommand matches
    #[must_use]
    pub fn from_matches(matches: &ArgMatches) -> Self {
        let inputs: Vec<Input> = matches
            .get_many::<PathBuf>("inputs")
            .map(|paths| paths.map(|path| Input::from_arg(path)).collect())
            .unwrap_or_default();
        Self {
            inputs: if inputs.is_empty() { vec![Input::Stdin] } else { inputs },
            output: output(matches),
            format: format(matches),
        }
    }
}

/// `taco match` settings
#[derive(Debug, Clone)]
pub struct MatchConfig {
    /// Rule-table index
    pub index: Input,
    /// Constraint map
    pub map: Input,
    /// Output file; standard output if `None`
    pub output: Option<PathBuf>,
    /// Line format shared by inputs and output
    pub format: TableFormat,
}

impl MatchConfig {
    /// Read settings from the `match` subcommand matches
    #[must_use]
    pub fn from_matches(matches: &ArgMatches) -> Self {
        Self {
            index: Input::optional(matches.get_one::<PathBuf>("index")),
            map: Input::optional(matches.get_one::<PathBuf>("map")),
            output: output(matches),
            format: format(matches),
        }
    }
}

/// `taco select` settings
#[derive(Debug, Clone)]
pub struct SelectConfig {
    /// Feature-selection table
    pub input: Input,
    /// Output file; standard output if `None`
    pub output: Option<PathBuf>,
    /// Index/rule delimiter
    pub delimiter: String,
    /// Require indices `0..n-1` in file order
    pub check_indices: bool,
    /// Emit JSON instead of normalised table text
    pub json: bool,
}

impl SelectConfig {
    /// Read settings from the `select` subcommand matches
    #[must_use]
    pub fn from_matches(matches: &ArgMatches) -> Self {
        Self {
            input: Input::optional(matches.get_one::<PathBuf>("input")),
            output: output(matches),
            delimiter: format(matches).delimiter,
            check_indices: matches.get_flag("check-indices"),
            json: matches.get_flag("json"),
        }
    }
}

fn output(matches: &ArgMatches) -> Option<PathBuf> {
    matches
        .get_one::<PathBuf>("output")
        .filter(|path| path.as_os_str() != "-")
        .cloned()
}

fn format(matches: &ArgMatches) -> TableFormat {
    let format = TableFormat::new();
    match matches.get_one::<String>("delimiter") {
        Some(delimiter) => format.with_delimiter(delimiter.as_str()),
        None => format,
    }
}
