//! Subcommand runners

use crate::config::{CombineConfig, Input, MatchConfig, SelectConfig};
use anyhow::{bail, Context, Result};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use taco_grammar::parsers::FeatureSelectionReader;
use taco_merge::{write_records, EquiJoin, GroupingMerge, MergeStats};

/// Combine constraint maps into one table grouped by key
///
/// # Errors
/// Fails if an input cannot be opened, is malformed or unsorted, or the
/// output cannot be written
pub fn run_combine(config: &CombineConfig) -> Result<MergeStats> {
    reject_repeated_stdin(&config.inputs)?;

    let mut sources = Vec::with_capacity(config.inputs.len());
    for input in &config.inputs {
        sources.push((open_input(input)?, input.to_string()));
    }

    let mut merge = GroupingMerge::open(sources, &config.format)?;
    let mut out = open_output(config.output.as_deref())?;
    write_records(merge.by_ref(), &mut out, &config.format)?;

    let stats = merge.stats();
    tracing::debug!(?stats, "combine done");
    Ok(stats)
}

/// Join a rule-table index against a constraint map
///
/// # Errors
/// Fails if an input cannot be opened, is malformed or unsorted, or the
/// output cannot be written
pub fn run_match(config: &MatchConfig) -> Result<MergeStats> {
    reject_repeated_stdin([&config.index, &config.map])?;

    let index = open_input(&config.index)?;
    let map = open_input(&config.map)?;
    let mut join = EquiJoin::open(
        (index, config.index.to_string()),
        (map, config.map.to_string()),
        &config.format,
    )?;
    let mut out = open_output(config.output.as_deref())?;
    write_records(join.by_ref(), &mut out, &config.format)?;

    let stats = join.stats();
    tracing::debug!(?stats, "match done");
    Ok(stats)
}

/// Parse a feature-selection table and write it back normalised
///
/// Returns the number of entries read.
///
/// # Errors
/// Fails on the first malformed line, on an index gap when
/// `check_indices` is set, or if the output cannot be written
pub fn run_select(config: &SelectConfig) -> Result<usize> {
    let symbols = taco_symbol::global();
    let reader = open_input(&config.input)?;

    let table = FeatureSelectionReader::new(reader, symbols)
        .with_delimiter(config.delimiter.as_str())
        .read_table()
        .with_context(|| format!("{}: invalid feature-selection table", config.input))?;

    if config.check_indices {
        table
            .validate_contiguous()
            .with_context(|| format!("{}: rule indices are not contiguous", config.input))?;
    }

    let mut out = open_output(config.output.as_deref())?;
    if config.json {
        serde_json::to_writer_pretty(&mut out, &table.to_named(symbols)?)
            .context("failed to write JSON")?;
        writeln!(out).context("failed to write output")?;
    } else {
        out.write_all(table.render(symbols, &config.delimiter)?.as_bytes())
            .context("failed to write output")?;
    }
    out.flush().context("failed to write output")?;

    tracing::debug!(entries = table.len(), symbols = symbols.len(), "select done");
    Ok(table.len())
}

fn reject_repeated_stdin<'a>(inputs: impl IntoIterator<Item = &'a Input>) -> Result<()> {
    if inputs.into_iter().filter(|i| **i == Input::Stdin).count() > 1 {
        bail!("standard input can only be given once");
    }
    Ok(())
}

/// Open `input` for buffered reading
///
/// # Errors
/// Fails if the file cannot be opened
pub fn open_input(input: &Input) -> Result<Box<dyn BufRead>> {
    match input {
        Input::Stdin => Ok(Box::new(io::stdin().lock())),
        Input::Path(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            Ok(Box::new(BufReader::new(file)))
        }
    }
}

/// Open `path` for buffered writing, or standard output if `None`
///
/// # Errors
/// Fails if the file cannot be created
pub fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        None => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stdin_twice_is_rejected() {
        let err = reject_repeated_stdin(&[Input::Stdin, Input::Stdin]).unwrap_err();
        assert!(err.to_string().contains("only be given once"));
        assert!(reject_repeated_stdin(&[Input::Stdin, Input::Path("a".into())]).is_ok());
    }

    #[test]
    fn missing_input_names_the_path() {
        let err = open_input(&Input::Path("/nonexistent/taco/map.txt".into())).err().unwrap();
        assert!(format!("{err:#}").contains("/nonexistent/taco/map.txt"));
    }
}
