//! Command-line definition

use clap::{value_parser, Arg, ArgAction, Command};
use std::path::PathBuf;

/// Build the `taco` command tree
#[must_use]
pub fn command() -> Command {
    Command::new("taco")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Combine, match and check constraint tables for syntax-based translation")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .global(true)
                .help("Log more (repeat for debug output); TACO_LOG overrides"),
        )
        .arg(
            Arg::new("delimiter")
                .long("delimiter")
                .default_value("|||")
                .global(true)
                .help("Field delimiter between key and payload"),
        )
        .subcommand(
            Command::new("combine")
                .about("Group sorted constraint maps by key")
                .long_about(
                    "Reads N constraint-map files (`<key> ||| <id> ...`), each sorted \
                     byte-wise with unique keys, and writes `<key> ||| <src>:<id> ...` \
                     where <src> is the 0-based input index.",
                )
                .arg(
                    Arg::new("inputs")
                        .value_name("FILE")
                        .num_args(0..)
                        .value_parser(value_parser!(PathBuf))
                        .help("Constraint-map files; '-' or none reads standard input"),
                )
                .arg(output_arg()),
        )
        .subcommand(
            Command::new("match")
                .about("Join a rule-table index against a constraint map")
                .long_about(
                    "Reads a rule-table index (`<key> ||| <line-number>`) and a constraint \
                     map (`<key> ||| <id> ...`), both sorted byte-wise, and writes \
                     `<line-number> ||| <id> ...` for every index entry whose key is in the map.",
                )
                .arg(
                    Arg::new("index")
                        .value_name("INDEX")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("Rule-table index file ('-' for standard input)"),
                )
                .arg(
                    Arg::new("map")
                        .value_name("MAP")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("Constraint-map file ('-' for standard input)"),
                )
                .arg(output_arg()),
        )
        .subcommand(
            Command::new("select")
                .about("Check and normalise a feature-selection table")
                .arg(
                    Arg::new("input")
                        .value_name("FILE")
                        .value_parser(value_parser!(PathBuf))
                        .help("Feature-selection table; '-' or none reads standard input"),
                )
                .arg(
                    Arg::new("check-indices")
                        .long("check-indices")
                        .action(ArgAction::SetTrue)
                        .help("Fail unless rule indices run 0..n-1 in file order"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output as JSON"),
                )
                .arg(output_arg()),
        )
}

fn output_arg() -> Arg {
    Arg::new("output")
        .short('o')
        .long("output")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Write output here instead of standard output")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_is_consistent() {
        command().debug_assert();
    }

    #[test]
    fn help_is_not_an_error_kind() {
        let err = command().try_get_matches_from(["taco", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
        assert_eq!(err.exit_code(), 0);
    }

    #[test]
    fn match_needs_two_files() {
        let err = command()
            .try_get_matches_from(["taco", "match", "index.txt"])
            .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn global_flags_after_subcommand() {
        let matches = command()
            .try_get_matches_from(["taco", "combine", "a", "b", "-o", "out", "-vv"])
            .unwrap();
        let (name, sub) = matches.subcommand().unwrap();
        assert_eq!(name, "combine");
        assert_eq!(sub.get_count("verbose"), 2);
        assert_eq!(sub.get_many::<PathBuf>("inputs").unwrap().count(), 2);
    }
}
