//! # CLI Argument Definitions
//!
//! The standalone `vars` command tree. Every command takes the store target first
//! (`<name> [scope]`) followed by its own positional operands, so the scope is recognized
//! by counting arguments rather than by a flag.

use crate::commands::VarsCommand;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use vars_logger::LevelFilter;

/// The main CLI structure parsing command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "vars")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
#[command(about = "Manage stateful properties for any application")]
pub struct Cli {
    /// Directory that holds all namespaces (overrides XDG_STATE_HOME and config)
    #[arg(long, global = true, value_name = "DIR")]
    pub state_root: Option<PathBuf>,

    /// Optional TOML configuration file
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// The log level requested on the command line, if any flag was given.
    #[must_use]
    pub const fn level_override(&self) -> Option<LevelFilter> {
        if self.quiet {
            return Some(LevelFilter::ERROR);
        }
        match self.verbose {
            0 => None,
            1 => Some(LevelFilter::INFO),
            _ => Some(LevelFilter::DEBUG),
        }
    }
}

/// Standalone commands: `<name> [scope]` followed by the command's operands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Initialize vars (required before use)
    Init {
        #[arg(value_name = "NAME [SCOPE]", num_args = 1.., required = true)]
        target: Vec<String>,
    },
    /// Set a variable for a specific property
    Set {
        #[arg(
            value_name = "NAME [SCOPE] KEY VALUE",
            num_args = 3..,
            required = true,
            allow_hyphen_values = true
        )]
        args: Vec<String>,
    },
    /// Get a variable from a specific vars property value
    Get {
        #[arg(value_name = "NAME [SCOPE] KEY", num_args = 2.., required = true)]
        args: Vec<String>,
    },
    /// Unset a variable property key value
    Unset {
        #[arg(value_name = "NAME [SCOPE] KEY", num_args = 2.., required = true)]
        args: Vec<String>,
    },
    /// Print all vars for the given name as key=value
    Data {
        #[arg(value_name = "NAME [SCOPE]", num_args = 1.., required = true)]
        target: Vec<String>,
    },
    /// List all keys for the given vars name
    #[command(alias = "k")]
    Keys {
        #[arg(value_name = "NAME [SCOPE]", num_args = 1.., required = true)]
        target: Vec<String>,
    },
    /// Edit the vars file in the default editor
    Edit {
        #[arg(value_name = "NAME [SCOPE]", num_args = 1.., required = true)]
        target: Vec<String>,
    },
}

impl Command {
    /// Splits the positional arguments into the store target segments and the
    /// store-level command to run against it.
    ///
    /// Only the trailing operands are peeled off; any surplus segments stay in the target
    /// so that store construction can reject them.
    #[must_use]
    pub fn into_parts(self) -> (Vec<String>, VarsCommand) {
        match self {
            Self::Init { target } => (target, VarsCommand::Init),
            Self::Data { target } => (target, VarsCommand::Data),
            Self::Keys { target } => (target, VarsCommand::Keys),
            Self::Edit { target } => (target, VarsCommand::Edit),
            Self::Set { args } => {
                let (target, [key, value]) = split_operands(args);
                (target, VarsCommand::Set { key, value })
            },
            Self::Get { args } => {
                let (target, [key]) = split_operands(args);
                (target, VarsCommand::Get { key })
            },
            Self::Unset { args } => {
                let (target, [key]) = split_operands(args);
                (target, VarsCommand::Unset { key })
            },
        }
    }
}

/// Takes the last `N` arguments as operands. Missing operands come back empty and are
/// rejected later by key validation.
fn split_operands<const N: usize>(mut args: Vec<String>) -> (Vec<String>, [String; N]) {
    let tail = args.split_off(args.len().saturating_sub(N));
    let mut operands: [String; N] = std::array::from_fn(|_| String::new());
    let offset = N - tail.len();
    for (slot, value) in operands.iter_mut().skip(offset).zip(tail) {
        *slot = value;
    }
    (args, operands)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("vars").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn set_without_scope() {
        let (target, cmd) = parse(&["set", "api", "token", "abc"]).command.into_parts();
        assert_eq!(target, ["api"]);
        assert_eq!(cmd, VarsCommand::Set { key: "token".into(), value: "abc".into() });
    }

    #[test]
    fn set_with_scope_and_hyphen_value() {
        let (target, cmd) =
            parse(&["set", "api", "prod", "pem", "-----BEGIN KEY-----"]).command.into_parts();
        assert_eq!(target, ["api", "prod"]);
        assert_eq!(cmd, VarsCommand::Set { key: "pem".into(), value: "-----BEGIN KEY-----".into() });
    }

    #[test]
    fn get_keeps_surplus_segments_in_target() {
        let (target, cmd) = parse(&["get", "api", "a", "b", "token"]).command.into_parts();
        assert_eq!(target, ["api", "a", "b"]);
        assert_eq!(cmd, VarsCommand::Get { key: "token".into() });
    }

    #[test]
    fn keys_alias() {
        let (target, cmd) = parse(&["k", "pomo", "timer"]).command.into_parts();
        assert_eq!(target, ["pomo", "timer"]);
        assert_eq!(cmd, VarsCommand::Keys);
    }

    #[test]
    fn too_few_operands_is_usage_error() {
        let err = Cli::try_parse_from(["vars", "set", "api", "token"]).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn verbosity_flags() {
        assert_eq!(parse(&["data", "api"]).level_override(), None);
        assert_eq!(parse(&["-v", "data", "api"]).level_override(), Some(LevelFilter::INFO));
        assert_eq!(parse(&["data", "api", "-vv"]).level_override(), Some(LevelFilter::DEBUG));
        assert_eq!(parse(&["-q", "data", "api"]).level_override(), Some(LevelFilter::ERROR));
    }

    #[test]
    fn split_operands_pads_missing_values() {
        let (target, [key, value]) = split_operands(vec!["only".to_owned()]);
        assert!(target.is_empty());
        assert_eq!(key, "");
        assert_eq!(value, "only");
    }
}
