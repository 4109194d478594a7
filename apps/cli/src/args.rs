use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(name = "option-optimizer")]
#[command(about = "Tracks option reads and reports autoload mismatches")]
pub struct Args {
    /// Config file to use instead of the default location.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Directory holding the option store.
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the admin API (default).
    Serve {
        #[arg(long)]
        port: Option<u16>,
    },
    /// Create the usage record, or mark an existing one as autoloaded.
    Activate,
    /// Keep the usage record but stop autoloading it.
    Deactivate,
    /// Clear all recorded reads.
    Reset,
    /// Print the first page of a report as JSON.
    Report {
        #[arg(value_enum)]
        kind: ReportKind,
        #[arg(long, default_value_t = 25, allow_negative_numbers = true)]
        length: i64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportKind {
    Unused,
    UsedNotAutoloaded,
    Missing,
}

pub fn parse_args() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_serve() {
        let args = Args::try_parse_from(["option-optimizer"]).expect("parse");
        assert!(args.command.is_none());
    }

    #[test]
    fn parses_report_kind_and_global_flags() {
        let args = Args::try_parse_from([
            "option-optimizer",
            "report",
            "used-not-autoloaded",
            "--length",
            "-1",
            "--data-dir",
            "/tmp/opt",
        ])
        .expect("parse");
        assert_eq!(args.data_dir, Some(PathBuf::from("/tmp/opt")));
        match args.command {
            Some(Command::Report { kind, length }) => {
                assert_eq!(kind, ReportKind::UsedNotAutoloaded);
                assert_eq!(length, -1);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_report() {
        assert!(Args::try_parse_from(["option-optimizer", "report", "everything"]).is_err());
    }
}
