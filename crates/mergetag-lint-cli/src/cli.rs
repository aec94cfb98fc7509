//! Command-line interface definitions using clap.

use clap::{ArgAction, Parser, ValueEnum};
use mergetag_lint_config::OutputFormat;
use std::path::PathBuf;

/// Merge tag linter
///
/// Checks `<# ... #>` merge tag directives in document templates. Each line
/// of an input file is one paragraph; lines starting with a bullet or number
/// are list paragraphs.
///
/// Exit Codes:
///   0  - No problems found
///   1  - At least one problem was reported
///   2  - A file, grammar or config could not be read
#[derive(Parser, Debug)]
#[command(name = "mergetag-lint", version)]
#[command(about = "Check merge tag directives in document templates")]
pub struct Cli {
    /// Plain-text documents to lint
    #[arg(value_name = "FILES", required_unless_present = "print_grammar")]
    pub files: Vec<PathBuf>,

    /// Grammar file to use instead of the built-in one
    #[arg(long, value_name = "PATH")]
    pub grammar: Option<PathBuf>,

    /// Output format (defaults to the config file setting, then text)
    #[arg(long, value_enum)]
    pub format: Option<FormatArg>,

    /// Show the directive and raw diagnostic under each problem
    #[arg(long)]
    pub debug: bool,

    /// Print the built-in grammar and exit
    #[arg(long)]
    pub print_grammar: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatArg {
    Text,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

impl Cli {
    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            _ => log::LevelFilter::Debug,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    #[test]
    fn command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_files_and_options() {
        let cli = Cli::try_parse_from([
            "mergetag-lint",
            "a.txt",
            "b.txt",
            "--grammar",
            "custom.toml",
            "--format",
            "json",
            "--debug",
            "-vv",
        ])
        .unwrap();

        assert_eq!(cli.files, vec![PathBuf::from("a.txt"), PathBuf::from("b.txt")]);
        assert_eq!(cli.grammar, Some(PathBuf::from("custom.toml")));
        assert_eq!(cli.format, Some(FormatArg::Json));
        assert!(cli.debug);
        assert_eq!(cli.log_level(), log::LevelFilter::Debug);
    }

    #[test]
    fn files_are_required() {
        assert!(Cli::try_parse_from(["mergetag-lint"]).is_err());
    }

    #[test]
    fn print_grammar_needs_no_files() {
        let cli = Cli::try_parse_from(["mergetag-lint", "--print-grammar"]).unwrap();
        assert!(cli.print_grammar);
        assert!(cli.files.is_empty());
        assert_eq!(cli.log_level(), log::LevelFilter::Warn);
    }

    #[test]
    fn rejects_unknown_format() {
        assert!(Cli::try_parse_from(["mergetag-lint", "a.txt", "--format", "html"]).is_err());
    }
}
