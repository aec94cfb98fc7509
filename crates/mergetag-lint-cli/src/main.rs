mod cli;
mod output;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use mergetag_lint_config::{Config, OutputFormat};
use mergetag_lint_engine::{BUILTIN_GRAMMAR, Linter, TagGrammar, read_document};
use output::FileReport;
use std::io::Write;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG, when set, overrides the -v level
    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .init();

    let config = match Config::load() {
        Ok(Some(config)) => config,
        Ok(None) => Config::default(),
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Config file location: {}", Config::config_path().display());
            return ExitCode::from(2);
        }
    };

    let mut stdout = std::io::stdout().lock();
    match run(&cli, &config, &mut stdout) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(2)
        }
    }
}

/// Lint every file on the command line. Returns whether all of them were clean.
fn run(cli: &Cli, config: &Config, out: &mut impl Write) -> Result<bool> {
    if cli.print_grammar {
        out.write_all(BUILTIN_GRAMMAR.as_bytes())?;
        return Ok(true);
    }

    let grammar = load_grammar(cli, config)?;
    let linter = Linter::new(&grammar);

    let mut files = Vec::with_capacity(cli.files.len());
    for path in &cli.files {
        let document = read_document(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let entries = linter.lint(&document);
        log::info!(
            "{}: {} paragraphs, {} problems",
            path.display(),
            document.len(),
            entries.len()
        );
        files.push(FileReport {
            path: path.clone(),
            entries,
        });
    }

    let format = cli.format.map(OutputFormat::from).unwrap_or(config.format);
    match format {
        OutputFormat::Text => {
            output::write_text(out, &files, cli.debug || config.show_raw_diagnostics)?
        }
        OutputFormat::Json => output::write_json(out, &files)?,
    }

    Ok(files.iter().all(|file| file.entries.is_empty()))
}

fn load_grammar(cli: &Cli, config: &Config) -> Result<TagGrammar> {
    match cli.grammar.as_ref().or(config.grammar_path.as_ref()) {
        Some(path) => TagGrammar::load(path)
            .with_context(|| format!("Failed to load grammar {}", path.display())),
        None => {
            log::debug!("Using built-in grammar");
            TagGrammar::builtin().context("Built-in grammar is invalid")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::Path;
    use tempfile::TempDir;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("mergetag-lint").chain(args.iter().copied()))
            .unwrap()
    }

    fn write_file(dir: &Path, name: &str, content: &str) -> String {
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path.to_string_lossy().into_owned()
    }

    fn run_to_string(cli: &Cli, config: &Config) -> (Result<bool>, String) {
        let mut out = Vec::new();
        let result = run(cli, config, &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn clean_file_passes() {
        let dir = TempDir::new().unwrap();
        let file = write_file(
            dir.path(),
            "ok.txt",
            "Dear <# <Content Select=\"//Name\" Optional=\"false\"/> #>,\n",
        );

        let (result, output) = run_to_string(&parse(&[&file]), &Config::default());

        assert!(result.unwrap());
        assert_eq!(output, "No problems found in 1 file\n");
    }

    #[test]
    fn problems_are_reported_per_paragraph() {
        let dir = TempDir::new().unwrap();
        let file = write_file(
            dir.path(),
            "bad.txt",
            "Intro\n<# <Content Select=\"//Foo\" Bar=\"\" /> #>\n",
        );

        let (result, output) = run_to_string(&parse(&[&file]), &Config::default());

        assert!(!result.unwrap());
        assert_eq!(
            output,
            format!("{file}:2: Invalid attributes\nFound 1 problem in 1 file\n")
        );
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.txt").to_string_lossy().into_owned();

        let (result, _) = run_to_string(&parse(&[missing.as_str()]), &Config::default());

        let message = format!("{:#}", result.unwrap_err());
        assert!(message.starts_with("Failed to read"), "{message}");
    }

    #[test]
    fn config_selects_json_and_command_line_wins() {
        let dir = TempDir::new().unwrap();
        let file = write_file(dir.path(), "doc.txt", "plain text\n");
        let config = Config {
            format: OutputFormat::Json,
            ..Config::default()
        };

        let (_, json) = run_to_string(&parse(&[&file]), &config);
        assert_eq!(json.trim_start().chars().next(), Some('['));

        let (_, text) = run_to_string(&parse(&[&file, "--format", "text"]), &config);
        assert_eq!(text, "No problems found in 1 file\n");
    }

    #[test]
    fn custom_grammar_from_command_line() {
        let dir = TempDir::new().unwrap();
        let grammar = write_file(
            dir.path(),
            "grammar.toml",
            concat!(
                "[delimiters]\nopen = \"{%\"\nclose = \"%}\"\n\n",
                "[[tag]]\nname = \"Field\"\n\n",
                "[[tag.attribute]]\nname = \"Name\"\nrequired = true\n",
            ),
        );
        let file = write_file(
            dir.path(),
            "doc.txt",
            "{% <Field Name=\"x\"/> %} <# not a directive here #>\n",
        );

        let cli = parse(&[&file, "--grammar", &grammar]);
        let (result, _) = run_to_string(&cli, &Config::default());

        assert!(result.unwrap());
    }

    #[test]
    fn print_grammar_writes_builtin_grammar() {
        let cli = parse(&["--print-grammar"]);
        let (result, output) = run_to_string(&cli, &Config::default());

        assert!(result.unwrap());
        assert_eq!(output, BUILTIN_GRAMMAR);
    }
}
