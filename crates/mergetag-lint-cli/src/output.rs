//! Printing lint results.

use mergetag_lint_engine::LintReport;
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;

/// The report for one linted file.
#[derive(Debug, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub entries: LintReport,
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

/// One `<file>:<paragraph>: <message>` line per problem, then a summary.
///
/// Paragraphs are numbered from 1, as a word processor user counts them.
pub fn write_text(
    out: &mut impl Write,
    files: &[FileReport],
    show_raw: bool,
) -> std::io::Result<()> {
    let mut total = 0;
    for file in files {
        for entry in &file.entries {
            writeln!(
                out,
                "{}:{}: {}",
                file.path.display(),
                entry.paragraph + 1,
                entry.message
            )?;
            if show_raw {
                if let Some(directive) = &entry.directive {
                    writeln!(out, "    directive: {directive}")?;
                }
                if let Some(raw) = &entry.raw {
                    writeln!(out, "    raw: {raw}")?;
                }
            }
            total += 1;
        }
    }

    let checked = plural(files.len(), "file");
    if total == 0 {
        writeln!(out, "No problems found in {checked}")
    } else {
        writeln!(out, "Found {} in {checked}", plural(total, "problem"))
    }
}

pub fn write_json(out: &mut impl Write, files: &[FileReport]) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, files)?;
    writeln!(out)?;
    Ok(())
}
