//! Summary lines printed after a command finishes.
//!
//! When a command writes its payload to stdout, the summary goes to stderr
//! so that piping the payload stays clean.

use std::io::{self, Write};

use colored::Colorize;

use super::commands::{
    CommandResult, CommandSummary, InitSummary, MsgfmtSummary, MsgmergeSummary, XgettextSummary,
};
use crate::config::CONFIG_FILE_NAME;

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 { one } else { many }
}

pub fn print(result: &CommandResult, verbose: bool) {
    if result.summary.payload_on_stdout() {
        print_to(result, verbose, &mut io::stderr().lock());
    } else {
        print_to(result, verbose, &mut io::stdout().lock());
    }
}

pub fn print_to<W: Write>(result: &CommandResult, verbose: bool, writer: &mut W) {
    match &result.summary {
        CommandSummary::Xgettext(summary) => print_xgettext(summary, verbose, writer),
        CommandSummary::Msgmerge(summary) => print_msgmerge(summary, writer),
        CommandSummary::Msgfmt(summary) => print_msgfmt(summary, writer),
        CommandSummary::Init(summary) => print_init(summary, writer),
    }
}

fn print_xgettext<W: Write>(summary: &XgettextSummary, verbose: bool, writer: &mut W) {
    let target = summary
        .output
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "stdout".to_string());
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Extracted {} {} from {} {} into {}",
            summary.message_count,
            plural(summary.message_count, "message", "messages"),
            summary.file_count,
            plural(summary.file_count, "file", "files"),
            target
        )
        .green()
    );
    if summary.skipped_count > 0 && !verbose {
        let _ = writeln!(
            writer,
            "{} {} path(s) could not be read (use {} for details)",
            "warning:".bold().yellow(),
            summary.skipped_count,
            "-v".cyan()
        );
    }
}

fn print_msgmerge<W: Write>(summary: &MsgmergeSummary, writer: &mut W) {
    let report = &summary.report;
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Merged {}: {} matched, {} revived, {} untranslated, {} obsolete",
            summary.project, report.matched, report.revived, report.untranslated, report.obsoleted
        )
        .green()
    );
}

fn print_msgfmt<W: Write>(summary: &MsgfmtSummary, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "{} translated {}, {} untranslated",
            summary.translated_count,
            plural(summary.translated_count, "message", "messages"),
            summary.message_count - summary.translated_count
        )
        .green()
    );
    if summary.fuzzy_count > 0 {
        let _ = writeln!(
            writer,
            "{} {} fuzzy {}",
            "warning:".bold().yellow(),
            summary.fuzzy_count,
            plural(summary.fuzzy_count, "entry", "entries")
        );
    }
}

fn print_init<W: Write>(summary: &InitSummary, writer: &mut W) {
    if summary.created {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    } else {
        eprintln!("Error: {} already exists", CONFIG_FILE_NAME);
    }
}
