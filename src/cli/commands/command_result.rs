use std::path::PathBuf;

use super::super::exit_status::ExitStatus;
use crate::core::merge::MergeReport;

#[derive(Debug)]
pub enum CommandSummary {
    Xgettext(XgettextSummary),
    Msgmerge(MsgmergeSummary),
    Msgfmt(MsgfmtSummary),
    Init(InitSummary),
}

impl CommandSummary {
    /// True when the command wrote its payload to stdout.
    pub fn payload_on_stdout(&self) -> bool {
        match self {
            CommandSummary::Xgettext(s) => s.output.is_none(),
            CommandSummary::Msgmerge(s) => s.output.is_none(),
            CommandSummary::Msgfmt(s) => s.output.is_none(),
            CommandSummary::Init(_) => false,
        }
    }
}

#[derive(Debug)]
pub struct XgettextSummary {
    pub file_count: usize,
    pub skipped_count: usize,
    pub message_count: usize,
    pub output: Option<PathBuf>,
}

#[derive(Debug)]
pub struct MsgmergeSummary {
    pub project: String,
    pub report: MergeReport,
    pub output: Option<PathBuf>,
}

#[derive(Debug)]
pub struct MsgfmtSummary {
    pub message_count: usize,
    pub translated_count: usize,
    pub fuzzy_count: usize,
    pub output: Option<PathBuf>,
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
}

/// Result of running potkit commands
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
    pub exit_status: ExitStatus,
}

impl CommandResult {
    pub fn success(summary: CommandSummary) -> Self {
        Self {
            summary,
            exit_status: ExitStatus::Success,
        }
    }
}
