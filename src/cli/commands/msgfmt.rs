use std::sync::Arc;

use anyhow::{Context, Result};

use super::{
    CommandResult, CommandSummary, MsgfmtSummary,
    helper::{load_project_config, write_output},
};
use crate::cli::args::MsgfmtCommand;
use crate::config::Config;
use crate::core::{
    MessageTable,
    diagnostics::{MemorySink, StderrSink, TeeSink, WarningSink},
    po::{ParserOptions, PoParser},
};

/// Fuzzy policy: CLI flags can only relax the config file.
fn parser_options(cmd: &MsgfmtCommand, config: &Config) -> ParserOptions {
    ParserOptions {
        ignore_fuzzy: config.ignore_fuzzy && !cmd.use_fuzzy,
        report_warning: config.report_warning && !cmd.no_warnings,
    }
}

pub fn msgfmt(cmd: MsgfmtCommand) -> Result<CommandResult> {
    let config = load_project_config(cmd.common.verbose)?;
    let options = parser_options(&cmd, &config);

    let counter = MemorySink::new();
    let sink: Arc<dyn WarningSink> = Arc::new(TeeSink(StderrSink, counter.clone()));
    let parser = PoParser::new(options).with_sink(sink);

    let catalog = parser
        .parse_file(&cmd.input)
        .with_context(|| format!("Failed to read {:?}", cmd.input))?;
    let table = MessageTable::from_catalog(&catalog);

    let mut json = serde_json::to_string_pretty(&table).context("Failed to serialize messages")?;
    json.push('\n');
    write_output(cmd.output.as_deref(), json.as_bytes())?;

    Ok(CommandResult::success(CommandSummary::Msgfmt(MsgfmtSummary {
        message_count: table.message_count(),
        translated_count: table.translated_count(),
        fuzzy_count: counter.len(),
        output: cmd.output,
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::args::CommonArgs;
    use std::path::PathBuf;

    fn command(use_fuzzy: bool, no_warnings: bool) -> MsgfmtCommand {
        MsgfmtCommand {
            input: PathBuf::from("ja.po"),
            output: None,
            use_fuzzy,
            no_warnings,
            common: CommonArgs::default(),
        }
    }

    #[test]
    fn defaults_follow_config() {
        let options = parser_options(&command(false, false), &Config::default());
        assert_eq!(options, ParserOptions::default());
    }

    #[test]
    fn flags_relax_policy() {
        let options = parser_options(&command(true, true), &Config::default());
        assert!(!options.ignore_fuzzy);
        assert!(!options.report_warning);
    }

    #[test]
    fn config_can_disable_warnings() {
        let config = Config {
            report_warning: false,
            ..Config::default()
        };
        let options = parser_options(&command(false, false), &config);
        assert!(options.ignore_fuzzy);
        assert!(!options.report_warning);
    }
}
