use anyhow::{Context, Result};

use super::{CommandResult, CommandSummary, MsgmergeSummary, helper::write_output};
use crate::cli::args::MsgmergeCommand;
use crate::core::{
    merge::{merge, project_name},
    po::{
        HeaderFields, ParserOptions, PoParser, header::DEFAULT_OUTPUT_ENCODING,
        write_catalog_encoded,
    },
};

pub fn msgmerge(cmd: MsgmergeCommand) -> Result<CommandResult> {
    // Merging must see fuzzy translations as they are and stay quiet about them.
    let parser = PoParser::new(ParserOptions {
        ignore_fuzzy: false,
        report_warning: false,
    });
    let existing = parser
        .parse_file(&cmd.definition)
        .with_context(|| format!("Failed to read {:?}", cmd.definition))?;
    let template = parser
        .parse_file(&cmd.reference)
        .with_context(|| format!("Failed to read {:?}", cmd.reference))?;

    let (merged, report) = merge(&existing, &template);

    let to_code = merged
        .header()
        .map(HeaderFields::from_entry)
        .and_then(|fields| fields.charset().map(str::to_string))
        .unwrap_or_else(|| DEFAULT_OUTPUT_ENCODING.to_string());

    let output = if cmd.update {
        Some(cmd.definition.clone())
    } else {
        cmd.output
    };
    let target = output.clone().unwrap_or_else(|| cmd.definition.clone());
    let bytes = write_catalog_encoded(&merged, &to_code, &target)?;
    write_output(output.as_deref(), &bytes)?;

    Ok(CommandResult::success(CommandSummary::Msgmerge(
        MsgmergeSummary {
            project: project_name(&merged),
            report,
            output,
        },
    )))
}
