use anyhow::{Context, Result};

use super::{
    CommandResult, CommandSummary, XgettextSummary,
    helper::{load_project_config, write_output},
};
use crate::cli::args::XgettextCommand;
use crate::config::Config;
use crate::core::{
    encoding::lookup_encoding,
    extract::{ExtractOptions, Extractor, IgnoreSet, ScannerRegistry, collect_input_files},
    po::HeaderOptions,
};

/// Header settings: CLI flags first, then the config file.
fn header_options(cmd: &XgettextCommand, config: Config) -> HeaderOptions {
    HeaderOptions {
        package_name: cmd.package_name.clone().unwrap_or(config.package_name),
        package_version: cmd.package_version.clone().unwrap_or(config.package_version),
        msgid_bugs_address: cmd
            .msgid_bugs_address
            .clone()
            .unwrap_or(config.msgid_bugs_address),
        copyright_holder: cmd.copyright_holder.clone().unwrap_or(config.copyright_holder),
        to_code: cmd.output_encoding.clone().unwrap_or(config.output_encoding),
        ..HeaderOptions::default()
    }
}

pub fn xgettext(cmd: XgettextCommand) -> Result<CommandResult> {
    let verbose = cmd.common.verbose;
    let config = load_project_config(verbose)?;
    let cwd = std::env::current_dir().context("Failed to read current directory")?;

    let ignores = IgnoreSet::new(&cwd, &config.ignores, verbose);
    let inputs = collect_input_files(&cmd.inputs, &ignores, verbose);

    let header = header_options(&cmd, config);
    lookup_encoding(&header.to_code)
        .with_context(|| format!("Invalid output encoding: \"{}\"", header.to_code))?;

    let extractor = Extractor::new(
        ScannerRegistry::with_defaults(),
        ExtractOptions {
            header,
            output: cmd.output.clone(),
            verbose,
        },
    );
    let catalog = extractor.extract(&inputs.files)?;
    let bytes = extractor.render(&catalog)?;
    write_output(cmd.output.as_deref(), &bytes)?;

    Ok(CommandResult::success(CommandSummary::Xgettext(
        XgettextSummary {
            file_count: inputs.files.len(),
            skipped_count: inputs.skipped_count,
            message_count: catalog.messages().count(),
            output: cmd.output,
        },
    )))
}
