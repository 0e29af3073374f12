use anyhow::Result;

use super::{
    args::{Arguments, Command},
    commands::{
        CommandResult, init::init, msgfmt::msgfmt, msgmerge::msgmerge, xgettext::xgettext,
    },
};

/// Dispatch to the handler of the parsed command.
pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Xgettext(cmd)) => xgettext(cmd),
        Some(Command::Msgmerge(cmd)) => msgmerge(cmd),
        Some(Command::Msgfmt(cmd)) => msgfmt(cmd),
        Some(Command::Init) => init(),
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}
