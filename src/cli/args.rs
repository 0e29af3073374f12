//! CLI argument definitions using clap.
//!
//! This module defines the command-line interface structure for all potkit commands.
//! It uses clap's derive API for declarative argument parsing.
//!
//! ## Commands
//!
//! - `xgettext`: Extract translatable strings from sources into a POT template
//! - `msgmerge`: Update a PO file against a newer template
//! - `msgfmt`: Compile a PO file into a JSON lookup table
//! - `init`: Initialize potkit configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "potkit", author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Xgettext(cmd)) => cmd.common.verbose,
            Some(Command::Msgmerge(cmd)) => cmd.common.verbose,
            Some(Command::Msgfmt(cmd)) => cmd.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct XgettextCommand {
    /// Source files, directories or glob patterns to scan
    #[arg(required = true)]
    pub inputs: Vec<String>,

    /// Write the template to this file (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Package name for the header (overrides config file)
    #[arg(long)]
    pub package_name: Option<String>,

    /// Package version for the header (overrides config file)
    #[arg(long)]
    pub package_version: Option<String>,

    /// Address for msgid bug reports (overrides config file)
    #[arg(long)]
    pub msgid_bugs_address: Option<String>,

    /// Copyright holder named in the header comment (overrides config file)
    #[arg(long)]
    pub copyright_holder: Option<String>,

    /// Charset of the written template (overrides config file)
    #[arg(long)]
    pub output_encoding: Option<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct MsgmergeCommand {
    /// Existing translations (.po)
    pub definition: PathBuf,

    /// Up-to-date template (.pot)
    pub reference: PathBuf,

    /// Write the merged catalog to this file (default: stdout)
    #[arg(short, long, conflicts_with = "update")]
    pub output: Option<PathBuf>,

    /// Rewrite the definition file in place
    #[arg(short = 'U', long)]
    pub update: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct MsgfmtCommand {
    /// Translation catalog to compile (.po)
    pub input: PathBuf,

    /// Write the JSON table to this file (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Keep translations of fuzzy entries
    #[arg(long)]
    pub use_fuzzy: bool,

    /// Do not report fuzzy entries
    #[arg(long)]
    pub no_warnings: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract translatable strings from source files into a POT template
    Xgettext(XgettextCommand),
    /// Merge an existing PO file with an updated POT template
    Msgmerge(MsgmergeCommand),
    /// Compile a PO file into a JSON message table
    Msgfmt(MsgfmtCommand),
    /// Initialize a new .potkitrc.json configuration file
    Init,
}
